//! REST client — thin offline/online wrapper over blocking HTTP.
//!
//! In offline mode every method is a no-op, which makes dry runs and tests
//! cheap. In online mode requests are issued synchronously and any HTTP,
//! timeout, or connection failure is logged and swallowed: callers observe
//! a missing return value, never an error. The Space/Section layer is
//! written against that contract.

use std::time::Duration;

use serde_json::Value;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);


pub struct RestClient {
    offline: bool,
    http: reqwest::blocking::Client,
}

impl RestClient {
    pub fn new(offline: bool) -> RestClient {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to default http client: {}", e);
                reqwest::blocking::Client::new()
            });
        RestClient { offline, http }
    }

    pub fn offline(&self) -> bool {
        self.offline
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Fire-and-forget GET with query parameters.
    pub fn get(&self, url: &str, params: &[(&str, String)]) {
        if self.offline {
            return;
        }
        let result = self
            .http
            .get(url)
            .query(params)
            .send()
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            log::warn!("request failed: {}", e);
        }
    }

    /// POST a JSON body. Returns the parsed response body, or `None` when
    /// offline or when the request failed.
    pub fn post(&self, url: &str, body: &Value) -> Option<Value> {
        if self.offline {
            return None;
        }
        let result = self
            .http
            .post(url)
            .json(body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<Value>());
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("request failed: {}", e);
                None
            }
        }
    }

    /// Fire-and-forget DELETE.
    pub fn delete(&self, url: &str) {
        if self.offline {
            return;
        }
        let result = self
            .http
            .delete(url)
            .send()
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            log::warn!("request failed: {}", e);
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
