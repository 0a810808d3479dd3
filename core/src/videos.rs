//! Playback command forwarder for the videos app.
//!
//! Stateless: every method issues one GET against the videos app's
//! operation endpoint. Commands apply to every video section on the wall
//! unless scoped to a single section id.

use crate::apps::AppKind;
use crate::space::Space;


pub struct Videos<'a> {
    space: &'a Space,
}

impl<'a> Videos<'a> {
    pub(crate) fn new(space: &'a Space) -> Videos<'a> {
        Videos { space }
    }

    pub fn play(&self, section: Option<&str>) {
        self.operation("play", section, None);
    }

    pub fn pause(&self, section: Option<&str>) {
        self.operation("pause", section, None);
    }

    pub fn stop(&self, section: Option<&str>) {
        self.operation("stop", section, None);
    }

    /// Seek to an absolute position in seconds.
    pub fn seek(&self, time: f64, section: Option<&str>) {
        self.operation("seekTo", section, Some(("time", time.to_string())));
    }

    fn operation(&self, name: &str, section: Option<&str>, extra: Option<(&str, String)>) {
        let url = format!("{}/operation/{}", self.space.app_base(AppKind::Videos), name);
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = section {
            params.push(("oveSectionId", id.to_string()));
        }
        if let Some(pair) = extra {
            params.push(pair);
        }
        self.space.client().get(&url, &params);
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
