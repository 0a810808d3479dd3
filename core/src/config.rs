//! Wall configuration — host, space name, app ports, and pixel geometry.
//!
//! A `WallConfig` is the complete description of one wall environment.
//! Bundles can be loaded from YAML files or taken from the built-in
//! local-testing preset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::apps::AppKind;
use crate::error::WallError;


/// Pixel dimensions and physical screen grid of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub screen_rows: u32,
    pub screen_cols: u32,
}

/// Port assignments for the control service and each wall app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMap {
    pub control: u16,
    pub maps: u16,
    pub images: u16,
    pub html: u16,
    pub videos: u16,
    pub networks: u16,
    pub charts: u16,
    pub imagetiles: u16,
}

impl PortMap {
    /// Port of the app serving the given section variant.
    pub fn app_port(&self, kind: AppKind) -> u16 {
        match kind {
            AppKind::Maps => self.maps,
            AppKind::Images => self.images,
            AppKind::Html => self.html,
            AppKind::Videos => self.videos,
            AppKind::Networks => self.networks,
            AppKind::Charts => self.charts,
        }
    }

    /// Default port block for a locally running wall stack.
    pub fn local_defaults() -> PortMap {
        PortMap {
            control: 8080,
            maps: 8081,
            images: 8082,
            html: 8083,
            videos: 8084,
            networks: 8085,
            charts: 8086,
            imagetiles: 8087,
        }
    }
}


/// A named wall environment: where it lives and how big it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallConfig {
    pub host: String,
    pub space_name: String,
    pub ports: PortMap,
    pub geometry: Geometry,
}

impl WallConfig {
    /// Build a config, normalizing the host to carry an http scheme.
    pub fn new(host: &str, space_name: &str, ports: PortMap, geometry: Geometry) -> WallConfig {
        WallConfig {
            host: normalize_host(host),
            space_name: space_name.to_string(),
            ports,
            geometry,
        }
    }

    /// The local-testing preset: a 3x3 grid of 480x269 screens on localhost.
    pub fn local(space_name: &str) -> WallConfig {
        WallConfig::new(
            "localhost",
            space_name,
            PortMap::local_defaults(),
            Geometry {
                width: 1440,
                height: 808,
                screen_rows: 3,
                screen_cols: 3,
            },
        )
    }

    /// Load a config bundle from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<WallConfig, WallError> {
        let raw = std::fs::read_to_string(path)?;
        let config: WallConfig = serde_yaml::from_str(&raw)
            .map_err(|e| WallError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(WallConfig {
            host: normalize_host(&config.host),
            ..config
        })
    }
}


fn normalize_host(host: &str) -> String {
    if host.starts_with("http") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
