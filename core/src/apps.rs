//! App variants and their state payloads.
//!
//! A section hosts exactly one of six wall apps. `AppKind` is the closed set
//! of variant tags; `AppContent` pairs a tag with its variant-specific state.
//! The state structs mirror the wire format of the wall service field for
//! field, so serializing them produces exactly what the remote apps load.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const YOUTUBE_WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";
const YOUTUBE_EMBED_PREFIX: &str = "http://www.youtube.com/embed/";


/// The six app variants a section can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppKind {
    Maps,
    Images,
    Html,
    Videos,
    Networks,
    Charts,
}

impl AppKind {
    pub const ALL: [AppKind; 6] = [
        AppKind::Maps,
        AppKind::Images,
        AppKind::Html,
        AppKind::Videos,
        AppKind::Networks,
        AppKind::Charts,
    ];

    /// Lowercase name as used in port maps and layout files.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::Maps => "maps",
            AppKind::Images => "images",
            AppKind::Html => "html",
            AppKind::Videos => "videos",
            AppKind::Networks => "networks",
            AppKind::Charts => "charts",
        }
    }

    /// Parse a variant tag, case-insensitively.
    ///
    /// Names outside the six-variant set (including other port map keys
    /// like `control` or `imagetiles`) are rejected with `None`.
    pub fn parse(name: &str) -> Option<AppKind> {
        let lower = name.to_ascii_lowercase();
        AppKind::ALL.iter().copied().find(|k| k.as_str() == lower)
    }

    /// The `app.url` marker written into saved layout files.
    pub fn marker(&self) -> &'static str {
        match self {
            AppKind::Maps => "OVE_APP_MAPS",
            AppKind::Images => "OVE_APP_IMAGES",
            AppKind::Html => "OVE_APP_HTML",
            AppKind::Videos => "OVE_APP_VIDEOS",
            AppKind::Networks => "OVE_APP_NETWORKS",
            AppKind::Charts => "OVE_APP_CHARTS",
        }
    }

    /// Infer the variant from a layout file marker: the last `_`-delimited
    /// token of the (case-insensitive) `app.url` field.
    pub fn from_marker(marker: &str) -> Option<AppKind> {
        let token = marker.to_ascii_lowercase();
        let token = token.rsplit('_').next()?;
        AppKind::parse(token)
    }

    /// Comma-separated list of all supported variant names, for diagnostics.
    pub fn supported() -> String {
        AppKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


// ---------------------------------------------------------------------------
// State payloads
// ---------------------------------------------------------------------------

/// Map viewport. The maps app uses Web Mercator coordinates (EPSG:900913)
/// and expects all values as strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapState {
    pub center: [String; 2],
    pub resolution: String,
    pub zoom: String,
}

impl MapState {
    pub fn new(latitude: f64, longitude: f64, resolution: u32, zoom: u32) -> MapState {
        MapState {
            center: [latitude.to_string(), longitude.to_string()],
            resolution: resolution.to_string(),
            zoom: zoom.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSources {
    pub url: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(rename = "panHorizontal")]
    pub pan_horizontal: bool,
    #[serde(rename = "wrapHorizontal")]
    pub wrap_horizontal: bool,
    #[serde(rename = "visibilityRatio")]
    pub visibility_ratio: u32,
    #[serde(rename = "wrapVertical")]
    pub wrap_vertical: bool,
    #[serde(rename = "panVertical")]
    pub pan_vertical: bool,
    #[serde(rename = "tileSources")]
    pub tile_sources: TileSources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageState {
    pub config: ImageConfig,
}

impl ImageState {
    /// Canonical tile-source configuration for a single image URL.
    pub fn for_url(url: &str) -> ImageState {
        ImageState {
            config: ImageConfig {
                pan_horizontal: false,
                wrap_horizontal: true,
                visibility_ratio: 1,
                wrap_vertical: true,
                pan_vertical: false,
                tile_sources: TileSources {
                    url: url.to_string(),
                    source_type: "image".to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(rename = "autoRescale")]
    pub auto_rescale: bool,
    pub clone: bool,
    #[serde(rename = "defaultNodeColor")]
    pub default_node_color: String,
}

/// Network graph state. Exactly one of `json_url`/`gexf_url` is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    pub settings: NetworkSettings,
    #[serde(rename = "jsonURL", default, skip_serializing_if = "Option::is_none")]
    pub json_url: Option<String>,
    #[serde(rename = "gexfURL", default, skip_serializing_if = "Option::is_none")]
    pub gexf_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub options: Value,
    #[serde(rename = "specURL", default, skip_serializing_if = "Option::is_none")]
    pub spec_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
}


// ---------------------------------------------------------------------------
// Tagged union over the six variants
// ---------------------------------------------------------------------------

/// Variant tag plus the state it currently displays. Freshly created
/// sections carry no state until a setter publishes one.
#[derive(Debug, Clone, PartialEq)]
pub enum AppContent {
    Map { state: Option<MapState> },
    Image { state: Option<ImageState> },
    Html { url: Option<String> },
    Video { url: Option<String> },
    Network { state: Option<NetworkState> },
    Chart { state: Option<ChartState> },
}

impl AppContent {
    /// Empty content for a freshly created section of the given kind.
    pub fn empty(kind: AppKind) -> AppContent {
        match kind {
            AppKind::Maps => AppContent::Map { state: None },
            AppKind::Images => AppContent::Image { state: None },
            AppKind::Html => AppContent::Html { url: None },
            AppKind::Videos => AppContent::Video { url: None },
            AppKind::Networks => AppContent::Network { state: None },
            AppKind::Charts => AppContent::Chart { state: None },
        }
    }

    pub fn kind(&self) -> AppKind {
        match self {
            AppContent::Map { .. } => AppKind::Maps,
            AppContent::Image { .. } => AppKind::Images,
            AppContent::Html { .. } => AppKind::Html,
            AppContent::Video { .. } => AppKind::Videos,
            AppContent::Network { .. } => AppKind::Networks,
            AppContent::Chart { .. } => AppKind::Charts,
        }
    }

    /// The `states.load` object written into saved layouts: exactly the
    /// fields needed to reconstruct this variant's state.
    pub fn load_state(&self) -> Value {
        match self {
            AppContent::Map { state } => match state {
                Some(s) => json!(s),
                None => json!({}),
            },
            AppContent::Image { state } => match state {
                Some(s) => json!({ "config": s.config, "position": {} }),
                None => json!({}),
            },
            AppContent::Html { url } | AppContent::Video { url } => {
                json!({ "url": url.clone().unwrap_or_default() })
            }
            AppContent::Network { state } => match state {
                Some(s) => json!(s),
                None => json!({}),
            },
            AppContent::Chart { state } => match state {
                Some(s) => json!(s),
                None => json!({}),
            },
        }
    }
}


/// Rewrite a YouTube "watch" URL into its "embed" form by literal prefix
/// substitution. Any other URL passes through unchanged.
pub fn embed_video_url(url: &str) -> String {
    match url.strip_prefix(YOUTUBE_WATCH_PREFIX) {
        Some(id) => format!("{}{}", YOUTUBE_EMBED_PREFIX, id),
        None => url.to_string(),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
