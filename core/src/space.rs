//! Space — grid geometry, section lifecycle, and layout save/load.
//!
//! A `Space` owns the pixel geometry and logical grid of one wall, the
//! local mirror of its sections, and the client used to drive the remote
//! control service. The wall service remains the source of truth for
//! "real" sections; this mirror is best effort.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::apps::{
    embed_video_url, AppContent, AppKind, ChartState, ImageState, MapState, NetworkSettings,
    NetworkState,
};
use crate::client::RestClient;
use crate::config::WallConfig;
use crate::error::WallError;
use crate::section::{Attribution, Frame, LayoutDoc, Section};
use crate::videos::Videos;


/// Map viewport parameters. Defaults match the wall's map app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub resolution: u32,
    pub zoom: u32,
}

impl Default for MapPosition {
    fn default() -> Self {
        MapPosition {
            latitude: 0.0,
            longitude: 0.0,
            resolution: 5000,
            zoom: 5,
        }
    }
}

/// Network graph source and display settings. At least one of
/// `json_url`/`gexf_url` must be set; the json URL wins when both are.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkData {
    pub json_url: Option<String>,
    pub gexf_url: Option<String>,
    pub default_node_color: String,
    pub auto_rescale: bool,
}

impl Default for NetworkData {
    fn default() -> Self {
        NetworkData {
            json_url: None,
            gexf_url: None,
            default_node_color: "#ec5148".to_string(),
            auto_rescale: true,
        }
    }
}

/// Chart specification. `spec_url` takes precedence over an inline `spec`;
/// both may be absent (an options-only state is valid).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    pub spec_url: Option<String>,
    pub spec: Option<Value>,
    pub options: Option<Value>,
}

/// Non-fatal outcome of `set_network_data` when both source URLs were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDataNotice {
    GexfIgnored,
}


pub struct Space {
    config: WallConfig,
    client: RestClient,
    num_rows: u32,
    num_cols: u32,
    row_height: u32,
    col_width: u32,
    sections: Vec<Section>,
}

impl Space {
    /// Create a space in offline mode (no network I/O until
    /// `enable_online_mode`). The grid starts at the configured screen grid.
    pub fn new(config: WallConfig) -> Space {
        let mut space = Space {
            config,
            client: RestClient::new(true),
            num_rows: 0,
            num_cols: 0,
            row_height: 0,
            col_width: 0,
            sections: Vec::new(),
        };
        space.set_grid(
            space.config.geometry.screen_rows,
            space.config.geometry.screen_cols,
        );
        space
    }

    pub fn enable_online_mode(&mut self) {
        self.client.set_offline(false);
    }

    pub fn enable_offline_mode(&mut self) {
        self.client.set_offline(true);
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn col_width(&self) -> u32 {
        self.col_width
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    /// Set the logical grid and recompute cell sizes from the pixel
    /// geometry. The clamp to 1 exists solely to avoid division by zero.
    pub fn set_grid(&mut self, rows: u32, cols: u32) {
        self.num_rows = rows;
        self.num_cols = cols;
        self.row_height = self.config.geometry.height / rows.max(1);
        self.col_width = self.config.geometry.width / cols.max(1);
    }

    /// Grid with four cells per physical screen.
    pub fn set_quarter_grid(&mut self) {
        self.set_grid(
            2 * self.config.geometry.screen_rows,
            2 * self.config.geometry.screen_cols,
        );
    }

    // -----------------------------------------------------------------------
    // Section lifecycle
    // -----------------------------------------------------------------------

    /// Create a section covering `w`x`h` grid cells with its top-left corner
    /// at grid row `r`, column `c`. Unless `allow_oversized` is set, the
    /// footprint must not exceed the grid extent in either axis.
    pub fn add_section_by_grid(
        &mut self,
        w: u32,
        h: u32,
        r: u32,
        c: u32,
        app_type: &str,
        allow_oversized: bool,
    ) -> Result<String, WallError> {
        if !allow_oversized && (c + w > self.num_cols || r + h > self.num_rows) {
            return Err(WallError::OutOfBounds {
                x: c * self.col_width,
                y: r * self.row_height,
                w: w * self.col_width,
                h: h * self.row_height,
            });
        }
        self.add_section(
            Frame::new(
                w * self.col_width,
                h * self.row_height,
                c * self.col_width,
                r * self.row_height,
            ),
            app_type,
            allow_oversized,
        )
    }

    /// Create a section at a pixel frame, register it with the wall
    /// service, and return its id.
    ///
    /// The id is assigned by the service; in offline mode, or when the
    /// create request was swallowed, a fresh local token is used instead so
    /// the mirror stays addressable.
    pub fn add_section(
        &mut self,
        frame: Frame,
        app_type: &str,
        allow_oversized: bool,
    ) -> Result<String, WallError> {
        let kind = AppKind::parse(app_type).ok_or_else(|| WallError::InvalidAppType {
            given: app_type.to_string(),
            supported: AppKind::supported(),
        })?;

        if !allow_oversized
            && (frame.x + frame.w > self.config.geometry.width
                || frame.y + frame.h > self.config.geometry.height)
        {
            return Err(WallError::OutOfBounds {
                x: frame.x,
                y: frame.y,
                w: frame.w,
                h: frame.h,
            });
        }

        let payload = json!({
            "space": self.config.space_name,
            "w": frame.w,
            "h": frame.h,
            "x": frame.x,
            "y": frame.y,
            "app": { "url": self.app_base(kind) },
        });

        let response = self.client.post(&format!("{}/section", self.control_base()), &payload);
        let id = response
            .as_ref()
            .and_then(|r| r.get("id"))
            .map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        log::info!(
            "created section {}: control page is {}/control.html?oveSectionId={}",
            id,
            self.control_base(),
            id
        );

        self.sections.push(Section {
            id: id.clone(),
            frame,
            content: AppContent::empty(kind),
        });
        Ok(id)
    }

    /// Delete one section remotely and drop it from the mirror.
    pub fn delete_section(&mut self, id: &str) -> Result<(), WallError> {
        let index = self.section_index(id)?;
        self.client
            .delete(&format!("{}/section/{}", self.control_base(), id));
        self.sections.remove(index);
        Ok(())
    }

    /// Bulk-delete every section on the wall and clear the mirror. The
    /// local collection is cleared even if the remote call was swallowed.
    pub fn delete_sections(&mut self) {
        self.client.delete(&format!("{}/sections", self.control_base()));
        self.sections.clear();
    }

    // -----------------------------------------------------------------------
    // Per-variant state setters
    // -----------------------------------------------------------------------

    /// Point a maps section at a viewport, publishing it as a named state.
    pub fn set_map_position(
        &mut self,
        id: &str,
        position: MapPosition,
        name: Option<&str>,
    ) -> Result<(), WallError> {
        let index = self.expect_kind(id, AppKind::Maps)?;
        let state = MapState::new(
            position.latitude,
            position.longitude,
            position.resolution,
            position.zoom,
        );
        let name = state_name(name);
        self.publish_state(AppKind::Maps, &name, &json!(state));
        self.log_control_page(AppKind::Maps, id, &format!("state={}", name));
        self.sections[index].content = AppContent::Map { state: Some(state) };
        Ok(())
    }

    /// Show an image URL in an images section.
    pub fn set_image_url(
        &mut self,
        id: &str,
        url: &str,
        name: Option<&str>,
    ) -> Result<(), WallError> {
        let index = self.expect_kind(id, AppKind::Images)?;
        let state = ImageState::for_url(url);
        let name = state_name(name);
        self.publish_state(AppKind::Images, &name, &json!(state));
        self.log_control_page(AppKind::Images, id, &format!("state={}", name));
        self.sections[index].content = AppContent::Image { state: Some(state) };
        Ok(())
    }

    /// Show a web page in an html section. The URL rides in the control
    /// page link; no named state is published.
    pub fn set_html_url(&mut self, id: &str, url: &str) -> Result<(), WallError> {
        let index = self.expect_kind(id, AppKind::Html)?;
        self.log_control_page(AppKind::Html, id, &format!("url={}", url));
        self.sections[index].content = AppContent::Html {
            url: Some(url.to_string()),
        };
        Ok(())
    }

    /// Show a video in a videos section. YouTube watch URLs are rewritten
    /// to their embed form; everything else is stored verbatim.
    pub fn set_video_url(&mut self, id: &str, url: &str) -> Result<(), WallError> {
        let index = self.expect_kind(id, AppKind::Videos)?;
        let url = embed_video_url(url);
        self.log_control_page(AppKind::Videos, id, &format!("url={}", url));
        self.sections[index].content = AppContent::Video { url: Some(url) };
        Ok(())
    }

    /// Load a graph into a networks section. Requires a json or gexf source
    /// URL; when both are given the json URL wins and the gexf URL is
    /// reported as ignored via the returned notice.
    pub fn set_network_data(
        &mut self,
        id: &str,
        data: NetworkData,
        name: Option<&str>,
    ) -> Result<Option<SetDataNotice>, WallError> {
        let index = self.expect_kind(id, AppKind::Networks)?;

        let json_url = data.json_url.filter(|u| !u.is_empty());
        let gexf_url = data.gexf_url.filter(|u| !u.is_empty());
        if json_url.is_none() && gexf_url.is_none() {
            return Err(WallError::MissingGraphSource);
        }
        let notice = if json_url.is_some() && gexf_url.is_some() {
            Some(SetDataNotice::GexfIgnored)
        } else {
            None
        };

        let state = NetworkState {
            settings: NetworkSettings {
                auto_rescale: data.auto_rescale,
                clone: false,
                default_node_color: data.default_node_color,
            },
            gexf_url: if json_url.is_some() { None } else { gexf_url },
            json_url,
        };

        let name = state_name(name);
        self.publish_state(AppKind::Networks, &name, &json!(state));
        self.log_control_page(AppKind::Networks, id, &format!("state={}", name));
        self.sections[index].content = AppContent::Network { state: Some(state) };
        Ok(notice)
    }

    /// Render a chart specification in a charts section.
    pub fn set_chart_spec(
        &mut self,
        id: &str,
        spec: ChartSpec,
        name: Option<&str>,
    ) -> Result<(), WallError> {
        let index = self.expect_kind(id, AppKind::Charts)?;
        let state = ChartState {
            options: spec.options.unwrap_or_else(|| json!({})),
            spec: if spec.spec_url.is_some() { None } else { spec.spec },
            spec_url: spec.spec_url,
        };
        let name = state_name(name);
        self.publish_state(AppKind::Charts, &name, &json!(state));
        self.log_control_page(AppKind::Charts, id, &format!("state={}", name));
        self.sections[index].content = AppContent::Chart { state: Some(state) };
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Save / load
    // -----------------------------------------------------------------------

    /// Serialize the current layout to the wall's JSON file format.
    pub fn to_json(&self, title: &str) -> Result<String, WallError> {
        let doc = LayoutDoc {
            attribution: Attribution {
                title: title.to_string(),
            },
            sections: self.sections.iter().map(Section::to_doc).collect(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Recreate sections from a saved layout file.
    ///
    /// Malformed JSON fails the whole call; individual entries with an
    /// unrecognizable app marker, or whose recreation fails, are logged and
    /// skipped so loading never aborts midway.
    pub fn load_json(&mut self, raw: &str) -> Result<(), WallError> {
        let doc: LayoutDoc = serde_json::from_str(raw)?;

        for entry in doc.sections {
            let kind = match AppKind::from_marker(&entry.app.url) {
                Some(kind) => kind,
                None => {
                    log::warn!("skipping section with unknown app marker '{}'", entry.app.url);
                    continue;
                }
            };
            let frame = Frame::new(entry.w, entry.h, entry.x, entry.y);
            let id = match self.add_section(frame, kind.as_str(), false) {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("skipping {} section: {}", kind, e);
                    continue;
                }
            };
            if let Err(e) = self.restore_state(&id, kind, &entry.app.states.load) {
                log::warn!("could not restore state for {} section: {}", kind, e);
            }
        }
        Ok(())
    }

    /// Re-apply the variant setter from a saved `states.load` object.
    fn restore_state(&mut self, id: &str, kind: AppKind, load: &Value) -> Result<(), WallError> {
        match kind {
            AppKind::Maps => {
                let defaults = MapPosition::default();
                let position = MapPosition {
                    latitude: str_field_as(load.pointer("/center/0"), defaults.latitude),
                    longitude: str_field_as(load.pointer("/center/1"), defaults.longitude),
                    resolution: str_field_as(load.get("resolution"), defaults.resolution),
                    zoom: str_field_as(load.get("zoom"), defaults.zoom),
                };
                self.set_map_position(id, position, None)
            }
            AppKind::Images => {
                let url = load
                    .pointer("/config/tileSources/url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                self.set_image_url(id, &url, None)
            }
            AppKind::Html => {
                let url = load.get("url").and_then(Value::as_str).unwrap_or_default();
                self.set_html_url(id, url)
            }
            AppKind::Videos => {
                let url = load.get("url").and_then(Value::as_str).unwrap_or_default();
                self.set_video_url(id, url)
            }
            AppKind::Networks => {
                let data = NetworkData {
                    json_url: load
                        .get("jsonURL")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    gexf_url: load
                        .get("gexfURL")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    default_node_color: load
                        .pointer("/settings/defaultNodeColor")
                        .and_then(Value::as_str)
                        .unwrap_or("#ec5148")
                        .to_string(),
                    auto_rescale: load
                        .pointer("/settings/autoRescale")
                        .and_then(Value::as_bool)
                        .unwrap_or(true),
                };
                self.set_network_data(id, data, None).map(|_| ())
            }
            AppKind::Charts => {
                let spec = ChartSpec {
                    spec_url: load
                        .get("specURL")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    spec: load.get("spec").cloned(),
                    options: load.get("options").cloned(),
                };
                self.set_chart_spec(id, spec, None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Playback command forwarder for the videos app of this space.
    pub fn videos(&self) -> Videos<'_> {
        Videos::new(self)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn control_base(&self) -> String {
        format!("{}:{}", self.config.host, self.config.ports.control)
    }

    pub(crate) fn app_base(&self, kind: AppKind) -> String {
        format!("{}:{}", self.config.host, self.config.ports.app_port(kind))
    }

    fn section_index(&self, id: &str) -> Result<usize, WallError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WallError::UnknownSection(id.to_string()))
    }

    fn expect_kind(&self, id: &str, expected: AppKind) -> Result<usize, WallError> {
        let index = self.section_index(id)?;
        let actual = self.sections[index].kind();
        if actual != expected {
            return Err(WallError::KindMismatch {
                id: id.to_string(),
                expected,
                actual,
            });
        }
        Ok(index)
    }

    /// Publish a named state blob to the app serving the given variant.
    fn publish_state(&self, kind: AppKind, name: &str, state: &Value) {
        let url = format!("{}/state/{}", self.app_base(kind), name);
        self.client.post(&url, state);
        log::info!("created state: {}", url);
    }

    fn log_control_page(&self, kind: AppKind, id: &str, query: &str) {
        log::info!(
            "to load the {} app, open {}/control.html?oveSectionId={}&{}",
            kind,
            self.app_base(kind),
            id,
            query
        );
    }
}


fn state_name(name: Option<&str>) -> String {
    match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Read a wire field stored as a stringified number, with a fallback.
fn str_field_as<T: std::str::FromStr>(value: Option<&Value>, default: T) -> T {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WallConfig;

    fn space() -> Space {
        Space::new(WallConfig::local("TestNine"))
    }

    #[test]
    fn grid_defaults_to_screen_grid() {
        let s = space();
        assert_eq!(s.num_rows(), 3);
        assert_eq!(s.num_cols(), 3);
        assert_eq!(s.row_height(), 808 / 3);
        assert_eq!(s.col_width(), 1440 / 3);
    }

    #[test]
    fn set_grid_floor_division_property() {
        let mut s = space();
        for rows in 1..=7u32 {
            for cols in 1..=7u32 {
                s.set_grid(rows, cols);
                assert!(s.row_height() * rows <= 808, "rows={}", rows);
                assert!(s.col_width() * cols <= 1440, "cols={}", cols);
            }
        }
    }

    #[test]
    fn set_grid_zero_clamps_instead_of_dividing_by_zero() {
        let mut s = space();
        s.set_grid(0, 0);
        assert_eq!(s.row_height(), 808);
        assert_eq!(s.col_width(), 1440);
    }

    #[test]
    fn quarter_grid_doubles_screen_grid() {
        let mut s = space();
        s.set_quarter_grid();
        assert_eq!(s.num_rows(), 6);
        assert_eq!(s.num_cols(), 6);
    }

    #[test]
    fn stale_cell_sizes_never_persist() {
        let mut s = space();
        s.set_grid(2, 2);
        let (rh, cw) = (s.row_height(), s.col_width());
        s.set_grid(4, 4);
        assert_ne!(s.row_height(), rh);
        assert_ne!(s.col_width(), cw);
    }

    #[test]
    fn add_section_returns_id_and_mirrors() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "maps", false).unwrap();
        assert_eq!(s.sections().len(), 1);
        let section = s.section(&id).unwrap();
        assert_eq!(section.kind(), AppKind::Maps);
        assert_eq!(section.frame, Frame::new(400, 300, 0, 0));
    }

    #[test]
    fn add_section_rejects_out_of_bounds_and_mutates_nothing() {
        let mut s = space();
        let err = s
            .add_section(Frame::new(1000, 300, 600, 0), "maps", false)
            .unwrap_err();
        assert!(matches!(err, WallError::OutOfBounds { .. }));
        let err = s
            .add_section(Frame::new(400, 700, 0, 200), "maps", false)
            .unwrap_err();
        assert!(matches!(err, WallError::OutOfBounds { .. }));
        assert!(s.sections().is_empty());
    }

    #[test]
    fn oversized_override_always_succeeds() {
        let mut s = space();
        s.add_section(Frame::new(9000, 9000, 5000, 5000), "html", true)
            .unwrap();
        assert_eq!(s.sections().len(), 1);
    }

    #[test]
    fn add_section_rejects_unknown_app_type() {
        let mut s = space();
        let err = s.add_section(Frame::new(10, 10, 0, 0), "audio", false).unwrap_err();
        match err {
            WallError::InvalidAppType { given, supported } => {
                assert_eq!(given, "audio");
                assert!(supported.contains("maps"));
                assert!(supported.contains("charts"));
            }
            other => panic!("expected InvalidAppType, got {:?}", other),
        }
        assert!(s.sections().is_empty());
    }

    #[test]
    fn non_section_port_keys_are_not_app_types() {
        let mut s = space();
        assert!(matches!(
            s.add_section(Frame::new(10, 10, 0, 0), "control", false),
            Err(WallError::InvalidAppType { .. })
        ));
        assert!(matches!(
            s.add_section(Frame::new(10, 10, 0, 0), "imagetiles", false),
            Err(WallError::InvalidAppType { .. })
        ));
    }

    #[test]
    fn add_section_by_grid_converts_cells_to_pixels() {
        let mut s = space();
        let id = s.add_section_by_grid(2, 1, 1, 1, "images", false).unwrap();
        let section = s.section(&id).unwrap();
        assert_eq!(section.frame.w, 2 * s.col_width());
        assert_eq!(section.frame.h, s.row_height());
        assert_eq!(section.frame.x, s.col_width());
        assert_eq!(section.frame.y, s.row_height());
    }

    #[test]
    fn grid_footprint_must_fit_grid_extent() {
        let mut s = space();
        // 3x3 grid: a 2-wide section starting at column 2 extends to 4.
        assert!(matches!(
            s.add_section_by_grid(2, 1, 0, 2, "maps", false),
            Err(WallError::OutOfBounds { .. })
        ));
        assert!(matches!(
            s.add_section_by_grid(1, 2, 2, 0, "maps", false),
            Err(WallError::OutOfBounds { .. })
        ));
        assert!(s.sections().is_empty());
        // Override skips the grid check too.
        s.add_section_by_grid(2, 1, 0, 2, "maps", true).unwrap();
        assert_eq!(s.sections().len(), 1);
    }

    #[test]
    fn delete_section_removes_from_mirror() {
        let mut s = space();
        let id = s.add_section(Frame::new(100, 100, 0, 0), "html", false).unwrap();
        s.delete_section(&id).unwrap();
        assert!(s.sections().is_empty());
        assert!(matches!(
            s.delete_section(&id),
            Err(WallError::UnknownSection(_))
        ));
    }

    #[test]
    fn delete_sections_clears_unconditionally() {
        let mut s = space();
        s.add_section(Frame::new(100, 100, 0, 0), "maps", false).unwrap();
        s.add_section(Frame::new(100, 100, 200, 0), "html", false).unwrap();
        s.delete_sections();
        assert!(s.sections().is_empty());
    }

    #[test]
    fn map_setter_stores_stringified_state() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "maps", false).unwrap();
        s.set_map_position(
            &id,
            MapPosition {
                latitude: 51.5,
                longitude: -0.12,
                resolution: 2000,
                zoom: 7,
            },
            Some("london"),
        )
        .unwrap();
        match &s.section(&id).unwrap().content {
            AppContent::Map { state: Some(state) } => {
                assert_eq!(state.center, ["51.5".to_string(), "-0.12".to_string()]);
                assert_eq!(state.resolution, "2000");
                assert_eq!(state.zoom, "7");
            }
            other => panic!("expected map state, got {:?}", other),
        }
    }

    #[test]
    fn setter_rejects_kind_mismatch() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "maps", false).unwrap();
        let err = s.set_html_url(&id, "http://example.org").unwrap_err();
        match err {
            WallError::KindMismatch { expected, actual, .. } => {
                assert_eq!(expected, AppKind::Html);
                assert_eq!(actual, AppKind::Maps);
            }
            other => panic!("expected KindMismatch, got {:?}", other),
        }
    }

    #[test]
    fn video_setter_rewrites_youtube_urls() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "videos", false).unwrap();
        s.set_video_url(&id, "https://www.youtube.com/watch?v=XYZ").unwrap();
        match &s.section(&id).unwrap().content {
            AppContent::Video { url: Some(url) } => {
                assert_eq!(url, "http://www.youtube.com/embed/XYZ");
            }
            other => panic!("expected video url, got {:?}", other),
        }
        s.set_video_url(&id, "https://example.org/clip.mp4").unwrap();
        match &s.section(&id).unwrap().content {
            AppContent::Video { url: Some(url) } => assert_eq!(url, "https://example.org/clip.mp4"),
            other => panic!("expected video url, got {:?}", other),
        }
    }

    #[test]
    fn network_requires_a_source() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "networks", false).unwrap();
        let err = s
            .set_network_data(&id, NetworkData::default(), None)
            .unwrap_err();
        assert!(matches!(err, WallError::MissingGraphSource));
    }

    #[test]
    fn network_json_wins_over_gexf_with_notice() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "networks", false).unwrap();
        let notice = s
            .set_network_data(
                &id,
                NetworkData {
                    json_url: Some("http://example.org/g.json".into()),
                    gexf_url: Some("http://example.org/g.gexf".into()),
                    ..NetworkData::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(notice, Some(SetDataNotice::GexfIgnored));
        match &s.section(&id).unwrap().content {
            AppContent::Network { state: Some(state) } => {
                assert_eq!(state.json_url.as_deref(), Some("http://example.org/g.json"));
                assert!(state.gexf_url.is_none());
            }
            other => panic!("expected network state, got {:?}", other),
        }
    }

    #[test]
    fn network_gexf_alone_is_kept_without_notice() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "networks", false).unwrap();
        let notice = s
            .set_network_data(
                &id,
                NetworkData {
                    gexf_url: Some("http://example.org/g.gexf".into()),
                    ..NetworkData::default()
                },
                None,
            )
            .unwrap();
        assert!(notice.is_none());
        match &s.section(&id).unwrap().content {
            AppContent::Network { state: Some(state) } => {
                assert!(state.json_url.is_none());
                assert_eq!(state.gexf_url.as_deref(), Some("http://example.org/g.gexf"));
            }
            other => panic!("expected network state, got {:?}", other),
        }
    }

    #[test]
    fn chart_spec_url_takes_precedence() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "charts", false).unwrap();
        s.set_chart_spec(
            &id,
            ChartSpec {
                spec_url: Some("http://example.org/spec.json".into()),
                spec: Some(json!({"mark": "bar"})),
                options: None,
            },
            None,
        )
        .unwrap();
        match &s.section(&id).unwrap().content {
            AppContent::Chart { state: Some(state) } => {
                assert_eq!(state.spec_url.as_deref(), Some("http://example.org/spec.json"));
                assert!(state.spec.is_none());
                assert_eq!(state.options, json!({}));
            }
            other => panic!("expected chart state, got {:?}", other),
        }
    }

    #[test]
    fn chart_options_only_is_valid() {
        let mut s = space();
        let id = s.add_section(Frame::new(400, 300, 0, 0), "charts", false).unwrap();
        s.set_chart_spec(
            &id,
            ChartSpec {
                options: Some(json!({"theme": "dark"})),
                ..ChartSpec::default()
            },
            None,
        )
        .unwrap();
        match &s.section(&id).unwrap().content {
            AppContent::Chart { state: Some(state) } => {
                assert!(state.spec_url.is_none());
                assert!(state.spec.is_none());
                assert_eq!(state.options, json!({"theme": "dark"}));
            }
            other => panic!("expected chart state, got {:?}", other),
        }
    }

    #[test]
    fn to_json_carries_title_and_insertion_order() {
        let mut s = space();
        s.add_section(Frame::new(100, 100, 0, 0), "maps", false).unwrap();
        s.add_section(Frame::new(100, 100, 200, 0), "html", false).unwrap();
        let raw = s.to_json("Morning Wall").unwrap();
        let v: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["Attribution"]["Title"], json!("Morning Wall"));
        let sections = v["Sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["app"]["url"], json!("OVE_APP_MAPS"));
        assert_eq!(sections[1]["app"]["url"], json!("OVE_APP_HTML"));
    }

    #[test]
    fn load_json_rejects_malformed_input() {
        let mut s = space();
        assert!(matches!(s.load_json("not json"), Err(WallError::Parse(_))));
    }

    #[test]
    fn load_json_skips_unknown_markers() {
        let mut s = space();
        let raw = r#"{
            "Attribution": {"Title": "T"},
            "Sections": [
                {"space": "OVE_SPACE", "h": 100, "w": 100, "x": 0, "y": 0,
                 "app": {"url": "OVE_APP_AUDIO", "states": {"load": {}}}},
                {"space": "OVE_SPACE", "h": 100, "w": 100, "x": 0, "y": 0,
                 "app": {"url": "OVE_APP_HTML", "states": {"load": {"url": "u"}}}}
            ]
        }"#;
        s.load_json(raw).unwrap();
        assert_eq!(s.sections().len(), 1);
        assert_eq!(s.sections()[0].kind(), AppKind::Html);
    }

    #[test]
    fn load_json_skips_out_of_bounds_entries() {
        let mut s = space();
        let raw = r#"{
            "Attribution": {"Title": "T"},
            "Sections": [
                {"space": "OVE_SPACE", "h": 100, "w": 99999, "x": 0, "y": 0,
                 "app": {"url": "OVE_APP_HTML", "states": {"load": {"url": "u"}}}}
            ]
        }"#;
        s.load_json(raw).unwrap();
        assert!(s.sections().is_empty());
    }

    #[test]
    fn fresh_ids_are_unique_offline() {
        let mut s = space();
        let a = s.add_section(Frame::new(100, 100, 0, 0), "maps", false).unwrap();
        let b = s.add_section(Frame::new(100, 100, 200, 0), "maps", false).unwrap();
        assert_ne!(a, b);
    }
}
