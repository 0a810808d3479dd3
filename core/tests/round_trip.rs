//! Layout save/load round trip across all six app variants.

use serde_json::json;
use tilewall_core::apps::AppContent;
use tilewall_core::space::{ChartSpec, MapPosition, NetworkData};
use tilewall_core::{Frame, Space, WallConfig};

fn populated_space() -> Space {
    let mut space = Space::new(WallConfig::local("RoundTrip"));
    space.set_grid(2, 3);

    let map = space.add_section(Frame::new(480, 404, 0, 0), "maps", false).unwrap();
    space
        .set_map_position(
            &map,
            MapPosition {
                latitude: 51.5074,
                longitude: -0.1278,
                resolution: 2445,
                zoom: 7,
            },
            Some("london"),
        )
        .unwrap();

    let image = space.add_section(Frame::new(480, 404, 480, 0), "images", false).unwrap();
    space
        .set_image_url(&image, "http://example.org/nebula.png", None)
        .unwrap();

    let html = space.add_section(Frame::new(480, 404, 960, 0), "html", false).unwrap();
    space.set_html_url(&html, "http://example.org/dashboard").unwrap();

    let video = space.add_section(Frame::new(480, 404, 0, 404), "videos", false).unwrap();
    space
        .set_video_url(&video, "https://www.youtube.com/watch?v=XYZ")
        .unwrap();

    let network = space.add_section(Frame::new(480, 404, 480, 404), "networks", false).unwrap();
    space
        .set_network_data(
            &network,
            NetworkData {
                json_url: Some("http://example.org/graph.json".into()),
                default_node_color: "#336699".into(),
                auto_rescale: false,
                ..NetworkData::default()
            },
            None,
        )
        .unwrap();

    let chart = space.add_section(Frame::new(480, 404, 960, 404), "charts", false).unwrap();
    space
        .set_chart_spec(
            &chart,
            ChartSpec {
                spec: Some(json!({"mark": "bar", "data": {"url": "d.csv"}})),
                options: Some(json!({"renderer": "canvas"})),
                ..ChartSpec::default()
            },
            None,
        )
        .unwrap();

    space
}

#[test]
fn six_variant_round_trip_preserves_variant_box_and_state() {
    let original = populated_space();
    let saved = original.to_json("Round Trip Wall").unwrap();

    let mut restored = Space::new(WallConfig::local("RoundTrip"));
    restored.set_grid(2, 3);
    restored.load_json(&saved).unwrap();

    assert_eq!(restored.sections().len(), 6);
    for (a, b) in original.sections().iter().zip(restored.sections()) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.content, b.content, "state mismatch for {}", a.kind());
        // Ids are not part of the serialized form.
        assert_ne!(a.id, b.id);
    }
}

#[test]
fn round_trip_is_stable_over_a_second_cycle() {
    let original = populated_space();
    let first = original.to_json("T").unwrap();

    let mut middle = Space::new(WallConfig::local("RoundTrip"));
    middle.set_grid(2, 3);
    middle.load_json(&first).unwrap();
    let second = middle.to_json("T").unwrap();

    let a: serde_json::Value = serde_json::from_str(&first).unwrap();
    let b: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn video_round_trip_keeps_embed_form() {
    let original = populated_space();
    let saved = original.to_json("T").unwrap();

    let mut restored = Space::new(WallConfig::local("RoundTrip"));
    restored.load_json(&saved).unwrap();

    let video = restored
        .sections()
        .iter()
        .find(|s| matches!(s.content, AppContent::Video { .. }))
        .unwrap();
    match &video.content {
        AppContent::Video { url: Some(url) } => {
            assert_eq!(url, "http://www.youtube.com/embed/XYZ");
        }
        other => panic!("expected video url, got {:?}", other),
    }
}
