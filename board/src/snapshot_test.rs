use serde_json::{Map, json};

use super::*;
use crate::node::{CardTheme, NodeData, Position, WidgetType};

fn make_node(id: &str) -> Arc<Node> {
    Arc::new(Node {
        id: id.to_string(),
        position: Position::new(5.0, 6.0),
        data: NodeData {
            widget_type: WidgetType::Note,
            title: "note".into(),
            theme: CardTheme::Accent,
            content: json!("hello"),
            extra: Map::new(),
        },
        width: Some(300.0),
        height: Some(280.0),
        selected: true,
    })
}

fn node_json(id: &str) -> Value {
    json!({"id": id, "position": {"x": 0, "y": 0}, "data": {"widgetType": "water", "content": 1}})
}

// =============================================================
// encode
// =============================================================

#[test]
fn encode_writes_nodes_and_theme_only() {
    let raw = encode(&[make_node("note-1")], Theme::Dark).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(value["theme"], "dark");
    assert!(value["nodes"][0].get("selected").is_none());
}

#[test]
fn encoded_blob_decodes_to_same_board() {
    let raw = encode(&[make_node("a"), make_node("b")], Theme::Dark).unwrap();
    let decoded = decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 0);
    assert_eq!(decoded.snapshot.theme, Theme::Dark);
    let ids: Vec<&str> = decoded.snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(decoded.snapshot.nodes[0].data.theme, CardTheme::Accent);
    assert!(!decoded.snapshot.nodes[0].selected);
}

// =============================================================
// decode repair
// =============================================================

#[test]
fn decode_unwraps_browser_envelope() {
    let raw = json!({"state": {"nodes": [node_json("water-1")], "theme": "dark"}, "version": 0}).to_string();
    let decoded = decode(&raw).unwrap();
    assert_eq!(decoded.snapshot.nodes.len(), 1);
    assert_eq!(decoded.snapshot.theme, Theme::Dark);
}

#[test]
fn decode_drops_malformed_entries() {
    let raw = json!({"nodes": [node_json("ok"), {"id": 7}, "junk", node_json("ok2")], "theme": "light"}).to_string();
    let decoded = decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 2);
    let ids: Vec<&str> = decoded.snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["ok", "ok2"]);
}

#[test]
fn decode_drops_duplicate_ids_keeping_first() {
    let mut second = node_json("dup");
    second["position"] = json!({"x": 99, "y": 99});
    let raw = json!({"nodes": [node_json("dup"), second]}).to_string();
    let decoded = decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 1);
    assert_eq!(decoded.snapshot.nodes[0].position, Position::new(0.0, 0.0));
}

#[test]
fn decode_unknown_theme_reads_light() {
    let raw = json!({"nodes": [], "theme": "sepia"}).to_string();
    assert_eq!(decode(&raw).unwrap().snapshot.theme, Theme::Light);
}

#[test]
fn decode_missing_fields_is_empty_light_board() {
    let decoded = decode("{}").unwrap();
    assert_eq!(decoded.snapshot, BoardSnapshot::default());
}

// =============================================================
// decode errors
// =============================================================

#[test]
fn decode_rejects_non_json() {
    assert!(matches!(decode("{nodes:"), Err(SnapshotError::Json(_))));
}

#[test]
fn decode_rejects_non_object() {
    assert!(matches!(decode("[1, 2]"), Err(SnapshotError::Shape(_))));
}

#[test]
fn decode_rejects_nodes_not_array() {
    let raw = json!({"nodes": {"a": 1}}).to_string();
    assert!(matches!(decode(&raw), Err(SnapshotError::Shape(_))));
}

#[test]
fn decode_keeps_unknown_card_theme_and_widget_tag() {
    let raw = json!({"nodes": [
        {"id": "note-2", "position": {"x": 0, "y": 0}, "data": {"widgetType": "note", "theme": "neon", "content": "hi"}},
        {"id": "weather-1", "position": {"x": 0, "y": 0}, "data": {"widgetType": "weather", "content": {"city": "Paris"}}}
    ]})
    .to_string();
    let decoded = decode(&raw).unwrap();
    assert_eq!(decoded.dropped, 0);
    assert_eq!(decoded.snapshot.nodes[0].data.theme, CardTheme::Custom("neon".into()));
    assert_eq!(decoded.snapshot.nodes[1].data.widget_type, WidgetType::Other("weather".into()));
}
