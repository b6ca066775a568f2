#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn make_node(id: &str, widget_type: WidgetType) -> Node {
    Node {
        id: id.to_string(),
        position: Position::new(10.0, 20.0),
        data: NodeData {
            title: widget_type.as_str().to_string(),
            widget_type,
            theme: CardTheme::Glass,
            content: json!([]),
            extra: Map::new(),
        },
        width: Some(300.0),
        height: Some(280.0),
        selected: false,
    }
}

// =============================================================
// WidgetType
// =============================================================

#[test]
fn widget_type_serializes_camel_case() {
    assert_eq!(serde_json::to_string(&WidgetType::YearCounter).unwrap(), "\"yearCounter\"");
    assert_eq!(serde_json::to_string(&WidgetType::FoodPicker).unwrap(), "\"foodPicker\"");
    assert_eq!(serde_json::to_string(&WidgetType::QrCode).unwrap(), "\"qrCode\"");
    assert_eq!(serde_json::to_string(&WidgetType::Todo).unwrap(), "\"todo\"");
}

#[test]
fn widget_type_as_str_matches_serde_for_all() {
    for t in WidgetType::ALL {
        let wire = serde_json::to_string(&t).unwrap();
        assert_eq!(wire, format!("\"{}\"", t.as_str()));
    }
}

#[test]
fn widget_type_from_str_accepts_every_tag() {
    for t in WidgetType::ALL {
        assert_eq!(t.as_str().parse::<WidgetType>().unwrap(), t);
    }
}

#[test]
fn widget_type_from_str_rejects_unknown() {
    let err = "calendar".parse::<WidgetType>().unwrap_err();
    assert_eq!(err, UnknownWidgetType("calendar".into()));
    assert!(err.to_string().contains("calendar"));
}

#[test]
fn widget_type_deserialize_keeps_unknown_tag() {
    let t: WidgetType = serde_json::from_str("\"weather\"").unwrap();
    assert_eq!(t, WidgetType::Other("weather".into()));
    assert!(!t.is_known());
    assert_eq!(t.to_string(), "weather");
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"weather\"");
}

#[test]
fn widget_type_deserialize_known_tag_is_not_other() {
    let t: WidgetType = serde_json::from_str("\"worldClock\"").unwrap();
    assert_eq!(t, WidgetType::WorldClock);
    assert!(t.is_known());
}

#[test]
fn widget_type_deserialize_rejects_non_string() {
    assert!(serde_json::from_str::<WidgetType>("7").is_err());
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_defaults_to_light_and_toggles() {
    assert_eq!(Theme::default(), Theme::Light);
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}

#[test]
fn theme_wire_format_is_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    assert_eq!(Theme::Dark.to_string(), "dark");
}

// =============================================================
// CardTheme
// =============================================================

#[test]
fn card_theme_known_names_round_trip() {
    for (name, theme) in [("glass", CardTheme::Glass), ("solid", CardTheme::Solid), ("accent", CardTheme::Accent)] {
        let wire = format!("\"{name}\"");
        assert_eq!(serde_json::from_str::<CardTheme>(&wire).unwrap(), theme);
        assert_eq!(serde_json::to_string(&theme).unwrap(), wire);
    }
}

#[test]
fn card_theme_unknown_name_is_kept() {
    let theme: CardTheme = serde_json::from_str("\"neon\"").unwrap();
    assert_eq!(theme, CardTheme::Custom("neon".into()));
    assert_eq!(serde_json::to_string(&theme).unwrap(), "\"neon\"");
}

#[test]
fn card_theme_non_string_reads_as_default() {
    assert_eq!(serde_json::from_value::<CardTheme>(json!({"hue": 3})).unwrap(), CardTheme::Glass);
}

#[test]
fn node_with_unknown_card_theme_still_loads() {
    let raw = json!({
        "id": "note-2",
        "position": {"x": 0, "y": 0},
        "data": {"widgetType": "note", "theme": "neon", "content": "hi"}
    });
    let node: Node = serde_json::from_value(raw).unwrap();
    assert_eq!(node.data.theme, CardTheme::Custom("neon".into()));
    assert_eq!(node.data.content, json!("hi"));
}

// =============================================================
// NodeDataPatch
// =============================================================

#[test]
fn patch_content_replaces_only_content() {
    let mut node = make_node("todo-1", WidgetType::Todo);
    node.data.extra.insert("pinned".into(), json!(true));
    let before = node.clone();

    NodeDataPatch::content(json!([{"id": "a", "text": "milk", "completed": false}])).apply_to(&mut node.data);

    assert_eq!(node.data.content[0]["text"], "milk");
    assert_eq!(node.data.widget_type, before.data.widget_type);
    assert_eq!(node.data.title, before.data.title);
    assert_eq!(node.data.theme, before.data.theme);
    assert_eq!(node.data.extra, before.data.extra);
}

#[test]
fn patch_extra_keys_merge_without_dropping_existing() {
    let mut node = make_node("note-1", WidgetType::Note);
    node.data.extra.insert("a".into(), json!(1));
    let mut patch = NodeDataPatch::default();
    patch.extra.insert("b".into(), json!(2));
    patch.title = Some("Groceries".into());

    patch.apply_to(&mut node.data);

    assert_eq!(node.data.extra.get("a"), Some(&json!(1)));
    assert_eq!(node.data.extra.get("b"), Some(&json!(2)));
    assert_eq!(node.data.title, "Groceries");
}

#[test]
fn patch_deserialize_null_content_is_present() {
    let patch: NodeDataPatch = serde_json::from_value(json!({"content": null})).unwrap();
    assert_eq!(patch.content, Some(Value::Null));
}

#[test]
fn patch_deserialize_unknown_theme_and_widget_type() {
    let patch: NodeDataPatch = serde_json::from_value(json!({"theme": "neon", "widgetType": "weather"})).unwrap();
    assert_eq!(patch.theme, Some(CardTheme::Custom("neon".into())));
    assert_eq!(patch.widget_type, Some(WidgetType::Other("weather".into())));
}

#[test]
fn patch_deserialize_missing_content_is_absent() {
    let patch: NodeDataPatch = serde_json::from_value(json!({"title": "x"})).unwrap();
    assert_eq!(patch.content, None);
    assert_eq!(patch.title.as_deref(), Some("x"));
    assert!(patch.extra.is_empty());
}

#[test]
fn empty_patch_is_a_no_op() {
    let mut node = make_node("water-1", WidgetType::Water);
    let before = node.clone();
    NodeDataPatch::default().apply_to(&mut node.data);
    assert_eq!(node, before);
}

// =============================================================
// Node serde
// =============================================================

#[test]
fn node_serialization_omits_selected() {
    let mut node = make_node("todo-1", WidgetType::Todo);
    node.selected = true;
    let value = serde_json::to_value(&node).unwrap();
    assert!(value.get("selected").is_none());
    assert_eq!(value["data"]["widgetType"], "todo");
    assert_eq!(value["position"], json!({"x": 10.0, "y": 20.0}));
}

#[test]
fn node_deserialize_ignores_canvas_fields() {
    let raw = json!({
        "id": "note-42",
        "type": "customBentoNode",
        "position": {"x": 1.5, "y": -2.0},
        "measured": {"width": 300, "height": 280},
        "selected": true,
        "data": {"widgetType": "note", "title": "note", "theme": "glass", "content": "hi"},
        "width": 300,
        "height": 280
    });
    let node: Node = serde_json::from_value(raw).unwrap();
    assert_eq!(node.id, "note-42");
    assert_eq!(node.position, Position::new(1.5, -2.0));
    assert_eq!(node.content(), &json!("hi"));
    assert!(!node.selected);
    assert!(node.data.extra.is_empty());
}

#[test]
fn node_deserialize_defaults_missing_data_fields() {
    let raw = json!({
        "id": "timer-1",
        "position": {"x": 0, "y": 0},
        "data": {"widgetType": "timer"}
    });
    let node: Node = serde_json::from_value(raw).unwrap();
    assert_eq!(node.data.title, "");
    assert_eq!(node.data.theme, CardTheme::Glass);
    assert_eq!(node.data.content, Value::Null);
    assert_eq!(node.width, None);
}

// =============================================================
// effective_size
// =============================================================

#[test]
fn effective_size_uses_own_dimensions() {
    let mut node = make_node("foodPicker-1", WidgetType::FoodPicker);
    node.width = Some(520.0);
    node.height = Some(200.0);
    assert_eq!(node.effective_size(), Dimensions::new(520.0, 200.0));
}

#[test]
fn effective_size_falls_back_for_missing_or_zero() {
    let mut node = make_node("todo-1", WidgetType::Todo);
    node.width = None;
    node.height = Some(0.0);
    assert_eq!(node.effective_size(), Dimensions::new(300.0, 280.0));
}
