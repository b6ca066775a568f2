//! Node model: positioned widget cards, their data bag, and sparse patches.
//!
//! A [`Node`] is one card on the board. Its geometry (`position`, `width`,
//! `height`) is driven by the canvas, while its [`NodeData`] bag carries the
//! widget tag and an opaque `content` payload that only the widget itself
//! understands. The store never looks inside `content`; see
//! [`crate::content`] for the typed view used at the render boundary.
//!
//! Data flows into this layer from persisted snapshots (JSON) and from the
//! store's mutation operations.

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::consts::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};

/// Unique identifier for a node, formatted `<widgetType>-<millis>`.
pub type NodeId = String;

/// The widget kinds a node can host.
///
/// Tags this build does not know load as [`WidgetType::Other`] and are
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    Todo,
    Timer,
    Water,
    Note,
    Picker,
    Countdown,
    YearCounter,
    Companion,
    Breath,
    Mood,
    Anniversary,
    Pomodoro,
    Bookmark,
    FoodPicker,
    FocusMusic,
    QrCode,
    WorldClock,
    /// A tag outside the known set, kept verbatim.
    Other(String),
}

impl WidgetType {
    /// Every widget type, in picker order.
    pub const ALL: [WidgetType; 17] = [
        Self::Todo,
        Self::Timer,
        Self::Water,
        Self::Note,
        Self::Picker,
        Self::Countdown,
        Self::YearCounter,
        Self::Companion,
        Self::Breath,
        Self::Mood,
        Self::Anniversary,
        Self::Pomodoro,
        Self::Bookmark,
        Self::FoodPicker,
        Self::FocusMusic,
        Self::QrCode,
        Self::WorldClock,
    ];

    /// The wire tag, e.g. `"yearCounter"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::Timer => "timer",
            Self::Water => "water",
            Self::Note => "note",
            Self::Picker => "picker",
            Self::Countdown => "countdown",
            Self::YearCounter => "yearCounter",
            Self::Companion => "companion",
            Self::Breath => "breath",
            Self::Mood => "mood",
            Self::Anniversary => "anniversary",
            Self::Pomodoro => "pomodoro",
            Self::Bookmark => "bookmark",
            Self::FoodPicker => "foodPicker",
            Self::FocusMusic => "focusMusic",
            Self::QrCode => "qrCode",
            Self::WorldClock => "worldClock",
            Self::Other(tag) => tag.as_str(),
        }
    }

    /// Whether this is one of the built-in widget kinds.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for WidgetType {
    fn from(tag: String) -> Self {
        tag.parse().unwrap_or(Self::Other(tag))
    }
}

impl From<WidgetType> for String {
    fn from(widget_type: WidgetType) -> Self {
        match widget_type {
            WidgetType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string does not name a known widget type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget type: {0}")]
pub struct UnknownWidgetType(pub String);

impl FromStr for WidgetType {
    type Err = UnknownWidgetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .ok_or_else(|| UnknownWidgetType(s.to_string()))
    }
}

/// Board-wide colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Per-card visual style stored in the data bag.
///
/// Unrecognised style names are kept as [`CardTheme::Custom`]; a value that
/// is not a string at all reads as the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum CardTheme {
    #[default]
    Glass,
    Solid,
    Accent,
    Custom(String),
}

impl CardTheme {
    /// The wire name, e.g. `"glass"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Glass => "glass",
            Self::Solid => "solid",
            Self::Accent => "accent",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl From<String> for CardTheme {
    fn from(name: String) -> Self {
        match name.as_str() {
            "glass" => Self::Glass,
            "solid" => Self::Solid,
            "accent" => Self::Accent,
            _ => Self::Custom(name),
        }
    }
}

impl From<CardTheme> for String {
    fn from(theme: CardTheme) -> Self {
        match theme {
            CardTheme::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for CardTheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(name) => Ok(Self::from(name)),
            _ => Ok(Self::default()),
        }
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a card in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { width: DEFAULT_NODE_WIDTH, height: DEFAULT_NODE_HEIGHT }
    }
}

/// The per-node data bag. `content` is opaque to the board core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Which widget renders this node.
    pub widget_type: WidgetType,
    /// Card heading; initialised to the widget tag.
    #[serde(default)]
    pub title: String,
    /// Card style.
    #[serde(default)]
    pub theme: CardTheme,
    /// Widget-defined payload. `null` is a legitimate value.
    #[serde(default)]
    pub content: Value,
    /// Any further keys merged in by callers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sparse update for a node's data bag. Only present fields are applied.
///
/// `content: Some(Value::Null)` sets the content to `null`; `None` leaves it
/// untouched. Keys in `extra` are inserted or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<WidgetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<CardTheme>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeDataPatch {
    /// A patch that replaces only `content`.
    #[must_use]
    pub fn content(value: Value) -> Self {
        Self { content: Some(value), ..Default::default() }
    }

    /// Shallow-merge this patch into `data`.
    pub fn apply_to(&self, data: &mut NodeData) {
        if let Some(ref widget_type) = self.widget_type {
            data.widget_type.clone_from(widget_type);
        }
        if let Some(ref title) = self.title {
            data.title.clone_from(title);
        }
        if let Some(ref theme) = self.theme {
            data.theme.clone_from(theme);
        }
        if let Some(ref content) = self.content {
            data.content = content.clone();
        }
        for (k, v) in &self.extra {
            data.extra.insert(k.clone(), v.clone());
        }
    }
}

/// Treat an explicitly present field as `Some`, even when it is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A positioned widget card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, immutable identifier.
    pub id: NodeId,
    /// Top-left corner in canvas coordinates.
    pub position: Position,
    /// Widget tag, content and style.
    pub data: NodeData,
    /// Card width; `None` means the baseline width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Card height; `None` means the baseline height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Selection state owned by the canvas. Never persisted.
    #[serde(skip)]
    pub selected: bool,
}

impl Node {
    /// The widget kind hosted by this node.
    #[must_use]
    pub fn widget_type(&self) -> &WidgetType {
        &self.data.widget_type
    }

    /// The node's opaque content payload.
    #[must_use]
    pub fn content(&self) -> &Value {
        &self.data.content
    }

    /// Width and height, substituting the baseline for unset (or zero) sides.
    #[must_use]
    pub fn effective_size(&self) -> Dimensions {
        let fallback = Dimensions::default();
        Dimensions {
            width: self.width.filter(|w| *w > 0.0).unwrap_or(fallback.width),
            height: self.height.filter(|h| *h > 0.0).unwrap_or(fallback.height),
        }
    }
}
