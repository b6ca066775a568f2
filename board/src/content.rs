//! Typed view over node content, used at the render boundary.
//!
//! The store treats `content` as opaque JSON. Anything that renders or edits
//! a widget goes through [`WidgetContent::parse`] first so a payload that does
//! not match its widget type is caught before it reaches a widget, not inside
//! the store.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::node::WidgetType;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content does not match {widget_type}: {source}")]
    Mismatch {
        widget_type: WidgetType,
        #[source]
        source: serde_json::Error,
    },
    #[error("content encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One entry of a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// A new, open item with a fresh id.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().simple().to_string(), text: text.into(), completed: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkItem {
    pub id: String,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldCity {
    pub id: String,
    pub name: String,
    pub name_zh: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anniversary {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroMode {
    Work,
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub seconds: u64,
    pub mode: PomodoroMode,
    pub sessions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusMusicState {
    #[serde(default)]
    pub track_index: usize,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_volume() -> f64 {
    0.5
}

/// Content payload, checked against its widget type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetContent {
    Todo(Vec<TodoItem>),
    Bookmark(Vec<BookmarkItem>),
    WorldClock(Vec<WorldCity>),
    /// Logged mood emoji, oldest first.
    Mood(Vec<String>),
    /// Glasses of water logged today.
    Water(u32),
    /// Index into the companion roster.
    Companion(u32),
    /// Remaining seconds.
    Countdown(u64),
    Note(String),
    QrCode(String),
    /// Whether the breathing exercise is running.
    Breath(bool),
    Anniversary(Anniversary),
    Pomodoro(PomodoroState),
    FocusMusic(FocusMusicState),
    /// The food picker keeps no state of its own; anything is accepted.
    FoodPicker(Value),
    /// Timer, picker and year counter carry an empty object.
    Stateless(Map<String, Value>),
    /// A widget this build does not know; the payload is passed through.
    Unrecognized(Value),
}

impl WidgetContent {
    /// Validate `value` as the content of a `widget_type` node.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Mismatch`] when the payload has the wrong shape.
    pub fn parse(widget_type: &WidgetType, value: &Value) -> Result<Self, ContentError> {
        let content = match widget_type {
            WidgetType::Todo => Self::Todo(decode(widget_type, value)?),
            WidgetType::Bookmark => Self::Bookmark(decode(widget_type, value)?),
            WidgetType::WorldClock => Self::WorldClock(decode(widget_type, value)?),
            WidgetType::Mood => Self::Mood(decode(widget_type, value)?),
            WidgetType::Water => Self::Water(decode(widget_type, value)?),
            WidgetType::Companion => Self::Companion(decode(widget_type, value)?),
            WidgetType::Countdown => Self::Countdown(decode(widget_type, value)?),
            WidgetType::Note => Self::Note(decode(widget_type, value)?),
            WidgetType::QrCode => Self::QrCode(decode(widget_type, value)?),
            WidgetType::Breath => Self::Breath(decode(widget_type, value)?),
            WidgetType::Anniversary => Self::Anniversary(decode(widget_type, value)?),
            WidgetType::Pomodoro => Self::Pomodoro(decode(widget_type, value)?),
            WidgetType::FocusMusic => Self::FocusMusic(decode(widget_type, value)?),
            WidgetType::FoodPicker => Self::FoodPicker(value.clone()),
            WidgetType::Timer | WidgetType::Picker | WidgetType::YearCounter => {
                Self::Stateless(decode(widget_type, value)?)
            }
            WidgetType::Other(_) => Self::Unrecognized(value.clone()),
        };
        Ok(content)
    }

    /// Encode back into the opaque JSON form stored on the node.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Encode`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, ContentError> {
        Ok(serde_json::to_value(self)?)
    }
}

fn decode<T: DeserializeOwned>(widget_type: &WidgetType, value: &Value) -> Result<T, ContentError> {
    T::deserialize(value).map_err(|source| ContentError::Mismatch { widget_type: widget_type.clone(), source })
}

/// One-line human summary, e.g. `"3 items, 1 done"`.
impl fmt::Display for WidgetContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo(items) => {
                let done = items.iter().filter(|i| i.completed).count();
                write!(f, "{} items, {done} done", items.len())
            }
            Self::Bookmark(items) => write!(f, "{} bookmarks", items.len()),
            Self::WorldClock(cities) => {
                let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
                write!(f, "{}", names.join(", "))
            }
            Self::Mood(history) => write!(f, "{} moods logged", history.len()),
            Self::Water(level) => write!(f, "{level} glasses"),
            Self::Companion(index) => write!(f, "companion #{index}"),
            Self::Countdown(seconds) => write!(f, "{}:{:02} remaining", seconds / 60, seconds % 60),
            Self::Note(text) => write!(f, "{} chars", text.chars().count()),
            Self::QrCode(text) => write!(f, "{text}"),
            Self::Breath(running) => f.write_str(if *running { "running" } else { "idle" }),
            Self::Anniversary(a) => write!(f, "{} on {}", a.label, a.date),
            Self::Pomodoro(p) => write!(f, "{:?} {}s, {} sessions", p.mode, p.seconds, p.sessions),
            Self::FocusMusic(m) => write!(f, "track {} at {:.0}%", m.track_index, m.volume * 100.0),
            Self::FoodPicker(_) | Self::Stateless(_) | Self::Unrecognized(_) => f.write_str("-"),
        }
    }
}
