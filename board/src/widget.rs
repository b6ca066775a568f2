//! Widget default factory: initial content and size per widget type.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use serde_json::{Value, json};
use time::Date;
use time::macros::format_description;

use crate::node::{Dimensions, WidgetType};

/// Label given to a freshly created anniversary card.
pub const DEFAULT_ANNIVERSARY_LABEL: &str = "Special Day";

/// Initial pomodoro work interval in seconds.
pub const POMODORO_WORK_SECONDS: u64 = 1500;

/// Initial countdown duration in seconds.
pub const DEFAULT_COUNTDOWN_SECONDS: u64 = 300;

/// What a new node of a given widget type starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDefaults {
    pub content: Value,
    pub size: Dimensions,
}

impl WidgetDefaults {
    /// Defaults for `widget_type`; `today` seeds date-based widgets.
    #[must_use]
    pub fn for_type(widget_type: &WidgetType, today: Date) -> Self {
        Self { content: default_content(widget_type, today), size: default_size(widget_type) }
    }
}

/// Initial card size. Types without an override, unknown tags included, get
/// the 300×280 baseline.
#[must_use]
pub fn default_size(widget_type: &WidgetType) -> Dimensions {
    match widget_type {
        WidgetType::Countdown => Dimensions::new(320.0, 320.0),
        WidgetType::FoodPicker => Dimensions::new(520.0, 200.0),
        WidgetType::WorldClock => Dimensions::new(320.0, 340.0),
        _ => Dimensions::default(),
    }
}

/// Initial content payload.
///
/// Stateless widgets (timer, picker, year counter) and unknown tags fall
/// through to an empty object.
#[must_use]
pub fn default_content(widget_type: &WidgetType, today: Date) -> Value {
    match widget_type {
        WidgetType::Todo | WidgetType::Mood | WidgetType::Bookmark => json!([]),
        WidgetType::Water | WidgetType::Companion => json!(0),
        WidgetType::Note => json!(""),
        WidgetType::Countdown => json!(DEFAULT_COUNTDOWN_SECONDS),
        WidgetType::Breath => json!(false),
        WidgetType::Anniversary => json!({
            "date": iso_date(today),
            "label": DEFAULT_ANNIVERSARY_LABEL,
        }),
        WidgetType::Pomodoro => json!({
            "seconds": POMODORO_WORK_SECONDS,
            "mode": "work",
            "sessions": 0,
        }),
        WidgetType::FoodPicker => Value::Null,
        WidgetType::FocusMusic => json!({ "trackIndex": 0, "volume": 0.5 }),
        WidgetType::QrCode => json!("https://"),
        WidgetType::WorldClock => json!([
            { "id": "beijing", "name": "Beijing", "nameZh": "北京", "timezone": "Asia/Shanghai" },
            { "id": "newyork", "name": "New York", "nameZh": "纽约", "timezone": "America/New_York" },
            { "id": "london", "name": "London", "nameZh": "伦敦", "timezone": "Europe/London" },
        ]),
        WidgetType::Timer | WidgetType::Picker | WidgetType::YearCounter | WidgetType::Other(_) => json!({}),
    }
}

/// `YYYY-MM-DD` for the given date.
fn iso_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    date.format(format)
        .unwrap_or_else(|_| format!("{}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day()))
}
