use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Plot area size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned rectangle in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A value on the x axis: a number, a timestamp or a category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
    Number(OrderedFloat<f64>),
    Time(DateTime<Utc>),
    Category(String),
}

impl ChartValue {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn category(label: impl Into<String>) -> Self {
        Self::Category(label.into())
    }

    #[must_use]
    pub fn time(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }

    /// Continuous position of the value; timestamps map to epoch milliseconds.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.0),
            Self::Time(value) => Some(value.timestamp_millis() as f64),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

impl From<f64> for ChartValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for ChartValue {
    fn from(value: i32) -> Self {
        Self::number(f64::from(value))
    }
}

impl From<&str> for ChartValue {
    fn from(value: &str) -> Self {
        Self::category(value)
    }
}

impl From<String> for ChartValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl From<DateTime<Utc>> for ChartValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl fmt::Display for ChartValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(value.0)),
            Self::Time(value) => {
                if value.hour() == 0 && value.minute() == 0 && value.second() == 0 {
                    write!(f, "{}", value.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", value.format("%Y-%m-%d %H:%M"))
                }
            }
            Self::Category(label) => f.write_str(label),
        }
    }
}

/// Formats with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// One sample of a data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: ChartValue,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: impl Into<ChartValue>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}
