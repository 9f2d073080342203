use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ChartValue, ScaleType, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_POINTER_THROTTLE_MS: u64 = 25;
pub const DEFAULT_HIT_MARGIN_PX: f64 = 6.0;
pub const DEFAULT_POPOVER_DEAD_ZONE_PX: f64 = 6.0;

/// Chart model bootstrap configuration.
///
/// Serializable so hosts can persist chart setup; formatters and callbacks are
/// supplied separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModelConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub x_scale_type: ScaleType,
    #[serde(default)]
    pub y_scale_type: ScaleType,
    #[serde(default)]
    pub x_domain: Option<Vec<ChartValue>>,
    #[serde(default)]
    pub y_domain: Option<(f64, f64)>,
    #[serde(default = "default_stacked")]
    pub stacked: bool,
    #[serde(default = "default_pointer_throttle_ms")]
    pub pointer_throttle_ms: u64,
    #[serde(default = "default_hit_margin_px")]
    pub hit_margin_px: f64,
    #[serde(default = "default_popover_dead_zone_px")]
    pub popover_dead_zone_px: f64,
    #[serde(default)]
    pub x_title: Option<String>,
    #[serde(default)]
    pub y_title: Option<String>,
}

impl ChartModelConfig {
    /// Creates a config for a stacked linear chart of the given size.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            x_scale_type: ScaleType::default(),
            y_scale_type: ScaleType::default(),
            x_domain: None,
            y_domain: None,
            stacked: default_stacked(),
            pointer_throttle_ms: default_pointer_throttle_ms(),
            hit_margin_px: default_hit_margin_px(),
            popover_dead_zone_px: default_popover_dead_zone_px(),
            x_title: None,
            y_title: None,
        }
    }

    #[must_use]
    pub fn with_x_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.x_scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn with_y_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.y_scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn with_x_domain(mut self, domain: Vec<ChartValue>) -> Self {
        self.x_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    #[must_use]
    pub fn with_pointer_throttle(mut self, interval: Duration) -> Self {
        self.pointer_throttle_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_hit_margin_px(mut self, margin: f64) -> Self {
        self.hit_margin_px = margin;
        self
    }

    #[must_use]
    pub fn with_popover_dead_zone_px(mut self, margin: f64) -> Self {
        self.popover_dead_zone_px = margin;
        self
    }

    #[must_use]
    pub fn with_axis_titles(
        mut self,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        self.x_title = Some(x_title.into());
        self.y_title = Some(y_title.into());
        self
    }

    #[must_use]
    pub fn pointer_throttle(&self) -> Duration {
        Duration::from_millis(self.pointer_throttle_ms)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse chart config: {e}")))
    }
}

fn default_stacked() -> bool {
    true
}

fn default_pointer_throttle_ms() -> u64 {
    DEFAULT_POINTER_THROTTLE_MS
}

fn default_hit_margin_px() -> f64 {
    DEFAULT_HIT_MARGIN_PX
}

fn default_popover_dead_zone_px() -> f64 {
    DEFAULT_POPOVER_DEAD_ZONE_PX
}
