//! cartesian-chart: headless interaction model for cartesian charts.
//!
//! The crate computes scales, ticks and stacked plot points for area, bar and
//! mixed line/bar charts, and drives highlight, popover and focus behavior for
//! pointer and keyboard input. Rendering is left to the host: it draws from
//! `ChartModel::computed`, the interaction store and the highlight details.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartModel, ChartModelConfig, ChartModelMemo};
pub use error::{ChartError, ChartResult};
