mod chart_model;
mod chart_model_config;
mod chart_model_memo;
mod controllable;
mod events;
mod focus_controller;
mod formatters;
mod highlight_details;
mod keyboard_controller;
mod legend_controller;
mod pointer_controller;
mod popover_controller;
mod validation;

pub use chart_model::{ChartComputed, ChartModel, ChartRefs};
pub use chart_model_config::{
    ChartModelConfig, DEFAULT_HIT_MARGIN_PX, DEFAULT_POINTER_THROTTLE_MS,
    DEFAULT_POPOVER_DEAD_ZONE_PX,
};
pub use chart_model_memo::ChartModelMemo;
pub use controllable::ControllableState;
pub use events::{DefaultAction, FocusTrigger, Key, PointerEvent, PointerLeaveEvent};
pub use formatters::{ChartFormatters, XFormatter};
pub use highlight_details::{
    HighlightDetailItem, HighlightDetails, LegendItem, compute_highlight_details,
};
