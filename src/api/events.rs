use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pointer position in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub timestamp: Duration,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, timestamp: Duration) -> Self {
        Self { x, y, timestamp }
    }
}

/// Where the pointer went when it left the plot surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerLeaveEvent {
    pub target_inside_plot: bool,
    pub target_inside_popover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Keys the plot consumes while it has focus.
    #[must_use]
    pub fn is_plot_key(self) -> bool {
        matches!(
            self,
            Self::ArrowUp
                | Self::ArrowDown
                | Self::ArrowLeft
                | Self::ArrowRight
                | Self::Enter
                | Self::Space
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTrigger {
    Keyboard,
    Pointer,
}

/// Whether the host should suppress the platform's default handling.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultAction {
    Prevent,
    Allow,
}
