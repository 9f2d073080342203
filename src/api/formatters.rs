use std::fmt;
use std::rc::Rc;

use crate::core::{ChartValue, ValueFormatter, format_number};

pub type XFormatter = Rc<dyn Fn(&ChartValue) -> String>;

/// Axis formatters supplied by the embedding component.
///
/// The y formatter doubles as the value formatter for series without one.
#[derive(Clone, Default)]
pub struct ChartFormatters {
    pub x: Option<XFormatter>,
    pub y: Option<ValueFormatter>,
}

impl ChartFormatters {
    #[must_use]
    pub fn with_x_formatter(mut self, formatter: impl Fn(&ChartValue) -> String + 'static) -> Self {
        self.x = Some(Rc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_y_formatter(
        mut self,
        formatter: impl Fn(f64, &ChartValue) -> String + 'static,
    ) -> Self {
        self.y = Some(Rc::new(formatter));
        self
    }

    #[must_use]
    pub fn format_x(&self, value: &ChartValue) -> String {
        match &self.x {
            Some(formatter) => formatter(value),
            None => value.to_string(),
        }
    }

    /// Formats a y value that is not tied to one x (ticks, totals).
    #[must_use]
    pub fn format_y(&self, value: f64, x: &ChartValue) -> String {
        match &self.y {
            Some(formatter) => formatter(value, x),
            None => format_number(value),
        }
    }
}

impl fmt::Debug for ChartFormatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartFormatters")
            .field("x", &self.x.is_some())
            .field("y", &self.y.is_some())
            .finish()
    }
}
