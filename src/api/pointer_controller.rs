use tracing::{debug, trace};

use crate::core::find_closest;
use crate::interaction::FocusHost;

use super::{ChartModel, DefaultAction, PointerEvent, PointerLeaveEvent};

impl<H: FocusHost> ChartModel<H> {
    /// Throttled pointer move over the plot.
    pub fn on_svg_mouse_move(&mut self, event: PointerEvent) {
        match self.pointer_throttle.call(event.timestamp, event) {
            Some(event) => self.apply_pointer_move(event),
            None => trace!(x = event.x, y = event.y, "pointer move deferred by throttle"),
        }
    }

    /// Pointer left the plot surface.
    pub fn on_svg_mouse_out(&mut self, event: PointerLeaveEvent) {
        self.pointer_throttle.cancel();

        if self.interactions.get().is_popover_pinned || event.target_inside_popover {
            return;
        }
        if !event.target_inside_plot {
            self.interactions.clear_highlighted_legend();
            self.interactions.clear_highlight();
            self.release_application();
        }
    }

    /// Pointer press on the plot toggles the popover pin.
    pub fn on_svg_mouse_down(&mut self) -> DefaultAction {
        self.interactions.toggle_popover_pin();
        debug!(
            pinned = self.interactions.get().is_popover_pinned,
            "popover pin toggled by pointer"
        );
        self.sync_application();
        DefaultAction::Prevent
    }

    pub(super) fn apply_pointer_move(&mut self, event: PointerEvent) {
        if self.interactions.get().is_popover_pinned
            || self.is_inside_popover_dead_zone(event.x, event.y)
        {
            return;
        }

        let plot = &self.computed.plot;
        if plot.is_empty() {
            return;
        }

        let columns = plot.columns_by_x();
        let Ok(column_position) = find_closest(columns, event.x, |x| {
            plot.column_x(*x).unwrap_or_default()
        }) else {
            return;
        };
        let x = columns[column_position];
        let column = plot.column(x);
        let Ok(point_position) = find_closest(column, event.y, |id| plot.point(*id).scaled.y1)
        else {
            return;
        };

        let point_id = column[point_position];
        let point = plot.point(point_id);
        let margin = self.config.hit_margin_px;
        if (point.scaled.x - event.x).abs() <= margin && (point.scaled.y1 - event.y).abs() <= margin
        {
            self.highlight_plot_point(point_id);
        } else {
            self.interactions.highlight_x(x);
        }
        self.sync_application();
    }

    fn is_inside_popover_dead_zone(&self, x: f64, y: f64) -> bool {
        self.refs
            .popover_bounds
            .is_some_and(|bounds| bounds.inflate(self.config.popover_dead_zone_px).contains(x, y))
    }
}
