use tracing::{trace, warn};

use crate::interaction::FocusHost;

use super::{ChartModel, FocusTrigger};

impl<H: FocusHost> ChartModel<H> {
    /// The plot received focus.
    ///
    /// Keyboard focus seeds a highlight (the first column when there are
    /// several series, otherwise the first point) and moves focus to the
    /// application node. Pointer focus changes nothing: pointer presses manage
    /// the pin state themselves.
    pub fn on_svg_focus(&mut self, trigger: FocusTrigger) {
        if trigger == FocusTrigger::Pointer || self.computed.plot.is_empty() {
            return;
        }

        let state = self.interactions.get();
        if !state.has_highlight() {
            if self.series.len() > 1 {
                if let Some(first) = self.computed.plot.columns_by_x().first() {
                    self.interactions.highlight_x(*first);
                }
            } else if let Err(err) = self.interactions.highlight_first_point() {
                warn!(error = %err, "unable to seed keyboard highlight");
                return;
            }
        }
        trace!("keyboard focus entered the plot");
        self.focus_application();
    }

    /// Focus left the plot; keeps the highlight only while the popover is pinned.
    pub fn on_svg_blur(&mut self) {
        self.application.mute();
        if !self.interactions.get().is_popover_pinned {
            self.interactions.clear_highlight();
        }
        self.active_element_changed.set(false);
    }

    /// Focus left the whole chart: full reset.
    pub fn on_container_blur(&mut self) {
        self.pointer_throttle.cancel();
        self.focus_return_pending = false;
        self.application.mute();
        self.interactions.clear_state();
        self.active_element_changed.set(false);
    }
}
