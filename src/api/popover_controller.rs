use tracing::debug;

use crate::interaction::FocusHost;

use super::ChartModel;

impl<H: FocusHost> ChartModel<H> {
    /// Popover closed by the user.
    ///
    /// Unless an outside click closed it, focus returns on the next `tick`,
    /// once the triggering click or key press has settled.
    pub fn on_popover_dismiss(&mut self, outside_click: bool) {
        self.interactions.unpin_popover();
        self.focus_return_pending = !outside_click;
        self.sync_application();
        debug!(outside_click, "popover dismissed");
    }

    #[must_use]
    pub fn has_pending_focus_return(&self) -> bool {
        self.focus_return_pending
    }

    /// Reads the store as it is now, not as it was at dismissal.
    pub(super) fn run_focus_return(&mut self) {
        self.focus_return_pending = false;
        if self.interactions.get().has_highlight() {
            self.focus_application();
        } else {
            self.interactions.clear_highlight();
            self.active_element_changed.set(false);
            self.focus_plot();
        }
    }
}
