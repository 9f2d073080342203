use std::rc::Rc;

use tracing::debug;

use crate::core::Series;
use crate::interaction::FocusHost;

use super::ChartModel;

impl<H: FocusHost> ChartModel<H> {
    /// Highlights `series` from the legend, or clears the series highlight.
    pub fn on_legend_highlight(&mut self, series: Option<&Rc<Series>>) {
        let id = series.and_then(|item| self.internal_series.get(item).map(|internal| internal.id));
        if series.is_some() && id.is_none() {
            debug!("legend highlight for a series outside this chart ignored");
        }
        self.interactions.highlight_series(id);
    }

    /// Forwards the legend filter's visible series to the host.
    pub fn on_filter_change(&mut self, visible: Vec<Rc<Series>>) {
        match self.visible_series_setter.as_mut() {
            Some(setter) => setter(visible),
            None => debug!(
                visible = visible.len(),
                "filter change without a visible series setter"
            ),
        }
    }

    pub fn set_visible_series_setter(&mut self, setter: impl FnMut(Vec<Rc<Series>>) + 'static) {
        self.visible_series_setter = Some(Box::new(setter));
    }

    /// Calls `listener` whenever the highlighted series changes, with `None`
    /// once the highlight is cleared. Replaces any previous listener.
    pub fn set_highlight_change_listener(
        &mut self,
        listener: impl Fn(Option<Rc<Series>>) + 'static,
    ) {
        if let Some(previous) = self.highlight_change_subscription.take() {
            previous.unsubscribe();
        }
        let series = self.series.clone();
        self.highlight_change_subscription = Some(self.interactions.subscribe(
            |state| state.highlighted_series,
            move |next, _| {
                listener(
                    next.highlighted_series
                        .and_then(|id| series.get(id.0).map(Rc::clone)),
                );
            },
        ));
    }
}
