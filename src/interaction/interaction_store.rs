use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PlotPoints, PointId, SeriesId};
use crate::error::{ChartError, ChartResult};

use super::store::{Store, Subscription};

/// Transient chart highlight/pin state.
///
/// `highlighted_x` holds the column index; a highlighted point always lies in
/// that column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub highlighted_x: Option<usize>,
    pub highlighted_point: Option<PointId>,
    pub highlighted_series: Option<SeriesId>,
    pub legend_series: Option<SeriesId>,
    pub is_popover_pinned: bool,
}

impl InteractionState {
    #[must_use]
    pub fn has_highlight(self) -> bool {
        self.highlighted_x.is_some() || self.highlighted_point.is_some()
    }
}

/// Chart-specific operations over a `Store<InteractionState>`.
#[derive(Debug, Clone)]
pub struct InteractionStore {
    store: Store<InteractionState>,
    plot: Rc<PlotPoints>,
}

impl InteractionStore {
    #[must_use]
    pub fn new(plot: Rc<PlotPoints>) -> Self {
        Self {
            store: Store::new(InteractionState::default()),
            plot,
        }
    }

    #[must_use]
    pub fn get(&self) -> InteractionState {
        self.store.get()
    }

    /// The underlying generic store, for subscriptions and `SyncedSelector`s.
    #[must_use]
    pub fn store(&self) -> &Store<InteractionState> {
        &self.store
    }

    #[must_use]
    pub fn plot(&self) -> &PlotPoints {
        &self.plot
    }

    pub fn subscribe<T: PartialEq>(
        &self,
        selector: impl Fn(&InteractionState) -> T + 'static,
        listener: impl Fn(&InteractionState, &InteractionState) + 'static,
    ) -> Subscription<InteractionState> {
        self.store.subscribe(selector, listener)
    }

    /// Points of the highlighted column, ordered by height.
    #[must_use]
    pub fn highlighted_column(&self) -> Option<&[PointId]> {
        self.get().highlighted_x.map(|x| self.plot.column(x))
    }

    /// Highlights `point`, its column and its series in one update.
    ///
    /// Fails without touching the state when `point` is not in this store's plot.
    pub fn highlight_point(&self, point: PointId) -> ChartResult<()> {
        let index = self
            .plot
            .get(point)
            .ok_or_else(|| {
                ChartError::InvariantViolation(format!(
                    "point {} is not part of this chart's plot",
                    point.0
                ))
            })?
            .index;
        trace!(x = index.x, s = index.s, "highlight point");
        self.store.set(|state| InteractionState {
            highlighted_x: Some(index.x),
            highlighted_point: Some(point),
            highlighted_series: Some(index.series()),
            legend_series: Some(index.series()),
            ..*state
        });
        Ok(())
    }

    /// Highlights a whole column without a specific point or series.
    pub fn highlight_x(&self, x: usize) {
        trace!(x, "highlight column");
        self.store.set(|state| InteractionState {
            highlighted_x: Some(x),
            highlighted_point: None,
            highlighted_series: None,
            legend_series: None,
            ..*state
        });
    }

    /// Highlights the current point, else the first point of the highlighted
    /// (or legend) series, else the first point of the first series.
    pub fn highlight_first_point(&self) -> ChartResult<()> {
        let state = self.get();
        let target = state
            .highlighted_point
            .or_else(|| {
                state
                    .highlighted_series
                    .or(state.legend_series)
                    .and_then(|series| self.plot.sx().get(series.0))
                    .and_then(|row| row.first().copied())
            })
            .or_else(|| self.plot.first_point())
            .ok_or_else(|| {
                ChartError::InvariantViolation(
                    "highlight_first_point called without plotted data".to_owned(),
                )
            })?;
        self.highlight_point(target)
    }

    pub fn highlight_series(&self, series: Option<SeriesId>) {
        self.store.set(|state| InteractionState {
            highlighted_series: series,
            legend_series: series,
            ..*state
        });
    }

    pub fn clear_highlight(&self) {
        self.store.set(|state| InteractionState {
            highlighted_x: None,
            highlighted_point: None,
            highlighted_series: None,
            ..*state
        });
    }

    pub fn clear_highlighted_legend(&self) {
        self.store.set(|state| InteractionState {
            legend_series: None,
            ..*state
        });
    }

    pub fn clear_state(&self) {
        self.store.set(|_| InteractionState::default());
    }

    pub fn pin_popover(&self) {
        self.set_popover_pinned(true);
    }

    pub fn unpin_popover(&self) {
        self.set_popover_pinned(false);
    }

    pub fn toggle_popover_pin(&self) {
        self.store.set(|state| InteractionState {
            is_popover_pinned: !state.is_popover_pinned,
            ..*state
        });
    }

    fn set_popover_pinned(&self, pinned: bool) {
        self.store.set(|state| InteractionState {
            is_popover_pinned: pinned,
            ..*state
        });
    }
}
