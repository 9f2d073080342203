use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::core::{
    ChartScale, ChartValue, InternalSeriesMap, NumericChartScale, PlotPoints, PointId, Rect,
    Series, compute_plot_points, compute_x_domain, compute_y_domain,
    series::find_x_value_mismatch, x_tick_count, y_tick_count,
};
use crate::error::ChartResult;
use crate::interaction::{
    ApplicationController, ApplicationNode, FocusHost, FocusOptions, FocusTarget,
    InteractionState, InteractionStore, Subscription, Throttle,
};

use super::validation::validate_chart_model_config;
use super::{ChartFormatters, ChartModelConfig, PointerEvent};

pub(super) type VisibleSeriesSetter = Box<dyn FnMut(Vec<Rc<Series>>)>;

/// Scales, ticks and plot points derived from series and config.
#[derive(Debug, Clone)]
pub struct ChartComputed {
    pub x_domain: Vec<ChartValue>,
    pub y_domain: Vec<f64>,
    pub x_scale: ChartScale,
    pub y_scale: NumericChartScale,
    pub x_ticks: Vec<ChartValue>,
    pub y_ticks: Vec<f64>,
    pub plot: Rc<PlotPoints>,
}

/// Host-measured geometry the model needs for hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartRefs {
    pub popover_bounds: Option<Rect>,
}

/// Interaction model of one chart instance.
///
/// Hosts forward input events to the `on_*` handlers, call `tick` from their
/// event loop and render from `computed`, `interactions` and the derived
/// highlight details. Rebuild the model (see `ChartModelMemo`) when series,
/// domains, scale types or dimensions change.
pub struct ChartModel<H: FocusHost> {
    pub(super) host: H,
    pub(super) config: ChartModelConfig,
    pub(super) series: Vec<Rc<Series>>,
    pub(super) internal_series: InternalSeriesMap,
    pub(super) formatters: ChartFormatters,
    pub(super) computed: ChartComputed,
    pub(super) interactions: InteractionStore,
    pub(super) application: ApplicationController,
    pub(super) refs: ChartRefs,
    pub(super) pointer_throttle: Throttle<PointerEvent>,
    pub(super) focus_return_pending: bool,
    pub(super) visible_series_setter: Option<VisibleSeriesSetter>,
    pub(super) highlight_change_subscription: Option<Subscription<InteractionState>>,
    pub(super) active_element_changed: Rc<Cell<bool>>,
    _active_element_subscription: Subscription<InteractionState>,
}

impl<H: FocusHost> ChartModel<H> {
    pub fn new(
        host: H,
        series: Vec<Rc<Series>>,
        config: ChartModelConfig,
        formatters: ChartFormatters,
    ) -> ChartResult<Self> {
        validate_chart_model_config(&config)?;

        if cfg!(debug_assertions) {
            if let Some(mismatch) = find_x_value_mismatch(&series) {
                warn!(
                    series = mismatch.0,
                    title = series[mismatch.0].title(),
                    "data series x values differ from the first data series; using the first data series as the x axis"
                );
            }
        }

        let internal_series = InternalSeriesMap::decorate(&series, formatters.y.as_ref());
        let computed = compute_chart(&series, &config)?;
        debug!(
            series = series.len(),
            columns = computed.plot.column_count(),
            x_scale = ?config.x_scale_type,
            y_scale = ?config.y_scale_type,
            "chart model built"
        );

        let interactions = InteractionStore::new(Rc::clone(&computed.plot));
        let active_element_changed = Rc::new(Cell::new(false));
        let changed = Rc::clone(&active_element_changed);
        let active_element_subscription = interactions.subscribe(
            |state| {
                (
                    state.highlighted_x,
                    state.highlighted_point,
                    state.is_popover_pinned,
                )
            },
            move |_, _| changed.set(true),
        );

        Ok(Self {
            host,
            pointer_throttle: Throttle::new(config.pointer_throttle()),
            config,
            series,
            internal_series,
            formatters,
            computed,
            interactions,
            application: ApplicationController::default(),
            refs: ChartRefs::default(),
            focus_return_pending: false,
            visible_series_setter: None,
            highlight_change_subscription: None,
            active_element_changed,
            _active_element_subscription: active_element_subscription,
        })
    }

    #[must_use]
    pub fn computed(&self) -> &ChartComputed {
        &self.computed
    }

    #[must_use]
    pub fn interactions(&self) -> &InteractionStore {
        &self.interactions
    }

    #[must_use]
    pub fn config(&self) -> &ChartModelConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &[Rc<Series>] {
        &self.series
    }

    #[must_use]
    pub fn internal_series(&self) -> &InternalSeriesMap {
        &self.internal_series
    }

    #[must_use]
    pub fn formatters(&self) -> &ChartFormatters {
        &self.formatters
    }

    #[must_use]
    pub fn refs(&self) -> ChartRefs {
        self.refs
    }

    /// Records the popover's bounding box, or `None` while it is closed.
    pub fn set_popover_bounds(&mut self, bounds: Option<Rect>) {
        self.refs.popover_bounds = bounds;
    }

    #[must_use]
    pub fn application_node(&self) -> &ApplicationNode {
        self.application.node()
    }

    #[must_use]
    pub fn is_application_focused(&self) -> bool {
        self.application.is_focused()
    }

    #[must_use]
    pub fn plot_tab_index(&self) -> i32 {
        self.application.plot_tab_index()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn x_tick_labels(&self) -> Vec<String> {
        self.computed
            .x_ticks
            .iter()
            .map(|tick| self.formatters.format_x(tick))
            .collect()
    }

    #[must_use]
    pub fn y_tick_labels(&self) -> Vec<String> {
        let origin = ChartValue::number(0.0);
        self.computed
            .y_ticks
            .iter()
            .map(|tick| self.formatters.format_y(*tick, &origin))
            .collect()
    }

    /// Runs timers due at `now`: the trailing throttled pointer move and a
    /// pending focus return.
    pub fn tick(&mut self, now: Duration) {
        if let Some(event) = self.pointer_throttle.poll(now) {
            self.apply_pointer_move(event);
        }
        if self.focus_return_pending {
            self.run_focus_return();
        }
    }

    /// Focuses the application node with the current active element's attributes.
    pub(super) fn focus_application(&mut self) {
        self.active_element_changed.set(false);
        if let Some(attributes) = self.active_element() {
            self.application.focus(&mut self.host, &attributes);
        }
    }

    /// Highlights a point taken from this model's plot.
    pub(super) fn highlight_plot_point(&self, point: PointId) {
        if let Err(err) = self.interactions.highlight_point(point) {
            warn!(error = %err, "point highlight skipped");
        }
    }

    pub(super) fn focus_plot(&mut self) {
        self.application.mute();
        self.host.focus(
            FocusTarget::Plot,
            FocusOptions {
                prevent_scroll: true,
            },
        );
    }

    /// Mutes the application node once a pointer-driven clear left nothing to
    /// mirror. Platform focus stays where it is.
    pub(super) fn release_application(&mut self) {
        if !self.active_element_changed.replace(false) || !self.application.is_focused() {
            return;
        }
        if self.active_element().is_none() {
            trace!("application node muted after pointer leave");
            self.application.mute();
        }
    }

    /// Refreshes the focused application node after a highlight change.
    pub(super) fn sync_application(&mut self) {
        if !self.active_element_changed.replace(false) || !self.application.is_focused() {
            return;
        }
        match self.active_element() {
            Some(attributes) => self.application.focus(&mut self.host, &attributes),
            None => self.focus_plot(),
        }
    }
}

fn compute_chart(series: &[Rc<Series>], config: &ChartModelConfig) -> ChartResult<ChartComputed> {
    let width = f64::from(config.viewport.width);
    let height = f64::from(config.viewport.height);

    let x_domain = config
        .x_domain
        .clone()
        .unwrap_or_else(|| compute_x_domain(series, config.x_scale_type));
    let y_domain = config
        .y_domain
        .map(|(min, max)| vec![min, max])
        .unwrap_or_else(|| compute_y_domain(series, config.y_scale_type, config.stacked));

    let x_scale = ChartScale::new(config.x_scale_type, x_domain.clone(), (0.0, width));
    let y_scale = NumericChartScale::new(config.y_scale_type, &y_domain, (height, 0.0))?;
    let x_ticks = x_scale.ticks(x_tick_count(width));
    let y_ticks = y_scale.ticks(y_tick_count(height));
    let plot = Rc::new(compute_plot_points(series, &x_scale, y_scale, config.stacked));

    Ok(ChartComputed {
        x_domain,
        y_domain,
        x_scale,
        y_scale,
        x_ticks,
        y_ticks,
        plot,
    })
}
