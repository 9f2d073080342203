use serde::{Deserialize, Serialize};

use crate::core::{InternalSeriesMap, MarkerType, PlotPoints, Series, SeriesId};
use crate::interaction::{AriaAttributes, FocusHost, InteractionState};

use super::{ChartFormatters, ChartModel};

/// One series row of the detail popover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightDetailItem {
    pub series: SeriesId,
    pub title: String,
    pub value: String,
    pub raw_value: f64,
    pub color: String,
    pub marker: MarkerType,
    pub is_dimmed: bool,
    pub is_threshold: bool,
}

/// Formatted content for the highlighted column or point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightDetails {
    pub position: String,
    pub items: Vec<HighlightDetailItem>,
    pub total: Option<String>,
    /// Series of the highlighted point, when a point (not a column) is highlighted.
    pub focused_series: Option<SeriesId>,
    /// Y axis title naming what the values measure.
    pub value_title: Option<String>,
}

impl HighlightDetails {
    /// Text announced for the active element: position and value title, then
    /// the point's series, or every series plus the total for a column.
    #[must_use]
    pub fn aria_label(&self) -> String {
        let mut parts = vec![self.position.clone()];
        parts.extend(self.value_title.clone());
        match self.focused_series {
            Some(series) => parts.extend(
                self.items
                    .iter()
                    .filter(|item| item.series == series)
                    .map(|item| format!("{} {}", item.title, item.value)),
            ),
            None => {
                parts.extend(
                    self.items
                        .iter()
                        .map(|item| format!("{} {}", item.title, item.value)),
                );
                if let Some(total) = &self.total {
                    parts.push(format!("Total {total}"));
                }
            }
        }
        parts.join(", ")
    }
}

/// Derives popover content from the interaction state without mutating anything.
#[must_use]
pub fn compute_highlight_details(
    plot: &PlotPoints,
    series: &InternalSeriesMap,
    formatters: &ChartFormatters,
    state: &InteractionState,
    x_title: Option<&str>,
    y_title: Option<&str>,
) -> Option<HighlightDetails> {
    let x = state.highlighted_x?;
    let by_series = plot.xs().get(x)?;
    let first = plot.point(*by_series.first()?);
    let focused_series = state
        .highlighted_point
        .and_then(|point| plot.get(point))
        .map(|point| point.index.series());

    let formatted_x = formatters.format_x(&first.x);
    let position = match x_title {
        Some(title) => format!("{title} {formatted_x}"),
        None => formatted_x,
    };

    let mut total = 0.0;
    let mut data_series = 0_usize;
    let mut items = Vec::with_capacity(by_series.len());
    for id in by_series {
        let point = plot.point(*id);
        let Some(internal) = series.by_id(point.index.series()) else {
            continue;
        };
        let is_threshold = internal.series.is_threshold();
        if !is_threshold {
            total += point.value;
            data_series += 1;
        }
        items.push(HighlightDetailItem {
            series: internal.id,
            title: internal.series.title().to_owned(),
            value: (internal.formatter)(point.value, &point.x),
            raw_value: point.value,
            color: internal.color.clone(),
            marker: internal.marker,
            is_dimmed: focused_series.is_some_and(|focused| focused != internal.id),
            is_threshold,
        });
    }

    Some(HighlightDetails {
        position,
        items,
        total: (data_series > 0).then(|| formatters.format_y(total, &first.x)),
        focused_series,
        value_title: y_title.map(str::to_owned),
    })
}

/// Legend entry with its highlight state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub series: SeriesId,
    pub title: String,
    pub color: String,
    pub marker: MarkerType,
    pub is_highlighted: bool,
    pub is_dimmed: bool,
}

impl<H: FocusHost> ChartModel<H> {
    #[must_use]
    pub fn highlight_details(&self) -> Option<HighlightDetails> {
        compute_highlight_details(
            &self.computed.plot,
            &self.internal_series,
            &self.formatters,
            &self.interactions.get(),
            self.config.x_title.as_deref(),
            self.config.y_title.as_deref(),
        )
    }

    /// ARIA attributes of the highlighted point or column.
    #[must_use]
    pub fn active_element(&self) -> Option<AriaAttributes> {
        let details = self.highlight_details()?;
        let pinned = self.interactions.get().is_popover_pinned;
        Some(
            AriaAttributes::new()
                .with("role", "group")
                .with("aria-label", details.aria_label())
                .with("aria-haspopup", "true")
                .with("aria-expanded", pinned.to_string()),
        )
    }

    /// Text for the live region announcing the current highlight.
    #[must_use]
    pub fn live_region_text(&self) -> Option<String> {
        self.highlight_details().map(|details| details.aria_label())
    }

    #[must_use]
    pub fn legend_items(&self) -> Vec<LegendItem> {
        let legend_series = self.interactions.get().legend_series;
        self.internal_series
            .iter()
            .map(|internal| LegendItem {
                series: internal.id,
                title: internal.series.title().to_owned(),
                color: internal.color.clone(),
                marker: internal.marker,
                is_highlighted: legend_series == Some(internal.id),
                is_dimmed: legend_series.is_some_and(|series| series != internal.id),
            })
            .collect()
    }

    /// Series behind a `SeriesId`.
    #[must_use]
    pub fn series_by_id(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.0).map(AsRef::as_ref)
    }
}
