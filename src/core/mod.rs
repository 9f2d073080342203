pub mod domain;
pub mod plot_points;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod types;

pub use domain::{SeriesValues, compute_categorical_domain, compute_x_domain, compute_y_domain};
pub use plot_points::{
    PlotPoint, PlotPoints, PointId, PointIndex, ScaledCoordinates, compute_plot_points,
    find_closest,
};
pub use scale::{ChartScale, NumericChartScale, ScaleType};
pub use series::{
    CATEGORICAL_PALETTE, DataSeries, InternalSeries, InternalSeriesMap, MarkerType, Series,
    SeriesId, SeriesKind, THRESHOLD_COLOR, ThresholdSeries, ValueFormatter,
};
pub use ticks::{x_tick_count, y_tick_count};
pub use types::{ChartValue, DataPoint, Rect, Viewport, format_number};
