use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

use super::domain::{SeriesValues, stack_baseline};
use super::scale::{ChartScale, NumericChartScale};
use super::series::{Series, SeriesId, canonical_x_values};
use super::types::ChartValue;

/// Handle of a point inside a `PlotPoints` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub usize);

/// Position of a point in the three lookup matrices.
///
/// `x` is the visible column, `s` the series and `y` the rank of the point
/// inside its column when ordered by pixel height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointIndex {
    pub x: usize,
    pub y: usize,
    pub s: usize,
}

impl PointIndex {
    #[must_use]
    pub fn series(self) -> SeriesId {
        SeriesId(self.s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledCoordinates {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: ChartValue,
    pub y0: f64,
    pub y1: f64,
    pub scaled: ScaledCoordinates,
    pub index: PointIndex,
    pub value: f64,
}

/// Arena of plot points indexed three ways:
/// `xy[x][y]` (column, sorted by height), `xs[x][s]` and `sx[s][x]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotPoints {
    points: Vec<PlotPoint>,
    xy: Vec<Vec<PointId>>,
    xs: Vec<Vec<PointId>>,
    sx: Vec<Vec<PointId>>,
    columns_by_x: Vec<usize>,
}

impl PlotPoints {
    #[must_use]
    pub fn point(&self, id: PointId) -> &PlotPoint {
        &self.points[id.0]
    }

    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&PlotPoint> {
        self.points.get(id.0)
    }

    #[must_use]
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    #[must_use]
    pub fn xy(&self) -> &[Vec<PointId>] {
        &self.xy
    }

    #[must_use]
    pub fn xs(&self) -> &[Vec<PointId>] {
        &self.xs
    }

    #[must_use]
    pub fn sx(&self) -> &[Vec<PointId>] {
        &self.sx
    }

    /// Points of column `x` ordered by pixel height.
    #[must_use]
    pub fn column(&self, x: usize) -> &[PointId] {
        self.xy.get(x).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.xy.len()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.sx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pixel x of column `x`.
    #[must_use]
    pub fn column_x(&self, x: usize) -> Option<f64> {
        self.column(x).first().map(|id| self.point(*id).scaled.x)
    }

    /// Column indices ordered by their pixel x.
    #[must_use]
    pub fn columns_by_x(&self) -> &[usize] {
        &self.columns_by_x
    }

    /// First point of the first series.
    #[must_use]
    pub fn first_point(&self) -> Option<PointId> {
        self.sx.first().and_then(|row| row.first()).copied()
    }
}

/// Builds the plot-point arena for every x the x scale can place.
///
/// Data series are stacked per column when `stacked`; thresholds emit a flat
/// point at their own y.
#[must_use]
pub fn compute_plot_points(
    series: &[Rc<Series>],
    x_scale: &ChartScale,
    y_scale: NumericChartScale,
    stacked: bool,
) -> PlotPoints {
    let visible: Vec<(ChartValue, f64)> = canonical_x_values(series)
        .into_iter()
        .filter_map(|x| x_scale.map(&x).map(|scaled| (x, scaled)))
        .collect();
    if visible.is_empty() || series.is_empty() {
        return PlotPoints::default();
    }

    let values = SeriesValues::new(series);
    let baseline = stack_baseline(y_scale.scale_type());
    let mut plot = PlotPoints {
        points: Vec::with_capacity(visible.len() * series.len()),
        xy: Vec::with_capacity(visible.len()),
        xs: Vec::with_capacity(visible.len()),
        sx: vec![Vec::with_capacity(visible.len()); series.len()],
        columns_by_x: Vec::with_capacity(visible.len()),
    };

    for (x_index, (x, scaled_x)) in visible.into_iter().enumerate() {
        let mut stack_y = baseline;
        let mut column: SmallVec<[PlotPoint; 8]> = SmallVec::with_capacity(series.len());

        for (s_index, item) in series.iter().enumerate() {
            let (y0, y1, value) = match item.as_ref() {
                Series::Threshold(threshold) => (threshold.y, threshold.y, threshold.y),
                Series::Data(_) => {
                    let value = values.value_at(s_index, &x);
                    let y0 = if stacked { stack_y } else { baseline };
                    let y1 = y0 + value;
                    if stacked {
                        stack_y = y1;
                    }
                    (y0, y1, value)
                }
            };
            column.push(PlotPoint {
                x: x.clone(),
                y0,
                y1,
                scaled: ScaledCoordinates {
                    x: scaled_x,
                    y0: y_scale.map(y0),
                    y1: y_scale.map(y1),
                },
                index: PointIndex {
                    x: x_index,
                    y: 0,
                    s: s_index,
                },
                value,
            });
        }

        column.sort_by_key(|point| OrderedFloat(point.scaled.y1));

        let mut by_height = Vec::with_capacity(column.len());
        let mut by_series = vec![PointId(0); column.len()];
        for (y_index, mut point) in column.into_iter().enumerate() {
            point.index.y = y_index;
            let id = PointId(plot.points.len());
            by_series[point.index.s] = id;
            plot.sx[point.index.s].push(id);
            by_height.push(id);
            plot.points.push(point);
        }
        plot.xy.push(by_height);
        plot.xs.push(by_series);
    }

    let mut columns_by_x: Vec<usize> = (0..plot.xy.len()).collect();
    columns_by_x.sort_by_key(|x| OrderedFloat(plot.column_x(*x).unwrap_or_default()));
    plot.columns_by_x = columns_by_x;
    plot
}

/// Index of the element of `sorted` whose key is closest to `target`.
///
/// `sorted` must be ordered by `key`; an empty slice is a caller bug.
pub fn find_closest<T>(sorted: &[T], target: f64, key: impl Fn(&T) -> f64) -> ChartResult<usize> {
    if sorted.is_empty() {
        return Err(ChartError::InvariantViolation(
            "closest-value search over an empty sequence".to_owned(),
        ));
    }

    let upper = sorted.partition_point(|item| key(item) < target);
    if upper == 0 {
        return Ok(0);
    }
    if upper == sorted.len() {
        return Ok(sorted.len() - 1);
    }

    let below = (target - key(&sorted[upper - 1])).abs();
    let above = (key(&sorted[upper]) - target).abs();
    Ok(if below <= above { upper - 1 } else { upper })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_closest_picks_nearest_neighbour() {
        let values = [0.0, 10.0, 20.0];
        assert_eq!(find_closest(&values, -5.0, |v| *v).unwrap(), 0);
        assert_eq!(find_closest(&values, 4.0, |v| *v).unwrap(), 0);
        assert_eq!(find_closest(&values, 6.0, |v| *v).unwrap(), 1);
        assert_eq!(find_closest(&values, 99.0, |v| *v).unwrap(), 2);
    }

    #[test]
    fn find_closest_fails_fast_on_empty_input() {
        let values: [f64; 0] = [];
        assert!(matches!(
            find_closest(&values, 1.0, |v| *v),
            Err(ChartError::InvariantViolation(_))
        ));
    }
}
