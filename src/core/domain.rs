use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;

use super::scale::ScaleType;
use super::series::{Series, canonical_x_values};
use super::types::ChartValue;

/// Stack baseline for log scales, which cannot start at zero.
pub const LOG_STACK_BASELINE: f64 = f64::EPSILON;

/// Per-series y lookup by x value. Thresholds have no entries.
#[derive(Debug, Clone, Default)]
pub struct SeriesValues {
    by_series: Vec<Option<IndexMap<ChartValue, f64>>>,
}

impl SeriesValues {
    #[must_use]
    pub fn new(series: &[Rc<Series>]) -> Self {
        let by_series = series
            .iter()
            .map(|item| match item.as_ref() {
                Series::Threshold(_) => None,
                Series::Data(data) => {
                    let mut values = IndexMap::with_capacity(data.data.len());
                    for point in &data.data {
                        values.entry(point.x.clone()).or_insert(point.y);
                    }
                    Some(values)
                }
            })
            .collect();
        Self { by_series }
    }

    /// Value of data series `series_index` at `x`; missing samples count as zero.
    #[must_use]
    pub fn value_at(&self, series_index: usize, x: &ChartValue) -> f64 {
        self.by_series
            .get(series_index)
            .and_then(Option::as_ref)
            .and_then(|values| values.get(x))
            .copied()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

#[must_use]
pub fn stack_baseline(scale_type: ScaleType) -> f64 {
    if scale_type == ScaleType::Log {
        LOG_STACK_BASELINE
    } else {
        0.0
    }
}

/// Unique values in first-seen order.
#[must_use]
pub fn compute_categorical_domain<'a>(
    values: impl IntoIterator<Item = &'a ChartValue>,
) -> Vec<ChartValue> {
    values
        .into_iter()
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// X domain from every data series sample: all categories for categorical
/// scales, `[min, max]` otherwise. Empty when there is no data.
#[must_use]
pub fn compute_x_domain(series: &[Rc<Series>], scale_type: ScaleType) -> Vec<ChartValue> {
    let values = series.iter().flat_map(|item| item.points()).map(|point| &point.x);

    if scale_type == ScaleType::Categorical {
        return compute_categorical_domain(values);
    }

    let mut continuous = values.filter(|value| value.as_f64().is_some_and(f64::is_finite));
    let Some(first) = continuous.next() else {
        return Vec::new();
    };
    let key = |value: &ChartValue| OrderedFloat(value.as_f64().unwrap_or_default());
    let (min, max) = continuous.fold((first, first), |(min, max), value| {
        (
            if key(value) < key(min) { value } else { min },
            if key(value) > key(max) { value } else { max },
        )
    });
    vec![min.clone(), max.clone()]
}

/// Y domain `[min, max]` over plotted values.
///
/// Data series are accumulated per x when `stacked`; thresholds only contribute
/// their own y. Linear domains always include zero. Log domains span the
/// values above the stacking baseline only, with the floor raised to one when
/// all of them are at least one.
#[must_use]
pub fn compute_y_domain(series: &[Rc<Series>], scale_type: ScaleType, stacked: bool) -> Vec<f64> {
    let log = scale_type == ScaleType::Log;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut include = |value: f64| {
        if value.is_finite() && (!log || value > LOG_STACK_BASELINE) {
            min = min.min(value);
            max = max.max(value);
        }
    };

    for item in series.iter() {
        if let Series::Threshold(threshold) = item.as_ref() {
            include(threshold.y);
        }
    }

    let values = SeriesValues::new(series);
    let baseline = stack_baseline(scale_type);
    for x in &canonical_x_values(series) {
        let mut stack_y = baseline;
        for (index, item) in series.iter().enumerate() {
            if item.is_threshold() {
                continue;
            }
            let top = if stacked { stack_y } else { baseline } + values.value_at(index, x);
            if stacked {
                stack_y = top;
            }
            include(top);
        }
    }

    if min > max {
        return Vec::new();
    }

    if log {
        let floor = if min >= 1.0 { 1.0 } else { min };
        return vec![floor, max];
    }
    vec![min.min(0.0), max.max(0.0)]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::DataPoint;

    fn area(title: &str, values: &[(f64, f64)]) -> Rc<Series> {
        Rc::new(Series::area(
            title,
            values.iter().map(|(x, y)| DataPoint::new(*x, *y)).collect(),
        ))
    }

    #[test]
    fn categorical_domain_dedups_in_first_seen_order() {
        let values: Vec<ChartValue> = ["a", "b", "a", "c"].into_iter().map(Into::into).collect();
        assert_eq!(
            compute_categorical_domain(&values),
            vec![ChartValue::from("a"), "b".into(), "c".into()]
        );
    }

    #[test]
    fn stacked_y_domain_accumulates_series() {
        let series = vec![
            area("A", &[(0.0, 1.0), (1.0, 2.0)]),
            area("B", &[(0.0, 3.0), (1.0, 1.0)]),
        ];
        assert_eq!(compute_y_domain(&series, ScaleType::Linear, true), vec![0.0, 4.0]);
        assert_eq!(compute_y_domain(&series, ScaleType::Linear, false), vec![0.0, 3.0]);
    }

    #[test]
    fn thresholds_extend_but_do_not_stack() {
        let series = vec![
            area("A", &[(0.0, 1.0)]),
            Rc::new(Series::threshold("limit", 10.0)),
            area("B", &[(0.0, 1.0)]),
        ];
        assert_eq!(compute_y_domain(&series, ScaleType::Linear, true), vec![0.0, 10.0]);
    }

    #[test]
    fn negative_values_extend_the_floor() {
        let series = vec![area("A", &[(0.0, -5.0), (1.0, 2.0)])];
        assert_eq!(compute_y_domain(&series, ScaleType::Linear, true), vec![-5.0, 2.0]);
    }

    #[test]
    fn log_domain_below_one_keeps_the_data_floor() {
        let series = vec![area("A", &[(0.0, 0.2), (1.0, 0.5)])];
        let domain = compute_y_domain(&series, ScaleType::Log, false);
        assert_relative_eq!(domain[0], 0.2, epsilon = 1e-9);
        assert_relative_eq!(domain[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn log_domain_reaches_down_to_small_thresholds() {
        let series = vec![
            area("A", &[(0.0, 10.0), (1.0, 100.0)]),
            Rc::new(Series::threshold("floor", 0.5)),
            Rc::new(Series::threshold("ignored", -3.0)),
        ];
        let domain = compute_y_domain(&series, ScaleType::Log, true);
        assert_eq!(domain[0], 0.5);
        assert!((domain[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn log_domain_ignores_zero_samples() {
        let series = vec![area("A", &[(0.0, 0.0), (1.0, 0.3), (2.0, 40.0)])];
        let domain = compute_y_domain(&series, ScaleType::Log, true);
        assert_relative_eq!(domain[0], 0.3, epsilon = 1e-9);
        assert_relative_eq!(domain[1], 40.0, epsilon = 1e-9);
    }

    #[test]
    fn log_domain_without_positive_values_is_empty() {
        let series = vec![Rc::new(Series::threshold("ignored", -3.0))];
        assert!(compute_y_domain(&series, ScaleType::Log, true).is_empty());
    }

    #[test]
    fn log_domain_floor_is_clamped_to_one() {
        let series = vec![area("A", &[(0.0, 10.0), (1.0, 100.0)])];
        let domain = compute_y_domain(&series, ScaleType::Log, true);
        assert_eq!(domain[0], 1.0);
        assert!((domain[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_yield_empty_domains() {
        assert!(compute_x_domain(&[], ScaleType::Linear).is_empty());
        assert!(compute_y_domain(&[], ScaleType::Linear, true).is_empty());
    }

    #[test]
    fn continuous_x_domain_is_min_max() {
        let series = vec![area("A", &[(3.0, 1.0), (-1.0, 2.0), (7.0, 0.0)])];
        assert_eq!(
            compute_x_domain(&series, ScaleType::Linear),
            vec![ChartValue::number(-1.0), ChartValue::number(7.0)]
        );
    }
}
