use chrono::DateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ticks::{categorical_stride, linear_ticks, log_ticks, time_ticks};
use super::types::ChartValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
    Time,
    Categorical,
}

impl ScaleType {
    #[must_use]
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Categorical)
    }
}

/// X axis scale: maps any `ChartValue` of its type to a pixel position.
///
/// Categorical scales place each category at the center of an equal-width band.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    scale_type: ScaleType,
    domain: Vec<ChartValue>,
    categories: IndexSet<ChartValue>,
    range: (f64, f64),
}

impl ChartScale {
    #[must_use]
    pub fn new(scale_type: ScaleType, domain: Vec<ChartValue>, range: (f64, f64)) -> Self {
        let categories = if scale_type == ScaleType::Categorical {
            domain.iter().cloned().collect()
        } else {
            IndexSet::new()
        };
        Self {
            scale_type,
            domain,
            categories,
            range,
        }
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn domain(&self) -> &[ChartValue] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        self.scale_type == ScaleType::Categorical
    }

    /// Width of one category band; zero for continuous scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        if self.is_categorical() && !self.categories.is_empty() {
            ((self.range.1 - self.range.0) / self.categories.len() as f64).abs()
        } else {
            0.0
        }
    }

    /// Pixel position of `value`, or `None` when the scale cannot place it
    /// (unknown category, wrong value kind, non-positive log value).
    #[must_use]
    pub fn map(&self, value: &ChartValue) -> Option<f64> {
        if self.is_categorical() {
            let index = self.categories.get_index_of(value)?;
            let step = (self.range.1 - self.range.0) / self.categories.len() as f64;
            return Some(self.range.0 + step * (index as f64 + 0.5));
        }

        let (start, end) = self.continuous_domain()?;
        interpolate(self.scale_type, (start, end), self.range, value.as_f64()?)
    }

    fn continuous_domain(&self) -> Option<(f64, f64)> {
        let start = self.domain.first()?.as_f64()?;
        let end = self.domain.last()?.as_f64()?;
        Some((start, end))
    }

    /// Tick values for roughly `count` labels.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<ChartValue> {
        match self.scale_type {
            ScaleType::Categorical => {
                let stride = categorical_stride(self.domain.len(), count);
                self.domain.iter().step_by(stride).cloned().collect()
            }
            ScaleType::Linear => self
                .continuous_domain()
                .map(|(start, end)| linear_ticks(start, end, count))
                .unwrap_or_default()
                .into_iter()
                .map(ChartValue::number)
                .collect(),
            ScaleType::Log => self
                .continuous_domain()
                .map(|(start, end)| log_ticks(start, end, count))
                .unwrap_or_default()
                .into_iter()
                .map(ChartValue::number)
                .collect(),
            ScaleType::Time => self
                .continuous_domain()
                .map(|(start, end)| time_ticks(start, end, count))
                .unwrap_or_default()
                .into_iter()
                .filter_map(|millis| DateTime::from_timestamp_millis(millis as i64))
                .map(ChartValue::Time)
                .collect(),
        }
    }
}

/// Y axis scale over plain numbers (linear or log).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericChartScale {
    scale_type: ScaleType,
    domain: (f64, f64),
    range: (f64, f64),
}

impl NumericChartScale {
    /// Builds the scale; an empty `domain` maps everything to the range midpoint.
    pub fn new(scale_type: ScaleType, domain: &[f64], range: (f64, f64)) -> ChartResult<Self> {
        if !matches!(scale_type, ScaleType::Linear | ScaleType::Log) {
            return Err(ChartError::InvalidData(format!(
                "numeric scale must be linear or log, got {scale_type:?}"
            )));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        let domain = match domain {
            [] => (0.0, 0.0),
            [single] => (*single, *single),
            [start, .., end] => (*start, *end),
        };
        Ok(Self {
            scale_type,
            domain,
            range,
        })
    }

    #[must_use]
    pub fn scale_type(self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    /// Pixel position of `value`; `NaN` when a log scale receives a non-positive value.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        interpolate(self.scale_type, self.domain, self.range, value).unwrap_or(f64::NAN)
    }

    /// Inverse of `map`, used for hit-testing.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (r0, r1) = self.range;
        let t = if r0 == r1 { 0.5 } else { (pixel - r0) / (r1 - r0) };
        let (d0, d1) = self.domain;
        match self.scale_type {
            ScaleType::Log if d0 > 0.0 && d1 > 0.0 => (d0.ln() + t * (d1.ln() - d0.ln())).exp(),
            _ => d0 + t * (d1 - d0),
        }
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, end) = self.domain;
        match self.scale_type {
            ScaleType::Log => log_ticks(start, end, count),
            _ => linear_ticks(start, end, count),
        }
    }
}

fn interpolate(
    scale_type: ScaleType,
    (d0, d1): (f64, f64),
    (r0, r1): (f64, f64),
    value: f64,
) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let t = if scale_type == ScaleType::Log {
        if value <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return None;
        }
        normalize(d0.ln(), d1.ln(), value.ln())
    } else {
        normalize(d0, d1, value)
    };
    Some(r0 + t * (r1 - r0))
}

fn normalize(start: f64, end: f64, value: f64) -> f64 {
    if start == end {
        0.5
    } else {
        (value - start) / (end - start)
    }
}
