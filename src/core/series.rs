use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{ChartValue, DataPoint, format_number};

/// Formats a series value; receives the y value and the x it belongs to.
pub type ValueFormatter = Rc<dyn Fn(f64, &ChartValue) -> String>;

/// Categorical palette assigned to data series in declaration order.
pub const CATEGORICAL_PALETTE: [&str; 10] = [
    "#688ae8", "#c33d69", "#2ea597", "#8456ce", "#e07941", "#3759ce", "#962249", "#096f64",
    "#6237a7", "#a84401",
];

pub const THRESHOLD_COLOR: &str = "#5f6b7a";

/// Position of a series in the chart's series list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Area,
}

/// Legend/popover marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerType {
    Line,
    Rectangle,
    HollowRectangle,
    Dashed,
}

#[derive(Clone)]
pub struct DataSeries {
    pub kind: SeriesKind,
    pub title: String,
    pub color: Option<String>,
    pub data: Vec<DataPoint>,
    pub value_formatter: Option<ValueFormatter>,
}

/// Horizontal line at a constant y value.
#[derive(Clone)]
pub struct ThresholdSeries {
    pub title: String,
    pub color: Option<String>,
    pub y: f64,
    pub value_formatter: Option<ValueFormatter>,
}

#[derive(Clone)]
pub enum Series {
    Data(DataSeries),
    Threshold(ThresholdSeries),
}

impl Series {
    fn data(kind: SeriesKind, title: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self::Data(DataSeries {
            kind,
            title: title.into(),
            color: None,
            data,
            value_formatter: None,
        })
    }

    #[must_use]
    pub fn area(title: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self::data(SeriesKind::Area, title, data)
    }

    #[must_use]
    pub fn line(title: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self::data(SeriesKind::Line, title, data)
    }

    #[must_use]
    pub fn bar(title: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self::data(SeriesKind::Bar, title, data)
    }

    #[must_use]
    pub fn threshold(title: impl Into<String>, y: f64) -> Self {
        Self::Threshold(ThresholdSeries {
            title: title.into(),
            color: None,
            y,
            value_formatter: None,
        })
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = Some(color.into());
        match &mut self {
            Self::Data(series) => series.color = color,
            Self::Threshold(series) => series.color = color,
        }
        self
    }

    #[must_use]
    pub fn with_value_formatter(
        mut self,
        formatter: impl Fn(f64, &ChartValue) -> String + 'static,
    ) -> Self {
        let formatter: Option<ValueFormatter> = Some(Rc::new(formatter));
        match &mut self {
            Self::Data(series) => series.value_formatter = formatter,
            Self::Threshold(series) => series.value_formatter = formatter,
        }
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Data(series) => &series.title,
            Self::Threshold(series) => &series.title,
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Data(series) => series.color.as_deref(),
            Self::Threshold(series) => series.color.as_deref(),
        }
    }

    #[must_use]
    pub fn is_threshold(&self) -> bool {
        matches!(self, Self::Threshold(_))
    }

    /// Data samples; thresholds have none.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        match self {
            Self::Data(series) => &series.data,
            Self::Threshold(_) => &[],
        }
    }

    #[must_use]
    pub fn value_formatter(&self) -> Option<&ValueFormatter> {
        match self {
            Self::Data(series) => series.value_formatter.as_ref(),
            Self::Threshold(series) => series.value_formatter.as_ref(),
        }
    }

    #[must_use]
    pub fn marker(&self) -> MarkerType {
        match self {
            Self::Data(series) => match series.kind {
                SeriesKind::Line => MarkerType::Line,
                SeriesKind::Bar => MarkerType::Rectangle,
                SeriesKind::Area => MarkerType::HollowRectangle,
            },
            Self::Threshold(_) => MarkerType::Dashed,
        }
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(series) => f
                .debug_struct("DataSeries")
                .field("kind", &series.kind)
                .field("title", &series.title)
                .field("color", &series.color)
                .field("data", &series.data)
                .field("value_formatter", &series.value_formatter.is_some())
                .finish(),
            Self::Threshold(series) => f
                .debug_struct("ThresholdSeries")
                .field("title", &series.title)
                .field("color", &series.color)
                .field("y", &series.y)
                .field("value_formatter", &series.value_formatter.is_some())
                .finish(),
        }
    }
}

/// Series decorated with resolved color, marker and formatter.
#[derive(Clone)]
pub struct InternalSeries {
    pub id: SeriesId,
    pub series: Rc<Series>,
    pub color: String,
    pub marker: MarkerType,
    pub formatter: ValueFormatter,
}

impl fmt::Debug for InternalSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalSeries")
            .field("id", &self.id)
            .field("title", &self.series.title())
            .field("color", &self.color)
            .field("marker", &self.marker)
            .finish()
    }
}

/// Decorations keyed by series identity (`Rc` pointer).
#[derive(Debug, Clone, Default)]
pub struct InternalSeriesMap {
    entries: Vec<InternalSeries>,
    by_identity: IndexMap<usize, usize>,
}

impl InternalSeriesMap {
    /// Decorates `series`; `fallback` formats series without their own formatter.
    #[must_use]
    pub fn decorate(series: &[Rc<Series>], fallback: Option<&ValueFormatter>) -> Self {
        let mut entries = Vec::with_capacity(series.len());
        let mut by_identity = IndexMap::with_capacity(series.len());
        let mut color_index = 0_usize;

        for (index, item) in series.iter().enumerate() {
            let color = match (item.color(), item.is_threshold()) {
                (Some(color), _) => color.to_owned(),
                (None, true) => THRESHOLD_COLOR.to_owned(),
                (None, false) => {
                    CATEGORICAL_PALETTE[color_index % CATEGORICAL_PALETTE.len()].to_owned()
                }
            };
            if !item.is_threshold() {
                color_index += 1;
            }

            let formatter = item
                .value_formatter()
                .or(fallback)
                .cloned()
                .unwrap_or_else(default_value_formatter);

            by_identity.insert(series_identity(item), index);
            entries.push(InternalSeries {
                id: SeriesId(index),
                series: Rc::clone(item),
                color,
                marker: item.marker(),
                formatter,
            });
        }

        Self {
            entries,
            by_identity,
        }
    }

    #[must_use]
    pub fn get(&self, series: &Rc<Series>) -> Option<&InternalSeries> {
        self.by_identity
            .get(&series_identity(series))
            .and_then(|index| self.entries.get(*index))
    }

    #[must_use]
    pub fn by_id(&self, id: SeriesId) -> Option<&InternalSeries> {
        self.entries.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InternalSeries> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn series_identity(series: &Rc<Series>) -> usize {
    Rc::as_ptr(series) as usize
}

#[must_use]
pub fn default_value_formatter() -> ValueFormatter {
    Rc::new(|value, _x| format_number(value))
}

/// Canonical x axis: the x values of the first data series.
#[must_use]
pub fn canonical_x_values(series: &[Rc<Series>]) -> Vec<ChartValue> {
    series
        .iter()
        .find(|item| !item.is_threshold())
        .map(|item| item.points().iter().map(|point| point.x.clone()).collect())
        .unwrap_or_default()
}

/// Returns the index of the first data series whose x values differ from the
/// first data series.
#[must_use]
pub fn find_x_value_mismatch(series: &[Rc<Series>]) -> Option<SeriesId> {
    let mut data_series = series
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_threshold());
    let (_, reference) = data_series.next()?;
    let reference = reference.points();

    data_series
        .find(|(_, item)| {
            let points = item.points();
            points.len() != reference.len()
                || points
                    .iter()
                    .zip(reference)
                    .any(|(left, right)| left.x != right.x)
        })
        .map(|(index, _)| SeriesId(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[(f64, f64)]) -> Vec<DataPoint> {
        values.iter().map(|(x, y)| DataPoint::new(*x, *y)).collect()
    }

    #[test]
    fn thresholds_do_not_consume_palette_slots() {
        let series = vec![
            Rc::new(Series::area("a", sample(&[(0.0, 1.0)]))),
            Rc::new(Series::threshold("limit", 3.0)),
            Rc::new(Series::area("b", sample(&[(0.0, 2.0)]))),
        ];
        let map = InternalSeriesMap::decorate(&series, None);

        assert_eq!(map.by_id(SeriesId(0)).unwrap().color, CATEGORICAL_PALETTE[0]);
        assert_eq!(map.by_id(SeriesId(1)).unwrap().color, THRESHOLD_COLOR);
        assert_eq!(map.by_id(SeriesId(2)).unwrap().color, CATEGORICAL_PALETTE[1]);
        assert_eq!(map.by_id(SeriesId(1)).unwrap().marker, MarkerType::Dashed);
    }

    #[test]
    fn lookup_uses_series_identity() {
        let first = Rc::new(Series::line("same", sample(&[(0.0, 1.0)])));
        let twin = Rc::new(Series::line("same", sample(&[(0.0, 1.0)])));
        let map = InternalSeriesMap::decorate(std::slice::from_ref(&first), None);

        assert!(map.get(&first).is_some());
        assert!(map.get(&twin).is_none());
    }

    #[test]
    fn explicit_color_and_formatter_win() {
        let series = vec![Rc::new(
            Series::bar("a", sample(&[(0.0, 1.0)]))
                .with_color("#000000")
                .with_value_formatter(|value, _| format!("{value} units")),
        )];
        let map = InternalSeriesMap::decorate(&series, None);
        let item = map.by_id(SeriesId(0)).unwrap();

        assert_eq!(item.color, "#000000");
        assert_eq!((item.formatter)(2.0, &ChartValue::number(0.0)), "2 units");
    }

    #[test]
    fn mismatched_x_values_are_reported() {
        let series = vec![
            Rc::new(Series::area("a", sample(&[(0.0, 1.0), (1.0, 1.0)]))),
            Rc::new(Series::threshold("t", 1.0)),
            Rc::new(Series::area("b", sample(&[(0.0, 1.0), (2.0, 1.0)]))),
        ];
        assert_eq!(find_x_value_mismatch(&series), Some(SeriesId(2)));
        assert_eq!(find_x_value_mismatch(&series[..2]), None);
    }
}
