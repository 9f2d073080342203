use std::rc::Rc;

use tracing::trace;

use crate::core::Series;
use crate::error::{ChartError, ChartResult};
use crate::interaction::FocusHost;

use super::{ChartModel, ChartModelConfig};

/// Keeps one `ChartModel` alive until its series or config change.
///
/// Series are compared by identity, config by value. Formatters are not part
/// of the key; rebuild explicitly with `invalidate` after swapping them.
pub struct ChartModelMemo<H: FocusHost> {
    key: Option<(Vec<Rc<Series>>, ChartModelConfig)>,
    model: Option<ChartModel<H>>,
    rebuilds: usize,
}

impl<H: FocusHost> Default for ChartModelMemo<H> {
    fn default() -> Self {
        Self {
            key: None,
            model: None,
            rebuilds: 0,
        }
    }
}

impl<H: FocusHost> ChartModelMemo<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached model, calling `build` when the inputs changed.
    ///
    /// On a build error the previous model is kept and the error returned.
    pub fn get_or_build(
        &mut self,
        series: &[Rc<Series>],
        config: &ChartModelConfig,
        build: impl FnOnce(Vec<Rc<Series>>, ChartModelConfig) -> ChartResult<ChartModel<H>>,
    ) -> ChartResult<&mut ChartModel<H>> {
        let unchanged = self.model.is_some()
            && self.key.as_ref().is_some_and(|(cached_series, cached_config)| {
                cached_config == config
                    && cached_series.len() == series.len()
                    && cached_series
                        .iter()
                        .zip(series)
                        .all(|(cached, next)| Rc::ptr_eq(cached, next))
            });

        if !unchanged {
            let model = build(series.to_vec(), config.clone())?;
            self.rebuilds += 1;
            trace!(rebuilds = self.rebuilds, "chart model rebuilt");
            self.key = Some((series.to_vec(), config.clone()));
            return Ok(self.model.insert(model));
        }

        self.model
            .as_mut()
            .ok_or_else(|| ChartError::InvariantViolation("memoized chart model missing".into()))
    }

    #[must_use]
    pub fn model(&self) -> Option<&ChartModel<H>> {
        self.model.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}
