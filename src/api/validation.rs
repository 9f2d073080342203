use crate::core::ScaleType;
use crate::error::{ChartError, ChartResult};

use super::ChartModelConfig;

pub(super) fn validate_chart_model_config(config: &ChartModelConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    if !matches!(config.y_scale_type, ScaleType::Linear | ScaleType::Log) {
        return Err(ChartError::InvalidData(format!(
            "y scale must be linear or log, got {:?}",
            config.y_scale_type
        )));
    }

    if let Some((min, max)) = config.y_domain {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ChartError::InvalidData(
                "y domain must be finite with min <= max".to_owned(),
            ));
        }
        if config.y_scale_type == ScaleType::Log && min <= 0.0 {
            return Err(ChartError::InvalidData(
                "log y domain must be strictly positive".to_owned(),
            ));
        }
    }

    if let Some(domain) = &config.x_domain {
        if config.x_scale_type.is_continuous()
            && domain.iter().any(|value| value.as_f64().is_none())
        {
            return Err(ChartError::InvalidData(
                "continuous x domain cannot contain categories".to_owned(),
            ));
        }
    }

    if !config.hit_margin_px.is_finite() || config.hit_margin_px < 0.0 {
        return Err(ChartError::InvalidData(
            "hit margin must be finite and >= 0".to_owned(),
        ));
    }
    if !config.popover_dead_zone_px.is_finite() || config.popover_dead_zone_px < 0.0 {
        return Err(ChartError::InvalidData(
            "popover dead zone must be finite and >= 0".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;

    #[test]
    fn rejects_zero_sized_viewport() {
        let config = ChartModelConfig::new(Viewport::new(0, 100));
        assert!(matches!(
            validate_chart_model_config(&config),
            Err(ChartError::InvalidViewport { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_log_domain() {
        let config = ChartModelConfig::new(Viewport::new(100, 100))
            .with_y_scale_type(ScaleType::Log)
            .with_y_domain(0.0, 10.0);
        assert!(validate_chart_model_config(&config).is_err());
    }

    #[test]
    fn rejects_categorical_y_scale() {
        let config =
            ChartModelConfig::new(Viewport::new(100, 100)).with_y_scale_type(ScaleType::Categorical);
        assert!(validate_chart_model_config(&config).is_err());
    }

    #[test]
    fn accepts_defaults() {
        let config = ChartModelConfig::new(Viewport::new(640, 480));
        assert!(validate_chart_model_config(&config).is_ok());
    }
}
