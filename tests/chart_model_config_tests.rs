use std::time::Duration;

use cartesian_chart::api::{
    ChartFormatters, ChartModelConfig, DEFAULT_HIT_MARGIN_PX, DEFAULT_POINTER_THROTTLE_MS,
};
use cartesian_chart::core::{ChartValue, ScaleType, Viewport};
use cartesian_chart::interaction::NullFocusHost;
use cartesian_chart::{ChartError, ChartModel};

#[test]
fn config_round_trips_through_json() {
    let config = ChartModelConfig::new(Viewport::new(800, 300))
        .with_x_scale_type(ScaleType::Categorical)
        .with_x_domain(vec![ChartValue::category("a"), ChartValue::category("b")])
        .with_y_scale_type(ScaleType::Log)
        .with_y_domain(1.0, 1000.0)
        .with_pointer_throttle(Duration::from_millis(40))
        .with_axis_titles("Region", "Requests");

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartModelConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);
    assert_eq!(restored.pointer_throttle(), Duration::from_millis(40));
}

#[test]
fn minimal_json_uses_defaults() {
    let config = ChartModelConfig::from_json_str(r#"{ "viewport": { "width": 10, "height": 20 } }"#)
        .expect("deserialize");

    assert_eq!(config.x_scale_type, ScaleType::Linear);
    assert!(config.stacked);
    assert_eq!(config.pointer_throttle_ms, DEFAULT_POINTER_THROTTLE_MS);
    assert_eq!(config.hit_margin_px, DEFAULT_HIT_MARGIN_PX);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = ChartModelConfig::from_json_str("{ viewport: }").expect_err("malformed");
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn invalid_configs_are_rejected_at_build_time() {
    let build = |config: ChartModelConfig| {
        ChartModel::new(
            NullFocusHost::default(),
            Vec::new(),
            config,
            ChartFormatters::default(),
        )
        .err()
    };
    let viewport = Viewport::new(100, 100);

    assert!(matches!(
        build(ChartModelConfig::new(Viewport::new(0, 10))),
        Some(ChartError::InvalidViewport { .. })
    ));
    assert!(matches!(
        build(ChartModelConfig::new(viewport).with_y_scale_type(ScaleType::Categorical)),
        Some(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        build(
            ChartModelConfig::new(viewport)
                .with_y_scale_type(ScaleType::Log)
                .with_y_domain(0.0, 10.0)
        ),
        Some(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        build(ChartModelConfig::new(viewport).with_hit_margin_px(f64::NAN)),
        Some(ChartError::InvalidData(_))
    ));
    assert!(build(ChartModelConfig::new(viewport)).is_none());
}

#[test]
fn tick_labels_use_chart_formatters() {
    let config = ChartModelConfig::new(Viewport::new(400, 200)).with_y_domain(0.0, 100.0);
    let formatters = ChartFormatters::default().with_y_formatter(|value, _| format!("{value}ms"));
    let model = ChartModel::new(NullFocusHost::default(), Vec::new(), config, formatters)
        .expect("model");

    let labels = model.y_tick_labels();
    assert!(!labels.is_empty());
    assert!(labels.iter().all(|label| label.ends_with("ms")));
    assert_eq!(labels.first().map(String::as_str), Some("0ms"));
}
