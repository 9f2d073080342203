use std::rc::Rc;
use std::time::Duration;

use cartesian_chart::ChartModel;
use cartesian_chart::api::{ChartFormatters, ChartModelConfig, FocusTrigger, Key};
use cartesian_chart::core::{DataPoint, ScaleType, Series, Viewport};
use cartesian_chart::interaction::{FocusTarget, InteractionState, NullFocusHost};

fn build_model() -> ChartModel<NullFocusHost> {
    let series = vec![
        Rc::new(Series::line(
            "Latency",
            vec![DataPoint::new("a", 4.0), DataPoint::new("b", 6.0)],
        )),
        Rc::new(Series::line(
            "Throughput",
            vec![DataPoint::new("a", 2.0), DataPoint::new("b", 3.0)],
        )),
    ];
    let config = ChartModelConfig::new(Viewport::new(200, 100))
        .with_x_scale_type(ScaleType::Categorical)
        .with_stacked(false);
    ChartModel::new(
        NullFocusHost::default(),
        series,
        config,
        ChartFormatters::default(),
    )
    .expect("model init")
}

fn focused_and_pinned() -> ChartModel<NullFocusHost> {
    let mut model = build_model();
    model.on_svg_focus(FocusTrigger::Keyboard);
    let _ = model.on_svg_key_down(Key::Enter);
    model
}

#[test]
fn dismiss_returns_focus_to_application_on_next_tick() {
    let mut model = focused_and_pinned();
    model.on_svg_blur();
    let requests = model.host().focus_requests.len();

    model.on_popover_dismiss(false);
    assert!(!model.interactions().get().is_popover_pinned);
    assert!(model.has_pending_focus_return());
    assert_eq!(model.host().focus_requests.len(), requests);

    model.tick(Duration::from_millis(1));
    assert!(!model.has_pending_focus_return());
    assert_eq!(model.host().last_focus(), Some(FocusTarget::Application));
    assert!(model.is_application_focused());
}

#[test]
fn focus_return_reads_state_at_fire_time() {
    let mut model = focused_and_pinned();
    model.on_svg_blur();
    model.on_popover_dismiss(false);

    // Highlight cleared between dismissal and the deferred callback.
    let _ = model.on_document_key_down(Key::Escape);
    model.tick(Duration::from_millis(1));

    assert_eq!(model.host().last_focus(), Some(FocusTarget::Plot));
    assert!(!model.is_application_focused());
    assert_eq!(model.plot_tab_index(), 0);
}

#[test]
fn outside_click_dismissal_does_not_move_focus() {
    let mut model = focused_and_pinned();
    model.on_svg_blur();
    let requests = model.host().focus_requests.clone();

    model.on_popover_dismiss(true);
    assert!(!model.has_pending_focus_return());
    model.tick(Duration::from_millis(1));

    assert_eq!(model.host().focus_requests, requests);
    assert!(model.interactions().get().has_highlight());
}

#[test]
fn container_blur_resets_everything() {
    let mut model = focused_and_pinned();
    model.on_popover_dismiss(false);
    let _ = model.on_svg_key_down(Key::Enter);

    model.on_container_blur();

    assert_eq!(model.interactions().get(), InteractionState::default());
    assert!(!model.has_pending_focus_return());
    assert!(!model.is_application_focused());
    assert!(model.application_node().aria_hidden);
}

#[test]
fn active_element_mirrors_pin_state() {
    let mut model = build_model();
    model.on_svg_focus(FocusTrigger::Keyboard);
    assert_eq!(
        model.application_node().attributes.get("aria-expanded"),
        Some("false")
    );

    let _ = model.on_svg_key_down(Key::Enter);
    assert_eq!(
        model.application_node().attributes.get("aria-expanded"),
        Some("true")
    );
    assert_eq!(model.host().reattach_count, 1);
}
