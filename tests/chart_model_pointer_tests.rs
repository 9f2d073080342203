use std::rc::Rc;
use std::time::Duration;

use cartesian_chart::ChartModel;
use cartesian_chart::api::{
    ChartFormatters, ChartModelConfig, DefaultAction, PointerEvent, PointerLeaveEvent,
};
use cartesian_chart::core::{DataPoint, Rect, ScaleType, Series, SeriesId, Viewport};
use cartesian_chart::interaction::NullFocusHost;

// Column "a": Errors spans 0..1 (y px 300), Warnings 1..2 (y px 200).
// Column "b": Errors 0..2 (200), Warnings 2..3 (100). Columns sit at x 50/150/250.
fn stacked_series() -> Vec<Rc<Series>> {
    vec![
        Rc::new(Series::area(
            "Errors",
            vec![
                DataPoint::new("a", 1.0),
                DataPoint::new("b", 2.0),
                DataPoint::new("c", 3.0),
            ],
        )),
        Rc::new(Series::area(
            "Warnings",
            vec![
                DataPoint::new("a", 1.0),
                DataPoint::new("b", 1.0),
                DataPoint::new("c", 1.0),
            ],
        )),
    ]
}

fn build_model() -> ChartModel<NullFocusHost> {
    let config = ChartModelConfig::new(Viewport::new(300, 400))
        .with_x_scale_type(ScaleType::Categorical)
        .with_stacked(true);
    ChartModel::new(
        NullFocusHost::default(),
        stacked_series(),
        config,
        ChartFormatters::default(),
    )
    .expect("model init")
}

fn at(ms: u64, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(x, y, Duration::from_millis(ms))
}

#[test]
fn stacked_domain_and_points_follow_cumulative_values() {
    let model = build_model();
    let computed = model.computed();

    assert_eq!(computed.y_domain, vec![0.0, 4.0]);

    let plot = &computed.plot;
    let first = plot.point(plot.sx()[0][0]);
    assert_eq!(first.y0, 0.0);
    assert_eq!(first.y1, 1.0);
    let second = plot.point(plot.sx()[1][0]);
    assert_eq!(second.y0, 1.0);
    assert_eq!(second.y1, 2.0);
    assert!((second.scaled.y1 - 200.0).abs() <= 1e-9);
}

#[test]
fn pointer_near_point_highlights_that_point() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 52.0, 203.0));

    let state = model.interactions().get();
    let point = state.highlighted_point.expect("point highlighted");
    let plot = &model.computed().plot;
    assert_eq!(plot.point(point).index.series(), SeriesId(1));
    assert_eq!(state.highlighted_x, Some(0));
    assert_eq!(state.highlighted_series, Some(SeriesId(1)));
    assert_eq!(state.legend_series, Some(SeriesId(1)));
}

#[test]
fn pointer_away_from_points_highlights_whole_column() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 70.0, 200.0));

    let state = model.interactions().get();
    assert_eq!(state.highlighted_x, Some(0));
    assert_eq!(state.highlighted_point, None);
    assert_eq!(state.highlighted_series, None);
    assert_eq!(
        model.interactions().highlighted_column().map(<[_]>::len),
        Some(model.series().len())
    );
}

#[test]
fn throttled_move_fires_on_tick() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 50.0, 300.0));
    model.on_svg_mouse_move(at(10, 150.0, 100.0));
    assert_eq!(model.interactions().get().highlighted_x, Some(0));

    model.tick(Duration::from_millis(20));
    assert_eq!(model.interactions().get().highlighted_x, Some(0));

    model.tick(Duration::from_millis(30));
    let state = model.interactions().get();
    assert_eq!(state.highlighted_x, Some(1));
    assert_eq!(state.highlighted_series, Some(SeriesId(1)));
}

#[test]
fn leaving_the_plot_cancels_pending_move() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 50.0, 300.0));
    model.on_svg_mouse_move(at(10, 150.0, 100.0));
    model.on_svg_mouse_out(PointerLeaveEvent {
        target_inside_plot: true,
        target_inside_popover: false,
    });

    model.tick(Duration::from_millis(100));
    assert_eq!(model.interactions().get().highlighted_x, Some(0));
}

#[test]
fn leaving_to_outside_clears_highlight_and_legend() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 50.0, 300.0));
    model.on_svg_mouse_out(PointerLeaveEvent::default());

    let state = model.interactions().get();
    assert!(!state.has_highlight());
    assert_eq!(state.legend_series, None);
}

#[test]
fn leaving_onto_popover_or_while_pinned_keeps_highlight() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 50.0, 300.0));
    model.on_svg_mouse_out(PointerLeaveEvent {
        target_inside_plot: false,
        target_inside_popover: true,
    });
    assert!(model.interactions().get().has_highlight());

    assert_eq!(model.on_svg_mouse_down(), DefaultAction::Prevent);
    model.on_svg_mouse_out(PointerLeaveEvent::default());
    assert!(model.interactions().get().has_highlight());
}

#[test]
fn pinned_popover_freezes_pointer_highlight() {
    let mut model = build_model();
    model.on_svg_mouse_move(at(0, 50.0, 300.0));
    let _ = model.on_svg_mouse_down();
    assert!(model.interactions().get().is_popover_pinned);

    model.on_svg_mouse_move(at(100, 250.0, 100.0));
    assert_eq!(model.interactions().get().highlighted_x, Some(0));

    let _ = model.on_svg_mouse_down();
    assert!(!model.interactions().get().is_popover_pinned);
}

#[test]
fn pointer_inside_popover_dead_zone_is_ignored() {
    let mut model = build_model();
    model.set_popover_bounds(Some(Rect::new(140.0, 90.0, 40.0, 40.0)));

    model.on_svg_mouse_move(at(0, 136.0, 100.0));
    assert!(!model.interactions().get().has_highlight());

    model.on_svg_mouse_move(at(100, 184.0, 134.0));
    assert!(!model.interactions().get().has_highlight());

    model.on_svg_mouse_move(at(200, 150.0, 140.0));
    assert_eq!(model.interactions().get().highlighted_x, Some(1));
}

#[test]
fn empty_chart_ignores_pointer_moves() {
    let config = ChartModelConfig::new(Viewport::new(300, 400));
    let mut model = ChartModel::new(
        NullFocusHost::default(),
        Vec::new(),
        config,
        ChartFormatters::default(),
    )
    .expect("model init");

    model.on_svg_mouse_move(at(0, 10.0, 10.0));
    assert!(!model.interactions().get().has_highlight());
    assert!(model.computed().plot.is_empty());
}

#[test]
fn pointer_leave_clear_does_not_move_keyboard_focus() {
    use cartesian_chart::api::FocusTrigger;

    let mut model = build_model();
    model.on_svg_focus(FocusTrigger::Keyboard);
    assert!(model.is_application_focused());
    let requests = model.host().focus_requests.clone();

    model.on_svg_mouse_out(PointerLeaveEvent::default());

    assert!(!model.interactions().get().has_highlight());
    assert_eq!(model.host().focus_requests, requests);
    assert!(!model.is_application_focused());
    assert!(model.application_node().aria_hidden);
}
