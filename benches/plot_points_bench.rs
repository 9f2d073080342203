use std::rc::Rc;
use std::time::Duration;

use cartesian_chart::ChartModel;
use cartesian_chart::api::{ChartFormatters, ChartModelConfig, PointerEvent};
use cartesian_chart::core::{
    ChartScale, DataPoint, NumericChartScale, ScaleType, Series, Viewport, compute_plot_points,
    compute_x_domain, compute_y_domain,
};
use cartesian_chart::interaction::NullFocusHost;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_series(series: usize, columns: usize) -> Vec<Rc<Series>> {
    (0..series)
        .map(|s| {
            Rc::new(Series::area(
                format!("series {s}"),
                (0..columns)
                    .map(|x| {
                        let t = x as f64;
                        DataPoint::new(t, 10.0 + ((t + s as f64) * 0.37).sin().abs() * 50.0)
                    })
                    .collect(),
            ))
        })
        .collect()
}

fn bench_compute_plot_points_8x2k(c: &mut Criterion) {
    let series = generated_series(8, 2_000);
    let x_scale = ChartScale::new(
        ScaleType::Linear,
        compute_x_domain(&series, ScaleType::Linear),
        (0.0, 1920.0),
    );
    let y_domain = compute_y_domain(&series, ScaleType::Linear, true);
    let y_scale =
        NumericChartScale::new(ScaleType::Linear, &y_domain, (1080.0, 0.0)).expect("valid scale");

    c.bench_function("compute_plot_points_8x2k", |b| {
        b.iter(|| {
            let plot = compute_plot_points(black_box(&series), &x_scale, y_scale, true);
            black_box(plot.column_count());
        })
    });
}

fn bench_pointer_hit_test(c: &mut Criterion) {
    let config = ChartModelConfig::new(Viewport::new(1920, 1080));
    let mut model = ChartModel::new(
        NullFocusHost::default(),
        generated_series(8, 2_000),
        config,
        ChartFormatters::default(),
    )
    .expect("valid model");
    let mut now = Duration::ZERO;

    c.bench_function("pointer_hit_test_8x2k", |b| {
        b.iter(|| {
            now += Duration::from_millis(30);
            let x = (now.as_millis() % 1920) as f64;
            model.on_svg_mouse_move(PointerEvent::new(black_box(x), 540.0, now));
            black_box(model.interactions().get());
        })
    });
}

criterion_group!(benches, bench_compute_plot_points_8x2k, bench_pointer_hit_test);
criterion_main!(benches);
