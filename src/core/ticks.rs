pub const X_TICK_TARGET_SPACING_PX: f64 = 100.0;
pub const Y_TICK_TARGET_SPACING_PX: f64 = 40.0;
pub const MIN_TICKS: usize = 2;
pub const MAX_TICKS: usize = 12;

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

const TIME_TICK_INTERVALS_MS: [f64; 17] = [
    MILLIS_PER_SECOND,
    5.0 * MILLIS_PER_SECOND,
    15.0 * MILLIS_PER_SECOND,
    30.0 * MILLIS_PER_SECOND,
    MILLIS_PER_MINUTE,
    5.0 * MILLIS_PER_MINUTE,
    15.0 * MILLIS_PER_MINUTE,
    30.0 * MILLIS_PER_MINUTE,
    MILLIS_PER_HOUR,
    3.0 * MILLIS_PER_HOUR,
    6.0 * MILLIS_PER_HOUR,
    12.0 * MILLIS_PER_HOUR,
    MILLIS_PER_DAY,
    2.0 * MILLIS_PER_DAY,
    7.0 * MILLIS_PER_DAY,
    30.0 * MILLIS_PER_DAY,
    365.0 * MILLIS_PER_DAY,
];

/// Number of ticks an axis of `axis_span_px` pixels should aim for.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

#[must_use]
pub fn x_tick_count(width_px: f64) -> usize {
    axis_tick_target_count(width_px, X_TICK_TARGET_SPACING_PX, MIN_TICKS, MAX_TICKS)
}

#[must_use]
pub fn y_tick_count(height_px: f64) -> usize {
    axis_tick_target_count(height_px, Y_TICK_TARGET_SPACING_PX, MIN_TICKS, MAX_TICKS)
}

/// Round-number ticks (1, 2 or 5 times a power of ten) covering `[start, stop]`.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (low, high) = if start < stop {
        (start, stop)
    } else {
        (stop, start)
    };

    let step = (high - low) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Negative powers divide by the inverse step to keep decimals exact.
    let ticks: Vec<f64> = if power < 0.0 {
        let inverse = 10_f64.powf(-power) / factor;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    } else {
        let increment = factor * 10_f64.powf(power);
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    };

    if start > stop {
        ticks.into_iter().rev().collect()
    } else {
        ticks
    }
}

/// Powers of ten inside the domain, falling back to linear ticks when the
/// domain spans less than two decades.
#[must_use]
pub fn log_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start <= 0.0 || stop <= 0.0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let (low, high) = if start < stop {
        (start, stop)
    } else {
        (stop, start)
    };

    let first = (low.log10() - 1e-9).ceil() as i32;
    let last = (high.log10() + 1e-9).floor() as i32;
    if last - first + 1 < 2 {
        return linear_ticks(low, high, count);
    }

    let decades = (last - first + 1) as usize;
    let stride = decades.div_ceil(count.max(1)).max(1);
    (first..=last)
        .step_by(stride)
        .map(|exponent| 10_f64.powi(exponent))
        .collect()
}

/// Ticks at a calendar-friendly interval (epoch milliseconds in and out).
#[must_use]
pub fn time_ticks(start_ms: f64, stop_ms: f64, count: usize) -> Vec<f64> {
    if !start_ms.is_finite() || !stop_ms.is_finite() || count == 0 {
        return Vec::new();
    }
    let (low, high) = if start_ms <= stop_ms {
        (start_ms, stop_ms)
    } else {
        (stop_ms, start_ms)
    };
    if low == high {
        return vec![low];
    }

    let target = (high - low) / count as f64;
    let interval = TIME_TICK_INTERVALS_MS
        .iter()
        .copied()
        .find(|interval| *interval >= target);
    let Some(interval) = interval else {
        // Longer than a year per tick: round-number years.
        let years = linear_ticks(0.0, target / (365.0 * MILLIS_PER_DAY), 1);
        let step_years = years.last().copied().unwrap_or(1.0).max(1.0);
        return stepped(low, high, step_years * 365.0 * MILLIS_PER_DAY);
    };

    stepped(low, high, interval)
}

fn stepped(low: f64, high: f64, interval: f64) -> Vec<f64> {
    let first = (low / interval).ceil() as i64;
    let last = (high / interval).floor() as i64;
    (first..=last).map(|i| i as f64 * interval).collect()
}

/// Keeps every n-th category so at most `count` labels remain.
#[must_use]
pub fn categorical_stride(len: usize, count: usize) -> usize {
    if count == 0 || len <= count {
        1
    } else {
        len.div_ceil(count)
    }
}
