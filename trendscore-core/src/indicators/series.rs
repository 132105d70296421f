//! Index-aligned numeric series helpers.
//!
//! Every function returns a `Vec<f64>` of the same length as its input. Positions
//! where the lookback window is not yet full, or where the window touches an
//! undefined input, are `f64::NAN`.

use crate::domain::Bar;

/// Extract one field from every bar.
pub fn column(bars: &[Bar], field: impl Fn(&Bar) -> f64) -> Vec<f64> {
    bars.iter().map(field).collect()
}

pub fn closes(bars: &[Bar]) -> Vec<f64> {
    column(bars, |b| b.close)
}

pub fn highs(bars: &[Bar]) -> Vec<f64> {
    column(bars, |b| b.high)
}

pub fn lows(bars: &[Bar]) -> Vec<f64> {
    column(bars, |b| b.low)
}

pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    column(bars, |b| b.volume)
}

/// Apply `reduce` to each full window of `values`, NaN if any element is NaN.
fn rolling(values: &[f64], window: usize, reduce: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = reduce(slice);
    }

    result
}

/// Simple moving average over `window`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Highest value over `window`.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Lowest value over `window`.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Unadjusted exponentially weighted mean with alpha = 2 / (span + 1).
///
/// Seeded with the first value (no SMA warmup), so every position is defined.
/// A NaN input taints the remainder of the series.
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    result[0] = prev;

    for i in 1..n {
        if values[i].is_nan() || prev.is_nan() {
            return result;
        }
        // prev + alpha * (x - prev) keeps a flat input exactly flat
        prev += alpha * (values[i] - prev);
        result[i] = prev;
    }

    result
}

/// `values[i] - values[i - lag]`.
pub fn diff(values: &[f64], lag: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in lag..n {
        result[i] = values[i] - values[i - lag];
    }
    result
}

/// `values[i - lag]`: moves the series `lag` positions later.
pub fn shift(values: &[f64], lag: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in lag..n {
        result[i] = values[i - lag];
    }
    result
}

/// Running sum that steps over undefined terms.
///
/// An undefined input leaves its own position undefined but does not reset
/// or poison the total carried to later positions.
pub fn cumsum_skip_nan(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                f64::NAN
            } else {
                total += v;
                total
            }
        })
        .collect()
}

/// The last two values of a series, `(previous, latest)`.
pub fn last_two(values: &[f64]) -> Option<(f64, f64)> {
    match values {
        [.., prev, last] => Some((*prev, *last)),
        _ => None,
    }
}
