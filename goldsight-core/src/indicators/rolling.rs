//! Shared rolling-window kernels over optional series.
//!
//! Every indicator column is a `Vec<Option<f64>>` aligned with the bars:
//! `None` marks warm-up or degenerate arithmetic and propagates through any
//! operation that consumes it. A rolling window produces a value only when
//! every entry in the window is defined.

/// Trailing mean over `window` entries. `None` until the window is full of
/// defined values.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        Some(w.iter().sum::<f64>() / w.len() as f64)
    })
}

/// Trailing sum over `window` entries.
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| Some(w.iter().sum()))
}

/// Trailing sample standard deviation (ddof = 1) over `window` entries.
/// A window of one value has no dispersion estimate and stays `None`.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| {
        if w.len() < 2 {
            return None;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let var = w.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (w.len() - 1) as f64;
        Some(var.sqrt())
    })
}

/// Trailing minimum over `window` entries.
pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.iter().copied().reduce(f64::min))
}

/// Trailing maximum over `window` entries.
pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.iter().copied().reduce(f64::max))
}

/// Unadjusted recursive EMA over an optional series.
///
/// alpha = 2 / (period + 1). The seed is the SMA of the first `period`
/// consecutive defined values; from there EMA[t] = alpha * x[t] +
/// (1 - alpha) * EMA[t-1]. A later undefined input taints the remainder of
/// the output. This one kernel is the EMA definition for the whole crate
/// (close EMAs and the MACD signal line alike).
pub fn ema_of_options(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    // First run of `period` consecutive defined values seeds the recursion.
    let seed_start = match find_defined_run(values, period) {
        Some(s) => s,
        None => return result,
    };
    let seed_end = seed_start + period;
    let seed = values[seed_start..seed_end]
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .sum::<f64>()
        / period as f64;
    result[seed_end - 1] = Some(seed);

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = seed;
    for i in seed_end..n {
        match values[i] {
            Some(x) => {
                let ema = alpha * x + (1.0 - alpha) * prev;
                result[i] = Some(ema);
                prev = ema;
            }
            None => return result,
        }
    }
    result
}

/// Wrap a fully-defined slice into the optional representation.
pub fn from_values(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&v| Some(v)).collect()
}

/// Element-wise subtraction with undefined propagation.
pub fn sub(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect()
}

fn rolling_apply<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 || n < window {
        return result;
    }
    let mut buf = Vec::with_capacity(window);
    for i in (window - 1)..n {
        buf.clear();
        let start = i + 1 - window;
        let mut complete = true;
        for v in &values[start..=i] {
            match v {
                Some(x) => buf.push(*x),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            result[i] = f(&buf);
        }
    }
    result
}

fn find_defined_run(values: &[Option<f64>], len: usize) -> Option<usize> {
    let mut run = 0usize;
    for (i, v) in values.iter().enumerate() {
        if v.is_some() {
            run += 1;
            if run == len {
                return Some(i + 1 - len);
            }
        } else {
            run = 0;
        }
    }
    None
}
