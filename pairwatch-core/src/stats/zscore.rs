use crate::PairwatchError;

/// Rolling Z-Score over a trailing window.
///
/// For each index `i >= window - 1` the mean and sample standard deviation (n-1
/// denominator) of the `window` values ending at `i` are computed, and
/// `z[i] = (x[i] - mean) / std`.
///
/// The result is `None` where there is not yet a full window, where any value in the
/// window is missing, and where the window is flat. A window of 1 has no sample
/// deviation, so every entry is `None`.
///
/// # Errors
/// Returns `PairwatchError::InvalidParameter` if `window` is 0.
pub fn rolling_zscore(
    values: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, PairwatchError> {
    if window < 1 {
        return Err(PairwatchError::invalid_parameter("zscore_window", window));
    }
    let mut out = vec![None; values.len()];
    if window < 2 {
        return Ok(out);
    }
    for end in (window - 1)..values.len() {
        out[end] = zscore_of_window(&values[end + 1 - window..=end]);
    }
    Ok(out)
}

fn zscore_of_window(win: &[Option<f64>]) -> Option<f64> {
    let last = (*win.last()?)?;

    let mut sum = 0.0;
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in win {
        let v = (*v)?;
        sum += v;
        lo = lo.min(v);
        hi = hi.max(v);
    }
    // Flat windows would otherwise yield rounding noise instead of exactly zero spread.
    if lo == hi {
        return None;
    }

    let n = win.len() as f64;
    let mean = sum / n;
    let var = win
        .iter()
        .flatten()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / (n - 1.0);
    let std = var.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }
    Some((last - mean) / std).filter(|z| z.is_finite())
}
