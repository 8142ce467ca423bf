use crate::PairwatchError;

/// Rolling Relative Strength Index using simple (not Wilder) moving averages.
///
/// `delta[i] = x[i] - x[i-1]` is split into gain and loss; their plain means over the
/// trailing `period` deltas ending at `i` give `RS = avg_gain / avg_loss` and
/// `RSI = 100 - 100 / (1 + RS)`.
///
/// - `None` for `i < period`.
/// - A delta with a missing endpoint counts as neither gain nor loss, so gaps in
///   the ratio do not blank the windows around them.
/// - No losses but some gains pins the value at 100.
/// - No movement at all (both averages zero) yields `None`.
///
/// Defined values always lie in `[0, 100]`.
///
/// # Errors
/// Returns `PairwatchError::InvalidParameter` if `period` is 0.
pub fn rolling_rsi(
    values: &[Option<f64>],
    period: usize,
) -> Result<Vec<Option<f64>>, PairwatchError> {
    if period < 1 {
        return Err(PairwatchError::invalid_parameter("rsi_period", period));
    }
    let n = values.len();
    let mut out = vec![None; n];

    // moves[0] has no predecessor and is never part of a window.
    let moves: Vec<(f64, f64)> = (0..n)
        .map(|i| match (i.checked_sub(1).and_then(|p| values[p]), values[i]) {
            (Some(prev), Some(cur)) => {
                let delta = cur - prev;
                (delta.max(0.0), (-delta).max(0.0))
            }
            _ => (0.0, 0.0),
        })
        .collect();

    for end in period..n {
        out[end] = rsi_of_window(&moves[end + 1 - period..=end]);
    }
    Ok(out)
}

fn rsi_of_window(win: &[(f64, f64)]) -> Option<f64> {
    let (gains, losses) = win
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &(mg, ml)| (g + mg, l + ml));
    let n = win.len() as f64;
    rsi_from_averages(gains / n, losses / n)
}

/// RSI from average gain and average loss.
///
/// Returns 100 when there are gains but no losses and `None` when both are zero.
#[must_use]
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then(|| rsi.clamp(0.0, 100.0))
}
