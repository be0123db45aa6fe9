/// Mean of a summed column over `rows` rows, rounded half-up to a whole
/// number. Returns 0.0 when there are no rows.
pub fn rounded_mean(sum: u64, rows: u64) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    round_half_up(sum as f64 / rows as f64)
}

/// Rounds to the nearest whole number with halves rounded up (towards +inf).
///
/// Used for every whole-number display: the averages, completion rates and
/// the wage CAGR.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to a fixed number of decimal places, halves away from zero.
///
/// Used for the fixed-decimal displays: work rate and percent changes (1),
/// participation share (1), rolling averages and per-1000 figures (2). Only
/// negative halves round differently from [`round_half_up`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `part / total` as a percentage; 0.0 when `total` is zero.
pub fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// `part / total * 100` rounded half-up to a whole percentage; 0 when `total` is zero.
pub fn rounded_rate(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(pct(part, total)) as u32
}

/// Expresses `value` per `per` units of `base`, rounded to 2 decimals.
///
/// Returns `None` when `base` is zero or either input is NaN.
pub fn normalize_per(value: f64, base: f64, per: f64) -> Option<f64> {
    if base == 0.0 || base.is_nan() || value.is_nan() {
        return None;
    }
    Some(round_to(value / base * per, 2))
}

/// [`normalize_per`] with the customary base of 1000.
pub fn normalize_per_thousand(value: f64, base: f64) -> Option<f64> {
    normalize_per(value, base, 1000.0)
}

/// Percent change from `baseline` to `current`; `None` when the baseline is zero.
pub fn percent_change(current: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 || baseline.is_nan() || current.is_nan() {
        return None;
    }
    Some((current - baseline) / baseline * 100.0)
}
