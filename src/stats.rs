// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Descriptive statistics over small in-memory samples.
//!
//! Undefined results are reported as `NaN` and rendered as `nan` by
//! [`format_decimal`].

/// Arithmetic mean; `NaN` for an empty sample.
pub fn mean(values: &[f64],) -> f64
{
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64,>() / values.len() as f64
}

/// Pearson correlation of two equally long samples.
///
/// Returns `NaN` for fewer than two pairs or when either sample has zero
/// variance.
pub fn pearson(xs: &[f64], ys: &[f64],) -> f64
{
    let n = xs.len().min(ys.len(),);
    if n < 2 {
        return f64::NAN;
    }

    let (xs, ys,) = (&xs[..n], &ys[..n],);
    let (mean_x, mean_y,) = (mean(xs,), mean(ys,),);
    let (mut sxy, mut sxx, mut syy,) = (0.0, 0.0, 0.0,);
    for (x, y,) in xs.iter().zip(ys,) {
        let (dx, dy,) = (x - mean_x, y - mean_y,);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0,)
}

/// Least-squares slope of `ys` regressed on `xs` with an intercept.
///
/// Returns `NaN` for an empty sample and `0.0` when `xs` is constant.
pub fn ols_slope(xs: &[f64], ys: &[f64],) -> f64
{
    let n = xs.len().min(ys.len(),);
    if n == 0 {
        return f64::NAN;
    }

    let (xs, ys,) = (&xs[..n], &ys[..n],);
    let (mean_x, mean_y,) = (mean(xs,), mean(ys,),);
    let (mut sxy, mut sxx,) = (0.0, 0.0,);
    for (x, y,) in xs.iter().zip(ys,) {
        let dx = x - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    if sxx == 0.0 { 0.0 } else { sxy / sxx }
}

/// Formats a statistic with three decimals, `nan` when undefined.
///
/// # Examples
///
/// ```
/// use ghcensus::format_decimal;
///
/// assert_eq!(format_decimal(0.12345,), "0.123");
/// assert_eq!(format_decimal(f64::NAN,), "nan");
/// ```
pub fn format_decimal(value: f64,) -> String
{
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_owned() } else { "-inf".to_owned() };
    }
    format!("{value:.3}")
}
