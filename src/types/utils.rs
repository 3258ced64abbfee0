//! Shared formatting helpers.
//!
//! - `format_currency` - Dollar amounts with thousands separators, no decimals
//! - `round_to` - Half-away-from-zero rounding, matching SQLite's `ROUND`
//! - `format_optional` - Fixed-decimal rendering with an `n/a` sentinel

/// Format an amount as whole dollars with thousands separators.
///
/// `65250.4` becomes `$65,250`; negative amounts keep their sign.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Round to `decimals` places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Render an optional metric with fixed decimals, or `n/a` when absent.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "n/a".to_string(),
    }
}
