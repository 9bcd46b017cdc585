//! Display formatting for metric values and budgets.

use campaign_core::config::DisplayConfig;
use campaign_core::{Metric, MetricType};

const MAX_FRACTION_DIGITS: usize = 3;

/// Render a metric value: percentages with fixed decimals and a `%` suffix,
/// everything else grouped with up to three fraction digits.
pub fn format_metric_value(metric: &Metric, display: &DisplayConfig) -> String {
    match metric.metric_type {
        MetricType::Percentage => format!(
            "{}%",
            format_number(metric.value, display.percentage_decimals, false, display)
        ),
        MetricType::Sum | MetricType::Average => {
            format_number(metric.value, MAX_FRACTION_DIGITS, true, display)
        }
    }
}

/// Render an amount of money, e.g. `R$ 1.234,50`.
pub fn format_currency(amount: f64, display: &DisplayConfig) -> String {
    format!(
        "{} {}",
        display.currency_symbol,
        format_number(amount, 2, false, display)
    )
}

fn format_number(value: f64, decimals: usize, trim_zeros: bool, display: &DisplayConfig) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rendered.as_str(), ""),
    };
    let frac_part = if trim_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.chars().all(|c| c == '0');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &display.thousands_separator));
    if !frac_part.is_empty() {
        out.push_str(&display.decimal_separator);
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
