//! Currency rounding and Indian-rupee display helpers.
//!
//! Every monetary value leaving the engine goes through [`round_to_cents`], so
//! the whole crate shares one rounding policy: half away from zero.

/// Round a currency amount to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an amount as whole rupees with lakh/crore grouping, e.g. `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}₹{}", group_indian(&digits))
}

/// Format a number with Indian digit grouping and at most two decimals.
pub fn format_indian_number(value: f64) -> String {
    let rounded = round_to_cents(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{sign}{}", group_indian(whole))
    } else {
        format!("{sign}{}.{fraction}", group_indian(whole))
    }
}

// Last three digits form one group, everything before groups in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
