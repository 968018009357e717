//! Display formatting for figures shown in the form.

const CURRENCY: &str = "CHF";
const GROUP_SEPARATOR: char = '\u{2019}';

/// Whole francs with Swiss digit grouping: `CHF 1’250’000`, `CHF-75’000`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return format!("{} {}", CURRENCY, value);
    }
    let grouped = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("{}-{}", CURRENCY, grouped)
    } else {
        format!("{} {}", CURRENCY, grouped)
    }
}

/// One fractional digit followed by `%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Customer counts are shown as whole numbers.
pub fn format_count(value: f64) -> String {
    format!("{:.0}", value.round())
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
