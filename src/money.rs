/// Formats an amount with zero decimals, thousands separators and the currency
/// suffix, e.g. `3,600€` or `-640€`.
pub fn format_money(value: f64, currency: &str) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}{currency}", format_grouped(rounded.abs()))
}

/// Integer part of `value` with a comma every three digits.
pub fn format_grouped(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());

    digits
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect::<String>()
}

pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}
