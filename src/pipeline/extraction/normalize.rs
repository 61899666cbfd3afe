/// Normalize report text for pattern matching: lower-case, the micro sign
/// folded to Greek mu, every whitespace run collapsed to one space.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .replace('\u{00b5}', "\u{03bc}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a captured number, accepting thousands separators ("7,500", "2,50,000").
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let value = cleaned.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}
