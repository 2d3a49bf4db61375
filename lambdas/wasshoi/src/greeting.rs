pub(crate) const PROMPT: &str = "わっしょい! したくないのですか ... ?";
pub(crate) const QUIET: &str = "お静かに";
pub(crate) const CHANT: &str = "わっしょい!!";

/// Upper bound (exclusive) on chants before asking for quiet.
const MAX_CHANTS: i64 = 10;

/// Reads the count the way a browser coerces a query value to a number:
/// missing or blank is zero, positive halves round up, anything else is not a count.
pub(crate) fn parse_count(raw: Option<&str>) -> Option<i64> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Some(0);
    }

    let number = raw.parse::<f64>().ok()?;
    if !number.is_finite() {
        return None;
    }
    Some(number.round() as i64)
}

pub(crate) fn greeting(count: Option<i64>) -> String {
    match count {
        Some(n) if n >= MAX_CHANTS => QUIET.to_string(),
        Some(n) if n > 0 => vec![CHANT; n as usize].join(" "),
        _ => PROMPT.to_string(),
    }
}
