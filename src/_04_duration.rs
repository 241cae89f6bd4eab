use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_HOURS: Regex = Regex::new(r"(\d+)\s*(?:小时|hours?)").unwrap();
    static ref RE_MINUTES: Regex = Regex::new(r"(\d+)\s*(?:分钟|分|minutes?|min)").unwrap();
}

/// Convert a localized duration string ("5小时12分", "5 hours 12 minutes")
/// into minutes. Total over all inputs: absent or unparseable components
/// count as zero, nothing ever fails.
pub fn duration_to_minutes(duration: &str) -> u32 {
    let hours = captured_number(&RE_HOURS, duration);
    let minutes = captured_number(&RE_MINUTES, duration);
    hours.saturating_mul(60).saturating_add(minutes)
}

fn captured_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
