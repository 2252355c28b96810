//! Text helpers shared by the mapping layer and the templates.

use chrono::{DateTime, NaiveDate};

/// Reading speed used for read-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Replace every `<...>` tag with a space.
///
/// Good enough for word counting; this is not a sanitizer.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Number of whitespace-separated words, ignoring markup.
pub fn word_count(text: &str) -> usize {
    strip_tags(text).split_whitespace().count()
}

/// Estimated reading time in minutes: `ceil(words / 200)`, never below one.
pub fn read_minutes(text: &str) -> u32 {
    let minutes = word_count(text).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Parse a CMS timestamp (RFC 3339) or bare date (`YYYY-MM-DD`) into
/// milliseconds since the epoch.
pub fn timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Format a CMS timestamp as a long English date, e.g. `March 5, 2025`.
pub fn long_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.format("%B %-d, %Y").to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%B %-d, %Y").to_string())
}

/// Turn a slug such as `latest-news` into `Latest News`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
