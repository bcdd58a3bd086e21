//! Normalisation of upstream numbers and sizes.

use crate::types::UNKNOWN_SIZE;

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 units, at most two decimals.
///
/// Picks the largest unit (up to TB) whose scaled value is at least 1.
/// Trailing zeros are dropped: `1536` → `"1.5 KB"`, `1073741824` → `"1 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Parse a seed/leech count the lenient way upstream pages need.
///
/// Takes the leading run of digits after trimming, skipping thousands
/// separators (`"1,204"` → 1204). Anything without leading digits is 0.
pub fn parse_count(text: &str) -> u64 {
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for c in text.trim().trim_start_matches('+').chars() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                value = value.saturating_mul(10).saturating_add(u64::from(c as u8 - b'0'));
            }
            ',' if seen_digit => {}
            _ => break,
        }
    }
    value
}

/// `text` if non-empty, otherwise [`UNKNOWN_SIZE`].
pub fn size_or_unknown(text: String) -> String {
    if text.is_empty() {
        UNKNOWN_SIZE.to_string()
    } else {
        text
    }
}

/// Resolve a possibly relative `href` against `base`.
///
/// Returns `None` when neither the href nor the joined URL is valid.
pub fn absolute_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if let Ok(url) = url::Url::parse(href) {
        return Some(url.to_string());
    }
    url::Url::parse(base)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}
