//! Date normalizers for the grammars the source sites use.
//!
//! Each supported site writes publish dates its own way: free-form
//! `2021年1月5日` tokens, dotted `2021.1.5`, slashed `2021/01/05`, or a full
//! timestamp string from a JSON API. None of the day-only grammars carry a
//! zone, so callers pass the zone the site implies and the date normalizes
//! to local midnight there.
//!
//! All parsers return `None` instead of an error when the text does not
//! match; callers decide whether that means "skip this item" or something
//! stricter.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

static KANJI_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)年\s*(\d+)月\s*(\d+)日").unwrap());
static DOTTED_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// Japan Standard Time, the implied zone for all currently supported sites.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn midnight(year: i32, month: u32, day: u32, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    zone.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

/// Parse a `YYYY年M月D日` date found anywhere in `text`.
pub fn parse_kanji_date(text: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let caps = KANJI_DATE.captures(text)?;
    midnight(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
        zone,
    )
}

/// Parse a dotted `Y.M.D` date found anywhere in `text`.
pub fn parse_dotted_date(text: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let caps = DOTTED_DATE.captures(text)?;
    midnight(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
        zone,
    )
}

/// Parse a slash-delimited `Y/M/D` date. The whole (trimmed) text must be
/// the date, nothing else.
pub fn parse_slashed_date(text: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y/%m/%d").ok()?;
    zone.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

/// Parse a full timestamp from a JSON API.
///
/// Accepts RFC 3339; zone-less `Y-m-d H:M:S` stamps are treated as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, fmt) {
            return FixedOffset::east_opt(0).unwrap().from_local_datetime(&naive).single();
        }
    }
    None
}
