use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parses a publication timestamp in any of the formats feeds hand us.
///
/// Offset-less values are taken as UTC. Returns `None` instead of failing so
/// callers can fall back to their "unknown date" default.
pub fn parse_published(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc().fixed_offset());
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed);
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
    })
}

/// Calendar day of the timestamp in its own offset.
pub fn published_date(raw: &str) -> Option<NaiveDate> {
    parse_published(raw).map(|parsed| parsed.date_naive())
}
