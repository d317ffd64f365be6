use chrono::{DateTime, Utc};

use crate::domain::dates::parse_published;

pub const UNKNOWN_RECENCY_SCORE: f64 = 50.0;

/// Recency from a raw publication timestamp, relative to `now`.
pub fn recency_score(published_at: Option<&str>, now: DateTime<Utc>) -> f64 {
    let Some(raw) = published_at.filter(|raw| !raw.trim().is_empty()) else {
        return UNKNOWN_RECENCY_SCORE;
    };

    match parse_published(raw) {
        Some(published) => {
            let days = (now - published.with_timezone(&Utc)).num_days();
            recency_for_days(days)
        }
        None => {
            tracing::debug!(
                target: "scoring",
                published_at = raw,
                "unparseable publication date; using default recency"
            );
            UNKNOWN_RECENCY_SCORE
        }
    }
}

/// Step function over whole days since publication. Future dates count as fresh.
pub fn recency_for_days(days: i64) -> f64 {
    match days {
        i64::MIN..=1 => 100.0,
        2..=3 => 90.0,
        4..=7 => 80.0,
        8..=14 => 70.0,
        15..=30 => 60.0,
        31..=90 => 40.0,
        91..=180 => 30.0,
        181..=365 => 20.0,
        _ => 10.0,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn steps_follow_expected_tiers() {
        assert_eq!(recency_for_days(0), 100.0);
        assert_eq!(recency_for_days(1), 100.0);
        assert_eq!(recency_for_days(2), 90.0);
        assert_eq!(recency_for_days(7), 80.0);
        assert_eq!(recency_for_days(14), 70.0);
        assert_eq!(recency_for_days(30), 60.0);
        assert_eq!(recency_for_days(31), 40.0);
        assert_eq!(recency_for_days(180), 30.0);
        assert_eq!(recency_for_days(365), 20.0);
        assert_eq!(recency_for_days(366), 10.0);
    }

    #[test]
    fn scores_parsed_timestamps() {
        let five_days_ago = (now() - Duration::days(5)).to_rfc3339();
        assert_eq!(recency_score(Some(five_days_ago.as_str()), now()), 80.0);
        assert_eq!(recency_score(Some("2024-06-20"), now()), 70.0);
        assert_eq!(recency_score(Some("2020-01-01T00:00:00Z"), now()), 10.0);
    }

    #[test]
    fn future_dates_are_fresh() {
        assert_eq!(recency_score(Some("2030-01-01T00:00:00+02:00"), now()), 100.0);
    }

    #[test]
    fn missing_or_malformed_dates_default() {
        assert_eq!(recency_score(None, now()), UNKNOWN_RECENCY_SCORE);
        assert_eq!(recency_score(Some("   "), now()), UNKNOWN_RECENCY_SCORE);
        assert_eq!(recency_score(Some("last tuesday"), now()), UNKNOWN_RECENCY_SCORE);
    }
}
