use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Truncate an epoch timestamp (seconds) to day granularity, `YYYY-MM-DD`.
pub fn epoch_to_date(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse the day out of a `YYYY-MM-DD` value. Date-prefixed strings (full
/// ISO timestamps from some scrapers) are truncated to their day prefix.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    let prefix: String = value.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d")
        .map_err(|err| anyhow::anyhow!("invalid date {:?}: {}", value, err))
}

/// Combine a `YYYY-MM-DD` date and an optional `HH:MM` time into epoch
/// seconds (UTC). A missing or unparsable time falls back to 19:00, the
/// customary door time in the source listings.
pub fn parse_start_time(date: &str, time: Option<&str>) -> anyhow::Result<i64> {
    let day = parse_date(date)?;
    let at = time
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| {
            NaiveTime::parse_from_str(value, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
                .ok()
        })
        .unwrap_or_else(default_start_time);
    Ok(day.and_time(at).and_utc().timestamp())
}

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).expect("literal time")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_truncates_to_day() {
        // 2025-08-20T23:30:00Z
        assert_eq!(epoch_to_date(1755732600), "2025-08-20");
    }

    #[test]
    fn start_time_defaults_to_evening() {
        let with_time = parse_start_time("2025-08-20", Some("20:00")).unwrap();
        let without = parse_start_time("2025-08-20", None).unwrap();
        assert_eq!(with_time - without, 3600);
    }

    #[test]
    fn date_prefixed_strings_are_accepted() {
        let from_prefix = parse_start_time("2025-08-20T19:00:00Z", None).unwrap();
        let from_plain = parse_start_time("2025-08-20", None).unwrap();
        assert_eq!(from_prefix, from_plain);
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(parse_start_time("soon", None).is_err());
    }
}
