use chrono::{DateTime, NaiveDate, Utc};

/// Long calendar form, e.g. "June 1, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Distance between `then` and `now` in words, e.g. "3 days ago" or "in about 2 hours".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let words = distance_in_words(seconds.unsigned_abs());
    if seconds >= 0 {
        format!("{} ago", words)
    } else {
        format!("in {}", words)
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

fn distance_in_words(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let minutes = (seconds + MINUTE / 2) / MINUTE;
    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 45 * MINUTE => plural(minutes.max(1), "minute"),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {}", plural((s + HOUR / 2) / HOUR, "hour")),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => plural((s + DAY / 2) / DAY, "day"),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < 60 * DAY => "about 2 months".to_string(),
        s if s < YEAR => plural((s + MONTH / 2) / MONTH, "month"),
        s => {
            let years = s / YEAR;
            let rest = s % YEAR;
            if rest < 3 * MONTH {
                format!("about {}", plural(years, "year"))
            } else if rest < 9 * MONTH {
                format!("over {}", plural(years, "year"))
            } else {
                format!("almost {}", plural(years + 1, "year"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_date(date), "June 1, 2024");
    }

    #[test]
    fn test_relative_past() {
        let now = now();
        assert_eq!(format_relative(now - Duration::seconds(10), now), "less than a minute ago");
        assert_eq!(format_relative(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(1), now), "about 1 hour ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "about 3 hours ago");
        assert_eq!(format_relative(now - Duration::hours(30), now), "1 day ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_relative(now - Duration::days(100), now), "3 months ago");
    }

    #[test]
    fn test_relative_years() {
        let now = now();
        assert_eq!(format_relative(now - Duration::days(370), now), "about 1 year ago");
        assert_eq!(format_relative(now - Duration::days(365 + 150), now), "over 1 year ago");
        assert_eq!(format_relative(now - Duration::days(365 + 300), now), "almost 2 years ago");
    }

    #[test]
    fn test_relative_future() {
        let now = now();
        assert_eq!(format_relative(now + Duration::days(2), now), "in 2 days");
    }
}
