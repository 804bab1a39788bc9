//! Human readable relative times, such as "3 days ago".
use chrono::{DateTime, Utc};

/// Describe how long ago `then` was, relative to the current time.
pub fn ago(then: DateTime<Utc>) -> String {
    ago_at(then, Utc::now())
}

/// Describe how long before `now` the instant `then` was.
pub fn ago_at(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 0 {
        return "in the future".into();
    }
    let mins = div_round(secs, 60);
    let hours = div_round(secs, 3600);
    let days = div_round(secs, 86400);
    if secs < 45 {
        "a few seconds ago".into()
    } else if secs < 90 {
        "a minute ago".into()
    } else if mins < 45 {
        format!("{mins} minutes ago")
    } else if mins < 90 {
        "an hour ago".into()
    } else if hours < 22 {
        format!("{hours} hours ago")
    } else if hours < 36 {
        "a day ago".into()
    } else if days < 26 {
        format!("{days} days ago")
    } else if days < 46 {
        "a month ago".into()
    } else if days < 320 {
        format!("{} months ago", div_round(days, 30).max(2))
    } else if days < 548 {
        "a year ago".into()
    } else {
        format!("{} years ago", div_round(days, 365).max(2))
    }
}

/// Integer division, rounding half up.
fn div_round(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

#[cfg(test)]
mod test {
    use super::ago_at;
    use chrono::{DateTime, Duration, Utc};

    fn before(d: Duration) -> String {
        let now = DateTime::parse_from_rfc3339("2024-05-17T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        ago_at(now - d, now)
    }

    #[test]
    fn seconds() {
        assert_eq!(before(Duration::seconds(10)), "a few seconds ago");
        assert_eq!(before(Duration::seconds(60)), "a minute ago");
    }

    #[test]
    fn minutes_and_hours() {
        assert_eq!(before(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(before(Duration::minutes(50)), "an hour ago");
        assert_eq!(before(Duration::hours(3)), "3 hours ago");
        assert_eq!(before(Duration::hours(30)), "a day ago");
    }

    #[test]
    fn days_months_years() {
        assert_eq!(before(Duration::days(3)), "3 days ago");
        assert_eq!(before(Duration::days(30)), "a month ago");
        assert_eq!(before(Duration::days(100)), "3 months ago");
        assert_eq!(before(Duration::days(400)), "a year ago");
        assert_eq!(before(Duration::days(3 * 365)), "3 years ago");
    }

    #[test]
    fn future() {
        assert_eq!(before(Duration::seconds(-5)), "in the future");
    }
}
