pub mod issue;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use issue::*;
pub use summary::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent(pub String);

/// Format the distance from `then` to `now` the way listings show it,
/// e.g. "about 3 days ago". Timestamps in the future read as "just now".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_seconds() <= 0 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    let (amount, unit) = if minutes < 1 {
        return "less than a minute ago".to_string();
    } else if hours < 1 {
        (minutes, "minute")
    } else if days < 1 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if amount == 1 {
        format!("about 1 {} ago", unit)
    } else {
        format!("about {} {}s ago", amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "just now");
        assert_eq!(
            format_relative_time(now - Duration::seconds(30), now),
            "less than a minute ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(1), now),
            "about 1 minute ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(5), now),
            "about 5 hours ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(3), now),
            "about 3 days ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(65), now),
            "about 2 months ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(800), now),
            "about 2 years ago"
        );
    }
}
