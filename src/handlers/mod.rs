use chrono::{DateTime, Duration, Utc};

pub mod admin;
pub mod auth;
pub mod file;
pub mod paste;
pub mod settings;

/// Resolve an `expires_in` shorthand against `now`. Unknown values and
/// `never` mean no expiry, matching how submissions have always behaved.
pub fn parse_expiry(expires_in: Option<&str>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let duration = match expires_in? {
        "10m" => Duration::minutes(10),
        "1h" => Duration::hours(1),
        "1d" => Duration::days(1),
        "7d" => Duration::days(7),
        "30d" => Duration::days(30),
        _ => return None,
    };
    Some(now + duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_durations() {
        let now = Utc::now();
        assert_eq!(parse_expiry(Some("10m"), now), Some(now + Duration::minutes(10)));
        assert_eq!(parse_expiry(Some("30d"), now), Some(now + Duration::days(30)));
    }

    #[test]
    fn never_and_unknown_mean_no_expiry() {
        let now = Utc::now();
        assert_eq!(parse_expiry(Some("never"), now), None);
        assert_eq!(parse_expiry(Some("2y"), now), None);
        assert_eq!(parse_expiry(None, now), None);
    }
}
