//! Calendar Event Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One calendar event as served to the frontend.
///
/// `start`/`end` serialize as ISO-8601 (RFC 3339); `end` is null for
/// events without a DTEND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_serializes_iso8601() {
        let event = CalendarEvent {
            id: "uid-1".to_string(),
            title: "Wednesday Run".to_string(),
            start: Utc.with_ymd_and_hms(2026, 3, 4, 19, 30, 0).unwrap(),
            end: None,
            all_day: false,
            location: Some("Devil Town".to_string()),
            notes: None,
            categories: vec!["run".to_string()],
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"], "2026-03-04T19:30:00Z");
        assert_eq!(json["end"], serde_json::Value::Null);
        assert_eq!(json["all_day"], false);
        assert_eq!(json["categories"][0], "run");
    }
}
