//! Post-hoc response validation
//!
//! The response is only checked for shape: parseable date, `HH:mm` times.
//! Malformed entries are dropped and logged, never failing the whole batch.
//! Nothing verifies that the schedule satisfies the constraints described
//! in the prompt.

use chrono::{NaiveDate, NaiveTime};
use eyre::{Result, eyre};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::domain::{Meeting, ParticipantInfo};

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));

/// Check the `HH:mm` shape and that the value is a real time of day
///
/// The regex alone would accept "99:99".
pub fn is_valid_hhmm(s: &str) -> bool {
    TIME_RE.is_match(s) && NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}

/// Parse an `HH:mm` string, with a user-facing error
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    if !is_valid_hhmm(s) {
        return Err(eyre!("Invalid time '{}'. Use the HH:mm format, e.g. 09:30", s));
    }
    Ok(NaiveTime::parse_from_str(s, "%H:%M").expect("checked above"))
}

/// Parse the raw response text into the accepted schedule
///
/// The top level must be a JSON array; anything else is a hard error (the
/// model returned an unexpected data shape). Individual malformed entries
/// are filtered out silently apart from a warning log.
pub fn parse_schedule(text: &str) -> Result<Vec<Meeting>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| eyre!("The API returned unparseable JSON: {}", e))?;

    let entries = value
        .as_array()
        .ok_or_else(|| eyre!("The AI returned an unexpected data shape (not an array)."))?;

    Ok(entries.iter().filter_map(validate_entry).collect())
}

/// Shape-check one response entry, returning None for malformed ones
fn validate_entry(entry: &serde_json::Value) -> Option<Meeting> {
    let str_field = |name: &str| entry.get(name).and_then(|v| v.as_str());

    let Some(id) = str_field("id") else {
        warn!(%entry, "Dropping meeting without an id");
        return None;
    };
    let Some(team_name) = str_field("team_name") else {
        warn!(id, "Dropping meeting without a team name");
        return None;
    };
    let Some(title) = str_field("title") else {
        warn!(id, "Dropping meeting without a title");
        return None;
    };

    let Some(date) = str_field("date").and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()) else {
        warn!(id, "Dropping meeting with a missing or unparseable date");
        return None;
    };

    let Some(start_time) = str_field("start_time").filter(|s| is_valid_hhmm(s)) else {
        warn!(id, "Dropping meeting with a missing or invalid start time");
        return None;
    };
    let Some(end_time) = str_field("end_time").filter(|s| is_valid_hhmm(s)) else {
        warn!(id, "Dropping meeting with a missing or invalid end time");
        return None;
    };

    let participants_info = match entry.get("participants_info") {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(value) => match serde_json::from_value::<Vec<ParticipantInfo>>(value.clone()) {
            Ok(info) => info,
            Err(e) => {
                warn!(id, error = %e, "Dropping meeting with malformed participants_info");
                return None;
            }
        },
    };

    let total_topics = entry.get("total_topics").and_then(|v| v.as_u64()).map(|n| n as u32);

    Some(Meeting {
        id: id.to_string(),
        team_name: team_name.to_string(),
        title: title.to_string(),
        date,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        participants_info,
        total_topics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> serde_json::Value {
        serde_json::json!({
            "id": "m1",
            "team_name": "Marketing",
            "title": "Marketing (1/2)",
            "date": "2026-09-08",
            "start_time": "09:00",
            "end_time": "10:15",
            "participants_info": [
                { "participant_name": "Alice", "topics": 3 },
                { "participant_name": "Bob", "topics": 2 }
            ]
        })
    }

    #[test]
    fn test_well_formed_entry_retained_unchanged() {
        let text = serde_json::json!([entry()]).to_string();
        let schedule = parse_schedule(&text).unwrap();

        assert_eq!(schedule.len(), 1);
        let m = &schedule[0];
        assert_eq!(m.id, "m1");
        assert_eq!(m.team_name, "Marketing");
        assert_eq!(m.title, "Marketing (1/2)");
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2026, 9, 8).unwrap());
        assert_eq!(m.start_time, "09:00");
        assert_eq!(m.end_time, "10:15");
        assert_eq!(m.participants_info.len(), 2);
        assert_eq!(m.participants_info[0].participant_name, "Alice");
        assert_eq!(m.participants_info[0].topics, 3);
    }

    #[test]
    fn test_non_array_top_level_is_error() {
        assert!(parse_schedule("{\"meetings\": []}").is_err());
        assert!(parse_schedule("not json at all").is_err());
    }

    #[test]
    fn test_non_iso_date_dropped() {
        let mut bad = entry();
        bad["date"] = serde_json::json!("08/09/2026");
        let text = serde_json::json!([bad, entry()]).to_string();

        let schedule = parse_schedule(&text).unwrap();
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_missing_date_dropped() {
        let mut bad = entry();
        bad.as_object_mut().unwrap().remove("date");
        let text = serde_json::json!([bad]).to_string();

        assert!(parse_schedule(&text).unwrap().is_empty());
    }

    #[test]
    fn test_bad_time_shape_dropped() {
        let mut bad = entry();
        bad["start_time"] = serde_json::json!("9:00");
        let text = serde_json::json!([bad]).to_string();
        assert!(parse_schedule(&text).unwrap().is_empty());

        let mut bad = entry();
        bad["end_time"] = serde_json::json!("10h15");
        let text = serde_json::json!([bad]).to_string();
        assert!(parse_schedule(&text).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_time_dropped() {
        // Matches the regex but is not a real time of day
        let mut bad = entry();
        bad["start_time"] = serde_json::json!("99:99");
        let text = serde_json::json!([bad]).to_string();

        assert!(parse_schedule(&text).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_entry_does_not_fail_batch() {
        let text = serde_json::json!([entry(), "garbage", 42]).to_string();
        let schedule = parse_schedule(&text).unwrap();
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_missing_participants_info_tolerated() {
        let mut e = entry();
        e.as_object_mut().unwrap().remove("participants_info");
        let text = serde_json::json!([e]).to_string();

        let schedule = parse_schedule(&text).unwrap();
        assert_eq!(schedule.len(), 1);
        assert!(schedule[0].participants_info.is_empty());
    }

    #[test]
    fn test_is_valid_hhmm() {
        assert!(is_valid_hhmm("09:30"));
        assert!(is_valid_hhmm("23:59"));
        assert!(!is_valid_hhmm("9:30"));
        assert!(!is_valid_hhmm("09:30:00"));
        assert!(!is_valid_hhmm("99:99"));
        assert!(!is_valid_hhmm(""));
    }

    #[test]
    fn test_parse_hhmm_error_message() {
        let err = parse_hhmm("25:00").unwrap_err();
        assert!(err.to_string().contains("HH:mm"));
    }
}
