//! Meetings, as returned by the generation call
//!
//! A meeting is created wholesale from the model response, optionally
//! mutated locally (date, time, title), and discarded on the next
//! generation. Times stay as `HH:mm` strings: they arrive from the model
//! and are only shape-checked, never normalized.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Weekday;

/// A participant's share of one meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub participant_name: String,
    pub topics: u32,
}

/// One scheduled slot covering some subset of a team's topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub team_name: String,
    pub title: String,
    pub date: NaiveDate,
    /// Start time, `HH:mm`
    pub start_time: String,
    /// End time, `HH:mm`
    pub end_time: String,
    #[serde(default)]
    pub participants_info: Vec<ParticipantInfo>,
    /// Flat topic total for meetings without a participant breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_topics: Option<u32>,
}

impl Meeting {
    /// A locally created "free" meeting, not produced by the model
    pub fn free(date: NaiveDate, title: impl Into<String>, start: &str, end: &str) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            team_name: String::new(),
            title: title.into(),
            date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            participants_info: Vec::new(),
            total_topics: None,
        }
    }

    /// Combined date + start time, used for sorting
    ///
    /// Returns None for a start time that does not parse; validated entries
    /// always do.
    pub fn start_datetime(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()?;
        Some(self.date.and_time(time))
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday().into()
    }
}
