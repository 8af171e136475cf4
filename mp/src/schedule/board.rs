//! Local schedule rearrangement
//!
//! The CLI counterpart of the UI's drag-and-drop: meetings can be moved to
//! another day, edited inline, parked in a small holding pocket, or created
//! from scratch. Every operation is a synchronous in-memory update; the
//! caller re-saves the whole document afterwards.

use chrono::NaiveDate;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validate::parse_hhmm;
use crate::domain::Meeting;

/// Maximum meetings parked in the holding pocket
pub const POCKET_CAPACITY: usize = 3;

/// The persisted schedule document: the day grid plus the holding pocket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDoc {
    pub meetings: Vec<Meeting>,
    pub held: Vec<Meeting>,
}

impl ScheduleDoc {
    pub fn from_meetings(meetings: Vec<Meeting>) -> Self {
        Self {
            meetings,
            held: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty() && self.held.is_empty()
    }

    /// Meetings sorted by date and start time
    pub fn sorted_meetings(&self) -> Vec<&Meeting> {
        let mut sorted: Vec<&Meeting> = self.meetings.iter().collect();
        sorted.sort_by_key(|m| (m.date, m.start_time.clone()));
        sorted
    }

    /// Move a meeting to another day
    ///
    /// Only the date changes; time, title and participants are preserved.
    pub fn move_meeting(&mut self, id_prefix: &str, date: NaiveDate) -> Result<&Meeting> {
        let idx = find_index(&self.meetings, id_prefix)?;
        debug!(id = %self.meetings[idx].id, %date, "move_meeting");
        self.meetings[idx].date = date;
        Ok(&self.meetings[idx])
    }

    /// Edit a meeting's title and/or times
    ///
    /// When either time is edited, the resulting end time must be after the
    /// resulting start. A title-only edit leaves the times alone, even if the
    /// stored window is inverted (the shape check on responses admits that).
    pub fn edit_meeting(
        &mut self,
        id_prefix: &str,
        title: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<&Meeting> {
        let idx = find_index(&self.meetings, id_prefix)?;

        let new_start = match start {
            Some(s) => {
                parse_hhmm(s)?;
                s.to_string()
            }
            None => self.meetings[idx].start_time.clone(),
        };
        let new_end = match end {
            Some(s) => {
                parse_hhmm(s)?;
                s.to_string()
            }
            None => self.meetings[idx].end_time.clone(),
        };
        if (start.is_some() || end.is_some()) && parse_hhmm(&new_end)? <= parse_hhmm(&new_start)? {
            return Err(eyre!("The end time must be after the start time."));
        }

        let meeting = &mut self.meetings[idx];
        if let Some(title) = title {
            meeting.title = title.to_string();
        }
        meeting.start_time = new_start;
        meeting.end_time = new_end;
        debug!(id = %meeting.id, "edit_meeting");
        Ok(&self.meetings[idx])
    }

    /// Park a meeting in the holding pocket
    pub fn hold(&mut self, id_prefix: &str) -> Result<&Meeting> {
        if self.held.len() >= POCKET_CAPACITY {
            return Err(eyre!("The holding pocket is full (max {} meetings).", POCKET_CAPACITY));
        }
        let idx = find_index(&self.meetings, id_prefix)?;
        let meeting = self.meetings.remove(idx);
        debug!(id = %meeting.id, "hold");
        self.held.push(meeting);
        Ok(self.held.last().expect("just pushed"))
    }

    /// Move a held meeting back onto a day
    pub fn place(&mut self, id_prefix: &str, date: NaiveDate) -> Result<&Meeting> {
        let idx = find_index(&self.held, id_prefix)?;
        let mut meeting = self.held.remove(idx);
        debug!(id = %meeting.id, %date, "place");
        meeting.date = date;
        self.meetings.push(meeting);
        Ok(self.meetings.last().expect("just pushed"))
    }

    /// Create a free meeting directly on a day
    pub fn add_meeting(
        &mut self,
        date: NaiveDate,
        title: &str,
        start: &str,
        end: &str,
        team: Option<&str>,
        total_topics: Option<u32>,
    ) -> Result<&Meeting> {
        if parse_hhmm(end)? <= parse_hhmm(start)? {
            return Err(eyre!("The end time must be after the start time."));
        }

        let mut meeting = Meeting::free(date, title, start, end);
        if let Some(team) = team {
            meeting.team_name = team.to_string();
        }
        meeting.total_topics = total_topics;
        debug!(id = %meeting.id, %date, "add_meeting");
        self.meetings.push(meeting);
        Ok(self.meetings.last().expect("just pushed"))
    }

    /// Remove a meeting from the grid
    pub fn remove_meeting(&mut self, id_prefix: &str) -> Result<Meeting> {
        let idx = find_index(&self.meetings, id_prefix)?;
        let meeting = self.meetings.remove(idx);
        debug!(id = %meeting.id, "remove_meeting");
        Ok(meeting)
    }
}

/// Resolve a meeting by unique id prefix
fn find_index(meetings: &[Meeting], id_prefix: &str) -> Result<usize> {
    let matches: Vec<usize> = meetings
        .iter()
        .enumerate()
        .filter(|(_, m)| m.id.starts_with(id_prefix))
        .map(|(i, _)| i)
        .collect();

    match matches.len() {
        0 => Err(eyre!("No meeting matches id '{}'", id_prefix)),
        1 => Ok(matches[0]),
        n => Err(eyre!("Id '{}' is ambiguous ({} meetings match)", id_prefix, n)),
    }
}
