//! Schedule validation and arrangement
//!
//! Week numbers are relative: week 1 starts on the Monday of the earliest
//! meeting's ISO week. The display grid covers Monday through Friday;
//! weekend-dated meetings stay in the document but are not shown in a day
//! column.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Meeting, Weekday};

mod board;
mod validate;

pub use board::{POCKET_CAPACITY, ScheduleDoc};
pub use validate::{is_valid_hhmm, parse_hhmm, parse_schedule};

/// Monday of the ISO week containing the given date
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - chrono::Days::new(date.weekday().num_days_from_monday() as u64)
}

/// Monday of week 1: the week of the earliest meeting
pub fn week_anchor(meetings: &[Meeting]) -> Option<NaiveDate> {
    meetings.iter().map(|m| m.date).min().map(monday_of)
}

/// 1-based week number of a date relative to the anchor Monday
pub fn week_number(date: NaiveDate, anchor: NaiveDate) -> i64 {
    (monday_of(date) - anchor).num_days() / 7 + 1
}

/// Meetings falling in the given week, sorted by date and start time
pub fn meetings_in_week<'a>(meetings: &'a [Meeting], anchor: NaiveDate, week: i64) -> Vec<&'a Meeting> {
    let mut selected: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| week_number(m.date, anchor) == week)
        .collect();
    selected.sort_by_key(|m| (m.date, m.start_time.clone()));
    selected
}

/// Group meetings into the five workweek columns, preserving order
///
/// Returns one (day, meetings) pair per column, empty columns included.
pub fn group_by_day<'a>(meetings: &[&'a Meeting]) -> Vec<(Weekday, Vec<&'a Meeting>)> {
    Weekday::WORKWEEK
        .iter()
        .map(|day| {
            let in_day: Vec<&Meeting> = meetings.iter().filter(|m| m.weekday() == *day).copied().collect();
            (*day, in_day)
        })
        .collect()
}

/// Week numbers present in the schedule, ascending
pub fn week_numbers(meetings: &[Meeting]) -> Vec<i64> {
    let Some(anchor) = week_anchor(meetings) else {
        return Vec::new();
    };
    let mut weeks: Vec<i64> = meetings.iter().map(|m| week_number(m.date, anchor)).collect();
    weeks.sort_unstable();
    weeks.dedup();
    weeks
}
