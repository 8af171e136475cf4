//! General scheduling settings
//!
//! These are constraints in prose only: they are serialized into the
//! generation prompt and never enforced against the returned schedule.
//! `validate` covers the handful of cross-field checks the UI performed
//! before a request was allowed to go out.

use chrono::NaiveTime;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repetition period within which all of a team's meetings must fall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Number of week columns the period spans
    pub fn weeks(&self) -> u32 {
        match self {
            Frequency::Weekly => 1,
            Frequency::Biweekly => 2,
            Frequency::Monthly => 4,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(format!("Unknown frequency: {}. Use: weekly, biweekly, or monthly", s)),
        }
    }
}

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// The five weekday columns of the schedule grid
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            "sun" | "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Unknown weekday: {}", s)),
        }
    }
}

/// Lunch window: an unavailable block inside the daily time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchBreak {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// General scheduling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub frequency: Frequency,

    /// Weekdays on which meetings may be scheduled
    pub days: Vec<Weekday>,

    /// Start of the daily availability window
    pub start_time: NaiveTime,

    /// End of the daily availability window
    pub end_time: NaiveTime,

    /// Optional lunch break; when unset the prompt only asks the model to
    /// avoid the noon hour
    pub lunch: Option<LunchBreak>,

    /// Minutes allotted per topic
    pub topic_duration_mins: u32,

    /// Minimum minutes between two meetings on the same day
    pub break_mins: u32,

    /// Maximum topics covered in a single meeting
    pub max_topics_per_meeting: u32,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            frequency: Frequency::Weekly,
            days: Weekday::WORKWEEK.to_vec(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            lunch: Some(LunchBreak {
                start: NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"),
                end: NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
            }),
            topic_duration_mins: 15,
            break_mins: 10,
            max_topics_per_meeting: 8,
        }
    }
}

impl GeneralSettings {
    /// Cross-field checks performed before a generation request is sent
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(eyre!("Select at least one weekday in the general settings."));
        }
        if self.end_time <= self.start_time {
            return Err(eyre!("The end time must be after the start time."));
        }
        if let Some(lunch) = &self.lunch
            && lunch.end <= lunch.start
        {
            return Err(eyre!("The lunch end time must be after the lunch start time."));
        }
        Ok(())
    }
}
