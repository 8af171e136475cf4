//! Domain model: teams, settings, meetings

mod meeting;
mod settings;
mod team;

pub use meeting::{Meeting, ParticipantInfo};
pub use settings::{Frequency, GeneralSettings, LunchBreak, Weekday};
pub use team::{Participant, Team, find_team};
