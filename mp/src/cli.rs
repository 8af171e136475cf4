//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Frequency, Weekday};

/// Meetplan - AI-assisted meeting agenda planner
#[derive(Parser)]
#[command(name = "mp", about = "Plan team meeting agendas with an AI-generated schedule", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// View or edit the general scheduling settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Manage teams
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },

    /// Request a new schedule from the AI service
    Generate,

    /// View or rearrange the generated schedule
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },

    /// Export the schedule as a printable HTML page
    Export {
        /// Output file
        #[arg(short, long, default_value = "agenda.html")]
        output: PathBuf,
    },
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current settings
    Show {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Update one or more settings fields
    Set {
        /// Scheduling period (weekly, biweekly, monthly)
        #[arg(long)]
        frequency: Option<Frequency>,

        /// Start of the daily window (HH:mm)
        #[arg(long)]
        start: Option<String>,

        /// End of the daily window (HH:mm)
        #[arg(long)]
        end: Option<String>,

        /// Minutes per topic
        #[arg(long = "topic-duration")]
        topic_duration: Option<u32>,

        /// Minimum minutes between meetings on the same day
        #[arg(long = "break")]
        break_mins: Option<u32>,

        /// Maximum topics per meeting
        #[arg(long = "max-topics")]
        max_topics: Option<u32>,
    },

    /// Replace the allowed weekdays (comma-separated, e.g. mon,tue,fri)
    Days {
        #[arg(required = true, value_delimiter = ',')]
        days: Vec<Weekday>,
    },

    /// Configure the lunch break
    Lunch {
        #[command(subcommand)]
        command: LunchCommand,
    },
}

/// Lunch break subcommands
#[derive(Debug, Subcommand)]
pub enum LunchCommand {
    /// Set the lunch window
    Set {
        /// Lunch start (HH:mm)
        start: String,

        /// Lunch end (HH:mm)
        end: String,
    },

    /// Remove the lunch window
    Clear,
}

/// Team management subcommands
#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Add a new team
    Add {
        /// Team name
        name: String,

        /// Participant spec, repeatable (Name:topic-count)
        #[arg(short, long = "participant", value_name = "NAME:COUNT")]
        participants: Vec<String>,

        /// Flat total topic count, instead of a participant breakdown
        #[arg(long)]
        total: Option<u32>,
    },

    /// Edit a team (replaces the roster when -p is given)
    Edit {
        /// Team id (or unique prefix)
        id: String,

        /// New team name
        #[arg(long)]
        name: Option<String>,

        /// Participant spec, repeatable (Name:topic-count)
        #[arg(short, long = "participant", value_name = "NAME:COUNT")]
        participants: Vec<String>,

        /// Flat total topic count
        #[arg(long)]
        total: Option<u32>,
    },

    /// Remove a team
    Rm {
        /// Team id (or unique prefix)
        id: String,
    },

    /// List teams
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Schedule rearrangement subcommands
#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// Show the schedule grouped by week and day
    Show {
        /// Only show one week
        #[arg(short, long)]
        week: Option<i64>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Move a meeting to another day (only the date changes)
    Move {
        /// Meeting id (or unique prefix)
        id: String,

        /// New date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Edit a meeting's title and/or times
    Edit {
        /// Meeting id (or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New start time (HH:mm)
        #[arg(long)]
        start: Option<String>,

        /// New end time (HH:mm)
        #[arg(long)]
        end: Option<String>,
    },

    /// Park a meeting in the holding pocket
    Hold {
        /// Meeting id (or unique prefix)
        id: String,
    },

    /// Move a held meeting back onto a day
    Place {
        /// Meeting id (or unique prefix)
        id: String,

        /// Target date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Add a free meeting
    Add {
        /// Date (YYYY-MM-DD)
        date: NaiveDate,

        /// Meeting title
        #[arg(long)]
        title: String,

        /// Start time (HH:mm)
        #[arg(long)]
        start: String,

        /// End time (HH:mm)
        #[arg(long)]
        end: String,

        /// Team name
        #[arg(long)]
        team: Option<String>,

        /// Flat topic count on the agenda
        #[arg(long)]
        topics: Option<u32>,
    },

    /// Remove a meeting
    Rm {
        /// Meeting id (or unique prefix)
        id: String,
    },
}

/// Output format for show/list commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
