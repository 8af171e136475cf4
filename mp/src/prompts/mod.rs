//! Prompt building
//!
//! Serializes the current settings and teams into the natural-language
//! prompt and the structured-output schema sent with the generation request.

use chrono::NaiveDate;
use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::domain::{GeneralSettings, Team};

mod embedded;

const SCHEDULE_TEMPLATE: &str = "schedule-prompt";

/// Template context for one team line
#[derive(Debug, Serialize)]
struct TeamLine {
    name: String,
    total_topics: u32,
    /// "Alice (3 topics), Bob (1 topic)" - absent in flat total-count mode
    breakdown: Option<String>,
}

/// Template context for the lunch block
#[derive(Debug, Serialize)]
struct LunchContext {
    start: String,
    end: String,
}

/// Full template context for the schedule prompt
#[derive(Debug, Serialize)]
struct PromptContext {
    today: String,
    frequency: String,
    days: String,
    start_time: String,
    end_time: String,
    lunch: Option<LunchContext>,
    topic_duration_mins: u32,
    max_topics_per_meeting: u32,
    break_mins: u32,
    teams: Vec<TeamLine>,
}

/// Prompt renderer with the embedded templates registered
pub struct Prompts {
    handlebars: Handlebars<'static>,
}

impl Prompts {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(SCHEDULE_TEMPLATE, embedded::SCHEDULE_PROMPT)
            .context("Failed to register schedule prompt template")?;
        Ok(Self { handlebars })
    }

    /// Render the generation prompt for the current settings and teams
    pub fn schedule_prompt(&self, settings: &GeneralSettings, teams: &[Team], today: NaiveDate) -> Result<String> {
        let context = build_context(settings, teams, today);
        debug!(team_count = teams.len(), "schedule_prompt: rendering");
        self.handlebars
            .render(SCHEDULE_TEMPLATE, &context)
            .context("Failed to render schedule prompt")
    }
}

fn topic_label(count: u32) -> String {
    if count == 1 {
        format!("{} topic", count)
    } else {
        format!("{} topics", count)
    }
}

fn build_context(settings: &GeneralSettings, teams: &[Team], today: NaiveDate) -> PromptContext {
    let teams = teams
        .iter()
        .map(|team| {
            let breakdown = if team.participants.is_empty() {
                None
            } else {
                Some(
                    team.participants
                        .iter()
                        .map(|p| format!("{} ({})", p.name, topic_label(p.topics)))
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            };
            TeamLine {
                name: team.name.clone(),
                total_topics: team.total_topics(),
                breakdown,
            }
        })
        .collect();

    PromptContext {
        today: today.format("%Y-%m-%d").to_string(),
        frequency: settings.frequency.to_string(),
        days: settings
            .days
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", "),
        start_time: settings.start_time.format("%H:%M").to_string(),
        end_time: settings.end_time.format("%H:%M").to_string(),
        lunch: settings.lunch.map(|lunch| LunchContext {
            start: lunch.start.format("%H:%M").to_string(),
            end: lunch.end.format("%H:%M").to_string(),
        }),
        topic_duration_mins: settings.topic_duration_mins,
        max_topics_per_meeting: settings.max_topics_per_meeting,
        break_mins: settings.break_mins,
        teams,
    }
}

/// Structured-output schema for the expected response: a JSON array of
/// meeting objects
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING", "description": "A unique id for the meeting" },
                "team_name": { "type": "STRING", "description": "Name of the team" },
                "title": { "type": "STRING", "description": "Meeting title" },
                "date": { "type": "STRING", "description": "Meeting date in YYYY-MM-DD format" },
                "start_time": { "type": "STRING", "description": "Start time in HH:mm format" },
                "end_time": { "type": "STRING", "description": "End time in HH:mm format" },
                "participants_info": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "participant_name": { "type": "STRING" },
                            "topics": { "type": "NUMBER" }
                        },
                        "required": ["participant_name", "topics"]
                    },
                    "description": "Participants and how many topics each presents in this meeting"
                }
            },
            "required": ["id", "team_name", "title", "date", "start_time", "end_time", "participants_info"]
        }
    })
}
