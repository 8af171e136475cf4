//! Integration tests for Meetplan
//!
//! These tests exercise the full pipeline against a temporary store: prompt
//! building, response parsing, schedule rearrangement, persistence, export.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tempfile::TempDir;

use meetplan::domain::{GeneralSettings, Participant, Team};
use meetplan::export::render_schedule_html;
use meetplan::llm::{GenerateClient, GenerateRequest, LlmError};
use meetplan::prompts::{Prompts, response_schema};
use meetplan::schedule::{ScheduleDoc, parse_schedule};
use planstore::{PlanStore, SCHEDULE_DOC, SETTINGS_DOC, TEAMS_DOC};

/// Canned-response client standing in for the real API
struct CannedClient {
    response: String,
    call_count: AtomicUsize,
}

impl CannedClient {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            call_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerateClient for CannedClient {
    async fn generate(&self, _request: GenerateRequest) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

fn sample_response() -> String {
    serde_json::json!([
        {
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
        },
        {
            "id": "m2",
            "team_name": "Marketing",
            "title": "Marketing (2/2)",
            "date": "2026-09-10",
            "start_time": "14:00",
            "end_time": "15:00",
            "participants_info": [
                { "participant_name": "Carol", "topics": 2 }
            ]
        },
        {
            "id": "bad",
            "team_name": "Marketing",
            "title": "Broken entry",
            "date": "next tuesday",
            "start_time": "09:00",
            "end_time": "10:00",
            "participants_info": []
        }
    ])
    .to_string()
}

fn marketing_team() -> Team {
    Team {
        participants: vec![
            Participant::new("Alice", 3),
            Participant::new("Bob", 2),
            Participant::new("Carol", 2),
        ],
        ..Team::new("Marketing")
    }
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_documents_round_trip_through_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp_dir.path()).expect("Failed to open store");

    let teams = vec![marketing_team()];
    let settings = GeneralSettings::default();

    store.save(TEAMS_DOC, &teams).expect("Failed to save teams");
    store.save(SETTINGS_DOC, &settings).expect("Failed to save settings");

    let loaded_teams: Vec<Team> = store.load(TEAMS_DOC).expect("Failed to load teams");
    let loaded_settings: GeneralSettings = store.load(SETTINGS_DOC).expect("Failed to load settings");

    assert_eq!(loaded_teams, teams);
    assert_eq!(loaded_settings, settings);
}

#[test]
fn test_missing_documents_fall_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp_dir.path()).expect("Failed to open store");

    let teams: Vec<Team> = store.load_or_default(TEAMS_DOC);
    let doc: ScheduleDoc = store.load_or_default(SCHEDULE_DOC);

    assert!(teams.is_empty());
    assert!(doc.is_empty());
}

// =============================================================================
// Generation Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_generate_parse_and_persist() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp_dir.path()).expect("Failed to open store");

    let settings = GeneralSettings::default();
    let teams = vec![marketing_team()];

    let prompts = Prompts::new().expect("Failed to build prompts");
    let prompt = prompts
        .schedule_prompt(&settings, &teams, NaiveDate::from_ymd_opt(2026, 9, 7).unwrap())
        .expect("Failed to render prompt");
    assert!(prompt.contains("Marketing"));

    let client: Arc<dyn GenerateClient> = Arc::new(CannedClient::new(sample_response()));
    let text = client
        .generate(GenerateRequest {
            prompt,
            response_schema: response_schema(),
        })
        .await
        .expect("Generation failed");

    // The entry with the unparseable date is dropped, the rest survive
    let meetings = parse_schedule(&text).expect("Failed to parse response");
    assert_eq!(meetings.len(), 2);

    let doc = ScheduleDoc::from_meetings(meetings);
    store.save(SCHEDULE_DOC, &doc).expect("Failed to save schedule");

    let reloaded: ScheduleDoc = store.load(SCHEDULE_DOC).expect("Failed to reload schedule");
    assert_eq!(reloaded.meetings.len(), 2);
    assert_eq!(reloaded.meetings[0].id, "m1");
    assert!(reloaded.held.is_empty());
}

#[tokio::test]
async fn test_generation_discards_previous_schedule() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp_dir.path()).expect("Failed to open store");

    let stale = ScheduleDoc::from_meetings(parse_schedule(&sample_response()).unwrap());
    store.save(SCHEDULE_DOC, &stale).expect("Failed to save schedule");

    // A new run starts by clearing the document, so a failed request leaves
    // an empty schedule rather than the stale one
    store.save(SCHEDULE_DOC, &ScheduleDoc::default()).expect("Failed to clear");

    let client = CannedClient::new("{\"oops\": true}");
    let text = client
        .generate(GenerateRequest {
            prompt: String::new(),
            response_schema: response_schema(),
        })
        .await
        .unwrap();
    assert!(parse_schedule(&text).is_err());

    let after: ScheduleDoc = store.load_or_default(SCHEDULE_DOC);
    assert!(after.is_empty());
}

// =============================================================================
// Rearrangement Tests
// =============================================================================

#[test]
fn test_rearrange_and_persist() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp_dir.path()).expect("Failed to open store");

    let mut doc = ScheduleDoc::from_meetings(parse_schedule(&sample_response()).unwrap());

    doc.move_meeting("m1", NaiveDate::from_ymd_opt(2026, 9, 9).unwrap())
        .expect("Failed to move");
    doc.hold("m2").expect("Failed to hold");
    doc.add_meeting(
        NaiveDate::from_ymd_opt(2026, 9, 11).unwrap(),
        "Retro",
        "16:00",
        "17:00",
        None,
        Some(4),
    )
    .expect("Failed to add");

    store.save(SCHEDULE_DOC, &doc).expect("Failed to save");
    let reloaded: ScheduleDoc = store.load(SCHEDULE_DOC).expect("Failed to reload");

    assert_eq!(reloaded.meetings.len(), 2);
    assert_eq!(reloaded.held.len(), 1);
    assert_eq!(reloaded.held[0].id, "m2");
    assert_eq!(
        reloaded.meetings[0].date,
        NaiveDate::from_ymd_opt(2026, 9, 9).unwrap()
    );
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_reflects_rearranged_schedule() {
    let mut doc = ScheduleDoc::from_meetings(parse_schedule(&sample_response()).unwrap());
    doc.edit_meeting("m1", Some("Kickoff"), None, None).expect("Failed to edit");

    let html = render_schedule_html(&doc.meetings, &GeneralSettings::default()).expect("Failed to render");

    assert!(html.contains("Kickoff"));
    assert!(html.contains("Marketing (2/2)"));
    assert!(html.contains("<h3>Tuesday</h3>"));
    assert!(html.contains("14:00 - 15:00"));
}

#[test]
fn test_export_empty_schedule() {
    let html = render_schedule_html(&[], &GeneralSettings::default()).expect("Failed to render");
    assert!(html.contains("No schedule to export."));
}
