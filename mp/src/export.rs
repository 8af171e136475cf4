//! HTML export
//!
//! Re-renders the in-memory schedule as a standalone printable page. Pure
//! formatting: the grouping mirrors the on-screen grid (weeks anchored at
//! the Monday of the earliest meeting, five weekday columns per week).

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Frequency, GeneralSettings, Meeting};
use crate::schedule;

const PAGE_TEMPLATE: &str = "schedule-page";

/// Emitted when there is nothing to export
const EMPTY_PAGE: &str = "<html><body><h1>No schedule to export.</h1></body></html>";

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Meeting Schedule</title>
  <style>
    body { font-family: sans-serif; background: #e2e8f0; color: #1f2937; margin: 0; }
    .page { max-width: 90rem; margin: 0 auto; padding: 2rem 1.5rem; }
    .toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
    .toolbar h1 { font-size: 1.875rem; margin: 0; }
    .toolbar button { padding: 0.5rem 1rem; font-size: 0.875rem; color: #fff; background: #0284c7; border: none; border-radius: 0.375rem; cursor: pointer; }
    .week-title { font-size: 1.5rem; font-weight: bold; margin: 1.5rem 0 1rem; }
    .week { background: #f1f5f9; border-radius: 0.75rem; margin-bottom: 1.5rem; }
    .grid { display: grid; grid-template-columns: repeat(5, 1fr); }
    .day { padding: 1rem; border-right: 1px solid #e2e8f0; min-height: 10rem; }
    .day:last-child { border-right: none; }
    .day h3 { font-size: 0.875rem; font-weight: bold; text-align: center; color: #374151; border-bottom: 1px solid #e2e8f0; padding-bottom: 0.5rem; margin: 0 0 1rem; }
    .card { background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 0.75rem; margin-bottom: 0.75rem; box-shadow: 0 1px 2px rgba(0,0,0,0.05); break-inside: avoid; }
    .card .title { font-size: 0.75rem; font-weight: bold; color: #075985; margin: 0; }
    .card ul { list-style: none; margin: 0.5rem 0 0; padding: 0.5rem 0 0; border-top: 1px solid #e5e7eb; }
    .card li { margin-bottom: 0.5rem; }
    .card .participant { font-size: 0.6875rem; font-weight: 500; color: #1f2937; margin: 0; }
    .card .topics { font-size: 0.6875rem; color: #6b7280; margin: 0; }
    .card .time { margin-top: 0.75rem; background: #f3f4f6; border-radius: 0.375rem; padding: 0.25rem 0.5rem; text-align: center; font-size: 0.6875rem; font-weight: 600; color: #374151; }
    .empty-day { text-align: center; font-size: 0.75rem; color: #9ca3af; padding-top: 2rem; }
    @media print {
      body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
      .no-print { display: none; }
      .card { page-break-inside: avoid; }
    }
  </style>
</head>
<body>
  <div class="page">
    <div class="toolbar no-print">
      <h1>Meeting Schedule</h1>
      <button onclick="window.print()">Print</button>
    </div>
{{#each weeks}}
{{#if show_title}}
    <h2 class="week-title">Week {{number}}</h2>
{{/if}}
    <div class="week">
      <div class="grid">
{{#each days}}
        <div class="day">
          <h3>{{name}}</h3>
{{#each meetings}}
          <div class="card">
            <p class="title">{{title}}</p>
            <ul>
{{#each participants}}
              <li>
                <p class="participant">{{name}}</p>
                <p class="topics">{{label}}</p>
              </li>
{{/each}}
{{#if total_label}}
              <li><p class="topics">{{total_label}}</p></li>
{{/if}}
            </ul>
            <div class="time">{{start_time}} - {{end_time}}</div>
          </div>
{{else}}
          <div class="empty-day"><p>No meetings.</p></div>
{{/each}}
        </div>
{{/each}}
      </div>
    </div>
{{/each}}
  </div>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct CardParticipant {
    name: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct CardContext {
    title: String,
    start_time: String,
    end_time: String,
    participants: Vec<CardParticipant>,
    total_label: Option<String>,
}

#[derive(Debug, Serialize)]
struct DayContext {
    name: &'static str,
    meetings: Vec<CardContext>,
}

#[derive(Debug, Serialize)]
struct WeekContext {
    number: i64,
    show_title: bool,
    days: Vec<DayContext>,
}

#[derive(Debug, Serialize)]
struct PageContext {
    weeks: Vec<WeekContext>,
}

fn topic_label(count: u32) -> String {
    if count == 1 {
        format!("{} topic", count)
    } else {
        format!("{} topics", count)
    }
}

fn card(meeting: &Meeting) -> CardContext {
    CardContext {
        title: meeting.title.clone(),
        start_time: meeting.start_time.clone(),
        end_time: meeting.end_time.clone(),
        participants: meeting
            .participants_info
            .iter()
            .map(|p| CardParticipant {
                name: p.participant_name.clone(),
                label: topic_label(p.topics),
            })
            .collect(),
        total_label: if meeting.participants_info.is_empty() {
            meeting.total_topics.map(|n| format!("{} on the agenda", topic_label(n)))
        } else {
            None
        },
    }
}

/// Render the schedule as a standalone HTML document
pub fn render_schedule_html(meetings: &[Meeting], settings: &GeneralSettings) -> Result<String> {
    if meetings.is_empty() {
        return Ok(EMPTY_PAGE.to_string());
    }

    let anchor = schedule::week_anchor(meetings).expect("non-empty schedule");
    let show_titles = settings.frequency != Frequency::Weekly;

    let weeks = schedule::week_numbers(meetings)
        .into_iter()
        .map(|number| {
            let in_week = schedule::meetings_in_week(meetings, anchor, number);
            let days = schedule::group_by_day(&in_week)
                .into_iter()
                .map(|(day, in_day)| DayContext {
                    name: day.name(),
                    meetings: in_day.iter().map(|m| card(m)).collect(),
                })
                .collect();
            WeekContext {
                number,
                show_title: show_titles,
                days,
            }
        })
        .collect();

    debug!(meeting_count = meetings.len(), "render_schedule_html");

    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(PAGE_TEMPLATE, PAGE_HTML)
        .context("Failed to register export template")?;
    handlebars
        .render(PAGE_TEMPLATE, &PageContext { weeks })
        .context("Failed to render schedule HTML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParticipantInfo;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn meeting(id: &str, day: &str, title: &str) -> Meeting {
        Meeting {
            id: id.to_string(),
            team_name: "Marketing".to_string(),
            title: title.to_string(),
            date: date(day),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            participants_info: vec![
                ParticipantInfo {
                    participant_name: "Alice".to_string(),
                    topics: 3,
                },
                ParticipantInfo {
                    participant_name: "Bob".to_string(),
                    topics: 1,
                },
            ],
            total_topics: None,
        }
    }

    #[test]
    fn test_empty_schedule_renders_placeholder_page() {
        let html = render_schedule_html(&[], &GeneralSettings::default()).unwrap();
        assert!(html.contains("No schedule to export."));
    }

    #[test]
    fn test_one_card_per_meeting_under_correct_day() {
        // 2026-09-08 is a Tuesday, 2026-09-10 a Thursday
        let meetings = vec![
            meeting("a", "2026-09-08", "Marketing (1/2)"),
            meeting("b", "2026-09-10", "Marketing (2/2)"),
        ];
        let html = render_schedule_html(&meetings, &GeneralSettings::default()).unwrap();

        assert_eq!(html.matches("class=\"card\"").count(), 2);

        let tuesday = html.find("<h3>Tuesday</h3>").unwrap();
        let thursday = html.find("<h3>Thursday</h3>").unwrap();
        let first = html.find("Marketing (1/2)").unwrap();
        let second = html.find("Marketing (2/2)").unwrap();
        assert!(tuesday < first && first < thursday);
        assert!(thursday < second);
    }

    #[test]
    fn test_participant_lines_and_pluralization() {
        let meetings = vec![meeting("a", "2026-09-08", "Marketing")];
        let html = render_schedule_html(&meetings, &GeneralSettings::default()).unwrap();

        assert!(html.contains("Alice"));
        assert!(html.contains("3 topics"));
        assert!(html.contains("1 topic<"));
    }

    #[test]
    fn test_flat_total_meeting_shows_total_label() {
        let mut m = meeting("a", "2026-09-08", "Ops");
        m.participants_info.clear();
        m.total_topics = Some(4);

        let html = render_schedule_html(&[m], &GeneralSettings::default()).unwrap();
        assert!(html.contains("4 topics on the agenda"));
    }

    #[test]
    fn test_week_titles_only_when_not_weekly() {
        let meetings = vec![
            meeting("a", "2026-09-08", "First"),
            meeting("b", "2026-09-15", "Second"),
        ];

        let weekly = render_schedule_html(&meetings, &GeneralSettings::default()).unwrap();
        assert!(!weekly.contains("Week 1"));

        let biweekly_settings = GeneralSettings {
            frequency: Frequency::Biweekly,
            ..Default::default()
        };
        let biweekly = render_schedule_html(&meetings, &biweekly_settings).unwrap();
        assert!(biweekly.contains("Week 1"));
        assert!(biweekly.contains("Week 2"));
    }

    #[test]
    fn test_empty_days_show_placeholder() {
        let meetings = vec![meeting("a", "2026-09-08", "Only one")];
        let html = render_schedule_html(&meetings, &GeneralSettings::default()).unwrap();
        // Four of the five columns are empty
        assert_eq!(html.matches("No meetings.").count(), 4);
    }

    #[test]
    fn test_html_escapes_titles() {
        let meetings = vec![meeting("a", "2026-09-08", "R&D <launch>")];
        let html = render_schedule_html(&meetings, &GeneralSettings::default()).unwrap();
        assert!(html.contains("R&amp;D &lt;launch&gt;"));
        assert!(!html.contains("R&D <launch>"));
    }
}
