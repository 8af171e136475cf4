//! Meetplan - AI-assisted meeting agenda planner
//!
//! CLI entry point: teams and settings editing, schedule generation through
//! the configured LLM provider, local rearrangement, and HTML export.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use meetplan::cli::{Cli, Command, LunchCommand, OutputFormat, ScheduleCommand, SettingsCommand, TeamCommand};
use meetplan::config::Config;
use meetplan::domain::{find_team, GeneralSettings, LunchBreak, Meeting, Participant, Team};
use meetplan::export::render_schedule_html;
use meetplan::llm::{GenerateRequest, create_client};
use meetplan::prompts::{Prompts, response_schema};
use meetplan::schedule::{self, ScheduleDoc, parse_hhmm, parse_schedule};
use planstore::{PlanStore, SCHEDULE_DOC, SETTINGS_DOC, TEAMS_DOC};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("meetplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Level priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("mp.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Settings { command } => cmd_settings(&config, command),
        Command::Team { command } => cmd_team(&config, command),
        Command::Generate => cmd_generate(&config).await,
        Command::Schedule { command } => cmd_schedule(&config, command),
        Command::Export { output } => cmd_export(&config, &output),
    }
}

fn open_store(config: &Config) -> Result<PlanStore> {
    Ok(PlanStore::open(&config.storage.data_dir)?)
}

fn cmd_settings(config: &Config, command: SettingsCommand) -> Result<()> {
    let store = open_store(config)?;
    let mut settings: GeneralSettings = store.load_or_default(SETTINGS_DOC);

    match command {
        SettingsCommand::Show { format } => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
            OutputFormat::Text => print_settings(&settings),
        },
        SettingsCommand::Set {
            frequency,
            start,
            end,
            topic_duration,
            break_mins,
            max_topics,
        } => {
            if let Some(frequency) = frequency {
                settings.frequency = frequency;
            }
            if let Some(start) = start {
                settings.start_time = parse_hhmm(&start)?;
            }
            if let Some(end) = end {
                settings.end_time = parse_hhmm(&end)?;
            }
            if let Some(mins) = topic_duration {
                settings.topic_duration_mins = mins;
            }
            if let Some(mins) = break_mins {
                settings.break_mins = mins;
            }
            if let Some(max) = max_topics {
                settings.max_topics_per_meeting = max;
            }
            settings.validate()?;
            store.save(SETTINGS_DOC, &settings)?;
            println!("{} Settings updated", "✓".green());
        }
        SettingsCommand::Days { days } => {
            let mut days = days;
            days.sort();
            days.dedup();
            settings.days = days;
            settings.validate()?;
            store.save(SETTINGS_DOC, &settings)?;
            println!(
                "{} Meeting days set to {}",
                "✓".green(),
                settings.days.iter().map(|d| d.short_name()).collect::<Vec<_>>().join(", ")
            );
        }
        SettingsCommand::Lunch { command } => match command {
            LunchCommand::Set { start, end } => {
                settings.lunch = Some(LunchBreak {
                    start: parse_hhmm(&start)?,
                    end: parse_hhmm(&end)?,
                });
                settings.validate()?;
                store.save(SETTINGS_DOC, &settings)?;
                println!("{} Lunch break set to {} - {}", "✓".green(), start, end);
            }
            LunchCommand::Clear => {
                settings.lunch = None;
                store.save(SETTINGS_DOC, &settings)?;
                println!("{} Lunch break cleared", "✓".green());
            }
        },
    }
    Ok(())
}

fn print_settings(settings: &GeneralSettings) {
    println!("Frequency:      {}", settings.frequency);
    println!(
        "Days:           {}",
        settings.days.iter().map(|d| d.short_name()).collect::<Vec<_>>().join(", ")
    );
    println!(
        "Daily window:   {} - {}",
        settings.start_time.format("%H:%M"),
        settings.end_time.format("%H:%M")
    );
    match &settings.lunch {
        Some(lunch) => println!(
            "Lunch break:    {} - {}",
            lunch.start.format("%H:%M"),
            lunch.end.format("%H:%M")
        ),
        None => println!("Lunch break:    none"),
    }
    println!("Topic duration: {} min", settings.topic_duration_mins);
    println!("Break between:  {} min", settings.break_mins);
    println!("Max topics:     {} per meeting", settings.max_topics_per_meeting);
}

fn cmd_team(config: &Config, command: TeamCommand) -> Result<()> {
    let store = open_store(config)?;
    let mut teams: Vec<Team> = store.load_or_default(TEAMS_DOC);

    match command {
        TeamCommand::Add {
            name,
            participants,
            total,
        } => {
            let mut team = Team::new(name);
            team.participants = participants
                .iter()
                .map(|spec| Participant::parse_spec(spec))
                .collect::<Result<Vec<_>>>()?;
            team.total_topics = total;
            team.validate()?;

            println!("{} Added team: {} ({})", "✓".green(), team.name.cyan(), short_id(&team.id));
            teams.push(team);
            store.save(TEAMS_DOC, &teams)?;
        }
        TeamCommand::Edit {
            id,
            name,
            participants,
            total,
        } => {
            let team_id = find_team(&teams, &id)?.id.clone();
            let team = teams.iter_mut().find(|t| t.id == team_id).expect("just resolved");

            if let Some(name) = name {
                team.name = name;
            }
            if !participants.is_empty() {
                team.participants = participants
                    .iter()
                    .map(|spec| Participant::parse_spec(spec))
                    .collect::<Result<Vec<_>>>()?;
            }
            if let Some(total) = total {
                team.total_topics = Some(total);
            }
            team.validate()?;

            println!("{} Updated team: {}", "✓".green(), team.name.cyan());
            store.save(TEAMS_DOC, &teams)?;
        }
        TeamCommand::Rm { id } => {
            let team_id = find_team(&teams, &id)?.id.clone();
            let removed = teams.remove(teams.iter().position(|t| t.id == team_id).expect("just resolved"));
            store.save(TEAMS_DOC, &teams)?;
            println!("{} Removed team: {}", "✓".green(), removed.name);
        }
        TeamCommand::List { format } => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&teams)?),
            OutputFormat::Text => {
                if teams.is_empty() {
                    println!("No teams yet. Add one with: mp team add <name> -p \"Alice:3\"");
                } else {
                    for team in &teams {
                        let roster = if team.participants.is_empty() {
                            "flat total".to_string()
                        } else {
                            team.participants
                                .iter()
                                .map(|p| format!("{}: {}", p.name, p.topics))
                                .collect::<Vec<_>>()
                                .join(", ")
                        };
                        println!(
                            "{}  {}  {} topics  ({})",
                            short_id(&team.id).yellow(),
                            team.name.cyan(),
                            team.total_topics(),
                            roster
                        );
                    }
                }
            }
        },
    }
    Ok(())
}

async fn cmd_generate(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let teams: Vec<Team> = store.load_or_default(TEAMS_DOC);
    let settings: GeneralSettings = store.load_or_default(SETTINGS_DOC);

    if teams.is_empty() {
        return Err(eyre!("Add at least one team before generating a schedule."));
    }
    for team in &teams {
        team.validate().context(format!("Team '{}' is invalid", team.name))?;
    }
    settings.validate()?;
    config.validate()?;

    // The previous schedule is discarded before the request goes out
    store.save(SCHEDULE_DOC, &ScheduleDoc::default())?;

    let prompts = Prompts::new()?;
    let prompt = prompts.schedule_prompt(&settings, &teams, Local::now().date_naive())?;
    let client = create_client(&config.llm).map_err(|e| eyre!("Failed to create LLM client: {}", e))?;

    println!("Generating schedule with {}...", config.llm.model.cyan());
    info!(model = %config.llm.model, team_count = teams.len(), "cmd_generate: sending request");

    let request = GenerateRequest {
        prompt,
        response_schema: response_schema(),
    };
    let text = match client.generate(request).await {
        Ok(text) => text,
        Err(e) if e.is_auth_failure() => {
            return Err(eyre!(
                "Authentication failed: the API key is invalid or missing. Check the {} environment variable.",
                config.llm.api_key_env
            ));
        }
        Err(e) if e.is_overloaded() => {
            return Err(eyre!("The AI service appears to be overloaded. Please try again in a few moments."));
        }
        Err(e) => return Err(eyre!("Failed to generate the schedule: {}", e)),
    };

    let meetings = parse_schedule(&text)?;
    if meetings.is_empty() {
        warn!("cmd_generate: every entry in the response was dropped");
        return Err(eyre!("The AI returned no usable meetings. Try generating again."));
    }

    let doc = ScheduleDoc::from_meetings(meetings);
    store.save(SCHEDULE_DOC, &doc)?;

    println!("{} Generated {} meetings", "✓".green(), doc.meetings.len());
    print_schedule(&doc, None);
    Ok(())
}

fn cmd_schedule(config: &Config, command: ScheduleCommand) -> Result<()> {
    let store = open_store(config)?;
    let mut doc: ScheduleDoc = store.load_or_default(SCHEDULE_DOC);

    match command {
        ScheduleCommand::Show { week, format } => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
                OutputFormat::Text => print_schedule(&doc, week),
            }
            return Ok(());
        }
        ScheduleCommand::Move { id, date } => {
            let moved = doc.move_meeting(&id, date)?;
            println!("{} Moved '{}' to {}", "✓".green(), moved.title, date);
        }
        ScheduleCommand::Edit { id, title, start, end } => {
            let edited = doc.edit_meeting(&id, title.as_deref(), start.as_deref(), end.as_deref())?;
            println!(
                "{} Updated '{}' ({} - {})",
                "✓".green(),
                edited.title,
                edited.start_time,
                edited.end_time
            );
        }
        ScheduleCommand::Hold { id } => {
            let held = doc.hold(&id)?;
            println!("{} Parked '{}' in the holding pocket", "✓".green(), held.title);
        }
        ScheduleCommand::Place { id, date } => {
            let placed = doc.place(&id, date)?;
            println!("{} Placed '{}' on {}", "✓".green(), placed.title, date);
        }
        ScheduleCommand::Add {
            date,
            title,
            start,
            end,
            team,
            topics,
        } => {
            let added = doc.add_meeting(date, &title, &start, &end, team.as_deref(), topics)?;
            println!("{} Added '{}' on {} ({})", "✓".green(), added.title, date, short_id(&added.id));
        }
        ScheduleCommand::Rm { id } => {
            let removed = doc.remove_meeting(&id)?;
            println!("{} Removed '{}'", "✓".green(), removed.title);
        }
    }

    store.save(SCHEDULE_DOC, &doc)?;
    Ok(())
}

fn print_schedule(doc: &ScheduleDoc, only_week: Option<i64>) {
    if doc.is_empty() {
        println!("No schedule yet. Run: mp generate");
        return;
    }

    if let Some(anchor) = schedule::week_anchor(&doc.meetings) {
        for number in schedule::week_numbers(&doc.meetings) {
            if only_week.is_some_and(|w| w != number) {
                continue;
            }
            println!("{}", format!("Week {}", number).bold());
            let in_week = schedule::meetings_in_week(&doc.meetings, anchor, number);
            for (day, in_day) in schedule::group_by_day(&in_week) {
                if in_day.is_empty() {
                    continue;
                }
                let date = in_day[0].date;
                println!("  {} {}", day.name().bold(), date);
                for meeting in in_day {
                    print_meeting_line(meeting);
                }
            }
        }
    }

    if !doc.held.is_empty() && only_week.is_none() {
        println!("{}", "Holding pocket".bold());
        for meeting in &doc.held {
            print_meeting_line(meeting);
        }
    }
}

fn print_meeting_line(meeting: &Meeting) {
    let participants = if meeting.participants_info.is_empty() {
        meeting
            .total_topics
            .map(|n| format!("{} topics", n))
            .unwrap_or_default()
    } else {
        meeting
            .participants_info
            .iter()
            .map(|p| format!("{} ({})", p.participant_name, p.topics))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "    {}  {} - {}  {}  {}",
        short_id(&meeting.id).yellow(),
        meeting.start_time,
        meeting.end_time,
        meeting.title.cyan(),
        participants.dimmed()
    );
}

fn cmd_export(config: &Config, output: &Path) -> Result<()> {
    let store = open_store(config)?;
    let doc: ScheduleDoc = store.load_or_default(SCHEDULE_DOC);
    let settings: GeneralSettings = store.load_or_default(SETTINGS_DOC);

    let html = render_schedule_html(&doc.meetings, &settings)?;
    fs::write(output, &html).context(format!("Failed to write {}", output.display()))?;

    println!("{} Exported schedule to {}", "✓".green(), output.display().to_string().cyan());
    Ok(())
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
