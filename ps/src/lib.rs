//! PlanStore - whole-document JSON persistence for meetplan
//!
//! The local-storage analogue: application state is a handful of named
//! documents, each persisted as one pretty-printed JSON file. There is no
//! schema migration and no versioning - a document is replaced wholesale on
//! every save.
//!
//! # Layout
//!
//! ```text
//! <data-dir>/
//! ├── settings.json    # general scheduling settings
//! ├── teams.json       # team list
//! └── schedule.json    # last generated schedule + holding pocket
//! ```
//!
//! # Example
//!
//! ```ignore
//! use planstore::{PlanStore, TEAMS_DOC};
//!
//! let store = PlanStore::open("~/.local/share/meetplan")?;
//! let teams: Vec<Team> = store.load_or_default(TEAMS_DOC);
//! store.save(TEAMS_DOC, &teams)?;
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{PlanStore, StoreError};

/// Document name for general settings
pub const SETTINGS_DOC: &str = "settings";

/// Document name for the team list
pub const TEAMS_DOC: &str = "teams";

/// Document name for the generated schedule
pub const SCHEDULE_DOC: &str = "schedule";
