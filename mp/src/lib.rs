//! Meetplan - AI-assisted meeting agenda planner
//!
//! Teams and scheduling constraints are defined locally; the schedule itself
//! is produced by one call to an external generative-language API. The
//! response is shape-checked (date and time string formats only), persisted
//! as a whole-document JSON blob, and can then be rearranged locally and
//! exported as a printable HTML page.
//!
//! There is deliberately no constraint solver in this crate: the prompt
//! describes the constraints in prose and nothing verifies that the returned
//! schedule satisfies them.

pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod llm;
pub mod prompts;
pub mod schedule;
