//! Script replay driver for `matching-core`.
//!
//! Reads an order script, feeds it through a single engine and writes the
//! resulting fills, completions and book prints as text or JSON lines.

pub mod config;
pub mod report;
pub mod runner;
pub mod script;

pub use config::{BookView, ConfigError, OutputFormat, ReplayConfig};
pub use runner::{Replay, ReplayError, ReplaySummary};
pub use script::{parse_script, ScriptCommand, ScriptError, DEMO_SCRIPT};
