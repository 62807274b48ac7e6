//! # ga_core - Match Event Aggregation
//!
//! Turns a football match event log into the data behind the match
//! dashboards: a per-team passing network and a per-team positional
//! occupancy map, plus a single-player dribble/pass report.
//!
//! ## Pipeline
//! 1. `clubs` resolves home/away clubs for a match
//! 2. `preprocess` normalizes raw rows (teams, qualifiers, cards, pass values)
//! 3. `network`, `positional` and `player_report` aggregate over a minute window
//!
//! Everything is synchronous and operates on an immutable in-memory table.
//! Rendering is left to the caller.

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod clubs;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod player_report;
pub mod positional;
pub mod preprocess;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use clubs::{ClubDirectory, ClubEntry, Fixture};
pub use config::{AnalysisConfig, SubstitutionScope};
pub use error::{AnalysisError, Result};
pub use models::{Event, EventType, MatchContext, MinuteWindow, PitchPoint, RawEvent, TeamId};
pub use network::{build_passing_network, PassingNetwork, TeamNetwork};
pub use player_report::{build_player_report, PlayerReport};
pub use positional::{build_positional_map, PositionalReport, ZoneLayout};
pub use preprocess::{prepare_match, preprocess_match, PreparedMatch};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Bumped whenever a serialized output type changes shape.
pub const SCHEMA_VERSION: u8 = 1;
