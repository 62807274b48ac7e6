use thiserror::Error;

use crate::models::TeamId;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No club mapping for team id {team_id}")]
    MissingMapping { team_id: TeamId },

    #[error("Expected two clubs in game title '{game}', found {found:?}")]
    ClubsNotFound { game: String, found: Vec<String> },

    #[error("Unknown league: {league}")]
    UnknownLeague { league: String },

    #[error("Expected exactly two teams in match, found {found}")]
    TeamCount { found: usize },

    #[error("Match has no events")]
    EmptyMatch,

    #[error("Invalid minute window: low {low} is greater than high {high}")]
    InvalidWindow { low: u32, high: u32 },

    #[error("Unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("Malformed qualifiers: {0}")]
    Qualifiers(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Whether the error aborts the pipeline for the whole match.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingMapping { .. }
                | AnalysisError::ClubsNotFound { .. }
                | AnalysisError::UnknownLeague { .. }
                | AnalysisError::TeamCount { .. }
                | AnalysisError::EmptyMatch
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
