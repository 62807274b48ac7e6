//! League CSV Loader
//!
//! One CSV per league, one row per event, every match of the season in log
//! order. Rows that fail to deserialize are skipped, counted and logged; the
//! rest of the file still loads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ga_core::RawEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// All events of one league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueEvents {
    pub league: String,
    pub events: Vec<RawEvent>,
    #[serde(default)]
    pub stats: ParseStats,
}

impl LeagueEvents {
    /// Wrap already loaded rows; rows without a league are tagged with `league`.
    pub fn new(league: &str, mut events: Vec<RawEvent>) -> Self {
        for event in events.iter_mut().filter(|e| e.league.is_none()) {
            event.league = Some(league.to_string());
        }
        let parsed = events.len() as u32;
        Self {
            league: league.to_string(),
            events,
            stats: ParseStats {
                total_rows: parsed,
                parsed,
                failed: 0,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct match titles in order of first appearance.
    pub fn games(&self) -> Vec<&str> {
        let mut games: Vec<&str> = Vec::new();
        for event in &self.events {
            let game = event.game.as_str();
            if !game.is_empty() && !games.contains(&game) {
                games.push(game);
            }
        }
        games
    }

    /// Rows of one match, in log order. Empty when the title is unknown.
    pub fn match_events(&self, game: &str) -> Vec<RawEvent> {
        self.events
            .iter()
            .filter(|e| e.game == game)
            .cloned()
            .collect()
    }
}

/// `{data_dir}/{League_Name}_events.csv`
pub fn league_csv_path(data_dir: &Path, league: &str) -> PathBuf {
    data_dir.join(format!("{}_events.csv", league.trim().replace(' ', "_")))
}

/// Parse a league export.
///
/// Extra columns (such as a dataframe index) are ignored. Missing required
/// columns make every row fail, which is reported through [`ParseStats`].
pub fn load_league_csv(path: &Path, league: &str) -> Result<LeagueEvents> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut events = Vec::new();
    let mut stats = ParseStats::default();

    for (i, row) in reader.deserialize::<RawEvent>().enumerate() {
        stats.total_rows += 1;
        match row {
            Ok(mut event) => {
                if event.league.is_none() {
                    event.league = Some(league.to_string());
                }
                events.push(event);
                stats.parsed += 1;
            }
            Err(e) => {
                stats.failed += 1;
                // header is line 1
                warn!(line = i + 2, error = %e, "skipping unreadable event row");
            }
        }
    }

    if stats.failed > 0 {
        warn!(
            league,
            failed = stats.failed,
            total = stats.total_rows,
            "some event rows could not be parsed"
        );
    }
    info!(league, path = %path.display(), events = stats.parsed, "league events loaded");

    let loaded = LeagueEvents {
        league: league.to_string(),
        events,
        stats,
    };
    debug!(league, games = loaded.games().len(), "distinct games");
    Ok(loaded)
}
