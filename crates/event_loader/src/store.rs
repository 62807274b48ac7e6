//! Per-league cache of loaded event tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::league_events::{league_csv_path, load_league_csv, LeagueEvents};

/// Loads league CSVs from a data directory and keeps them for a while.
///
/// A miss or an expired entry reloads from disk.
pub struct LeagueStore {
    data_dir: PathBuf,
    cache: moka::sync::Cache<String, Arc<LeagueEvents>>,
}

impl LeagueStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60); // 30 minutes

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_ttl(data_dir, Self::DEFAULT_TTL)
    }

    pub fn with_ttl(data_dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: moka::sync::Cache::builder()
                .max_capacity(16)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Events of `league`, from cache when fresh.
    pub fn get(&self, league: &str) -> Result<Arc<LeagueEvents>> {
        if let Some(hit) = self.cache.get(league) {
            debug!(league, "league cache hit");
            return Ok(hit);
        }

        let path = league_csv_path(&self.data_dir, league);
        let loaded = Arc::new(load_league_csv(&path, league)?);
        self.cache.insert(league.to_string(), loaded.clone());
        Ok(loaded)
    }

    /// Seed the cache, e.g. from a snapshot.
    pub fn insert(&self, events: LeagueEvents) -> Arc<LeagueEvents> {
        let events = Arc::new(events);
        self.cache.insert(events.league.clone(), events.clone());
        events
    }

    pub fn invalidate(&self, league: &str) {
        self.cache.invalidate(league);
    }

    pub fn contains(&self, league: &str) -> bool {
        self.cache.contains_key(league)
    }
}
