//! # Club Directory and Fixture Resolution
//!
//! Event exports identify teams only by numeric id and carry a free-text match
//! title such as `"Paris-Saint-Germain-Clermont-Foot"`. The directory lists
//! known club names per league (optionally with their provider ids) and is
//! used to work out which two clubs played and which one was at home.
//!
//! ## Home/away heuristic
//! The club whose name starts earliest in the title is the home team. This is
//! a string-order guess: names that contain each other or appear more than once
//! can resolve the wrong way round. Such cases are logged as warnings.
//!
//! ## Directory file
//! ```yaml
//! leagues:
//!   Ligue 1:
//!     - name: Paris-Saint-Germain
//!       team_id: 304
//!     - Clermont-Foot
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::models::{RawEvent, TeamId, TeamRef, Venue};

/// A known club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ClubEntrySpec")]
pub struct ClubEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClubEntrySpec {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        team_id: Option<TeamId>,
    },
}

impl From<ClubEntrySpec> for ClubEntry {
    fn from(spec: ClubEntrySpec) -> Self {
        match spec {
            ClubEntrySpec::Name(name) => ClubEntry {
                name,
                team_id: None,
            },
            ClubEntrySpec::Full { name, team_id } => ClubEntry { name, team_id },
        }
    }
}

impl ClubEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            team_id: None,
        }
    }

    pub fn with_id(name: &str, team_id: u32) -> Self {
        Self {
            name: name.to_string(),
            team_id: Some(TeamId(team_id)),
        }
    }
}

/// Occurrence of a club name inside a match title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubMatch {
    pub name: String,
    pub team_id: Option<TeamId>,
    /// Byte offset of the first occurrence
    pub position: usize,
    /// Whether the name occurs more than once in the title
    pub repeated: bool,
}

impl ClubMatch {
    fn end(&self) -> usize {
        self.position + self.name.len()
    }
}

/// Reference list of clubs per league.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubDirectory {
    pub leagues: BTreeMap<String, Vec<ClubEntry>>,
}

impl ClubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_league(mut self, league: &str, clubs: Vec<ClubEntry>) -> Self {
        self.leagues.insert(league.to_string(), clubs);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Clubs of one league, or of every league when `league` is `None`.
    pub fn clubs(&self, league: Option<&str>) -> Result<Vec<&ClubEntry>> {
        match league {
            Some(name) => self
                .leagues
                .get(name)
                .map(|clubs| clubs.iter().collect())
                .ok_or_else(|| AnalysisError::UnknownLeague {
                    league: name.to_string(),
                }),
            None => Ok(self.leagues.values().flatten().collect()),
        }
    }

    /// Clubs contained in `title`, ordered by first occurrence.
    ///
    /// A name found only inside the span of a longer matched name is dropped.
    pub fn find_in_title(&self, league: Option<&str>, title: &str) -> Result<Vec<ClubMatch>> {
        let mut matches: Vec<ClubMatch> = self
            .clubs(league)?
            .into_iter()
            .filter_map(|club| {
                let position = title.find(club.name.as_str())?;
                let repeated = title.matches(club.name.as_str()).count() > 1;
                Some(ClubMatch {
                    name: club.name.clone(),
                    team_id: club.team_id,
                    position,
                    repeated,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| b.name.len().cmp(&a.name.len()))
        });
        matches.dedup_by(|a, b| a.name == b.name);

        let spans: Vec<(usize, usize, usize)> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.position, m.end()))
            .collect();
        let mut kept = Vec::with_capacity(matches.len());
        for (i, m) in matches.into_iter().enumerate() {
            let shadowed = spans.iter().any(|&(j, start, end)| {
                j != i && start <= m.position && m.end() <= end && end - start > m.name.len()
            });
            if shadowed {
                debug!(club = %m.name, title, "club name only found inside a longer club name");
            } else {
                kept.push(m);
            }
        }

        Ok(kept)
    }
}

/// The two clubs of a match with their provider ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: TeamRef,
    pub away: TeamRef,
}

impl Fixture {
    pub fn new(home: TeamRef, away: TeamRef) -> Self {
        Self { home, away }
    }

    /// Work out home and away clubs for one match's raw events.
    ///
    /// Club ids come from the directory when it has them. Without ids the team
    /// of the first logged event is taken as the home side.
    pub fn resolve(
        directory: &ClubDirectory,
        league: Option<&str>,
        events: &[RawEvent],
    ) -> Result<Self> {
        let first = events.first().ok_or(AnalysisError::EmptyMatch)?;
        let title = first.game.as_str();

        let mut team_ids: Vec<TeamId> = Vec::with_capacity(2);
        for event in events {
            let id = TeamId(event.team_id);
            if !team_ids.contains(&id) {
                team_ids.push(id);
            }
        }
        if team_ids.len() != 2 {
            return Err(AnalysisError::TeamCount {
                found: team_ids.len(),
            });
        }

        let matches = directory.find_in_title(league, title)?;
        if matches.len() < 2 {
            return Err(AnalysisError::ClubsNotFound {
                game: title.to_string(),
                found: matches.into_iter().map(|m| m.name).collect(),
            });
        }
        if matches.len() > 2 || matches.iter().any(|m| m.repeated) {
            warn!(
                title,
                candidates = ?matches.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
                "ambiguous home/away inference: taking the two earliest club names"
            );
        }

        let home_club = &matches[0];
        let away_club = &matches[1];
        if home_club.name.contains(away_club.name.as_str())
            || away_club.name.contains(home_club.name.as_str())
        {
            warn!(
                title,
                home = %home_club.name,
                away = %away_club.name,
                "ambiguous home/away inference: club names overlap"
            );
        }

        let (home_id, away_id) = match (home_club.team_id, away_club.team_id) {
            (Some(h), Some(a)) => (h, a),
            (Some(h), None) => (h, other_id(&team_ids, h)),
            (None, Some(a)) => (other_id(&team_ids, a), a),
            (None, None) => {
                debug!(title, home_id = %team_ids[0], "no club ids in directory; first event team is home");
                (team_ids[0], team_ids[1])
            }
        };

        Ok(Self {
            home: TeamRef {
                team_id: home_id,
                name: home_club.name.clone(),
            },
            away: TeamRef {
                team_id: away_id,
                name: away_club.name.clone(),
            },
        })
    }

    pub fn team(&self, team_id: TeamId) -> Option<&TeamRef> {
        if self.home.team_id == team_id {
            Some(&self.home)
        } else if self.away.team_id == team_id {
            Some(&self.away)
        } else {
            None
        }
    }

    pub fn venue_of(&self, team_id: TeamId) -> Option<Venue> {
        if self.home.team_id == team_id {
            Some(Venue::Home)
        } else if self.away.team_id == team_id {
            Some(Venue::Away)
        } else {
            None
        }
    }
}

/// The id in `team_ids` that is not `known`; falls back to `known`'s partner slot.
fn other_id(team_ids: &[TeamId], known: TeamId) -> TeamId {
    team_ids
        .iter()
        .copied()
        .find(|&id| id != known)
        .unwrap_or(team_ids[0])
}
