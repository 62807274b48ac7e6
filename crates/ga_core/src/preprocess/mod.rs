//! # Event Preprocessor
//!
//! Turns one match's raw rows into the normalized event table consumed by
//! every downstream pipeline.
//!
//! ## Steps (per row)
//! 1. Resolve `team_id` to a club name through the [`Fixture`]; an unknown id aborts
//! 2. Tag home/away from the resolved home team
//! 3. Parse qualifiers; malformed text is logged and treated as no qualifiers
//! 4. Classify cards (`Card` rows only)
//! 5. Attach the possession-value heuristic (`Pass` rows only)
//! 6. Rename `start_x/start_y` to `x/y`

pub mod card;
pub mod threat;

pub use card::classify_card;
pub use threat::{distance_to_goal, expected_threat, pass_threat};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clubs::{ClubDirectory, Fixture};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{
    parse_qualifiers, Event, EventType, MatchContext, PitchPoint, RawEvent, TeamId, TeamRef,
};

/// Counters collected while preprocessing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessStats {
    pub events: usize,
    pub passes: usize,
    pub cards: usize,
    pub malformed_qualifiers: usize,
    /// Rows whose minute is lower than the previous row's
    pub out_of_order_minutes: usize,
}

/// A preprocessed match: context, normalized events in log order, counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedMatch {
    pub context: MatchContext,
    pub events: Vec<Event>,
    pub stats: PreprocessStats,
}

impl PreparedMatch {
    /// Home then away.
    pub fn teams(&self) -> [&TeamRef; 2] {
        [&self.context.home, &self.context.away]
    }

    pub fn team_by_name(&self, name: &str) -> Option<&TeamRef> {
        self.teams().into_iter().find(|t| t.name == name)
    }

    pub fn team_events(&self, team_id: TeamId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.team_id == team_id)
    }

    pub fn max_minute(&self) -> u32 {
        self.context.max_minute
    }

    /// Distinct player names of a team, in order of first appearance.
    pub fn players(&self, team_id: TeamId) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.team_events(team_id).filter_map(|e| e.player_name.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Resolve the fixture from the club directory, then preprocess.
pub fn prepare_match(
    raw: &[RawEvent],
    directory: &ClubDirectory,
    league: Option<&str>,
    config: &AnalysisConfig,
) -> Result<PreparedMatch> {
    let league = league.or_else(|| raw.first().and_then(|r| r.league.as_deref()));
    let fixture = Fixture::resolve(directory, league, raw)?;
    preprocess_match(raw, &fixture, league, config)
}

/// Normalize one match's raw rows.
pub fn preprocess_match(
    raw: &[RawEvent],
    fixture: &Fixture,
    league: Option<&str>,
    config: &AnalysisConfig,
) -> Result<PreparedMatch> {
    let first = raw.first().ok_or(AnalysisError::EmptyMatch)?;

    let mut stats = PreprocessStats::default();
    let mut events = Vec::with_capacity(raw.len());
    let mut last_minute = 0u32;

    for (row, r) in raw.iter().enumerate() {
        let team_id = TeamId(r.team_id);
        let team = fixture
            .team(team_id)
            .ok_or(AnalysisError::MissingMapping { team_id })?;
        let venue = fixture
            .venue_of(team_id)
            .ok_or(AnalysisError::MissingMapping { team_id })?;

        if r.minute < last_minute {
            stats.out_of_order_minutes += 1;
        }
        last_minute = last_minute.max(r.minute);

        let qualifiers = match parse_qualifiers(&r.qualifiers) {
            Ok(q) => q,
            Err(e) => {
                stats.malformed_qualifiers += 1;
                warn!(row, minute = r.minute, error = %e, "malformed qualifiers, treating as empty");
                Vec::new()
            }
        };

        let event_type = EventType::from(r.type_name.as_str());
        let card_type = if event_type == EventType::Card {
            stats.cards += 1;
            classify_card(&qualifiers)
        } else {
            None
        };

        let origin = PitchPoint::new(r.start_x, r.start_y);
        let xt_added = if event_type == EventType::Pass {
            stats.passes += 1;
            if origin.x.is_finite() && origin.y.is_finite() {
                pass_threat(origin, &config.threat)
            } else {
                warn!(row, minute = r.minute, "pass without start location, value set to 0");
                0.0
            }
        } else {
            expected_threat(&event_type, origin, &config.threat)
        };

        events.push(Event {
            team_id,
            team_name: team.name.clone(),
            venue,
            player_id: r.player_id,
            player_name: r.player_name.clone().filter(|n| !n.trim().is_empty()),
            event_type,
            minute: r.minute,
            x: r.start_x,
            y: r.start_y,
            end_x: r.end_x.filter(|v| v.is_finite()),
            end_y: r.end_y.filter(|v| v.is_finite()),
            outcome: r.outcome,
            qualifiers,
            card_type,
            xt_added,
        });
    }
    stats.events = events.len();

    if stats.out_of_order_minutes > 0 {
        warn!(
            count = stats.out_of_order_minutes,
            "event minutes are not monotonically non-decreasing"
        );
    }

    let context = MatchContext {
        league: league.map(str::to_string),
        game: first.game.clone(),
        score: first.score.replace(':', "-"),
        date: parse_match_date(&first.date),
        home: fixture.home.clone(),
        away: fixture.away.clone(),
        max_minute: last_minute,
    };

    debug!(
        game = %context.game,
        events = stats.events,
        passes = stats.passes,
        "match preprocessed"
    );

    Ok(PreparedMatch {
        context,
        events,
        stats,
    })
}

/// Calendar date of an ISO timestamp such as `2024-02-28T20:00:00`.
fn parse_match_date(text: &str) -> Option<NaiveDate> {
    let day = text.split('T').next()?.trim();
    if day.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(date = text, error = %e, "unparseable match date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clubs::ClubEntry;
    use crate::models::{CardType, Venue};
    use crate::test_support::{fixture, raw_pass, HOME_ID, AWAY_ID};

    #[test]
    fn test_preprocess_tags_teams_and_values() {
        let raw = vec![
            raw_pass(HOME_ID, 1, "Home A", 5, 70.0, 90.0, true),
            RawEvent::new(AWAY_ID, "TakeOn", 6, 40.0, 40.0).with_player(11, "Away A"),
            RawEvent::new(AWAY_ID, "Card", 7, 40.0, 40.0)
                .with_player(11, "Away A")
                .with_qualifiers("[{'type': {'displayName': 'Yellow'}}, {'type': {'displayName': 'Red'}}]"),
        ];
        let prepared = preprocess_match(&raw, &fixture(), Some("Ligue 1"), &AnalysisConfig::default()).unwrap();

        let pass = &prepared.events[0];
        assert_eq!(pass.team_name, "Home FC");
        assert_eq!(pass.venue, Venue::Home);
        assert_eq!((pass.x, pass.y), (70.0, 90.0));
        assert!((pass.xt_added - (-5.0f64).exp()).abs() < 1e-12);

        let take_on = &prepared.events[1];
        assert_eq!(take_on.venue, Venue::Away);
        assert_eq!(take_on.xt_added, 0.0);
        assert_eq!(take_on.card_type, None);

        assert_eq!(prepared.events[2].card_type, Some(CardType::Red));
        assert_eq!(prepared.stats.passes, 1);
        assert_eq!(prepared.stats.cards, 1);
        assert_eq!(prepared.context.max_minute, 7);
    }

    #[test]
    fn test_unmapped_team_is_fatal() {
        let raw = vec![raw_pass(HOME_ID, 1, "Home A", 5, 50.0, 50.0, true), RawEvent::new(999, "Pass", 6, 1.0, 1.0)];
        let err = preprocess_match(&raw, &fixture(), None, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingMapping { team_id: TeamId(999) }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_qualifiers_degrade_to_empty() {
        let raw = vec![RawEvent::new(HOME_ID, "Card", 3, 1.0, 1.0).with_qualifiers("[{'type': ")];
        let prepared = preprocess_match(&raw, &fixture(), None, &AnalysisConfig::default()).unwrap();
        assert_eq!(prepared.stats.malformed_qualifiers, 1);
        assert!(prepared.events[0].qualifiers.is_empty());
        assert_eq!(prepared.events[0].card_type, None);
    }

    #[test]
    fn test_context_from_first_row() {
        let raw = vec![RawEvent::new(HOME_ID, "Pass", 1, 50.0, 50.0)
            .with_match_info("Home FC-Away FC", "2 : 1", "2024-02-28T20:00:00")];
        let prepared = preprocess_match(&raw, &fixture(), Some("EPL"), &AnalysisConfig::default()).unwrap();
        assert_eq!(prepared.context.score, "2 - 1");
        assert_eq!(prepared.context.date, NaiveDate::from_ymd_opt(2024, 2, 28));
        assert_eq!(prepared.context.league.as_deref(), Some("EPL"));
        assert_eq!(prepared.context.headline(), "Home FC 2 - 1 Away FC");
    }

    #[test]
    fn test_prepare_match_resolves_from_directory() {
        let directory = ClubDirectory::new().with_league(
            "EPL",
            vec![ClubEntry::new("Away FC"), ClubEntry::new("Home FC")],
        );
        let raw = vec![
            RawEvent::new(HOME_ID, "Pass", 1, 50.0, 50.0).with_match_info("Home FC-Away FC", "0 : 0", ""),
            RawEvent::new(AWAY_ID, "Pass", 2, 50.0, 50.0).with_match_info("Home FC-Away FC", "0 : 0", ""),
        ];
        let prepared = prepare_match(&raw, &directory, Some("EPL"), &AnalysisConfig::default()).unwrap();
        assert_eq!(prepared.context.home.name, "Home FC");
        assert_eq!(prepared.context.away.team_id, TeamId(AWAY_ID));
        assert_eq!(prepared.context.date, None);
        assert_eq!(prepared.players(TeamId(HOME_ID)).len(), 0);
    }

    #[test]
    fn test_empty_match() {
        let err = preprocess_match(&[], &fixture(), None, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyMatch));
    }
}
