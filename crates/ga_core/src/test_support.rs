//! Builders shared by the unit tests.

use crate::clubs::Fixture;
use crate::config::AnalysisConfig;
use crate::models::{Event, EventType, RawEvent, TeamId, TeamRef, Venue};
use crate::preprocess::{preprocess_match, PreparedMatch};

pub const HOME_ID: u32 = 26;
pub const AWAY_ID: u32 = 32;

pub fn fixture() -> Fixture {
    Fixture::new(
        TeamRef {
            team_id: TeamId(HOME_ID),
            name: "Home FC".to_string(),
        },
        TeamRef {
            team_id: TeamId(AWAY_ID),
            name: "Away FC".to_string(),
        },
    )
}

pub fn raw_pass(
    team_id: u32,
    player_id: u64,
    name: &str,
    minute: u32,
    x: f64,
    y: f64,
    outcome: bool,
) -> RawEvent {
    RawEvent::new(team_id, "Pass", minute, x, y)
        .with_player(player_id, name)
        .with_outcome(outcome)
}

/// Preprocess rows against [`fixture`] with the default config.
pub fn prepare(rows: Vec<RawEvent>) -> PreparedMatch {
    preprocess_match(&rows, &fixture(), Some("Ligue 1"), &AnalysisConfig::default())
        .expect("test rows preprocess")
}

/// A normalized event of team 1.
pub fn event(event_type: EventType, name: &str, minute: u32, outcome: bool) -> Event {
    team_event(1, event_type, name, minute, outcome)
}

pub fn team_event(team_id: u32, event_type: EventType, name: &str, minute: u32, outcome: bool) -> Event {
    Event {
        team_id: TeamId(team_id),
        team_name: format!("Team {}", team_id),
        venue: if team_id == 1 { Venue::Home } else { Venue::Away },
        player_id: Some(1),
        player_name: Some(name.to_string()),
        event_type,
        minute,
        x: 50.0,
        y: 50.0,
        end_x: None,
        end_y: None,
        outcome: Some(outcome),
        qualifiers: Vec::new(),
        card_type: None,
        xt_added: 0.0,
    }
}
