//! # First-Eleven Cutoff
//!
//! The starting lineup is approximated as everyone who acted before the first
//! substitution, the first sending-off of the team, or the team's last event.
//!
//! By default the substitution lookup spans both teams, so one side's change
//! also ends the other side's first-eleven period. [`SubstitutionScope::Team`]
//! restricts it to the team itself.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::SubstitutionScope;
use crate::models::{Event, EventType, TeamId};

/// Inputs of the first-eleven cutoff for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineupCutoff {
    /// First red or second yellow card of the team
    pub first_dismissal: Option<u32>,
    /// First substitution within the configured scope
    pub first_substitution: Option<u32>,
    /// Team's last event minute
    pub last_minute: u32,
}

impl LineupCutoff {
    pub fn minutes_with_first_eleven(&self) -> u32 {
        [self.first_dismissal, self.first_substitution]
            .into_iter()
            .flatten()
            .fold(self.last_minute, u32::min)
    }
}

/// Compute the cutoff for `team_id` over the whole match's events.
pub fn lineup_cutoff(events: &[Event], team_id: TeamId, scope: SubstitutionScope) -> LineupCutoff {
    let team_events = || events.iter().filter(move |e| e.team_id == team_id);

    let first_dismissal = team_events()
        .filter(|e| e.card_type.is_some_and(|c| c.is_dismissal()))
        .map(|e| e.minute)
        .min();

    let first_substitution = events
        .iter()
        .filter(|e| e.event_type == EventType::SubstitutionOn)
        .filter(|e| scope == SubstitutionScope::MatchWide || e.team_id == team_id)
        .map(|e| e.minute)
        .min();

    let last_minute = team_events().map(|e| e.minute).max().unwrap_or(0);

    LineupCutoff {
        first_dismissal,
        first_substitution,
        last_minute,
    }
}

/// Players of the team with at least one event strictly before `cutoff`.
pub fn first_eleven<'a>(events: &'a [Event], team_id: TeamId, cutoff: u32) -> FxHashSet<&'a str> {
    events
        .iter()
        .filter(|e| e.team_id == team_id && e.minute < cutoff)
        .filter_map(|e| e.player_name.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardType;
    use crate::test_support::{event, team_event};

    fn sample_match() -> Vec<Event> {
        let mut red = team_event(1, EventType::Card, "A2", 75, false);
        red.card_type = Some(CardType::Red);
        vec![
            team_event(1, EventType::Pass, "A1", 10, true),
            team_event(2, EventType::Pass, "B1", 20, true),
            team_event(1, EventType::SubstitutionOn, "A12", 60, false),
            red,
            team_event(1, EventType::Pass, "A12", 88, true),
            team_event(2, EventType::Pass, "B2", 93, true),
        ]
    }

    #[test]
    fn test_match_wide_substitution_applies_to_both_teams() {
        let events = sample_match();
        let a = lineup_cutoff(&events, TeamId(1), SubstitutionScope::MatchWide);
        let b = lineup_cutoff(&events, TeamId(2), SubstitutionScope::MatchWide);
        assert_eq!(a.minutes_with_first_eleven(), 60);
        assert_eq!(b.minutes_with_first_eleven(), 60);
        assert_eq!(b.first_dismissal, None);
    }

    #[test]
    fn test_team_scope_ignores_opponent_substitution() {
        let events = sample_match();
        let b = lineup_cutoff(&events, TeamId(2), SubstitutionScope::Team);
        assert_eq!(b.first_substitution, None);
        assert_eq!(b.minutes_with_first_eleven(), 93);
    }

    #[test]
    fn test_dismissal_before_substitution() {
        let mut events = sample_match();
        events[3].minute = 30;
        let a = lineup_cutoff(&events, TeamId(1), SubstitutionScope::MatchWide);
        assert_eq!(a.first_dismissal, Some(30));
        assert_eq!(a.minutes_with_first_eleven(), 30);
    }

    #[test]
    fn test_yellow_card_does_not_cut() {
        let mut yellow = event(EventType::Card, "A1", 5, false);
        yellow.card_type = Some(CardType::Yellow);
        let events = vec![yellow, event(EventType::Pass, "A1", 50, true)];
        let cutoff = lineup_cutoff(&events, events[0].team_id, SubstitutionScope::MatchWide);
        assert_eq!(cutoff.minutes_with_first_eleven(), 50);
    }

    #[test]
    fn test_first_eleven_membership() {
        let events = sample_match();
        let starters = first_eleven(&events, TeamId(1), 60);
        assert!(starters.contains("A1"));
        assert!(!starters.contains("A2"));
        assert!(!starters.contains("A12"));
    }
}
