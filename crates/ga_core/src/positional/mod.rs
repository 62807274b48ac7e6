//! # Positional Map
//!
//! Where on the pitch each team acted inside a minute window. Every event of
//! the team counts (any type, no outcome filter) when `low < minute < high`
//! and its location is on the pitch. Counts are normalized over the binned
//! events, so a team's fractions sum to 1.

pub mod zones;

pub use zones::{Zone, ZoneLayout, X_EDGES, Y_EDGES};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::models::{MatchContext, MinuteWindow, TeamId, TeamRef, Venue};
use crate::preprocess::PreparedMatch;

/// Occupancy of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFrequency {
    pub zone: Zone,
    pub count: u32,
    pub fraction: f64,
}

/// Zone occupancy of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalMap {
    pub team_id: TeamId,
    pub team_name: String,
    pub venue: Venue,
    pub layout: ZoneLayout,
    /// Events binned into a zone
    pub total_events: u32,
    /// In-window events without a location on the pitch
    pub outside: u32,
    /// Empty when the team has no binned event
    pub zones: Vec<ZoneFrequency>,
}

impl PositionalMap {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn fractions(&self) -> Vec<f64> {
        self.zones.iter().map(|z| z.fraction).collect()
    }

    /// Zone with the highest count; ties go to the lower index.
    pub fn busiest_zone(&self) -> Option<&ZoneFrequency> {
        self.zones
            .iter()
            .filter(|z| z.count > 0)
            .fold(None, |best: Option<&ZoneFrequency>, z| match best {
                Some(b) if b.count >= z.count => Some(b),
                _ => Some(z),
            })
    }
}

/// Positional maps of both teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalReport {
    pub context: MatchContext,
    pub window: MinuteWindow,
    /// Home then away
    pub teams: Vec<PositionalMap>,
}

impl PositionalReport {
    pub fn team(&self, team_id: TeamId) -> Option<&PositionalMap> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }
}

pub fn build_positional_map(
    prepared: &PreparedMatch,
    window: MinuteWindow,
    config: &AnalysisConfig,
) -> PositionalReport {
    let teams = prepared
        .teams()
        .into_iter()
        .map(|team| build_team_map(prepared, team, window, config.positional.layout))
        .collect();

    PositionalReport {
        context: prepared.context.clone(),
        window,
        teams,
    }
}

fn build_team_map(
    prepared: &PreparedMatch,
    team: &TeamRef,
    window: MinuteWindow,
    layout: ZoneLayout,
) -> PositionalMap {
    let zones = layout.zones();
    let mut counts = vec![0u32; zones.len()];
    let mut outside = 0u32;

    for event in prepared
        .team_events(team.team_id)
        .filter(|e| window.contains_exclusive(e.minute))
    {
        match layout.locate(event.location()) {
            Some(i) => counts[i] += 1,
            None => outside += 1,
        }
    }

    let total_events: u32 = counts.iter().sum();
    let frequencies = if total_events == 0 {
        Vec::new()
    } else {
        zones
            .into_iter()
            .zip(counts)
            .map(|(zone, count)| ZoneFrequency {
                zone,
                count,
                fraction: count as f64 / total_events as f64,
            })
            .collect()
    };

    debug!(team = %team.name, ?layout, total_events, outside, "positional map built");

    PositionalMap {
        team_id: team.team_id,
        team_name: team.name.clone(),
        venue: prepared
            .context
            .venue_of(team.team_id)
            .unwrap_or(Venue::Home),
        layout,
        total_events,
        outside,
        zones: frequencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawEvent;
    use crate::test_support::{prepare, raw_pass, AWAY_ID, HOME_ID};
    use proptest::prelude::*;

    fn window(low: u32, high: u32) -> MinuteWindow {
        MinuteWindow::new(low, high).unwrap()
    }

    #[test]
    fn test_counts_any_event_type_in_window() {
        let prepared = prepare(vec![
            raw_pass(HOME_ID, 1, "A", 5, 5.0, 50.0, false),
            RawEvent::new(HOME_ID, "TakeOn", 6, 95.0, 50.0).with_player(2, "B"),
            RawEvent::new(HOME_ID, "Tackle", 7, 95.0, 40.0).with_player(2, "B"),
            raw_pass(HOME_ID, 1, "A", 50, 50.0, 50.0, true),
            RawEvent::new(AWAY_ID, "Pass", 8, 50.0, 50.0).with_player(20, "Z"),
        ]);
        let report = build_positional_map(&prepared, window(0, 45), &AnalysisConfig::default());
        let home = report.team(TeamId(HOME_ID)).unwrap();

        assert_eq!(home.layout, ZoneLayout::Full);
        assert_eq!(home.zones.len(), 22);
        assert_eq!(home.total_events, 3);
        let busiest = home.busiest_zone().unwrap();
        assert_eq!(busiest.count, 2);
        assert_eq!(busiest.zone.x_min, 83.0);
        assert!((busiest.fraction - 2.0 / 3.0).abs() < 1e-12);
        assert!((home.fractions().iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_team_without_events_has_empty_zones() {
        let prepared = prepare(vec![
            raw_pass(HOME_ID, 1, "A", 5, 50.0, 50.0, true),
            RawEvent::new(AWAY_ID, "Pass", 80, 50.0, 50.0).with_player(20, "Z"),
        ]);
        let report = build_positional_map(&prepared, window(0, 45), &AnalysisConfig::default());
        let away = report.team(TeamId(AWAY_ID)).unwrap();
        assert!(away.is_empty());
        assert_eq!(away.total_events, 0);
        assert!(away.busiest_zone().is_none());
        assert_eq!(report.teams[0].team_id, TeamId(HOME_ID));
    }

    #[test]
    fn test_off_pitch_events_are_not_binned() {
        let prepared = prepare(vec![
            RawEvent::new(HOME_ID, "Card", 5, f64::NAN, f64::NAN).with_player(1, "A"),
            raw_pass(HOME_ID, 1, "A", 6, 50.0, 50.0, true),
            RawEvent::new(AWAY_ID, "Pass", 8, 50.0, 50.0).with_player(20, "Z"),
        ]);
        let mut config = AnalysisConfig::default();
        config.positional.layout = ZoneLayout::Vertical;
        let report = build_positional_map(&prepared, window(0, 90), &config);
        let home = report.team(TeamId(HOME_ID)).unwrap();
        assert_eq!(home.outside, 1);
        assert_eq!(home.total_events, 1);
        assert_eq!(home.zones.len(), 5);
        assert_eq!(home.zones[2].fraction, 1.0);
    }

    proptest! {
        #[test]
        fn prop_fractions_sum_to_one(
            points in proptest::collection::vec((0.0f64..=100.0, 0.0f64..=100.0, 1u32..90), 1..60),
        ) {
            let mut rows: Vec<RawEvent> = points
                .iter()
                .map(|&(x, y, m)| raw_pass(HOME_ID, 1, "A", m, x, y, true))
                .collect();
            rows.push(RawEvent::new(AWAY_ID, "Pass", 1, 50.0, 50.0).with_player(20, "Z"));
            let prepared = prepare(rows);

            for layout in [ZoneLayout::Full, ZoneLayout::Vertical, ZoneLayout::Horizontal] {
                let mut config = AnalysisConfig::default();
                config.positional.layout = layout;
                let report = build_positional_map(&prepared, window(0, 90), &config);
                let home = report.team(TeamId(HOME_ID)).unwrap();
                prop_assert_eq!(home.total_events as usize, points.len());
                let sum: f64 = home.fractions().iter().sum();
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }
}
