//! # Player Report
//!
//! Dribble and pass summaries for one player over an **inclusive** minute
//! window (`low <= minute <= high`), with the points needed to draw them on a
//! vertical pitch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::qualifier::{has_tag, KEY_PASS};
use crate::models::{Event, EventType, MatchContext, MinuteWindow, PitchPoint, TeamId, TeamRef};
use crate::preprocess::PreparedMatch;
use crate::stats::success_pct;

/// Attempted/successful counts with a truncated success percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rate {
    pub attempted: u32,
    pub successful: u32,
    pub pct: u32,
}

impl Rate {
    fn from_events<'a>(events: impl Iterator<Item = &'a Event>) -> Self {
        let (attempted, successful) = events.fold((0, 0), |(a, s), e| {
            (a + 1, s + u32::from(e.is_successful()))
        });
        Self {
            attempted,
            successful,
            pct: success_pct(successful, attempted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DribblePoint {
    /// Vertical-pitch frame
    pub position: PitchPoint,
    pub minute: u32,
    pub successful: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DribbleSummary {
    pub overall: Rate,
    pub last_third: Rate,
    pub points: Vec<DribblePoint>,
}

/// Pass category, by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Key,
    Successful,
    Unsuccessful,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassArrow {
    /// Vertical-pitch frame
    pub start: PitchPoint,
    /// Vertical-pitch frame; `None` when the end location is missing
    pub end: Option<PitchPoint>,
    pub minute: u32,
    pub kind: PassKind,
    pub xt_added: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PassSummary {
    pub overall: Rate,
    /// Passes ending further up the pitch than they started
    pub forward: Rate,
    /// Passes ending in the attacking third
    pub last_third: Rate,
    pub key_passes: u32,
    pub arrows: Vec<PassArrow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub context: MatchContext,
    pub window: MinuteWindow,
    pub team: TeamRef,
    pub player: String,
    pub dribbles: DribbleSummary,
    pub passes: PassSummary,
}

impl PlayerReport {
    /// No dribble and no pass in the window.
    pub fn is_empty(&self) -> bool {
        self.dribbles.overall.attempted == 0 && self.passes.overall.attempted == 0
    }
}

/// Resolve a team by club name or numeric provider id.
pub fn find_team<'a>(prepared: &'a PreparedMatch, team: &str) -> Result<&'a TeamRef> {
    let team = team.trim();
    prepared
        .team_by_name(team)
        .or_else(|| {
            let id = team.parse::<u32>().ok()?;
            prepared.context.team(TeamId(id))
        })
        .ok_or_else(|| AnalysisError::UnknownTeam {
            team: team.to_string(),
        })
}

/// Summaries for `player` of `team` (name or id). An unknown player yields an
/// empty report; an unknown team is an error.
pub fn build_player_report(
    prepared: &PreparedMatch,
    team: &str,
    player: &str,
    window: MinuteWindow,
    config: &AnalysisConfig,
) -> Result<PlayerReport> {
    let team = find_team(prepared, team)?;
    let last_third_x = config.player.last_third_x;

    let events: Vec<&Event> = prepared
        .team_events(team.team_id)
        .filter(|e| e.player_name.as_deref() == Some(player))
        .filter(|e| window.contains_inclusive(e.minute))
        .collect();

    let dribbles: Vec<&Event> = events
        .iter()
        .copied()
        .filter(|e| e.event_type == EventType::TakeOn)
        .collect();
    let dribble_summary = DribbleSummary {
        overall: Rate::from_events(dribbles.iter().copied()),
        last_third: Rate::from_events(dribbles.iter().copied().filter(|e| e.x > last_third_x)),
        points: dribbles
            .iter()
            .map(|e| DribblePoint {
                position: e.location().to_vertical(),
                minute: e.minute,
                successful: e.is_successful(),
            })
            .collect(),
    };

    let passes: Vec<&Event> = events.iter().copied().filter(|e| e.is_pass()).collect();
    let arrows: Vec<PassArrow> = passes
        .iter()
        .map(|e| PassArrow {
            start: e.location().to_vertical(),
            end: e.end_location().map(PitchPoint::to_vertical),
            minute: e.minute,
            kind: classify_pass(e),
            xt_added: e.xt_added,
        })
        .collect();
    let pass_summary = PassSummary {
        overall: Rate::from_events(passes.iter().copied()),
        forward: Rate::from_events(
            passes
                .iter()
                .copied()
                .filter(|e| e.end_x.is_some_and(|end_x| e.x < end_x)),
        ),
        last_third: Rate::from_events(
            passes
                .iter()
                .copied()
                .filter(|e| e.end_x.is_some_and(|end_x| end_x > last_third_x)),
        ),
        key_passes: arrows.iter().filter(|a| a.kind == PassKind::Key).count() as u32,
        arrows,
    };

    debug!(
        team = %team.name,
        player,
        dribbles = dribble_summary.overall.attempted,
        passes = pass_summary.overall.attempted,
        "player report built"
    );

    Ok(PlayerReport {
        context: prepared.context.clone(),
        window,
        team: team.clone(),
        player: player.to_string(),
        dribbles: dribble_summary,
        passes: pass_summary,
    })
}

fn classify_pass(event: &Event) -> PassKind {
    if has_tag(&event.qualifiers, KEY_PASS) {
        PassKind::Key
    } else if event.is_successful() {
        PassKind::Successful
    } else {
        PassKind::Unsuccessful
    }
}
