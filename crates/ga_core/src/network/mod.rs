//! # Passing Network
//!
//! Per-team graph of who passes to whom inside a minute window.
//!
//! ## Pipeline (per team)
//! 1. Chain the team's events into passes with receivers (`pass_chain`)
//! 2. Compute the first-eleven cutoff (`lineup`)
//! 3. Keep passes with `low < minute < high`; their passers become the nodes
//! 4. A pass is completed when successful and not to the passer himself
//! 5. Aggregate attempts/completions/value per passer and per ordered pair
//! 6. Node position = median pass origin, also given in the vertical-pitch frame
//!
//! Edges, and the completions and value of a node, only cover passes whose
//! receiver is a node player too. Node attempts and position use every
//! window pass of the passer. Player names are assumed unique within a team.

pub mod lineup;
pub mod pass_chain;

pub use lineup::{first_eleven, lineup_cutoff, LineupCutoff};
pub use pass_chain::{pass_chain, PassLink};

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnalysisConfig, NetworkConfig};
use crate::models::{Event, MatchContext, MinuteWindow, PitchPoint, TeamId, TeamRef, Venue};
use crate::preprocess::PreparedMatch;
use crate::stats::{median, round_to};

/// A passer node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerNode {
    pub name: String,
    pub player_id: Option<u64>,
    /// Median pass origin in the data frame (x = length, y = width)
    pub location: PitchPoint,
    /// Same point in the vertical-pitch plotting frame
    pub position: PitchPoint,
    /// Passes attempted in the window
    pub attempts: u32,
    /// Completed passes in the window
    pub completed: u32,
    /// Summed value of completed passes, rounded
    pub value: f64,
    pub first_eleven: bool,
}

/// Directed passer -> receiver link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEdge {
    pub passer: String,
    pub receiver: String,
    pub attempts: u32,
    pub completed: u32,
    pub value: f64,
}

impl PairEdge {
    /// Pair key in `passer_receiver` form.
    pub fn key(&self) -> PairKey<'_> {
        PairKey {
            passer: &self.passer,
            receiver: &self.receiver,
        }
    }
}

/// Borrowed ordered pair identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey<'a> {
    pub passer: &'a str,
    pub receiver: &'a str,
}

impl fmt::Display for PairKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.passer, self.receiver)
    }
}

/// Passing network of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNetwork {
    pub team_id: TeamId,
    pub team_name: String,
    pub venue: Venue,
    /// Upper bound of the analysed window
    pub minutes: u32,
    pub minutes_with_first_eleven: u32,
    pub cutoff: LineupCutoff,
    pub players: BTreeMap<String, PlayerNode>,
    /// Sorted by (passer, receiver)
    pub pairs: Vec<PairEdge>,
}

impl TeamNetwork {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, name: &str) -> Option<&PlayerNode> {
        self.players.get(name)
    }

    /// Plotting position (vertical frame).
    pub fn player_position(&self, name: &str) -> Option<PitchPoint> {
        self.player(name).map(|p| p.position)
    }

    /// Completed passes of a player.
    pub fn player_pass_count(&self, name: &str) -> Option<u32> {
        self.player(name).map(|p| p.completed)
    }

    pub fn player_pass_value(&self, name: &str) -> Option<f64> {
        self.player(name).map(|p| p.value)
    }

    pub fn pair(&self, passer: &str, receiver: &str) -> Option<&PairEdge> {
        let wanted = PairKey { passer, receiver };
        self.pairs
            .binary_search_by(|edge| edge.key().cmp(&wanted))
            .ok()
            .map(|i| &self.pairs[i])
    }

    /// Completed passes between a pair.
    pub fn pair_pass_count(&self, passer: &str, receiver: &str) -> Option<u32> {
        self.pair(passer, receiver).map(|e| e.completed)
    }

    pub fn pair_pass_value(&self, passer: &str, receiver: &str) -> Option<f64> {
        self.pair(passer, receiver).map(|e| e.value)
    }

    /// Edges with at least `min_completed` completions, most frequent first.
    pub fn links(&self, min_completed: u32) -> Vec<&PairEdge> {
        let mut links: Vec<&PairEdge> = self
            .pairs
            .iter()
            .filter(|e| e.completed >= min_completed && e.completed > 0)
            .collect();
        links.sort_by(|a, b| b.completed.cmp(&a.completed).then_with(|| a.key().cmp(&b.key())));
        links
    }

    /// Links above the configured `min_link_passes`.
    pub fn configured_links(&self, config: &NetworkConfig) -> Vec<&PairEdge> {
        self.links(config.min_link_passes)
    }
}

/// Maxima over both teams, used to scale node and edge styling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkScale {
    pub max_player_passes: u32,
    pub max_player_value: f64,
    pub max_pair_passes: u32,
    pub max_pair_value: f64,
}

/// Passing networks of both teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingNetwork {
    pub context: MatchContext,
    pub window: MinuteWindow,
    /// Home then away
    pub teams: Vec<TeamNetwork>,
}

impl PassingNetwork {
    pub fn team(&self, team_id: TeamId) -> Option<&TeamNetwork> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    pub fn scale(&self) -> NetworkScale {
        let mut scale = NetworkScale::default();
        for team in &self.teams {
            for p in team.players.values() {
                scale.max_player_passes = scale.max_player_passes.max(p.completed);
                scale.max_player_value = scale.max_player_value.max(p.value);
            }
            for e in &team.pairs {
                scale.max_pair_passes = scale.max_pair_passes.max(e.completed);
                scale.max_pair_value = scale.max_pair_value.max(e.value);
            }
        }
        scale
    }
}

#[derive(Default)]
struct NodeAcc {
    player_id: Option<u64>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    attempts: u32,
    completed: u32,
    value: f64,
}

#[derive(Default)]
struct EdgeAcc {
    attempts: u32,
    completed: u32,
    value: f64,
}

/// Build both teams' networks for `window`.
pub fn build_passing_network(
    prepared: &PreparedMatch,
    window: MinuteWindow,
    config: &AnalysisConfig,
) -> PassingNetwork {
    let teams = prepared
        .teams()
        .into_iter()
        .map(|team| build_team_network(prepared, team, window, config))
        .collect();

    PassingNetwork {
        context: prepared.context.clone(),
        window,
        teams,
    }
}

/// Build one team's network.
pub fn build_team_network(
    prepared: &PreparedMatch,
    team: &TeamRef,
    window: MinuteWindow,
    config: &AnalysisConfig,
) -> TeamNetwork {
    let decimals = config.network.value_decimals;
    let team_events: Vec<&Event> = prepared.team_events(team.team_id).collect();
    let venue = prepared
        .context
        .venue_of(team.team_id)
        .unwrap_or(Venue::Home);

    let cutoff = lineup_cutoff(&prepared.events, team.team_id, config.network.substitution_scope);
    let minutes_with_first_eleven = cutoff.minutes_with_first_eleven();
    let starters = first_eleven(&prepared.events, team.team_id, minutes_with_first_eleven);

    let chain = pass_chain(&team_events);
    let in_window: Vec<&PassLink> = chain
        .iter()
        .filter(|link| window.contains_exclusive(link.minute()))
        .collect();
    let window_players: FxHashSet<&str> = in_window.iter().map(|link| link.passer).collect();

    let mut nodes: FxHashMap<&str, NodeAcc> = FxHashMap::default();
    let mut edges: FxHashMap<(&str, &str), EdgeAcc> = FxHashMap::default();

    for link in &in_window {
        let node = nodes.entry(link.passer).or_default();
        node.player_id = node.player_id.or(link.event.player_id);
        node.xs.push(link.event.x);
        node.ys.push(link.event.y);
        node.attempts += 1;

        // receivers without a pass of their own in the window are not part of the graph
        if !window_players.contains(link.recipient) {
            continue;
        }
        let completed = link.is_completed();
        if completed {
            node.completed += 1;
            node.value += link.event.xt_added;
        }

        let edge = edges.entry((link.passer, link.recipient)).or_default();
        edge.attempts += 1;
        if completed {
            edge.completed += 1;
            edge.value += link.event.xt_added;
        }
    }

    let players: BTreeMap<String, PlayerNode> = nodes
        .into_iter()
        .map(|(name, acc)| {
            let location = PitchPoint::new(
                median(&acc.xs).unwrap_or(f64::NAN),
                median(&acc.ys).unwrap_or(f64::NAN),
            );
            let node = PlayerNode {
                name: name.to_string(),
                player_id: acc.player_id,
                location,
                position: location.to_vertical(),
                attempts: acc.attempts,
                completed: acc.completed,
                value: round_to(acc.value, decimals),
                first_eleven: starters.contains(name),
            };
            (name.to_string(), node)
        })
        .collect();

    let mut pairs: Vec<PairEdge> = edges
        .into_iter()
        .map(|((passer, receiver), acc)| PairEdge {
            passer: passer.to_string(),
            receiver: receiver.to_string(),
            attempts: acc.attempts,
            completed: acc.completed,
            value: round_to(acc.value, decimals),
        })
        .collect();
    pairs.sort_by(|a, b| a.key().cmp(&b.key()));

    debug!(
        team = %team.name,
        passes = chain.len(),
        in_window = in_window.len(),
        players = players.len(),
        pairs = pairs.len(),
        minutes_with_first_eleven,
        "team passing network built"
    );

    TeamNetwork {
        team_id: team.team_id,
        team_name: team.name.clone(),
        venue,
        minutes: window.high(),
        minutes_with_first_eleven,
        cutoff,
        players,
        pairs,
    }
}
