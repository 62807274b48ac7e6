//! # Possession Value Heuristic
//!
//! Pass value from the distance between the pass origin and the centre of the
//! opponent goal line: `exp(-decay * distance)`. Close to goal the value tends
//! to 1, far from it towards 0. This is not an Expected Threat grid model.

use crate::config::ThreatConfig;
use crate::models::{EventType, PitchPoint};

/// Distance from `origin` to the opponent goal centre.
pub fn distance_to_goal(origin: PitchPoint, config: &ThreatConfig) -> f64 {
    origin.distance_to(PitchPoint::new(config.goal_x, config.goal_y))
}

/// Heuristic value of a pass starting at `origin`, in (0, 1].
pub fn pass_threat(origin: PitchPoint, config: &ThreatConfig) -> f64 {
    (-config.decay * distance_to_goal(origin, config)).exp()
}

/// Value attributed to an event: the pass heuristic for passes, 0 otherwise.
pub fn expected_threat(event_type: &EventType, origin: PitchPoint, config: &ThreatConfig) -> f64 {
    if *event_type == EventType::Pass {
        pass_threat(origin, config)
    } else {
        0.0
    }
}
