//! # Pass Chain
//!
//! Event logs do not name the receiver of a pass. The receiver is taken to be
//! the player of the team's next logged action, whatever its type (a pass, a
//! take-on, a foul...). Rows without a player id are ignored when chaining and
//! the final action of a team has no receiver.

use crate::models::Event;

/// A pass with its inferred receiver.
#[derive(Debug, Clone, Copy)]
pub struct PassLink<'a> {
    pub event: &'a Event,
    pub passer: &'a str,
    pub recipient: &'a str,
}

impl PassLink<'_> {
    /// Successful outcome to a different player. Self-passes never count.
    pub fn is_completed(&self) -> bool {
        self.event.is_successful() && self.passer != self.recipient
    }

    pub fn minute(&self) -> u32 {
        self.event.minute
    }
}

/// Chain one team's events (log order) into passes with receivers.
pub fn pass_chain<'a>(team_events: &[&'a Event]) -> Vec<PassLink<'a>> {
    let actors: Vec<&'a Event> = team_events
        .iter()
        .copied()
        .filter(|e| e.player_id.is_some())
        .collect();

    actors
        .iter()
        .enumerate()
        .filter_map(|(i, event)| {
            let recipient = actors.get(i + 1)?.player_name.as_deref()?;
            if !event.is_pass() {
                return None;
            }
            let passer = event.player_name.as_deref()?;
            Some(PassLink {
                event,
                passer,
                recipient,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use crate::test_support::event;

    #[test]
    fn test_receiver_is_next_action_of_any_type() {
        let events = vec![
            event(EventType::Pass, "A", 1, true),
            event(EventType::TakeOn, "B", 2, true),
            event(EventType::Pass, "B", 3, true),
            event(EventType::Pass, "C", 4, true),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let chain = pass_chain(&refs);

        let pairs: Vec<_> = chain.iter().map(|l| (l.passer, l.recipient)).collect();
        // the last pass has no receiver and is dropped
        assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
    }

    #[test]
    fn test_rows_without_player_id_are_skipped() {
        let mut anonymous = event(EventType::Pass, "X", 2, true);
        anonymous.player_id = None;
        let events = vec![
            event(EventType::Pass, "A", 1, true),
            anonymous,
            event(EventType::Pass, "B", 3, true),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let chain = pass_chain(&refs);
        assert_eq!(chain.len(), 1);
        assert_eq!((chain[0].passer, chain[0].recipient), ("A", "B"));
    }

    #[test]
    fn test_self_pass_is_not_completed() {
        let events = vec![event(EventType::Pass, "A", 1, true), event(EventType::Pass, "A", 2, true)];
        let refs: Vec<&Event> = events.iter().collect();
        let chain = pass_chain(&refs);
        assert_eq!(chain.len(), 1);
        assert!(!chain[0].is_completed());
    }
}
