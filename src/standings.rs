//! Match standings
//!
//! Built from the per-tick event stream: who was eliminated when, and how
//! often each player caught the ball.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// One elimination, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elimination {
    pub player: String,
    /// Tick the player was removed on
    pub tick: u64,
}

/// Elimination order and catch counts for one match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    /// Everyone who took part, in seating order
    pub roster: Vec<String>,
    pub eliminations: Vec<Elimination>,
    pub catches: BTreeMap<String, u32>,
}

impl Standings {
    pub fn new<S: AsRef<str>>(roster: &[S]) -> Self {
        Self {
            roster: roster.iter().map(|s| s.as_ref().to_string()).collect(),
            eliminations: Vec::new(),
            catches: BTreeMap::new(),
        }
    }

    /// Fold one tick's events into the standings
    pub fn record(&mut self, tick: u64, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PlayerEliminated { player } => {
                    if self.is_eliminated(player) {
                        continue;
                    }
                    log::info!("{player} out at tick {tick}");
                    self.eliminations.push(Elimination {
                        player: player.clone(),
                        tick,
                    });
                }
                GameEvent::BallCaught { player } => {
                    *self.catches.entry(player.clone()).or_default() += 1;
                }
                _ => {}
            }
        }
    }

    pub fn is_eliminated(&self, player: &str) -> bool {
        self.eliminations.iter().any(|e| e.player == player)
    }

    /// Players still in the match, in seating order
    pub fn remaining(&self) -> Vec<&str> {
        self.roster
            .iter()
            .filter(|p| !self.is_eliminated(p))
            .map(String::as_str)
            .collect()
    }

    /// The last player standing, once exactly one is left
    pub fn winner(&self) -> Option<&str> {
        let remaining = self.remaining();
        if remaining.len() == 1 {
            Some(remaining[0])
        } else {
            None
        }
    }

    /// Finishing order, best first
    ///
    /// Players still in the match share the top places in seating order,
    /// followed by the eliminated in reverse order of elimination.
    pub fn placements(&self) -> Vec<&str> {
        let mut order = self.remaining();
        order.extend(self.eliminations.iter().rev().map(|e| e.player.as_str()));
        order
    }

    pub fn catches(&self, player: &str) -> u32 {
        self.catches.get(player).copied().unwrap_or(0)
    }

    /// Check if the match has been decided
    pub fn is_decided(&self) -> bool {
        self.remaining().len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eliminated(name: &str) -> GameEvent {
        GameEvent::PlayerEliminated {
            player: name.to_string(),
        }
    }

    #[test]
    fn test_new_standings() {
        let standings = Standings::new(&["a", "b", "c"]);
        assert_eq!(standings.remaining(), vec!["a", "b", "c"]);
        assert!(standings.winner().is_none());
        assert!(!standings.is_decided());
    }

    #[test]
    fn test_winner_after_eliminations() {
        let mut standings = Standings::new(&["a", "b", "c"]);
        standings.record(10, &[eliminated("b")]);
        assert!(standings.winner().is_none());
        standings.record(42, &[eliminated("a")]);

        assert_eq!(standings.winner(), Some("c"));
        assert_eq!(standings.placements(), vec!["c", "a", "b"]);
        assert_eq!(standings.eliminations[1].tick, 42);
        assert!(standings.is_decided());
    }

    #[test]
    fn test_simultaneous_wipeout_has_no_winner() {
        let mut standings = Standings::new(&["a", "b"]);
        standings.record(5, &[eliminated("a"), eliminated("b")]);
        assert!(standings.winner().is_none());
        assert!(standings.is_decided());
        assert_eq!(standings.placements(), vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_elimination_ignored() {
        let mut standings = Standings::new(&["a", "b"]);
        standings.record(1, &[eliminated("a")]);
        standings.record(2, &[eliminated("a")]);
        assert_eq!(standings.eliminations.len(), 1);
    }

    #[test]
    fn test_catches_counted() {
        let mut standings = Standings::new(&["a", "b"]);
        let caught = GameEvent::BallCaught {
            player: "b".to_string(),
        };
        standings.record(1, &[caught.clone(), GameEvent::ShuffleStarted]);
        standings.record(2, &[caught]);
        assert_eq!(standings.catches("b"), 2);
        assert_eq!(standings.catches("a"), 0);
    }
}
