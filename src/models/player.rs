//! Player and Classification data structures.

use serde::{Deserialize, Serialize};

/// Stable identifier for a player: 1..=8 in roster order.
pub type PlayerId = u8;

/// A player in the lobby.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Flips to false on elimination and never back.
    pub alive: bool,
}

impl Player {
    /// Create a new living player with the given id and name.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alive: true,
        }
    }

    /// Mark the player as eliminated. Returns false if they already were.
    pub fn eliminate(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        was_alive
    }
}

/// How a player is shown to the tracked player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The tracked player.
    #[serde(rename = "self")]
    SelfPlayer,
    Eliminated,
    /// In the current candidate pool.
    LikelyNext,
    /// Alive but outside the candidate pool.
    RecentlyFaced,
}

/// Which candidate-pool rule applies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// More than four players alive: only the last opponent is excluded.
    #[default]
    Normal,
    /// Four or fewer alive: strict rotation through the bag.
    LateGame,
}
