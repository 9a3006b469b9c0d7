//! PlayerRoster: the fixed table of eight players keyed by stable id.

use crate::models::error::SessionError;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Players in a lobby. Always exactly this many.
pub const ROSTER_SIZE: usize = 8;

/// The fixed set of players and their alive/eliminated status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    /// Create players with ids 1..=8 in input order, all alive. Names are trimmed.
    pub fn initialize<S: AsRef<str>>(names: &[S]) -> Result<Self, SessionError> {
        if names.len() != ROSTER_SIZE {
            return Err(SessionError::WrongRosterSize {
                expected: ROSTER_SIZE,
                got: names.len(),
            });
        }
        let players = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Player::new(id, name.as_ref().trim()))
            .collect();
        Ok(Self { players })
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        // Ids are 1-based and dense, so the table index is id - 1.
        (id as usize)
            .checked_sub(1)
            .and_then(|idx| self.players.get(idx))
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        (id as usize)
            .checked_sub(1)
            .and_then(move |idx| self.players.get_mut(idx))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    /// Set `alive = false`. Returns true only if the flag actually flipped;
    /// unknown ids and already eliminated players are a no-op.
    pub fn eliminate(&mut self, id: PlayerId) -> bool {
        self.get_mut(id).is_some_and(Player::eliminate)
    }

    /// Ids of living players in original order.
    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.players.iter().filter(|p| p.alive).map(|p| p.id).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Display names in roster order (used to restart a session).
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}
