//! OpponentTracker: who the tracked player is and whom they fought last.

use crate::models::{PlayerId, PlayerRoster, SessionError};
use serde::{Deserialize, Serialize};

/// Remembers the tracked player's most recent opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OpponentTracker {
    self_id: PlayerId,
    last: Option<PlayerId>,
}

impl OpponentTracker {
    /// Fresh tracker for the given tracked player, no opponent recorded.
    pub fn new(self_id: PlayerId) -> Self {
        Self {
            self_id,
            last: None,
        }
    }

    pub fn self_id(&self) -> PlayerId {
        self.self_id
    }

    /// The most recently faced opponent, if any.
    pub fn last(&self) -> Option<PlayerId> {
        self.last
    }

    /// Set the last opponent. Self, unknown ids and eliminated players are
    /// rejected and leave the tracker untouched.
    pub fn record_faced(&mut self, id: PlayerId, roster: &PlayerRoster) -> Result<(), SessionError> {
        if !roster.contains(id) {
            return Err(SessionError::UnknownPlayer(id));
        }
        if id == self.self_id {
            return Err(SessionError::SelfTarget);
        }
        if !roster.is_alive(id) {
            return Err(SessionError::PlayerEliminated(id));
        }
        self.last = Some(id);
        Ok(())
    }
}
