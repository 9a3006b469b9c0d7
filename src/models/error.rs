//! Errors raised while configuring a session or applying events to it.

use crate::models::player::PlayerId;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Roster must have exactly 8 names.
    WrongRosterSize { expected: usize, got: usize },
    /// Self index is 1-based and must be within the roster.
    InvalidSelfIndex { index: usize, roster_size: usize },
    /// CSV roster input contained no record.
    EmptyRoster,
    /// Event referenced an id that is not in the roster.
    UnknownPlayer(PlayerId),
    /// Event targeted the tracked player.
    SelfTarget,
    /// Faced event referenced a player who is already out.
    PlayerEliminated(PlayerId),
    /// Rotation state is inconsistent. Never expected; always surfaced.
    InvariantViolation(String),
}

impl SessionError {
    /// Fatal at session creation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SessionError::WrongRosterSize { .. }
                | SessionError::InvalidSelfIndex { .. }
                | SessionError::EmptyRoster
        )
    }

    /// Recovered as a no-op by the event dispatcher.
    pub fn is_invalid_event(&self) -> bool {
        matches!(
            self,
            SessionError::UnknownPlayer(_)
                | SessionError::SelfTarget
                | SessionError::PlayerEliminated(_)
        )
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::WrongRosterSize { expected, got } => {
                write!(f, "Roster must have exactly {} players (got {})", expected, got)
            }
            SessionError::InvalidSelfIndex { index, roster_size } => {
                write!(f, "Self index {} is out of range 1..={}", index, roster_size)
            }
            SessionError::EmptyRoster => write!(f, "No player names were given"),
            SessionError::UnknownPlayer(id) => write!(f, "No player with id {}", id),
            SessionError::SelfTarget => write!(f, "The tracked player cannot be the target"),
            SessionError::PlayerEliminated(id) => write!(f, "Player {} is already eliminated", id),
            SessionError::InvariantViolation(msg) => write!(f, "Rotation invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}
