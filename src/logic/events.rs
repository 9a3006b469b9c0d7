//! Typed events from the UI and the single path through which they mutate a session.
//!
//! Every applied event runs the bag recompute once; classification is then
//! derived fresh from the resulting state (`Session::classify`). Events that
//! reference an unknown id, the tracked player, or (for faced events) an
//! eliminated player are ignored and leave the session untouched.

use crate::logic::bag::BagUpdate;
use crate::models::{FaceRecord, PlayerId, Session, SessionError};
use chrono::Utc;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// The tracked player just fought `player_id`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FacedEvent {
    pub player_id: PlayerId,
}

/// `player_id` is out of the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EliminateEvent {
    pub player_id: PlayerId,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Faced(FacedEvent),
    Eliminate(EliminateEvent),
}

impl From<FacedEvent> for SessionEvent {
    fn from(e: FacedEvent) -> Self {
        SessionEvent::Faced(e)
    }
}

impl From<EliminateEvent> for SessionEvent {
    fn from(e: EliminateEvent) -> Self {
        SessionEvent::Eliminate(e)
    }
}

/// Result of dispatching an event that did not hit an invariant violation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventOutcome {
    Applied(BagUpdate),
    /// Invalid event, recovered as a no-op.
    Ignored(SessionError),
}

impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EventOutcome::Applied(_))
    }
}

/// Apply one event and recompute. `Err` only for `SessionError::InvariantViolation`.
pub fn apply_event(
    session: &mut Session,
    event: impl Into<SessionEvent>,
) -> Result<EventOutcome, SessionError> {
    let event = event.into();
    let mutation = match event {
        SessionEvent::Faced(e) => record_faced(session, e),
        SessionEvent::Eliminate(e) => eliminate(session, e),
    };
    if let Err(reason) = mutation {
        warn!("Session {}: ignoring {:?}: {}", session.id(), event, reason);
        return Ok(EventOutcome::Ignored(reason));
    }

    match session.bag.recompute(&session.roster, &session.tracker) {
        Ok(update) => Ok(EventOutcome::Applied(update)),
        Err(e) => {
            error!("Session {}: {} after {:?}", session.id(), e, event);
            Err(e)
        }
    }
}

fn record_faced(session: &mut Session, event: FacedEvent) -> Result<(), SessionError> {
    session.tracker.record_faced(event.player_id, &session.roster)?;
    session.round += 1;
    session.history.push(FaceRecord {
        round: session.round,
        opponent: event.player_id,
        at: Utc::now(),
    });
    Ok(())
}

fn eliminate(session: &mut Session, event: EliminateEvent) -> Result<(), SessionError> {
    let id = event.player_id;
    if !session.roster.contains(id) {
        return Err(SessionError::UnknownPlayer(id));
    }
    if id == session.tracker.self_id() {
        return Err(SessionError::SelfTarget);
    }
    if !session.roster.eliminate(id) {
        return Err(SessionError::PlayerEliminated(id));
    }
    info!(
        "Session {}: player {} eliminated, {} alive",
        session.id(),
        id,
        session.roster.alive_count()
    );
    Ok(())
}
