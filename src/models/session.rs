//! Session: the single owner of roster, tracker and bag, plus its display snapshot.

use crate::logic::bag::BagScheduler;
use crate::logic::eligibility::{self, PlayerClassification};
use crate::logic::tracker::OpponentTracker;
use crate::models::player::{Phase, PlayerId};
use crate::models::roster::PlayerRoster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// One applied faced event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub round: u32,
    pub opponent: PlayerId,
    pub at: DateTime<Utc>,
}

/// Rotation state for one tracked player in one lobby.
///
/// Fields are only mutated by `logic::events` (and `logic::setup` on restart);
/// everything else reads through the accessors or `view()`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) roster: PlayerRoster,
    pub(crate) tracker: OpponentTracker,
    pub(crate) bag: BagScheduler,
    /// Number of applied faced events.
    pub(crate) round: u32,
    pub(crate) history: Vec<FaceRecord>,
}

impl Session {
    pub(crate) fn new(roster: PlayerRoster, self_id: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            roster,
            tracker: OpponentTracker::new(self_id),
            bag: BagScheduler::new(),
            round: 0,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    pub fn tracker(&self) -> &OpponentTracker {
        &self.tracker
    }

    pub fn bag(&self) -> &BagScheduler {
        &self.bag
    }

    pub fn self_id(&self) -> PlayerId {
        self.tracker.self_id()
    }

    pub fn last_opponent(&self) -> Option<PlayerId> {
        self.tracker.last()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn history(&self) -> &[FaceRecord] {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        eligibility::phase_for(self.roster.alive_count())
    }

    /// Opponents currently likely next, in roster order.
    pub fn candidate_pool(&self) -> Vec<PlayerId> {
        eligibility::candidate_pool(&self.roster, &self.tracker, &self.bag, self.phase())
    }

    /// Fresh classification of every player.
    pub fn classify(&self) -> Vec<PlayerClassification> {
        eligibility::compute(&self.roster, &self.tracker, &self.bag, self.phase())
    }

    /// Snapshot for the UI / API.
    pub fn view(&self) -> SessionView {
        let phase = self.phase();
        SessionView {
            id: self.id,
            created_at: self.created_at,
            phase,
            alive_count: self.roster.alive_count(),
            round: self.round,
            self_id: self.self_id(),
            last_opponent: self.last_opponent(),
            bag: match phase {
                Phase::LateGame => Some(self.bag.bag().to_vec()),
                Phase::Normal => None,
            },
            cycles_completed: self.bag.cycles_completed(),
            candidate_pool: self.candidate_pool(),
            players: self.classify(),
            history: self.history.clone(),
        }
    }
}

/// Read-only snapshot of a session (what the rendering side receives).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub alive_count: usize,
    pub round: u32,
    pub self_id: PlayerId,
    pub last_opponent: Option<PlayerId>,
    /// Only present in the late game.
    pub bag: Option<Vec<PlayerId>>,
    pub cycles_completed: u32,
    pub candidate_pool: Vec<PlayerId>,
    pub players: Vec<PlayerClassification>,
    pub history: Vec<FaceRecord>,
}
