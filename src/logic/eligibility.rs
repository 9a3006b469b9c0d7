//! Classify every player for display: self, eliminated, likely next, recently faced.

use crate::logic::bag::{is_late_game, live_opponents, BagScheduler};
use crate::logic::tracker::OpponentTracker;
use crate::models::{Classification, Phase, PlayerId, PlayerRoster};
use serde::{Deserialize, Serialize};

/// One row of the classification handed to the UI.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerClassification {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub classification: Classification,
}

/// Phase implied by the number of living players (self included).
pub fn phase_for(alive_count: usize) -> Phase {
    if is_late_game(alive_count) {
        Phase::LateGame
    } else {
        Phase::Normal
    }
}

/// Opponents currently considered likely next, in roster order.
///
/// Late game: the bag. Normal: alive opponents minus the last opponent.
pub fn candidate_pool(
    roster: &PlayerRoster,
    tracker: &OpponentTracker,
    bag: &BagScheduler,
    phase: Phase,
) -> Vec<PlayerId> {
    match phase {
        Phase::LateGame => bag.bag().to_vec(),
        Phase::Normal => live_opponents(roster, tracker.self_id())
            .into_iter()
            .filter(|&id| Some(id) != tracker.last())
            .collect(),
    }
}

/// Full classification of all players. Pure; callers recompute it from scratch
/// after every event instead of patching a previous result.
pub fn compute(
    roster: &PlayerRoster,
    tracker: &OpponentTracker,
    bag: &BagScheduler,
    phase: Phase,
) -> Vec<PlayerClassification> {
    let pool = candidate_pool(roster, tracker, bag, phase);
    roster
        .players()
        .iter()
        .map(|p| {
            let classification = if p.id == tracker.self_id() {
                Classification::SelfPlayer
            } else if !p.alive {
                Classification::Eliminated
            } else if pool.contains(&p.id) {
                Classification::LikelyNext
            } else {
                Classification::RecentlyFaced
            };
            PlayerClassification {
                id: p.id,
                name: p.name.clone(),
                alive: p.alive,
                classification,
            }
        })
        .collect()
}
