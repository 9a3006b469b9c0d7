//! Late-game rotation: the exhaustion bag.
//!
//! While four or fewer players are alive the tracked player should meet every
//! other living opponent once before meeting anyone again. The bag holds the
//! opponents not yet faced in the current cycle; it is recomputed exactly once
//! per applied event:
//!
//! 1. `live` = alive ids minus self.
//! 2. Refill `bag := live - last` if the bag is empty, holds an id no longer in
//!    `live`, or no longer holds `last` (cycle boundary).
//! 3. Remove `last` from the bag if it is still there.
//!
//! When step 3 empties the bag the cycle is complete and a new one is drawn
//! immediately, so the candidate pool is only empty when `live - last` is.

use crate::logic::tracker::OpponentTracker;
use crate::models::{PlayerId, PlayerRoster, SessionError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Alive count (self included) at or below which the bag applies.
pub const LATE_GAME_ALIVE_COUNT: usize = 4;

pub fn is_late_game(alive_count: usize) -> bool {
    alive_count <= LATE_GAME_ALIVE_COUNT
}

/// Why the bag was redrawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefillReason {
    Empty,
    /// Held an opponent who has since been eliminated.
    Stale,
    /// Last opponent was not in the bag.
    CycleBoundary,
}

/// What one recompute did to the bag.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BagUpdate {
    /// Normal phase: bag cleared and not consulted.
    pub bypassed: bool,
    pub refilled: Option<RefillReason>,
    /// Opponent marked used for this cycle.
    pub consumed: Option<PlayerId>,
    /// The consumption emptied the bag and a new cycle was drawn.
    pub exhausted: bool,
}

/// Ordered set of opponents not yet faced in the current late-game cycle.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BagScheduler {
    bag: Vec<PlayerId>,
    cycles_completed: u32,
}

impl BagScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bag contents in roster order.
    pub fn bag(&self) -> &[PlayerId] {
        &self.bag
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.bag.contains(&id)
    }

    /// Number of late-game cycles the tracked player has gone all the way through.
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Run one recompute against the current roster and tracker.
    ///
    /// Must be called once per applied mutation: step 2 treats a missing last
    /// opponent as a cycle boundary, so a second call without a new event
    /// would start a new cycle early.
    pub fn recompute(
        &mut self,
        roster: &PlayerRoster,
        tracker: &OpponentTracker,
    ) -> Result<BagUpdate, SessionError> {
        if !is_late_game(roster.alive_count()) {
            self.bag.clear();
            return Ok(BagUpdate {
                bypassed: true,
                ..BagUpdate::default()
            });
        }

        let live = live_opponents(roster, tracker.self_id());
        let last = tracker.last();
        let mut update = BagUpdate::default();

        if let Some(reason) = self.refill_reason(&live, last) {
            self.refill(&live, last);
            self.check_fresh(roster, tracker)?;
            debug!("Bag refilled ({:?}): {:?}", reason, self.bag);
            update.refilled = Some(reason);
        }

        if let Some(last) = last {
            if let Some(pos) = self.bag.iter().position(|&id| id == last) {
                self.bag.remove(pos);
                update.consumed = Some(last);
                debug!("Opponent {} used this cycle, bag now {:?}", last, self.bag);
            }
        }

        if self.bag.is_empty() && update.consumed.is_some() {
            self.cycles_completed += 1;
            self.refill(&live, last);
            self.check_fresh(roster, tracker)?;
            update.exhausted = true;
            debug!(
                "Cycle {} complete, new bag {:?}",
                self.cycles_completed, self.bag
            );
        }

        Ok(update)
    }

    fn refill_reason(&self, live: &[PlayerId], last: Option<PlayerId>) -> Option<RefillReason> {
        if self.bag.is_empty() {
            Some(RefillReason::Empty)
        } else if self.bag.iter().any(|id| !live.contains(id)) {
            Some(RefillReason::Stale)
        } else if last.is_some_and(|l| !self.bag.contains(&l)) {
            Some(RefillReason::CycleBoundary)
        } else {
            None
        }
    }

    fn refill(&mut self, live: &[PlayerId], last: Option<PlayerId>) {
        self.bag = live
            .iter()
            .copied()
            .filter(|&id| Some(id) != last)
            .collect();
    }

    /// A freshly drawn bag may only hold living opponents other than `last`.
    fn check_fresh(&self, roster: &PlayerRoster, tracker: &OpponentTracker) -> Result<(), SessionError> {
        let bad = self.bag.iter().find(|&&id| {
            id == tracker.self_id() || !roster.is_alive(id) || Some(id) == tracker.last()
        });
        match bad {
            Some(id) => Err(SessionError::InvariantViolation(format!(
                "bag {:?} holds {} right after a refill (self {}, last {:?})",
                self.bag,
                id,
                tracker.self_id(),
                tracker.last()
            ))),
            None => Ok(()),
        }
    }
}

/// Alive ids minus the tracked player, in roster order.
pub fn live_opponents(roster: &PlayerRoster, self_id: PlayerId) -> Vec<PlayerId> {
    roster
        .alive_ids()
        .into_iter()
        .filter(|&id| id != self_id)
        .collect()
}
