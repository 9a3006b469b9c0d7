//! Rotation business logic: setup, opponent tracking, late-game bag, classification, events.

pub mod bag;
pub mod eligibility;
mod events;
mod setup;
pub mod tracker;

pub use bag::{BagScheduler, BagUpdate, RefillReason, LATE_GAME_ALIVE_COUNT};
pub use eligibility::{candidate_pool, compute, phase_for, PlayerClassification};
pub use events::{apply_event, EliminateEvent, EventOutcome, FacedEvent, SessionEvent};
pub use setup::{create_session, parse_roster_csv, restart_session};
pub use tracker::OpponentTracker;
