//! Lobby rotation tracker web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_event, create_session, parse_roster_csv, restart_session, BagScheduler, BagUpdate,
    EliminateEvent, EventOutcome, FacedEvent, OpponentTracker, PlayerClassification, RefillReason,
    SessionEvent, LATE_GAME_ALIVE_COUNT,
};
pub use models::{
    Classification, FaceRecord, Phase, Player, PlayerId, PlayerRoster, Session, SessionError,
    SessionId, SessionView, ROSTER_SIZE,
};
