//! Data structures for the rotation tracker: players, roster, session state, errors.

mod error;
mod player;
mod roster;
mod session;

pub use error::SessionError;
pub use player::{Classification, Phase, Player, PlayerId};
pub use roster::{PlayerRoster, ROSTER_SIZE};
pub use session::{FaceRecord, Session, SessionId, SessionView};
