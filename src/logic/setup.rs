//! Session setup: roster parsing, creation and restart.

use crate::logic::bag::BagScheduler;
use crate::logic::tracker::OpponentTracker;
use crate::models::{PlayerId, PlayerRoster, Session, SessionError, ROSTER_SIZE};
use chrono::Utc;
use log::info;

/// Create a session from exactly 8 names and a 1-indexed self index.
/// Either problem fails creation; no partial session is returned.
pub fn create_session<S: AsRef<str>>(names: &[S], self_index: usize) -> Result<Session, SessionError> {
    let roster = PlayerRoster::initialize(names)?;
    let self_id = self_id_from_index(self_index)?;
    let session = Session::new(roster, self_id);
    info!(
        "Created session {} tracking player {} ({})",
        session.id(),
        self_id,
        session.roster().get(self_id).map(|p| p.name.as_str()).unwrap_or_default()
    );
    Ok(session)
}

fn self_id_from_index(self_index: usize) -> Result<PlayerId, SessionError> {
    if (1..=ROSTER_SIZE).contains(&self_index) {
        // ROSTER_SIZE fits in a PlayerId, so the cast cannot truncate.
        Ok(self_index as PlayerId)
    } else {
        Err(SessionError::InvalidSelfIndex {
            index: self_index,
            roster_size: ROSTER_SIZE,
        })
    }
}

/// Parse a roster pasted as one CSV line (e.g. `Ann, Bo, "Smith, J", ...`).
/// Only the first record is used; fields are trimmed.
pub fn parse_roster_csv(input: &str) -> Result<Vec<String>, SessionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        // Malformed CSV is reported like a missing roster.
        Some(Err(_)) | None => Err(SessionError::EmptyRoster),
    }
}

/// Start over with the same names and tracked player: everyone alive, no last
/// opponent, empty bag and history. The session id is kept.
pub fn restart_session(session: &mut Session) {
    let names = session.roster.names();
    let self_id = session.tracker.self_id();
    // The roster came from a valid 8-name list, so initialize cannot fail here.
    if let Ok(roster) = PlayerRoster::initialize(&names) {
        session.roster = roster;
    }
    session.tracker = OpponentTracker::new(self_id);
    session.bag = BagScheduler::new();
    session.round = 0;
    session.history.clear();
    session.created_at = Utc::now();
    info!("Restarted session {}", session.id());
}
