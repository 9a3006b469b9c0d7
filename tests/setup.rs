//! Integration tests for session setup: roster validation, CSV parsing, restart.

use lobby_rotation_web::{
    apply_event, create_session, parse_roster_csv, restart_session, Classification, EliminateEvent,
    FacedEvent, Phase, SessionError,
};

const NAMES: [&str; 8] = ["Ann", "Bo", "Cy", "Di", "Ed", "Flo", "Gus", "Hal"];

#[test]
fn create_assigns_ids_in_input_order() {
    let s = create_session(&NAMES, 3).unwrap();
    let players = s.roster().players();
    assert_eq!(players.len(), 8);
    for (i, p) in players.iter().enumerate() {
        assert_eq!(p.id as usize, i + 1);
        assert_eq!(p.name, NAMES[i]);
        assert!(p.alive);
    }
    assert_eq!(s.self_id(), 3);
    assert_eq!(s.last_opponent(), None);
    assert_eq!(s.phase(), Phase::Normal);
    assert_eq!(s.roster().alive_ids(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn create_rejects_wrong_roster_size() {
    let seven = &NAMES[..7];
    assert_eq!(
        create_session(seven, 1).unwrap_err(),
        SessionError::WrongRosterSize { expected: 8, got: 7 }
    );
    let nine: Vec<&str> = NAMES.iter().copied().chain(["Ivy"]).collect();
    let err = create_session(&nine, 1).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn create_rejects_self_index_out_of_range() {
    for index in [0, 9, 100] {
        assert_eq!(
            create_session(&NAMES, index).unwrap_err(),
            SessionError::InvalidSelfIndex { index, roster_size: 8 }
        );
    }
    assert!(create_session(&NAMES, 8).is_ok());
}

#[test]
fn roster_size_is_checked_before_self_index() {
    assert!(matches!(
        create_session(&NAMES[..2], 0),
        Err(SessionError::WrongRosterSize { .. })
    ));
}

#[test]
fn names_are_trimmed() {
    let names = ["  Ann ", "Bo", "Cy", "Di", "Ed", "Flo", "Gus", "Hal\t"];
    let s = create_session(&names, 1).unwrap();
    assert_eq!(s.roster().get(1).unwrap().name, "Ann");
    assert_eq!(s.roster().get(8).unwrap().name, "Hal");
}

#[test]
fn csv_roster_handles_quotes_and_spaces() {
    let names = parse_roster_csv("Ann, Bo ,\"Smith, J\",Di,Ed,Flo,Gus,Hal").unwrap();
    assert_eq!(names.len(), 8);
    assert_eq!(names[1], "Bo");
    assert_eq!(names[2], "Smith, J");
    assert!(create_session(&names, 1).is_ok());
}

#[test]
fn csv_roster_uses_first_line_only() {
    let names = parse_roster_csv("A,B,C,D,E,F,G,H\nI,J").unwrap();
    assert_eq!(names, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
}

#[test]
fn empty_csv_is_a_configuration_error() {
    let err = parse_roster_csv("").unwrap_err();
    assert_eq!(err, SessionError::EmptyRoster);
    assert!(err.is_configuration());
}

#[test]
fn restart_revives_everyone_and_clears_rotation() {
    let mut s = create_session(&NAMES, 1).unwrap();
    let id = s.id();
    for pid in [5, 6, 7, 8] {
        apply_event(&mut s, EliminateEvent { player_id: pid }).unwrap();
    }
    apply_event(&mut s, FacedEvent { player_id: 2 }).unwrap();
    assert_eq!(s.phase(), Phase::LateGame);

    restart_session(&mut s);

    assert_eq!(s.id(), id);
    assert_eq!(s.roster().alive_count(), 8);
    assert_eq!(s.last_opponent(), None);
    assert_eq!(s.round(), 0);
    assert!(s.history().is_empty());
    assert!(s.bag().bag().is_empty());
    assert_eq!(s.bag().cycles_completed(), 0);
    assert_eq!(s.phase(), Phase::Normal);
    assert_eq!(s.roster().get(2).unwrap().name, "Bo");
    let classes: Vec<_> = s.classify().into_iter().map(|p| p.classification).collect();
    assert_eq!(classes[0], Classification::SelfPlayer);
    assert!(classes[1..].iter().all(|&c| c == Classification::LikelyNext));
}
