//! Integration tests for the late game (four or fewer alive): bag rotation.

use lobby_rotation_web::{
    apply_event, create_session, Classification, EliminateEvent, EventOutcome, FacedEvent, Phase,
    PlayerId, RefillReason, Session,
};
use std::collections::HashSet;

fn new_session() -> Session {
    let names: Vec<String> = (1..=8).map(|i| format!("P{i}")).collect();
    create_session(&names, 1).unwrap()
}

fn applied(outcome: EventOutcome) -> lobby_rotation_web::BagUpdate {
    match outcome {
        EventOutcome::Applied(update) => update,
        other => panic!("expected applied, got {other:?}"),
    }
}

fn face(s: &mut Session, id: PlayerId) -> lobby_rotation_web::BagUpdate {
    applied(apply_event(s, FacedEvent { player_id: id }).unwrap())
}

fn eliminate(s: &mut Session, id: PlayerId) -> lobby_rotation_web::BagUpdate {
    applied(apply_event(s, EliminateEvent { player_id: id }).unwrap())
}

fn class_of(s: &Session, id: PlayerId) -> Classification {
    s.classify()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap()
        .classification
}

/// Self = 1, players 5..=8 eliminated: late game with opponents 2, 3, 4.
fn late_game_session() -> Session {
    let mut s = new_session();
    for id in [5, 6, 7] {
        let update = eliminate(&mut s, id);
        assert!(update.bypassed);
        assert_eq!(s.phase(), Phase::Normal);
    }
    assert_eq!(s.roster().alive_count(), 5);
    let update = eliminate(&mut s, 8);
    assert_eq!(update.refilled, Some(RefillReason::Empty));
    assert_eq!(s.phase(), Phase::LateGame);
    s
}

#[test]
fn entering_late_game_fills_the_bag() {
    let s = late_game_session();
    assert_eq!(s.bag().bag(), &[2, 3, 4]);
    assert_eq!(s.candidate_pool(), vec![2, 3, 4]);
    assert_eq!(s.view().bag, Some(vec![2, 3, 4]));
}

#[test]
fn entering_late_game_excludes_last_opponent() {
    let mut s = new_session();
    face(&mut s, 3);
    for id in [5, 6, 7, 8] {
        eliminate(&mut s, id);
    }
    assert_eq!(s.bag().bag(), &[2, 4]);
}

#[test]
fn full_cycle_then_refill() {
    let mut s = late_game_session();

    let update = face(&mut s, 2);
    assert_eq!(update.consumed, Some(2));
    assert_eq!(update.refilled, None);
    assert_eq!(s.bag().bag(), &[3, 4]);
    assert_eq!(class_of(&s, 3), Classification::LikelyNext);
    assert_eq!(class_of(&s, 4), Classification::LikelyNext);
    assert_eq!(class_of(&s, 2), Classification::RecentlyFaced);
    assert_eq!(class_of(&s, 1), Classification::SelfPlayer);
    assert_eq!(class_of(&s, 5), Classification::Eliminated);

    face(&mut s, 3);
    assert_eq!(s.bag().bag(), &[4]);
    assert_eq!(class_of(&s, 2), Classification::RecentlyFaced);
    assert_eq!(class_of(&s, 3), Classification::RecentlyFaced);
    assert_eq!(class_of(&s, 4), Classification::LikelyNext);

    let update = face(&mut s, 4);
    assert_eq!(update.consumed, Some(4));
    assert!(update.exhausted);
    assert_eq!(s.bag().cycles_completed(), 1);
    assert_eq!(s.bag().bag(), &[2, 3]);
    assert_eq!(class_of(&s, 4), Classification::RecentlyFaced);
}

#[test]
fn every_opponent_is_faced_once_per_cycle() {
    let mut s = late_game_session();
    for _ in 0..3 {
        let k = s.bag().bag().len();
        let mut seen = HashSet::new();
        for step in 0..k {
            let next = s.candidate_pool()[0];
            assert!(seen.insert(next), "repeat of {next} within a cycle");
            let before = s.bag().bag().len();
            let update = face(&mut s, next);
            if step + 1 < k {
                assert_eq!(s.bag().bag().len(), before - 1);
                assert!(!update.exhausted);
            } else {
                assert!(update.exhausted);
            }
        }
    }
    assert_eq!(s.bag().cycles_completed(), 3);
}

#[test]
fn eliminating_a_bag_member_redraws_without_stale_ids() {
    let mut s = late_game_session();
    face(&mut s, 2);
    assert_eq!(s.bag().bag(), &[3, 4]);

    let update = eliminate(&mut s, 3);
    assert_eq!(update.refilled, Some(RefillReason::Stale));
    assert_eq!(s.bag().bag(), &[4]);
    assert_eq!(class_of(&s, 3), Classification::Eliminated);
    assert_eq!(class_of(&s, 2), Classification::RecentlyFaced);
}

#[test]
fn facing_outside_the_bag_starts_a_new_cycle() {
    let mut s = late_game_session();
    face(&mut s, 2);
    let update = face(&mut s, 2);
    assert_eq!(update.refilled, Some(RefillReason::CycleBoundary));
    assert_eq!(s.bag().bag(), &[3, 4]);
}

#[test]
fn eliminating_last_opponent_is_a_cycle_boundary() {
    let mut s = late_game_session();
    face(&mut s, 3);
    assert_eq!(s.bag().bag(), &[2, 4]);
    let update = eliminate(&mut s, 3);
    assert_eq!(update.refilled, Some(RefillReason::CycleBoundary));
    assert_eq!(s.bag().bag(), &[2, 4]);
    assert!(s.bag().bag().iter().all(|&id| s.roster().is_alive(id)));
}

#[test]
fn last_opponent_is_never_in_the_pool() {
    let mut s = late_game_session();
    for id in [4, 2, 3, 3, 2, 4, 4] {
        face(&mut s, id);
        assert!(!s.candidate_pool().contains(&id));
    }
}

#[test]
fn single_remaining_opponent_after_facing_them() {
    let mut s = late_game_session();
    eliminate(&mut s, 3);
    eliminate(&mut s, 4);
    assert_eq!(s.bag().bag(), &[2]);
    face(&mut s, 2);
    assert!(s.candidate_pool().is_empty());
    assert_eq!(class_of(&s, 2), Classification::RecentlyFaced);
}
