//! Persistence integration tests.
//!
//! Saving through a `PersistencePort` and resuming play from the loaded
//! document.

use volley_stats::{
    Action, MatchConfig, MatchDocument, MatchEngine, MatchError, MatchId, MatchPhase,
    MemoryStore, PendingAction, PersistenceError, PersistencePort, PlayerEntry, PlayerId, Slot,
    StatKind, StatScope, Team,
};

/// A match mid-set with a substitution made and some stats recorded.
fn played() -> (MatchEngine, Vec<PlayerId>) {
    let mut engine = MatchEngine::new(MatchConfig::default());
    let entries = (1..=9).map(|n| PlayerEntry::new(n, format!("P{}", n))).collect();
    engine.start_match(entries, "league night").unwrap();

    let ids: Vec<_> = engine.roster().ids().collect();
    for (slot, id) in Slot::ALL.into_iter().zip(ids.iter().copied()) {
        engine.set_lineup_slot(slot, Some(id)).unwrap();
    }
    engine.select_libero(Some(ids[8])).unwrap();
    engine.select_setter(ids[1]).unwrap();
    engine.start_set(Team::Opponent).unwrap();

    engine.record_stat(Some(ids[3]), Action::Stat(StatKind::Kill)).unwrap();
    engine.record_stat(None, Action::Stat(StatKind::Ace)).unwrap();
    engine.substitute(Slot::THREE, ids[3], ids[6]).unwrap();
    (engine, ids)
}

// =============================================================================
// Round trips
// =============================================================================

/// Test that a saved match loads with identical state.
#[test]
fn test_save_load_round_trip() {
    let (engine, _) = played();
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();

    let match_id = engine.match_id().unwrap().clone();
    assert_eq!(store.match_ids(), vec![match_id.clone()]);

    let loaded = MatchEngine::load(&store, &match_id, MatchConfig::default()).unwrap();

    assert_eq!(loaded.live(), engine.live());
    assert_eq!(loaded.roster(), engine.roster());
    assert_eq!(loaded.phase(), MatchPhase::Playing);
    assert_eq!(loaded.match_name(), "league night");
    assert!(!loaded.can_undo());
}

/// Test that substitution groups are rebuilt and still enforced.
#[test]
fn test_groups_survive_reload() {
    let (engine, ids) = played();
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();
    let mut loaded =
        MatchEngine::load(&store, engine.match_id().unwrap(), MatchConfig::default()).unwrap();

    assert_eq!(loaded.ledger().group_of(ids[6]), Some(ids[3]));
    assert!(matches!(
        loaded.substitute(Slot::ONE, ids[1], ids[3]),
        Err(MatchError::IllegalCrossGroup { .. })
    ));
    assert!(loaded.substitute(Slot::THREE, ids[6], ids[3]).is_ok());
}

/// Test that play continues normally after a reload.
#[test]
fn test_resume_after_reload() {
    let (engine, ids) = played();
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();
    let mut loaded =
        MatchEngine::load(&store, engine.match_id().unwrap(), MatchConfig::default()).unwrap();

    loaded.record_stat(None, Action::Stat(StatKind::Ace)).unwrap();

    assert_eq!(loaded.state().home_score, 3);
    assert_eq!(loaded.stats(StatScope::Set).get(ids[1], StatKind::Ace), 2);
    assert_eq!(loaded.stats(StatScope::Set).get(ids[1], StatKind::ServeAttempt), 3);
    assert!(loaded.can_undo());
}

/// Test that a pending KWDA assist is saved with the match.
#[test]
fn test_pending_assist_persisted() {
    let (mut engine, ids) = played();
    engine.record_stat(Some(ids[4]), Action::Kwda).unwrap();

    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();
    let mut loaded =
        MatchEngine::load(&store, engine.match_id().unwrap(), MatchConfig::default()).unwrap();

    assert_eq!(loaded.pending(), Some(PendingAction::AssistFor { attacker: ids[4] }));
    assert!(loaded.record_kwda_assist(ids[1]).is_ok());
}

/// Test that saving again replaces the earlier save.
#[test]
fn test_resave_replaces() {
    let (mut engine, _) = played();
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();
    engine.record_stat(None, Action::OpponentPoint).unwrap();
    engine.save(&mut store).unwrap();

    assert_eq!(store.len(), 1);
    let document = store.load(engine.match_id().unwrap()).unwrap();
    assert_eq!(document.game_state.opponent_score, 1);
    assert_eq!(document.point_log.first().map(String::as_str), Some("O: Point Opponent"));
}

// =============================================================================
// Documents
// =============================================================================

/// Test the JSON shape of saved stats.
#[test]
fn test_document_json() {
    let (engine, _) = played();
    let document = engine.to_document().unwrap();
    let json = document.to_json().unwrap();

    assert!(json.contains("\"Kill\": 1"));
    assert!(json.contains("\"Hit Attempt\": 1"));
    assert!(json.contains("\"phase\": \"playing\""));
    assert_eq!(MatchDocument::from_json(&json).unwrap(), document);
}

// =============================================================================
// Errors
// =============================================================================

/// Test loading an unknown id.
#[test]
fn test_load_missing_match() {
    let store = MemoryStore::new();
    let missing = MatchId::new("nope");

    assert_eq!(
        MatchEngine::load(&store, &missing, MatchConfig::default()).err(),
        Some(PersistenceError::NotFound(missing))
    );
}

/// Test that nothing can be saved before a match starts.
#[test]
fn test_save_without_match() {
    let engine = MatchEngine::new(MatchConfig::default());
    let mut store = MemoryStore::new();

    assert_eq!(engine.save(&mut store), Err(PersistenceError::NoMatch));
    assert!(store.is_empty());
}

/// Test that a document with an impossible rotation is rejected on load.
#[test]
fn test_out_of_range_rotation_rejected() {
    let (engine, _) = played();
    let mut document = engine.to_document().unwrap();
    document.game_state.rotation = 7;
    let document = MatchDocument::from_json(&document.to_json().unwrap()).unwrap();

    assert!(matches!(
        MatchEngine::from_document(document.clone(), MatchConfig::default()),
        Err(PersistenceError::Decode(_))
    ));

    let mut store = MemoryStore::new();
    store.save(&document).unwrap();
    assert!(matches!(
        MatchEngine::load(&store, &document.match_id, MatchConfig::default()),
        Err(PersistenceError::Decode(_))
    ));
}

/// Test that lineup and bench ids must resolve against the roster.
#[test]
fn test_unrostered_ids_rejected() {
    let (engine, ids) = played();
    let stranger = PlayerId(99);
    assert!(!engine.roster().contains(stranger));

    let mut in_lineup = engine.to_document().unwrap();
    in_lineup.lineup.set_slot(Slot::TWO, Some(stranger));
    assert!(matches!(
        MatchEngine::from_document(in_lineup, MatchConfig::default()),
        Err(PersistenceError::Decode(_))
    ));

    let mut on_bench = engine.to_document().unwrap();
    on_bench.bench.push(stranger);
    assert!(matches!(
        MatchEngine::from_document(on_bench, MatchConfig::default()),
        Err(PersistenceError::Decode(_))
    ));

    let mut doubled = engine.to_document().unwrap();
    doubled.bench.push(ids[1]);
    assert!(matches!(
        MatchEngine::from_document(doubled, MatchConfig::default()),
        Err(PersistenceError::Decode(_))
    ));
}
