// Integration tests for the mock draft.
//
// These tests exercise the full system end-to-end using the library crate's
// public API. They verify that the major subsystems (catalog loading, the
// snake board, the turn engine, session persistence, and roster slot
// arrangement) work together correctly.

use mock_draft::catalog::{Player, PlayerCatalog};
use mock_draft::config::{DraftConfig, RosterSlots};
use mock_draft::db::SessionStore;
use mock_draft::draft::engine::{SessionState, TurnState};
use mock_draft::draft::pick::{PlayerId, Position};
use mock_draft::draft::slotter;
use mock_draft::draft::DraftError;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Roster shape for a small 4-team draft: QB, RB, WR, 1 bench = 4 rounds.
fn small_roster() -> RosterSlots {
    RosterSlots {
        qb: 1,
        rb: 1,
        wr: 1,
        te: 0,
        flex: 0,
        k: 0,
        dst: 0,
        bench: 1,
    }
}

fn small_config(draft_slot: usize) -> DraftConfig {
    DraftConfig {
        num_teams: 4,
        draft_slot,
        roster: small_roster(),
    }
}

/// A catalog with a mix of positions, ranked by ADP 1..=n across QB, RB, WR
/// in rotation.
fn rotating_catalog(n: u32) -> PlayerCatalog {
    let players = (1..=n)
        .map(|i| {
            let position = match i % 3 {
                0 => Position::WideReceiver,
                1 => Position::Quarterback,
                _ => Position::RunningBack,
            };
            Player {
                id: PlayerId(i),
                name: format!("Player {i:02}"),
                position,
                college: format!("College {}", (i - 1) % 5 + 1),
                adp: Some(i as f64),
            }
        })
        .collect();
    PlayerCatalog::from_players(players).unwrap()
}

/// Drive a session to completion: CPU teams auto-pick, the user always takes
/// the best available player. Returns the user's pick ids in order.
fn drain_draft(state: &mut SessionState, catalog: &PlayerCatalog) -> Vec<PlayerId> {
    let mut user_picks = Vec::new();
    while !state.is_complete() {
        match state.turn_state() {
            TurnState::AutoAdvancing => {
                assert!(
                    state.run_autos(catalog.players()) > 0,
                    "pool exhausted mid-draft"
                );
            }
            TurnState::AwaitingPick => {
                let id = catalog
                    .players()
                    .iter()
                    .find(|p| !state.drafted.contains(&p.id))
                    .expect("pool exhausted on user turn")
                    .id;
                state.commit_user_pick(catalog, id).unwrap();
                user_picks.push(id);
            }
            TurnState::Complete => break,
        }
    }
    user_picks
}

// ===========================================================================
// Full draft flow
// ===========================================================================

#[test]
fn full_draft_fills_every_cell_exactly_once() {
    let catalog = rotating_catalog(20);
    let mut state = SessionState::from_config(&small_config(2)).unwrap();
    assert_eq!(state.board.total_cells(), 16);

    drain_draft(&mut state, &catalog);

    assert!(state.is_complete());
    assert_eq!(state.cursor, 16);
    assert_eq!(state.drafted.len(), 16);

    // Every cell filled, every drafted id unique.
    let mut seen = std::collections::HashSet::new();
    for cell in state.board.cells() {
        let entry = cell.player.as_ref().expect("cell left empty");
        assert!(seen.insert(entry.player_id), "player drafted twice");
    }

    // Roster sizes equal round count; the sum matches the drafted set.
    assert!(state.teams.iter().all(|t| t.picks.len() == 4));
    let total: usize = state.teams.iter().map(|t| t.picks.len()).sum();
    assert_eq!(total, state.drafted.len());
}

#[test]
fn user_in_slot_2_picks_at_snake_positions() {
    // 4 teams, user slot 2 (team index 1): picks at overall 2, 7, 10, 15.
    let catalog = rotating_catalog(20);
    let mut state = SessionState::from_config(&small_config(2)).unwrap();
    drain_draft(&mut state, &catalog);

    let user_overalls: Vec<u32> = state
        .board
        .cells()
        .filter(|c| c.team_index == 1)
        .map(|c| c.overall)
        .collect();
    assert_eq!(user_overalls, vec![2, 7, 10, 15]);
}

#[test]
fn cpu_teams_follow_adp_order() {
    let catalog = rotating_catalog(20);
    let mut state = SessionState::from_config(&small_config(4)).unwrap();

    // Round 1 before the user's turn: teams 0..=2 take players 1..=3.
    state.run_autos(catalog.players());
    assert_eq!(state.teams[0].picks, vec![PlayerId(1)]);
    assert_eq!(state.teams[1].picks, vec![PlayerId(2)]);
    assert_eq!(state.teams[2].picks, vec![PlayerId(3)]);
    assert_eq!(state.turn_state(), TurnState::AwaitingPick);
}

#[test]
fn user_pick_validation_and_retry() {
    let catalog = rotating_catalog(20);
    let mut state = SessionState::from_config(&small_config(2)).unwrap();
    state.run_autos(catalog.players());
    assert_eq!(state.turn_state(), TurnState::AwaitingPick);

    // Taken by the CPU team ahead of the user.
    assert_eq!(
        state.commit_user_pick(&catalog, PlayerId(1)),
        Err(DraftError::DuplicatePick(PlayerId(1)))
    );
    // Not in the catalog at all.
    assert_eq!(
        state.commit_user_pick(&catalog, PlayerId(500)),
        Err(DraftError::UnknownPlayer(PlayerId(500)))
    );
    // Still the user's turn; a valid pick succeeds.
    let outcome = state.commit_user_pick(&catalog, PlayerId(10)).unwrap();
    assert_eq!(outcome.overall, 2);
    assert_eq!(outcome.team_index, 1);
}

#[test]
fn exhausted_pool_halts_cleanly() {
    // 16 picks needed, only 5 players available.
    let catalog = rotating_catalog(5);
    let mut state = SessionState::from_config(&small_config(4)).unwrap();

    let made = state.run_autos(catalog.players());
    assert_eq!(made, 3);
    state.commit_user_pick(&catalog, PlayerId(4)).unwrap();
    // Back-to-back turn at the snake turnaround.
    assert_eq!(state.turn_state(), TurnState::AwaitingPick);
    state.commit_user_pick(&catalog, PlayerId(5)).unwrap();

    // All five players gone, eleven cells left, no progress possible.
    assert_eq!(state.drafted.len(), 5);
    assert!(!state.is_complete());
    assert_eq!(state.turn_state(), TurnState::AutoAdvancing);
    assert_eq!(state.run_autos(catalog.players()), 0);
    assert_eq!(state.cursor, 5);
}

// ===========================================================================
// Persistence round trip
// ===========================================================================

#[test]
fn session_survives_save_and_reload_mid_draft() {
    let catalog = rotating_catalog(20);
    let store = SessionStore::open(":memory:").unwrap();
    let session_id = SessionStore::generate_session_id();

    let mut state = SessionState::from_config(&small_config(2)).unwrap();
    state.run_autos(catalog.players());
    state.commit_user_pick(&catalog, PlayerId(2)).unwrap();
    store.save_session(&session_id, &state).unwrap();
    store.set_current_session_id(&session_id).unwrap();

    // Simulate a restart: reload from the store and keep drafting.
    let stored_id = store.current_session_id().unwrap().unwrap();
    assert_eq!(stored_id, session_id);
    let mut restored = store.load_session(&stored_id).unwrap().unwrap();
    assert_eq!(restored.cursor, state.cursor);
    assert_eq!(restored.drafted, state.drafted);
    assert_eq!(restored.turn_state(), TurnState::AutoAdvancing);

    drain_draft(&mut restored, &catalog);
    assert!(restored.is_complete());
    assert_eq!(restored.teams[1].picks[0], PlayerId(2));

    // Final save overwrites the mid-draft snapshot.
    store.save_session(&stored_id, &restored).unwrap();
    let final_state = store.load_session(&stored_id).unwrap().unwrap();
    assert!(final_state.is_complete());
}

#[test]
fn saved_session_is_not_resumable_after_config_change() {
    let catalog = rotating_catalog(20);
    let store = SessionStore::open(":memory:").unwrap();
    let session_id = SessionStore::generate_session_id();

    let old_config = small_config(2);
    let mut state = SessionState::from_config(&old_config).unwrap();
    state.run_autos(catalog.players());
    store.save_session(&session_id, &state).unwrap();
    store.set_current_session_id(&session_id).unwrap();

    // Same settings: the reloaded snapshot is still resumable.
    let reloaded = store.load_session(&session_id).unwrap().unwrap();
    assert!(reloaded.matches_config(&old_config));
    assert!(!reloaded.is_complete());

    // League shrank to a different team count: the snapshot is stale and a
    // fresh session must be built from the new settings instead.
    let new_config = DraftConfig {
        num_teams: 8,
        draft_slot: 2,
        roster: small_roster(),
    };
    assert!(!reloaded.matches_config(&new_config));
    let fresh = SessionState::from_config(&new_config).unwrap();
    assert_eq!(fresh.board.teams_per_round, 8);
    assert_eq!(fresh.cursor, 0);
}

#[test]
fn clear_discards_session_history() {
    let store = SessionStore::open(":memory:").unwrap();
    let state = SessionState::from_config(&small_config(1)).unwrap();
    store.save_session("mock_old", &state).unwrap();
    store.save_session("mock_new", &state).unwrap();
    store.set_current_session_id("mock_new").unwrap();

    store.clear().unwrap();

    assert!(store.current_session_id().unwrap().is_none());
    assert!(store.load_session("mock_old").unwrap().is_none());
    assert!(store.load_session("mock_new").unwrap().is_none());
}

// ===========================================================================
// Roster arrangement of a drafted team
// ===========================================================================

#[test]
fn drafted_roster_arranges_into_slots() {
    let catalog = rotating_catalog(20);
    let mut state = SessionState::from_config(&small_config(1)).unwrap();

    // User is team 0: picks at overalls 1, 8, 9, 16. Take QB, RB, WR, WR
    // from whatever the CPU teams have left.
    let wanted = [PlayerId(1), PlayerId(8), PlayerId(9), PlayerId(18)];
    let mut next = 0;
    while !state.is_complete() {
        match state.turn_state() {
            TurnState::AutoAdvancing => {
                state.run_autos(catalog.players());
            }
            TurnState::AwaitingPick => {
                state.commit_user_pick(&catalog, wanted[next]).unwrap();
                next += 1;
            }
            TurnState::Complete => break,
        }
    }
    assert_eq!(next, 4);

    let picks = state.team_entries(0);
    let slots = slotter::arrange_roster(&picks, &small_roster());

    // QB -> QB slot, RB -> RB slot, first WR -> WR slot, second WR -> bench.
    let filled: Vec<(Position, &str)> = slots
        .iter()
        .filter_map(|s| s.player.as_ref().map(|p| (s.position, p.name.as_str())))
        .collect();
    assert_eq!(
        filled,
        vec![
            (Position::Quarterback, "Player 01"),
            (Position::RunningBack, "Player 08"),
            (Position::WideReceiver, "Player 09"),
            (Position::Bench, "Player 18"),
        ]
    );
}

// ===========================================================================
// Catalog CSV to draft pipeline
// ===========================================================================

#[test]
fn csv_catalog_feeds_the_engine() {
    let csv_text = "\
player_id,name,position,college,adp
1001,Caleb Williams,QB,USC,3
1002,Blake Corum,RB,Michigan,1
1003,Marvin Harrison Jr.,WR,Ohio State,2
1004,Brock Bowers,TE,Georgia,4
1005,Walk-on Wally,RB,Obscure State,
";
    let catalog = PlayerCatalog::from_reader(csv_text.as_bytes(), "inline").unwrap();

    // One round, 4 teams, user last: CPUs take the top three by ADP.
    let mut state = SessionState::new(1, 4, 3).unwrap();
    state.run_autos(catalog.players());
    assert_eq!(state.teams[0].picks, vec![PlayerId(1002)]);
    assert_eq!(state.teams[1].picks, vec![PlayerId(1003)]);
    assert_eq!(state.teams[2].picks, vec![PlayerId(1001)]);

    // The user takes the unranked sleeper.
    state.commit_user_pick(&catalog, PlayerId(1005)).unwrap();
    assert!(state.is_complete());
    let entry = &state.team_entries(3)[0];
    assert_eq!(entry.name, "Walk-on Wally");
    assert_eq!(entry.college, "Obscure State");
}
