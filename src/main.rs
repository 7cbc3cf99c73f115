// Mock draft entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not the terminal prompt)
// 2. Load config (copying defaults on first run)
// 3. Open session store, resume or start a session
// 4. Load the player catalog
// 5. Turn loop: run CPU picks, prompt the user, commit, save
// 6. Final roster display

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use mock_draft::catalog::PlayerCatalog;
use mock_draft::config;
use mock_draft::db::SessionStore;
use mock_draft::draft::engine::{SessionState, TurnState};
use mock_draft::draft::pick::PlayerId;
use mock_draft::draft::slotter;
use mock_draft::draft::DraftError;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not the terminal)
    init_tracing()?;
    info!("Mock draft starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} teams, slot {}, {} rounds",
        config.draft.num_teams,
        config.draft.draft_slot,
        config.draft.roster.total_rounds()
    );

    // 3. Open session store, resume or start a session
    let store = SessionStore::open(&config.db_path).context("failed to open database")?;
    info!("Database opened at {}", config.db_path);

    if std::env::args().any(|a| a == "--restart") {
        store.clear().context("failed to clear saved sessions")?;
        info!("cleared saved sessions (--restart)");
        println!("Cleared saved sessions.");
    }

    let (session_id, mut state) = resume_or_start(&store, &config.draft)?;

    // 4. Load the player catalog
    let catalog = PlayerCatalog::load(Path::new(&config.players_path))
        .with_context(|| format!("failed to load players from {}", config.players_path))?;
    info!("Loaded {} players", catalog.len());
    if catalog.len() < state.board.total_cells() {
        warn!(
            "catalog has {} players for {} picks; the draft may stall",
            catalog.len(),
            state.board.total_cells()
        );
    }

    // 5. Turn loop
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !state.is_complete() {
        let made = state.run_autos(catalog.players());
        if made > 0 {
            store
                .save_session(&session_id, &state)
                .context("failed to save session")?;
        }

        match state.turn_state() {
            TurnState::Complete => break,
            TurnState::AutoAdvancing => {
                // run_autos made no progress on a CPU cell: the pool is dry.
                println!("Player pool exhausted; draft cannot continue.");
                warn!("halting with {} of {} picks made", state.cursor, state.board.total_cells());
                break;
            }
            TurnState::AwaitingPick => {
                print_recent_picks(&state);
                let cell = state
                    .board
                    .cell_at(state.cursor)
                    .expect("awaiting pick implies a current cell");
                print!(
                    "Your pick ({}) - enter player id: ",
                    state.board.pick_label(cell.overall)
                );
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    info!("stdin closed, saving and exiting");
                    break;
                };
                let line = line.context("failed to read from stdin")?;
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let Ok(raw_id) = input.parse::<u32>() else {
                    println!("'{input}' is not a player id; enter a number.");
                    continue;
                };

                match state.commit_user_pick(&catalog, PlayerId(raw_id)) {
                    Ok(outcome) => {
                        let entry = state
                            .board
                            .cells()
                            .find(|c| c.overall == outcome.overall)
                            .and_then(|c| c.player.as_ref())
                            .expect("committed cell is filled");
                        println!(
                            "Pick {}: {} ({}, {})",
                            state.board.pick_label(outcome.overall),
                            entry.name,
                            entry.position,
                            entry.college
                        );
                        store
                            .save_session(&session_id, &state)
                            .context("failed to save session")?;
                    }
                    Err(e @ DraftError::DuplicatePick(_))
                    | Err(e @ DraftError::UnknownPlayer(_))
                    | Err(e @ DraftError::NotYourTurn) => {
                        println!("{e}");
                    }
                    Err(e) => return Err(e).context("failed to commit pick"),
                }
            }
        }
    }

    store
        .save_session(&session_id, &state)
        .context("failed to save session")?;

    // 6. Final roster display
    if state.is_complete() {
        println!("\nDraft complete.");
        print_user_roster(&state, &config.draft.roster);
    }

    info!("Mock draft shut down cleanly");
    Ok(())
}

/// Resume the stored session if one is unfinished and still matches the
/// current settings, otherwise start fresh.
fn resume_or_start(
    store: &SessionStore,
    draft: &config::DraftConfig,
) -> anyhow::Result<(String, SessionState)> {
    if let Some(id) = store.current_session_id()? {
        if let Some(state) = store.load_session(&id)? {
            if !state.matches_config(draft) {
                info!(session = %id, "saved session does not match current settings, starting fresh");
                println!("Settings changed since session {id}; starting a new draft.");
            } else if !state.is_complete() {
                info!(session = %id, cursor = state.cursor, "resuming session");
                println!("Resuming session {id} at pick {}.", state.cursor + 1);
                return Ok((id, state));
            } else {
                info!(session = %id, "previous session complete, starting fresh");
            }
        } else {
            warn!(session = %id, "stored session id has no saved state");
        }
    }

    let id = SessionStore::generate_session_id();
    let state =
        SessionState::from_config(draft).context("failed to build draft session")?;
    store.save_session(&id, &state)?;
    store.set_current_session_id(&id)?;
    info!(session = %id, "started new session");
    Ok((id, state))
}

/// Print the CPU picks since the user's last turn (at most one full lap).
fn print_recent_picks(state: &SessionState) {
    let lap = state.board.teams_per_round;
    let start = state.cursor.saturating_sub(lap);
    for cursor in start..state.cursor {
        if let Some(cell) = state.board.cell_at(cursor) {
            if let Some(entry) = &cell.player {
                println!(
                    "  {} Team {}: {} ({}, {})",
                    state.board.pick_label(cell.overall),
                    cell.team_index + 1,
                    entry.name,
                    entry.position,
                    entry.college
                );
            }
        }
    }
}

/// Print the user's roster arranged into lineup slots.
fn print_user_roster(state: &SessionState, shape: &config::RosterSlots) {
    let picks = state.team_entries(state.user_team().index);
    let slots = slotter::arrange_roster(&picks, shape);
    println!("\nYour roster:");
    for slot in slots {
        match slot.player {
            Some(p) => println!("  {:>5}  {} ({})", slot.position.display_str(), p.name, p.college),
            None => println!("  {:>5}  --", slot.position.display_str()),
        }
    }
}

/// Initialize tracing to log to a file so the interactive prompt stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("mock-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_draft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
