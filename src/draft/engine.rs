// Turn-by-turn draft engine: owns the session aggregate and the single
// cursor that drives board, rosters, and turn state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{Player, PlayerCatalog};
use crate::config::DraftConfig;

use super::board::{self, Board};
use super::pick::{PickEntry, PlayerId};
use super::policy;
use super::roster::{self, Team};
use super::DraftError;

/// Whose move it is, derived from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The cursor points at the user's cell; the engine waits for a commit.
    AwaitingPick,
    /// The cursor points at a CPU cell; `advance_one` can fill it.
    AutoAdvancing,
    /// The cursor has walked past the last cell.
    Complete,
}

/// Result of a committed user pick, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub overall: u32,
    pub team_index: usize,
}

/// The complete draft session. Everything the board, rosters, and turn logic
/// need is derived from `cursor`, the count of picks made so far; the board
/// cells and team rosters are filled as the cursor walks forward and are
/// never edited behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub teams: Vec<Team>,
    /// Ids of every player picked so far, by any team.
    pub drafted: HashSet<PlayerId>,
    /// Count of picks made; also the index of the next cell to fill.
    pub cursor: usize,
}

impl SessionState {
    /// Build a fresh session: empty snake board, empty rosters, cursor at
    /// the first pick.
    pub fn new(
        num_rounds: usize,
        num_teams: usize,
        user_team_index: usize,
    ) -> Result<Self, DraftError> {
        let board = board::build_board(num_rounds, num_teams)?;
        let teams = roster::init_teams(num_teams, user_team_index)?;
        Ok(SessionState {
            board,
            teams,
            drafted: HashSet::new(),
            cursor: 0,
        })
    }

    /// Fresh session from validated draft settings. Round count is the
    /// roster shape's slot total.
    pub fn from_config(config: &DraftConfig) -> Result<Self, DraftError> {
        Self::new(
            config.roster.total_rounds(),
            config.num_teams,
            config.user_team_index(),
        )
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.board.total_cells()
    }

    /// Whether this session was built from the given settings. A saved
    /// session is only resumable while the config it was started under is
    /// still in effect; after a settings edit the driver starts fresh.
    pub fn matches_config(&self, config: &DraftConfig) -> bool {
        self.teams.len() == config.num_teams
            && self.board.teams_per_round == config.num_teams
            && self.board.rounds.len() == config.roster.total_rounds()
            && self.user_team().index == config.user_team_index()
    }

    /// Current turn state, derived from the cursor alone.
    pub fn turn_state(&self) -> TurnState {
        match self.board.cell_at(self.cursor) {
            None => TurnState::Complete,
            Some(cell) if self.teams[cell.team_index].is_user => TurnState::AwaitingPick,
            Some(_) => TurnState::AutoAdvancing,
        }
    }

    /// Make one CPU pick if the current cell belongs to a CPU team.
    ///
    /// Returns `true` when a pick was made. Returns `false` when the draft is
    /// complete, the user is on the clock, or no eligible candidate remains
    /// in `pool` — in the last case the session is unchanged and calling
    /// again without growing the pool returns `false` again.
    pub fn advance_one(&mut self, pool: &[Player]) -> bool {
        let Some(cell) = self.board.cell_at(self.cursor) else {
            return false;
        };
        if self.teams[cell.team_index].is_user {
            return false;
        }
        let Some(player) = policy::select_auto_pick(pool, &self.drafted) else {
            info!(cursor = self.cursor, "player pool exhausted, halting autos");
            return false;
        };
        let entry = PickEntry {
            player_id: player.id,
            name: player.name.clone(),
            position: player.position,
            college: player.college.clone(),
        };
        self.commit(entry);
        true
    }

    /// Run CPU picks until the user is on the clock, the draft completes, or
    /// the pool runs dry. Returns the number of picks made.
    pub fn run_autos(&mut self, pool: &[Player]) -> usize {
        let mut made = 0;
        while self.advance_one(pool) {
            made += 1;
        }
        made
    }

    /// Commit the user's pick of `id`.
    ///
    /// Rejected without touching session state when it is not the user's
    /// turn, the player is already drafted, or the id is not in the catalog.
    pub fn commit_user_pick(
        &mut self,
        catalog: &PlayerCatalog,
        id: PlayerId,
    ) -> Result<CommitOutcome, DraftError> {
        match self.turn_state() {
            TurnState::AwaitingPick => {}
            TurnState::AutoAdvancing | TurnState::Complete => {
                return Err(DraftError::NotYourTurn);
            }
        }
        if self.drafted.contains(&id) {
            return Err(DraftError::DuplicatePick(id));
        }
        let player = catalog.get(id).ok_or(DraftError::UnknownPlayer(id))?;

        let entry = PickEntry {
            player_id: player.id,
            name: player.name.clone(),
            position: player.position,
            college: player.college.clone(),
        };
        let outcome = self.commit(entry);
        Ok(outcome)
    }

    /// Fill the current cell, update the roster and drafted set, and advance
    /// the cursor. Callers have already validated the entry.
    fn commit(&mut self, entry: PickEntry) -> CommitOutcome {
        let player_id = entry.player_id;
        let name = entry.name.clone();
        let cell = self
            .board
            .cell_at_mut(self.cursor)
            .expect("commit past end of board");
        let outcome = CommitOutcome {
            overall: cell.overall,
            team_index: cell.team_index,
        };
        cell.player = Some(entry);
        self.teams[outcome.team_index].append_pick(player_id);
        self.drafted.insert(player_id);
        self.cursor += 1;

        info!(
            pick = %self.board.pick_label(outcome.overall),
            overall = outcome.overall,
            team = outcome.team_index,
            player = %name,
            "pick committed"
        );
        outcome
    }

    /// The user's team.
    pub fn user_team(&self) -> &Team {
        self.teams
            .iter()
            .find(|t| t.is_user)
            .expect("session has no user team")
    }

    /// Pick snapshots for one team, in pick order, read back off the board.
    pub fn team_entries(&self, team_index: usize) -> Vec<PickEntry> {
        self.board
            .cells()
            .filter(|c| c.team_index == team_index)
            .filter_map(|c| c.player.clone())
            .collect()
    }
}
