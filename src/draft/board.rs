// Snake-order pick grid: one cell per (round, team) with a running overall
// pick number.

use serde::{Deserialize, Serialize};

use super::pick::PickEntry;
use super::DraftError;

/// One cell of the draft board.
///
/// Created empty by `build_board`, filled exactly once by the engine when the
/// pick at `overall` is committed. `team_index` is the index of the team that
/// picks here, not the cell's position in its row — rows reverse direction
/// every round, so the two differ in odd rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickCell {
    pub team_index: usize,
    /// Round number, 1-based.
    pub round: u32,
    /// Overall pick number, 1-based, unique across the board.
    pub overall: u32,
    pub player: Option<PickEntry>,
}

/// The full pick grid: `rounds[r]` holds that round's cells in visiting
/// order. Flattening rounds in order yields overall pick numbers 1..=N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub rounds: Vec<Vec<PickCell>>,
    pub teams_per_round: usize,
}

/// Derive (round index, index within round) from the count of picks already
/// made. The single source of round/team derivation for every component.
pub fn locate(cursor: usize, teams_per_round: usize) -> (usize, usize) {
    (cursor / teams_per_round, cursor % teams_per_round)
}

/// Construct an empty board in snake order: even rounds (0-indexed) visit
/// teams ascending, odd rounds descending.
pub fn build_board(num_rounds: usize, num_teams: usize) -> Result<Board, DraftError> {
    if num_rounds == 0 {
        return Err(DraftError::InvalidConfig(
            "number of rounds must be at least 1".into(),
        ));
    }
    if num_teams == 0 {
        return Err(DraftError::InvalidConfig(
            "number of teams must be at least 1".into(),
        ));
    }

    let mut rounds = Vec::with_capacity(num_rounds);
    let mut overall: u32 = 1;
    for r in 0..num_rounds {
        let order: Vec<usize> = if r % 2 == 0 {
            (0..num_teams).collect()
        } else {
            (0..num_teams).rev().collect()
        };
        let mut row = Vec::with_capacity(num_teams);
        for team_index in order {
            row.push(PickCell {
                team_index,
                round: (r + 1) as u32,
                overall,
                player: None,
            });
            overall += 1;
        }
        rounds.push(row);
    }

    Ok(Board {
        rounds,
        teams_per_round: num_teams,
    })
}

impl Board {
    /// Total number of cells (rounds x teams).
    pub fn total_cells(&self) -> usize {
        self.rounds.len() * self.teams_per_round
    }

    /// The cell the cursor points at, or `None` once the board is full.
    pub fn cell_at(&self, cursor: usize) -> Option<&PickCell> {
        let (round, idx) = locate(cursor, self.teams_per_round);
        self.rounds.get(round).and_then(|row| row.get(idx))
    }

    pub fn cell_at_mut(&mut self, cursor: usize) -> Option<&mut PickCell> {
        let (round, idx) = locate(cursor, self.teams_per_round);
        self.rounds.get_mut(round).and_then(|row| row.get_mut(idx))
    }

    /// All cells in overall pick order.
    pub fn cells(&self) -> impl Iterator<Item = &PickCell> {
        self.rounds.iter().flatten()
    }

    /// Display label for an overall pick number in `round.slot` form with the
    /// slot zero-padded (e.g. pick 17 in a 12-team draft is "2.05").
    pub fn pick_label(&self, overall: u32) -> String {
        let round = (overall as usize - 1) / self.teams_per_round + 1;
        let slot = (overall as usize - 1) % self.teams_per_round + 1;
        format!("{round}.{slot:02}")
    }
}
