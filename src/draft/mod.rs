// Snake-draft simulation: board construction, per-team rosters, auto-pick
// policy, the turn-by-turn engine, and display slot arrangement.

pub mod board;
pub mod engine;
pub mod pick;
pub mod policy;
pub mod roster;
pub mod slotter;

use thiserror::Error;

use pick::PlayerId;

/// Failures surfaced by the draft engine. `InvalidConfig` rejects bad
/// dimensions at build/reset time; the remaining variants reject a user pick
/// commit without mutating session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("invalid draft configuration: {0}")]
    InvalidConfig(String),

    #[error("it is not your turn to pick")]
    NotYourTurn,

    #[error("player {0} has already been drafted")]
    DuplicatePick(PlayerId),

    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
}
