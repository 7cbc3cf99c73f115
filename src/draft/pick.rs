// Positions, player identifiers, and the pick snapshot stored in board cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identifier for a player in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fantasy football positions used for roster slot assignment.
///
/// `Flex` and `Bench` are slot designations only; no player carries them as
/// their own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    Flex,
    Bench,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the usual abbreviations: "QB", "RB", "WR", "TE", "K",
    /// "DST"/"D/ST"/"DEF", "FLEX", "BENCH"/"BN"/"BE".
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DST" | "D/ST" | "DEF" => Some(Position::Defense),
            "FLEX" => Some(Position::Flex),
            "BENCH" | "BN" | "BE" => Some(Position::Bench),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DST",
            Position::Flex => "FLEX",
            Position::Bench => "BENCH",
        }
    }

    /// Whether a player at this position may occupy a FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(
            self,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd
        )
    }

    /// Whether this is a slot designation rather than a playing position.
    pub fn is_slot_only(&self) -> bool {
        matches!(self, Position::Flex | Position::Bench)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Display snapshot of a drafted player, stored in the board cell at commit
/// time so the grid renders without catalog lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    /// College team name (e.g. "Ohio State").
    pub college: String,
}
