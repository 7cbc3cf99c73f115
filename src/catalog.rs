// Player catalog: CSV-backed pool of draftable college players with
// optional ADP rankings.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::draft::pick::{PlayerId, Position};
use crate::draft::policy;

/// Read-only reference data for one draftable player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// College team name.
    pub college: String,
    /// Average draft position; lower = more desirable. Players without a
    /// value rank strictly worse than any player with one.
    pub adp: Option<f64>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read player file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("duplicate player id {0} in catalog")]
    DuplicateId(PlayerId),
}

/// Raw CSV row. ADP is optional (empty cell for unranked players); extra
/// columns are ignored.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    player_id: u32,
    name: String,
    position: String,
    college: String,
    #[serde(default)]
    adp: Option<f64>,
}

/// The full pool of draftable players, held pre-sorted by the auto-pick
/// ordering key (has-ADP first, ADP ascending, name ascending).
#[derive(Debug, Clone)]
pub struct PlayerCatalog {
    players: Vec<Player>,
    by_id: HashMap<PlayerId, usize>,
}

impl PlayerCatalog {
    /// Load the catalog from a CSV file with columns
    /// `player_id,name,position,college,adp`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Reader-based loader so tests can feed CSV text without temp files.
    pub fn from_reader<R: Read>(rdr: R, path: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let mut players = Vec::new();
        for result in reader.deserialize::<RawPlayerRow>() {
            match result {
                Ok(raw) => {
                    let Some(position) = Position::from_str_pos(raw.position.trim()) else {
                        warn!(
                            "skipping player '{}': unknown position '{}'",
                            raw.name.trim(),
                            raw.position
                        );
                        continue;
                    };
                    if position.is_slot_only() {
                        warn!(
                            "skipping player '{}': '{}' is a slot, not a position",
                            raw.name.trim(),
                            raw.position
                        );
                        continue;
                    }
                    if raw.adp.is_some_and(|v| !v.is_finite()) {
                        warn!("skipping player '{}': non-finite ADP", raw.name.trim());
                        continue;
                    }
                    players.push(Player {
                        id: PlayerId(raw.player_id),
                        name: raw.name.trim().to_string(),
                        position,
                        college: raw.college.trim().to_string(),
                        adp: raw.adp,
                    });
                }
                Err(e) => {
                    return Err(CatalogError::Csv {
                        path: path.to_string(),
                        source: e,
                    });
                }
            }
        }
        Self::from_players(players)
    }

    /// Build a catalog from already-constructed players (used by tests and
    /// by the CSV loader). Sorts into auto-pick order and indexes by id.
    pub fn from_players(mut players: Vec<Player>) -> Result<Self, CatalogError> {
        policy::sort_candidates(&mut players);
        let mut by_id = HashMap::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            if by_id.insert(p.id, i).is_some() {
                return Err(CatalogError::DuplicateId(p.id));
            }
        }
        Ok(PlayerCatalog { players, by_id })
    }

    /// All players, pre-sorted by the auto-pick ordering key.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players at the given position, preserving pool order.
    pub fn by_position(&self, position: Position) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.position == position)
            .collect()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.by_id.get(&id).map(|&i| &self.players[i])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
