// Configuration loading and parsing (config/draft.toml).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftSection,
    database: DatabaseSection,
    data: DataSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DraftSection {
    num_teams: usize,
    draft_slot: usize,
    roster: RosterSlots,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    players: String,
}

/// Per-position roster slot counts. The sum of all counts is the number of
/// draft rounds; it is derived, never set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlots {
    pub qb: usize,
    pub rb: usize,
    pub wr: usize,
    pub te: usize,
    pub flex: usize,
    pub k: usize,
    pub dst: usize,
    pub bench: usize,
}

impl RosterSlots {
    /// Total draft rounds implied by this roster shape.
    pub fn total_rounds(&self) -> usize {
        self.qb + self.rb + self.wr + self.te + self.flex + self.k + self.dst + self.bench
    }

    /// Slot counts in display group order (QB, RB, WR, TE, FLEX, K, DST,
    /// BENCH).
    pub fn slot_counts(&self) -> [(Position, usize); 8] {
        [
            (Position::Quarterback, self.qb),
            (Position::RunningBack, self.rb),
            (Position::WideReceiver, self.wr),
            (Position::TightEnd, self.te),
            (Position::Flex, self.flex),
            (Position::Kicker, self.k),
            (Position::Defense, self.dst),
            (Position::Bench, self.bench),
        ]
    }
}

/// The validated draft settings.
#[derive(Debug, Clone)]
pub struct DraftConfig {
    /// Number of teams in the draft.
    pub num_teams: usize,
    /// The user's draft position, 1-based.
    pub draft_slot: usize,
    pub roster: RosterSlots,
}

impl DraftConfig {
    /// The user's team index, 0-based.
    pub fn user_team_index(&self) -> usize {
        self.draft_slot - 1
    }
}

/// Top-level assembled config: draft settings plus infrastructure paths.
#[derive(Debug, Clone)]
pub struct Config {
    pub draft: DraftConfig,
    pub db_path: String,
    pub players_path: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("draft.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: DraftFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        draft: DraftConfig {
            num_teams: file.draft.num_teams,
            draft_slot: file.draft.draft_slot,
            roster: file.draft.roster,
        },
        db_path: file.database.path,
        players_path: file.data.players,
    };

    validate(&config.draft)?;

    Ok(config)
}

/// Ensure `config/draft.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_path = base_dir.join("defaults").join("draft.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("draft.toml");

    if target.exists() {
        return Ok(vec![]);
    }
    if !defaults_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor defaults/draft.toml found in {}; \
                 run from the project root or ensure defaults/ is present",
                target.display(),
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&defaults_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", defaults_path.display()),
    })?;

    Ok(vec![target])
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Bounds carried over from the original settings form: leagues of 4 to 32
/// teams, modest per-position slot caps, and a non-empty roster.
fn validate(draft: &DraftConfig) -> Result<(), ConfigError> {
    if !(4..=32).contains(&draft.num_teams) {
        return Err(ConfigError::ValidationError {
            field: "draft.num_teams".into(),
            message: format!("must be between 4 and 32, got {}", draft.num_teams),
        });
    }

    if draft.draft_slot < 1 || draft.draft_slot > draft.num_teams {
        return Err(ConfigError::ValidationError {
            field: "draft.draft_slot".into(),
            message: format!(
                "must be between 1 and {}, got {}",
                draft.num_teams, draft.draft_slot
            ),
        });
    }

    let r = &draft.roster;
    let slot_caps: &[(&str, usize, usize)] = &[
        ("draft.roster.qb", r.qb, 4),
        ("draft.roster.rb", r.rb, 10),
        ("draft.roster.wr", r.wr, 10),
        ("draft.roster.te", r.te, 4),
        ("draft.roster.flex", r.flex, 10),
        ("draft.roster.k", r.k, 4),
        ("draft.roster.dst", r.dst, 4),
        ("draft.roster.bench", r.bench, 20),
    ];
    for &(name, val, cap) in slot_caps {
        if val > cap {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be at most {cap}, got {val}"),
            });
        }
    }

    if r.total_rounds() == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.roster".into(),
            message: "at least one roster slot is required".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
