// Per-team roster tracking: ordered drafted player ids, in pick order.

use serde::{Deserialize, Serialize};

use super::pick::PlayerId;
use super::DraftError;

/// One team in the draft. Exactly one team per session has `is_user` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub index: usize,
    pub is_user: bool,
    /// Drafted player ids, insertion order = pick order.
    pub picks: Vec<PlayerId>,
}

impl Team {
    /// Append a drafted player. Duplicate and eligibility checks are the
    /// caller's responsibility; this method does not re-validate.
    pub fn append_pick(&mut self, player_id: PlayerId) {
        self.picks.push(player_id);
    }
}

/// Create `num_teams` empty teams with the user flag set at
/// `user_team_index` (0-based).
pub fn init_teams(num_teams: usize, user_team_index: usize) -> Result<Vec<Team>, DraftError> {
    if num_teams == 0 {
        return Err(DraftError::InvalidConfig(
            "number of teams must be at least 1".into(),
        ));
    }
    if user_team_index >= num_teams {
        return Err(DraftError::InvalidConfig(format!(
            "user team index {user_team_index} out of range for {num_teams} teams"
        )));
    }

    Ok((0..num_teams)
        .map(|index| Team {
            index,
            is_user: index == user_team_index,
            picks: Vec::new(),
        })
        .collect())
}
