// Auto-pick selection: take the best remaining player from a pre-sorted pool.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::Player;

use super::pick::PlayerId;

/// Sort a candidate pool into auto-pick order: players with an ADP value
/// before players without one, then ADP ascending (better rank first), then
/// name ascending as a deterministic tiebreak.
pub fn sort_candidates(pool: &mut [Player]) {
    pool.sort_by(compare_candidates);
}

fn compare_candidates(a: &Player, b: &Player) -> Ordering {
    match (a.adp, b.adp) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// Return the first player in `pool` whose id is not in `drafted`, or `None`
/// when no eligible candidate remains. The pool must already be in auto-pick
/// order; the scan itself is deliberately a plain linear pass — the ordering
/// guarantee is the whole contract.
pub fn select_auto_pick<'a>(
    pool: &'a [Player],
    drafted: &HashSet<PlayerId>,
) -> Option<&'a Player> {
    pool.iter().find(|p| !drafted.contains(&p.id))
}
