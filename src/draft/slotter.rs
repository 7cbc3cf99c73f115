// Roster display arrangement: assign drafted players to lineup slots in
// pick order.

use tracing::warn;

use crate::config::RosterSlots;

use super::pick::{PickEntry, Position};

/// One display slot: a labeled position with the player assigned to it, if
/// any.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSlot {
    pub position: Position,
    pub player: Option<PickEntry>,
}

/// Arrange a team's picks into display slots.
///
/// Players are placed one at a time in pick order: into an open slot of
/// their exact position first, then an open FLEX slot if eligible (RB, WR,
/// TE only), then an open bench slot. A player who fits nowhere is dropped
/// from the display; the underlying pick record is untouched.
pub fn arrange_roster(picks: &[PickEntry], shape: &RosterSlots) -> Vec<RosterSlot> {
    let mut slots: Vec<RosterSlot> = Vec::with_capacity(shape.total_rounds());
    for (position, count) in shape.slot_counts() {
        for _ in 0..count {
            slots.push(RosterSlot {
                position,
                player: None,
            });
        }
    }

    for pick in picks {
        let open = |position: Position| {
            slots
                .iter()
                .position(|s| s.player.is_none() && s.position == position)
        };
        let mut target = open(pick.position);
        if target.is_none() && pick.position.is_flex_eligible() {
            target = open(Position::Flex);
        }
        if target.is_none() {
            target = open(Position::Bench);
        }

        match target {
            Some(i) => slots[i].player = Some(pick.clone()),
            None => {
                warn!(
                    player = %pick.name,
                    position = %pick.position,
                    "no open slot, dropping from roster display"
                );
            }
        }
    }

    slots
}
