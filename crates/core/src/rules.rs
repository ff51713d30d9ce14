//! Entry and exit behavior of each cell kind.
//! Both the live movement engine and the tests share these rules; the
//! reachability search applies its own, stricter ordering on top.

use crate::state::PlayerState;
use crate::types::{CellKind, GameEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transit {
    Entering,
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellEffect {
    pub enter_allowed: bool,
    /// Whether a vacated cell shows its original kind again (otherwise it becomes empty).
    pub revert_on_exit: bool,
    pub event: Option<GameEvent>,
}

impl CellEffect {
    const fn new(enter_allowed: bool, revert_on_exit: bool) -> Self {
        Self { enter_allowed, revert_on_exit, event: None }
    }

    fn with_event(self, event: Option<GameEvent>) -> Self {
        Self { event, ..self }
    }
}

/// Applies the rule for `kind`. Entering may update the player's flags;
/// leaving never does.
pub fn cell_effect(kind: CellKind, player: &mut PlayerState, transit: Transit) -> CellEffect {
    let entering = transit == Transit::Entering;
    match kind {
        CellKind::Empty => CellEffect::new(true, true),
        CellKind::Wall => CellEffect::new(false, true),
        CellKind::Key => CellEffect::new(true, false).with_event(entering.then(|| {
            player.has_key = true;
            GameEvent::KeyObtained
        })),
        CellKind::Sword => CellEffect::new(true, false).with_event(entering.then(|| {
            player.has_sword = true;
            GameEvent::SwordObtained
        })),
        CellKind::Stairs => {
            CellEffect::new(true, true).with_event((entering && player.has_key).then(|| {
                player.done = true;
                GameEvent::Escaped
            }))
        }
        CellKind::Enemy => match transit {
            Transit::Leaving => CellEffect::new(true, false),
            Transit::Entering if player.has_sword => {
                CellEffect::new(true, false).with_event(Some(GameEvent::EnemyDefeated))
            }
            Transit::Entering => {
                player.done = true;
                CellEffect::new(false, false).with_event(Some(GameEvent::Slain))
            }
        },
    }
}
