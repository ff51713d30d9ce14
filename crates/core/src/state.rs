use crate::types::Pos;

/// Everything the movement engine is allowed to change about the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub pos: Pos,
    pub has_key: bool,
    pub has_sword: bool,
    pub done: bool,
}

