//! Text shown to the player: prompts, the legend, and event announcements.

use dungeon_core::{CellKind, GameEvent, GameStatus, Tile};

pub const COLUMNS_PROMPT: &str = "Enter number of columns (must be >2): ";
pub const ROWS_PROMPT: &str = "Enter number of rows (must be >2): ";
pub const MOVE_PROMPT: &str = "\nEnter your move (l, r, u, d): ";
pub const AGAIN_PROMPT: &str = "\nEnter any key to start over: ";
pub const GENERATING: &str = "Generating dungeon...";
pub const WELCOME: &str = "\n~~~~ Welcome! ~~~~";

fn cell_name(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Empty => "empty space",
        CellKind::Wall => "wall",
        CellKind::Key => "key",
        CellKind::Stairs => "stairs",
        CellKind::Enemy => "enemy",
        CellKind::Sword => "sword",
    }
}

/// One `symbol = name` line per cell kind, in display order.
pub fn legend() -> String {
    let kinds = [
        CellKind::Empty,
        CellKind::Wall,
        CellKind::Key,
        CellKind::Stairs,
        CellKind::Enemy,
        CellKind::Sword,
    ];
    let mut lines: Vec<String> =
        kinds.iter().map(|&kind| format!("{} = {}", kind.symbol(), cell_name(kind))).collect();
    lines.push(format!("{} = you", Tile::MARKER_SYMBOL));
    lines.join("\n")
}

pub fn event_text(event: GameEvent) -> &'static str {
    match event {
        GameEvent::KeyObtained => "Key obtained!",
        GameEvent::SwordObtained => "Sword obtained!",
        GameEvent::EnemyDefeated => "Enemy defeated!",
        GameEvent::Slain => "You died!",
        GameEvent::Escaped => "You won!",
    }
}

/// Event line framed the way every announcement is.
pub fn announcement(event: GameEvent) -> String {
    format!("\n~~~~ {} ~~~~", event_text(event))
}

pub fn outcome_text(status: GameStatus, moves: u32) -> String {
    match status {
        GameStatus::Won => format!("Escaped in {moves} move(s)."),
        GameStatus::Lost => format!("Fell after {moves} move(s)."),
        GameStatus::Ongoing => format!("{moves} move(s) so far."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_lists_every_symbol() {
        let legend = legend();
        assert!(legend.starts_with("~ = empty space\n| = wall\n$ = key"));
        assert!(legend.contains("^ = stairs\n! = enemy\n? = sword"));
        assert!(legend.ends_with(". = you"));
    }

    #[test]
    fn announcements_are_framed() {
        assert_eq!(announcement(GameEvent::KeyObtained), "\n~~~~ Key obtained! ~~~~");
        assert_eq!(announcement(GameEvent::Slain), "\n~~~~ You died! ~~~~");
    }

    #[test]
    fn outcome_mentions_move_count() {
        assert_eq!(outcome_text(GameStatus::Won, 8), "Escaped in 8 move(s).");
        assert_eq!(outcome_text(GameStatus::Lost, 2), "Fell after 2 move(s).");
    }
}
