//! Turn rules consulted by the menu assembler.
//!
//! The menu never decides legality itself; it asks these questions and trusts
//! the answers. Implementations must be pure: same snapshot, same answers.

use crate::engine::models::{GameSnapshot, Player};
use crate::games::uno::cards::Card;

pub trait TurnRules: Send + Sync {
    /// Whether `player` may play `card` right now.
    fn is_playable(&self, game: &GameSnapshot, player: &Player, card: &Card) -> bool;

    /// Whether drawing is offered.
    fn may_draw(&self, game: &GameSnapshot, player: &Player) -> bool;

    /// Whether passing is offered (typically only after drawing).
    fn may_pass(&self, game: &GameSnapshot, player: &Player) -> bool;

    /// Whether a bluff-challenge window is open.
    fn may_call_bluff(&self, game: &GameSnapshot, player: &Player) -> bool;
}
