//! Standard UNO playability rules.

use super::cards::{Card, Face};
use crate::engine::models::{GameSnapshot, Player};
use crate::engine::rules::TurnRules;

pub struct StandardRules;

/// Rules for a single card against the face-up card, ignoring hand context.
fn card_playable(game: &GameSnapshot, card: &Card) -> bool {
    let last = &game.last_card;

    // A wild on the pile without a chosen color blocks everything.
    if last.color.is_none() {
        return false;
    }
    if card.color != last.color && card.face != last.face && !card.face.is_special() {
        return false;
    }
    if game.draw_counter > 0 {
        match last.face {
            Face::DrawTwo if card.face != Face::DrawTwo => return false,
            Face::DrawFour => return false,
            _ => {}
        }
    }
    // No wild on a wild.
    if last.face.is_special() && card.face.is_special() {
        return false;
    }
    true
}

impl TurnRules for StandardRules {
    fn is_playable(&self, game: &GameSnapshot, player: &Player, card: &Card) -> bool {
        // A wild may not be the last card played.
        if player.hand.len() == 1 && player.hand[0].face.is_special() {
            return false;
        }
        if player.drew {
            // Only the card just drawn may be played.
            return player.hand.last() == Some(card) && card_playable(game, card);
        }
        card_playable(game, card)
    }

    fn may_draw(&self, _game: &GameSnapshot, player: &Player) -> bool {
        !player.drew
    }

    fn may_pass(&self, _game: &GameSnapshot, player: &Player) -> bool {
        player.drew
    }

    fn may_call_bluff(&self, game: &GameSnapshot, _player: &Player) -> bool {
        game.last_card.face == Face::DrawFour && game.draw_counter > 0
    }
}
