//! Game status text: current player, last card and the turn order with
//! hand sizes.

use crate::engine::i18n::{fill, Tr};
use crate::engine::models::{GameSnapshot, MenuError, MessageContent};

/// `"{name} ({n} cards)"` per player, in turn order.
pub fn player_list(game: &GameSnapshot, tr: &Tr) -> Vec<String> {
    game.players
        .iter()
        .map(|player| {
            let n = player.hand.len() as u64;
            fill(
                &tr.n("{name} ({number} card)", "{name} ({number} cards)", n),
                &[("name", player.user.first_name.as_str()), ("number", n.to_string().as_str())],
            )
        })
        .collect()
}

pub fn game_status(game: &GameSnapshot, tr: &Tr) -> Result<MessageContent, MenuError> {
    let current = game.validate()?;
    let players = player_list(game, tr);

    let lines = [
        fill(
            &tr.t("Current player: {name}"),
            &[("name", current.user.display_name().as_str())],
        ),
        fill(&tr.t("Last card: {card}"), &[("card", game.last_card.display().as_str())]),
        fill(
            &tr.n("Player: {player_list}", "Players: {player_list}", players.len() as u64),
            &[("player_list", players.join(" -> ").as_str())],
        ),
    ];
    Ok(MessageContent::plain(lines.join("\n")))
}
