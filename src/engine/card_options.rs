//! One menu entry per card in hand, playable or greyed out.

use uuid::Uuid;

use crate::engine::i18n::fill;
use crate::engine::models::*;
use crate::engine::options::MenuContext;
use crate::engine::status::game_status;
use crate::games::uno::cards::Card;

/// Build the card entries for `player`'s hand, in hand order.
///
/// `legal` is asked exactly once per card. A playable card is keyed by its
/// canonical identity and shows the full-strength sticker; an unplayable one
/// gets a fresh id (duplicates in hand must not collide), the greyed sticker,
/// and the game status as its harmless message.
pub fn card_options<F>(
    ctx: &MenuContext,
    player: &Player,
    mut legal: F,
) -> Result<Vec<ActionDescriptor>, MenuError>
where
    F: FnMut(&Card) -> bool,
{
    let mut status: Option<MessageContent> = None;
    let mut entries = Vec::with_capacity(player.hand.len());

    for card in &player.hand {
        let entry = if legal(card) {
            playable_card(ctx, card)?
        } else {
            if status.is_none() {
                status = Some(game_status(ctx.game, &ctx.tr)?);
            }
            ActionDescriptor {
                id: Uuid::new_v4().to_string(),
                kind: ActionKind::PlayCard,
                title: None,
                description: None,
                media: Some(ctx.media.card_grey(card)?.to_string()),
                message: status.clone(),
                enabled: false,
            }
        };
        entries.push(entry);
    }
    Ok(entries)
}

fn playable_card(ctx: &MenuContext, card: &Card) -> Result<ActionDescriptor, MenuError> {
    let message = if ctx.game.mode == GameMode::Text {
        Some(MessageContent::plain(fill(
            &ctx.tr.t("Card Played: {card}"),
            &[("card", card.text_display().as_str())],
        )))
    } else {
        None
    };
    Ok(ActionDescriptor {
        id: card.canonical(),
        kind: ActionKind::PlayCard,
        title: None,
        description: None,
        media: Some(ctx.media.card(card)?.to_string()),
        message,
        enabled: true,
    })
}
