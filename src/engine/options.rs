//! Builders for the standing menu entries: notices, game modes, colors, the
//! hand summary and the draw / pass / call-bluff / game-info options.

use crate::engine::i18n::{fill, Tr};
use crate::engine::media::{MediaTable, OPTION_BLUFF, OPTION_DRAW, OPTION_INFO, OPTION_PASS};
use crate::engine::models::*;
use crate::engine::status::game_status;
use crate::games::uno::cards::{Color, COLORS};

/// Everything a builder needs for one menu render.
#[derive(Clone, Copy)]
pub struct MenuContext<'a> {
    pub game: &'a GameSnapshot,
    pub media: &'a MediaTable,
    pub tr: Tr<'a>,
}

fn text_entry(id: &str, kind: ActionKind, title: String, message: String, enabled: bool) -> ActionDescriptor {
    ActionDescriptor {
        id: id.to_string(),
        kind,
        title: Some(title),
        description: None,
        media: None,
        message: Some(MessageContent::plain(message)),
        enabled,
    }
}

pub fn no_game(tr: &Tr) -> ActionDescriptor {
    text_entry(
        "nogame",
        ActionKind::NoGameNotice,
        tr.t("You are not playing"),
        tr.t("Not playing right now. Use /new to start a game or /join to join the current game in this group"),
        false,
    )
}

pub fn not_started(tr: &Tr) -> ActionDescriptor {
    text_entry(
        "nogame",
        ActionKind::NoGameNotice,
        tr.t("The game wasn't started yet"),
        tr.t("Start the game with /start"),
        false,
    )
}

pub fn mode_id(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Classic => "mode_classic",
        GameMode::Fast => "mode_fast",
        GameMode::Wild => "mode_wild",
        GameMode::Text => "mode_text",
    }
}

fn mode_texts(mode: GameMode) -> (&'static str, &'static str) {
    match mode {
        GameMode::Classic => ("🎻 Classic mode", "Classic 🎻"),
        GameMode::Fast => ("🚀 Sanic mode", "Gotta go fast! 🚀"),
        GameMode::Wild => ("🐉 Wild mode", "Into the Wild~ 🐉"),
        GameMode::Text => ("✍️ Text mode", "Text ✍️"),
    }
}

/// One entry per game mode. Selecting one reconfigures the lobby.
pub fn mode_choices(tr: &Tr) -> Vec<ActionDescriptor> {
    GAME_MODES
        .iter()
        .map(|&mode| {
            let (title, message) = mode_texts(mode);
            text_entry(mode_id(mode), ActionKind::ChooseMode, tr.t(title), tr.t(message), true)
        })
        .collect()
}

fn color_msgid(color: Color) -> String {
    format!("{{emoji}} {}", color.name())
}

/// Color name as shown to the player choosing it.
pub fn display_color(color: Color, tr: &Tr) -> String {
    fill(&tr.t(&color_msgid(color)), &[("emoji", color.icon())])
}

/// Color name as announced to the whole group once chosen.
pub fn display_color_group(color: Color, game_tr: &Tr) -> String {
    fill(&game_tr.t(&color_msgid(color)), &[("emoji", color.icon())])
}

/// Color choices: title and description in the chooser's locale, the message
/// announced to the group in the game's locale.
pub fn color_choices(tr: &Tr, game_tr: &Tr) -> Vec<ActionDescriptor> {
    COLORS
        .iter()
        .map(|&color| ActionDescriptor {
            id: color.code().to_string(),
            kind: ActionKind::ChooseColor,
            title: Some(tr.t("Choose Color")),
            description: Some(display_color(color, tr)),
            media: None,
            message: Some(MessageContent::plain(display_color_group(color, game_tr))),
            enabled: true,
        })
        .collect()
}

pub fn hand_summary(ctx: &MenuContext, player: &Player) -> Result<ActionDescriptor, MenuError> {
    let n = player.hand.len() as u64;
    let cards: Vec<String> = player.hand.iter().map(|c| c.display()).collect();
    Ok(ActionDescriptor {
        id: "hand".into(),
        kind: ActionKind::HandSummary,
        title: Some(ctx.tr.n(
            "Card (tap for game state):",
            "Cards (tap for game state):",
            n,
        )),
        description: Some(cards.join(", ")),
        media: None,
        message: Some(game_status(ctx.game, &ctx.tr)?),
        enabled: true,
    })
}

/// Cards taken when drawing: the pending penalty, or one.
pub fn draw_quantity(game: &GameSnapshot) -> u32 {
    if game.draw_counter > 0 {
        game.draw_counter
    } else {
        1
    }
}

fn sticker_entry(
    ctx: &MenuContext,
    id: &str,
    kind: ActionKind,
    token: &str,
    text: String,
) -> Result<ActionDescriptor, MenuError> {
    Ok(ActionDescriptor {
        id: id.to_string(),
        kind,
        title: Some(text.clone()),
        description: None,
        media: Some(ctx.media.option(token)?.to_string()),
        message: Some(MessageContent::plain(text)),
        enabled: true,
    })
}

pub fn draw(ctx: &MenuContext) -> Result<ActionDescriptor, MenuError> {
    let n = draw_quantity(ctx.game);
    let text = fill(
        &ctx.tr.n("Drawing {number} card", "Drawing {number} cards", n as u64),
        &[("number", n.to_string().as_str())],
    );
    sticker_entry(ctx, "draw", ActionKind::Draw, OPTION_DRAW, text)
}

pub fn pass(ctx: &MenuContext) -> Result<ActionDescriptor, MenuError> {
    sticker_entry(ctx, "pass", ActionKind::Pass, OPTION_PASS, ctx.tr.t("Pass"))
}

pub fn call_bluff(ctx: &MenuContext) -> Result<ActionDescriptor, MenuError> {
    sticker_entry(
        ctx,
        "call_bluff",
        ActionKind::Challenge,
        OPTION_BLUFF,
        ctx.tr.t("I'm calling your bluff!"),
    )
}

pub fn game_info(ctx: &MenuContext) -> Result<ActionDescriptor, MenuError> {
    Ok(ActionDescriptor {
        id: "gameinfo".into(),
        kind: ActionKind::ViewInfo,
        title: None,
        description: None,
        media: Some(ctx.media.option(OPTION_INFO)?.to_string()),
        message: Some(game_status(ctx.game, &ctx.tr)?),
        enabled: true,
    })
}
