//! Core data types: the read-only game snapshot handed in by the game engine
//! and the action descriptors handed back to the transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::games::uno::cards::Card;

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// First name, with the `@username` appended when the user has one.
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("{} (@{})", self.first_name, username),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub user: User,
    #[serde(default)]
    pub hand: Vec<Card>,
    /// Drew a card this turn.
    #[serde(default)]
    pub drew: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Fast,
    Wild,
    Text,
}

pub const GAME_MODES: [GameMode; 4] = [
    GameMode::Classic,
    GameMode::Fast,
    GameMode::Wild,
    GameMode::Text,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Chat the game runs in.
    pub game_id: String,
    #[serde(default)]
    pub started: bool,
    pub creator: UserId,
    pub current_player: UserId,
    /// Turn order.
    pub players: Vec<Player>,
    pub last_card: Card,
    #[serde(default)]
    pub draw_counter: u32,
    #[serde(default)]
    pub mode: GameMode,
    /// When set, every text generated for this game uses this locale.
    #[serde(default)]
    pub forced_locale: Option<String>,
    /// The current player still has to pick a color for a played wild card.
    #[serde(default)]
    pub choosing_color: bool,
}

impl GameSnapshot {
    pub fn player(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user.id == user_id)
    }

    /// Check the snapshot invariants and return the current player.
    pub fn validate(&self) -> Result<&Player, MenuError> {
        if self.players.is_empty() {
            return Err(MenuError::EmptyTurnOrder {
                game_id: self.game_id.clone(),
            });
        }
        self.player(self.current_player)
            .ok_or_else(|| MenuError::CurrentPlayerNotSeated {
                game_id: self.game_id.clone(),
                user_id: self.current_player,
            })
    }
}

/// Which part of the inline menu the request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubMenu {
    #[default]
    Hand,
    GameModes,
}

impl SubMenu {
    pub fn from_query(query: &str) -> Self {
        match query.trim().to_lowercase().as_str() {
            "mode" | "modes" => SubMenu::GameModes,
            _ => SubMenu::Hand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlayCard,
    ChooseColor,
    ChooseMode,
    Draw,
    Pass,
    Challenge,
    ViewInfo,
    HandSummary,
    NoGameNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
    #[serde(default)]
    pub parse_mode: ParseMode,
}

impl MessageContent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
        }
    }
}

/// One offered menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub id: String,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pre-uploaded media reference (sticker file id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Content sent when the entry is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageContent>,
    /// False when selecting the entry only surfaces information.
    pub enabled: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("no media for card {0:?}")]
    MissingCardMedia(String),
    #[error("no greyed media for card {0:?}")]
    MissingGreyMedia(String),
    #[error("no media for option {0:?}")]
    MissingOptionMedia(String),
    #[error("game {game_id} has an empty turn order")]
    EmptyTurnOrder { game_id: String },
    #[error("current player {user_id} is not seated in game {game_id}")]
    CurrentPlayerNotSeated { game_id: String, user_id: UserId },
}
