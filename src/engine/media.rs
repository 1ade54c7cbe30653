//! Media resource table: sticker references for cards (normal and greyed)
//! and for the fixed option tokens.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::config::{read_toml, ConfigError};
use crate::engine::models::MenuError;
use crate::games::uno::cards::Card;
use crate::games::uno::deck::all_identities;

pub const OPTION_DRAW: &str = "draw";
pub const OPTION_PASS: &str = "pass";
pub const OPTION_BLUFF: &str = "bluff";
pub const OPTION_INFO: &str = "info";

pub const OPTION_TOKENS: [&str; 4] = [OPTION_DRAW, OPTION_PASS, OPTION_BLUFF, OPTION_INFO];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTable {
    #[serde(default)]
    pub options: HashMap<String, String>,
    #[serde(default)]
    pub cards: HashMap<String, String>,
    #[serde(default)]
    pub cards_grey: HashMap<String, String>,
}

impl MediaTable {
    pub fn card(&self, card: &Card) -> Result<&str, MenuError> {
        let id = card.canonical();
        self.cards
            .get(&id)
            .map(String::as_str)
            .ok_or(MenuError::MissingCardMedia(id))
    }

    pub fn card_grey(&self, card: &Card) -> Result<&str, MenuError> {
        let id = card.canonical();
        self.cards_grey
            .get(&id)
            .map(String::as_str)
            .ok_or(MenuError::MissingGreyMedia(id))
    }

    pub fn option(&self, token: &str) -> Result<&str, MenuError> {
        self.options
            .get(token)
            .map(String::as_str)
            .ok_or_else(|| MenuError::MissingOptionMedia(token.to_string()))
    }

    /// Identities and option tokens with no mapping.
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for id in all_identities() {
            if !self.cards.contains_key(&id) {
                missing.push(id.clone());
            }
            if !self.cards_grey.contains_key(&id) {
                missing.push(format!("grey:{id}"));
            }
        }
        for token in OPTION_TOKENS {
            if !self.options.contains_key(token) {
                missing.push(format!("option:{token}"));
            }
        }
        missing
    }

    /// A complete table of synthetic references, for fixtures and tests.
    pub fn placeholders() -> Self {
        let ids = all_identities();
        Self {
            options: OPTION_TOKENS
                .iter()
                .map(|t| (t.to_string(), format!("option_{t}")))
                .collect(),
            cards: ids.iter().map(|id| (id.clone(), format!("sticker_{id}"))).collect(),
            cards_grey: ids.iter().map(|id| (id.clone(), format!("grey_{id}"))).collect(),
        }
    }
}

pub fn load_media(path: &Path) -> Result<MediaTable, ConfigError> {
    let table: MediaTable = read_toml(path)?;
    let missing = table.missing();
    if !missing.is_empty() {
        tracing::warn!(path = %path.display(), ?missing, "media table is incomplete");
    }
    Ok(table)
}
