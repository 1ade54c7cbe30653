//! UNO card types: colors, faces, canonical identity and display forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// Colors in the order they are offered when choosing one.
pub const COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

pub const BLACK_ICON: &str = "⬛️";

impl Color {
    pub fn code(self) -> &'static str {
        match self {
            Color::Red => "r",
            Color::Blue => "b",
            Color::Green => "g",
            Color::Yellow => "y",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CardError> {
        match code {
            "r" => Ok(Color::Red),
            "b" => Ok(Color::Blue),
            "g" => Ok(Color::Green),
            "y" => Ok(Color::Yellow),
            _ => Err(CardError::UnknownColor(code.to_string())),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Color::Red => "❤️",
            Color::Blue => "💙",
            Color::Green => "💚",
            Color::Yellow => "💛",
        }
    }

    /// English source name, used as a catalog msgid suffix.
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Number(u8),
    DrawTwo,
    Skip,
    Reverse,
    DrawFour,
    ColorChooser,
}

impl Face {
    /// Wild faces carry no color of their own.
    pub fn is_special(self) -> bool {
        matches!(self, Face::DrawFour | Face::ColorChooser)
    }

    pub fn token(self) -> String {
        match self {
            Face::Number(n) => n.to_string(),
            Face::DrawTwo => "draw".into(),
            Face::Skip => "skip".into(),
            Face::Reverse => "reverse".into(),
            Face::DrawFour => "draw_four".into(),
            Face::ColorChooser => "colorchooser".into(),
        }
    }

    pub fn from_token(token: &str) -> Result<Self, CardError> {
        match token {
            "draw" => Ok(Face::DrawTwo),
            "skip" => Ok(Face::Skip),
            "reverse" => Ok(Face::Reverse),
            "draw_four" => Ok(Face::DrawFour),
            "colorchooser" => Ok(Face::ColorChooser),
            _ => match token.parse::<u8>() {
                Ok(n) if n <= 9 && token.len() == 1 => Ok(Face::Number(n)),
                _ => Err(CardError::UnknownValue(token.to_string())),
            },
        }
    }

    /// Human readable value: each underscore-separated word capitalized.
    fn label(self) -> String {
        self.token()
            .split('_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown card color: {0:?}")]
    UnknownColor(String),
    #[error("unknown card value: {0:?}")]
    UnknownValue(String),
    #[error("card {0:?} needs a color")]
    MissingColor(String),
}

/// A single card. Specials may carry the color chosen when they were played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub color: Option<Color>,
    pub face: Face,
}

impl Card {
    pub fn new(color: Color, face: Face) -> Self {
        Self {
            color: Some(color),
            face,
        }
    }

    pub fn special(face: Face) -> Self {
        Self { color: None, face }
    }

    /// Stable identity keyed into the media tables.
    pub fn canonical(&self) -> String {
        match (self.face.is_special(), self.color) {
            (false, Some(color)) => format!("{}_{}", color.code(), self.face.token()),
            _ => self.face.token(),
        }
    }

    /// Display form, e.g. `❤️Draw` or `💙⬛️Draw Four`.
    pub fn display(&self) -> String {
        let color_icon = self.color.map(Color::icon).unwrap_or("");
        if self.face.is_special() {
            format!("{color_icon}{BLACK_ICON}{}", self.face.label())
        } else {
            format!("{color_icon}{}", self.face.label())
        }
    }

    /// Compact display used in text mode. `Draw Four` must be replaced before `Draw`.
    pub fn text_display(&self) -> String {
        self.display()
            .replace("Draw Four", "+4")
            .replace("Draw", "+2")
            .replace("Colorchooser", "Color Chooser")
    }

    /// Wire form: the canonical identity, with a color prefix on colored specials.
    pub fn wire(&self) -> String {
        match (self.face.is_special(), self.color) {
            (true, Some(color)) => format!("{}_{}", color.code(), self.face.token()),
            _ => self.canonical(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(face) = Face::from_token(s) {
            if face.is_special() {
                return Ok(Card::special(face));
            }
            return Err(CardError::MissingColor(s.to_string()));
        }
        let (code, token) = s
            .split_once('_')
            .ok_or_else(|| CardError::UnknownValue(s.to_string()))?;
        let color = Color::from_code(code)?;
        let face = Face::from_token(token)?;
        Ok(Card::new(color, face))
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.wire()
    }
}
