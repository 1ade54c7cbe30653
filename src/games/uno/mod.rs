//! UNO: cards, decks and the standard playability rules.

pub mod cards;
pub mod deck;
pub mod rules;
