//! Deck composition for the classic and wild decks, and seeded dealing used
//! by the fixture generator and the benchmarks.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use super::cards::{Card, Face, COLORS};
use crate::engine::models::{GameMode, GameSnapshot, Player, User};

const SPECIALS: [Face; 2] = [Face::DrawFour, Face::ColorChooser];
const ACTION_FACES: [Face; 3] = [Face::DrawTwo, Face::Skip, Face::Reverse];

/// One zero and two of every other value per color, four of each special.
pub static CLASSIC_DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::with_capacity(108);
    for color in COLORS {
        deck.push(Card::new(color, Face::Number(0)));
        for _ in 0..2 {
            for n in 1..=9 {
                deck.push(Card::new(color, Face::Number(n)));
            }
            for face in ACTION_FACES {
                deck.push(Card::new(color, face));
            }
        }
    }
    for face in SPECIALS {
        for _ in 0..4 {
            deck.push(Card::special(face));
        }
    }
    deck
});

/// Fewer numbers, more action cards and wilds.
pub static WILD_DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::new();
    for color in COLORS {
        for _ in 0..4 {
            for n in 1..=5 {
                deck.push(Card::new(color, Face::Number(n)));
            }
            for face in ACTION_FACES {
                deck.push(Card::new(color, face));
            }
        }
    }
    for face in SPECIALS {
        for _ in 0..6 {
            deck.push(Card::special(face));
        }
    }
    deck
});

pub fn deck_for(mode: GameMode) -> &'static [Card] {
    match mode {
        GameMode::Wild => &WILD_DECK,
        GameMode::Classic | GameMode::Fast | GameMode::Text => &CLASSIC_DECK,
    }
}

/// Every distinct canonical identity across both decks.
pub fn all_identities() -> Vec<String> {
    let mut ids: Vec<String> = CLASSIC_DECK
        .iter()
        .chain(WILD_DECK.iter())
        .map(Card::canonical)
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Deal a started game: shuffled deck, `hand_size` cards each, first
/// non-special card face up. The first named player starts and created the game.
pub fn deal_game<R: Rng>(
    rng: &mut R,
    game_id: &str,
    names: &[&str],
    mode: GameMode,
    hand_size: usize,
) -> GameSnapshot {
    assert!(!names.is_empty(), "a game needs at least one player");

    let mut deck: Vec<Card> = deck_for(mode).to_vec();
    // Large hands may need more than one deck.
    while deck.len() < names.len() * hand_size + 1 {
        deck.extend_from_slice(deck_for(mode));
    }
    deck.shuffle(rng);

    let players: Vec<Player> = names
        .iter()
        .enumerate()
        .map(|(i, name)| Player {
            user: User {
                id: i as i64 + 1,
                first_name: name.to_string(),
                last_name: None,
                username: None,
            },
            hand: deck.drain(..hand_size).collect(),
            drew: false,
        })
        .collect();

    let pos = deck.iter().position(|c| !c.face.is_special()).unwrap_or(0);
    let last_card = deck.remove(pos);

    GameSnapshot {
        game_id: game_id.to_string(),
        started: true,
        creator: players[0].user.id,
        current_player: players[0].user.id,
        players,
        last_card,
        draw_counter: 0,
        mode,
        forced_locale: None,
        choosing_color: false,
    }
}
