//! Fixture generator for manual runs of the menu server.
//!
//! Deals deterministic games and writes a placeholder media table, a config
//! file and a JSON-lines request stream. Run with:
//!
//!     cargo run --bin generate_fixtures
//!     cargo run --bin uno-menu-engine -- --config fixtures/uno_menu.toml < fixtures/requests.jsonl

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use uno_menu_engine::engine::media::MediaTable;
use uno_menu_engine::engine::models::{GameMode, GameSnapshot};
use uno_menu_engine::games::uno::deck::deal_game;
use uno_menu_engine::server::Request;

const SEEDS: [u64; 3] = [42, 123, 999];
const MODES: [GameMode; 3] = [GameMode::Classic, GameMode::Wild, GameMode::Text];
const NAMES: [&str; 3] = ["Ana", "Bruno", "Carla"];

fn requests_for(game: &GameSnapshot) -> Vec<Request> {
    let mut requests: Vec<Request> = game
        .players
        .iter()
        .map(|p| Request::InlineQuery {
            user: p.user.clone(),
            locale: Some("en".into()),
            query: String::new(),
            game: Some(game.clone()),
        })
        .collect();

    // The same menu rendered for a Portuguese-speaking player.
    requests.push(Request::InlineQuery {
        user: game.players[0].user.clone(),
        locale: Some("pt".into()),
        query: String::new(),
        game: Some(game.clone()),
    });
    requests
}

fn main() {
    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    fs::create_dir_all(&fixtures_dir).expect("Failed to create fixtures directory");

    let media = toml::to_string(&MediaTable::placeholders()).expect("Failed to encode media table");
    fs::write(fixtures_dir.join("media.toml"), media).expect("Failed to write media table");

    let config = "media = \"media.toml\"\nlocales_dir = \"../locales\"\nstats_file = \"stats.json\"\n";
    fs::write(fixtures_dir.join("uno_menu.toml"), config).expect("Failed to write config");

    let stats = serde_json::json!({
        "1": {"games_played": 3, "first_places": 1, "cards_played": 41, "stats": true},
        "2": {"games_played": 8, "first_places": 1, "cards_played": 96, "stats": false},
    });
    fs::write(
        fixtures_dir.join("stats.json"),
        serde_json::to_string_pretty(&stats).expect("Failed to encode stats"),
    )
    .expect("Failed to write stats");

    let mut lines = Vec::new();
    for (&seed, &mode) in SEEDS.iter().zip(MODES.iter()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let game = deal_game(&mut rng, &format!("game_{seed}"), &NAMES, mode, 7);
        for request in requests_for(&game) {
            lines.push(serde_json::to_string(&request).expect("Failed to encode request"));
        }
        eprintln!("  Dealt game_{} ({:?}, last card {})", seed, mode, game.last_card);
    }

    for (user, text) in [(1, "/stats"), (2, "/stats"), (3, "/help"), (1, "/modes@unobot")] {
        let request = Request::Command {
            user: uno_menu_engine::engine::models::User {
                id: user,
                first_name: NAMES[(user - 1) as usize].into(),
                last_name: None,
                username: None,
            },
            locale: None,
            text: text.into(),
        };
        lines.push(serde_json::to_string(&request).expect("Failed to encode request"));
    }

    let path = fixtures_dir.join("requests.jsonl");
    fs::write(&path, lines.join("\n") + "\n").expect("Failed to write requests");
    eprintln!("\nGenerated {} requests in {:?}", lines.len(), path);
}
