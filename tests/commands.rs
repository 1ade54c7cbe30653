//! Command replies through the JSON-lines server, backed by a stats file.

use std::path::PathBuf;
use std::sync::Arc;

use uno_menu_engine::engine::commands::CommandRouter;
use uno_menu_engine::engine::config::EngineConfig;
use uno_menu_engine::engine::i18n::load_catalog_dir;
use uno_menu_engine::engine::media::MediaTable;
use uno_menu_engine::engine::menu::MenuAssembler;
use uno_menu_engine::engine::stats::JsonFileStatsStore;
use uno_menu_engine::games::uno::rules::StandardRules;
use uno_menu_engine::server::MenuServer;

fn server(stats_path: PathBuf) -> MenuServer {
    let locales = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("locales");
    let catalog = Arc::new(load_catalog_dir(&locales).unwrap());
    let config = EngineConfig {
        bot_username: "testunobot".into(),
        ..Default::default()
    };
    let assembler = MenuAssembler::new(
        catalog.clone(),
        Arc::new(MediaTable::placeholders()),
        Arc::new(StandardRules),
    );
    let router = CommandRouter::new(catalog, Arc::new(JsonFileStatsStore::new(stats_path)), &config);
    MenuServer::new(assembler, router, config.default_locale.clone())
}

fn command(user_id: i64, locale: Option<&str>, text: &str) -> String {
    serde_json::json!({
        "type": "command",
        "user": {"id": user_id, "first_name": "Ana"},
        "locale": locale,
        "text": text,
    })
    .to_string()
}

async fn reply(server: &MenuServer, line: &str) -> serde_json::Value {
    serde_json::from_str(&server.handle_line(line).await).unwrap()
}

#[tokio::test]
async fn test_stats_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(
        &path,
        r#"{
            "1": {"games_played": 3, "first_places": 1, "cards_played": 41, "stats": true},
            "2": {"games_played": 8, "first_places": 1, "cards_played": 96, "stats": false}
        }"#,
    )
    .unwrap();
    let server = server(path);

    let out = reply(&server, &command(1, None, "/stats")).await;
    assert_eq!(out["type"], "reply");
    assert_eq!(out["text"], "3 games played\n1 first place (33%)\n41 cards played");
    assert_eq!(out["parse_mode"], "plain");

    let out = reply(&server, &command(1, Some("pt"), "/stats")).await;
    assert_eq!(out["text"], "3 jogos jogados\n1 primeiro lugar (33%)\n41 cartas jogadas");

    let out = reply(&server, &command(2, None, "/stats")).await;
    assert!(out["text"].as_str().unwrap().starts_with("You did not enable statistics"));

    let out = reply(&server, &command(3, None, "/stats")).await;
    assert!(out["text"].as_str().unwrap().starts_with("You did not enable statistics"));
}

#[tokio::test]
async fn test_unreadable_stats_file_reads_as_opt_out() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path().join("missing.json"));
    let out = reply(&server, &command(1, None, "/stats")).await;
    assert!(out["text"].as_str().unwrap().starts_with("You did not enable statistics"));
}

#[tokio::test]
async fn test_help_is_localized_and_filled() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path().join("stats.json"));

    let out = reply(&server, &command(1, None, "/help@testunobot")).await;
    assert_eq!(out["parse_mode"], "html");
    assert_eq!(out["disable_web_page_preview"], true);
    let text = out["text"].as_str().unwrap();
    assert!(text.starts_with("Follow these steps:"));
    assert!(text.contains("<code>@testunobot</code>"));

    let out = reply(&server, &command(1, Some("pt_BR"), "/help")).await;
    let text = out["text"].as_str().unwrap();
    assert!(text.starts_with("Siga estes passos:"));
    assert!(text.contains("<code>@testunobot</code>"));
    assert!(text.contains("https://telegram.me/unobotupdates"));
}

#[tokio::test]
async fn test_source_and_news() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path().join("stats.json"));

    let out = reply(&server, &command(1, Some("pt"), "/source")).await;
    let text = out["text"].as_str().unwrap();
    assert!(text.starts_with("Este bot é Software Livre"));
    assert!(text.contains("Atribuições:"));

    let out = reply(&server, &command(1, Some("pt"), "/news")).await;
    assert_eq!(out["text"], "Todas as novidades aqui: https://telegram.me/unobotupdates");

    let out = reply(&server, &command(1, None, "/modes")).await;
    assert_eq!(out["parse_mode"], "html");
}

#[tokio::test]
async fn test_foreign_commands_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path().join("stats.json"));
    let out = reply(&server, &command(1, None, "/join")).await;
    assert_eq!(out["type"], "ignored");

    let out: serde_json::Value =
        serde_json::from_str(&server.handle_line("{not json").await).unwrap();
    assert_eq!(out["type"], "error");
}

fn lobby(creator: i64) -> serde_json::Value {
    serde_json::json!({
        "game_id": "-1001",
        "started": false,
        "creator": creator,
        "current_player": creator,
        "players": [
            {"user": {"id": 1, "first_name": "Ana"}},
            {"user": {"id": 2, "first_name": "Bruno"}}
        ],
        "last_card": "r_5"
    })
}

#[tokio::test]
async fn test_modes_instructions_open_the_mode_menu() {
    let dir = tempfile::tempdir().unwrap();
    let server = server(dir.path().join("stats.json"));

    for locale in ["en", "pt"] {
        let out = reply(&server, &command(1, Some(locale), "/modes")).await;
        let text = out["text"].as_str().unwrap();
        let start = text.find("<code>@testunobot ").unwrap() + "<code>@testunobot ".len();
        let end = start + text[start..].find("</code>").unwrap();
        let query = &text[start..end];

        let inline = serde_json::json!({
            "type": "inline_query",
            "user": {"id": 1, "first_name": "Ana"},
            "locale": locale,
            "query": query,
            "game": lobby(1),
        })
        .to_string();
        let out = reply(&server, &inline).await;
        let results = out["results"].as_array().unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r["kind"] == "choose_mode"));

        // Anyone else following the same steps sees the lobby notice.
        let inline = serde_json::json!({
            "type": "inline_query",
            "user": {"id": 2, "first_name": "Bruno"},
            "query": query,
            "game": lobby(1),
        })
        .to_string();
        let out = reply(&server, &inline).await;
        assert_eq!(out["results"][0]["kind"], "no_game_notice");
    }
}
