use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use uno_menu_engine::engine::commands::CommandRouter;
use uno_menu_engine::engine::config::{load_config, load_default_config};
use uno_menu_engine::engine::i18n::{load_catalog_dir, Catalog};
use uno_menu_engine::engine::media::{load_media, MediaTable};
use uno_menu_engine::engine::menu::MenuAssembler;
use uno_menu_engine::engine::stats::{JsonFileStatsStore, MemoryStatsStore, StatsStore};
use uno_menu_engine::games::uno::rules::StandardRules;
use uno_menu_engine::server::MenuServer;

#[derive(Parser)]
#[command(
    name = "uno-menu-engine",
    about = "UNO inline menu engine: JSON-lines requests on stdin, responses on stdout"
)]
struct Cli {
    /// Path to uno_menu.toml (default: auto-discover)
    #[arg(short, long, env = "UNO_MENU_CONFIG")]
    config: Option<PathBuf>,

    /// Media table TOML (overrides the config file)
    #[arg(long, env = "UNO_MENU_MEDIA")]
    media: Option<PathBuf>,

    /// Directory of locale catalogs (overrides the config file)
    #[arg(long, env = "UNO_MENU_LOCALES")]
    locales: Option<PathBuf>,

    /// Statistics JSON file (overrides the config file)
    #[arg(long, env = "UNO_MENU_STATS")]
    stats: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => load_default_config(),
    };
    if cli.media.is_some() {
        config.media = cli.media;
    }
    if cli.locales.is_some() {
        config.locales_dir = cli.locales;
    }
    if cli.stats.is_some() {
        config.stats_file = cli.stats;
    }

    let media_path = config
        .media
        .as_ref()
        .ok_or("no media table configured (set `media` or pass --media)")?;
    let media: MediaTable = load_media(media_path)?;

    let catalog = match config.locales_dir {
        Some(ref dir) => load_catalog_dir(dir)?,
        None => Catalog::new(),
    };
    tracing::info!(locales = ?catalog.locales(), "loaded locale catalogs");

    let stats: Arc<dyn StatsStore> = match config.stats_file {
        Some(ref path) => Arc::new(JsonFileStatsStore::new(path)),
        None => {
            tracing::info!("no stats file configured, /stats will report opt-out");
            Arc::new(MemoryStatsStore::new())
        }
    };

    let catalog = Arc::new(catalog);
    let assembler = MenuAssembler::new(catalog.clone(), Arc::new(media), Arc::new(StandardRules));
    let router = CommandRouter::new(catalog, stats, &config);
    let server = MenuServer::new(assembler, router, config.default_locale.clone());

    tracing::info!(bot = %config.bot_username, "serving requests on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut response = server.handle_line(&line).await;
        response.push('\n');
        stdout.write_all(response.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
