//! Informational commands: /help, /modes, /source, /news and /stats.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::i18n::{fill, Localizer, Tr};
use crate::engine::models::{ParseMode, UserId};
use crate::engine::stats::{fetch_with_timeout, StatsStore, UserStatsRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Help,
    Modes,
    Source,
    News,
    Stats,
}

impl Command {
    /// Parse `/name`, `/name@bot` or `/name args`.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name.to_lowercase().as_str() {
            "help" => Some(Command::Help),
            "modes" => Some(Command::Modes),
            "source" => Some(Command::Source),
            "news" => Some(Command::News),
            "stats" => Some(Command::Stats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub disable_web_page_preview: bool,
}

impl Reply {
    fn html(text: String) -> Self {
        Self {
            text,
            parse_mode: ParseMode::Html,
            disable_web_page_preview: true,
        }
    }

    fn plain(text: String, disable_web_page_preview: bool) -> Self {
        Self {
            text,
            parse_mode: ParseMode::Plain,
            disable_web_page_preview,
        }
    }
}

const HELP_TEXT: &str = "Follow these steps:\n\n\
1. Add this bot to a group\n\
2. In the group, start a new game with /new or join an already running game with /join\n\
3. After at least two players have joined, start the game with /start\n\
4. Type <code>@{bot}</code> into your chat box and hit <b>space</b>, or click the \
<code>via @{bot}</code> text next to messages. You will see your cards (some greyed out), \
any extra options like drawing, and a <b>?</b> to see the current game state. The \
<b>greyed out cards</b> are those you <b>can not play</b> at the moment. Tap an option \
to execute the selected action.\n\
Players can join the game at any time. To leave a game, use /leave. If a player takes \
more than 90 seconds to play, you can use /skip to skip that player. Use /notify_me to \
receive a private message when a new game is started.\n\n\
<b>Language</b> and other settings: /settings\n\
Other commands (only game creator):\n\
/close - Close lobby\n\
/open - Open lobby\n\
/kill - Terminate the game\n\
/kick - Select a player to kick by replying to him or her\n\
/enable_translations - Translate relevant texts into all languages spoken in a game\n\
/disable_translations - Use English for those texts\n\n\
<b>Experimental:</b> Play in multiple groups at the same time. Press the \
<code>Current game: ...</code> button and select the group you want to play a card in.\n\
If you enjoy this bot, join the <a href=\"{news}\">channel</a> and have fun playing UNO.";

const MODES_TEXT: &str = "This UNO bot has four game modes: Classic, Sanic, Wild and Text.\n\n\
 🎻 The Classic mode uses the conventional UNO deck and there is no auto skip.\n\
 🚀 The Sanic mode uses the conventional UNO deck and the bot automatically skips a player \
if he/she takes too long to play its turn\n\
 🐉 The Wild mode uses a deck with more special cards, less number variety and no auto skip.\n\
 ✍️ The Text mode uses the conventional UNO deck but instead of stickers it uses the text.\n\n\
To change the game mode, the GAME CREATOR has to type <code>@{bot} modes</code> into \
the chat box while the game is in the lobby, and all gamemode options should appear.";

const SOURCE_TEXT: &str = "This bot is Free Software and licensed under the AGPL. \
The code is available here: \n{url}";

const ATTRIBUTIONS_TEXT: &str = "Attributions:\n\
Draw icon by <a href=\"http://www.faithtoken.com/\">Faithtoken</a>\n\
Pass icon by <a href=\"http://delapouite.com/\">Delapouite</a>\n\
Originals available on http://game-icons.net\n\
Icons edited by ɳick";

/// Answers the informational commands. Collaborators are injected; nothing
/// here touches game state.
#[derive(Clone)]
pub struct CommandRouter {
    localizer: Arc<dyn Localizer>,
    stats: Arc<dyn StatsStore>,
    stats_timeout: Duration,
    bot_username: String,
    source_url: String,
    news_url: String,
}

impl CommandRouter {
    pub fn new(
        localizer: Arc<dyn Localizer>,
        stats: Arc<dyn StatsStore>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            localizer,
            stats,
            stats_timeout: config.stats_timeout(),
            bot_username: config.bot_username.clone(),
            source_url: config.source_url.clone(),
            news_url: config.news_url.clone(),
        }
    }

    pub async fn dispatch(&self, command: Command, user_id: UserId, locale: &str) -> Reply {
        let tr = Tr::new(self.localizer.as_ref(), locale);
        tracing::debug!(?command, user_id, locale, "dispatching command");
        match command {
            Command::Help => self.help(&tr),
            Command::Modes => Reply::html(fill(
                &tr.t(MODES_TEXT),
                &[("bot", self.bot_username.as_str())],
            )),
            Command::Source => self.source(&tr),
            Command::News => Reply::plain(
                fill(&tr.t("All news here: {url}"), &[("url", self.news_url.as_str())]),
                true,
            ),
            Command::Stats => {
                let record =
                    fetch_with_timeout(Arc::clone(&self.stats), user_id, self.stats_timeout).await;
                Reply::plain(stats_text(record.as_ref(), &tr), false)
            }
        }
    }

    fn help(&self, tr: &Tr) -> Reply {
        Reply::html(fill(
            &tr.t(HELP_TEXT),
            &[("bot", self.bot_username.as_str()), ("news", self.news_url.as_str())],
        ))
    }

    fn source(&self, tr: &Tr) -> Reply {
        let source = fill(&tr.t(SOURCE_TEXT), &[("url", self.source_url.as_str())]);
        Reply::html(format!("{}\n{}", source, tr.t(ATTRIBUTIONS_TEXT)))
    }
}

/// The /stats reply for an optional record.
pub fn stats_text(record: Option<&UserStatsRecord>, tr: &Tr) -> String {
    let record = match record {
        Some(record) if record.stats => record,
        _ => {
            return tr.t("You did not enable statistics. Use /settings in a private chat with the bot to enable them.")
        }
    };

    let games = record.games_played.to_string();
    let firsts = record.first_places.to_string();
    let percent = record.first_place_percent().to_string();
    let cards = record.cards_played.to_string();

    [
        fill(
            &tr.n("{number} game played", "{number} games played", record.games_played),
            &[("number", games.as_str())],
        ),
        fill(
            &tr.n(
                "{number} first place ({percent}%)",
                "{number} first places ({percent}%)",
                record.first_places,
            ),
            &[("number", firsts.as_str()), ("percent", percent.as_str())],
        ),
        fill(
            &tr.n("{number} card played", "{number} cards played", record.cards_played),
            &[("number", cards.as_str())],
        ),
    ]
    .join("\n")
}
