//! JSON-lines request handling: one request object per line in, one
//! response object per line out.

use serde::{Deserialize, Serialize};

use crate::engine::commands::{Command, CommandRouter, Reply};
use crate::engine::menu::MenuAssembler;
use crate::engine::models::{ActionDescriptor, GameSnapshot, SubMenu, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    InlineQuery {
        user: User,
        #[serde(default)]
        locale: Option<String>,
        #[serde(default)]
        query: String,
        #[serde(default)]
        game: Option<GameSnapshot>,
    },
    Command {
        user: User,
        #[serde(default)]
        locale: Option<String>,
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Results { results: Vec<ActionDescriptor> },
    Reply(Reply),
    /// The text is not one of ours; the transport should stay silent.
    Ignored,
    Error { message: String },
}

pub struct MenuServer {
    assembler: MenuAssembler,
    router: CommandRouter,
    default_locale: String,
}

impl MenuServer {
    pub fn new(assembler: MenuAssembler, router: CommandRouter, default_locale: String) -> Self {
        Self {
            assembler,
            router,
            default_locale,
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::InlineQuery {
                user,
                locale,
                query,
                game,
            } => {
                let locale = locale.unwrap_or_else(|| self.default_locale.clone());
                let sub_menu = SubMenu::from_query(&query);
                match self.assembler.assemble(user.id, &locale, sub_menu, game.as_ref()) {
                    Ok(results) => Response::Results { results },
                    Err(e) => {
                        tracing::error!(
                            user_id = user.id,
                            game_id = game.as_ref().map(|g| g.game_id.as_str()).unwrap_or(""),
                            error = %e,
                            "refusing to build menu"
                        );
                        Response::Error {
                            message: e.to_string(),
                        }
                    }
                }
            }
            Request::Command { user, locale, text } => {
                let locale = locale.unwrap_or_else(|| self.default_locale.clone());
                match Command::parse(&text) {
                    Some(command) => Response::Reply(self.router.dispatch(command, user.id, &locale).await),
                    None => Response::Ignored,
                }
            }
        }
    }

    /// Decode, handle and encode one line.
    pub async fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                Response::Error {
                    message: format!("invalid request: {}", e),
                }
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!("{{\"type\":\"error\",\"message\":\"failed to encode response: {}\"}}", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::engine::config::EngineConfig;
    use crate::engine::i18n::Catalog;
    use crate::engine::media::MediaTable;
    use crate::engine::stats::MemoryStatsStore;
    use crate::games::uno::rules::StandardRules;

    fn server() -> MenuServer {
        let catalog = Arc::new(Catalog::new());
        let assembler = MenuAssembler::new(
            catalog.clone(),
            Arc::new(MediaTable::placeholders()),
            Arc::new(StandardRules),
        );
        let router = CommandRouter::new(catalog, Arc::new(MemoryStatsStore::new()), &EngineConfig::default());
        MenuServer::new(assembler, router, "en".into())
    }

    #[tokio::test]
    async fn test_inline_query_line() {
        let line = r#"{"type":"inline_query","user":{"id":1,"first_name":"Ana"},"query":"","game":{
            "game_id":"-100","started":true,"creator":1,"current_player":1,
            "players":[{"user":{"id":1,"first_name":"Ana"},"hand":["r_1","b_draw_four"]}],
            "last_card":"r_5"}}"#;
        let out: serde_json::Value = serde_json::from_str(&server().handle_line(line).await).unwrap();
        assert_eq!(out["type"], "results");
        let results = out["results"].as_array().unwrap();
        assert_eq!(results[0]["id"], "hand");
        assert_eq!(results[0]["kind"], "hand_summary");
        assert_eq!(results[1]["id"], "draw");
    }

    #[tokio::test]
    async fn test_inconsistent_game_is_an_error() {
        let line = r#"{"type":"inline_query","user":{"id":1,"first_name":"Ana"},"game":{
            "game_id":"-100","started":true,"creator":1,"current_player":2,
            "players":[{"user":{"id":1,"first_name":"Ana"}}],"last_card":"r_5"}}"#;
        let out: serde_json::Value = serde_json::from_str(&server().handle_line(line).await).unwrap();
        assert_eq!(out["type"], "error");
    }

    #[tokio::test]
    async fn test_unknown_card_is_rejected() {
        let line = r#"{"type":"inline_query","user":{"id":1,"first_name":"Ana"},"game":{
            "game_id":"-100","creator":1,"current_player":1,
            "players":[{"user":{"id":1,"first_name":"Ana"}}],"last_card":"purple_5"}}"#;
        let out: serde_json::Value = serde_json::from_str(&server().handle_line(line).await).unwrap();
        assert_eq!(out["type"], "error");
        assert!(out["message"].as_str().unwrap().starts_with("invalid request"));
    }

    #[tokio::test]
    async fn test_commands() {
        let server = server();
        let line = r#"{"type":"command","user":{"id":1,"first_name":"Ana"},"text":"/stats"}"#;
        let out: serde_json::Value = serde_json::from_str(&server.handle_line(line).await).unwrap();
        assert_eq!(out["type"], "reply");
        assert!(out["text"].as_str().unwrap().starts_with("You did not enable statistics"));

        let line = r#"{"type":"command","user":{"id":1,"first_name":"Ana"},"text":"/kill"}"#;
        let out: serde_json::Value = serde_json::from_str(&server.handle_line(line).await).unwrap();
        assert_eq!(out["type"], "ignored");
    }
}
