//! Menu assembler: picks the builders for a request and orders their entries.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::engine::card_options::card_options;
use crate::engine::i18n::{Localizer, Tr};
use crate::engine::media::MediaTable;
use crate::engine::models::*;
use crate::engine::options::{self, MenuContext};
use crate::engine::rules::TurnRules;
use crate::games::uno::cards::Card;

/// One inline-menu request.
#[derive(Debug, Clone)]
pub struct MenuRequest {
    pub user_id: UserId,
    pub locale: String,
    pub sub_menu: SubMenu,
    pub game: Option<GameSnapshot>,
}

/// Turns game snapshots into ordered action lists. Holds only shared,
/// read-only collaborators, so one instance serves any number of threads.
#[derive(Clone)]
pub struct MenuAssembler {
    localizer: Arc<dyn Localizer>,
    media: Arc<MediaTable>,
    rules: Arc<dyn TurnRules>,
}

impl MenuAssembler {
    pub fn new(
        localizer: Arc<dyn Localizer>,
        media: Arc<MediaTable>,
        rules: Arc<dyn TurnRules>,
    ) -> Self {
        Self {
            localizer,
            media,
            rules,
        }
    }

    /// Build the menu `user_id` sees for `game`. A playable card value is
    /// offered once; further copies of it in the hand are greyed out with
    /// fresh ids, so no id repeats within a menu.
    pub fn assemble(
        &self,
        user_id: UserId,
        locale: &str,
        sub_menu: SubMenu,
        game: Option<&GameSnapshot>,
    ) -> Result<Vec<ActionDescriptor>, MenuError> {
        let Some(game) = game else {
            let tr = Tr::new(self.localizer.as_ref(), locale);
            return Ok(vec![options::no_game(&tr)]);
        };

        let current = game.validate()?;
        let effective_locale = game.forced_locale.as_deref().unwrap_or(locale);
        let tr = Tr::new(self.localizer.as_ref(), effective_locale);
        let requester_tr = Tr::new(self.localizer.as_ref(), locale);

        let Some(player) = game.player(user_id) else {
            return Ok(vec![options::no_game(&tr)]);
        };

        if !game.started {
            if sub_menu == SubMenu::GameModes && user_id == game.creator {
                return Ok(options::mode_choices(&tr));
            }
            return Ok(vec![options::not_started(&tr)]);
        }

        let ctx = MenuContext {
            game,
            media: self.media.as_ref(),
            tr,
        };
        let is_current = current.user.id == user_id;

        if is_current && game.choosing_color {
            let mut results = options::color_choices(&requester_tr, &tr);
            results.push(options::hand_summary(&ctx, player)?);
            return Ok(results);
        }

        let mut results = vec![options::hand_summary(&ctx, player)?];
        if is_current {
            if self.rules.may_draw(game, player) {
                results.push(options::draw(&ctx)?);
            }
            results.push(options::game_info(&ctx)?);
            if self.rules.may_pass(game, player) {
                results.push(options::pass(&ctx)?);
            }
            if self.rules.may_call_bluff(game, player) {
                results.push(options::call_bluff(&ctx)?);
            }
        } else {
            results.push(options::game_info(&ctx)?);
        }

        let hand = sorted_hand(player);
        // A card value is offered once; repeats of a playable value are greyed
        // out so every id in the menu stays unique.
        let mut offered: HashSet<String> = HashSet::new();
        let cards = card_options(&ctx, &hand, |card| {
            is_current
                && self.rules.is_playable(game, player, card)
                && offered.insert(card.canonical())
        })?;
        results.extend(cards);

        tracing::debug!(
            game_id = %game.game_id,
            user_id,
            entries = results.len(),
            "assembled menu"
        );
        Ok(results)
    }

    pub fn assemble_request(&self, request: &MenuRequest) -> Result<Vec<ActionDescriptor>, MenuError> {
        self.assemble(
            request.user_id,
            &request.locale,
            request.sub_menu,
            request.game.as_ref(),
        )
    }

    /// Assemble independent requests in parallel, preserving input order.
    pub fn render_batch(
        &self,
        requests: &[MenuRequest],
    ) -> Vec<Result<Vec<ActionDescriptor>, MenuError>> {
        requests
            .par_iter()
            .map(|request| self.assemble_request(request))
            .collect()
    }
}

/// The player's hand ordered by canonical identity.
fn sorted_hand(player: &Player) -> Player {
    let mut hand: Vec<Card> = player.hand.clone();
    hand.sort_by_key(Card::canonical);
    Player {
        user: player.user.clone(),
        hand,
        drew: player.drew,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::i18n::{Catalog, LocaleCatalog};
    use crate::games::uno::cards::{Color, Face};
    use crate::games::uno::rules::StandardRules;

    fn user(id: UserId, name: &str) -> User {
        User { id, first_name: name.into(), last_name: None, username: None }
    }

    fn game() -> GameSnapshot {
        GameSnapshot {
            game_id: "chat".into(),
            started: true,
            creator: 1,
            current_player: 1,
            players: vec![
                Player {
                    user: user(1, "Ana"),
                    hand: vec![
                        Card::new(Color::Red, Face::Number(3)),
                        Card::new(Color::Blue, Face::Number(8)),
                        Card::new(Color::Red, Face::Number(3)),
                    ],
                    drew: false,
                },
                Player {
                    user: user(2, "Bruno"),
                    hand: vec![Card::new(Color::Yellow, Face::Number(1))],
                    drew: false,
                },
            ],
            last_card: Card::new(Color::Red, Face::Number(9)),
            draw_counter: 0,
            mode: GameMode::Classic,
            forced_locale: None,
            choosing_color: false,
        }
    }

    fn assembler() -> MenuAssembler {
        MenuAssembler::new(
            Arc::new(Catalog::new()),
            Arc::new(MediaTable::placeholders()),
            Arc::new(StandardRules),
        )
    }

    fn kinds(results: &[ActionDescriptor]) -> Vec<ActionKind> {
        results.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_no_game() {
        let results = assembler().assemble(1, "en", SubMenu::Hand, None).unwrap();
        assert_eq!(kinds(&results), vec![ActionKind::NoGameNotice]);
        assert!(!results[0].enabled);
    }

    #[test]
    fn test_unseated_requester_gets_no_game() {
        let g = game();
        let results = assembler().assemble(42, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(results[0].title.as_deref(), Some("You are not playing"));
    }

    #[test]
    fn test_lobby() {
        let mut g = game();
        g.started = false;
        let a = assembler();
        let results = a.assemble(2, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("The game wasn't started yet"));

        // Only the creator may pick the mode.
        let results = a.assemble(2, "en", SubMenu::GameModes, Some(&g)).unwrap();
        assert_eq!(kinds(&results), vec![ActionKind::NoGameNotice]);
        let results = a.assemble(1, "en", SubMenu::GameModes, Some(&g)).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.kind == ActionKind::ChooseMode));
    }

    #[test]
    fn test_turn_menu_order() {
        let g = game();
        let results = assembler().assemble(1, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(
            kinds(&results),
            vec![
                ActionKind::HandSummary,
                ActionKind::Draw,
                ActionKind::ViewInfo,
                ActionKind::PlayCard,
                ActionKind::PlayCard,
                ActionKind::PlayCard,
            ]
        );
        // b_8 is unplayable on r_9; the second red three is greyed out.
        let cards = &results[3..];
        assert_ne!(cards[0].id, "b_8");
        assert_eq!(cards[0].media.as_deref(), Some("grey_b_8"));
        assert!(!cards[0].enabled);
        assert_eq!(cards[1].id, "r_3");
        assert!(cards[1].enabled);
        assert!(!cards[2].enabled);
        assert_ne!(cards[2].id, "r_3");
    }

    #[test]
    fn test_pass_and_bluff_after_draw_four() {
        let mut g = game();
        g.last_card = Card::new(Color::Green, Face::DrawFour);
        g.draw_counter = 4;
        g.players[0].drew = true;
        let results = assembler().assemble(1, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(
            kinds(&results)[..4],
            [
                ActionKind::HandSummary,
                ActionKind::ViewInfo,
                ActionKind::Pass,
                ActionKind::Challenge,
            ]
        );
    }

    #[test]
    fn test_choosing_color() {
        let mut g = game();
        g.choosing_color = true;
        let results = assembler().assemble(1, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(|r| r.kind == ActionKind::ChooseColor));
        assert_eq!(results[4].kind, ActionKind::HandSummary);
    }

    #[test]
    fn test_color_description_and_group_message_follow_their_locales() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "pt",
            LocaleCatalog::from_toml_str("[messages]\n\"{emoji} Blue\" = \"{emoji} Azul\"\n").unwrap(),
        );
        let assembler = MenuAssembler::new(
            Arc::new(catalog),
            Arc::new(MediaTable::placeholders()),
            Arc::new(StandardRules),
        );
        let mut g = game();
        g.choosing_color = true;
        g.forced_locale = Some("pt".into());
        let results = assembler.assemble(1, "en", SubMenu::Hand, Some(&g)).unwrap();
        let blue = &results[1];
        assert_eq!(blue.id, "b");
        assert_eq!(blue.description.as_deref(), Some("💙 Blue"));
        assert_eq!(blue.message.as_ref().map(|m| m.text.as_str()), Some("💙 Azul"));
        assert_ne!(blue.description.as_deref(), blue.message.as_ref().map(|m| m.text.as_str()));
    }

    #[test]
    fn test_other_players_see_greyed_hand() {
        let g = game();
        let results = assembler().assemble(2, "en", SubMenu::Hand, Some(&g)).unwrap();
        assert_eq!(
            kinds(&results),
            vec![ActionKind::HandSummary, ActionKind::ViewInfo, ActionKind::PlayCard]
        );
        assert!(!results[2].enabled);
    }

    #[test]
    fn test_inconsistent_snapshots_are_refused() {
        let mut g = game();
        g.current_player = 7;
        assert!(matches!(
            assembler().assemble(1, "en", SubMenu::Hand, Some(&g)),
            Err(MenuError::CurrentPlayerNotSeated { user_id: 7, .. })
        ));
        g.players.clear();
        assert!(matches!(
            assembler().assemble(1, "en", SubMenu::Hand, Some(&g)),
            Err(MenuError::EmptyTurnOrder { .. })
        ));
    }

    #[test]
    fn test_render_batch_preserves_order() {
        let g = game();
        let requests: Vec<MenuRequest> = (0..16)
            .map(|i| MenuRequest {
                user_id: if i % 2 == 0 { 1 } else { 2 },
                locale: "en".into(),
                sub_menu: SubMenu::Hand,
                game: Some(g.clone()),
            })
            .collect();
        let results = assembler().render_batch(&requests);
        assert_eq!(results.len(), 16);
        for (i, result) in results.into_iter().enumerate() {
            let entries = result.unwrap();
            let expected = if i % 2 == 0 { 6 } else { 3 };
            assert_eq!(entries.len(), expected);
        }
    }
}
