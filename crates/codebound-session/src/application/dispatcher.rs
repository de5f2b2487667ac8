//! Routes player actions to their resolvers.
//!
//! Every resolver validates before it mutates, so a rejected action leaves
//! the state untouched. On success the dispatcher appends exactly one
//! `action` entry to the event log and refreshes the action hints.

use std::sync::Arc;

use codebound_character::domain::quest::accept_quest;
use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::log::LogKind;
use codebound_core::rng::DeterministicRng;
use codebound_inventory::domain::rest::rest;
use codebound_inventory::domain::shop::visit_shop;
use codebound_narrative::domain::outcome::validate_story_graph;
use codebound_narrative::domain::story::resolve_choice;
use codebound_rules::domain::combat::{FightResult, fight};
use codebound_rules::domain::enemies::find_enemy;
use codebound_rules::domain::exploration::{Discovery, explore};
use tracing::{info, instrument, warn};

use crate::domain::action::{ActionKind, ActionRequest, ActionResponse, CombatReport};
use crate::domain::game_state::{
    EXPLORE_HINT_PREFIX, FIGHT_HINT_PREFIX, GameState, QUEST_HINT_PREFIX,
};

/// A resolver's successful output before the dispatcher logs it.
struct Applied {
    response: ActionResponse,
    encounter: Option<String>,
}

impl Applied {
    fn plain(response: ActionResponse) -> Self {
        Self {
            response,
            encounter: None,
        }
    }
}

/// The action dispatcher.
pub struct GameEngine {
    clock: Arc<dyn Clock>,
}

impl GameEngine {
    /// Creates an engine after checking the story graph against the enemy
    /// table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the story graph is malformed.
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        validate_story_graph(|enemy| find_enemy(enemy).is_some())?;
        Ok(Self { clock })
    }

    /// Applies one action to `state`. Never fails: rejections come back as
    /// `success: false` with the state unchanged.
    #[instrument(skip_all, fields(user_id = %state.user_id, action = %request.action))]
    pub fn dispatch(
        &self,
        state: &mut GameState,
        request: &ActionRequest,
        rng: &mut dyn DeterministicRng,
    ) -> ActionResponse {
        let Ok(kind) = request.action.parse::<ActionKind>() else {
            return ActionResponse::rejected("Unknown action");
        };

        match self.resolve(kind, state, &request.target, rng) {
            Ok(applied) => {
                state.game_log.record(
                    self.clock.as_ref(),
                    LogKind::Action,
                    applied.response.log_entry.clone(),
                );
                match applied.encounter {
                    Some(enemy_key) => state.offer_fight(&enemy_key),
                    None => state.restore_hub_actions(),
                }
                info!(action_target = %request.target, "action applied");
                applied.response
            }
            Err(DomainError::Validation(message)) => {
                info!(action_target = %request.target, %message, "action rejected");
                ActionResponse::rejected(message)
            }
            Err(err) => {
                warn!(error = %err, "action failed");
                ActionResponse::rejected(err.to_string())
            }
        }
    }

    fn resolve(
        &self,
        kind: ActionKind,
        state: &mut GameState,
        target: &str,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Applied, DomainError> {
        let clock = self.clock.as_ref();
        let GameState {
            player,
            game_log,
            story,
            ..
        } = state;

        match kind {
            ActionKind::StoryChoice => {
                let resolution = resolve_choice(story, player, target, game_log, clock)?;
                let mut response = ActionResponse::applied(resolution.message, resolution.log_entry)
                    .with_progress(resolution.levels_gained, Vec::new());
                response.next_stage = Some(story.current_stage);
                response.ending = resolution.ending;
                Ok(Applied {
                    response,
                    encounter: resolution.encounter.map(str::to_owned),
                })
            }
            ActionKind::Explore => {
                let area_key = target.strip_prefix(EXPLORE_HINT_PREFIX).unwrap_or(target);
                let resolution = explore(player, area_key, rng, game_log, clock)?;
                let response = ActionResponse::applied(resolution.message, resolution.log_entry);
                Ok(match resolution.discovery {
                    Discovery::Encounter { enemy_key, .. } => Applied {
                        response,
                        encounter: Some(enemy_key),
                    },
                    Discovery::Loot {
                        levels_gained,
                        quests_completed,
                        ..
                    } => Applied::plain(response.with_progress(levels_gained, quests_completed)),
                })
            }
            ActionKind::Fight => {
                let enemy_key = target.strip_prefix(FIGHT_HINT_PREFIX).unwrap_or(target);
                let resolution = fight(player, enemy_key, rng, game_log, clock)?;
                let report = CombatReport {
                    enemy: resolution.enemy.name,
                    victory: matches!(resolution.result, FightResult::Victory { .. }),
                    rounds: resolution.rounds,
                    damage_taken: resolution.damage_taken,
                };
                let mut response = ActionResponse::applied(resolution.message, resolution.log_entry);
                if let FightResult::Victory {
                    levels_gained,
                    quests_completed,
                    ..
                } = resolution.result
                {
                    response = response.with_progress(levels_gained, quests_completed);
                }
                response.combat = Some(report);
                Ok(Applied::plain(response))
            }
            ActionKind::Rest => {
                let resolution = rest(player)?;
                Ok(Applied::plain(ActionResponse::applied(
                    resolution.message,
                    resolution.log_entry,
                )))
            }
            ActionKind::Shop => {
                let visit = visit_shop();
                let mut response = ActionResponse::applied(visit.message, visit.log_entry);
                response.shop_items = Some(visit.items);
                Ok(Applied::plain(response))
            }
            ActionKind::QuestAccept => {
                let quest_id = target.strip_prefix(QUEST_HINT_PREFIX).unwrap_or(target);
                let quest = accept_quest(player, quest_id)?;
                Ok(Applied::plain(ActionResponse::applied(
                    format!("Quest accepted: {}", quest.name),
                    format!("[QUEST] Accepted: {}", quest.name),
                )))
            }
        }
    }
}
