//! The per-user game aggregate.

use chrono::{DateTime, Utc};
use codebound_character::domain::player::Player;
use codebound_core::log::EventLog;
use codebound_narrative::domain::story::StoryState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of the hint that offers a pending fight.
pub const FIGHT_HINT_PREFIX: &str = "fight_";

/// Prefix of the hub's exploration hints, e.g. `explore_forest`.
pub const EXPLORE_HINT_PREFIX: &str = "explore_";

/// Prefix of the hub's quest hints, e.g. `quest_goblin_hunt`.
pub const QUEST_HINT_PREFIX: &str = "quest_";

/// Hint for making a story choice; dropped once the story is complete.
pub const STORY_HINT: &str = "story_choice";

/// Actions offered at the hub when nothing is pending.
pub const HUB_ACTIONS: [&str; 7] = [
    "explore_forest",
    "explore_cave",
    "explore_dungeon",
    "rest",
    "shop",
    "quest_goblin_hunt",
    "quest_treasure_hunt",
];

/// Everything one user's game consists of. This is also the save-record
/// payload, so its serialized shape is the durable format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The player character.
    pub player: Player,
    /// Full event log; queries only show the tail.
    pub game_log: EventLog,
    /// Narrative position, flattened into `current_stage`,
    /// `story_progress`, and `ending`.
    #[serde(flatten)]
    pub story: StoryState,
    /// Hint list of what the player can do next.
    pub available_actions: Vec<String>,
    /// Id of the save this state was written to or loaded from.
    #[serde(default)]
    pub save_id: Option<Uuid>,
    /// Name of that save.
    #[serde(default)]
    pub save_name: Option<String>,
    /// Creation time of that save.
    #[serde(default)]
    pub save_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub user_id: String,
}

impl GameState {
    /// A fresh game for `user_id`: starting player, empty log, stage 1.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        let mut state = Self {
            player: Player::default(),
            game_log: EventLog::new(),
            story: StoryState::default(),
            available_actions: Vec::new(),
            save_id: None,
            save_name: None,
            save_date: None,
            user_id: user_id.into(),
        };
        state.restore_hub_actions();
        state
    }

    /// Replaces the hint list with the hub actions.
    pub fn restore_hub_actions(&mut self) {
        let story = (!self.story.current_stage.is_complete()).then_some(STORY_HINT);
        self.available_actions = story
            .into_iter()
            .chain(HUB_ACTIONS)
            .map(str::to_owned)
            .collect();
    }

    /// Offers a fight against `enemy_key` ahead of the hub actions.
    pub fn offer_fight(&mut self, enemy_key: &str) {
        self.restore_hub_actions();
        self.available_actions
            .insert(0, format!("{FIGHT_HINT_PREFIX}{enemy_key}"));
    }

    /// The enemy key of a pending fight hint, if any.
    #[must_use]
    pub fn pending_fight(&self) -> Option<&str> {
        self.available_actions
            .iter()
            .find_map(|action| action.strip_prefix(FIGHT_HINT_PREFIX))
    }

    /// Rebuilds the hint list from the current state, keeping a pending
    /// fight if one is offered.
    pub fn refresh_actions(&mut self) {
        match self.pending_fight().map(str::to_owned) {
            Some(enemy_key) => self.offer_fight(&enemy_key),
            None => self.restore_hub_actions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use codebound_narrative::domain::stage::CurrentStage;

    use super::*;

    #[test]
    fn test_new_state_starts_at_stage_one_with_hub_actions() {
        let state = GameState::new("alice");

        assert_eq!(state.user_id, "alice");
        assert_eq!(state.story.current_stage, CurrentStage::default());
        assert_eq!(state.available_actions[0], STORY_HINT);
        assert_eq!(state.available_actions.len(), HUB_ACTIONS.len() + 1);
        assert!(state.game_log.is_empty());
        assert!(state.save_id.is_none());
    }

    #[test]
    fn test_fight_hint_leads_and_survives_refresh() {
        let mut state = GameState::new("alice");

        state.offer_fight("dark_knight");
        state.refresh_actions();

        assert_eq!(state.available_actions[0], "fight_dark_knight");
        assert_eq!(state.pending_fight(), Some("dark_knight"));
        assert_eq!(
            state
                .available_actions
                .iter()
                .filter(|action| action.starts_with(FIGHT_HINT_PREFIX))
                .count(),
            1
        );
    }

    #[test]
    fn test_complete_story_drops_story_hint() {
        let mut state = GameState::new("alice");
        state.story.current_stage = CurrentStage::Complete;

        state.restore_hub_actions();

        assert!(!state.available_actions.iter().any(|a| a == STORY_HINT));
    }

    #[test]
    fn test_serialized_shape_matches_save_record() {
        let state = GameState::new("alice");

        let json = serde_json::to_value(&state).unwrap();

        for field in [
            "player",
            "game_log",
            "available_actions",
            "current_stage",
            "story_progress",
            "save_id",
            "save_name",
            "save_date",
            "user_id",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["current_stage"], 1);
        assert!(json.get("story").is_none());
    }

    #[test]
    fn test_state_survives_json_round_trip() {
        let mut state = GameState::new("alice");
        state.story.current_stage = CurrentStage::Complete;
        state.offer_fight("goblin");

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
    }
}
