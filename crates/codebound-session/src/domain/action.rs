//! Action requests and responses.

use std::collections::BTreeMap;
use std::str::FromStr;

use codebound_inventory::domain::shop::ShopItem;
use codebound_narrative::domain::stage::{CurrentStage, Ending};
use serde::{Deserialize, Serialize};

/// The recognized action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Pick a story choice; target is the choice key.
    StoryChoice,
    /// Explore an area; target is the area key or its `explore_` hint.
    Explore,
    /// Fight an enemy; target is the enemy key or its `fight_` hint.
    Fight,
    /// Pay to restore hit points.
    Rest,
    /// Browse the shop.
    Shop,
    /// Accept a quest; target is the quest id or its `quest_` hint.
    QuestAccept,
}

impl ActionKind {
    /// The wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoryChoice => "story_choice",
            Self::Explore => "explore",
            Self::Fight => "fight",
            Self::Rest => "rest",
            Self::Shop => "shop",
            Self::QuestAccept => "quest_accept",
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "story_choice" => Ok(Self::StoryChoice),
            "explore" => Ok(Self::Explore),
            "fight" => Ok(Self::Fight),
            "rest" => Ok(Self::Rest),
            "shop" => Ok(Self::Shop),
            "quest_accept" => Ok(Self::QuestAccept),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// An inbound action. Both fields are free text so unknown values reach
/// the dispatcher and fail there with a structured response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action kind, e.g. `explore`.
    #[serde(default)]
    pub action: String,
    /// Target key, e.g. `forest`.
    #[serde(default)]
    pub target: String,
}

impl ActionRequest {
    /// Builds a request.
    pub fn new(action: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
        }
    }
}

/// The structured result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    /// Whether the action was applied.
    pub success: bool,
    /// Message for the player.
    pub message: String,
    /// Line appended to the event log, empty on failure.
    pub log_entry: String,
    /// Where the story moved, for story choices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<CurrentStage>,
    /// The ending reached, for a final story choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
    /// The catalog, for shop visits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_items: Option<BTreeMap<&'static str, ShopItem>>,
    /// Levels gained from experience the action awarded.
    #[serde(skip_serializing_if = "is_zero")]
    pub levels_gained: u32,
    /// Names of quests the action completed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quests_completed: Vec<String>,
    /// How the fight went, for fights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatReport>,
}

/// Round-by-round totals of a resolved fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatReport {
    /// Display name of the enemy.
    pub enemy: &'static str,
    /// Whether the player won.
    pub victory: bool,
    /// Rounds fought.
    pub rounds: u32,
    /// Damage the enemy dealt.
    pub damage_taken: u32,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl ActionResponse {
    /// A successful response with no optional fields.
    pub fn applied(message: impl Into<String>, log_entry: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            log_entry: log_entry.into(),
            next_stage: None,
            ending: None,
            shop_items: None,
            levels_gained: 0,
            quests_completed: Vec::new(),
            combat: None,
        }
    }

    /// Attaches level-ups and quest completions earned by the action.
    #[must_use]
    pub fn with_progress(mut self, levels_gained: u32, quests_completed: Vec<String>) -> Self {
        self.levels_gained = levels_gained;
        self.quests_completed = quests_completed;
        self
    }

    /// A rejected action.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::applied(message, "")
        }
    }
}
