//! Read-only views of game state and saves.

use chrono::{DateTime, Utc};
use codebound_character::domain::player::Player;
use codebound_core::error::DomainError;
use codebound_core::log::{DISPLAY_LIMIT, LogEntry};
use codebound_core::repository::StoredSave;
use codebound_narrative::domain::stage::{Choice, CurrentStage, Ending, Stage};
use codebound_narrative::domain::story::StoryProgress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::game_state::GameState;

/// What the state query returns: the game with only the tail of the log.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateView<'a> {
    /// The player character.
    pub player: &'a Player,
    /// The last [`DISPLAY_LIMIT`] log entries, oldest first.
    pub game_log: &'a [LogEntry],
    /// Hint list of what the player can do next.
    pub available_actions: &'a [String],
    /// Current stage, or `"complete"`.
    pub current_stage: CurrentStage,
    /// Every choice made so far.
    pub story_progress: &'a [StoryProgress],
    /// The ending, once reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
    /// Text and choices for the current stage; absent once complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageView>,
}

/// Scene text and choice buttons for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    /// Stage title.
    pub title: &'static str,
    /// Scene-setting text.
    pub description: &'static str,
    /// Choice key to button label, in key order.
    pub choices: Vec<ChoiceView>,
}

/// One choice button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Key to send as the `story_choice` target.
    pub key: &'static str,
    /// Button label.
    pub label: &'static str,
}

impl StageView {
    fn of(stage: Stage) -> Self {
        Self {
            title: stage.title(),
            description: stage.description(),
            choices: Choice::ALL
                .into_iter()
                .map(|choice| ChoiceView {
                    key: choice.key(),
                    label: stage.choice_label(choice),
                })
                .collect(),
        }
    }
}

impl<'a> GameStateView<'a> {
    /// Builds the view of `state`.
    #[must_use]
    pub fn of(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            game_log: state.game_log.recent(DISPLAY_LIMIT),
            available_actions: &state.available_actions,
            current_stage: state.story.current_stage,
            story_progress: &state.story.story_progress,
            ending: state.story.ending,
            stage: state.story.current_stage.stage().map(StageView::of),
        }
    }
}

/// One row of the save listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveSummary {
    /// Record id.
    pub save_id: Uuid,
    /// Player-supplied name.
    pub save_name: String,
    /// Creation time.
    pub save_date: DateTime<Utc>,
    /// Player level at save time.
    pub player_level: u32,
    /// Story position at save time.
    pub current_stage: CurrentStage,
    /// Owner.
    pub user_id: String,
}

/// The payload fields a summary needs. Parsed on its own so a listing does
/// not have to decode every full snapshot.
#[derive(Deserialize)]
struct SummaryFields {
    player: PlayerLevel,
    current_stage: CurrentStage,
}

#[derive(Deserialize)]
struct PlayerLevel {
    level: u32,
}

impl SaveSummary {
    /// Summarizes a stored record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload lacks a player
    /// level or a valid stage.
    pub fn from_stored(stored: &StoredSave) -> Result<Self, DomainError> {
        let fields = SummaryFields::deserialize(&stored.payload)?;
        Ok(Self {
            save_id: stored.save_id,
            save_name: stored.save_name.clone(),
            save_date: stored.save_date,
            player_level: fields.player.level,
            current_stage: fields.current_stage,
            user_id: stored.user_id.clone(),
        })
    }
}
