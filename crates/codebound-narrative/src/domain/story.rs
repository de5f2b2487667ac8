//! Story state and the `(stage, choice)` transition.

use codebound_character::domain::player::Player;
use codebound_character::domain::progression::apply_experience;
use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::log::EventLog;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::outcome::{Transition, outcome_for};
use super::stage::{Choice, CurrentStage, Ending, Stage};

/// One entry in the story-progress trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryProgress {
    /// Stage the choice was made at.
    pub stage: Stage,
    /// Choice taken.
    pub choice: Choice,
    /// Outcome text shown to the player.
    pub outcome: String,
}

/// Narrative position of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryState {
    /// Current stage, or complete.
    pub current_stage: CurrentStage,
    /// Every choice made so far, oldest first.
    #[serde(default)]
    pub story_progress: Vec<StoryProgress>,
    /// Set once the story reaches an ending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

/// Result of a successful story choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryResolution {
    /// Stage the choice was made at.
    pub stage: Stage,
    /// Choice taken.
    pub choice: Choice,
    /// Outcome text.
    pub message: String,
    /// Line for the event log.
    pub log_entry: String,
    /// Stage the story moved to, if it continues.
    pub next_stage: Option<Stage>,
    /// Ending reached, if the story is over.
    pub ending: Option<Ending>,
    /// Enemy key offered as a follow-on fight.
    pub encounter: Option<&'static str>,
    /// Levels gained from the outcome's experience.
    pub levels_gained: u32,
}

/// Resolves a story choice against the outcome table.
///
/// An unparseable choice key, or any choice once the story is complete, is
/// rejected before anything is mutated. Otherwise every delta of the bound
/// outcome is applied, the trail grows by one entry, the level-up check
/// runs, and the story moves to the next stage or ends.
///
/// # Errors
///
/// Returns `DomainError::Validation("Invalid choice")` when the pair is not
/// in the table.
pub fn resolve_choice(
    story: &mut StoryState,
    player: &mut Player,
    choice_key: &str,
    log: &mut EventLog,
    clock: &dyn Clock,
) -> Result<StoryResolution, DomainError> {
    let stage = story
        .current_stage
        .stage()
        .ok_or_else(|| DomainError::validation("Invalid choice"))?;
    let choice: Choice = choice_key
        .parse()
        .map_err(|_| DomainError::validation("Invalid choice"))?;
    let outcome = outcome_for(stage, choice);

    player.adjust_gold(outcome.gold);
    player.adjust_hp(outcome.hp);
    if let Some(item) = outcome.item {
        player.add_item(item);
    }
    if let Some(location) = outcome.location {
        player.set_location(location);
    }
    for &(skill, amount) in outcome.skills {
        player.improve_skill(skill, amount);
    }
    for &(faction, delta) in outcome.reputation {
        player.adjust_reputation(faction, delta);
    }

    story.story_progress.push(StoryProgress {
        stage,
        choice,
        outcome: outcome.message.to_owned(),
    });

    let levels_gained = apply_experience(player, outcome.exp, log, clock);

    let (next_stage, ending) = match outcome.transition {
        Transition::Next(next) => {
            story.current_stage = CurrentStage::At(next);
            (Some(next), None)
        }
        Transition::Ending(ending) => {
            story.current_stage = CurrentStage::Complete;
            story.ending = Some(ending);
            (None, Some(ending))
        }
    };

    info!(stage = %stage, choice = %choice, next = %story.current_stage, "story choice resolved");

    let log_entry = match ending {
        Some(ending) => format!(
            "[STORY] Stage {stage}: chose {} - ending reached: {} (+{} EXP)",
            choice.key().to_uppercase(),
            ending.title(),
            outcome.exp
        ),
        None => format!(
            "[STORY] Stage {stage}: chose {} (+{} EXP)",
            choice.key().to_uppercase(),
            outcome.exp
        ),
    };

    Ok(StoryResolution {
        stage,
        choice,
        message: outcome.message.to_owned(),
        log_entry,
        next_stage,
        ending,
        encounter: outcome.encounter,
        levels_gained,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebound_character::domain::player::{Faction, Skill};
    use codebound_core::log::LogKind;
    use codebound_test_support::fixed_clock;

    fn fresh() -> (StoryState, Player, EventLog) {
        (StoryState::default(), Player::default(), EventLog::new())
    }

    #[test]
    fn test_choice_applies_every_declared_delta() {
        // Arrange
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();

        // Act
        let resolution = resolve_choice(&mut story, &mut player, "a", &mut log, &clock).unwrap();

        // Assert
        assert_eq!(resolution.stage, Stage::Awakening);
        assert_eq!(resolution.next_stage, Some(Stage::Trials));
        assert_eq!(resolution.ending, None);
        assert_eq!(player.exp(), 20);
        assert_eq!(player.gold(), 60);
        assert_eq!(player.location(), "training_grounds");
        assert_eq!(player.skill(Skill::Manipulation), 2);
        assert_eq!(player.standing(Faction::Codekeepers), 10);
        assert_eq!(story.current_stage, CurrentStage::At(Stage::Trials));
        assert_eq!(story.story_progress.len(), 1);
        assert_eq!(story.story_progress[0].choice, Choice::A);
        assert_eq!(story.story_progress[0].outcome, resolution.message);
    }

    #[test]
    fn test_invalid_choice_key_is_rejected_without_mutation() {
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();
        let before = (story.clone(), player.clone());

        let result = resolve_choice(&mut story, &mut player, "e", &mut log, &clock);

        match result {
            Err(DomainError::Validation(message)) => assert_eq!(message, "Invalid choice"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!((story, player), before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_hp_loss_from_outcome_never_drops_below_one() {
        // Arrange: stage 3 choice d costs 30 hp
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();
        story.current_stage = CurrentStage::At(Stage::Revelation);
        player.adjust_hp(-95);

        // Act
        resolve_choice(&mut story, &mut player, "d", &mut log, &clock).unwrap();

        // Assert
        assert_eq!(player.hp(), 1);
    }

    #[test]
    fn test_encounter_is_reported_for_follow_on_fight() {
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();

        let resolution = resolve_choice(&mut story, &mut player, "d", &mut log, &clock).unwrap();

        assert_eq!(resolution.encounter, Some("spider"));
        assert_eq!(resolution.next_stage, Some(Stage::Revelation));
        assert_eq!(player.inventory(), ["Corrupted Data Fragment".to_owned()]);
    }

    #[test]
    fn test_final_choice_completes_story_and_records_ending() {
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();
        story.current_stage = CurrentStage::At(Stage::FinalChoice);

        let resolution = resolve_choice(&mut story, &mut player, "b", &mut log, &clock).unwrap();

        assert_eq!(resolution.ending, Some(Ending::NewOrder));
        assert_eq!(resolution.next_stage, None);
        assert!(story.current_stage.is_complete());
        assert_eq!(story.ending, Some(Ending::NewOrder));
        assert!(resolution.log_entry.contains("The New Order"));
    }

    #[test]
    fn test_complete_story_rejects_further_choices() {
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();
        story.current_stage = CurrentStage::Complete;

        for key in ["a", "b", "c", "d"] {
            let result = resolve_choice(&mut story, &mut player, key, &mut log, &clock);
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
        assert!(story.story_progress.is_empty());
    }

    #[test]
    fn test_large_award_triggers_level_up_entry() {
        // Arrange: the anomaly ending grants 150 exp
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();
        story.current_stage = CurrentStage::At(Stage::FinalChoice);

        // Act
        let resolution = resolve_choice(&mut story, &mut player, "d", &mut log, &clock).unwrap();

        // Assert
        assert_eq!(resolution.levels_gained, 1);
        assert_eq!(player.level(), 2);
        assert_eq!(player.exp(), 50);
        assert_eq!(log.entries()[0].kind, LogKind::LevelUp);
    }

    #[test]
    fn test_every_pair_is_deterministic_and_never_regresses() {
        let clock = fixed_clock();
        for stage in Stage::ALL {
            for choice in Choice::ALL {
                let run = || {
                    let (mut story, mut player, mut log) = fresh();
                    story.current_stage = CurrentStage::At(stage);
                    let resolution =
                        resolve_choice(&mut story, &mut player, choice.key(), &mut log, &clock)
                            .unwrap();
                    (resolution, story, player)
                };

                let (first, story, player) = run();
                let (second, _, second_player) = run();

                assert_eq!(first, second);
                assert_eq!(player, second_player);
                assert!(player.hp() >= 1 && player.hp() <= player.max_hp());
                match story.current_stage.stage() {
                    Some(next) => assert!(next > stage),
                    None => assert!(story.ending.is_some()),
                }
            }
        }
    }

    #[test]
    fn test_full_playthrough_reaches_an_ending() {
        let clock = fixed_clock();
        let (mut story, mut player, mut log) = fresh();

        for key in ["c", "a", "c", "c"] {
            resolve_choice(&mut story, &mut player, key, &mut log, &clock).unwrap();
        }

        assert!(story.current_stage.is_complete());
        assert_eq!(story.ending, Some(Ending::Balance));
        assert_eq!(story.story_progress.len(), 4);
    }

    #[test]
    fn test_story_state_serializes_flat_fields() {
        let mut story = StoryState::default();
        story.story_progress.push(StoryProgress {
            stage: Stage::Awakening,
            choice: Choice::B,
            outcome: "text".to_owned(),
        });

        let json = serde_json::to_value(&story).unwrap();

        assert_eq!(json["current_stage"], 1);
        assert_eq!(json["story_progress"][0]["stage"], 1);
        assert_eq!(json["story_progress"][0]["choice"], "b");
        assert!(json.get("ending").is_none());
    }
}
