//! Quest catalog, acceptance, and progress tracking.

use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::log::{EventLog, LogKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::player::Player;
use super::progression::apply_experience;

/// Reward paid when a quest reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    /// Experience granted.
    pub exp: u32,
    /// Currency granted.
    pub gold: u32,
}

/// What advances a quest's progress counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Defeat an enemy with the given key.
    DefeatEnemy {
        /// Enemy key, e.g. `goblin`.
        enemy: String,
    },
    /// Find loot while exploring.
    FindTreasure,
}

/// Something that happened in play that may advance quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone<'a> {
    /// An enemy with this key was defeated.
    EnemyDefeated(&'a str),
    /// Loot was found while exploring.
    TreasureFound,
}

impl Objective {
    fn matches(&self, milestone: Milestone<'_>) -> bool {
        match (self, milestone) {
            (Self::DefeatEnemy { enemy }, Milestone::EnemyDefeated(key)) => enemy == key,
            (Self::FindTreasure, Milestone::TreasureFound) => true,
            _ => false,
        }
    }
}

/// A quest on the player's sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Catalog key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Reward bundle.
    pub reward: QuestReward,
    /// Progress needed to complete.
    pub target: u32,
    /// Progress so far.
    pub progress: u32,
    /// What advances progress.
    pub objective: Objective,
    /// Whether the reward has been paid.
    #[serde(default)]
    pub completed: bool,
}

/// Looks up a quest in the fixed catalog, returning a fresh copy with zero
/// progress.
#[must_use]
pub fn catalog_quest(quest_id: &str) -> Option<Quest> {
    let quest = match quest_id {
        "goblin_hunt" => Quest {
            id: quest_id.to_owned(),
            name: "Goblin Hunt".to_owned(),
            description: "Defeat 3 goblins".to_owned(),
            reward: QuestReward { exp: 50, gold: 30 },
            target: 3,
            progress: 0,
            objective: Objective::DefeatEnemy {
                enemy: "goblin".to_owned(),
            },
            completed: false,
        },
        "treasure_hunt" => Quest {
            id: quest_id.to_owned(),
            name: "Treasure Hunt".to_owned(),
            description: "Find 5 treasures".to_owned(),
            reward: QuestReward { exp: 75, gold: 50 },
            target: 5,
            progress: 0,
            objective: Objective::FindTreasure,
            completed: false,
        },
        _ => return None,
    };
    Some(quest)
}

/// Keys of every quest in the catalog.
pub const QUEST_IDS: [&str; 2] = ["goblin_hunt", "treasure_hunt"];

/// Adds a catalog quest to the player's active quests.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the quest id is unknown or the same
/// quest is already active and incomplete. Nothing is mutated on error.
pub fn accept_quest(player: &mut Player, quest_id: &str) -> Result<Quest, DomainError> {
    let quest = catalog_quest(quest_id).ok_or_else(|| DomainError::validation("Unknown quest"))?;

    if player
        .quests
        .iter()
        .any(|active| active.id == quest.id && !active.completed)
    {
        return Err(DomainError::validation(format!(
            "Quest already active: {}",
            quest.name
        )));
    }

    player.quests.push(quest.clone());
    Ok(quest)
}

/// Advances every incomplete quest whose objective matches `milestone`.
///
/// Quests reaching their target are marked complete, logged, and paid out
/// through the progression manager. Returns the names of quests completed
/// by this call.
pub fn record_milestone(
    player: &mut Player,
    milestone: Milestone<'_>,
    log: &mut EventLog,
    clock: &dyn Clock,
) -> Vec<String> {
    let mut payouts = Vec::new();
    for quest in player
        .quests
        .iter_mut()
        .filter(|quest| !quest.completed && quest.objective.matches(milestone))
    {
        quest.progress += 1;
        if quest.progress >= quest.target {
            quest.completed = true;
            payouts.push((quest.name.clone(), quest.reward));
        }
    }

    let mut completed = Vec::with_capacity(payouts.len());
    for (name, reward) in payouts {
        log.record(
            clock,
            LogKind::Quest,
            format!(
                "Quest complete: {name} (+{} EXP, +{} gold)",
                reward.exp, reward.gold
            ),
        );
        info!(quest = %name, "quest completed");
        player.add_gold(reward.gold);
        apply_experience(player, reward.exp, log, clock);
        completed.push(name);
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebound_test_support::fixed_clock;

    #[test]
    fn test_accept_known_quest_adds_it_with_zero_progress() {
        let mut player = Player::default();

        let quest = accept_quest(&mut player, "goblin_hunt").unwrap();

        assert_eq!(quest.name, "Goblin Hunt");
        assert_eq!(player.quests().len(), 1);
        assert_eq!(player.quests()[0].progress, 0);
        assert_eq!(player.quests()[0].target, 3);
    }

    #[test]
    fn test_accept_unknown_quest_is_rejected_without_mutation() {
        let mut player = Player::default();

        let result = accept_quest(&mut player, "dragon_hunt");

        match result {
            Err(DomainError::Validation(message)) => assert_eq!(message, "Unknown quest"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(player.quests().is_empty());
    }

    #[test]
    fn test_accept_active_quest_twice_is_rejected() {
        let mut player = Player::default();
        accept_quest(&mut player, "treasure_hunt").unwrap();

        let result = accept_quest(&mut player, "treasure_hunt");

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(player.quests().len(), 1);
    }

    #[test]
    fn test_every_catalog_id_resolves() {
        for id in QUEST_IDS {
            assert_eq!(catalog_quest(id).unwrap().id, id);
        }
    }

    #[test]
    fn test_milestone_only_advances_matching_quests() {
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();
        accept_quest(&mut player, "goblin_hunt").unwrap();
        accept_quest(&mut player, "treasure_hunt").unwrap();

        record_milestone(&mut player, Milestone::EnemyDefeated("wolf"), &mut log, &clock);
        record_milestone(&mut player, Milestone::EnemyDefeated("goblin"), &mut log, &clock);

        assert_eq!(player.quests()[0].progress, 1);
        assert_eq!(player.quests()[1].progress, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_quest_completion_pays_reward_once() {
        // Arrange
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();
        accept_quest(&mut player, "goblin_hunt").unwrap();

        // Act
        let mut completed = Vec::new();
        for _ in 0..4 {
            completed.extend(record_milestone(
                &mut player,
                Milestone::EnemyDefeated("goblin"),
                &mut log,
                &clock,
            ));
        }

        // Assert
        assert_eq!(completed, vec!["Goblin Hunt".to_owned()]);
        assert!(player.quests()[0].completed);
        assert_eq!(player.quests()[0].progress, 3);
        assert_eq!(player.gold(), 80);
        assert_eq!(player.exp(), 50);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].kind, LogKind::Quest);
    }

    #[test]
    fn test_completed_quest_can_be_accepted_again() {
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();
        accept_quest(&mut player, "goblin_hunt").unwrap();
        for _ in 0..3 {
            record_milestone(&mut player, Milestone::EnemyDefeated("goblin"), &mut log, &clock);
        }

        let again = accept_quest(&mut player, "goblin_hunt");

        assert!(again.is_ok());
        assert_eq!(player.quests().len(), 2);
    }
}
