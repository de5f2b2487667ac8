//! Exploration: a random encounter or a loot find.

use codebound_character::domain::player::Player;
use codebound_character::domain::progression::apply_experience;
use codebound_character::domain::quest::{Milestone, record_milestone};
use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::log::EventLog;
use codebound_core::rng::{DeterministicRng, choose};
use tracing::info;

use super::areas::find_area;
use super::enemies::enemy_key;

/// Probability that exploring produces an enemy encounter.
pub const ENCOUNTER_CHANCE: f64 = 0.7;

/// Inclusive range of currency found alongside loot.
pub const LOOT_GOLD_RANGE: (u32, u32) = (5, 15);

/// What exploring turned up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// An enemy blocks the way. Nothing is mutated; the enemy can be fought
    /// as a follow-on action.
    Encounter {
        /// Key to pass to the fight resolver.
        enemy_key: String,
        /// Display name.
        enemy_name: &'static str,
    },
    /// Loot was found and granted.
    Loot {
        /// Item appended to the inventory.
        item: &'static str,
        /// Experience awarded.
        exp: u32,
        /// Currency awarded.
        gold: u32,
        /// Levels gained from the award.
        levels_gained: u32,
        /// Quests completed by this find.
        quests_completed: Vec<String>,
    },
}

/// Result of a successful exploration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreResolution {
    /// Message for the player.
    pub message: String,
    /// Line for the event log.
    pub log_entry: String,
    /// What was found.
    pub discovery: Discovery,
}

/// Explores an area.
///
/// Random draws happen in a fixed order: enemy index, loot index, then the
/// encounter roll. A roll below [`ENCOUNTER_CHANCE`] yields an encounter;
/// otherwise the loot branch draws its currency from [`LOOT_GOLD_RANGE`],
/// grants item, experience, and currency, and runs the level-up check.
///
/// # Errors
///
/// Returns `DomainError::Validation("Unknown area")` for an unknown area
/// key, before any randomness is consumed.
pub fn explore(
    player: &mut Player,
    area_key: &str,
    rng: &mut dyn DeterministicRng,
    log: &mut EventLog,
    clock: &dyn Clock,
) -> Result<ExploreResolution, DomainError> {
    let area = find_area(area_key).ok_or_else(|| DomainError::validation("Unknown area"))?;

    let enemy = choose(rng, area.enemies)
        .copied()
        .ok_or_else(|| DomainError::validation("Area has no enemies"))?;
    let item = choose(rng, area.loot)
        .copied()
        .ok_or_else(|| DomainError::validation("Area has no loot"))?;

    if rng.next_f64() < ENCOUNTER_CHANCE {
        info!(area = area.key, enemy, "exploration produced an encounter");
        return Ok(ExploreResolution {
            message: format!("You encounter a {enemy}!"),
            log_entry: format!("[EXPLORE] Found {enemy} in {}", area.name),
            discovery: Discovery::Encounter {
                enemy_key: enemy_key(enemy),
                enemy_name: enemy,
            },
        });
    }

    let gold = rng.next_u32_range(LOOT_GOLD_RANGE.0, LOOT_GOLD_RANGE.1);
    player.add_item(item);
    player.add_gold(gold);
    let levels_gained = apply_experience(player, area.exp, log, clock);
    let quests_completed = record_milestone(player, Milestone::TreasureFound, log, clock);

    info!(area = area.key, item, gold, "exploration found loot");

    Ok(ExploreResolution {
        message: format!("You found {item} and gained {} EXP!", area.exp),
        log_entry: format!("[EXPLORE] Found {item} in {} (+{} EXP)", area.name, area.exp),
        discovery: Discovery::Loot {
            item,
            exp: area.exp,
            gold,
            levels_gained,
            quests_completed,
        },
    })
}
