//! Turn-based combat against the enemy table.

use codebound_character::domain::player::Player;
use codebound_character::domain::progression::apply_experience;
use codebound_character::domain::quest::{Milestone, record_milestone};
use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::log::EventLog;
use codebound_core::rng::DeterministicRng;
use tracing::info;

use super::enemies::{Enemy, find_enemy};

/// Inclusive range of damage the player deals per round.
pub const PLAYER_DAMAGE_RANGE: (u32, u32) = (15, 25);

/// Spread around an enemy's base damage for retaliation rolls.
pub const RETALIATION_SPREAD: u32 = 5;

/// Currency lost when the player is defeated.
pub const DEFEAT_GOLD_PENALTY: u32 = 10;

/// How a fight ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FightResult {
    /// The enemy was defeated and its reward paid.
    Victory {
        /// Experience granted.
        exp: u32,
        /// Currency granted.
        gold: u32,
        /// Levels gained from the award.
        levels_gained: u32,
        /// Quests completed by this kill.
        quests_completed: Vec<String>,
    },
    /// The player fell; hp is left at 1 and a currency penalty applied.
    Defeat {
        /// Currency actually lost.
        gold_lost: u32,
    },
}

/// Result of a resolved fight. Defeat is a successful resolution too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightResolution {
    /// The enemy fought.
    pub enemy: &'static Enemy,
    /// Rounds simulated.
    pub rounds: u32,
    /// Total damage the enemy dealt.
    pub damage_taken: u32,
    /// Message for the player.
    pub message: String,
    /// Line for the event log.
    pub log_entry: String,
    /// Victory or defeat.
    pub result: FightResult,
}

/// Fights an enemy to the end.
///
/// Each round the player hits for a roll in [`PLAYER_DAMAGE_RANGE`]; if the
/// enemy survives it retaliates for `damage ± RETALIATION_SPREAD`. The loop
/// stops as soon as either side reaches zero hp.
///
/// # Errors
///
/// Returns `DomainError::Validation("Unknown enemy")` for an unknown enemy
/// key, before any randomness is consumed.
pub fn fight(
    player: &mut Player,
    enemy_key: &str,
    rng: &mut dyn DeterministicRng,
    log: &mut EventLog,
    clock: &dyn Clock,
) -> Result<FightResolution, DomainError> {
    let enemy = find_enemy(enemy_key).ok_or_else(|| DomainError::validation("Unknown enemy"))?;

    let mut enemy_hp = i64::from(enemy.hp);
    let mut player_hp = i64::from(player.hp());
    let mut rounds = 0;
    let mut damage_taken = 0;

    while enemy_hp > 0 && player_hp > 0 {
        rounds += 1;
        enemy_hp -= i64::from(rng.next_u32_range(PLAYER_DAMAGE_RANGE.0, PLAYER_DAMAGE_RANGE.1));

        if enemy_hp > 0 {
            let retaliation = rng.next_u32_range(
                enemy.damage.saturating_sub(RETALIATION_SPREAD),
                enemy.damage + RETALIATION_SPREAD,
            );
            player_hp -= i64::from(retaliation);
            damage_taken += retaliation;
        }
    }

    if player_hp <= 0 {
        player.set_hp(1);
        let gold_lost = player.lose_gold(DEFEAT_GOLD_PENALTY);
        info!(enemy = enemy.key, rounds, gold_lost, "player defeated");
        return Ok(FightResolution {
            enemy,
            rounds,
            damage_taken,
            message: "You were defeated! Lost some gold and barely escaped.".to_owned(),
            log_entry: format!("[COMBAT] Defeated by {}", enemy.name),
            result: FightResult::Defeat { gold_lost },
        });
    }

    player.set_hp(player_hp);
    player.add_gold(enemy.gold);
    let levels_gained = apply_experience(player, enemy.exp, log, clock);
    let quests_completed =
        record_milestone(player, Milestone::EnemyDefeated(enemy.key), log, clock);

    info!(enemy = enemy.key, rounds, damage_taken, "enemy defeated");

    Ok(FightResolution {
        enemy,
        rounds,
        damage_taken,
        message: format!(
            "Victory! Gained {} EXP and {} gold!",
            enemy.exp, enemy.gold
        ),
        log_entry: format!(
            "[COMBAT] Defeated {} (+{} EXP, +{} gold)",
            enemy.name, enemy.exp, enemy.gold
        ),
        result: FightResult::Victory {
            exp: enemy.exp,
            gold: enemy.gold,
            levels_gained,
            quests_completed,
        },
    })
}
