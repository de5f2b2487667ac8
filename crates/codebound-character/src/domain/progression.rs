//! Experience accrual and level-up application.
//!
//! This is the only place a player's level changes. Every resolver that
//! awards experience goes through [`apply_experience`].

use codebound_core::clock::Clock;
use codebound_core::log::{EventLog, LogKind};
use tracing::debug;

use super::player::Player;

/// Maximum hp gained per level.
pub const HP_PER_LEVEL: u32 = 20;

/// Threshold for the level after one whose threshold was `current`.
///
/// Growth is multiplicative: `floor(current * 1.5)`, never below 1. The
/// result never decreases, so thresholds are monotonic across level-ups.
#[must_use]
pub fn next_threshold(current: u32) -> u32 {
    u32::try_from(u64::from(current) * 3 / 2)
        .unwrap_or(u32::MAX)
        .max(1)
}

/// Adds `delta` experience and applies every level-up it pays for.
///
/// Each crossed threshold subtracts the threshold (the remainder carries
/// over), raises the level by one, grows the threshold with
/// [`next_threshold`], adds [`HP_PER_LEVEL`] to `max_hp`, fully heals, and
/// appends one `level_up` log entry. Returns the number of levels gained.
pub fn apply_experience(
    player: &mut Player,
    delta: u32,
    log: &mut EventLog,
    clock: &dyn Clock,
) -> u32 {
    player.exp = player.exp.saturating_add(delta);

    player.exp_to_next = player.exp_to_next.max(1);

    let mut levels_gained = 0;
    while player.exp >= player.exp_to_next {
        player.exp -= player.exp_to_next;
        player.level += 1;
        player.exp_to_next = next_threshold(player.exp_to_next);
        player.max_hp = player.max_hp.saturating_add(HP_PER_LEVEL);
        player.heal_full();
        levels_gained += 1;

        log.record(
            clock,
            LogKind::LevelUp,
            format!("LEVEL UP! You are now level {}!", player.level),
        );
        debug!(level = player.level, exp_to_next = player.exp_to_next, "player levelled up");
    }

    levels_gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebound_test_support::fixed_clock;

    #[test]
    fn test_threshold_growth_is_floor_of_one_and_a_half() {
        assert_eq!(next_threshold(100), 150);
        assert_eq!(next_threshold(150), 225);
        assert_eq!(next_threshold(225), 337);
        assert_eq!(next_threshold(u32::MAX), u32::MAX);
        assert_eq!(next_threshold(0), 1);
        assert_eq!(next_threshold(1), 1);
    }

    #[test]
    fn test_zero_threshold_still_terminates() {
        // Arrange
        let clock = fixed_clock();
        let mut player = Player::default();
        player.exp_to_next = 0;
        let mut log = EventLog::new();

        // Act
        let gained = apply_experience(&mut player, 5, &mut log, &clock);

        // Assert
        assert_eq!(gained, 5);
        assert_eq!(player.exp(), 0);
        assert_eq!(player.exp_to_next(), 1);
    }

    #[test]
    fn test_award_below_threshold_does_not_level() {
        // Arrange
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();

        // Act
        let gained = apply_experience(&mut player, 99, &mut log, &clock);

        // Assert
        assert_eq!(gained, 0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.exp(), 99);
        assert!(log.is_empty());
    }

    #[test]
    fn test_single_level_up_carries_remainder_and_heals() {
        // Arrange
        let clock = fixed_clock();
        let mut player = Player::default();
        player.adjust_hp(-70);
        let mut log = EventLog::new();

        // Act
        let gained = apply_experience(&mut player, 130, &mut log, &clock);

        // Assert
        assert_eq!(gained, 1);
        assert_eq!(player.level(), 2);
        assert_eq!(player.exp(), 30);
        assert_eq!(player.exp_to_next(), 150);
        assert_eq!(player.max_hp(), 120);
        assert_eq!(player.hp(), 120);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].message, "LEVEL UP! You are now level 2!");
        assert_eq!(log.entries()[0].kind, LogKind::LevelUp);
    }

    #[test]
    fn test_large_award_crosses_several_thresholds() {
        // Arrange: thresholds 100 + 150 + 225 = 475
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();

        // Act
        let gained = apply_experience(&mut player, 500, &mut log, &clock);

        // Assert
        assert_eq!(gained, 3);
        assert_eq!(player.level(), 4);
        assert_eq!(player.exp(), 500 - 475);
        assert_eq!(player.exp_to_next(), 337);
        assert_eq!(player.max_hp(), 160);
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[2].message, "LEVEL UP! You are now level 4!");
    }

    #[test]
    fn test_exact_threshold_levels_with_zero_remainder() {
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();

        apply_experience(&mut player, 100, &mut log, &clock);

        assert_eq!(player.level(), 2);
        assert_eq!(player.exp(), 0);
    }

    #[test]
    fn test_thresholds_never_decrease_over_many_awards() {
        let clock = fixed_clock();
        let mut player = Player::default();
        let mut log = EventLog::new();
        let mut previous = player.exp_to_next();

        for award in [40, 250, 7, 1_000, 3_333, 12, 90_000] {
            let before_exp = player.exp();
            let before_levels = player.level();
            let gained = apply_experience(&mut player, award, &mut log, &clock);

            assert!(player.exp_to_next() >= previous);
            assert!(player.exp() < player.exp_to_next());
            assert_eq!(player.level(), before_levels + gained);
            assert!(gained > 0 || player.exp() == before_exp + award);
            previous = player.exp_to_next();
        }
        assert_eq!(u32::try_from(log.len()).unwrap(), player.level() - 1);
    }
}
