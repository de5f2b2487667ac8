//! Resting at the hub.

use codebound_character::domain::player::Player;
use codebound_core::error::DomainError;
use tracing::debug;

/// Currency charged for a rest.
pub const REST_COST: u32 = 10;

/// Result of a successful rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResolution {
    /// Message for the player.
    pub message: String,
    /// Line for the event log.
    pub log_entry: String,
    /// Hit points recovered.
    pub hp_restored: u32,
}

/// Pays [`REST_COST`] and restores hit points to the maximum.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the player cannot afford the rest.
/// Nothing is mutated in that case.
pub fn rest(player: &mut Player) -> Result<RestResolution, DomainError> {
    if !player.spend_gold(REST_COST) {
        return Err(DomainError::validation("Not enough gold to rest!"));
    }

    let hp_restored = player.max_hp() - player.hp();
    player.heal_full();
    debug!(hp_restored, "player rested");

    Ok(RestResolution {
        message: format!("You rested and recovered all HP! Cost: {REST_COST} gold"),
        log_entry: format!("[REST] Recovered HP (-{REST_COST} gold)"),
        hp_restored,
    })
}
