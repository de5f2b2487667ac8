//! The player character sheet.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::quest::Quest;

/// Hub location a fresh player starts in.
pub const STARTING_LOCATION: &str = "nexis";

/// Trainable skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Reading hidden structure in the code of the world.
    Decryption,
    /// Bending running code to the player's will.
    Manipulation,
    /// Repairing and rebuilding broken code.
    Reconstruction,
}

impl Skill {
    /// Every skill, in display order.
    pub const ALL: [Self; 3] = [Self::Decryption, Self::Manipulation, Self::Reconstruction];
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decryption => "decryption",
            Self::Manipulation => "manipulation",
            Self::Reconstruction => "reconstruction",
        };
        f.write_str(name)
    }
}

/// Factions tracking the player's standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Guardians of the Grand Code.
    Codekeepers,
    /// Recruits who question the system.
    Resistance,
    /// Those who refuse to pick a side.
    Neutral,
}

impl Faction {
    /// Every faction, in display order.
    pub const ALL: [Self; 3] = [Self::Codekeepers, Self::Resistance, Self::Neutral];
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Codekeepers => "codekeepers",
            Self::Resistance => "resistance",
            Self::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// The player character.
///
/// Fields are crate-private so the invariants hold everywhere:
/// `1 <= hp <= max_hp`, gold never negative, inventory only grows, and
/// level only changes through [`super::progression::apply_experience`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) level: u32,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) exp: u32,
    pub(crate) exp_to_next: u32,
    pub(crate) gold: u32,
    pub(crate) inventory: Vec<String>,
    pub(crate) location: String,
    pub(crate) quests: Vec<Quest>,
    pub(crate) skills: BTreeMap<Skill, u32>,
    pub(crate) reputation: BTreeMap<Faction, i32>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Anomaly")
    }
}

impl Player {
    /// Creates a level-1 player with starting stats.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hp: 100,
            max_hp: 100,
            exp: 0,
            exp_to_next: 100,
            gold: 50,
            inventory: Vec::new(),
            location: STARTING_LOCATION.to_owned(),
            quests: Vec::new(),
            skills: Skill::ALL.into_iter().map(|skill| (skill, 1)).collect(),
            reputation: Faction::ALL.into_iter().map(|faction| (faction, 0)).collect(),
        }
    }

    /// Checks the sheet invariants on a player built outside this crate's
    /// mutators, such as one decoded from a save.
    ///
    /// # Errors
    ///
    /// Returns a description of the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.level == 0 {
            return Err("level must be at least 1".to_owned());
        }
        if self.hp == 0 || self.hp > self.max_hp {
            return Err(format!("hp {} outside 1..={}", self.hp, self.max_hp));
        }
        if self.exp_to_next == 0 {
            return Err("exp_to_next must be at least 1".to_owned());
        }
        if self.exp >= self.exp_to_next {
            return Err(format!(
                "exp {} not below threshold {}",
                self.exp, self.exp_to_next
            ));
        }
        Ok(())
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current hit points.
    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Experience accumulated toward the next level.
    #[must_use]
    pub fn exp(&self) -> u32 {
        self.exp
    }

    /// Experience required for the next level.
    #[must_use]
    pub fn exp_to_next(&self) -> u32 {
        self.exp_to_next
    }

    /// Currency balance.
    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Items collected, in the order they were found.
    #[must_use]
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Current location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Accepted quests, including completed ones.
    #[must_use]
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Skill levels.
    #[must_use]
    pub fn skills(&self) -> &BTreeMap<Skill, u32> {
        &self.skills
    }

    /// Level of one skill.
    #[must_use]
    pub fn skill(&self, skill: Skill) -> u32 {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    /// Faction standings.
    #[must_use]
    pub fn reputation(&self) -> &BTreeMap<Faction, i32> {
        &self.reputation
    }

    /// Standing with one faction.
    #[must_use]
    pub fn standing(&self, faction: Faction) -> i32 {
        self.reputation.get(&faction).copied().unwrap_or_default()
    }

    /// Applies a signed hp change. Losses floor at 1, gains cap at `max_hp`.
    pub fn adjust_hp(&mut self, delta: i32) {
        let target = i64::from(self.hp) + i64::from(delta);
        self.set_hp(target);
    }

    /// Sets hp from a possibly out-of-range value, clamping to `1..=max_hp`.
    pub fn set_hp(&mut self, value: i64) {
        let clamped = value.clamp(1, i64::from(self.max_hp));
        self.hp = u32::try_from(clamped).unwrap_or(self.max_hp);
    }

    /// Restores hp to `max_hp`.
    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Adds currency.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Removes up to `amount` currency, stopping at zero. Returns the
    /// amount actually removed.
    pub fn lose_gold(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.gold);
        self.gold -= lost;
        lost
    }

    /// Spends exactly `amount` if the balance covers it. Returns `false`
    /// and leaves the balance untouched otherwise.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Applies a signed currency change with a floor of zero.
    pub fn adjust_gold(&mut self, delta: i32) {
        if delta >= 0 {
            self.add_gold(delta.unsigned_abs());
        } else {
            self.lose_gold(delta.unsigned_abs());
        }
    }

    /// Appends an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Moves the player.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Raises a skill level.
    pub fn improve_skill(&mut self, skill: Skill, amount: u32) {
        let level = self.skills.entry(skill).or_insert(0);
        *level = level.saturating_add(amount);
    }

    /// Applies a signed reputation change.
    pub fn adjust_reputation(&mut self, faction: Faction, delta: i32) {
        let standing = self.reputation.entry(faction).or_insert(0);
        *standing = standing.saturating_add(delta);
    }
}
