//! The fixed exploration areas.

/// An explorable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    /// Lookup key, e.g. `forest`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display names of enemies that can be encountered.
    pub enemies: &'static [&'static str],
    /// Items that can be found.
    pub loot: &'static [&'static str],
    /// Experience granted when loot is found.
    pub exp: u32,
}

/// Every area the player can explore.
pub static AREAS: [Area; 3] = [
    Area {
        key: "forest",
        name: "Dark Forest",
        enemies: &["Goblin", "Wolf", "Bandit"],
        loot: &["Herb", "Gold Coin", "Rusty Sword"],
        exp: 10,
    },
    Area {
        key: "cave",
        name: "Ancient Cave",
        enemies: &["Troll", "Bat", "Spider"],
        loot: &["Gem", "Ancient Scroll", "Magic Ring"],
        exp: 20,
    },
    Area {
        key: "dungeon",
        name: "Abandoned Dungeon",
        enemies: &["Skeleton", "Zombie", "Dark Knight"],
        loot: &["Rare Weapon", "Potion", "Treasure"],
        exp: 30,
    },
];

/// Looks an area up by key.
#[must_use]
pub fn find_area(key: &str) -> Option<&'static Area> {
    AREAS.iter().find(|area| area.key == key)
}
