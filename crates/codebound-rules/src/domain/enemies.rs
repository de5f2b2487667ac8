//! The fixed enemy table.

/// Stats for one enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    /// Lookup key, e.g. `dark_knight`.
    pub key: &'static str,
    /// Display name, e.g. `Dark Knight`.
    pub name: &'static str,
    /// Starting hit points.
    pub hp: u32,
    /// Base damage; retaliation rolls `damage - 5 ..= damage + 5`.
    pub damage: u32,
    /// Experience granted on defeat.
    pub exp: u32,
    /// Currency granted on defeat.
    pub gold: u32,
}

const fn enemy(
    key: &'static str,
    name: &'static str,
    hp: u32,
    damage: u32,
    exp: u32,
    gold: u32,
) -> Enemy {
    Enemy {
        key,
        name,
        hp,
        damage,
        exp,
        gold,
    }
}

/// Every enemy the player can fight.
pub static ENEMIES: [Enemy; 9] = [
    enemy("goblin", "Goblin", 30, 10, 15, 10),
    enemy("wolf", "Wolf", 40, 15, 20, 15),
    enemy("bandit", "Bandit", 50, 20, 25, 20),
    enemy("troll", "Troll", 80, 25, 40, 30),
    enemy("bat", "Bat", 25, 8, 12, 8),
    enemy("spider", "Spider", 35, 12, 18, 12),
    enemy("skeleton", "Skeleton", 60, 22, 35, 25),
    enemy("zombie", "Zombie", 70, 18, 30, 20),
    enemy("dark_knight", "Dark Knight", 100, 30, 50, 40),
];

/// Looks an enemy up by key.
#[must_use]
pub fn find_enemy(key: &str) -> Option<&'static Enemy> {
    ENEMIES.iter().find(|enemy| enemy.key == key)
}

/// Converts a display name into its lookup key (`Dark Knight` → `dark_knight`).
#[must_use]
pub fn enemy_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
