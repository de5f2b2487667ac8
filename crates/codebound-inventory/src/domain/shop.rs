//! The fixed shop catalog.

use std::collections::BTreeMap;

use serde::Serialize;

/// An item offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    /// Display name.
    pub name: &'static str,
    /// Price in gold.
    pub cost: u32,
    /// Effect description.
    pub effect: &'static str,
}

/// Every item for sale, keyed by catalog id.
pub static CATALOG: [(&str, ShopItem); 3] = [
    (
        "health_potion",
        ShopItem {
            name: "Health Potion",
            cost: 20,
            effect: "Restore 50 HP",
        },
    ),
    (
        "sword",
        ShopItem {
            name: "Iron Sword",
            cost: 100,
            effect: "Increase damage",
        },
    ),
    (
        "armor",
        ShopItem {
            name: "Leather Armor",
            cost: 80,
            effect: "Increase defense",
        },
    ),
];

/// Result of visiting the shop. Visiting never mutates the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopVisit {
    /// Message for the player.
    pub message: String,
    /// Line for the event log.
    pub log_entry: String,
    /// The catalog, keyed by item id.
    pub items: BTreeMap<&'static str, ShopItem>,
}

/// Opens the shop.
#[must_use]
pub fn visit_shop() -> ShopVisit {
    ShopVisit {
        message: "Welcome to the shop!".to_owned(),
        log_entry: "[SHOP] Visited the shop".to_owned(),
        items: CATALOG.iter().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_lists_full_catalog() {
        let visit = visit_shop();

        assert_eq!(visit.items.len(), 3);
        assert_eq!(visit.items["health_potion"].cost, 20);
        assert_eq!(visit.items["sword"].cost, 100);
        assert_eq!(visit.items["armor"].cost, 80);
        assert_eq!(visit.log_entry, "[SHOP] Visited the shop");
    }

    #[test]
    fn test_catalog_serializes_as_keyed_object() {
        let json = serde_json::to_value(visit_shop().items).unwrap();

        assert_eq!(json["sword"]["name"], "Iron Sword");
        assert_eq!(json["armor"]["effect"], "Increase defense");
    }
}
