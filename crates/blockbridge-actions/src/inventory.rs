//! Inventory lookups shared by the handlers.
//!
//! Name resolution follows one fixed policy so results are deterministic:
//! an item matches a query when its canonical name contains the query
//! (case-sensitive) or its display name contains the query ignoring case.
//! Items are tried in the session's enumeration order and the first match
//! wins.

use blockbridge_types::ItemStack;
use blockbridge_world::WorldSession;

/// Whether `item` matches `query` under the name-resolution policy.
pub fn matches_query(item: &ItemStack, query: &str) -> bool {
    item.name.contains(query)
        || item
            .display_name
            .to_lowercase()
            .contains(&query.to_lowercase())
}

/// The first item in `items` matching `query`.
pub fn find_item<'a>(items: &'a [ItemStack], query: &str) -> Option<&'a ItemStack> {
    items.iter().find(|item| matches_query(item, query))
}

/// Resolve `query` against the session's current inventory.
pub fn resolve<S: WorldSession>(session: &S, query: &str) -> Option<ItemStack> {
    let items = session.inventory();
    find_item(&items, query).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str, display_name: &str, slot: u32) -> ItemStack {
        ItemStack {
            name: String::from(name),
            display_name: String::from(display_name),
            count: 1,
            slot,
        }
    }

    fn sample_inventory() -> Vec<ItemStack> {
        vec![
            stack("oak_planks", "Oak Planks", 9),
            stack("cooked_beef", "Steak", 10),
            stack("torch", "Torch", 11),
            stack("redstone_torch", "Redstone Torch", 12),
        ]
    }

    #[test]
    fn canonical_name_substring_matches() {
        let items = sample_inventory();
        let found = find_item(&items, "planks");
        assert_eq!(found.map(|i| i.slot), Some(9));
    }

    #[test]
    fn canonical_name_match_is_case_sensitive() {
        let item = stack("cooked_beef", "Cooked Beef", 1);
        assert!(matches_query(&item, "beef"));
        // Still matches, but only through the display name.
        assert!(matches_query(&item, "BEEF"));

        let renamed = stack("cooked_beef", "Steak", 1);
        assert!(!matches_query(&renamed, "BEEF"));
    }

    #[test]
    fn display_name_match_ignores_case() {
        let items = sample_inventory();
        let found = find_item(&items, "STEAK");
        assert_eq!(found.map(|i| i.name.as_str()), Some("cooked_beef"));
    }

    #[test]
    fn first_match_wins_in_enumeration_order() {
        let items = sample_inventory();
        let found = find_item(&items, "torch");
        assert_eq!(found.map(|i| i.slot), Some(11));

        let reversed: Vec<ItemStack> = items.into_iter().rev().collect();
        let found = find_item(&reversed, "torch");
        assert_eq!(found.map(|i| i.slot), Some(12));
    }

    #[test]
    fn no_match_is_none() {
        let items = sample_inventory();
        assert!(find_item(&items, "diamond").is_none());
        assert!(find_item(&[], "torch").is_none());
    }
}
