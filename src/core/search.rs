//! Catalog search — a filtered, case-insensitive view over the registry.
//!
//! Matching is unanchored name-substring.  Results are derived on every call
//! and never stored; the ordering follows the registry (categories by name,
//! items by name), so the same query always yields the same output.

use super::catalog::{Catalog, Category, Item};

/// One category with the items that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub category: &'a Category,
    pub items: Vec<&'a Item>,
}

/// Search the catalog.
///
/// * An empty query returns every category with every item.  Whitespace is
///   part of the needle like any other character.
/// * Otherwise only categories with at least one matching item are returned,
///   each holding just its matching items.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<SearchResult<'a>> {
    let q_lower = query.to_lowercase();

    let mut results = Vec::new();
    for category in catalog.all_categories() {
        let items: Vec<&Item> = category
            .items
            .iter()
            .filter(|item| query.is_empty() || matches(item.name, &q_lower))
            .collect();
        if items.is_empty() {
            continue;
        }
        results.push(SearchResult { category, items });
    }

    tracing::debug!(query, categories = results.len(), "catalog search");
    results
}

/// Total number of items across a result set.
pub fn result_item_count(results: &[SearchResult<'_>]) -> usize {
    results.iter().map(|r| r.items.len()).sum()
}

fn matches(name: &str, needle_lower: &str) -> bool {
    name.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::core::destination::Destination;

    fn destinations(results: &[SearchResult<'_>]) -> HashSet<Destination> {
        results
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.destination))
            .collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = Catalog::builtin();
        let results = search(catalog, "");
        assert_eq!(results.len(), catalog.all_categories().len());
        assert_eq!(result_item_count(&results), catalog.item_count());
    }

    #[test]
    fn whitespace_is_matched_literally() {
        let catalog = Catalog::builtin();
        assert!(search(catalog, "   ").is_empty());

        let names: Vec<_> = search(catalog, "x ")
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.name))
            .collect();
        assert!(names.is_empty(), "{names:?}");

        let spaced = search(catalog, " ");
        assert!(result_item_count(&spaced) > 0);
        for r in &spaced {
            assert!(r.items.iter().all(|i| i.name.contains(' ')));
        }
    }

    #[test]
    fn but_finds_button_and_drops_other_categories() {
        let results = search(Catalog::builtin(), "but");
        let names: Vec<_> = results
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.name))
            .collect();
        assert!(names.contains(&"Button"));
        for r in &results {
            assert!(
                r.items.iter().any(|i| i.name.to_lowercase().contains("but")),
                "category {} has no matching item",
                r.category.name
            );
        }
        assert!(results.iter().all(|r| r.category.name != "Shapes"));
    }

    #[test]
    fn matching_ignores_case() {
        let lower = search(Catalog::builtin(), "text field");
        let upper = search(Catalog::builtin(), "TEXT FIELD");
        assert_eq!(lower, upper);
        assert_eq!(result_item_count(&lower), 1);
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(search(Catalog::builtin(), "zzz-not-a-widget").is_empty());
    }

    #[test]
    fn removed_item_is_not_searchable() {
        let categories = Catalog::builtin()
            .all_categories()
            .iter()
            .cloned()
            .map(|mut c| {
                c.items.retain(|i| i.destination != Destination::Toggle);
                c
            })
            .collect();
        let trimmed = Catalog::new(categories);
        assert!(!destinations(&search(&trimmed, "")).contains(&Destination::Toggle));
        assert!(search(&trimmed, "toggle").is_empty());
    }

    proptest! {
        #[test]
        fn results_are_a_subset_of_the_full_listing(query in "[a-zA-Z ]{0,6}") {
            let catalog = Catalog::builtin();
            let all = destinations(&search(catalog, ""));
            let filtered = search(catalog, &query);
            prop_assert!(destinations(&filtered).is_subset(&all));
            let needle = query.to_lowercase();
            for r in &filtered {
                prop_assert!(!r.items.is_empty());
                for item in &r.items {
                    prop_assert!(item.name.to_lowercase().contains(&needle));
                }
            }
        }

        #[test]
        fn repeated_queries_are_identical(query in "\\PC{0,8}") {
            let catalog = Catalog::builtin();
            prop_assert_eq!(search(catalog, &query), search(catalog, &query));
        }
    }
}
