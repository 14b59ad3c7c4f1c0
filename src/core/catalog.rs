//! Catalog registry — the read-only table of categories and demo items.
//!
//! The registry is built once (see [`Catalog::builtin`]) and shared for the
//! lifetime of the process.  Categories are kept sorted by name and items
//! within each category are sorted by name, so every consumer sees the same
//! display order.

use std::sync::OnceLock;

use super::destination::Destination;

// ───────────────────────────────────────── types ─────────────

/// A single demo entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Display name, unique within its category.
    pub name: &'static str,
    /// Which screen the router builds for this item.
    pub destination: Destination,
}

impl Item {
    pub const fn new(name: &'static str, destination: Destination) -> Self {
        Self { name, destination }
    }
}

/// A named group of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    /// Short glyph shown next to the category header.
    pub icon: &'static str,
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(name: &'static str, icon: &'static str, items: Vec<Item>) -> Self {
        Self { name, icon, items }
    }
}

/// The registry itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a registry from arbitrary categories.  Categories and items are
    /// sorted by name; input order does not matter.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(b.name));
        for category in &mut categories {
            category.items.sort_by(|a, b| a.name.cmp(b.name));
        }
        Self { categories }
    }

    /// The process-wide registry of every shipped demo.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog::new(builtin_categories()))
    }

    /// All categories, sorted by name.
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of items across every category.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Find the item (and its category) that routes to `destination`.
    pub fn item_for(&self, destination: Destination) -> Option<(&Category, &Item)> {
        self.categories.iter().find_map(|category| {
            category
                .items
                .iter()
                .find(|item| item.destination == destination)
                .map(|item| (category, item))
        })
    }
}

// ───────────────────────────────────────── registry data ─────

fn builtin_categories() -> Vec<Category> {
    use Destination::*;

    vec![
        Category::new(
            "Charts",
            "▥",
            vec![
                Item::new("Bar Chart", BarChart),
                Item::new("Gauge", Gauge),
                Item::new("Sparkline", Sparkline),
            ],
        ),
        Category::new(
            "Controls",
            "◉",
            vec![
                Item::new("Button", Button),
                Item::new("Picker", Picker),
                Item::new("Slider", Slider),
                Item::new("Stepper", Stepper),
                Item::new("Text Field", TextField),
                Item::new("Toggle", Toggle),
            ],
        ),
        Category::new(
            "Shapes",
            "◆",
            vec![
                Item::new("Capsule", Capsule),
                Item::new("Circle", Circle),
                Item::new("Rectangle", Rectangle),
            ],
        ),
        Category::new(
            "Text",
            "¶",
            vec![Item::new("Badge", Badge), Item::new("Label", Label)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_destination_has_exactly_one_item() {
        let catalog = Catalog::builtin();
        for &d in Destination::ALL {
            let count = catalog
                .all_categories()
                .iter()
                .flat_map(|c| c.items.iter())
                .filter(|item| item.destination == d)
                .count();
            assert_eq!(count, 1, "{d} should be referenced by exactly one item");
        }
        assert_eq!(catalog.item_count(), Destination::ALL.len());
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let names: Vec<_> = Catalog::builtin()
            .all_categories()
            .iter()
            .map(|c| c.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn item_names_are_sorted_and_unique_within_category() {
        for category in Catalog::builtin().all_categories() {
            let names: Vec<_> = category.items.iter().map(|i| i.name).collect();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "duplicate in {}", category.name);
            assert!(names.windows(2).all(|w| w[0] < w[1]), "{} unsorted", category.name);
        }
    }

    #[test]
    fn new_sorts_regardless_of_input_order() {
        let catalog = Catalog::new(vec![
            Category::new(
                "Zeta",
                "z",
                vec![Item::new("b", Destination::Badge), Item::new("a", Destination::Label)],
            ),
            Category::new("Alpha", "a", vec![Item::new("x", Destination::Circle)]),
        ]);
        let cats = catalog.all_categories();
        assert_eq!(cats[0].name, "Alpha");
        assert_eq!(cats[1].items[0].name, "a");
    }

    #[test]
    fn item_for_finds_owning_category() {
        let (category, item) = Catalog::builtin()
            .item_for(Destination::Toggle)
            .expect("toggle is registered");
        assert_eq!(category.name, "Controls");
        assert_eq!(item.name, "Toggle");
    }
}
