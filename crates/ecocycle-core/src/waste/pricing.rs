//! Recycling price table and the policy that turns a category into a quote.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::Category;

/// Label reported instead of the category name when an item earns nothing.
pub const NON_RECYCLABLE_LABEL: &str = "Non-recyclable";

/// Price per kilogram offered for each waste category.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    prices: BTreeMap<String, u32>,
}

/// Recyclability and price derived from a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Category name, or [`NON_RECYCLABLE_LABEL`].
    pub label: String,
    /// Whether the item is accepted for recycling.
    pub recyclable: bool,
    /// Price per kilogram; zero whenever `recyclable` is false.
    pub price_per_kg: u32,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::from_prices(Category::iter().map(|category| {
            let price = match category {
                Category::Plastic => 30,
                Category::Paper => 10,
                Category::Metal => 50,
                Category::Glass => 20,
                Category::Organic | Category::Other => 0,
            };
            (category, price)
        }))
    }
}

impl PricingTable {
    /// Creates a table from `(category, price per kg)` pairs.
    pub fn from_prices(prices: impl IntoIterator<Item = (Category, u32)>) -> Self {
        let prices = prices
            .into_iter()
            .map(|(category, price)| (category.to_string(), price))
            .collect();

        Self { prices }
    }

    /// Looks up a category by name.
    ///
    /// Unknown names are not recyclable and earn nothing.
    pub fn lookup(&self, label: &str) -> (bool, u32) {
        let price = self.prices.get(label).copied().unwrap_or(0);
        (price > 0, price)
    }

    /// Returns the table price for `category`.
    pub fn price_of(&self, category: Category) -> u32 {
        self.lookup(category.as_ref()).1
    }

    /// Applies pricing policy to `category`.
    ///
    /// Organic and Other are always reported as non-recyclable, as is any
    /// category whose table price is zero.
    pub fn quote(&self, category: Category) -> PriceQuote {
        let (recyclable, price_per_kg) = self.lookup(category.as_ref());

        if !recyclable || category.is_never_recyclable() {
            return PriceQuote {
                label: NON_RECYCLABLE_LABEL.to_owned(),
                recyclable: false,
                price_per_kg: 0,
            };
        }

        PriceQuote {
            label: category.to_string(),
            recyclable: true,
            price_per_kg,
        }
    }

    /// Iterates over `(category name, price per kg)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.prices.iter().map(|(label, price)| (label.as_str(), *price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prices() {
        let table = PricingTable::default();

        assert_eq!(table.price_of(Category::Plastic), 30);
        assert_eq!(table.price_of(Category::Paper), 10);
        assert_eq!(table.price_of(Category::Metal), 50);
        assert_eq!(table.price_of(Category::Glass), 20);
        assert_eq!(table.price_of(Category::Organic), 0);
        assert_eq!(table.price_of(Category::Other), 0);
    }

    #[test]
    fn priced_categories_are_recyclable() {
        let table = PricingTable::default();

        for category in [
            Category::Plastic,
            Category::Paper,
            Category::Metal,
            Category::Glass,
        ] {
            let quote = table.quote(category);
            assert!(quote.recyclable);
            assert_eq!(quote.label, category.to_string());
            assert_eq!(quote.price_per_kg, table.price_of(category));
        }
    }

    #[test]
    fn organic_and_other_are_non_recyclable() {
        let table = PricingTable::default();

        for category in [Category::Organic, Category::Other] {
            let quote = table.quote(category);
            assert_eq!(quote.label, NON_RECYCLABLE_LABEL);
            assert!(!quote.recyclable);
            assert_eq!(quote.price_per_kg, 0);
        }
    }

    #[test]
    fn policy_holds_even_if_table_prices_organic() {
        let table = PricingTable::from_prices([(Category::Organic, 5), (Category::Glass, 0)]);

        assert_eq!(table.quote(Category::Organic).label, NON_RECYCLABLE_LABEL);
        assert_eq!(table.quote(Category::Glass).label, NON_RECYCLABLE_LABEL);
        assert_eq!(table.quote(Category::Metal).price_per_kg, 0);
    }

    #[test]
    fn unknown_labels_earn_nothing() {
        let table = PricingTable::default();
        assert_eq!(table.lookup("Cardboard"), (false, 0));
        assert_eq!(table.lookup("Metal"), (true, 50));
    }

    #[test]
    fn recyclable_matches_positive_price() {
        let table = PricingTable::default();

        for category in Category::iter() {
            let quote = table.quote(category);
            assert_eq!(quote.recyclable, quote.price_per_kg > 0);
        }
    }
}
