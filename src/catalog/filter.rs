//! Filter state and the predicate that decides which products stay visible.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::rating::average_rating;
use super::sort::SortMode;
use crate::models::Product;

// ---------------------------------------------------------------------------
// PriceRange
// ---------------------------------------------------------------------------

/// Inclusive price interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1000.0,
        }
    }
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Observed price bounds of a product list, widened to whole units
    /// (floor of the cheapest, ceiling of the most expensive).
    pub fn bounds_of(products: &[Product]) -> Option<Self> {
        let mut prices = products
            .iter()
            .filter_map(|p| p.price)
            .filter(|p| p.is_finite());
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self {
            min: min.floor(),
            max: max.ceil(),
        })
    }

    /// Clamp both ends into `bounds`, then swap them if they ended up
    /// inverted.
    pub fn clamp_to(self, bounds: PriceRange) -> Self {
        let clamp = |v: f64| v.max(bounds.min).min(bounds.max);
        let min = clamp(self.min);
        let max = clamp(self.max);
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Everything the user can narrow the catalog by.
///
/// Empty sets and an empty search term or year are neutral: they keep every
/// product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub categories: BTreeSet<i64>,
    pub collections: BTreeSet<i64>,
    pub rarities: BTreeSet<i64>,
    pub conditions: BTreeSet<i64>,
    /// Minimum average ratings; a product passes if it reaches any of them.
    pub ratings: BTreeSet<u8>,
    pub price: PriceRange,
    pub in_stock_only: bool,
    pub year: String,
    pub sort: SortMode,
}

impl FilterState {
    /// Neutral filters spanning the given price range.
    pub fn with_price(price: PriceRange) -> Self {
        Self {
            price,
            ..Default::default()
        }
    }

    /// Whether `product` passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && in_selection(&self.categories, product.category_id())
            && self.price.contains(product.price())
            && (!self.in_stock_only || product.stock > 0)
            && in_selection(&self.collections, product.collection_id())
            && in_selection(&self.rarities, product.rarity_id())
            && in_selection(&self.conditions, product.condition_id())
            && self.matches_rating(product)
            && self.matches_year(product)
    }

    /// Filter then sort, returning the derived list.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut out: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        self.sort.sort(&mut out);
        out
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    fn matches_rating(&self, product: &Product) -> bool {
        if self.ratings.is_empty() {
            return true;
        }
        let avg = average_rating(product.ratings());
        self.ratings.iter().any(|&min| avg >= f64::from(min))
    }

    fn matches_year(&self, product: &Product) -> bool {
        if self.year.is_empty() {
            return true;
        }
        product
            .created_year()
            .is_some_and(|y| y.to_string() == self.year)
    }
}

fn in_selection(selected: &BTreeSet<i64>, id: Option<i64>) -> bool {
    selected.is_empty() || id.is_some_and(|id| selected.contains(&id))
}

/// Add `id` to the selection, or remove it if already selected.
pub fn toggle<T: Ord>(selected: &mut BTreeSet<T>, id: T) {
    if selected.contains(&id) {
        selected.remove(&id);
    } else {
        selected.insert(id);
    }
}
