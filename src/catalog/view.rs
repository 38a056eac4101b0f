//! The catalog page state: loaded data, active filters and the derived list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::filter::{toggle, FilterState, PriceRange};
use super::rating::average_rating;
use super::sort::SortMode;
use crate::models::{Category, Collection, Condition, Product, Rarity};

pub const NO_PRODUCTS_MESSAGE: &str = "No products available.";

// ---------------------------------------------------------------------------
// CatalogSnapshot
// ---------------------------------------------------------------------------

/// Everything the catalog page loads up front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub collections: Vec<Collection>,
    pub rarities: Vec<Rarity>,
    pub conditions: Vec<Condition>,
}

// ---------------------------------------------------------------------------
// CatalogView
// ---------------------------------------------------------------------------

/// Catalog state with a filtered, sorted view kept in sync.
///
/// Every mutating method re-runs the filter pipeline, so
/// [`filtered()`](Self::filtered) always reflects the current filters.
#[derive(Debug, Clone)]
pub struct CatalogView {
    snapshot: CatalogSnapshot,
    price_bounds: PriceRange,
    available_years: Vec<i32>,
    filters: FilterState,
    filtered: Vec<Product>,
    error_message: Option<String>,
    selected: Option<Product>,
}

impl CatalogView {
    /// Build the view from a loaded snapshot with neutral filters spanning
    /// the observed price bounds.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let price_bounds = PriceRange::bounds_of(&snapshot.products).unwrap_or_default();
        let mut view = Self {
            available_years: years_of(&snapshot.products),
            filters: FilterState::with_price(price_bounds),
            price_bounds,
            filtered: Vec::new(),
            error_message: None,
            selected: None,
            snapshot,
        };
        view.error_message = view.notice().map(String::from);
        view.apply_filters();
        view
    }

    // -- Accessors ---------------------------------------------------------

    /// Everything loaded, unfiltered.
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// The full product list in load order.
    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    /// The filtered and sorted products.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// The active filters and sort.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Observed price bounds of the loaded products.
    pub fn price_bounds(&self) -> PriceRange {
        self.price_bounds
    }

    /// Distinct creation years, newest first.
    pub fn available_years(&self) -> &[i32] {
        &self.available_years
    }

    /// The message currently shown to the user, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Message to show when there is nothing to browse.
    pub fn notice(&self) -> Option<&'static str> {
        self.snapshot
            .products
            .is_empty()
            .then_some(NO_PRODUCTS_MESSAGE)
    }

    // -- Pipeline ----------------------------------------------------------

    /// Recompute the derived list from the current filters.
    pub fn apply_filters(&mut self) {
        self.filtered = self.filters.apply(&self.snapshot.products);
    }

    /// Match `term` against names and descriptions, case-insensitively.
    pub fn set_search(&mut self, term: &str) {
        self.filters.search_term = term.to_string();
        self.apply_filters();
    }

    /// Add or remove a category from the selection.
    pub fn toggle_category(&mut self, id: i64) {
        toggle(&mut self.filters.categories, id);
        self.apply_filters();
    }

    /// Add or remove a collection from the selection.
    pub fn toggle_collection(&mut self, id: i64) {
        toggle(&mut self.filters.collections, id);
        self.apply_filters();
    }

    /// Add or remove a rarity from the selection.
    pub fn toggle_rarity(&mut self, id: i64) {
        toggle(&mut self.filters.rarities, id);
        self.apply_filters();
    }

    /// Add or remove a condition from the selection.
    pub fn toggle_condition(&mut self, id: i64) {
        toggle(&mut self.filters.conditions, id);
        self.apply_filters();
    }

    /// Add or remove a minimum average rating threshold.
    pub fn toggle_rating(&mut self, min_rating: u8) {
        toggle(&mut self.filters.ratings, min_rating);
        self.apply_filters();
    }

    /// Set the price interval, clamped to the observed bounds and swapped if
    /// inverted.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.filters.price = PriceRange::new(min, max).clamp_to(self.price_bounds);
        self.apply_filters();
    }

    /// Hide sold-out products when `true`.
    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.filters.in_stock_only = in_stock_only;
        self.apply_filters();
    }

    /// Restrict to one creation year; an empty string clears the filter.
    pub fn set_year(&mut self, year: &str) {
        self.filters.year = year.trim().to_string();
        self.apply_filters();
    }

    /// Change the ordering of the filtered list.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.filters.sort = sort;
        self.apply_filters();
    }

    /// Restore every filter to neutral and the sort to relevance.
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::with_price(self.price_bounds);
        self.apply_filters();
    }

    /// Swap in a freshly fetched product list, keeping the user's filters.
    ///
    /// A price range the user never narrowed follows the new bounds; a
    /// narrowed one is clamped into them.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        let old_bounds = self.price_bounds;
        self.price_bounds = PriceRange::bounds_of(&products).unwrap_or_default();
        self.available_years = years_of(&products);
        self.filters.price = if self.filters.price == old_bounds {
            self.price_bounds
        } else {
            self.filters.price.clamp_to(self.price_bounds)
        };
        if let Some(sel) = &self.selected {
            let id = sel.id;
            self.selected = products.iter().find(|p| p.id == id).cloned();
        }
        self.snapshot.products = products;
        self.error_message = self.notice().map(String::from);
        self.apply_filters();
    }

    /// Replace the message shown to the user, e.g. after a failed poll.
    pub fn set_error(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    // -- Facet counts ------------------------------------------------------

    /// Products in a category, ignoring the active filters.
    pub fn count_by_category(&self, id: i64) -> usize {
        self.count_where(|p| p.category_id() == Some(id))
    }

    /// Products in a collection, ignoring the active filters.
    pub fn count_by_collection(&self, id: i64) -> usize {
        self.count_where(|p| p.collection_id() == Some(id))
    }

    /// Products of a rarity, ignoring the active filters.
    pub fn count_by_rarity(&self, id: i64) -> usize {
        self.count_where(|p| p.rarity_id() == Some(id))
    }

    /// Products in a condition, ignoring the active filters.
    pub fn count_by_condition(&self, id: i64) -> usize {
        self.count_where(|p| p.condition_id() == Some(id))
    }

    /// Products whose average rating rounds down to `rating` stars.
    pub fn count_by_rating(&self, rating: u8) -> usize {
        self.count_where(|p| average_rating(p.ratings()).floor() == f64::from(rating))
    }

    fn count_where<F: Fn(&Product) -> bool>(&self, pred: F) -> usize {
        self.snapshot.products.iter().filter(|p| pred(*p)).count()
    }

    // -- Selection ---------------------------------------------------------

    /// Select a product for the detail view. Returns `false` if unknown.
    pub fn select(&mut self, id: i64) -> bool {
        self.selected = self.snapshot.products.iter().find(|p| p.id == id).cloned();
        self.selected.is_some()
    }

    /// The product open in the detail view.
    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// Close the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

fn years_of(products: &[Product]) -> Vec<i32> {
    let years: BTreeSet<i32> = products.iter().filter_map(|p| p.created_year()).collect();
    years.into_iter().rev().collect()
}
