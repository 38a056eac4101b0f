//! Rarity highlights: the rarest tiers and the products that carry them.

use std::collections::HashSet;

use crate::models::{Product, Rarity};

/// Number of rarity tiers featured on the highlights page.
pub const TOP_RARITIES: usize = 3;

/// Rarities ordered rarest first (highest id first).
pub fn rarest_first(rarities: &[Rarity]) -> Vec<Rarity> {
    let mut sorted = rarities.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}

/// Products belonging to the `top` rarest tiers, rarest first.
///
/// Products without a rarity never qualify. Ties keep the input order.
pub fn rarity_highlights(rarities: &[Rarity], products: &[Product], top: usize) -> Vec<Product> {
    let featured: HashSet<i64> = rarest_first(rarities)
        .iter()
        .take(top)
        .map(|r| r.id)
        .collect();

    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| p.rarity_id().is_some_and(|id| featured.contains(&id)))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.rarity_id().cmp(&a.rarity_id()));
    out
}

/// Five-slot star badge for a rarity tier; the id is clamped to 1..=5 stars.
pub fn rarity_stars(rarity_id: i64) -> String {
    let stars = rarity_id.clamp(1, 5) as usize;
    format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars))
}
