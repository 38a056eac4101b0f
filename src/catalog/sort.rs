//! Sort modes for the derived catalog view.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::rating::average_rating;
use crate::models::Product;

/// How the filtered catalog is ordered. All sorts are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the filter output order.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 8] = [
        SortMode::Relevance,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::NameAsc,
        SortMode::NameDesc,
        SortMode::DateAsc,
        SortMode::DateDesc,
        SortMode::RatingDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::NameAsc => "name-asc",
            SortMode::NameDesc => "name-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::DateDesc => "date-desc",
            SortMode::RatingDesc => "rating-desc",
        }
    }

    /// Parse a sort tag. Unknown tags fall back to [`SortMode::Relevance`].
    pub fn from_tag(tag: &str) -> Self {
        SortMode::ALL
            .into_iter()
            .find(|m| m.as_str() == tag)
            .unwrap_or_default()
    }

    /// Reorder `products` in place.
    pub fn sort(&self, products: &mut [Product]) {
        match self {
            SortMode::Relevance => {}
            SortMode::PriceAsc => products.sort_by(|a, b| cmp_f64(a.price(), b.price())),
            SortMode::PriceDesc => products.sort_by(|a, b| cmp_f64(b.price(), a.price())),
            SortMode::NameAsc => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
            SortMode::NameDesc => products.sort_by(|a, b| compare_names(&b.name, &a.name)),
            SortMode::DateAsc => products.sort_by_key(|p| p.created_millis()),
            SortMode::DateDesc => {
                products.sort_by(|a, b| b.created_millis().cmp(&a.created_millis()))
            }
            // Averages land on half points, so doubling gives an exact integer key.
            SortMode::RatingDesc => products
                .sort_by_cached_key(|p| Reverse((average_rating(p.ratings()) * 2.0) as i64)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortMode::from_tag(s))
    }
}

/// NaN compares equal so a bad price never panics or reshuffles neighbours.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Fold a name for collation: decompose, drop accents, lowercase.
fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Human ordering for names: letters first, then accents, then case
/// (lowercase before uppercase).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_and_unknown_is_relevance() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_tag(mode.as_str()), mode);
        }
        assert_eq!(SortMode::from_tag("popularity"), SortMode::Relevance);
        assert_eq!("price-desc".parse::<SortMode>().unwrap(), SortMode::PriceDesc);
    }

    #[test]
    fn names_ignore_case_and_accents() {
        assert_eq!(compare_names("ángel", "Zeta"), Ordering::Less);
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("eclair", "éclair"), Ordering::Less);
        assert_eq!(compare_names("éclair", "eclairs"), Ordering::Less);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("Mia", "Mia"), Ordering::Equal);
    }
}
