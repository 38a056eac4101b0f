//! In-memory catalog pipeline: filtering, sorting, ratings and highlights.
//!
//! Nothing here touches the network. The query interfaces fetch data; this
//! module derives what the storefront shows from it.

pub mod filter;
pub mod highlights;
pub mod image;
pub mod pricing;
pub mod rating;
pub mod sort;
pub mod view;

pub use filter::{toggle, FilterState, PriceRange};
pub use highlights::{rarity_highlights, rarity_stars, TOP_RARITIES};
pub use image::ImageSource;
pub use pricing::discount_percent;
pub use rating::{average_rating, star_rating};
pub use sort::SortMode;
pub use view::{CatalogSnapshot, CatalogView, NO_PRODUCTS_MESSAGE};
