//! Card Haven SDK for Rust.
//!
//! Provides a high-level async client for the Card Haven collectible card
//! storefront. Products and their lookup facets are fetched from the REST
//! API, filtered and sorted in memory by the [`catalog`] pipeline, kept fresh
//! by a [`poller`], and product images are uploaded to a hosted object store.
//!
//! # Quick start
//!
//! ```no_run
//! use card_haven_sdk::catalog::{CatalogView, SortMode};
//! use card_haven_sdk::CardHaven;
//!
//! # async fn example() -> card_haven_sdk::Result<()> {
//! let client = CardHaven::builder()
//!     .api_url("https://shop.example.com/api")
//!     .build()?;
//!
//! let mut view = CatalogView::new(client.load_catalog().await);
//! view.set_search("charizard");
//! view.set_sort(SortMode::PriceAsc);
//! for product in view.filtered() {
//!     println!("{} {:.2}", product.name, product.price());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod queries;
pub mod storage;
pub mod transport;

pub use catalog::{CatalogSnapshot, CatalogView};
pub use error::{CardHavenError, Result};
pub use poller::{PollState, Poller, ProductFeed, ProductSource};
pub use storage::StorageClient;
pub use transport::Transport;

use std::fmt;
use std::time::Duration;

use models::{Category, Collection, Condition, Lookup, Product, Rarity};
use queries::{LookupQuery, ProductQuery};

// ---------------------------------------------------------------------------
// CardHavenBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardHaven`] client.
///
/// Use [`CardHaven::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardHavenBuilder::build) to create the client.
pub struct CardHavenBuilder {
    api_url: String,
    timeout: Duration,
    poll_interval: Duration,
    storage_url: Option<String>,
    storage_key: Option<String>,
    bucket: String,
}

impl Default for CardHavenBuilder {
    fn default() -> Self {
        Self {
            api_url: config::DEFAULT_API_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            poll_interval: config::DEFAULT_POLL_INTERVAL,
            storage_url: None,
            storage_key: None,
            bucket: config::DEFAULT_BUCKET.to_string(),
        }
    }
}

impl CardHavenBuilder {
    /// Start from the defaults, overridden by any `CARDHAVEN_*` environment
    /// variables that are set.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = config::env_var(config::ENV_API_URL) {
            builder.api_url = url;
        }
        builder.storage_url = config::env_var(config::ENV_STORAGE_URL);
        builder.storage_key = config::env_var(config::ENV_STORAGE_KEY);
        if let Some(bucket) = config::env_var(config::ENV_STORAGE_BUCKET) {
            builder.bucket = bucket;
        }
        if let Some(secs) = config::env_var(config::ENV_POLL_INTERVAL_SECS) {
            match secs.parse::<u64>() {
                Ok(s) if s > 0 => builder.poll_interval = Duration::from_secs(s),
                _ => log::warn!(
                    "ignoring invalid {}={:?}",
                    config::ENV_POLL_INTERVAL_SECS,
                    secs
                ),
            }
        }
        builder
    }

    /// Base URL of the REST API, including any `/api` prefix.
    ///
    /// Defaults to `http://localhost:8080/api`.
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How often [`ProductFeed`] re-fetches the product list. Defaults to 30
    /// seconds.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Object storage project URL and API key used for image uploads.
    pub fn storage(mut self, url: &str, key: &str) -> Self {
        self.storage_url = Some(url.to_string());
        self.storage_key = Some(key.to_string());
        self
    }

    /// Storage bucket for product images. Defaults to `cartas-pokemon`.
    pub fn bucket(mut self, bucket: &str) -> Self {
        self.bucket = bucket.to_string();
        self
    }

    /// Build the client. No request is made until the first query.
    pub fn build(self) -> Result<CardHaven> {
        if self.poll_interval.is_zero() {
            return Err(CardHavenError::InvalidArgument(
                "poll interval must be greater than zero".into(),
            ));
        }
        let http = Transport::new(&self.api_url, self.timeout)?;
        let storage = match (self.storage_url, self.storage_key) {
            (Some(url), Some(key)) => {
                let client = reqwest::Client::builder().timeout(self.timeout).build()?;
                Some(StorageClient::new(client, &url, &key, &self.bucket))
            }
            _ => None,
        };
        Ok(CardHaven {
            http,
            storage,
            poll_interval: self.poll_interval,
        })
    }
}

// ---------------------------------------------------------------------------
// CardHaven
// ---------------------------------------------------------------------------

/// The main entry point for the Card Haven SDK.
///
/// Owns the HTTP [`Transport`] and optional [`StorageClient`], and exposes
/// resource-specific query interfaces as lightweight borrowing wrappers.
///
/// Created via [`CardHaven::builder()`].
pub struct CardHaven {
    http: Transport,
    storage: Option<StorageClient>,
    poll_interval: Duration,
}

impl CardHaven {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CardHavenBuilder {
        CardHavenBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the product query interface.
    pub fn products(&self) -> ProductQuery<'_> {
        ProductQuery::new(&self.http)
    }

    /// Access the query interface of any lookup facet.
    pub fn lookup<T: Lookup>(&self) -> LookupQuery<'_, T> {
        LookupQuery::new(&self.http)
    }

    /// Access the category query interface.
    pub fn categories(&self) -> LookupQuery<'_, Category> {
        self.lookup()
    }

    /// Access the collection query interface.
    pub fn collections(&self) -> LookupQuery<'_, Collection> {
        self.lookup()
    }

    /// Access the rarity query interface.
    pub fn rarities(&self) -> LookupQuery<'_, Rarity> {
        self.lookup()
    }

    /// Access the product condition query interface.
    pub fn conditions(&self) -> LookupQuery<'_, Condition> {
        self.lookup()
    }

    /// Access the image store, if one was configured.
    pub fn storage(&self) -> Result<&StorageClient> {
        self.storage.as_ref().ok_or_else(|| {
            CardHavenError::InvalidArgument("object storage is not configured".into())
        })
    }

    // -- Combined loads ----------------------------------------------------

    /// Load products and every lookup facet concurrently.
    ///
    /// A failing request is logged and contributes an empty list; the load
    /// itself never fails.
    pub async fn load_catalog(&self) -> CatalogSnapshot {
        let product_query = self.products();
        let category_query = self.categories();
        let collection_query = self.collections();
        let rarity_query = self.rarities();
        let condition_query = self.conditions();
        let (products, categories, collections, rarities, conditions) = tokio::join!(
            product_query.list(),
            category_query.list(),
            collection_query.list(),
            rarity_query.list(),
            condition_query.list(),
        );
        CatalogSnapshot {
            products: or_empty(products, "products"),
            categories: or_empty(categories, Category::KIND),
            collections: or_empty(collections, Collection::KIND),
            rarities: or_empty(rarities, Rarity::KIND),
            conditions: or_empty(conditions, Condition::KIND),
        }
    }

    /// Products of the rarest [`TOP_RARITIES`](catalog::TOP_RARITIES) tiers,
    /// rarest first.
    pub async fn rarity_highlights(&self) -> Result<Vec<Product>> {
        let rarities = self.rarities().list().await?;
        let products = self.products().list().await?;
        Ok(catalog::rarity_highlights(
            &rarities,
            &products,
            catalog::TOP_RARITIES,
        ))
    }

    // -- Configuration -----------------------------------------------------

    /// The configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.http.base_url
    }

    /// Interval used by [`ProductFeed::start`].
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Return a reference to the underlying [`Transport`] for advanced usage.
    pub fn transport(&self) -> &Transport {
        &self.http
    }
}

fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::warn!("failed to load {}: {}", what, e);
        Vec::new()
    })
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardHaven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CardHaven(api_url={}, poll_interval={}s, storage={})",
            self.http.base_url,
            self.poll_interval.as_secs(),
            self.storage
                .as_ref()
                .map(|s| s.bucket.as_str())
                .unwrap_or("none")
        )
    }
}
