//! Query modules for the Card Haven SDK.
//!
//! Each module provides a query struct that borrows the shared
//! [`Transport`](crate::transport::Transport) and exposes async methods
//! returning typed `Result<T>` payloads.

pub mod lookups;
pub mod products;

pub use lookups::LookupQuery;
pub use products::ProductQuery;
