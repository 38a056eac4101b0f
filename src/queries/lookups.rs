//! Queries for the lookup facets (categories, collections, rarities,
//! conditions).

use std::marker::PhantomData;

use super::products::check_id;
use crate::error::Result;
use crate::models::Lookup;
use crate::transport::Transport;

/// Query interface for one lookup collection.
pub struct LookupQuery<'a, T: Lookup> {
    http: &'a Transport,
    _kind: PhantomData<T>,
}

impl<'a, T: Lookup> LookupQuery<'a, T> {
    /// Create a new `LookupQuery` bound to the given transport.
    pub fn new(http: &'a Transport) -> Self {
        Self {
            http,
            _kind: PhantomData,
        }
    }

    /// Fetch every record of this lookup.
    pub async fn list(&self) -> Result<Vec<T>> {
        self.http.get_list(T::ENDPOINT, &[]).await
    }

    /// Fetch a record by id; `None` when the server answers 404.
    pub async fn get(&self, id: i64) -> Result<Option<T>> {
        check_id(id, T::KIND)?;
        self.http
            .get_optional(&format!("{}/{}", T::ENDPOINT, id))
            .await
    }
}
