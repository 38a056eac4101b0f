//! Product queries and mutations against the storefront REST API.

use crate::error::{CardHavenError, Result};
use crate::models::Product;
use crate::transport::Transport;

const PRODUCTS: &str = "productos";

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for catalog products.
pub struct ProductQuery<'a> {
    http: &'a Transport,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given transport.
    pub fn new(http: &'a Transport) -> Self {
        Self { http }
    }

    // -- Listing -----------------------------------------------------------

    /// Fetch the full product list.
    pub async fn list(&self) -> Result<Vec<Product>> {
        self.http.get_list(PRODUCTS, &[]).await
    }

    /// Server-side name search. The term is trimmed and must not be empty.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CardHavenError::InvalidArgument(
                "search term cannot be empty".into(),
            ));
        }
        self.http
            .get_list(&format!("{PRODUCTS}/search"), &[("nombre", term)])
            .await
    }

    /// Fetch a single product by id.
    pub async fn get(&self, id: i64) -> Result<Product> {
        check_id(id, "product")?;
        self.http.get_json(&format!("{PRODUCTS}/{id}")).await
    }

    // -- Mutations ---------------------------------------------------------

    /// Create a product and return the stored record.
    pub async fn create(&self, product: &Product) -> Result<Product> {
        product.validate()?;
        self.http.post_json(PRODUCTS, product).await
    }

    /// Replace the product with the given id.
    pub async fn update(&self, id: i64, product: &Product) -> Result<Product> {
        check_id(id, "product")?;
        product.validate()?;
        self.http
            .put_json(&format!("{PRODUCTS}/{id}"), product)
            .await
    }

    /// Delete the product with the given id.
    pub async fn delete(&self, id: i64) -> Result<()> {
        check_id(id, "product")?;
        self.http.delete(&format!("{PRODUCTS}/{id}")).await
    }

    // -- Facet-scoped listings ---------------------------------------------

    pub async fn by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        check_id(category_id, "category")?;
        self.http
            .get_list(&format!("{PRODUCTS}/categoria/{category_id}"), &[])
            .await
    }

    pub async fn by_collection(&self, collection_id: i64) -> Result<Vec<Product>> {
        check_id(collection_id, "collection")?;
        self.http
            .get_list(&format!("{PRODUCTS}/coleccion/{collection_id}"), &[])
            .await
    }

    /// Rarity listings live under the rarity resource rather than `productos`.
    pub async fn by_rarity(&self, rarity_id: i64) -> Result<Vec<Product>> {
        check_id(rarity_id, "rarity")?;
        self.http
            .get_list(&format!("rarezas/{rarity_id}/productos"), &[])
            .await
    }

    pub async fn by_condition(&self, condition_id: i64) -> Result<Vec<Product>> {
        check_id(condition_id, "condition")?;
        self.http
            .get_list(&format!("{PRODUCTS}/estado/{condition_id}"), &[])
            .await
    }
}

pub(crate) fn check_id(id: i64, kind: &str) -> Result<()> {
    if id <= 0 {
        return Err(CardHavenError::InvalidArgument(format!(
            "invalid {kind} id: {id}"
        )));
    }
    Ok(())
}
