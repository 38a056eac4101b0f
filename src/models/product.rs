use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lookup::{Category, Collection, Condition, Rarity};
use crate::error::{CardHavenError, Result};

// ---------------------------------------------------------------------------
// Product: a catalog item as served by the storefront API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Listed price; the API may omit it.
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "numeroCarta", default)]
    pub card_number: Option<i64>,
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,
    #[serde(rename = "coleccion", default)]
    pub collection: Option<Collection>,
    #[serde(rename = "rareza", default)]
    pub rarity: Option<Rarity>,
    #[serde(rename = "estado", default)]
    pub condition: Option<Condition>,
    #[serde(rename = "precioOriginal", default)]
    pub original_price: Option<f64>,
    #[serde(rename = "valoraciones", default)]
    pub ratings: Option<Vec<Rating>>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<String>,
}

impl Product {
    /// Price used for sorting and filtering; a missing price counts as zero.
    pub fn price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().map(|c| c.id)
    }

    pub fn collection_id(&self) -> Option<i64> {
        self.collection.as_ref().map(|c| c.id)
    }

    pub fn rarity_id(&self) -> Option<i64> {
        self.rarity.as_ref().map(|r| r.id)
    }

    pub fn condition_id(&self) -> Option<i64> {
        self.condition.as_ref().map(|c| c.id)
    }

    /// Ratings attached to the product (empty when the API omitted them).
    pub fn ratings(&self) -> &[Rating] {
        self.ratings.as_deref().unwrap_or(&[])
    }

    /// Creation timestamp, if present and parseable.
    pub fn created_at_parsed(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Calendar year the product was created in.
    pub fn created_year(&self) -> Option<i32> {
        self.created_at_parsed().map(|ts| ts.year())
    }

    /// Creation time as epoch milliseconds; missing or unparseable dates
    /// count as the epoch itself.
    pub fn created_millis(&self) -> i64 {
        self.created_at_parsed()
            .map(|ts| ts.and_utc().timestamp_millis())
            .unwrap_or(0)
    }

    /// Check the invariants the API expects before a create or update.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CardHavenError::InvalidArgument(
                "product name cannot be empty".into(),
            ));
        }
        match self.price {
            None => {
                return Err(CardHavenError::InvalidArgument(
                    "product price is required".into(),
                ))
            }
            Some(price) if !price.is_finite() || price < 0.0 => {
                return Err(CardHavenError::InvalidArgument(format!(
                    "product price must be >= 0, got {price}"
                )))
            }
            Some(_) => {}
        }
        if self.stock < 0 {
            return Err(CardHavenError::InvalidArgument(format!(
                "product stock must be >= 0, got {}",
                self.stock
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rating: a user score attached to a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    #[serde(rename = "usuario")]
    pub user: RatingUser,
    #[serde(rename = "productoId", default)]
    pub product_id: i64,
    /// Expected in 1..=5; values outside that range are ignored by averages.
    #[serde(rename = "puntuacion")]
    pub score: f64,
    #[serde(rename = "comentario", default)]
    pub comment: String,
    #[serde(rename = "fecha", default)]
    pub created_at: Option<String>,
    #[serde(rename = "actualizado", default)]
    pub updated_at: Option<String>,
}

/// Snapshot of the user who left a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse the timestamp shapes the backend emits: RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (or with a space separator), or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
