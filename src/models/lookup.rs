use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A facet record the catalog can be filtered by.
///
/// Each lookup lives under its own REST collection (`ENDPOINT`) and is
/// referenced from [`Product`](super::Product) by id.
pub trait Lookup: DeserializeOwned + Send + Sync + 'static {
    /// Collection path relative to the API base (e.g. `"categorias"`).
    const ENDPOINT: &'static str;
    /// Human-readable kind used in log lines.
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "fechaLanzamiento", default)]
    pub release_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Rarity tier. Higher ids are rarer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rarity {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of a card (near mint, played, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
}

macro_rules! impl_lookup {
    ($ty:ty, $endpoint:literal, $kind:literal) => {
        impl Lookup for $ty {
            const ENDPOINT: &'static str = $endpoint;
            const KIND: &'static str = $kind;

            fn id(&self) -> i64 {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

impl_lookup!(Category, "categorias", "category");
impl_lookup!(Collection, "colecciones", "collection");
impl_lookup!(Rarity, "rarezas", "rarity");
impl_lookup!(Condition, "estados-producto", "condition");
