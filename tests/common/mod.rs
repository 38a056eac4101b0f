//! Shared test fixtures for the Card Haven SDK integration tests.
//!
//! Products are built from the same JSON shape the storefront API serves,
//! so the fixtures also exercise the serde field mapping.

#![allow(dead_code)]

use card_haven_sdk::catalog::CatalogSnapshot;
use card_haven_sdk::models::{Category, Collection, Condition, Product, Rarity};
use card_haven_sdk::CardHaven;
use serde_json::{json, Value};

/// The sample catalog as raw API JSON.
///
/// | id | name           | price  | stock | cat | coll | rarity | cond | avg | year |
/// |----|----------------|--------|-------|-----|------|--------|------|-----|------|
/// | 1  | Charizard      | 120.5  | 2     | 1   | 10   | 4      | 1    | 4.5 | 2023 |
/// | 2  | Pikachu        | 10     | 0     | 1   | 11   | 1      | 2    | 3   | 2024 |
/// | 3  | Black Lotus    | 999.99 | 1     | 2   | 20   | 5      | 1    | 0   | 2022 |
/// | 4  | Ángel Guardián | 45     | 5     | 2   | 21   | 3      | 2    | 4   | -    |
/// | 5  | Zubat          | 2.5    | 10    | 1   | 10   | 2      | 3    | 1.5 | 2024 |
pub fn sample_products_json() -> Value {
    json!([
        {
            "id": 1,
            "nombre": "Charizard",
            "descripcion": "Fire type holo from the first print run",
            "precio": 120.5,
            "stock": 2,
            "imagenUrl": "1700000000000_charizard.png",
            "numeroCarta": 4,
            "categoria": {"id": 1, "nombre": "Pokemon"},
            "coleccion": {"id": 10, "nombre": "Base Set"},
            "rareza": {"id": 4, "nombre": "Holo Rare"},
            "estado": {"id": 1, "nombre": "Near Mint"},
            "precioOriginal": 150.0,
            "valoraciones": [rating(1, 1, 5.0), rating(2, 1, 4.0)],
            "fecha_creacion": "2023-03-01T10:00:00"
        },
        {
            "id": 2,
            "nombre": "Pikachu",
            "descripcion": "Electric mouse",
            "precio": 10.0,
            "stock": 0,
            "categoria": {"id": 1, "nombre": "Pokemon"},
            "coleccion": {"id": 11, "nombre": "Jungle"},
            "rareza": {"id": 1, "nombre": "Common"},
            "estado": {"id": 2, "nombre": "Played"},
            "valoraciones": [rating(3, 2, 3.0)],
            "fecha_creacion": "2024-01-15T09:30:00"
        },
        {
            "id": 3,
            "nombre": "Black Lotus",
            "precio": 999.99,
            "stock": 1,
            "imagenUrl": "https://cdn.example.com/lotus.jpg",
            "categoria": {"id": 2, "nombre": "Magic"},
            "coleccion": {"id": 20, "nombre": "Alpha"},
            "rareza": {"id": 5, "nombre": "Mythic"},
            "estado": {"id": 1, "nombre": "Near Mint"},
            "valoraciones": [],
            "fecha_creacion": "2022-07-20T00:00:00"
        },
        {
            "id": 4,
            "nombre": "Ángel Guardián",
            "descripcion": "Protector de la colección",
            "precio": 45.0,
            "stock": 5,
            "categoria": {"id": 2, "nombre": "Magic"},
            "coleccion": {"id": 21, "nombre": "Dominaria"},
            "rareza": {"id": 3, "nombre": "Rare"},
            "estado": {"id": 2, "nombre": "Played"},
            "valoraciones": [rating(4, 4, 4.0), rating(5, 4, 4.0), rating(6, 4, 7.0)]
        },
        {
            "id": 5,
            "nombre": "Zubat",
            "precio": 2.5,
            "stock": 10,
            "categoria": {"id": 1, "nombre": "Pokemon"},
            "coleccion": {"id": 10, "nombre": "Base Set"},
            "rareza": {"id": 2, "nombre": "Uncommon"},
            "estado": {"id": 3, "nombre": "Damaged"},
            "valoraciones": [rating(7, 5, 1.0), rating(8, 5, 2.0)],
            "fecha_creacion": "2024-06-01"
        }
    ])
}

fn rating(id: i64, product_id: i64, score: f64) -> Value {
    json!({
        "id": id,
        "usuario": {"id": 100 + id, "nombre": format!("user{id}")},
        "productoId": product_id,
        "puntuacion": score,
        "comentario": "",
        "fecha": "2024-02-02T12:00:00"
    })
}

pub fn sample_products() -> Vec<Product> {
    serde_json::from_value(sample_products_json()).unwrap()
}

pub fn sample_rarities() -> Vec<Rarity> {
    serde_json::from_value(json!([
        {"id": 1, "nombre": "Common"},
        {"id": 2, "nombre": "Uncommon"},
        {"id": 3, "nombre": "Rare"},
        {"id": 4, "nombre": "Holo Rare"},
        {"id": 5, "nombre": "Mythic"}
    ]))
    .unwrap()
}

pub fn sample_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        products: sample_products(),
        categories: serde_json::from_value::<Vec<Category>>(json!([
            {"id": 1, "nombre": "Pokemon"},
            {"id": 2, "nombre": "Magic"}
        ]))
        .unwrap(),
        collections: serde_json::from_value::<Vec<Collection>>(json!([
            {"id": 10, "nombre": "Base Set", "fechaLanzamiento": "1999-01-09"},
            {"id": 11, "nombre": "Jungle"},
            {"id": 20, "nombre": "Alpha"},
            {"id": 21, "nombre": "Dominaria"}
        ]))
        .unwrap(),
        rarities: sample_rarities(),
        conditions: serde_json::from_value::<Vec<Condition>>(json!([
            {"id": 1, "nombre": "Near Mint"},
            {"id": 2, "nombre": "Played"},
            {"id": 3, "nombre": "Damaged"}
        ]))
        .unwrap(),
    }
}

/// A minimal product with the given name and price.
pub fn product(id: i64, name: &str, price: f64) -> Product {
    serde_json::from_value(json!({"id": id, "nombre": name, "precio": price, "stock": 1})).unwrap()
}

pub fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

/// A client pointed at a mock server's `/api` prefix.
pub fn client_for(server_uri: &str) -> CardHaven {
    CardHaven::builder()
        .api_url(&format!("{server_uri}/api"))
        .storage(server_uri, "test-key")
        .build()
        .unwrap()
}
