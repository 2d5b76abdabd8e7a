//! Loading the initial product list.
//!
//! The seed document is a JSON array of products. A copy is compiled into the
//! binary; a file on disk can replace it at startup. Edits are never written back.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Product, SalesTotals};

/// The bundled default product list.
pub const DEFAULT_SEED: &str = include_str!("../../data/default.json");

pub fn parse_seed(json: &str) -> AppResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)
        .map_err(|e| AppError::Seed(format!("Invalid seed document: {}", e)))?;

    let mut seen = HashSet::new();
    for product in &products {
        if !seen.insert(product.id) {
            return Err(AppError::Seed(format!(
                "Duplicate product id {} in seed document",
                product.id
            )));
        }
    }

    SalesTotals::from_products(&products)
        .map_err(|e| AppError::Seed(format!("Invalid seed document: {}", e)))?;

    Ok(products)
}

pub fn load_default() -> AppResult<Vec<Product>> {
    parse_seed(DEFAULT_SEED)
}

pub fn load_from_file(path: &Path) -> AppResult<Vec<Product>> {
    let content = fs::read_to_string(path)?;
    let products = parse_seed(&content)?;
    info!(
        path = %path.display(),
        count = products.len(),
        "Loaded seed document"
    );
    Ok(products)
}

/// Load the configured seed file, or the bundled default when none is set.
pub fn load(path: Option<&Path>) -> AppResult<Vec<Product>> {
    match path {
        Some(path) => load_from_file(path),
        None => load_default(),
    }
}
