use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::Product;
use crate::error::{AppError, AppResult};

/// Product fields that can be edited in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Name,
    BuyPrice,
    SalePrice,
    InitialStock,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::BuyPrice => "buy_price",
            ProductField::SalePrice => "sale_price",
            ProductField::InitialStock => "initial_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Name => "Name",
            ProductField::BuyPrice => "Buy price",
            ProductField::SalePrice => "Sale price",
            ProductField::InitialStock => "Initial stock",
        }
    }

    /// Parse raw input for this field into a typed edit.
    ///
    /// Names are kept verbatim, prices parse as decimals and stock counts as
    /// whole numbers. No range checks are applied.
    pub fn edit_from(&self, raw: &str) -> AppResult<ProductEdit> {
        match self {
            ProductField::Name => Ok(ProductEdit::Name(raw.to_string())),
            ProductField::BuyPrice => parse_price(*self, raw).map(ProductEdit::BuyPrice),
            ProductField::SalePrice => parse_price(*self, raw).map(ProductEdit::SalePrice),
            ProductField::InitialStock => parse_count(*self, raw).map(ProductEdit::InitialStock),
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single typed change to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEdit {
    Name(String),
    BuyPrice(Decimal),
    SalePrice(Decimal),
    InitialStock(i64),
    RemainingStock(i64),
}

impl ProductEdit {
    /// Remaining stock as typed into the table. Empty input counts as zero.
    pub fn remaining_stock(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(ProductEdit::RemainingStock(0));
        }
        trimmed
            .parse::<i64>()
            .map(ProductEdit::RemainingStock)
            .map_err(|_| {
                AppError::Validation(format!(
                    "Remaining stock must be a whole number, got '{}'",
                    raw
                ))
            })
    }

    /// Return a copy of `product` with this edit applied.
    pub fn apply(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        match self {
            ProductEdit::Name(name) => updated.name = name.clone(),
            ProductEdit::BuyPrice(price) => updated.buy_price = *price,
            ProductEdit::SalePrice(price) => updated.sale_price = *price,
            ProductEdit::InitialStock(count) => updated.initial_stock = *count,
            ProductEdit::RemainingStock(count) => updated.remaining_stock = *count,
        }
        updated
    }
}

fn parse_price(field: ProductField, raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        AppError::Validation(format!("{} must be a number, got '{}'", field.label(), raw))
    })
}

fn parse_count(field: ProductField, raw: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::Validation(format!(
            "{} must be a whole number, got '{}'",
            field.label(),
            raw
        ))
    })
}
