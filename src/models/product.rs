use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One product's price and stock data.
///
/// Only the stored numbers live here. Sold quantity, revenue and profit are
/// always derived from them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub buy_price: Decimal,
    pub sale_price: Decimal,
    pub initial_stock: i64,
    pub remaining_stock: i64,
}

impl Product {
    /// Units sold. Negative when remaining stock exceeds the initial stock.
    pub fn sold(&self) -> AppResult<i64> {
        self.initial_stock
            .checked_sub(self.remaining_stock)
            .ok_or_else(|| self.overflow("sold quantity"))
    }

    pub fn revenue(&self) -> AppResult<Decimal> {
        Decimal::from(self.sold()?)
            .checked_mul(self.sale_price)
            .ok_or_else(|| self.overflow("revenue"))
    }

    pub fn profit(&self) -> AppResult<Decimal> {
        let margin = self
            .sale_price
            .checked_sub(self.buy_price)
            .ok_or_else(|| self.overflow("profit"))?;
        Decimal::from(self.sold()?)
            .checked_mul(margin)
            .ok_or_else(|| self.overflow("profit"))
    }

    pub fn figures(&self) -> AppResult<ProductFigures> {
        Ok(ProductFigures {
            sold: self.sold()?,
            revenue: self.revenue()?,
            profit: self.profit()?,
        })
    }

    fn overflow(&self, figure: &str) -> AppError {
        AppError::Validation(format!(
            "The {} of product {} is out of range",
            figure, self.id
        ))
    }
}

/// Derived figures for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductFigures {
    pub sold: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

/// A product together with the figures derived from it, as rendered in the table.
#[derive(Debug, Clone, Serialize)]
pub struct ProductLine {
    #[serde(flatten)]
    pub product: Product,
    #[serde(flatten)]
    pub figures: ProductFigures,
}

impl ProductLine {
    pub fn new(product: &Product) -> AppResult<Self> {
        Ok(Self {
            figures: product.figures()?,
            product: product.clone(),
        })
    }
}
