use rust_decimal::Decimal;
use serde::Serialize;

use super::Product;
use crate::error::{AppError, AppResult};

/// Aggregate sold quantity, revenue and profit across a product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SalesTotals {
    pub sold: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

impl SalesTotals {
    pub fn from_products(products: &[Product]) -> AppResult<Self> {
        products.iter().try_fold(Self::default(), |acc, p| {
            let figures = p.figures()?;
            Ok(Self {
                sold: acc.sold.checked_add(figures.sold).ok_or_else(|| overflow("sold"))?,
                revenue: acc
                    .revenue
                    .checked_add(figures.revenue)
                    .ok_or_else(|| overflow("revenue"))?,
                profit: acc
                    .profit
                    .checked_add(figures.profit)
                    .ok_or_else(|| overflow("profit"))?,
            })
        })
    }
}

fn overflow(total: &str) -> AppError {
    AppError::Validation(format!("The total {} is out of range", total))
}
