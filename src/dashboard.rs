//! The dashboard session: the product list, the view mode and the date the
//! session was opened.
//!
//! Every edit builds a new list with exactly one product replaced and swaps it
//! in, so a [`Dashboard::snapshot`] taken earlier keeps its old contents.

use std::sync::Arc;

use tracing::{debug, info};

use crate::date_utils::SessionDate;
use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductEdit, ProductField, ProductLine, SalesTotals, ViewMode};

#[derive(Debug, Clone)]
pub struct Dashboard {
    products: Arc<Vec<Product>>,
    mode: ViewMode,
    date: SessionDate,
}

impl Dashboard {
    pub fn new(products: Vec<Product>, date: SessionDate) -> Self {
        info!(
            product_count = products.len(),
            date = %date,
            "Dashboard session opened"
        );
        Self {
            products: Arc::new(products),
            mode: ViewMode::default(),
            date,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Shared handle to the current list. Later edits never touch it.
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.products)
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn date(&self) -> SessionDate {
        self.date
    }

    pub fn lines(&self) -> AppResult<Vec<ProductLine>> {
        self.products.iter().map(ProductLine::new).collect()
    }

    pub fn totals(&self) -> AppResult<SalesTotals> {
        SalesTotals::from_products(&self.products)
    }

    /// Set remaining stock from raw table input. Empty input means zero.
    pub fn update_remaining_stock(&mut self, id: i64, raw: &str) -> AppResult<()> {
        let edit = ProductEdit::remaining_stock(raw)?;
        self.apply(id, &edit)
    }

    /// Set one editable field from raw input.
    pub fn update_field(&mut self, id: i64, field: ProductField, raw: &str) -> AppResult<()> {
        let edit = field.edit_from(raw)?;
        self.apply(id, &edit)
    }

    /// Replace the product with `id` by a copy carrying `edit`.
    ///
    /// An edit whose figures or totals would fall out of range is rejected and
    /// the current list is kept.
    pub fn apply(&mut self, id: i64, edit: &ProductEdit) -> AppResult<()> {
        if self.product(id).is_none() {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        let updated: Vec<Product> = self
            .products
            .iter()
            .map(|p| if p.id == id { edit.apply(p) } else { p.clone() })
            .collect();
        SalesTotals::from_products(&updated)?;
        self.products = Arc::new(updated);

        debug!(product_id = id, ?edit, "Product updated");
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        debug!(mode = self.mode.as_str(), "View mode toggled");
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> SessionDate {
        SessionDate::from_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(
            vec![
                Product {
                    id: 1,
                    name: "A".into(),
                    buy_price: dec!(1),
                    sale_price: dec!(2),
                    initial_stock: 10,
                    remaining_stock: 4,
                },
                Product {
                    id: 2,
                    name: "B".into(),
                    buy_price: dec!(5),
                    sale_price: dec!(8),
                    initial_stock: 3,
                    remaining_stock: 3,
                },
            ],
            date(),
        )
    }

    #[test]
    fn test_totals_for_seeded_list() {
        let d = dashboard();
        let totals = d.totals().unwrap();
        assert_eq!(totals.sold, 6);
        assert_eq!(totals.revenue, dec!(12));
        assert_eq!(totals.profit, dec!(6));
    }

    #[test]
    fn test_update_remaining_stock_touches_only_target() {
        let mut d = dashboard();
        let before = d.products().to_vec();

        d.update_remaining_stock(1, "9").unwrap();

        assert_eq!(d.product(1).unwrap().remaining_stock, 9);
        assert_eq!(d.product(2), Some(&before[1]));
        assert_eq!(d.product(1).unwrap().name, before[0].name);
        assert_eq!(d.totals().unwrap().revenue, dec!(2));
    }

    #[test]
    fn test_update_remaining_stock_empty_is_zero() {
        let mut d = dashboard();
        d.update_remaining_stock(2, "").unwrap();
        assert_eq!(d.product(2).unwrap().remaining_stock, 0);
        assert_eq!(d.product(2).unwrap().sold().unwrap(), 3);
    }

    #[test]
    fn test_update_remaining_stock_allows_out_of_range_values() {
        let mut d = dashboard();
        d.update_remaining_stock(1, "-5").unwrap();
        assert_eq!(d.product(1).unwrap().remaining_stock, -5);
        d.update_remaining_stock(1, "25").unwrap();
        assert_eq!(d.product(1).unwrap().sold().unwrap(), -15);
    }

    #[test]
    fn test_invalid_input_leaves_list_unchanged() {
        let mut d = dashboard();
        let before = d.snapshot();

        assert!(matches!(
            d.update_remaining_stock(1, "lots"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            d.update_field(1, ProductField::BuyPrice, "cheap"),
            Err(AppError::Validation(_))
        ));
        assert!(Arc::ptr_eq(&before, &d.snapshot()));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut d = dashboard();
        assert!(matches!(
            d.update_remaining_stock(99, "1"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            d.update_field(99, ProductField::Name, "X"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_fields() {
        let mut d = dashboard();
        d.update_field(1, ProductField::BuyPrice, "12.5").unwrap();
        d.update_field(1, ProductField::SalePrice, "14.25").unwrap();
        d.update_field(1, ProductField::InitialStock, "7").unwrap();
        d.update_field(1, ProductField::Name, "Renamed").unwrap();

        let p = d.product(1).unwrap();
        assert_eq!(p.buy_price, dec!(12.5));
        assert_eq!(p.sale_price, dec!(14.25));
        assert_eq!(p.initial_stock, 7);
        assert_eq!(p.name, "Renamed");
        assert_eq!(p.sold().unwrap(), 3);
        assert_eq!(p.profit().unwrap(), dec!(5.25));
    }

    #[test]
    fn test_snapshot_is_not_mutated_by_edits() {
        let mut d = dashboard();
        let snapshot = d.snapshot();

        d.update_remaining_stock(1, "0").unwrap();

        assert_eq!(snapshot[0].remaining_stock, 4);
        assert_eq!(d.product(1).unwrap().remaining_stock, 0);
        assert!(!Arc::ptr_eq(&snapshot, &d.snapshot()));
    }

    #[test]
    fn test_toggle_mode_twice_changes_nothing() {
        let mut d = dashboard();
        let before = d.products().to_vec();

        assert_eq!(d.toggle_mode(), ViewMode::Edit);
        assert_eq!(d.toggle_mode(), ViewMode::Display);
        assert_eq!(d.products(), before.as_slice());
    }

    #[test]
    fn test_date_is_fixed_at_creation() {
        let d = dashboard();
        assert_eq!(d.date().display(), "07/03/2024");
    }

    #[test]
    fn test_empty_dashboard() {
        let d = Dashboard::new(Vec::new(), date());
        assert!(d.lines().unwrap().is_empty());
        assert_eq!(d.totals().unwrap(), SalesTotals::default());
    }

    #[test]
    fn test_out_of_range_edits_leave_list_unchanged() {
        let mut d = dashboard();
        let before = d.snapshot();

        assert!(matches!(
            d.update_remaining_stock(1, "-9223372036854775808"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            d.update_field(1, ProductField::SalePrice, "79228162514264337593543950335"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            d.update_field(1, ProductField::InitialStock, "-9223372036854775808"),
            Err(AppError::Validation(_))
        ));

        assert!(Arc::ptr_eq(&before, &d.snapshot()));
        assert_eq!(d.totals().unwrap().revenue, dec!(12));
        assert_eq!(d.lines().unwrap().len(), 2);
    }

    #[test]
    fn test_edit_overflowing_only_the_totals_is_rejected() {
        let mut d = dashboard();
        d.update_field(1, ProductField::InitialStock, "9223372036854775807")
            .unwrap();
        d.update_remaining_stock(1, "0").unwrap();
        let before = d.snapshot();

        // product 2 alone is fine, but the summed sold count would overflow
        assert!(matches!(
            d.update_remaining_stock(2, "-1"),
            Err(AppError::Validation(_))
        ));
        assert!(Arc::ptr_eq(&before, &d.snapshot()));
        assert_eq!(d.totals().unwrap().sold, i64::MAX);
    }
}
