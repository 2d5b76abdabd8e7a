//! Spreadsheet export of the computed sales table.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::date_utils::SessionDate;
use crate::error::{AppError, AppResult};
use crate::models::Product;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column titles, in sheet order.
pub const COLUMNS: [&str; 9] = [
    "Date",
    "Product Name",
    "Buy Price",
    "Sale Price",
    "Initial Stock",
    "Remaining Stock",
    "Items Sold",
    "Total Revenue",
    "Total Profit",
];

/// One exported row: the stored product numbers plus the derived figures.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: String,
    pub name: String,
    pub buy_price: Decimal,
    pub sale_price: Decimal,
    pub initial_stock: i64,
    pub remaining_stock: i64,
    pub sold: i64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

/// A single sheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Count(i64),
    Money(Decimal),
}

impl ExportRow {
    pub fn new(product: &Product, date: SessionDate) -> AppResult<Self> {
        let figures = product.figures()?;
        Ok(Self {
            date: date.display(),
            name: product.name.clone(),
            buy_price: product.buy_price,
            sale_price: product.sale_price,
            initial_stock: product.initial_stock,
            remaining_stock: product.remaining_stock,
            sold: figures.sold,
            revenue: figures.revenue,
            profit: figures.profit,
        })
    }

    /// The row's cells, one per entry of [`COLUMNS`].
    pub fn cells(&self) -> [Cell<'_>; COLUMNS.len()] {
        [
            Cell::Text(&self.date),
            Cell::Text(&self.name),
            Cell::Money(self.buy_price),
            Cell::Money(self.sale_price),
            Cell::Count(self.initial_stock),
            Cell::Count(self.remaining_stock),
            Cell::Count(self.sold),
            Cell::Money(self.revenue),
            Cell::Money(self.profit),
        ]
    }
}

pub fn export_rows(products: &[Product], date: SessionDate) -> AppResult<Vec<ExportRow>> {
    products.iter().map(|p| ExportRow::new(p, date)).collect()
}

pub fn sheet_name(date: SessionDate) -> String {
    format!("Sales_{}", date.file_stamp())
}

pub fn file_name(date: SessionDate) -> String {
    format!("Sales_Report_{}.xlsx", date.file_stamp())
}

/// A finished export ready to be sent to the browser.
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Build the workbook for `products` and encode it as `.xlsx` bytes.
pub fn build_report(products: &[Product], date: SessionDate) -> AppResult<SalesReport> {
    let rows = export_rows(products, date)?;

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(date))?;
        write_rows(worksheet, &rows)?;
    }
    let bytes = workbook.save_to_buffer()?;

    let report = SalesReport {
        file_name: file_name(date),
        bytes,
    };

    info!(
        file_name = %report.file_name,
        rows = rows.len(),
        size = report.bytes.len(),
        "Built sales report"
    );

    Ok(report)
}

fn write_rows(worksheet: &mut Worksheet, rows: &[ExportRow]) -> AppResult<()> {
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("0.00");

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => worksheet.write_string(r, col, text)?,
                Cell::Count(count) => worksheet.write_number(r, col, count as f64)?,
                Cell::Money(amount) => {
                    worksheet.write_number_with_format(r, col, to_f64(amount)?, &money)?
                }
            };
        }
    }

    worksheet.autofit();
    Ok(())
}

fn to_f64(value: Decimal) -> AppResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| AppError::Internal(format!("Cannot represent {} in a spreadsheet", value)))
}
