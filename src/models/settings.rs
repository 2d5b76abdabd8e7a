use rust_decimal::Decimal;

use crate::filters;

/// Display preferences used when formatting money on the dashboard.
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub currency: String,
    pub locale: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            locale: "en-US".into(),
        }
    }
}

impl DisplaySettings {
    /// Format an amount as color-coded HTML.
    pub fn format_money(&self, amount: &Decimal) -> String {
        filters::format_money(*amount, &self.currency, &self.locale)
    }

    /// Format an amount as plain text without HTML/colors.
    pub fn format_money_plain(&self, amount: &Decimal) -> String {
        filters::format_money_plain(*amount, &self.currency, &self.locale)
    }
}
