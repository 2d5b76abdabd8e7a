//! Money formatting utilities for the dashboard.
//!
//! Format: sign + currency symbol + number with thousands separator and two
//! decimal places. Amounts are rounded half away from zero to cents.
//!
//! Color coding for derived figures:
//! - Positive amounts (> 0): green
//! - Negative amounts (< 0): red
//! - Zero (= 0): default text color

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a derived amount (revenue, profit) as colored HTML.
pub fn format_money(amount: Decimal, currency: &str, locale: &str) -> String {
    let (formatted, color_class) = format_money_impl(amount, currency, locale);
    format!(r#"<span class="{}">{}</span>"#, color_class, formatted)
}

/// Format an amount as plain text with a leading minus for negatives.
pub fn format_money_plain(amount: Decimal, currency: &str, locale: &str) -> String {
    let (formatted, _) = format_money_impl(amount, currency, locale);
    formatted
}

fn format_money_impl(amount: Decimal, currency: &str, locale: &str) -> (String, &'static str) {
    let color_class = if amount.is_sign_positive() && !amount.is_zero() {
        "text-green-600"
    } else if amount.is_sign_negative() && !amount.is_zero() {
        "text-red-600"
    } else {
        "text-gray-900"
    };

    let cents = to_cents(amount);
    let is_negative = cents < 0;
    let abs_cents = cents.unsigned_abs();
    let whole = abs_cents / 100;
    let fractional = abs_cents % 100;

    let (thousands_sep, decimal_sep) = locale_separators(locale);
    let whole_str = format_with_thousands(whole, thousands_sep);
    let symbol = currency_symbol(currency);

    let formatted = if is_negative {
        format!("-{}{}{}{:02}", symbol, whole_str, decimal_sep, fractional)
    } else {
        format!("{}{}{}{:02}", symbol, whole_str, decimal_sep, fractional)
    };

    (formatted, color_class)
}

fn to_cents(amount: Decimal) -> i128 {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // mantissa * 10^(2 - scale); after rounding scale is at most 2
    let mantissa = rounded.mantissa();
    let scale = rounded.scale();
    mantissa * 10i128.pow(2 - scale.min(2))
}

/// Get thousands and decimal separators based on locale.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "de-DE" | "de-AT" | "de-CH" | "fr-FR" | "fr-BE" | "fr-CA" | "es-ES" | "es-AR" | "it-IT"
        | "pt-BR" | "pt-PT" | "nl-NL" | "nl-BE" | "pl-PL" | "ru-RU" | "tr-TR" | "vi-VN"
        | "id-ID" | "da-DK" | "nb-NO" | "sv-SE" | "fi-FI" | "cs-CZ" | "sk-SK" | "hu-HU"
        | "ro-RO" | "bg-BG" | "uk-UA" | "el-GR" => ('.', ','),
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: u128, sep: char) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

/// Get currency symbol for a currency code.
fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{00a3}",
        "JPY" => "\u{00a5}",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF\u{00a0}",
        "INR" => "\u{20b9}",
        "PKR" => "Rs\u{00a0}",
        "ZAR" => "R\u{00a0}",
        "NZD" => "NZ$",
        _ => "$",
    }
}
