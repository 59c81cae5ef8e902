//! Display-string catalogs and currency formatting.
//!
//! Catalogs are JSON key → string tables compiled into the binary. A
//! missing translation falls back to the key itself so a typo never
//! blanks out part of the UI; an unknown locale falls back to English.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

static EN: &str = include_str!("../locales/en.json");
static DE: &str = include_str!("../locales/de.json");
static ES: &str = include_str!("../locales/es.json");

/// One locale's key → display-string table.
#[derive(Debug)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Loads the catalog for a locale, falling back to English when the
    /// locale is unknown.
    pub fn load(locale: &str) -> Self {
        let source = match locale {
            "en" => EN,
            "de" => DE,
            "es" => ES,
            other => {
                warn!(locale = other, "unknown locale, falling back to en");
                EN
            }
        };
        // Embedded catalogs are validated by tests; an empty table is the
        // worst case and every lookup then echoes its key.
        let entries = serde_json::from_str(source).unwrap_or_else(|e| {
            warn!(error = %e, "invalid embedded catalog");
            HashMap::new()
        });
        Self { entries }
    }

    /// Looks up a display string, echoing the key when untranslated.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// Formats a price for display: `€1,234.56`, `-$0.42`, `CHF 12.00`.
///
/// Two decimal places, thousands grouping, symbol for the common
/// reference currencies and the bare code otherwise.
pub fn format_currency(value: Decimal, currency: &str) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let text = format!("{abs:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    match currency_symbol(currency) {
        Some(symbol) => out.push_str(symbol),
        None => {
            out.push_str(currency);
            out.push(' ');
        }
    }
    out.push_str(&group_thousands(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Inserts a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn every_embedded_catalog_parses() {
        for locale in ["en", "de", "es"] {
            let catalog = Catalog::load(locale);
            assert_ne!(catalog.get("title"), "title", "catalog {locale} missing title");
        }
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let catalog = Catalog::load("en");
        assert_eq!(catalog.get("no_such_key"), "no_such_key");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let catalog = Catalog::load("tlh");
        assert_eq!(catalog.get("title"), Catalog::load("en").get("title"));
    }

    #[test]
    fn formats_with_symbol_and_grouping() {
        assert_eq!(format_currency(dec!(1234567.891), "EUR"), "€1,234,567.89");
        assert_eq!(format_currency(dec!(0.5), "USD"), "$0.50");
        assert_eq!(format_currency(dec!(12), "CHF"), "CHF 12.00");
    }

    #[test]
    fn formats_negative_values() {
        assert_eq!(format_currency(dec!(-42.135), "USD"), "-$42.14");
    }

    #[test]
    fn groups_short_and_exact_multiples() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234"), "1,234");
    }
}
