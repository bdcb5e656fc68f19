use serde::Serialize;

use lifedash_config::Config;

/// Whole-unit currency formatting driven by the configured locale and currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyFormat {
    pub currency: String,
    pub grouping_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(&Config::default_locale(), &Config::default_currency())
    }
}

impl From<&Config> for MoneyFormat {
    fn from(config: &Config) -> Self {
        Self::new(&config.locale, &config.currency)
    }
}

impl MoneyFormat {
    pub fn new(locale: &str, currency: &str) -> Self {
        Self {
            currency: currency.trim().to_uppercase(),
            grouping_separator: grouping_for(locale),
        }
    }

    /// `-$1,235` style: rounded to whole units, sign before the symbol.
    pub fn format(&self, amount: f64) -> String {
        let rounded = amount.abs().round();
        let digits = if rounded.is_finite() {
            format!("{rounded:.0}")
        } else {
            "0".to_string()
        };
        let body = group_digits(&digits, self.grouping_separator);
        let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };
        match symbol_for(&self.currency) {
            Some(symbol) => format!("{sign}{symbol}{body}"),
            None => format!("{sign}{} {body}", self.currency),
        }
    }
}

fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn grouping_for(locale: &str) -> char {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "nl" | "pt" => '.',
        "fr" => ' ',
        _ => ',',
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
