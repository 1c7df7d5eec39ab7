//! # Amount Types
//!
//! Monetary amounts as the provider transmits them: a decimal string plus an
//! ISO 4217 currency code.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    RUB,
    USD,
    EUR,
    BYN,
    CNY,
    KZT,
    UAH,
    UZS,
    TRY,
    INR,
    MDL,
    AZN,
    AMD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::BYN => "BYN",
            Currency::CNY => "CNY",
            Currency::KZT => "KZT",
            Currency::UAH => "UAH",
            Currency::UZS => "UZS",
            Currency::TRY => "TRY",
            Currency::INR => "INR",
            Currency::MDL => "MDL",
            Currency::AZN => "AZN",
            Currency::AMD => "AMD",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::RUB
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount with a decimal string value, e.g. `"10.00"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Decimal value with a dot separator
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    /// Create an amount from an already formatted decimal string
    pub fn new(value: impl Into<String>, currency: Currency) -> Self {
        Self {
            value: value.into(),
            currency,
        }
    }

    /// Create an amount from minor units (kopecks, cents)
    pub fn from_minor_units(minor: i64, currency: Currency) -> Self {
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        Self {
            value: format!("{}{}.{:02}", sign, abs / 100, abs % 100),
            currency,
        }
    }

    /// Rubles shorthand
    pub fn rub(value: impl Into<String>) -> Self {
        Self::new(value, Currency::RUB)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units() {
        assert_eq!(Amount::from_minor_units(1000, Currency::RUB).value, "10.00");
        assert_eq!(Amount::from_minor_units(1999, Currency::USD).value, "19.99");
        assert_eq!(Amount::from_minor_units(5, Currency::RUB).value, "0.05");
        assert_eq!(Amount::from_minor_units(-250, Currency::RUB).value, "-2.50");
    }

    #[test]
    fn test_amount_wire_format() {
        let amount = Amount::rub("10.00");
        let json = serde_json::to_value(&amount).unwrap();
        assert_eq!(json, serde_json::json!({"value": "10.00", "currency": "RUB"}));
        assert_eq!(amount.to_string(), "10.00 RUB");
    }
}
