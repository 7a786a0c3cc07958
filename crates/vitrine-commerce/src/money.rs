//! Money type for representing monetary values.
//!
//! The product API sends prices as decimal numbers in reais. Anything that
//! is displayed or divided goes through [`Money`], which keeps the amount in
//! cents so installment prices round the same way every time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Symbol as printed before the amount, including any spacing.
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::BRL => "R$ ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac} ",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Thousands and decimal separators used when formatting.
    fn separators(&self) -> (char, char) {
        match self {
            Currency::USD => (',', '.'),
            Currency::BRL | Currency::EUR => ('.', ','),
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use vitrine_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1999.9, Currency::BRL);
    /// assert_eq!(price.amount_cents, 199990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Split into `parts` equal installments, rounded to the nearest cent.
    ///
    /// Zero parts is treated as a single payment.
    pub fn divide(&self, parts: u32) -> Money {
        if parts <= 1 {
            return *self;
        }
        let share = (self.amount_cents as f64 / parts as f64).round() as i64;
        Money::new(share, self.currency)
    }

    /// Format as a display string (e.g., "R$ 1.234,56").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.prefix(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "1.234,56").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let (thousands, decimal) = self.currency.separators();

        let mut out = String::new();
        if self.amount_cents < 0 {
            out.push('-');
        }
        out.push_str(&group_digits(abs / divisor, thousands));
        if places > 0 {
            out.push(decimal);
            out.push_str(&format!("{:0width$}", abs % divisor, width = places as usize));
        }
        out
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::BRL);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::BRL);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_brl_display_groups_thousands() {
        assert_eq!(Money::new(123456, Currency::BRL).display(), "R$ 1.234,56");
        assert_eq!(Money::new(150000000, Currency::BRL).display(), "R$ 1.500.000,00");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
    }

    #[test]
    fn test_usd_display() {
        assert_eq!(Money::new(123456, Currency::USD).display(), "$1,234.56");
    }

    #[test]
    fn test_negative_display() {
        assert_eq!(Money::new(-1050, Currency::BRL).display(), "R$ -10,50");
    }

    #[test]
    fn test_divide_into_installments() {
        let m = Money::new(100000, Currency::BRL);
        assert_eq!(m.divide(12).amount_cents, 8333);
        assert_eq!(m.divide(0), m);
        assert_eq!(m.divide(1), m);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("brl"), Some(Currency::BRL));
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
