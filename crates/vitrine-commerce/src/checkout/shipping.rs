//! Shipping estimates by postal code (CEP).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Number of digits in a Brazilian postal code.
pub const CEP_DIGITS: usize = 8;

const WEEKDAYS: [&str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// An inclusive range of numeric CEPs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepRange {
    pub start: u32,
    pub end: u32,
}

impl CepRange {
    pub fn contains(&self, cep: u32) -> bool {
        (self.start..=self.end).contains(&cep)
    }
}

/// Delivery-time rules. Shipping is always free; only the lead time varies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingEstimator {
    /// CEP ranges served from the regional warehouse (Nordeste).
    pub fast_ranges: Vec<CepRange>,
    pub fast_days: u32,
    pub standard_days: u32,
    #[serde(skip)]
    pub currency: Currency,
}

impl Default for ShippingEstimator {
    fn default() -> Self {
        Self {
            fast_ranges: vec![CepRange {
                start: 40_000_000,
                end: 65_999_999,
            }],
            fast_days: 3,
            standard_days: 7,
            currency: Currency::BRL,
        }
    }
}

impl ShippingEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote delivery to `cep`, counting days from `today`.
    pub fn estimate(&self, cep: &str, today: NaiveDate) -> Result<ShippingQuote, CommerceError> {
        let digits = normalize_cep(cep)?;
        // eight ASCII digits always fit in u32
        let number: u32 = digits
            .parse()
            .map_err(|_| CommerceError::InvalidPostalCode(cep.to_string()))?;

        let days = if self.fast_ranges.iter().any(|r| r.contains(number)) {
            self.fast_days
        } else {
            self.standard_days
        };

        let estimated_date = today
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| CommerceError::ValidationError(format!("date overflow adding {days} days")))?;

        tracing::debug!(cep = %digits, days, %estimated_date, "estimated shipping");

        Ok(ShippingQuote {
            cep: digits,
            price: Money::zero(self.currency),
            days,
            estimated_date,
        })
    }
}

/// Keep the digits of `cep`; fewer than eight is an error, extra digits are dropped.
pub fn normalize_cep(cep: &str) -> Result<String, CommerceError> {
    let digits: String = cep.chars().filter(char::is_ascii_digit).take(CEP_DIGITS).collect();
    if digits.len() < CEP_DIGITS {
        return Err(CommerceError::InvalidPostalCode(cep.to_string()));
    }
    Ok(digits)
}

/// A delivery quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    /// Normalized eight-digit CEP.
    pub cep: String,
    pub price: Money,
    pub days: u32,
    pub estimated_date: NaiveDate,
}

impl ShippingQuote {
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// "Frete Grátis!" or the formatted price.
    pub fn price_label(&self) -> String {
        if self.is_free() {
            "Frete Grátis!".to_string()
        } else {
            self.price.display()
        }
    }

    /// "{days} dias úteis".
    pub fn days_label(&self) -> String {
        format!("{} dias úteis", self.days)
    }

    /// Long pt-BR date, e.g. "sexta-feira, 23 de outubro".
    pub fn date_label(&self) -> String {
        long_date(self.estimated_date)
    }

    /// CEP as "00000-000". A CEP that is not eight digits is returned as is.
    pub fn formatted_cep(&self) -> String {
        match (self.cep.get(..5), self.cep.get(5..)) {
            (Some(head), Some(tail)) if self.cep.len() == CEP_DIGITS => format!("{}-{}", head, tail),
            _ => self.cep.clone(),
        }
    }
}

fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize]
    )
}
