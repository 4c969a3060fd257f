use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{BillingCycle, Currency};

/// Exchange rates relative to a single base currency.
///
/// Loaded once by the hosting application and treated as immutable
/// afterwards. A currency missing from the table converts at rate 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateTable {
    pub base: Currency,
    #[serde(default)]
    rates: HashMap<Currency, f64>,
}

impl RateTable {
    pub fn new(base: Currency) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Rate for `currency` relative to the base, defaulting to parity.
    pub fn rate(&self, currency: Currency) -> f64 {
        self.rates.get(&currency).copied().unwrap_or(1.0)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::new(Currency::Cny)
            .with_rate(Currency::Cny, 1.0)
            .with_rate(Currency::Usd, 0.14)
            .with_rate(Currency::Eur, 0.13)
            .with_rate(Currency::Gbp, 0.11)
    }
}

/// Converts `amount` between currencies through the table's base currency.
/// Identical source and target return the amount unchanged, with no
/// rounding drift.
pub fn convert(amount: f64, from: Currency, to: Currency, rates: &RateTable) -> f64 {
    if from == to {
        return amount;
    }
    let in_base = amount / rates.rate(from);
    in_base * rates.rate(to)
}

/// Monthly-equivalent cost of a subscription in the target currency.
///
/// A custom cycle without a positive day count falls back to the converted
/// amount, treated as monthly.
pub fn monthly_cost(
    amount: f64,
    currency: Currency,
    cycle: BillingCycle,
    custom_cycle_days: Option<u32>,
    target: Currency,
    rates: &RateTable,
) -> f64 {
    let converted = convert(amount, currency, target, rates);
    match cycle {
        BillingCycle::Monthly => converted,
        BillingCycle::Quarterly => converted / 3.0,
        BillingCycle::SemiAnnually => converted / 6.0,
        BillingCycle::Annually => converted / 12.0,
        BillingCycle::Custom => match custom_cycle_days {
            Some(days) if days > 0 => converted / f64::from(days) * 30.0,
            _ => converted,
        },
    }
}

pub fn yearly_cost(
    amount: f64,
    currency: Currency,
    cycle: BillingCycle,
    custom_cycle_days: Option<u32>,
    target: Currency,
    rates: &RateTable,
) -> f64 {
    monthly_cost(amount, currency, cycle, custom_cycle_days, target, rates) * 12.0
}

/// Rounds to 2 decimal places. Applied at report boundaries only; running
/// totals accumulate in full precision.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn symbol_for(currency: Currency) -> &'static str {
    match currency {
        Currency::Cny => "¥",
        Currency::Usd => "$",
        Currency::Eur => "€",
        Currency::Gbp => "£",
    }
}

pub fn format_amount(amount: f64, currency: Currency) -> String {
    format!("{}{:.2}", symbol_for(currency), amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rate_falls_back_to_parity() {
        let table = RateTable::new(Currency::Usd).with_rate(Currency::Usd, 1.0);
        assert!((table.rate(Currency::Gbp) - 1.0).abs() < f64::EPSILON);
        let converted = convert(25.0, Currency::Gbp, Currency::Eur, &table);
        assert!((converted - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn formats_amount_with_symbol() {
        assert_eq!(format_amount(9.9, Currency::Cny), "¥9.90");
        assert_eq!(format_amount(1234.567, Currency::Usd), "$1234.57");
    }

    #[test]
    fn rounds_at_cent_boundary() {
        assert!((round_to_cents(8.3325) - 8.33).abs() < f64::EPSILON);
        assert!((round_to_cents(8.336) - 8.34).abs() < f64::EPSILON);
    }
}
