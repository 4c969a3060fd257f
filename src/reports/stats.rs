use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{convert, monthly_cost, round_to_cents, RateTable};
use crate::domain::{Category, Currency, Subscription};
use crate::errors::SubscriptionError;

/// Spend aggregates across a set of subscriptions, normalized to one
/// currency. Monetary fields are rounded to cents at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_monthly: f64,
    pub total_yearly: f64,
    pub total_historical: f64,
    pub active_count: usize,
    pub cancelled_count: usize,
    pub by_category: BTreeMap<Category, f64>,
    pub historical_by_category: BTreeMap<Category, f64>,
    pub currency: Currency,
}

/// Aggregates monthly/yearly spend over active subscriptions and cumulative
/// historical spend over every subscription, cancelled ones included:
/// a cancelled subscription still paid for its elapsed occurrences.
pub fn compute_stats(
    subscriptions: &[Subscription],
    target: Currency,
    rates: &RateTable,
    reference: NaiveDate,
) -> Result<StatsReport, SubscriptionError> {
    let mut total_monthly = 0.0f64;
    let mut total_historical = 0.0f64;
    let mut active_count = 0usize;
    let mut cancelled_count = 0usize;
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
    let mut historical_by_category: BTreeMap<Category, f64> = BTreeMap::new();

    for sub in subscriptions {
        if sub.is_active {
            active_count += 1;
            let monthly = monthly_cost(
                sub.amount,
                sub.currency,
                sub.billing_cycle,
                sub.custom_cycle_days,
                target,
                rates,
            );
            total_monthly += monthly;
            if let Some(category) = sub.category {
                *by_category.entry(category).or_insert(0.0) += monthly;
            }
        } else {
            cancelled_count += 1;
        }

        let occurrences = sub.elapsed_occurrences_at(reference)?;
        if occurrences > 0 {
            let spent = convert(sub.amount, sub.currency, target, rates) * f64::from(occurrences);
            total_historical += spent;
            if let Some(category) = sub.category {
                *historical_by_category.entry(category).or_insert(0.0) += spent;
            }
        }
    }

    Ok(StatsReport {
        total_monthly: round_to_cents(total_monthly),
        total_yearly: round_to_cents(total_monthly * 12.0),
        total_historical: round_to_cents(total_historical),
        active_count,
        cancelled_count,
        by_category: round_map(by_category),
        historical_by_category: round_map(historical_by_category),
        currency: target,
    })
}

fn round_map(map: BTreeMap<Category, f64>) -> BTreeMap<Category, f64> {
    map.into_iter()
        .map(|(category, value)| (category, round_to_cents(value)))
        .collect()
}
