use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::{convert, round_to_cents, RateTable};
use crate::domain::{Category, Currency, Subscription};
use crate::errors::SubscriptionError;
use crate::schedule::{first_of_month, last_of_month, month_add, month_label};

/// A renewal landing inside the forecast month, with the charge also
/// expressed in the target currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRenewal {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    pub amount_in_target: f64,
    pub next_billing_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthForecast {
    pub month: String,
    pub label: String,
    pub currency: Currency,
    pub total_amount: f64,
    pub renewal_count: usize,
    pub renewals: Vec<ForecastRenewal>,
}

/// Renewals of active subscriptions falling inside one calendar month:
/// `month_offset == 0` is the month containing the reference date, 1 is the
/// month after it, and so on. Soonest renewal first.
pub fn compute_month_forecast(
    subscriptions: &[Subscription],
    target: Currency,
    rates: &RateTable,
    reference: NaiveDate,
    month_offset: u32,
) -> Result<MonthForecast, SubscriptionError> {
    let month_start = month_add(first_of_month(reference), month_offset as i32);
    let month_end = last_of_month(month_start);
    let mut total = 0.0f64;
    let mut renewals = Vec::new();

    for sub in subscriptions.iter().filter(|sub| sub.is_active) {
        let next = sub.next_billing_date_at(reference)?;
        if next < month_start || next > month_end {
            continue;
        }
        let in_target = convert(sub.amount, sub.currency, target, rates);
        total += in_target;
        renewals.push(ForecastRenewal {
            id: sub.id,
            name: sub.name.clone(),
            amount: sub.amount,
            currency: sub.currency,
            amount_in_target: round_to_cents(in_target),
            next_billing_date: next,
            category: sub.category,
        });
    }

    renewals.sort_by(|a, b| {
        (a.next_billing_date, a.name.as_str()).cmp(&(b.next_billing_date, b.name.as_str()))
    });

    Ok(MonthForecast {
        month: format!("{:04}-{:02}", month_start.year(), month_start.month()),
        label: format!(
            "{} {}",
            month_label(month_start.month()),
            month_start.year()
        ),
        currency: target,
        total_amount: round_to_cents(total),
        renewal_count: renewals.len(),
        renewals,
    })
}
