use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::currency::{monthly_cost, round_to_cents, RateTable};
use crate::domain::{Currency, Subscription};
use crate::schedule::{first_of_month, last_of_month, month_add, month_label};

pub const DEFAULT_TREND_MONTHS: u32 = 12;

/// One calendar-month bucket of the spend trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub label: String,
    pub total: f64,
    pub new_subscriptions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSeries {
    pub currency: Currency,
    pub months: Vec<TrendPoint>,
}

/// Builds `month_count` consecutive month buckets ending at the reference
/// month, oldest first.
///
/// A subscription contributes to a bucket when it is currently active and
/// had already started by that month's end; cancellation dates are not
/// retained in the data model, so months before a cancellation still count
/// the subscription as absent.
pub fn compute_trend(
    subscriptions: &[Subscription],
    target: Currency,
    rates: &RateTable,
    reference: NaiveDate,
    month_count: u32,
) -> TrendSeries {
    let anchor = first_of_month(reference);
    let mut months = Vec::with_capacity(month_count as usize);

    for back in (0..month_count).rev() {
        let month_start = month_add(anchor, -(back as i32));
        let month_end = last_of_month(month_start);
        let mut total = 0.0f64;
        let mut new_subscriptions = 0usize;

        for sub in subscriptions {
            if !sub.is_active || sub.first_billing_date > month_end {
                continue;
            }
            total += monthly_cost(
                sub.amount,
                sub.currency,
                sub.billing_cycle,
                sub.custom_cycle_days,
                target,
                rates,
            );
            if sub.first_billing_date >= month_start {
                new_subscriptions += 1;
            }
        }

        months.push(TrendPoint {
            month: format!("{:04}-{:02}", month_start.year(), month_start.month()),
            label: format!(
                "{} {}",
                month_label(month_start.month()),
                month_start.year()
            ),
            total: round_to_cents(total),
            new_subscriptions,
        });
    }

    TrendSeries {
        currency: target,
        months,
    }
}
