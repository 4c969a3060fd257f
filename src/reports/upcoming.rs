use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BillingCycle, Category, Currency, Subscription};
use crate::errors::SubscriptionError;
use crate::schedule::{self, RenewalUrgency};

/// An active subscription decorated with renewal timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    pub billing_cycle: BillingCycle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub next_billing_date: NaiveDate,
    pub days_until_renewal: i64,
    pub reminder_due: bool,
    pub urgency: RenewalUrgency,
}

pub(crate) fn renewal_entry(
    sub: &Subscription,
    reference: NaiveDate,
) -> Result<UpcomingRenewal, SubscriptionError> {
    let next = sub.next_billing_date_at(reference)?;
    let days = schedule::days_until_renewal(next, reference);
    Ok(UpcomingRenewal {
        id: sub.id,
        name: sub.name.clone(),
        amount: sub.amount,
        currency: sub.currency,
        billing_cycle: sub.billing_cycle,
        category: sub.category,
        next_billing_date: next,
        days_until_renewal: days,
        reminder_due: schedule::is_reminder_due(next, sub.remind_days_before, reference),
        urgency: RenewalUrgency::classify(days),
    })
}

/// Active subscriptions renewing within `within_days` of the reference
/// date, soonest first. Billing dates are recomputed, never read from the
/// cached field, so the result is never past-due; `within_days == 0` yields
/// exactly the subscriptions billing today.
pub fn compute_upcoming(
    subscriptions: &[Subscription],
    within_days: i64,
    reference: NaiveDate,
) -> Result<Vec<UpcomingRenewal>, SubscriptionError> {
    let horizon = reference + Duration::days(within_days);
    let mut renewals = Vec::new();

    for sub in subscriptions.iter().filter(|sub| sub.is_active) {
        let entry = renewal_entry(sub, reference)?;
        if entry.next_billing_date > horizon {
            continue;
        }
        renewals.push(entry);
    }

    renewals.sort_by(|a, b| {
        (a.next_billing_date, a.name.as_str()).cmp(&(b.next_billing_date, b.name.as_str()))
    });
    Ok(renewals)
}
