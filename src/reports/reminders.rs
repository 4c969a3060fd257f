use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Subscription;
use crate::errors::SubscriptionError;
use crate::reports::upcoming::{renewal_entry, UpcomingRenewal};
use crate::schedule::RenewalUrgency;

/// Reminder-eligible renewals grouped by urgency. Delivery of the digest
/// (email, chat webhooks) belongs to the hosting application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDigest {
    pub reference_date: NaiveDate,
    pub urgent: Vec<UpcomingRenewal>,
    pub soon: Vec<UpcomingRenewal>,
    pub upcoming: Vec<UpcomingRenewal>,
}

impl ReminderDigest {
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    pub fn total_count(&self) -> usize {
        self.urgent.len() + self.soon.len() + self.upcoming.len()
    }
}

/// Active subscriptions whose own reminder window covers the reference
/// date, bucketed by how close the renewal is.
pub fn compute_reminder_digest(
    subscriptions: &[Subscription],
    reference: NaiveDate,
) -> Result<ReminderDigest, SubscriptionError> {
    let mut digest = ReminderDigest {
        reference_date: reference,
        urgent: Vec::new(),
        soon: Vec::new(),
        upcoming: Vec::new(),
    };

    for sub in subscriptions.iter().filter(|sub| sub.is_active) {
        let entry = renewal_entry(sub, reference)?;
        if !entry.reminder_due {
            continue;
        }
        match entry.urgency {
            RenewalUrgency::Urgent => digest.urgent.push(entry),
            RenewalUrgency::Soon => digest.soon.push(entry),
            RenewalUrgency::Upcoming => digest.upcoming.push(entry),
        }
    }

    for bucket in [
        &mut digest.urgent,
        &mut digest.soon,
        &mut digest.upcoming,
    ] {
        bucket.sort_by(|a, b| {
            (a.next_billing_date, a.name.as_str()).cmp(&(b.next_billing_date, b.name.as_str()))
        });
    }

    tracing::debug!(
        urgent = digest.urgent.len(),
        soon = digest.soon.len(),
        upcoming = digest.upcoming.len(),
        "computed reminder digest"
    );
    Ok(digest)
}
