//! Domain types representing tracked subscriptions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SubscriptionError;
use crate::schedule;

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Cny,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Cny
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Recurrence pattern governing how often a subscription charges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    Custom,
}

impl BillingCycle {
    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::SemiAnnually => "Semi-annually",
            BillingCycle::Annually => "Annually",
            BillingCycle::Custom => "Custom",
        }
    }
}

/// Grouping label used for reporting only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Productivity,
    Education,
    Fitness,
    Music,
    Cloud,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Entertainment => "entertainment",
            Category::Productivity => "productivity",
            Category::Education => "education",
            Category::Fitness => "fitness",
            Category::Music => "music",
            Category::Cloud => "cloud",
            Category::Other => "other",
        };
        f.write_str(label)
    }
}

const DEFAULT_REMIND_DAYS_BEFORE: u32 = 3;

/// A recurring subscription as supplied by the hosting application.
///
/// `next_billing_date` is a cached value; the schedule module is the single
/// authority for producing it, and reports always recompute it against the
/// reference date they are given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    pub billing_cycle: BillingCycle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_cycle_days: Option<u32>,
    pub first_billing_date: NaiveDate,
    pub next_billing_date: NaiveDate,
    pub remind_days_before: u32,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        currency: Currency,
        billing_cycle: BillingCycle,
        first_billing_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            currency,
            billing_cycle,
            custom_cycle_days: None,
            first_billing_date,
            next_billing_date: first_billing_date,
            remind_days_before: DEFAULT_REMIND_DAYS_BEFORE,
            is_active: true,
            category: None,
            notes: None,
        }
    }

    pub fn with_custom_cycle_days(mut self, days: u32) -> Self {
        self.custom_cycle_days = Some(days);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_remind_days_before(mut self, days: u32) -> Self {
        self.remind_days_before = days;
        self
    }

    pub fn cancel(&mut self) {
        self.is_active = false;
    }

    /// Checks the cross-field rules the closed enums cannot express.
    pub fn validate(&self) -> Result<(), SubscriptionError> {
        if self.amount <= 0.0 {
            return Err(SubscriptionError::InvalidSubscription(format!(
                "amount must be greater than 0, got {}",
                self.amount
            )));
        }
        if self.billing_cycle == BillingCycle::Custom {
            schedule::cycle_days(self.billing_cycle, self.custom_cycle_days)?;
        }
        Ok(())
    }

    /// Next on-schedule billing date at or after `reference`.
    pub fn next_billing_date_at(
        &self,
        reference: NaiveDate,
    ) -> Result<NaiveDate, SubscriptionError> {
        schedule::next_billing_date(
            self.first_billing_date,
            self.billing_cycle,
            self.custom_cycle_days,
            reference,
        )
    }

    /// Recomputes and stores the cached `next_billing_date`.
    pub fn refresh_next_billing_date(
        &mut self,
        reference: NaiveDate,
    ) -> Result<NaiveDate, SubscriptionError> {
        let next = self.next_billing_date_at(reference)?;
        self.next_billing_date = next;
        Ok(next)
    }

    /// Billing events that have occurred on or before `reference`.
    pub fn elapsed_occurrences_at(&self, reference: NaiveDate) -> Result<u32, SubscriptionError> {
        schedule::elapsed_occurrences(
            self.first_billing_date,
            self.billing_cycle,
            self.custom_cycle_days,
            reference,
        )
    }
}
