//! Billing schedule arithmetic.
//!
//! The next billing date is the smallest on-schedule date greater than or
//! equal to the reference date, for every cycle kind. Monthly schedules use
//! calendar-month arithmetic anchored at the first billing date (day-of-month
//! clamped to shorter months); all other cycles advance by a fixed day count.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::BillingCycle;
use crate::errors::SubscriptionError;

const URGENT_WINDOW_DAYS: i64 = 3;
const SOON_WINDOW_DAYS: i64 = 7;

/// Day-count equivalent of a billing cycle.
///
/// Monthly is approximated as 30 days here; `next_billing_date` uses
/// calendar-accurate month arithmetic instead, so occurrence counts derived
/// from this value are approximate for monthly subscriptions.
pub fn cycle_days(
    cycle: BillingCycle,
    custom_cycle_days: Option<u32>,
) -> Result<i64, SubscriptionError> {
    match cycle {
        BillingCycle::Monthly => Ok(30),
        BillingCycle::Quarterly => Ok(90),
        BillingCycle::SemiAnnually => Ok(180),
        BillingCycle::Annually => Ok(365),
        BillingCycle::Custom => match custom_cycle_days {
            Some(days) if days > 0 => Ok(i64::from(days)),
            _ => Err(SubscriptionError::InvalidCycleConfiguration(
                "custom billing cycle requires a positive day count".into(),
            )),
        },
    }
}

/// Smallest date `>= reference` on the schedule anchored at `first`.
///
/// Always `>= first`; when the first billing date is still ahead of the
/// reference date it is returned unchanged.
pub fn next_billing_date(
    first: NaiveDate,
    cycle: BillingCycle,
    custom_cycle_days: Option<u32>,
    reference: NaiveDate,
) -> Result<NaiveDate, SubscriptionError> {
    if cycle == BillingCycle::Custom {
        cycle_days(cycle, custom_cycle_days)?;
    }
    if first >= reference {
        return Ok(first);
    }
    match cycle {
        BillingCycle::Monthly => {
            let mut months = 0i32;
            let mut candidate = first;
            while candidate < reference {
                months += 1;
                candidate = month_add(first, months);
            }
            Ok(candidate)
        }
        _ => {
            let days = cycle_days(cycle, custom_cycle_days)?;
            let since = (reference - first).num_days();
            let mut cycles = since.div_euclid(days);
            if since.rem_euclid(days) != 0 {
                cycles += 1;
            }
            Ok(first + Duration::days(cycles * days))
        }
    }
}

/// Signed day difference `next - reference`; negative means overdue.
pub fn days_until_renewal(next_billing_date: NaiveDate, reference: NaiveDate) -> i64 {
    (next_billing_date - reference).num_days()
}

/// True iff the renewal is neither overdue nor beyond the reminder window.
/// Overdue subscriptions are never flagged.
pub fn is_reminder_due(
    next_billing_date: NaiveDate,
    remind_days_before: u32,
    reference: NaiveDate,
) -> bool {
    let days = days_until_renewal(next_billing_date, reference);
    days >= 0 && days <= i64::from(remind_days_before)
}

/// Billing events that have occurred on or before `reference`, counting the
/// first occurrence as event #1. Returns 0 while `first` is in the future.
///
/// Every cycle kind, monthly included, uses the fixed day-count from
/// `cycle_days`, so totals built on this are approximate for monthly
/// subscriptions spanning months of different lengths.
pub fn elapsed_occurrences(
    first: NaiveDate,
    cycle: BillingCycle,
    custom_cycle_days: Option<u32>,
    reference: NaiveDate,
) -> Result<u32, SubscriptionError> {
    let days = cycle_days(cycle, custom_cycle_days)?;
    if first > reference {
        return Ok(0);
    }
    let since = (reference - first).num_days();
    Ok((since.div_euclid(days) + 1) as u32)
}

/// How soon a renewal needs attention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenewalUrgency {
    Urgent,
    Soon,
    Upcoming,
}

impl RenewalUrgency {
    pub fn classify(days_until: i64) -> RenewalUrgency {
        if days_until <= URGENT_WINDOW_DAYS {
            RenewalUrgency::Urgent
        } else if days_until <= SOON_WINDOW_DAYS {
            RenewalUrgency::Soon
        } else {
            RenewalUrgency::Upcoming
        }
    }
}

/// Adds whole calendar months, clamping the day to the target month's length.
pub fn month_add(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    month_add(first_of_month(date), 1) - Duration::days(1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_add_clamps_to_shorter_months() {
        let anchor = date(2024, 1, 31);
        assert_eq!(month_add(anchor, 1), date(2024, 2, 29));
        assert_eq!(month_add(anchor, 2), date(2024, 3, 31));
        assert_eq!(month_add(anchor, -1), date(2023, 12, 31));
        assert_eq!(month_add(date(2023, 1, 31), 1), date(2023, 2, 28));
    }

    #[test]
    fn month_helpers_cover_boundaries() {
        assert_eq!(first_of_month(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(last_of_month(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn cycle_days_rejects_missing_custom_days() {
        assert!(cycle_days(BillingCycle::Custom, None).is_err());
        assert!(cycle_days(BillingCycle::Custom, Some(0)).is_err());
        assert_eq!(cycle_days(BillingCycle::Custom, Some(45)).unwrap(), 45);
        assert_eq!(cycle_days(BillingCycle::Annually, None).unwrap(), 365);
    }

    #[test]
    fn urgency_ladder_matches_windows() {
        assert_eq!(RenewalUrgency::classify(0), RenewalUrgency::Urgent);
        assert_eq!(RenewalUrgency::classify(3), RenewalUrgency::Urgent);
        assert_eq!(RenewalUrgency::classify(4), RenewalUrgency::Soon);
        assert_eq!(RenewalUrgency::classify(7), RenewalUrgency::Soon);
        assert_eq!(RenewalUrgency::classify(8), RenewalUrgency::Upcoming);
    }
}
