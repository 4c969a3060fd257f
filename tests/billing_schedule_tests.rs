use chrono::NaiveDate;
use subscription_core::{
    domain::BillingCycle,
    errors::SubscriptionError,
    schedule::{
        days_until_renewal, elapsed_occurrences, is_reminder_due, next_billing_date,
        RenewalUrgency,
    },
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_anchor_clamps_then_returns_to_original_day() {
    // Day-31 anchor: February clamps to the 29th, March lands back on the 31st.
    let first = date(2024, 1, 31);
    let next = next_billing_date(first, BillingCycle::Monthly, None, date(2024, 3, 1)).unwrap();
    assert_eq!(next, date(2024, 3, 31));

    let next = next_billing_date(first, BillingCycle::Monthly, None, date(2024, 2, 10)).unwrap();
    assert_eq!(next, date(2024, 2, 29));
}

#[test]
fn monthly_reference_on_schedule_returns_that_day() {
    let first = date(2024, 1, 10);
    let next = next_billing_date(first, BillingCycle::Monthly, None, date(2024, 3, 10)).unwrap();
    assert_eq!(next, date(2024, 3, 10));
    assert_eq!(days_until_renewal(next, date(2024, 3, 10)), 0);
}

#[test]
fn fixed_day_cycles_share_the_inclusive_boundary_rule() {
    let first = date(2024, 1, 1);
    // 90 days after the first billing date is still a billing day.
    let next = next_billing_date(first, BillingCycle::Quarterly, None, date(2024, 3, 31)).unwrap();
    assert_eq!(next, date(2024, 3, 31));
    // One day past the boundary rolls to the next 90-day mark.
    let next = next_billing_date(first, BillingCycle::Quarterly, None, date(2024, 4, 1)).unwrap();
    assert_eq!(next, date(2024, 6, 29));
}

#[test]
fn annual_and_custom_cycles_advance_by_fixed_day_counts() {
    let first = date(2023, 5, 20);
    let next = next_billing_date(first, BillingCycle::Annually, None, date(2024, 1, 1)).unwrap();
    assert_eq!(next, first + chrono::Duration::days(365));

    let next =
        next_billing_date(date(2024, 1, 1), BillingCycle::Custom, Some(45), date(2024, 2, 20))
            .unwrap();
    assert_eq!(next, date(2024, 3, 31));
}

#[test]
fn future_first_billing_date_is_returned_unchanged() {
    let reference = date(2024, 3, 1);
    let first = date(2024, 9, 15);
    for (cycle, custom) in [
        (BillingCycle::Monthly, None),
        (BillingCycle::Quarterly, None),
        (BillingCycle::Annually, None),
        (BillingCycle::Custom, Some(14)),
    ] {
        let next = next_billing_date(first, cycle, custom, reference).unwrap();
        assert_eq!(next, first);
        assert!(next >= first);
    }
}

#[test]
fn next_billing_date_is_deterministic() {
    let first = date(2023, 11, 30);
    let reference = date(2024, 7, 4);
    let a = next_billing_date(first, BillingCycle::Monthly, None, reference).unwrap();
    let b = next_billing_date(first, BillingCycle::Monthly, None, reference).unwrap();
    assert_eq!(a, b);
    assert!(a >= first);
}

#[test]
fn custom_cycle_without_days_is_rejected() {
    let err = next_billing_date(date(2024, 1, 1), BillingCycle::Custom, None, date(2024, 2, 1))
        .unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidCycleConfiguration(_)));

    let err = next_billing_date(
        date(2024, 1, 1),
        BillingCycle::Custom,
        Some(0),
        date(2024, 2, 1),
    )
    .unwrap_err();
    assert!(matches!(err, SubscriptionError::InvalidCycleConfiguration(_)));
}

#[test]
fn reminder_predicate_never_fires_for_overdue_renewals() {
    let reference = date(2024, 5, 10);
    let overdue = date(2024, 5, 8);
    assert_eq!(days_until_renewal(overdue, reference), -2);
    for remind in [0, 3, 30, 365] {
        assert!(!is_reminder_due(overdue, remind, reference));
    }
}

#[test]
fn reminder_window_is_inclusive_on_both_edges() {
    let reference = date(2024, 5, 10);
    assert!(is_reminder_due(reference, 0, reference));
    assert!(is_reminder_due(date(2024, 5, 13), 3, reference));
    assert!(!is_reminder_due(date(2024, 5, 14), 3, reference));
}

#[test]
fn elapsed_occurrences_counts_first_event_as_one() {
    let first = date(2024, 1, 1);
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Monthly, None, date(2023, 12, 31)).unwrap(),
        0
    );
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Monthly, None, first).unwrap(),
        1
    );
    // Monthly uses the 30-day approximation: days 0, 30 and 60 have billed.
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Monthly, None, date(2024, 3, 1)).unwrap(),
        3
    );
}

#[test]
fn elapsed_occurrences_boundary_day_counts_the_new_cycle() {
    let first = date(2024, 1, 1);
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Quarterly, None, date(2024, 3, 30)).unwrap(),
        1
    );
    // Exactly 90 days later the second charge has happened.
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Quarterly, None, date(2024, 3, 31)).unwrap(),
        2
    );
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Annually, None, date(2024, 12, 30)).unwrap(),
        1
    );
    assert_eq!(
        elapsed_occurrences(first, BillingCycle::Custom, Some(45), date(2024, 4, 1)).unwrap(),
        3
    );
}

#[test]
fn urgency_tracks_days_until_renewal() {
    let reference = date(2024, 5, 10);
    let next = next_billing_date(date(2024, 5, 12), BillingCycle::Monthly, None, reference)
        .unwrap();
    assert_eq!(
        RenewalUrgency::classify(days_until_renewal(next, reference)),
        RenewalUrgency::Urgent
    );
}
