use chrono::{Datelike, NaiveDate, Weekday};
use finance_recurrence::recurrence::{
    expand_occurrences_in_month, resolve_next_occurrence, step, Frequency, RecurrenceRule,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn day_of_month_clamps_through_short_months() {
    let rule = RecurrenceRule::monthly().with_day_of_month(31);
    let dates: Vec<_> = rule
        .occurrences(date(2024, 1, 31))
        .take(4)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        dates,
        vec![
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2024, 3, 31),
            date(2024, 4, 30)
        ]
    );
}

#[test]
fn biweekly_wednesdays_from_a_monday_anchor() {
    let anchor = date(2024, 1, 1);
    assert_eq!(anchor.weekday(), Weekday::Mon);
    let rule = RecurrenceRule::weekly().with_interval(2).with_day_of_week(3);

    let dates: Vec<_> = rule
        .occurrences(anchor)
        .take(7)
        .collect::<Result<_, _>>()
        .unwrap();
    // the anchor is emitted as-is; alignment only applies to stepped dates
    assert_eq!(dates[0], anchor);
    let stepped = &dates[1..];
    assert!(stepped.iter().all(|d| d.weekday() == Weekday::Wed));
    for pair in stepped.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 14);
    }

    let january = expand_occurrences_in_month(anchor, &rule, None, 2024, 1).unwrap();
    assert_eq!(january, vec![anchor, date(2024, 1, 17), date(2024, 1, 31)]);
}

#[test]
fn resolver_converges_strictly_after_now() {
    let rule = RecurrenceRule::daily().with_interval(1);
    let next = resolve_next_occurrence(date(2020, 1, 1), &rule, date(2024, 1, 1)).unwrap();
    assert_eq!(next, date(2024, 1, 2));
}

#[test]
fn month_window_excludes_neighbouring_months() {
    let rule = RecurrenceRule::daily();
    let dates = expand_occurrences_in_month(date(2024, 2, 28), &rule, None, 2024, 3).unwrap();
    assert_eq!(dates.len(), 31);
    assert!(dates.iter().all(|d| d.month() == 3 && d.year() == 2024));
    assert_eq!(dates[0], date(2024, 3, 1));
    assert_eq!(dates[30], date(2024, 3, 31));
}

#[test]
fn yearly_leap_day_rule_alternates_between_28_and_29() {
    let rule = RecurrenceRule::yearly()
        .with_month_of_year(2)
        .with_day_of_month(29);
    let dates: Vec<_> = rule
        .occurrences(date(2023, 2, 28))
        .skip(1)
        .take(5)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 29),
            date(2025, 2, 28),
            date(2026, 2, 28),
            date(2027, 2, 28),
            date(2028, 2, 29)
        ]
    );
}

#[test]
fn yearly_month_overwrite_moves_anchor_month() {
    let rule = RecurrenceRule::yearly().with_month_of_year(12);
    assert_eq!(step(date(2024, 3, 15), &rule).unwrap(), date(2025, 12, 15));
}

#[test]
fn end_date_inside_window_truncates_output() {
    let rule = RecurrenceRule::weekly();
    let end = date(2024, 3, 18);
    let dates = expand_occurrences_in_month(date(2024, 1, 1), &rule, Some(end), 2024, 3).unwrap();
    assert_eq!(dates, vec![date(2024, 3, 4), date(2024, 3, 11), date(2024, 3, 18)]);

    let later = expand_occurrences_in_month(date(2024, 1, 1), &rule, Some(end), 2024, 4).unwrap();
    assert!(later.is_empty());
}

#[test]
fn resolver_and_expander_walk_the_same_sequence() {
    let rule = RecurrenceRule::monthly().with_interval(2).with_day_of_month(30);
    let start = date(2023, 12, 30);
    let from_expander = expand_occurrences_in_month(start, &rule, None, 2024, 2).unwrap();
    assert_eq!(from_expander, vec![date(2024, 2, 29)]);
    let from_resolver = resolve_next_occurrence(start, &rule, date(2024, 2, 1)).unwrap();
    assert_eq!(from_resolver, date(2024, 2, 29));
}

fn any_rule() -> impl Strategy<Value = RecurrenceRule> {
    let frequency = prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just(Frequency::Yearly),
    ];
    (
        frequency,
        proptest::option::of(1u32..=12),
        proptest::option::of(0u32..=6),
        proptest::option::of(1u32..=31),
        proptest::option::of(1u32..=12),
    )
        .prop_map(|(frequency, interval, dow, dom, moy)| {
            let mut rule = RecurrenceRule::new(frequency);
            if let Some(value) = interval {
                rule = rule.with_interval(value);
            }
            if let Some(value) = dow {
                rule = rule.with_day_of_week(value);
            }
            if let Some(value) = dom {
                rule = rule.with_day_of_month(value);
            }
            if let Some(value) = moy {
                rule = rule.with_month_of_year(value);
            }
            rule
        })
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        let last = finance_recurrence::recurrence::days_in_month(y, m);
        NaiveDate::from_ymd_opt(y, m, d.min(last)).unwrap()
    })
}

proptest! {
    #[test]
    fn step_strictly_increases(rule in any_rule(), from in any_date()) {
        let next = step(from, &rule).unwrap();
        prop_assert!(next > from);
    }

    #[test]
    fn expansion_is_idempotent_and_in_window(
        rule in any_rule(),
        start in any_date(),
        month in 1u32..=12,
    ) {
        let year = start.year() + 1;
        let first = expand_occurrences_in_month(start, &rule, None, year, month).unwrap();
        let second = expand_occurrences_in_month(start, &rule, None, year, month).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|d| d.year() == year && d.month() == month));
        prop_assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn resolved_date_is_after_reference(
        rule in any_rule(),
        start in any_date(),
        offset in 0i64..2000,
    ) {
        let reference = start + chrono::Duration::days(offset);
        let next = resolve_next_occurrence(start, &rule, reference).unwrap();
        prop_assert!(next > reference);
        prop_assert_eq!(next, resolve_next_occurrence(start, &rule, reference).unwrap());
    }
}
