use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use lunchping::availability::{
    classify, AvailabilityStatus, HolidaySet, OpeningHours, WeeklySchedule,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid monday")
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).expect("valid time")
}

fn nine_to_ten() -> WeeklySchedule {
    WeeklySchedule::builder()
        .every_day(OpeningHours::parse("09:00", "22:00").expect("valid hours"))
        .build()
}

#[test]
fn reference_moments_classify_as_documented() {
    let schedule = nine_to_ten();
    let holidays = HolidaySet::new();
    let cases = [
        ((8, 35), AvailabilityStatus::OpeningSoon),
        ((8, 0), AvailabilityStatus::Closed),
        ((8, 30), AvailabilityStatus::OpeningSoon),
        ((9, 0), AvailabilityStatus::Open),
        ((12, 0), AvailabilityStatus::Open),
        ((21, 29), AvailabilityStatus::Open),
        ((21, 30), AvailabilityStatus::ClosingSoon),
        ((21, 45), AvailabilityStatus::ClosingSoon),
        ((22, 0), AvailabilityStatus::Closed),
        ((23, 0), AvailabilityStatus::Closed),
    ];

    for ((hour, minute), expected) in cases {
        assert_eq!(
            classify(&schedule, &holidays, at(monday(), hour, minute)),
            expected,
            "{hour:02}:{minute:02}"
        );
    }
}

#[test]
fn every_minute_gets_exactly_one_status() {
    let schedule = nine_to_ten();
    let holidays = HolidaySet::new();
    let start = at(monday(), 0, 0);

    let mut counts = std::collections::HashMap::new();
    for offset in 0..1440 {
        let now = start + Duration::minutes(offset);
        *counts
            .entry(classify(&schedule, &holidays, now))
            .or_insert(0usize) += 1;
    }

    assert_eq!(counts.values().sum::<usize>(), 1440);
    assert_eq!(counts[&AvailabilityStatus::OpeningSoon], 30);
    assert_eq!(counts[&AvailabilityStatus::ClosingSoon], 30);
    assert_eq!(counts[&AvailabilityStatus::Open], 13 * 60 - 30);
    assert!(!counts.contains_key(&AvailabilityStatus::Holiday));
}

#[test]
fn holiday_wins_over_every_other_rule() {
    let schedule = nine_to_ten();
    let holidays: HolidaySet = [monday()].into_iter().collect();

    for (hour, minute) in [(0, 0), (8, 45), (12, 0), (21, 50), (23, 59)] {
        assert_eq!(
            classify(&schedule, &holidays, at(monday(), hour, minute)),
            AvailabilityStatus::Holiday
        );
    }
    let tuesday = monday().succ_opt().expect("valid date");
    assert_eq!(
        classify(&schedule, &holidays, at(tuesday, 12, 0)),
        AvailabilityStatus::Open
    );
}

#[test]
fn regular_closing_day_is_closed_all_day() {
    let schedule = WeeklySchedule::builder()
        .every_day(OpeningHours::parse("11:00", "20:00").expect("valid hours"))
        .closed_on(Weekday::Mon)
        .build();

    for hour in [0, 10, 12, 19, 23] {
        assert_eq!(
            classify(&schedule, &HolidaySet::new(), at(monday(), hour, 45)),
            AvailabilityStatus::Closed
        );
    }
}

#[test]
fn short_shifts_prefer_opening_soon() {
    let schedule = WeeklySchedule::builder()
        .day(Weekday::Mon, OpeningHours::parse("12:00", "12:20").expect("valid hours"))
        .build();
    let holidays = HolidaySet::new();

    assert_eq!(
        classify(&schedule, &holidays, at(monday(), 11, 55)),
        AvailabilityStatus::OpeningSoon
    );
    assert_eq!(
        classify(&schedule, &holidays, at(monday(), 12, 5)),
        AvailabilityStatus::ClosingSoon
    );
}

#[test]
fn classification_is_a_pure_function() {
    let schedule = nine_to_ten();
    let holidays = HolidaySet::parse(["2026-10-09"]).expect("valid holidays");
    let now = at(monday(), 21, 40);

    let first = classify(&schedule, &holidays, now);
    let second = classify(&schedule, &holidays, now);
    assert_eq!(first, second);
}
