use almanac_calendar::gregorian::{
    days_in_month, days_in_year, is_leap, ordinal_to_ymd, weekday_from_ordinal, ymd_to_ordinal,
};
use almanac_calendar::{CalendarError, Date, MAX_ORDINAL, MAX_YEAR, MIN_YEAR};

#[test]
fn ymd_ordinal_roundtrip_full_400_year_cycle() {
    let mut expected = ymd_to_ordinal(1601, 1, 1);
    for year in 1601..=2000 {
        for month in 1..=12u8 {
            for day in 1..=days_in_month(year, month) {
                let ordinal = ymd_to_ordinal(year, month, day);
                assert_eq!(ordinal, expected, "{year}-{month:02}-{day:02}");
                assert_eq!(
                    ordinal_to_ymd(ordinal),
                    (year, month, day),
                    "roundtrip failed for ordinal {ordinal}"
                );
                expected += 1;
            }
        }
    }
}

#[test]
fn ordinal_roundtrip_at_range_edges() {
    for ordinal in (1..=2_000).chain(MAX_ORDINAL - 2_000..=MAX_ORDINAL) {
        let (y, m, d) = ordinal_to_ymd(ordinal);
        assert_eq!(ymd_to_ordinal(y, m, d), ordinal);
    }
}

#[test]
fn year_lengths_sum_to_max_ordinal() {
    let total: i32 = (MIN_YEAR..=MAX_YEAR).map(|y| i32::from(days_in_year(y))).sum();
    assert_eq!(total, MAX_ORDINAL);
}

#[test]
fn weekday_advances_by_one_per_ordinal() {
    for ordinal in 1..=1_000 {
        assert_eq!(
            weekday_from_ordinal(ordinal + 1),
            (weekday_from_ordinal(ordinal) + 1) % 7
        );
    }
}

#[test]
fn leap_day_boundaries() {
    assert!(Date::new(2000, 2, 29).is_ok());
    for year in [1900, 2001, 2100] {
        assert!(!is_leap(year));
        assert!(matches!(
            Date::new(year, 2, 29).unwrap_err(),
            CalendarError::InvalidDay { day: 29, .. }
        ));
    }
    assert!(Date::new(2000, 2, 30).is_err());
}

#[test]
fn year_bounds() {
    assert!(Date::new(1, 1, 1).is_ok());
    assert!(Date::new(9999, 12, 31).is_ok());
    assert!(Date::new(0, 1, 1).is_err());
    assert!(Date::new(10_000, 1, 1).is_err());
}

#[test]
fn date_ordinal_roundtrip_sampled() {
    for ordinal in (1..=MAX_ORDINAL).step_by(997) {
        let date = Date::from_ordinal(ordinal).unwrap();
        assert_eq!(date.to_ordinal(), ordinal);
        assert_eq!(date.weekday(), weekday_from_ordinal(ordinal));
    }
}

#[test]
fn iso_calendar_roundtrip_sampled() {
    for ordinal in (1..=MAX_ORDINAL).step_by(1_009) {
        let date = Date::from_ordinal(ordinal).unwrap();
        let week = date.iso_calendar();
        if let Ok(back) = Date::from_iso_calendar(week.year, week.week, week.weekday) {
            assert_eq!(back, date);
        }
        assert_eq!(week.weekday, date.iso_weekday());
    }
}
