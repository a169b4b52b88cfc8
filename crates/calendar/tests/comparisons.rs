use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use almanac_calendar::{CalendarError, Date, DateTime, FixedOffset, Temporal, Time};

#[test]
fn dates_key_a_map() {
    let mut holidays = HashMap::new();
    holidays.insert(Date::new(2024, 12, 25).unwrap(), "christmas");
    let lookup = Date::from_isoformat("2024-12-25").unwrap();
    assert_eq!(holidays.get(&lookup), Some(&"christmas"));
}

#[test]
fn aware_datetimes_hash_by_instant() {
    let wall = DateTime::new(2020, 1, 1, 12, 0, 0, 0).unwrap();
    let a = wall.with_offset(FixedOffset::east(2, 0).unwrap());
    let b = DateTime::new(2020, 1, 1, 10, 0, 0, 0)
        .unwrap()
        .with_offset(FixedOffset::UTC);
    assert_eq!(a, b);
    let set: HashSet<DateTime> = [a, b, wall].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn naive_and_aware_never_equal_and_never_ordered() {
    let naive = DateTime::new(2020, 1, 1, 0, 0, 0, 0).unwrap();
    let aware = naive.with_offset(FixedOffset::UTC);
    assert_ne!(naive, aware);
    assert_eq!(
        naive.try_cmp(&aware).unwrap_err(),
        CalendarError::MixedAwareness { op: "compare" }
    );
    assert_eq!(naive.partial_cmp(&aware), None);
}

#[test]
fn sorting_aware_values_uses_utc() {
    let make = |h: u8, off: i64| {
        DateTime::new(2020, 1, 1, h, 0, 0, 0)
            .unwrap()
            .with_offset(FixedOffset::east(off, 0).unwrap())
    };
    let mut values = vec![make(12, 5), make(9, 0), make(4, -3)];
    values.sort_by(|a, b| a.try_cmp(b).unwrap());
    // 07:00Z, 07:00Z, 09:00Z
    assert_eq!(values[2], make(9, 0));
    assert_eq!(values[0].try_cmp(&values[1]).unwrap(), Ordering::Equal);
}

#[test]
fn times_compare_like_datetimes() {
    let a = Time::new(12, 0, 0, 0).unwrap().with_offset(FixedOffset::east(1, 0).unwrap());
    let b = Time::new(11, 30, 0, 0).unwrap().with_offset(FixedOffset::UTC);
    assert!(a < b);
    assert!(Time::MIN < Time::MAX);
}

#[test]
fn date_against_datetime_via_temporal() {
    let d: Temporal = Date::new(2000, 1, 1).unwrap().into();
    let dt: Temporal = DateTime::new(2000, 1, 1, 0, 0, 0, 0).unwrap().into();
    assert_ne!(d, dt);
    assert!(matches!(
        d.try_cmp(&dt).unwrap_err(),
        CalendarError::Incomparable { .. }
    ));
}

#[test]
fn extremes_order() {
    assert!(Date::MIN < Date::MAX);
    assert!(DateTime::MIN < DateTime::MAX);
    assert!(almanac_calendar::Duration::MIN < almanac_calendar::Duration::MAX);
}
