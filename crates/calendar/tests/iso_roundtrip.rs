use almanac_calendar::{
    CalendarError, Date, DateTime, Duration, ErrorKind, FixedOffset, IsoFormat, Time, Timespec,
};

fn offsets() -> Vec<Option<FixedOffset>> {
    let mut out = vec![None, Some(FixedOffset::UTC)];
    for delta in [
        Duration::from_hours(5).unwrap(),
        Duration::from_hours(2).unwrap(),
        Duration::from_minutes(6 * 60 + 27).unwrap(),
        Duration::new(0, 12 * 3_600 + 32 * 60 + 30, 0).unwrap(),
        Duration::new(0, 2 * 3_600 + 4 * 60 + 9, 123_456).unwrap(),
    ] {
        out.push(Some(FixedOffset::new(delta).unwrap()));
        out.push(Some(FixedOffset::new(-delta).unwrap()));
    }
    out
}

fn with(dt: DateTime, offset: Option<FixedOffset>) -> DateTime {
    match offset {
        Some(offset) => dt.with_offset(offset),
        None => dt,
    }
}

#[test]
fn datetime_roundtrip() {
    let dates = [(1, 1, 1), (1900, 1, 1), (2004, 11, 12), (2017, 5, 30), (9999, 12, 31)];
    let times = [
        (0, 0, 0, 0),
        (0, 0, 0, 241_000),
        (0, 0, 0, 234_567),
        (12, 30, 45, 234_567),
        (23, 59, 59, 999_999),
    ];
    for (y, mo, d) in dates {
        for (h, mi, s, us) in times {
            for offset in offsets() {
                let dt = with(DateTime::new(y, mo, d, h, mi, s, us).unwrap(), offset);
                for sep in ['T', ' ', '+', '-', 'ᛇ', '🐍'] {
                    let text = dt.isoformat_with(&IsoFormat::new().with_separator(sep));
                    let back: DateTime = text.parse().unwrap();
                    assert_eq!(back, dt, "{text}");
                    assert_eq!(back.offset(), dt.offset(), "{text}");
                }
            }
        }
    }
}

#[test]
fn timespec_roundtrip() {
    let base = DateTime::new(2009, 12, 4, 8, 17, 45, 123_000).unwrap();
    for offset in offsets() {
        let dt = with(base, offset);
        let cases = [
            (Timespec::Hours, (8, 0, 0, 0)),
            (Timespec::Minutes, (8, 17, 0, 0)),
            (Timespec::Seconds, (8, 17, 45, 0)),
            (Timespec::Milliseconds, (8, 17, 45, 123_000)),
            (Timespec::Microseconds, (8, 17, 45, 123_000)),
        ];
        for (timespec, (h, m, s, us)) in cases {
            let text = dt.isoformat_with(&IsoFormat::new().with_timespec(timespec));
            let expected = with(DateTime::new(2009, 12, 4, h, m, s, us).unwrap(), offset);
            assert_eq!(DateTime::from_isoformat(&text).unwrap(), expected, "{text}");
        }
    }
}

#[test]
fn date_and_time_roundtrip() {
    for ordinal in (1..=almanac_calendar::MAX_ORDINAL).step_by(4_999) {
        let date = Date::from_ordinal(ordinal).unwrap();
        assert_eq!(Date::from_isoformat(&date.isoformat()).unwrap(), date);
    }
    for offset in offsets() {
        for (h, m, s, us) in [(0, 0, 0, 0), (4, 5, 1, 123), (23, 59, 59, 999_999)] {
            let mut time = Time::new(h, m, s, us).unwrap();
            if let Some(offset) = offset {
                time = time.with_offset(offset);
            }
            assert_eq!(time.to_string().parse::<Time>().unwrap(), time);
        }
    }
}

#[test]
fn formatting_examples() {
    let t = DateTime::new(1, 2, 3, 4, 5, 1, 123).unwrap();
    assert_eq!(t.isoformat(), "0001-02-03T04:05:01.000123");
    assert_eq!(t.to_string(), "0001-02-03 04:05:01.000123");
    assert_eq!(
        t.isoformat_with(&IsoFormat::new().with_separator('\0')),
        "0001-02-03\u{0}04:05:01.000123"
    );
    assert_eq!(
        t.isoformat_with(&IsoFormat::new().with_separator(' ').with_timespec(Timespec::Minutes)),
        "0001-02-03 04:05"
    );

    let t = DateTime::new(1, 2, 3, 4, 5, 1, 999_500)
        .unwrap()
        .with_offset(FixedOffset::UTC);
    assert_eq!(
        t.isoformat_with(&IsoFormat::new().with_timespec(Timespec::Milliseconds)),
        "0001-02-03T04:05:01.999+00:00"
    );

    let odd = FixedOffset::named(Duration::from_seconds(16).unwrap(), "XXX").unwrap();
    let t = DateTime::new(2, 3, 2, 0, 0, 0, 0).unwrap().with_offset(odd);
    assert_eq!(t.isoformat(), "0002-03-02T00:00:00+00:00:16");
    assert_eq!(t.tzname().as_deref(), Some("XXX"));
}

#[test]
fn rejections_are_parse_errors() {
    for text in ["2009-04-19T12:30:45.1234567", "99-09-19", "2009-04-19T12:30:45+24:00"] {
        let err = DateTime::from_isoformat(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse, "{text}");
        assert!(err.to_string().contains(&format!("{text:?}")));
    }
    assert!(matches!(
        Date::from_isoformat("1999-13-19").unwrap_err(),
        CalendarError::InvalidIsoFormat { .. }
    ));
}
