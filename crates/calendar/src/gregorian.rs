//! Proleptic Gregorian calendar arithmetic.
//!
//! Everything here works on plain integers and routes through the
//! *ordinal day*: day 1 is 0001-01-01 and the count increases by one per
//! calendar day with no gaps. The functions assume already-validated
//! `(year, month, day)` input; validation lives in [`Date::new`](crate::Date::new).

/// Smallest representable year.
pub const MIN_YEAR: i32 = 1;

/// Largest representable year.
pub const MAX_YEAR: i32 = 9999;

/// Ordinal of 9999-12-31.
pub const MAX_ORDINAL: i32 = 3_652_059;

/// Ordinal of 1970-01-01, the POSIX epoch.
pub const EPOCH_ORDINAL: i32 = 719_163;

pub(crate) const DAYS_IN_400_YEARS: i32 = 146_097;
pub(crate) const DAYS_IN_100_YEARS: i32 = 36_524;
pub(crate) const DAYS_IN_4_YEARS: i32 = 1_461;

/// Number of days in each month of a common year (index 0 unused, index 1 = January).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in a common year preceding the first of each month (index 0 unused).
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Returns `true` if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns 366 for leap years and 365 otherwise.
pub fn days_in_year(year: i32) -> u16 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in `month` of `year`.
///
/// `month` must be in 1..=12.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month), "month {month} out of range");
    if month == 2 && is_leap(year) {
        29
    } else {
        DAYS_PER_MONTH[month as usize]
    }
}

/// Number of days strictly before January 1 of `year`.
///
/// Closed form over the leap-year density, so it costs the same for every
/// year. Years below 1 are handled with floor division and give negative
/// counts.
pub fn days_before_year(year: i32) -> i32 {
    let y = year - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// Number of days in `year` preceding the first day of `month`.
pub fn days_before_month(year: i32, month: u8) -> u16 {
    debug_assert!((1..=12).contains(&month), "month {month} out of range");
    let leap_day = u16::from(month > 2 && is_leap(year));
    DAYS_BEFORE_MONTH[month as usize] + leap_day
}

/// 1-based day of the year (`1..=366`).
pub fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    days_before_month(year, month) + u16::from(day)
}

/// Converts a valid `(year, month, day)` to its ordinal day.
pub fn ymd_to_ordinal(year: i32, month: u8, day: u8) -> i32 {
    days_before_year(year) + i32::from(days_before_month(year, month)) + i32::from(day)
}

/// Converts an ordinal day back to `(year, month, day)`.
///
/// Inverts [`days_before_year`] through the 400/100/4/1-year cycle
/// decomposition, then walks the month table.
pub fn ordinal_to_ymd(ordinal: i32) -> (i32, u8, u8) {
    let n = ordinal - 1;
    let n400 = n.div_euclid(DAYS_IN_400_YEARS);
    let n = n.rem_euclid(DAYS_IN_400_YEARS);

    // The last day of a 400-year cycle would give n100 == 4 (and likewise
    // n1 == 4 for the last day of a 4-year cycle); both belong to the
    // preceding leap year, which the clamp keeps.
    let n100 = (n / DAYS_IN_100_YEARS).min(3);
    let n = n - n100 * DAYS_IN_100_YEARS;
    let n4 = n / DAYS_IN_4_YEARS;
    let n = n - n4 * DAYS_IN_4_YEARS;
    let n1 = (n / 365).min(3);
    let day_index = n - n1 * 365;

    let year = n400 * 400 + n100 * 100 + n4 * 4 + n1 + 1;
    let mut month = 12u8;
    while i32::from(days_before_month(year, month)) > day_index {
        month -= 1;
    }
    let day = day_index - i32::from(days_before_month(year, month)) + 1;
    (year, month, day as u8)
}

/// Day of the week for an ordinal day, Monday = 0 through Sunday = 6.
pub fn weekday_from_ordinal(ordinal: i32) -> u8 {
    // Ordinal 1 (0001-01-01) is a Monday.
    (ordinal + 6).rem_euclid(7) as u8
}

/// Day of the week for a valid date, Monday = 0 through Sunday = 6.
pub fn weekday(year: i32, month: u8, day: u8) -> u8 {
    weekday_from_ordinal(ymd_to_ordinal(year, month, day))
}

/// Ordinal of the Monday that starts ISO week 1 of `year`.
fn iso_week1_monday(year: i32) -> i32 {
    const THURSDAY: i32 = 3;
    let first_day = ymd_to_ordinal(year, 1, 1);
    let first_weekday = i32::from(weekday_from_ordinal(first_day));
    let monday = first_day - first_weekday;
    if first_weekday > THURSDAY {
        monday + 7
    } else {
        monday
    }
}

/// ISO-8601 calendar triple `(iso_year, week, iso_weekday)` for a valid date.
///
/// Week 1 is the week containing the year's first Thursday; `iso_weekday`
/// runs from 1 (Monday) to 7 (Sunday).
pub fn iso_calendar(year: i32, month: u8, day: u8) -> (i32, u8, u8) {
    let today = ymd_to_ordinal(year, month, day);
    let mut iso_year = year;
    let mut week1 = iso_week1_monday(iso_year);
    if today < week1 {
        iso_year -= 1;
        week1 = iso_week1_monday(iso_year);
    } else if today >= iso_week1_monday(iso_year + 1) {
        iso_year += 1;
        week1 = iso_week1_monday(iso_year);
    }
    let offset = today - week1;
    (iso_year, (offset / 7 + 1) as u8, (offset % 7 + 1) as u8)
}
