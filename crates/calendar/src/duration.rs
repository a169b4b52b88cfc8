//! Signed durations normalized to `(days, seconds, microseconds)`.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::CalendarError;

pub(crate) const MICROS_PER_SECOND: i64 = 1_000_000;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const MICROS_PER_DAY: i64 = SECONDS_PER_DAY * MICROS_PER_SECOND;

/// Largest magnitude of the `days` field of a [`Duration`].
pub const MAX_DURATION_DAYS: i32 = 999_999_999;

/// A signed span of time with microsecond resolution.
///
/// Always stored in canonical form: `0 <= seconds < 86400`,
/// `0 <= microseconds < 1_000_000`, and the sign lives entirely in `days`.
/// Two durations are equal exactly when their canonical triples are equal,
/// and the derived ordering over `(days, seconds, microseconds)` is the
/// ordering of their total lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    days: i32,
    seconds: u32,
    microseconds: u32,
}

/// Unnormalized duration components, summed by [`Duration::from_parts`].
///
/// Any combination of signs is allowed.
///
/// ```
/// use almanac_calendar::{Duration, DurationParts};
///
/// let d = Duration::from_parts(DurationParts {
///     days: 1,
///     hours: 2,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(d, Duration::from_hours(26).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationParts {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub microseconds: i64,
}

impl DurationParts {
    fn total_microseconds(&self) -> i128 {
        let us = |n: i64, scale: i64| i128::from(n) * i128::from(scale);
        us(self.weeks, 7 * MICROS_PER_DAY)
            + us(self.days, MICROS_PER_DAY)
            + us(self.hours, 3_600 * MICROS_PER_SECOND)
            + us(self.minutes, 60 * MICROS_PER_SECOND)
            + us(self.seconds, MICROS_PER_SECOND)
            + us(self.milliseconds, 1_000)
            + i128::from(self.microseconds)
    }
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self {
        days: 0,
        seconds: 0,
        microseconds: 0,
    };

    /// The most negative representable duration, `-999999999` days.
    pub const MIN: Self = Self {
        days: -MAX_DURATION_DAYS,
        seconds: 0,
        microseconds: 0,
    };

    /// The largest representable duration.
    pub const MAX: Self = Self {
        days: MAX_DURATION_DAYS,
        seconds: 86_399,
        microseconds: 999_999,
    };

    /// The smallest positive difference between two durations.
    pub const RESOLUTION: Self = Self {
        days: 0,
        seconds: 0,
        microseconds: 1,
    };

    /// Creates a duration from days, seconds and microseconds of any sign.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DurationOverflow`] if the normalized `days`
    /// field would exceed ±999999999.
    pub fn new(days: i64, seconds: i64, microseconds: i64) -> Result<Self, CalendarError> {
        Self::from_parts(DurationParts {
            days,
            seconds,
            microseconds,
            ..Default::default()
        })
    }

    /// Sums every component to total microseconds and normalizes.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DurationOverflow`] if the result is out of range.
    pub fn from_parts(parts: DurationParts) -> Result<Self, CalendarError> {
        Self::from_total_microseconds(parts.total_microseconds())
    }

    /// Creates a duration of `n` weeks.
    pub fn from_weeks(n: i64) -> Result<Self, CalendarError> {
        Self::from_parts(DurationParts {
            weeks: n,
            ..Default::default()
        })
    }

    /// Creates a duration of `n` days.
    pub fn from_days(n: i64) -> Result<Self, CalendarError> {
        Self::new(n, 0, 0)
    }

    /// Creates a duration of `n` hours.
    pub fn from_hours(n: i64) -> Result<Self, CalendarError> {
        Self::from_parts(DurationParts {
            hours: n,
            ..Default::default()
        })
    }

    /// Creates a duration of `n` minutes.
    pub fn from_minutes(n: i64) -> Result<Self, CalendarError> {
        Self::from_parts(DurationParts {
            minutes: n,
            ..Default::default()
        })
    }

    /// Creates a duration of `n` seconds.
    pub fn from_seconds(n: i64) -> Result<Self, CalendarError> {
        Self::new(0, n, 0)
    }

    /// Creates a duration of `n` milliseconds.
    pub fn from_millis(n: i64) -> Result<Self, CalendarError> {
        Self::from_parts(DurationParts {
            milliseconds: n,
            ..Default::default()
        })
    }

    /// Creates a duration of `n` microseconds.
    pub fn from_micros(n: i64) -> Result<Self, CalendarError> {
        Self::new(0, 0, n)
    }

    /// Creates a duration from fractional seconds, rounding half-to-even
    /// to the nearest microsecond.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonFinite`] for NaN or infinite input and
    /// [`CalendarError::DurationOverflow`] if the value is out of range.
    pub fn from_secs_f64(seconds: f64) -> Result<Self, CalendarError> {
        if !seconds.is_finite() {
            return Err(CalendarError::NonFinite { value: seconds });
        }
        Self::from_seconds(1)?.checked_mul_f64(seconds)
    }

    /// Whole days; callers guarantee `|days| <= MAX_DURATION_DAYS`.
    pub(crate) fn whole_days(days: i32) -> Self {
        debug_assert!(days.abs() <= MAX_DURATION_DAYS);
        Self {
            days,
            seconds: 0,
            microseconds: 0,
        }
    }

    pub(crate) fn from_total_microseconds(total: i128) -> Result<Self, CalendarError> {
        let per_day = i128::from(MICROS_PER_DAY);
        let days = total.div_euclid(per_day);
        if days.abs() > i128::from(MAX_DURATION_DAYS) {
            return Err(CalendarError::DurationOverflow);
        }
        let rem = total.rem_euclid(per_day) as i64;
        Ok(Self {
            days: days as i32,
            seconds: (rem / MICROS_PER_SECOND) as u32,
            microseconds: (rem % MICROS_PER_SECOND) as u32,
        })
    }

    /// Normalized day count; carries the sign of the whole duration.
    pub fn days(&self) -> i32 {
        self.days
    }

    /// Normalized seconds within the day (0..86400).
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Normalized microseconds within the second (0..1_000_000).
    pub fn microseconds(&self) -> u32 {
        self.microseconds
    }

    /// Exact length in microseconds.
    pub fn total_microseconds(&self) -> i128 {
        i128::from(self.days) * i128::from(MICROS_PER_DAY)
            + i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds)
    }

    /// Length in seconds as a float.
    ///
    /// Exact up to about 285 years; beyond that the microsecond digits are
    /// subject to `f64` rounding.
    pub fn total_seconds(&self) -> f64 {
        self.total_microseconds() as f64 / MICROS_PER_SECOND as f64
    }

    /// `true` for the zero duration. This is the duration's truthiness.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `true` if the duration is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.days < 0
    }

    /// Adds two durations.
    pub fn checked_add(&self, other: &Self) -> Result<Self, CalendarError> {
        Self::from_total_microseconds(self.total_microseconds() + other.total_microseconds())
    }

    /// Subtracts `other` from `self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, CalendarError> {
        Self::from_total_microseconds(self.total_microseconds() - other.total_microseconds())
    }

    /// Negates the duration. Fails for `MAX` and values near it, whose
    /// mirror lies below `MIN`.
    pub fn checked_neg(&self) -> Result<Self, CalendarError> {
        Self::from_total_microseconds(-self.total_microseconds())
    }

    /// Absolute value.
    pub fn abs(&self) -> Result<Self, CalendarError> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(*self)
        }
    }

    /// Multiplies by an integer.
    pub fn checked_mul(&self, factor: i64) -> Result<Self, CalendarError> {
        self.total_microseconds()
            .checked_mul(i128::from(factor))
            .ok_or(CalendarError::DurationOverflow)
            .and_then(Self::from_total_microseconds)
    }

    /// Multiplies by the rational `numerator / denominator`, rounding the
    /// result half-to-even to the microsecond.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DivisionByZero`] if `denominator` is zero
    /// and [`CalendarError::DurationOverflow`] if the result is out of range.
    pub fn checked_mul_ratio(&self, numerator: i64, denominator: i64) -> Result<Self, CalendarError> {
        if denominator == 0 {
            return Err(CalendarError::DivisionByZero);
        }
        let (mut num, mut den) = (i128::from(numerator), i128::from(denominator));
        if den < 0 {
            num = -num;
            den = -den;
        }
        let total = self.total_microseconds();

        // total * num / den, split so no intermediate product leaves i128:
        // num = whole * den + part, total = high * den + low.
        let (whole, part) = (num.div_euclid(den), num.rem_euclid(den));
        let (high, low) = (total.div_euclid(den), total.rem_euclid(den));
        let (carry, rem) = ((low * part).div_euclid(den), (low * part).rem_euclid(den));
        let quotient = total
            .checked_mul(whole)
            .and_then(|q| q.checked_add(high * part))
            .and_then(|q| q.checked_add(carry))
            .ok_or(CalendarError::DurationOverflow)?;
        let round_up = 2 * rem > den || (2 * rem == den && quotient.rem_euclid(2) == 1);
        let rounded = if round_up {
            quotient.checked_add(1).ok_or(CalendarError::DurationOverflow)?
        } else {
            quotient
        };
        Self::from_total_microseconds(rounded)
    }

    /// Multiplies by a float using its exact binary value, rounding the
    /// result half-to-even to the microsecond.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonFinite`] for NaN or infinite factors.
    pub fn checked_mul_f64(&self, factor: f64) -> Result<Self, CalendarError> {
        if !factor.is_finite() {
            return Err(CalendarError::NonFinite { value: factor });
        }
        let (mantissa, exponent) = decompose_f64(factor);
        let scaled = self
            .total_microseconds()
            .checked_mul(mantissa)
            .ok_or(CalendarError::DurationOverflow)?;
        if exponent >= 0 {
            let shifted = if exponent < 64 {
                scaled.checked_mul(1i128 << exponent)
            } else {
                None
            };
            match shifted {
                Some(total) => Self::from_total_microseconds(total),
                None if scaled == 0 => Ok(Self::ZERO),
                None => Err(CalendarError::DurationOverflow),
            }
        } else if -exponent >= 126 {
            // |scaled| < 2^121, so the quotient is below one half.
            Ok(Self::ZERO)
        } else {
            Self::from_total_microseconds(div_round_half_even(scaled, 1i128 << -exponent))
        }
    }

    /// Floor division by an integer.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div(&self, divisor: i64) -> Result<Self, CalendarError> {
        if divisor == 0 {
            return Err(CalendarError::DivisionByZero);
        }
        Self::from_total_microseconds(floor_div(self.total_microseconds(), divisor.into()))
    }

    /// How many whole `other`s fit in `self`, rounded toward negative infinity.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DivisionByZero`] if `other` is zero.
    pub fn div_duration(&self, other: &Self) -> Result<i128, CalendarError> {
        if other.is_zero() {
            return Err(CalendarError::DivisionByZero);
        }
        Ok(floor_div(
            self.total_microseconds(),
            other.total_microseconds(),
        ))
    }

    /// Remainder of [`div_duration`](Self::div_duration); its sign follows `other`.
    pub fn rem_duration(&self, other: &Self) -> Result<Self, CalendarError> {
        let quotient = self.div_duration(other)?;
        Self::from_total_microseconds(
            self.total_microseconds() - quotient * other.total_microseconds(),
        )
    }

    /// True division of two durations.
    pub fn ratio(&self, other: &Self) -> Result<f64, CalendarError> {
        if other.is_zero() {
            return Err(CalendarError::DivisionByZero);
        }
        Ok(self.total_microseconds() as f64 / other.total_microseconds() as f64)
    }
}

/// Division rounding toward negative infinity. Unlike `div_euclid` this
/// also floors for negative divisors.
fn floor_div(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && (n < 0) != (d < 0) {
        q - 1
    } else {
        q
    }
}

/// Integer division rounding half-to-even.
fn div_round_half_even(n: i128, d: i128) -> i128 {
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    let q = n.div_euclid(d);
    let r = n.rem_euclid(d);
    let twice = 2 * r;
    if twice > d || (twice == d && q % 2 != 0) {
        q + 1
    } else {
        q
    }
}

/// Splits a finite float into `mantissa * 2^exponent` exactly.
fn decompose_f64(value: f64) -> (i128, i32) {
    let bits = value.to_bits();
    let sign = if bits >> 63 == 0 { 1 } else { -1 };
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = (bits & ((1u64 << 52) - 1)) as i128;
    if biased == 0 {
        (sign * fraction, -1074)
    } else {
        (sign * (fraction | (1i128 << 52)), biased - 1075)
    }
}

impl fmt::Display for Duration {
    /// `[-]D day[s], H:MM:SS[.ffffff]`, with the day part omitted when zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days != 0 {
            let plural = if self.days.abs() != 1 { "s" } else { "" };
            write!(f, "{} day{plural}, ", self.days)?;
        }
        let hours = self.seconds / 3_600;
        let minutes = self.seconds % 3_600 / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")?;
        if self.microseconds != 0 {
            write!(f, ".{:06}", self.microseconds)?;
        }
        Ok(())
    }
}

impl Add for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the sum is out of range; use [`Duration::checked_add`] to handle it.
    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(&rhs)
            .expect("overflow when adding durations")
    }
}

impl Sub for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the difference is out of range.
    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(&rhs)
            .expect("overflow when subtracting durations")
    }
}

impl Neg for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics when negating a value whose mirror is out of range.
    fn neg(self) -> Duration {
        self.checked_neg().expect("overflow when negating duration")
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    /// # Panics
    ///
    /// Panics if the product is out of range.
    fn mul(self, rhs: i64) -> Duration {
        self.checked_mul(rhs)
            .expect("overflow when multiplying duration")
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;

    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}

impl Div<i64> for Duration {
    type Output = Duration;

    /// Floor division.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: i64) -> Duration {
        self.checked_div(rhs).expect("division of duration by zero")
    }
}
