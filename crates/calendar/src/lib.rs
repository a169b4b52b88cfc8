//! # almanac-calendar
//!
//! Date, time, date-time, duration and fixed-offset values for the
//! proleptic Gregorian calendar, years 1 through 9999, at microsecond
//! resolution.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(year, month, day)"] -->|"ymd_to_ordinal()"| B["ordinal day"]
//!     B -->|"ordinal_to_ymd()"| A
//!     B --> C["Date"]
//!     C --> E["DateTime"]
//!     D["Time (+ FixedOffset)"] --> E
//!     F["Duration"] -->|"+ / -"| C
//!     F -->|"+ / -"| E
//!     E -->|"timestamp()"| G["POSIX seconds"]
//!     G -->|"from_timestamp()"| E
//!     H["ISO-8601 text"] <-->|"iso codec"| C
//!     H <-->|"iso codec"| D
//!     H <-->|"iso codec"| E
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use almanac_calendar::{Date, DateTime, Duration, FixedOffset};
//!
//! // Validated construction
//! let date = Date::new(2000, 2, 29).unwrap();
//! assert!(Date::new(1900, 2, 29).is_err());
//!
//! // Duration arithmetic carries across month and year ends
//! let t = DateTime::new(2002, 12, 31, 23, 59, 59, 0).unwrap();
//! let next = t + Duration::from_seconds(1).unwrap();
//! assert_eq!(next.year(), 2003);
//!
//! // Aware values compare and subtract as UTC instants
//! let ny = t.with_offset(FixedOffset::east(-5, 0).unwrap());
//! let berlin = t.with_offset(FixedOffset::east(1, 0).unwrap());
//! assert_eq!((ny - berlin).unwrap(), Duration::from_hours(6).unwrap());
//!
//! // ISO-8601 round trip
//! let text = ny.isoformat();
//! assert_eq!(text.parse::<DateTime>().unwrap(), ny);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `gregorian` | Ordinal-day conversion, leap years, month lengths, weekdays |
//! | `duration` | Normalized signed durations |
//! | `date` | Calendar dates |
//! | `offset` | Fixed UTC offsets |
//! | `time` | Time of day, naive or aware |
//! | `datetime` | Combined date-time, timestamps |
//! | `iso` | ISO-8601 formatting and strict parsing |
//! | `config` | ISO output options |
//! | `clock` | Clock and local-zone collaborator traits |
//! | `temporal` | Capability traits and the kind-erased [`Temporal`] |
//! | `error` | Error types |

mod clock;
mod config;
mod date;
mod datetime;
mod duration;
mod error;
pub mod gregorian;
mod iso;
mod offset;
mod temporal;
mod time;

pub use clock::{Clock, ClockReading, LocalZone, SystemClock};
pub use config::{IsoFormat, Timespec};
pub use date::{Date, DateReplace, IsoWeekDate, TimeTuple};
pub use datetime::{DateTime, DateTimeReplace};
pub use duration::{Duration, DurationParts, MAX_DURATION_DAYS};
pub use error::{CalendarError, ErrorKind};
pub use gregorian::{EPOCH_ORDINAL, MAX_ORDINAL, MAX_YEAR, MIN_YEAR};
pub use offset::FixedOffset;
pub use temporal::{CivilDate, PointInTime, Temporal};
pub use time::{Time, TimeReplace};
