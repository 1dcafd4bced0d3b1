// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Wall-clock Time
//!
//! Bookings are evaluated one prison day at a time, so every time value in
//! the engine is a time of day (`chrono::NaiveTime`) and every duration a
//! `chrono::TimeDelta`. Shifting never wraps past midnight: an operation that
//! would leave the day yields `None`.
//!
//! Weekly usage schedules are expressed in terms of [`WeekdayRange`], an
//! inclusive Monday-first range of days.

use crate::primitives::Interval;
use chrono::{NaiveTime, TimeDelta, Timelike, Weekday};
use std::fmt;

/// A non-empty `[start, end)` range of wall-clock time within one day.
pub type TimeInterval = Interval<NaiveTime>;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// The earliest representable time of day, `00:00`.
#[inline]
pub fn start_of_day() -> NaiveTime {
    NaiveTime::default()
}

/// The latest representable time of day, one nanosecond before midnight.
#[inline]
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .expect("23:59:59.999999999 is a valid time of day")
}

/// Nanoseconds elapsed since midnight.
#[inline]
pub fn nanos_of_day(t: NaiveTime) -> i64 {
    // Leap-second nanos (>= 1e9) are folded into the last nanosecond.
    let nanos = t.nanosecond().min(999_999_999);
    i64::from(t.num_seconds_from_midnight()) * NANOS_PER_SECOND + i64::from(nanos)
}

/// The time of day that lies `nanos` after midnight, if it is inside the day.
#[inline]
pub fn time_from_nanos(nanos: i64) -> Option<NaiveTime> {
    if !(0..SECONDS_PER_DAY * NANOS_PER_SECOND).contains(&nanos) {
        return None;
    }
    let secs = u32::try_from(nanos / NANOS_PER_SECOND).ok()?;
    let sub = u32::try_from(nanos % NANOS_PER_SECOND).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, sub)
}

/// Moves `t` by `delta`, refusing to cross midnight in either direction.
///
/// ```
/// use chrono::{NaiveTime, TimeDelta};
/// use vlb_core::time::shift_time;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(
///     shift_time(nine, TimeDelta::minutes(-30)),
///     NaiveTime::from_hms_opt(8, 30, 0)
/// );
/// assert_eq!(shift_time(nine, TimeDelta::hours(-10)), None);
/// ```
#[inline]
pub fn shift_time(t: NaiveTime, delta: TimeDelta) -> Option<NaiveTime> {
    let (shifted, wrapped_secs) = t.overflowing_add_signed(delta);
    (wrapped_secs == 0).then_some(shifted)
}

/// Moves both ends of `interval` by `delta`, keeping it within the day.
#[inline]
pub fn shift_interval(interval: &TimeInterval, delta: TimeDelta) -> Option<TimeInterval> {
    interval.try_map(|t| shift_time(t, delta))
}

/// Returned when a weekday range would end before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("invalid weekday range: {start} is after {end}")]
pub struct InvalidWeekdayRangeError {
    start: Weekday,
    end: Weekday,
}

impl InvalidWeekdayRangeError {
    #[inline]
    pub fn start(&self) -> Weekday {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Weekday {
        self.end
    }
}

/// An inclusive range of days within a Monday-first week.
///
/// Ranges never wrap around the weekend: `Sat..=Mon` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayRange {
    start: Weekday,
    end: Weekday,
}

impl WeekdayRange {
    /// Creates the range `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWeekdayRangeError`] if `end` comes before `start`.
    pub fn try_new(start: Weekday, end: Weekday) -> Result<Self, InvalidWeekdayRangeError> {
        if start.num_days_from_monday() <= end.num_days_from_monday() {
            Ok(Self { start, end })
        } else {
            Err(InvalidWeekdayRangeError { start, end })
        }
    }

    /// A range covering a single day.
    #[inline]
    pub fn single(day: Weekday) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    #[inline]
    pub fn start(&self) -> Weekday {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Weekday {
        self.end
    }

    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        let d = day.num_days_from_monday();
        self.start.num_days_from_monday() <= d && d <= self.end.num_days_from_monday()
    }

    /// Checks whether both ranges share at least one day.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start.num_days_from_monday() <= other.end.num_days_from_monday()
            && other.start.num_days_from_monday() <= self.end.num_days_from_monday()
    }
}

impl fmt::Display for WeekdayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_bounds() {
        assert_eq!(start_of_day(), hm(0, 0));
        assert!(end_of_day() > hm(23, 59));
        assert_eq!(shift_time(end_of_day(), TimeDelta::nanoseconds(1)), None);
    }

    #[test]
    fn test_nanos_of_day_is_exact() {
        let t = hm(13, 45);
        assert_eq!(nanos_of_day(t), (13 * 60 + 45) * 60 * NANOS_PER_SECOND);
        assert_eq!(time_from_nanos(nanos_of_day(t)), Some(t));

        let odd = NaiveTime::from_hms_nano_opt(9, 30, 0, 500_001).unwrap();
        assert_eq!(nanos_of_day(odd), (9 * 3600 + 30 * 60) * NANOS_PER_SECOND + 500_001);
        assert_eq!(time_from_nanos(nanos_of_day(odd)), Some(odd));
        assert_eq!(time_from_nanos(nanos_of_day(end_of_day())), Some(end_of_day()));

        assert_eq!(time_from_nanos(-1), None);
        assert_eq!(time_from_nanos(SECONDS_PER_DAY * NANOS_PER_SECOND), None);
    }

    #[test]
    fn test_shift_time_refuses_to_wrap() {
        assert_eq!(shift_time(hm(23, 30), TimeDelta::minutes(29)), Some(hm(23, 59)));
        assert_eq!(shift_time(hm(23, 30), TimeDelta::minutes(30)), None);
        assert_eq!(shift_time(hm(0, 10), TimeDelta::minutes(-10)), Some(hm(0, 0)));
        assert_eq!(shift_time(hm(0, 10), TimeDelta::minutes(-11)), None);
    }

    #[test]
    fn test_shift_interval() {
        let iv = TimeInterval::try_new(hm(9, 0), hm(10, 0)).unwrap();
        let moved = shift_interval(&iv, TimeDelta::minutes(90)).unwrap();
        assert_eq!(moved.start(), hm(10, 30));
        assert_eq!(moved.end(), hm(11, 30));
        assert!(shift_interval(&iv, TimeDelta::hours(14)).is_none());
    }

    #[test]
    fn test_weekday_range() {
        let weekdays = WeekdayRange::try_new(Weekday::Mon, Weekday::Fri).unwrap();
        assert!(weekdays.contains(Weekday::Mon));
        assert!(weekdays.contains(Weekday::Fri));
        assert!(!weekdays.contains(Weekday::Sat));

        let err = WeekdayRange::try_new(Weekday::Sat, Weekday::Mon).unwrap_err();
        assert_eq!(err.start(), Weekday::Sat);

        let weekend = WeekdayRange::try_new(Weekday::Sat, Weekday::Sun).unwrap();
        assert!(!weekdays.intersects(&weekend));
        assert!(weekdays.intersects(&WeekdayRange::single(Weekday::Fri)));
        assert_eq!(weekdays.to_string(), "Mon-Fri");
        assert_eq!(WeekdayRange::single(Weekday::Tue).to_string(), "Tue");
    }
}
