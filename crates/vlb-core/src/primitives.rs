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

//! # Core Primitives
//!
//! A validated, half-open `[start, end)` interval over any ordered value.
//! Appointment legs, free periods and schedule windows are all expressed
//! in terms of [`Interval`].

use std::fmt;

/// Returned when an interval would not satisfy `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("invalid interval: start {start} is not before end {end}")]
pub struct InvalidIntervalError<T: fmt::Display> {
    start: T,
    end: T,
}

impl<T: fmt::Display + Copy> InvalidIntervalError<T> {
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T {
        self.end
    }
}

/// A non-empty half-open interval `[start, end)`.
///
/// Unlike a plain pair of bounds, an `Interval` can only be obtained through
/// [`Interval::try_new`], so every value in circulation satisfies
/// `start < end`.
///
/// # Examples
///
/// ```
/// use vlb_core::primitives::Interval;
///
/// let interval = Interval::try_new(1, 5).unwrap();
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.covers(5));
/// assert!(Interval::try_new(5, 5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T>
where
    T: PartialOrd + Copy + fmt::Display,
{
    /// Creates the interval `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIntervalError`] if `end <= start`.
    #[inline]
    pub fn try_new(start: T, end: T) -> Result<Self, InvalidIntervalError<T>> {
        if start < end {
            Ok(Self {
                start_inclusive: start,
                end_exclusive: end,
            })
        } else {
            Err(InvalidIntervalError::new(start, end))
        }
    }

    /// Applies `f` to both bounds and re-validates the result.
    ///
    /// Returns `None` if `f` fails for either bound or the mapped bounds no
    /// longer form a valid interval.
    #[inline]
    pub fn try_map<U, F>(&self, mut f: F) -> Option<Interval<U>>
    where
        U: PartialOrd + Copy + fmt::Display,
        F: FnMut(T) -> Option<U>,
    {
        let start = f(self.start_inclusive)?;
        let end = f(self.end_exclusive)?;
        Interval::try_new(start, end).ok()
    }
}

impl<T> Interval<T>
where
    T: PartialOrd + Copy,
{
    /// Returns the inclusive start.
    #[inline]
    pub fn start(&self) -> T {
        self.start_inclusive
    }

    /// Returns the exclusive end.
    #[inline]
    pub fn end(&self) -> T {
        self.end_exclusive
    }

    /// Checks whether `other` lies entirely inside this interval.
    ///
    /// ```
    /// use vlb_core::primitives::Interval;
    ///
    /// let outer = Interval::try_new(1, 10).unwrap();
    /// assert!(outer.contains_interval(&Interval::try_new(1, 10).unwrap()));
    /// assert!(!outer.contains_interval(&Interval::try_new(5, 11).unwrap()));
    /// ```
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool {
        other.start_inclusive >= self.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Checks whether the two half-open intervals share at least one value.
    ///
    /// Intervals that merely touch (`a.end == b.start`) do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Checks whether `x` lies within the closed range `[start, end]`.
    #[inline]
    pub fn covers(&self, x: T) -> bool {
        x >= self.start_inclusive && x <= self.end_exclusive
    }

    /// An interval precedes another if it ends on or before the other's start.
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool {
        self.end_exclusive <= other.start_inclusive
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
