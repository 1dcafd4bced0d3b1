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

//! Multi-leg booking options and the appointments they are checked against.
//!
//! A video-link booking may reserve up to three consecutive slots: an
//! optional pre-hearing leg, the main hearing and an optional post-hearing
//! leg, each possibly in a different room. [`BookingOption`] guarantees that
//! the legs are present in chronological order and never overlap.

use crate::{
    err::{BookingOptionError, LegOrderError},
    id::{BookingId, LocationKey},
};
use chrono::{NaiveTime, TimeDelta};
use std::fmt::Display;
use vlb_core::time::{TimeInterval, shift_interval};

/// Which part of a booking option a leg represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LegKind {
    Pre,
    Main,
    Post,
}

impl Display for LegKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegKind::Pre => write!(f, "pre"),
            LegKind::Main => write!(f, "main"),
            LegKind::Post => write!(f, "post"),
        }
    }
}

/// One room occupied for one interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationLeg {
    location: LocationKey,
    interval: TimeInterval,
}

impl LocationLeg {
    #[inline]
    pub fn new(location: LocationKey, interval: TimeInterval) -> Self {
        Self { location, interval }
    }

    #[inline]
    pub fn location(&self) -> &LocationKey {
        &self.location
    }

    #[inline]
    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    #[inline]
    pub fn shifted(&self, delta: TimeDelta) -> Option<Self> {
        Some(Self {
            location: self.location.clone(),
            interval: shift_interval(&self.interval, delta)?,
        })
    }
}

impl Display for LocationLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.location, self.interval)
    }
}

/// A candidate booking made of up to three chronologically ordered legs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingOption {
    pre: Option<LocationLeg>,
    main: LocationLeg,
    post: Option<LocationLeg>,
}

impl BookingOption {
    /// Creates an option, checking that `pre` ends before `main` starts and
    /// `main` ends before `post` starts.
    pub fn new(
        pre: Option<LocationLeg>,
        main: LocationLeg,
        post: Option<LocationLeg>,
    ) -> Result<Self, LegOrderError> {
        if let Some(pre) = pre.as_ref().filter(|p| !p.interval.precedes(&main.interval)) {
            return Err(LegOrderError::new(
                LegKind::Pre,
                pre.interval,
                LegKind::Main,
                main.interval,
            ));
        }
        if let Some(post) = post.as_ref().filter(|p| !main.interval.precedes(&p.interval)) {
            return Err(LegOrderError::new(
                LegKind::Main,
                main.interval,
                LegKind::Post,
                post.interval,
            ));
        }
        Ok(Self { pre, main, post })
    }

    /// A booking with only a main leg.
    #[inline]
    pub fn single(main: LocationLeg) -> Self {
        Self {
            pre: None,
            main,
            post: None,
        }
    }

    /// Builds an option from legs that may each be absent.
    ///
    /// This is the entry point for loosely shaped requests where the main
    /// leg itself is optional on the wire.
    pub fn from_legs(
        pre: Option<LocationLeg>,
        main: Option<LocationLeg>,
        post: Option<LocationLeg>,
    ) -> Result<Self, BookingOptionError> {
        let main = main.ok_or(BookingOptionError::MissingMainLeg)?;
        Ok(Self::new(pre, main, post)?)
    }

    #[inline]
    pub fn pre(&self) -> Option<&LocationLeg> {
        self.pre.as_ref()
    }

    #[inline]
    pub fn main(&self) -> &LocationLeg {
        &self.main
    }

    #[inline]
    pub fn post(&self) -> Option<&LocationLeg> {
        self.post.as_ref()
    }

    /// Start of the main leg, the reference point for ordering options.
    #[inline]
    pub fn main_start(&self) -> NaiveTime {
        self.main.interval.start()
    }

    /// All present legs in chronological order.
    pub fn legs(&self) -> impl Iterator<Item = (LegKind, &LocationLeg)> + '_ {
        self.pre
            .iter()
            .map(|l| (LegKind::Pre, l))
            .chain(std::iter::once((LegKind::Main, &self.main)))
            .chain(self.post.iter().map(|l| (LegKind::Post, l)))
    }

    /// Slides every leg by `delta`, preserving their relative timing.
    ///
    /// Returns `None` if any leg would leave the day.
    pub fn shifted(&self, delta: TimeDelta) -> Option<Self> {
        let pre = match &self.pre {
            Some(leg) => Some(leg.shifted(delta)?),
            None => None,
        };
        let post = match &self.post {
            Some(leg) => Some(leg.shifted(delta)?),
            None => None,
        };
        Some(Self {
            pre,
            main: self.main.shifted(delta)?,
            post,
        })
    }
}

impl Display for BookingOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (kind, leg) in self.legs() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{kind}={leg}")?;
            first = false;
        }
        Ok(())
    }
}

/// An appointment that already occupies a room on the day being checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExistingAppointment {
    location: LocationKey,
    interval: TimeInterval,
    booking: Option<BookingId>,
}

impl ExistingAppointment {
    #[inline]
    pub fn new(location: LocationKey, interval: TimeInterval) -> Self {
        Self {
            location,
            interval,
            booking: None,
        }
    }

    /// Tags the appointment with the booking that owns it.
    #[inline]
    pub fn owned_by(mut self, booking: BookingId) -> Self {
        self.booking = Some(booking);
        self
    }

    #[inline]
    pub fn location(&self) -> &LocationKey {
        &self.location
    }

    #[inline]
    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    #[inline]
    pub fn booking(&self) -> Option<BookingId> {
        self.booking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn leg(room: &str, from: (u32, u32), to: (u32, u32)) -> LocationLeg {
        LocationLeg::new(
            LocationKey::new(room),
            TimeInterval::try_new(hm(from.0, from.1), hm(to.0, to.1)).unwrap(),
        )
    }

    #[test]
    fn test_new_accepts_back_to_back_legs() {
        let option = BookingOption::new(
            Some(leg("A", (9, 0), (9, 15))),
            leg("B", (9, 15), (10, 0)),
            Some(leg("A", (10, 0), (10, 15))),
        )
        .unwrap();

        let kinds: Vec<_> = option.legs().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![LegKind::Pre, LegKind::Main, LegKind::Post]);
        assert_eq!(option.main_start(), hm(9, 15));
    }

    #[test]
    fn test_new_rejects_overlapping_pre() {
        let err = BookingOption::new(
            Some(leg("A", (9, 0), (9, 30))),
            leg("B", (9, 15), (10, 0)),
            None,
        )
        .unwrap_err();
        assert_eq!(err.earlier(), LegKind::Pre);
        assert_eq!(err.later(), LegKind::Main);
    }

    #[test]
    fn test_new_rejects_post_before_main() {
        let err = BookingOption::new(None, leg("B", (9, 15), (10, 0)), Some(leg("A", (8, 0), (8, 30))))
            .unwrap_err();
        assert_eq!(err.earlier(), LegKind::Main);
        assert_eq!(err.later(), LegKind::Post);
    }

    #[test]
    fn test_from_legs_requires_main() {
        let err = BookingOption::from_legs(Some(leg("A", (9, 0), (9, 15))), None, None).unwrap_err();
        assert_eq!(err, BookingOptionError::MissingMainLeg);
    }

    #[test]
    fn test_shifted_preserves_relative_timing() {
        let option = BookingOption::new(
            Some(leg("A", (9, 0), (9, 15))),
            leg("B", (9, 30), (10, 0)),
            None,
        )
        .unwrap();

        let moved = option.shifted(TimeDelta::minutes(-60)).unwrap();
        assert_eq!(moved.pre().unwrap().interval().start(), hm(8, 0));
        assert_eq!(moved.main().interval().start(), hm(8, 30));
        assert_eq!(moved.main().location(), &LocationKey::new("B"));

        assert!(option.shifted(TimeDelta::hours(-9)).is_none());
    }

    #[test]
    fn test_existing_appointment_owner() {
        let appt = ExistingAppointment::new(
            LocationKey::new("A"),
            TimeInterval::try_new(hm(9, 0), hm(10, 0)).unwrap(),
        );
        assert_eq!(appt.booking(), None);
        assert_eq!(appt.owned_by(BookingId::new(7)).booking(), Some(BookingId::new(7)));
    }
}
