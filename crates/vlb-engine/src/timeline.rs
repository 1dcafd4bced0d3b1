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

//! Free-period timelines for a single room on a single day.
//!
//! A [`Timeline`] is built by sweeping over the start and end boundaries of
//! the room's existing appointments. The resulting free periods are kept in
//! a `BTreeMap` keyed by their start, so "which free period is in force at
//! `t`" is a floor lookup: the entry with the greatest start `<= t`.

use chrono::NaiveTime;
use std::collections::{BTreeMap, HashMap};
use vlb_core::{
    primitives::InvalidIntervalError,
    time::{TimeInterval, end_of_day, start_of_day},
};
use vlb_model::{booking::ExistingAppointment, id::LocationKey};

/// Per-room timelines for one day, keyed by location.
pub type Timelines = HashMap<LocationKey, Timeline>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    // Opens sort before closes at the same instant so that back-to-back
    // appointments never produce a zero-length gap.
    Open,
    Close,
}

/// The free periods of one room over one day.
///
/// Free periods are sorted, disjoint and half-open `[start, end)`. A room
/// with no appointments is free from `00:00` until the last representable
/// instant of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    free: BTreeMap<NaiveTime, NaiveTime>,
}

impl Timeline {
    /// A timeline with no appointments.
    pub fn fully_free() -> Self {
        Self::from_occupied(std::iter::empty())
    }

    /// Builds the timeline from the intervals occupied by appointments.
    ///
    /// Each interval contributes an open event at its start and a close
    /// event at its end; a terminal open event at the end of the day closes
    /// the last free period. Walking the events in time order, a transition
    /// of the occupancy counter from zero ends a free period and a
    /// transition back to zero starts one. Overlapping appointments simply
    /// keep the counter above zero for their union.
    pub fn from_occupied<'a, I>(occupied: I) -> Self
    where
        I: IntoIterator<Item = &'a TimeInterval>,
    {
        let mut events: Vec<(NaiveTime, Boundary)> = occupied
            .into_iter()
            .flat_map(|iv| [(iv.start(), Boundary::Open), (iv.end(), Boundary::Close)])
            .collect();
        events.push((end_of_day(), Boundary::Open));
        events.sort_unstable();

        let mut free = BTreeMap::new();
        let mut occupancy: usize = 0;
        let mut free_since = Some(start_of_day());

        for (t, boundary) in events {
            match boundary {
                Boundary::Open => {
                    if occupancy == 0 {
                        if let Some(start) = free_since.take().filter(|start| *start < t) {
                            free.insert(start, t);
                        }
                    }
                    occupancy += 1;
                }
                Boundary::Close => {
                    occupancy = occupancy.saturating_sub(1);
                    if occupancy == 0 {
                        free_since = Some(t);
                    }
                }
            }
        }

        debug_assert!(
            free.iter().zip(free.iter().skip(1)).all(|((_, e), (s, _))| e < s),
            "free periods must be sorted and separated"
        );

        Self { free }
    }

    /// Builds the timeline from a room's existing appointments.
    pub fn from_appointments<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a ExistingAppointment>,
    {
        Self::from_occupied(appointments.into_iter().map(ExistingAppointment::interval))
    }

    /// Number of free periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns `true` if the room is never free.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// The free periods in chronological order.
    pub fn free_periods(&self) -> impl Iterator<Item = TimeInterval> + '_ {
        self.free
            .iter()
            .filter_map(|(s, e)| TimeInterval::try_new(*s, *e).ok())
    }

    /// The free period with the greatest start `<= t`, as `(start, end)`.
    #[inline]
    pub fn floor(&self, t: NaiveTime) -> Option<(NaiveTime, NaiveTime)> {
        self.free.range(..=t).next_back().map(|(s, e)| (*s, *e))
    }

    /// Checks whether `[start, end)` fits inside a single free period.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIntervalError`] if `end < start`. An empty query
    /// (`start == end`) is accepted.
    pub fn is_free(
        &self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, InvalidIntervalError<NaiveTime>> {
        if end < start {
            return Err(InvalidIntervalError::new(start, end));
        }
        Ok(self
            .floor(start)
            .is_some_and(|(_, free_until)| end <= free_until))
    }

    /// Infallible variant of [`Timeline::is_free`] for validated intervals.
    #[inline]
    pub fn is_interval_free(&self, interval: &TimeInterval) -> bool {
        self.floor(interval.start())
            .is_some_and(|(_, free_until)| interval.end() <= free_until)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::fully_free()
    }
}

/// Groups appointments by room and builds one timeline per room.
pub fn build_timelines<'a, I>(appointments: I) -> Timelines
where
    I: IntoIterator<Item = &'a ExistingAppointment>,
{
    let mut by_location: HashMap<&LocationKey, Vec<&ExistingAppointment>> = HashMap::new();
    for appointment in appointments {
        by_location
            .entry(appointment.location())
            .or_default()
            .push(appointment);
    }
    by_location
        .into_iter()
        .map(|(location, booked)| (location.clone(), Timeline::from_appointments(booked)))
        .collect()
}
