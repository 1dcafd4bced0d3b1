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

//! Lazy generation of alternative booking options.
//!
//! Candidate main-leg starts lie on a grid `day_start, day_start + step, ...`
//! and only grid points whose shifted main leg still ends by `day_end` are
//! considered. [`CandidateSlots`] walks the grid outwards from the preferred
//! main start, so the closest alternatives come first and the full day is
//! never materialised.

use crate::config::EngineConfig;
use chrono::NaiveTime;
use std::iter::FusedIterator;
use vlb_core::time::{nanos_of_day, time_from_nanos};
use vlb_model::booking::BookingOption;

/// Produces candidate options for a preferred option.
///
/// The generator holds no per-search state. Every call to
/// [`CandidateSlotGenerator::candidates`] starts a fresh, finite search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlotGenerator {
    day_start: NaiveTime,
    day_end: NaiveTime,
    step_nanos: i64,
}

impl CandidateSlotGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            day_start: config.day_start(),
            day_end: config.day_end(),
            step_nanos: config.step().num_nanoseconds().unwrap_or(i64::MAX),
        }
    }

    #[inline]
    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    #[inline]
    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }

    /// Candidates ordered by distance from the preferred main start, earlier
    /// first on ties.
    pub fn candidates<'a>(&self, preferred: &'a BookingOption) -> CandidateSlots<'a> {
        let grid = self.grid_for(preferred);
        let origin = nanos_of_day(preferred.main_start());
        let offset = origin - grid.first;

        // First grid index at or after the preferred start.
        let upper = if offset <= 0 {
            0
        } else {
            offset / grid.step + i64::from(offset % grid.step != 0)
        };
        let upper = upper.min(grid.len);

        CandidateSlots {
            preferred,
            grid,
            origin,
            upper,
            lower: upper - 1,
        }
    }

    fn grid_for(&self, preferred: &BookingOption) -> Grid {
        let first = nanos_of_day(self.day_start);
        let main = preferred.main().interval();
        let main_len = nanos_of_day(main.end()) - nanos_of_day(main.start());
        let latest_start = nanos_of_day(self.day_end) - main_len;
        let len = if latest_start < first {
            0
        } else {
            (latest_start - first) / self.step_nanos + 1
        };
        Grid {
            first,
            step: self.step_nanos,
            len,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Grid {
    first: i64,
    step: i64,
    len: i64,
}

impl Grid {
    #[inline]
    fn nanos_at(&self, index: i64) -> i64 {
        self.first + index * self.step
    }

    fn option_at(&self, preferred: &BookingOption, index: i64) -> Option<BookingOption> {
        let start = time_from_nanos(self.nanos_at(index))?;
        preferred.shifted(start.signed_duration_since(preferred.main_start()))
    }
}

/// Iterator returned by [`CandidateSlotGenerator::candidates`].
///
/// Grid points where a pre or post leg would cross midnight are skipped.
#[derive(Debug, Clone)]
pub struct CandidateSlots<'a> {
    preferred: &'a BookingOption,
    grid: Grid,
    origin: i64,
    /// Next unvisited index at or after the origin.
    upper: i64,
    /// Next unvisited index before the origin, `-1` once exhausted.
    lower: i64,
}

impl CandidateSlots<'_> {
    fn next_index(&mut self) -> Option<i64> {
        let below = (self.lower >= 0).then_some(self.lower);
        let above = (self.upper < self.grid.len).then_some(self.upper);

        let take_lower = match (below, above) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(l), Some(u)) => {
                self.origin - self.grid.nanos_at(l) <= self.grid.nanos_at(u) - self.origin
            }
        };

        if take_lower {
            self.lower -= 1;
            below
        } else {
            self.upper += 1;
            above
        }
    }

    fn remaining(&self) -> usize {
        let below = self.lower + 1;
        let above = self.grid.len - self.upper;
        usize::try_from(below.max(0) + above.max(0)).unwrap_or(usize::MAX)
    }
}

impl Iterator for CandidateSlots<'_> {
    type Item = BookingOption;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let index = self.next_index()?;
            if let Some(option) = self.grid.option_at(self.preferred, index) {
                return Some(option);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl FusedIterator for CandidateSlots<'_> {}
