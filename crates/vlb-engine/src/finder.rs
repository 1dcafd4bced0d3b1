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

//! Availability checks against room timelines.
//!
//! [`AvailabilityFinder::check`] first tests the preferred option leg by
//! leg. Only when a leg is taken does it pull candidates from
//! [`CandidateSlotGenerator`], keeping the first bookable ones in search
//! order and returning them sorted by main start.

use crate::{
    candidates::CandidateSlotGenerator,
    config::EngineConfig,
    timeline::{Timeline, Timelines},
};
use tracing::{debug, instrument};
use vlb_model::booking::BookingOption;

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilityOutcome {
    available: bool,
    alternatives: Vec<BookingOption>,
}

impl AvailabilityOutcome {
    /// The preferred option can be booked as requested.
    #[inline]
    pub fn available() -> Self {
        Self {
            available: true,
            alternatives: Vec::new(),
        }
    }

    /// The preferred option is taken. `alternatives` may be empty.
    #[inline]
    pub fn unavailable(alternatives: Vec<BookingOption>) -> Self {
        Self {
            available: false,
            alternatives,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Alternatives in ascending order of main start.
    #[inline]
    pub fn alternatives(&self) -> &[BookingOption] {
        &self.alternatives
    }
}

/// Tests options against room timelines and searches for alternatives.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityFinder {
    generator: CandidateSlotGenerator,
    max_alternatives: usize,
}

impl AvailabilityFinder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            generator: CandidateSlotGenerator::new(config),
            max_alternatives: config.max_alternatives(),
        }
    }

    #[inline]
    pub fn generator(&self) -> &CandidateSlotGenerator {
        &self.generator
    }

    #[inline]
    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives
    }

    /// Every leg fits a free period of its room. Rooms without a timeline
    /// have no appointments that day and are free.
    pub fn is_bookable(option: &BookingOption, timelines: &Timelines) -> bool {
        option.legs().all(|(_, leg)| {
            timelines
                .get(leg.location())
                .is_none_or(|timeline: &Timeline| timeline.is_interval_free(leg.interval()))
        })
    }

    /// Checks `preferred` using the configured alternative limit.
    pub fn check(&self, preferred: &BookingOption, timelines: &Timelines) -> AvailabilityOutcome {
        self.check_with_limit(preferred, timelines, self.max_alternatives)
    }

    /// Checks `preferred` and, if it is taken, collects up to
    /// `max_alternatives` bookable candidates.
    ///
    /// Alternatives are the closest bookable candidates to the preferred
    /// time, returned in chronological order.
    #[instrument(
        level = "debug",
        skip_all,
        fields(main = %preferred.main(), limit = max_alternatives)
    )]
    pub fn check_with_limit(
        &self,
        preferred: &BookingOption,
        timelines: &Timelines,
        max_alternatives: usize,
    ) -> AvailabilityOutcome {
        if Self::is_bookable(preferred, timelines) {
            debug!("preferred option is free");
            return AvailabilityOutcome::available();
        }

        let mut alternatives: Vec<BookingOption> = self
            .generator
            .candidates(preferred)
            .filter(|candidate| Self::is_bookable(candidate, timelines))
            .take(max_alternatives)
            .collect();
        alternatives.sort_by_key(BookingOption::main_start);

        debug!(found = alternatives.len(), "preferred option is taken");
        AvailabilityOutcome::unavailable(alternatives)
    }
}
