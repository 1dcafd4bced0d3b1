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

use crate::{
    booking::LegKind,
    id::PartyCode,
    room::RoomUsage,
    schedule::{ScheduleRow, ScheduleUsage},
};
use chrono::NaiveTime;
use vlb_core::{
    primitives::InvalidIntervalError,
    time::{InvalidWeekdayRangeError, TimeInterval},
};

/// Two legs of a booking option overlap or are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{earlier} leg {earlier_interval} must end before {later} leg {later_interval} starts")]
pub struct LegOrderError {
    earlier: LegKind,
    earlier_interval: TimeInterval,
    later: LegKind,
    later_interval: TimeInterval,
}

impl LegOrderError {
    #[inline]
    pub fn new(
        earlier: LegKind,
        earlier_interval: TimeInterval,
        later: LegKind,
        later_interval: TimeInterval,
    ) -> Self {
        Self {
            earlier,
            earlier_interval,
            later,
            later_interval,
        }
    }

    #[inline]
    pub fn earlier(&self) -> LegKind {
        self.earlier
    }

    #[inline]
    pub fn later(&self) -> LegKind {
        self.later
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingOptionError {
    #[error("booking option has no main leg")]
    MissingMainLeg,
    #[error("{leg} leg has an invalid interval: {source}")]
    InvalidLegInterval {
        leg: LegKind,
        #[source]
        source: InvalidIntervalError<NaiveTime>,
    },
    #[error(transparent)]
    LegOrder(#[from] LegOrderError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleRowError {
    #[error(transparent)]
    InvalidDays(#[from] InvalidWeekdayRangeError),
    #[error(transparent)]
    InvalidTimes(#[from] InvalidIntervalError<NaiveTime>),
    #[error("blank party code in schedule row")]
    BlankParty,
    #[error("{0} schedule rows cannot name allowed parties")]
    PartiesNotApplicable(ScheduleUsage),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomAttributesError {
    #[error("blank party code in room attributes")]
    BlankParty,
    #[error("{0} rooms cannot name allowed parties")]
    PartiesNotApplicable(RoomUsage),
    #[error("duplicate allowed party {0}")]
    DuplicateParty(PartyCode),
}

/// A schedule row identical to one the room already has.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate schedule row {row}")]
pub struct DuplicateScheduleRowError {
    row: ScheduleRow,
}

impl DuplicateScheduleRowError {
    #[inline]
    pub fn new(row: ScheduleRow) -> Self {
        Self { row }
    }

    #[inline]
    pub fn row(&self) -> &ScheduleRow {
        &self.row
    }
}

/// A schedule row whose window overlaps an existing row for the same audience.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schedule row {candidate} overlaps existing row {existing}")]
pub struct OverlappingScheduleRowError {
    existing: ScheduleRow,
    candidate: ScheduleRow,
}

impl OverlappingScheduleRowError {
    #[inline]
    pub fn new(existing: ScheduleRow, candidate: ScheduleRow) -> Self {
        Self {
            existing,
            candidate,
        }
    }

    #[inline]
    pub fn existing(&self) -> &ScheduleRow {
        &self.existing
    }

    #[inline]
    pub fn candidate(&self) -> &ScheduleRow {
        &self.candidate
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleUpdateError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateScheduleRowError),
    #[error(transparent)]
    Overlapping(#[from] OverlappingScheduleRowError),
    #[error("no schedule row at index {0}")]
    RowNotFound(usize),
}

impl ScheduleUpdateError {
    /// Whether the update was refused because it clashes with existing rows.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ScheduleUpdateError::Duplicate(_) | ScheduleUpdateError::Overlapping(_)
        )
    }
}
