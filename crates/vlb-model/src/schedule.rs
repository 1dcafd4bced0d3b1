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

//! # Weekly Usage Schedules
//!
//! A room whose usage is `SCHEDULE` hands out access according to a list of
//! weekly windows. Each [`ScheduleRow`] reserves a day range and a time
//! window for courts, for probation teams, or blocks the room entirely.
//!
//! Rows are compared with two different predicates and keeping them apart
//! matters:
//!
//! - **overlap** ([`ScheduleRow::overlaps`]): any shared instant between two
//!   rows for the same audience. Used to police writes to a schedule.
//! - **containment** ([`ScheduleRow::contains_interval`]): an appointment lies
//!   entirely inside a row's window. Used to decide booking-time eligibility.
//!
//! [`RoomSchedule`] is an immutable list of rows. Every update returns a new
//! schedule or a [`ScheduleUpdateError`], leaving the original untouched.

use crate::{
    err::{
        DuplicateScheduleRowError, OverlappingScheduleRowError, ScheduleRowError,
        ScheduleUpdateError,
    },
    id::PartyCode,
    requester::RequesterKind,
};
use chrono::{NaiveTime, Weekday};
use std::collections::BTreeSet;
use std::fmt::Display;
use vlb_core::time::{TimeInterval, WeekdayRange};

/// What a schedule row reserves its window for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleUsage {
    Court,
    Probation,
    /// Nobody may use the room in this window.
    Blocked,
}

impl ScheduleUsage {
    /// The requester kind this row is for, or `None` for blocked windows.
    #[inline]
    pub fn dedicated_to(self) -> Option<RequesterKind> {
        match self {
            ScheduleUsage::Court => Some(RequesterKind::Court),
            ScheduleUsage::Probation => Some(RequesterKind::Probation),
            ScheduleUsage::Blocked => None,
        }
    }
}

impl Display for ScheduleUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleUsage::Court => write!(f, "COURT"),
            ScheduleUsage::Probation => write!(f, "PROBATION"),
            ScheduleUsage::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// One weekly usage window of a room.
///
/// Equality covers the full tuple `(usage, days, window, allowed parties)`,
/// with the parties compared as a sorted set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleRow {
    usage: ScheduleUsage,
    days: WeekdayRange,
    window: TimeInterval,
    allowed_parties: BTreeSet<PartyCode>,
}

impl ScheduleRow {
    /// Creates a row, validating the day range, the time window and the
    /// party list.
    pub fn try_new<I, P>(
        usage: ScheduleUsage,
        start_day: Weekday,
        end_day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        allowed_parties: I,
    ) -> Result<Self, ScheduleRowError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PartyCode>,
    {
        let days = WeekdayRange::try_new(start_day, end_day)?;
        let window = TimeInterval::try_new(start_time, end_time)?;
        let allowed_parties: BTreeSet<PartyCode> =
            allowed_parties.into_iter().map(Into::into).collect();

        if allowed_parties.iter().any(PartyCode::is_blank) {
            return Err(ScheduleRowError::BlankParty);
        }
        if usage == ScheduleUsage::Blocked && !allowed_parties.is_empty() {
            return Err(ScheduleRowError::PartiesNotApplicable(usage));
        }

        Ok(Self {
            usage,
            days,
            window,
            allowed_parties,
        })
    }

    #[inline]
    pub fn usage(&self) -> ScheduleUsage {
        self.usage
    }

    #[inline]
    pub fn days(&self) -> WeekdayRange {
        self.days
    }

    #[inline]
    pub fn window(&self) -> TimeInterval {
        self.window
    }

    #[inline]
    pub fn allowed_parties(&self) -> &BTreeSet<PartyCode> {
        &self.allowed_parties
    }

    #[inline]
    pub fn applies_on(&self, day: Weekday) -> bool {
        self.days.contains(day)
    }

    /// Whether `t` falls within the window, both ends inclusive.
    #[inline]
    pub fn covers_instant(&self, t: NaiveTime) -> bool {
        self.window.covers(t)
    }

    /// Containment predicate: `interval` lies entirely inside the window.
    #[inline]
    pub fn contains_interval(&self, interval: &TimeInterval) -> bool {
        self.window.contains_interval(interval)
    }

    /// Overlap predicate: both rows have the same usage, share at least one
    /// day and their windows intersect. Allowed parties are not compared.
    ///
    /// Windows that only touch (`09:00-12:00` and `12:00-15:00`) do not
    /// overlap.
    pub fn overlaps(&self, other: &ScheduleRow) -> bool {
        self.usage == other.usage
            && self.days.intersects(&other.days)
            && self.window.intersects(&other.window)
    }
}

impl Display for ScheduleRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.usage, self.days, self.window)?;
        if !self.allowed_parties.is_empty() {
            let parties: Vec<&str> = self.allowed_parties.iter().map(PartyCode::as_str).collect();
            write!(f, " {{{}}}", parties.join(","))?;
        }
        Ok(())
    }
}

/// The weekly schedule of a single room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSchedule {
    rows: Vec<ScheduleRow>,
}

impl RoomSchedule {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from rows, rejecting exact duplicates.
    pub fn from_rows<I>(rows: I) -> Result<Self, ScheduleUpdateError>
    where
        I: IntoIterator<Item = ScheduleRow>,
    {
        rows.into_iter()
            .try_fold(Self::new(), |schedule, row| schedule.with_row(row))
    }

    #[inline]
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a schedule with `row` appended.
    ///
    /// # Errors
    ///
    /// [`ScheduleUpdateError::Duplicate`] if an identical row already exists.
    pub fn with_row(&self, row: ScheduleRow) -> Result<Self, ScheduleUpdateError> {
        self.ensure_unique(&row, None)?;
        let mut rows = self.rows.clone();
        rows.push(row);
        Ok(Self { rows })
    }

    /// Like [`RoomSchedule::with_row`], but also refuses rows that overlap an
    /// existing row with the same usage.
    pub fn with_row_exclusive(&self, row: ScheduleRow) -> Result<Self, ScheduleUpdateError> {
        self.ensure_unique(&row, None)?;
        self.ensure_no_overlap(&row, None)?;
        let mut rows = self.rows.clone();
        rows.push(row);
        Ok(Self { rows })
    }

    /// Returns a schedule where the row at `index` is replaced by `row`.
    ///
    /// The row being replaced does not count as a duplicate of its
    /// replacement.
    pub fn with_amended_row(
        &self,
        index: usize,
        row: ScheduleRow,
    ) -> Result<Self, ScheduleUpdateError> {
        if index >= self.rows.len() {
            return Err(ScheduleUpdateError::RowNotFound(index));
        }
        self.ensure_unique(&row, Some(index))?;
        let mut rows = self.rows.clone();
        rows[index] = row;
        Ok(Self { rows })
    }

    /// Like [`RoomSchedule::with_amended_row`], but also refuses a
    /// replacement that overlaps any other row with the same usage.
    pub fn with_amended_row_exclusive(
        &self,
        index: usize,
        row: ScheduleRow,
    ) -> Result<Self, ScheduleUpdateError> {
        if index >= self.rows.len() {
            return Err(ScheduleUpdateError::RowNotFound(index));
        }
        self.ensure_no_overlap(&row, Some(index))?;
        self.with_amended_row(index, row)
    }

    /// Returns a schedule without the row at `index`.
    pub fn without_row(&self, index: usize) -> Result<Self, ScheduleUpdateError> {
        if index >= self.rows.len() {
            return Err(ScheduleUpdateError::RowNotFound(index));
        }
        let mut rows = self.rows.clone();
        rows.remove(index);
        Ok(Self { rows })
    }

    /// Existing rows that overlap `row`.
    pub fn overlapping<'a>(&'a self, row: &'a ScheduleRow) -> impl Iterator<Item = &'a ScheduleRow> {
        self.rows.iter().filter(move |r| r.overlaps(row))
    }

    /// Rows in force on `day` whose window includes the instant `t`.
    pub fn rows_covering(&self, day: Weekday, t: NaiveTime) -> impl Iterator<Item = &ScheduleRow> {
        self.rows
            .iter()
            .filter(move |r| r.applies_on(day) && r.covers_instant(t))
    }

    /// Rows in force on `day` whose window fully contains `interval`.
    pub fn rows_containing<'a>(
        &'a self,
        day: Weekday,
        interval: &'a TimeInterval,
    ) -> impl Iterator<Item = &'a ScheduleRow> {
        self.rows
            .iter()
            .filter(move |r| r.applies_on(day) && r.contains_interval(interval))
    }

    /// Rows in force on `day` whose window shares any time with `interval`.
    pub fn rows_touching<'a>(
        &'a self,
        day: Weekday,
        interval: &'a TimeInterval,
    ) -> impl Iterator<Item = &'a ScheduleRow> {
        self.rows
            .iter()
            .filter(move |r| r.applies_on(day) && r.window().intersects(interval))
    }

    fn ensure_unique(&self, row: &ScheduleRow, skip: Option<usize>) -> Result<(), ScheduleUpdateError> {
        let duplicate = self
            .rows
            .iter()
            .enumerate()
            .any(|(i, existing)| Some(i) != skip && existing == row);
        if duplicate {
            return Err(DuplicateScheduleRowError::new(row.clone()).into());
        }
        Ok(())
    }

    fn ensure_no_overlap(
        &self,
        row: &ScheduleRow,
        skip: Option<usize>,
    ) -> Result<(), ScheduleUpdateError> {
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(i, existing)| Some(*i) != skip && existing.overlaps(row))
        {
            Some((_, existing)) => {
                Err(OverlappingScheduleRowError::new(existing.clone(), row.clone()).into())
            }
            None => Ok(()),
        }
    }
}
