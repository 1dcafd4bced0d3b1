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

//! # Room Usage Resolution
//!
//! Decides *may* a requester use a room, independently of whether the room
//! is free. The decision is a single priority-ordered function:
//!
//! 1. an inactive room is unavailable to everyone;
//! 2. a shared room is available to everyone;
//! 3. a court or probation room is available to requesters of that kind,
//!    optionally restricted to named parties;
//! 4. a court room is unavailable to probation teams and vice versa;
//! 5. a scheduled room defers to the weekly schedule rows in force.
//!
//! Schedule rows are matched against an instant with an inclusive window
//! test when classifying ([`LocationUsageResolver::resolve`]) and by
//! containment when deciding whether an appointment may be booked
//! ([`LocationUsageResolver::permits_booking`]).

use chrono::{Datelike, NaiveDateTime, Weekday};
use tracing::trace;
use vlb_core::time::TimeInterval;
use vlb_model::{
    requester::Requester,
    room::{RoomAttributes, RoomStatus, RoomUsage},
    schedule::{RoomSchedule, ScheduleRow},
    status::AvailabilityStatus,
};

/// Stateless classifier for room usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationUsageResolver;

impl LocationUsageResolver {
    /// Classifies `attributes` for `requester` at the moment `at`.
    pub fn resolve(
        attributes: &RoomAttributes,
        schedule: &RoomSchedule,
        requester: &Requester,
        at: NaiveDateTime,
    ) -> AvailabilityStatus {
        if let Some(status) = Self::resolve_static(attributes, requester) {
            return status;
        }

        let day = at.weekday();
        let status = Self::resolve_rows(schedule.rows_covering(day, at.time()), requester);
        trace!(%requester, %day, time = %at.time(), %status, "resolved scheduled room");
        status
    }

    /// Checks whether `requester` may book `interval` on `day`.
    ///
    /// For scheduled rooms a row only grants access if its window fully
    /// contains the interval. An interval that straddles the edge of a row
    /// dedicated to the requester's kind is refused, while rows for other
    /// audiences (or blocked rows) fall back to the shared default the same
    /// way [`LocationUsageResolver::resolve`] does.
    pub fn permits_booking(
        attributes: &RoomAttributes,
        schedule: &RoomSchedule,
        requester: &Requester,
        day: Weekday,
        interval: &TimeInterval,
    ) -> bool {
        if let Some(status) = Self::resolve_static(attributes, requester) {
            return status.is_available();
        }

        let granted = Self::resolve_rows(schedule.rows_containing(day, interval), requester);
        if granted != AvailabilityStatus::Shared {
            return granted.is_available();
        }

        // Nothing of the requester's kind contains the interval. Any row of
        // that kind touching it means the interval straddles a reserved
        // window.
        !schedule
            .rows_touching(day, interval)
            .any(|row| row.usage().dedicated_to() == Some(requester.kind()))
    }

    /// Steps 1-4 of the decision table. `None` means the schedule decides.
    fn resolve_static(
        attributes: &RoomAttributes,
        requester: &Requester,
    ) -> Option<AvailabilityStatus> {
        if attributes.status() == RoomStatus::Inactive {
            return Some(AvailabilityStatus::None);
        }

        match attributes.usage() {
            RoomUsage::Shared => Some(AvailabilityStatus::Shared),
            RoomUsage::Schedule => None,
            usage if usage.dedicated_to() == Some(requester.kind()) => {
                let parties = attributes.allowed_parties();
                Some(if parties.is_empty() {
                    AvailabilityStatus::any_of(requester.kind())
                } else if parties.contains(requester.code()) {
                    AvailabilityStatus::named(requester.kind())
                } else {
                    AvailabilityStatus::None
                })
            }
            _ => Some(AvailabilityStatus::None),
        }
    }

    /// Step 5: the most specific status granted by the matching rows.
    fn resolve_rows<'a, I>(rows: I, requester: &Requester) -> AvailabilityStatus
    where
        I: IntoIterator<Item = &'a ScheduleRow>,
    {
        let mut best: Option<AvailabilityStatus> = None;
        let mut reserved_for_kind = false;

        for row in rows {
            // Blocked rows and rows for the other kind do not apply to this
            // requester.
            if row.usage().dedicated_to() != Some(requester.kind()) {
                continue;
            }
            reserved_for_kind = true;

            let status = if row.allowed_parties().contains(requester.code()) {
                AvailabilityStatus::named(requester.kind())
            } else if row.allowed_parties().is_empty() {
                AvailabilityStatus::any_of(requester.kind())
            } else {
                continue;
            };
            best = Some(best.map_or(status, |b| b.min(status)));
        }

        match best {
            Some(status) => status,
            // Rows of the requester's kind cover the slot but only name
            // other parties.
            None if reserved_for_kind => AvailabilityStatus::None,
            // No row covers the slot, or only blocked / other-kind rows do.
            // The latter falling back to shared access mirrors long-standing
            // behaviour rather than a documented rule.
            None => AvailabilityStatus::Shared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use vlb_model::schedule::ScheduleUsage;

    // 2024-01-01 is a Monday.
    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn row(usage: ScheduleUsage, days: (Weekday, Weekday), from: u32, to: u32, parties: &[&str]) -> ScheduleRow {
        ScheduleRow::try_new(usage, days.0, days.1, hm(from, 0), hm(to, 0), parties.iter().copied())
            .unwrap()
    }

    fn scheduled() -> RoomAttributes {
        RoomAttributes::builder()
            .usage(RoomUsage::Schedule)
            .build()
            .unwrap()
    }

    fn resolve(attrs: &RoomAttributes, schedule: &RoomSchedule, requester: &Requester) -> AvailabilityStatus {
        LocationUsageResolver::resolve(attrs, schedule, requester, monday_at(9, 0))
    }

    #[test]
    fn test_inactive_room_is_never_available() {
        let court = Requester::court("ABC");
        let probation = Requester::probation("TEAM1");
        let schedule = RoomSchedule::from_rows([row(
            ScheduleUsage::Court,
            (Weekday::Mon, Weekday::Fri),
            9,
            17,
            &["ABC"],
        )])
        .unwrap();

        for usage in [RoomUsage::Shared, RoomUsage::Court, RoomUsage::Probation, RoomUsage::Schedule] {
            let attrs = RoomAttributes::builder()
                .status(RoomStatus::Inactive)
                .usage(usage)
                .build()
                .unwrap();
            assert_eq!(resolve(&attrs, &schedule, &court), AvailabilityStatus::None);
            assert_eq!(resolve(&attrs, &schedule, &probation), AvailabilityStatus::None);
        }
    }

    #[test]
    fn test_shared_room() {
        let attrs = RoomAttributes::shared();
        let empty = RoomSchedule::new();
        assert_eq!(resolve(&attrs, &empty, &Requester::court("ABC")), AvailabilityStatus::Shared);
        assert_eq!(resolve(&attrs, &empty, &Requester::probation("T")), AvailabilityStatus::Shared);
    }

    #[test]
    fn test_court_room_any_court() {
        let attrs = RoomAttributes::builder().usage(RoomUsage::Court).build().unwrap();
        let empty = RoomSchedule::new();
        assert_eq!(resolve(&attrs, &empty, &Requester::court("ABC")), AvailabilityStatus::CourtAny);
        assert_eq!(resolve(&attrs, &empty, &Requester::probation("ABC")), AvailabilityStatus::None);
    }

    #[test]
    fn test_court_room_restricted_to_named_court() {
        let attrs = RoomAttributes::builder()
            .usage(RoomUsage::Court)
            .allowed_party("XYZ")
            .build()
            .unwrap();
        let empty = RoomSchedule::new();
        assert_eq!(resolve(&attrs, &empty, &Requester::court("ABC")), AvailabilityStatus::None);
        assert_eq!(resolve(&attrs, &empty, &Requester::court("XYZ")), AvailabilityStatus::CourtRoom);
    }

    #[test]
    fn test_probation_room() {
        let any = RoomAttributes::builder().usage(RoomUsage::Probation).build().unwrap();
        let named = RoomAttributes::builder()
            .usage(RoomUsage::Probation)
            .allowed_party("TEAM1")
            .build()
            .unwrap();
        let empty = RoomSchedule::new();
        let team = Requester::probation("TEAM1");
        assert_eq!(resolve(&any, &empty, &team), AvailabilityStatus::ProbationAny);
        assert_eq!(resolve(&named, &empty, &team), AvailabilityStatus::ProbationTeam);
        assert_eq!(resolve(&named, &empty, &Requester::probation("TEAM2")), AvailabilityStatus::None);
        assert_eq!(resolve(&any, &empty, &Requester::court("TEAM1")), AvailabilityStatus::None);
    }

    #[test]
    fn test_scheduled_room_without_rows_is_shared() {
        let schedule = RoomSchedule::from_rows([row(
            ScheduleUsage::Court,
            (Weekday::Tue, Weekday::Fri),
            9,
            17,
            &[],
        )])
        .unwrap();
        assert_eq!(resolve(&scheduled(), &schedule, &Requester::court("ABC")), AvailabilityStatus::Shared);
        assert_eq!(
            resolve(&scheduled(), &RoomSchedule::new(), &Requester::court("ABC")),
            AvailabilityStatus::Shared
        );
    }

    #[test]
    fn test_scheduled_room_prefers_most_specific_row() {
        let general = row(ScheduleUsage::Probation, (Weekday::Mon, Weekday::Mon), 9, 12, &[]);
        let team = Requester::probation("TEAM1");

        let schedule = RoomSchedule::from_rows([general.clone()]).unwrap();
        assert_eq!(resolve(&scheduled(), &schedule, &team), AvailabilityStatus::ProbationAny);

        let specific = row(ScheduleUsage::Probation, (Weekday::Mon, Weekday::Mon), 9, 12, &["TEAM1"]);
        let schedule = schedule.with_row(specific).unwrap();
        assert_eq!(resolve(&scheduled(), &schedule, &team), AvailabilityStatus::ProbationTeam);
    }

    #[test]
    fn test_scheduled_room_window_edges_are_inclusive() {
        let schedule = RoomSchedule::from_rows([row(
            ScheduleUsage::Court,
            (Weekday::Mon, Weekday::Mon),
            9,
            12,
            &[],
        )])
        .unwrap();
        let court = Requester::court("ABC");
        let at = |h, m| LocationUsageResolver::resolve(&scheduled(), &schedule, &court, monday_at(h, m));
        assert_eq!(at(9, 0), AvailabilityStatus::CourtAny);
        assert_eq!(at(12, 0), AvailabilityStatus::CourtAny);
        assert_eq!(at(12, 1), AvailabilityStatus::Shared);
        assert_eq!(at(8, 59), AvailabilityStatus::Shared);
    }

    #[test]
    fn test_scheduled_room_other_kind_and_blocked_rows_fall_back_to_shared() {
        let schedule = RoomSchedule::from_rows([
            row(ScheduleUsage::Court, (Weekday::Mon, Weekday::Mon), 9, 12, &[]),
            row(ScheduleUsage::Blocked, (Weekday::Mon, Weekday::Mon), 8, 10, &[]),
        ])
        .unwrap();
        assert_eq!(
            resolve(&scheduled(), &schedule, &Requester::probation("TEAM1")),
            AvailabilityStatus::Shared
        );
        assert_eq!(
            resolve(&scheduled(), &schedule, &Requester::court("ABC")),
            AvailabilityStatus::CourtAny
        );
    }

    #[test]
    fn test_scheduled_room_reserved_for_other_party_is_none() {
        let schedule = RoomSchedule::from_rows([row(
            ScheduleUsage::Court,
            (Weekday::Mon, Weekday::Fri),
            9,
            12,
            &["XYZ"],
        )])
        .unwrap();
        assert_eq!(resolve(&scheduled(), &schedule, &Requester::court("ABC")), AvailabilityStatus::None);
        assert_eq!(resolve(&scheduled(), &schedule, &Requester::court("XYZ")), AvailabilityStatus::CourtRoom);
    }

    #[test]
    fn test_permits_booking_uses_containment() {
        let schedule = RoomSchedule::from_rows([row(
            ScheduleUsage::Court,
            (Weekday::Mon, Weekday::Mon),
            9,
            12,
            &[],
        )])
        .unwrap();
        let court = Requester::court("ABC");
        let probation = Requester::probation("TEAM1");
        let inside = TimeInterval::try_new(hm(10, 0), hm(12, 0)).unwrap();
        let straddling = TimeInterval::try_new(hm(11, 30), hm(12, 30)).unwrap();
        let outside = TimeInterval::try_new(hm(13, 0), hm(14, 0)).unwrap();
        let permits = |r: &Requester, iv: &TimeInterval| {
            LocationUsageResolver::permits_booking(&scheduled(), &schedule, r, Weekday::Mon, iv)
        };

        assert!(permits(&court, &inside));
        assert!(!permits(&court, &straddling));
        assert!(permits(&court, &outside));
        // Court windows do not constrain probation teams.
        assert!(permits(&probation, &inside));
    }

    #[test]
    fn test_permits_booking_on_static_rooms() {
        let attrs = RoomAttributes::builder()
            .usage(RoomUsage::Court)
            .allowed_party("XYZ")
            .build()
            .unwrap();
        let iv = TimeInterval::try_new(hm(10, 0), hm(11, 0)).unwrap();
        let empty = RoomSchedule::new();
        assert!(LocationUsageResolver::permits_booking(&attrs, &empty, &Requester::court("XYZ"), Weekday::Mon, &iv));
        assert!(!LocationUsageResolver::permits_booking(&attrs, &empty, &Requester::court("ABC"), Weekday::Mon, &iv));
    }
}
