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

//! # Video-link Booking Model (`vlb-model`)
//!
//! The data model for deciding whether, and for whom, prison video-link rooms
//! can be booked. It builds on the primitives from `vlb-core`.
//!
//! ## Key Data Structures
//!
//! - **`BookingOption`**: up to three consecutive legs (pre, main, post), each
//!   a `LocationLeg` tying a room to a time interval.
//! - **`ExistingAppointment`**: an occupancy already recorded against a room
//!   for the day being checked.
//! - **`RoomAttributes`**: status, usage category and allowed parties of a
//!   room.
//! - **`RoomSchedule`** / **`ScheduleRow`**: the weekly windows governing rooms
//!   whose usage is `SCHEDULE`.
//! - **`Requester`**: the court or probation team asking for a room.
//! - **`AvailabilityStatus`**: the result of classifying a room for a
//!   requester.
//!
//! All values are immutable once built. Constructors and builders validate
//! their input and return typed errors from [`err`].

pub mod booking;
pub mod err;
pub mod id;
pub mod requester;
pub mod room;
pub mod schedule;
pub mod status;

/// A room's attributes together with its weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomProfile {
    attributes: room::RoomAttributes,
    schedule: schedule::RoomSchedule,
}

impl RoomProfile {
    #[inline]
    pub fn new(attributes: room::RoomAttributes, schedule: schedule::RoomSchedule) -> Self {
        Self {
            attributes,
            schedule,
        }
    }

    #[inline]
    pub fn attributes(&self) -> &room::RoomAttributes {
        &self.attributes
    }

    #[inline]
    pub fn schedule(&self) -> &schedule::RoomSchedule {
        &self.schedule
    }
}

pub mod prelude {
    pub use crate::RoomProfile;
    pub use crate::booking::{BookingOption, ExistingAppointment, LegKind, LocationLeg};
    pub use crate::err::{
        BookingOptionError, DuplicateScheduleRowError, LegOrderError,
        OverlappingScheduleRowError, RoomAttributesError, ScheduleRowError, ScheduleUpdateError,
    };
    pub use crate::id::{BookingId, LocationKey, PartyCode, PrisonCode, RoomAttributeId};
    pub use crate::requester::{Requester, RequesterKind};
    pub use crate::room::{RoomAttributes, RoomAttributesBuilder, RoomStatus, RoomUsage};
    pub use crate::schedule::{RoomSchedule, ScheduleRow, ScheduleUsage};
    pub use crate::status::AvailabilityStatus;
}
