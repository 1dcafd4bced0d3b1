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

//! # Video-link Booking Engine (`vlb-engine`)
//!
//! Answers two independent questions about prison video-link rooms:
//!
//! - *Can we book here?* [`finder::AvailabilityFinder`] checks a
//!   [`BookingOption`](vlb_model::booking::BookingOption) against per-room
//!   [`timeline::Timeline`]s of free periods and, if it is taken, searches
//!   the working day for the closest alternatives produced by
//!   [`candidates::CandidateSlotGenerator`].
//! - *May we book here?* [`usage::LocationUsageResolver`] classifies a room
//!   for a court or probation team at a moment in time.
//!
//! [`service::AvailabilityService`] wires both to a data source implementing
//! [`source::AppointmentSource`] and [`source::RoomSource`].
//!
//! Everything is synchronous and free of shared mutable state. Results are
//! snapshots and do not reserve anything.

pub mod candidates;
pub mod config;
pub mod finder;
pub mod service;
pub mod source;
pub mod timeline;
pub mod usage;

pub mod prelude {
    pub use crate::candidates::{CandidateSlotGenerator, CandidateSlots};
    pub use crate::config::{EngineConfig, EngineConfigBuildError, EngineConfigBuilder};
    pub use crate::finder::{AvailabilityFinder, AvailabilityOutcome};
    pub use crate::service::{
        AvailabilityError, AvailabilityRequest, AvailabilityService, LegRequest,
    };
    pub use crate::source::{AppointmentSource, InMemorySource, RoomSource, SourceError};
    pub use crate::timeline::{Timeline, Timelines, build_timelines};
    pub use crate::usage::LocationUsageResolver;
}
