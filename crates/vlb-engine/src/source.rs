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

//! Collaborator seams: where appointments and room data come from.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use vlb_model::{
    RoomProfile,
    booking::ExistingAppointment,
    id::{LocationKey, PrisonCode, RoomAttributeId},
};

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("source failure: {message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Supplies the appointments already booked in rooms.
pub trait AppointmentSource {
    /// All appointments in any of `locations` on `date`.
    fn appointments_on(
        &self,
        locations: &[LocationKey],
        date: NaiveDate,
    ) -> Result<Vec<ExistingAppointment>, SourceError>;
}

/// Supplies rooms and their usage rules.
pub trait RoomSource {
    /// The room keys that belong to `prison`. Unknown prisons have none.
    fn locations_at(&self, prison: &PrisonCode) -> Result<BTreeSet<LocationKey>, SourceError>;

    /// Attributes and schedule for a room, `None` if the id is unknown.
    fn room_profile(&self, id: RoomAttributeId) -> Result<Option<RoomProfile>, SourceError>;
}

/// A source held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rooms: BTreeMap<PrisonCode, BTreeSet<LocationKey>>,
    profiles: HashMap<RoomAttributeId, RoomProfile>,
    appointments: BTreeMap<NaiveDate, Vec<ExistingAppointment>>,
}

impl InMemorySource {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a room at a prison.
    pub fn with_room(mut self, prison: impl Into<PrisonCode>, location: impl Into<LocationKey>) -> Self {
        self.rooms
            .entry(prison.into())
            .or_default()
            .insert(location.into());
        self
    }

    /// Registers (or replaces) the usage rules of a room.
    pub fn with_profile(mut self, id: impl Into<RoomAttributeId>, profile: RoomProfile) -> Self {
        self.profiles.insert(id.into(), profile);
        self
    }

    pub fn with_appointment(mut self, date: NaiveDate, appointment: ExistingAppointment) -> Self {
        self.appointments.entry(date).or_default().push(appointment);
        self
    }

    pub fn with_appointments<I>(self, date: NaiveDate, appointments: I) -> Self
    where
        I: IntoIterator<Item = ExistingAppointment>,
    {
        appointments
            .into_iter()
            .fold(self, |source, a| source.with_appointment(date, a))
    }
}

impl AppointmentSource for InMemorySource {
    fn appointments_on(
        &self,
        locations: &[LocationKey],
        date: NaiveDate,
    ) -> Result<Vec<ExistingAppointment>, SourceError> {
        Ok(self
            .appointments
            .get(&date)
            .into_iter()
            .flatten()
            .filter(|a| locations.contains(a.location()))
            .cloned()
            .collect())
    }
}

impl RoomSource for InMemorySource {
    fn locations_at(&self, prison: &PrisonCode) -> Result<BTreeSet<LocationKey>, SourceError> {
        Ok(self.rooms.get(prison).cloned().unwrap_or_default())
    }

    fn room_profile(&self, id: RoomAttributeId) -> Result<Option<RoomProfile>, SourceError> {
        Ok(self.profiles.get(&id).cloned())
    }
}
