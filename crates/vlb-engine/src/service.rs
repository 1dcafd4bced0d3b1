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

//! Request-level entry points tying the engine to its collaborators.

use crate::{
    config::EngineConfig,
    finder::{AvailabilityFinder, AvailabilityOutcome},
    source::{AppointmentSource, RoomSource, SourceError},
    timeline::build_timelines,
    usage::LocationUsageResolver,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;
use tracing::{debug, instrument};
use vlb_core::time::TimeInterval;
use vlb_model::{
    RoomProfile,
    booking::{BookingOption, LegKind, LocationLeg},
    err::BookingOptionError,
    id::{BookingId, LocationKey, PartyCode, PrisonCode, RoomAttributeId},
    requester::{Requester, RequesterKind},
    status::AvailabilityStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("invalid booking request: {0}")]
    InvalidArgument(#[from] BookingOptionError),
    #[error("room {location} does not belong to prison {prison}")]
    RoomNotFound {
        location: LocationKey,
        prison: PrisonCode,
    },
    #[error("{0} not found")]
    RoomAttributesNotFound(RoomAttributeId),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl AvailabilityError {
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AvailabilityError::InvalidArgument(_))
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AvailabilityError::RoomNotFound { .. } | AvailabilityError::RoomAttributesNotFound(_)
        )
    }
}

/// One requested leg as it arrives, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegRequest {
    location: LocationKey,
    start: NaiveTime,
    end: NaiveTime,
}

impl LegRequest {
    #[inline]
    pub fn new(location: impl Into<LocationKey>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            location: location.into(),
            start,
            end,
        }
    }

    #[inline]
    pub fn location(&self) -> &LocationKey {
        &self.location
    }

    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    fn to_leg(&self, kind: LegKind) -> Result<LocationLeg, BookingOptionError> {
        let interval = TimeInterval::try_new(self.start, self.end)
            .map_err(|source| BookingOptionError::InvalidLegInterval { leg: kind, source })?;
        Ok(LocationLeg::new(self.location.clone(), interval))
    }
}

/// A request to check whether a booking fits on a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    prison: PrisonCode,
    requester: Requester,
    date: NaiveDate,
    pre: Option<LegRequest>,
    main: Option<LegRequest>,
    post: Option<LegRequest>,
    exclude_booking: Option<BookingId>,
}

impl AvailabilityRequest {
    pub fn new(prison: impl Into<PrisonCode>, requester: Requester, date: NaiveDate) -> Self {
        Self {
            prison: prison.into(),
            requester,
            date,
            pre: None,
            main: None,
            post: None,
            exclude_booking: None,
        }
    }

    #[inline]
    pub fn with_pre(mut self, leg: LegRequest) -> Self {
        self.pre = Some(leg);
        self
    }

    #[inline]
    pub fn with_main(mut self, leg: LegRequest) -> Self {
        self.main = Some(leg);
        self
    }

    #[inline]
    pub fn with_post(mut self, leg: LegRequest) -> Self {
        self.post = Some(leg);
        self
    }

    /// Ignores the appointments of `booking`, for checking an amendment
    /// against everything but the booking being amended.
    #[inline]
    pub fn excluding(mut self, booking: BookingId) -> Self {
        self.exclude_booking = Some(booking);
        self
    }

    #[inline]
    pub fn prison(&self) -> &PrisonCode {
        &self.prison
    }

    #[inline]
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn exclude_booking(&self) -> Option<BookingId> {
        self.exclude_booking
    }

    /// Validates the legs into a booking option.
    pub fn to_option(&self) -> Result<BookingOption, BookingOptionError> {
        let leg = |request: &Option<LegRequest>, kind| {
            request.as_ref().map(|r| r.to_leg(kind)).transpose()
        };
        BookingOption::from_legs(
            leg(&self.pre, LegKind::Pre)?,
            leg(&self.main, LegKind::Main)?,
            leg(&self.post, LegKind::Post)?,
        )
    }
}

/// Availability and usage queries over a data source.
#[derive(Debug, Clone)]
pub struct AvailabilityService<S> {
    source: S,
    finder: AvailabilityFinder,
}

impl<S> AvailabilityService<S>
where
    S: AppointmentSource + RoomSource,
{
    pub fn new(source: S, config: &EngineConfig) -> Self {
        Self {
            source,
            finder: AvailabilityFinder::new(config),
        }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn finder(&self) -> &AvailabilityFinder {
        &self.finder
    }

    /// Checks whether the requested legs are free and suggests alternatives
    /// if they are not.
    ///
    /// # Errors
    ///
    /// * [`AvailabilityError::InvalidArgument`] for malformed legs, before
    ///   any data is read.
    /// * [`AvailabilityError::RoomNotFound`] if a leg names a room outside
    ///   the request's prison.
    /// * [`AvailabilityError::Source`] if a collaborator fails.
    #[instrument(
        level = "debug",
        skip_all,
        fields(prison = %request.prison(), requester = %request.requester(), date = %request.date()),
        err(Display)
    )]
    pub fn check_availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityOutcome, AvailabilityError> {
        let option = request.to_option()?;

        let known = self.source.locations_at(request.prison())?;
        let locations: BTreeSet<&LocationKey> =
            option.legs().map(|(_, leg)| leg.location()).collect();
        if let Some(unknown) = locations.iter().find(|l| !known.contains(**l)) {
            return Err(AvailabilityError::RoomNotFound {
                location: (*unknown).clone(),
                prison: request.prison().clone(),
            });
        }

        let locations: Vec<LocationKey> = locations.into_iter().cloned().collect();
        let appointments = self.source.appointments_on(&locations, request.date())?;
        let excluded = request.exclude_booking();
        let timelines = build_timelines(
            appointments
                .iter()
                .filter(|a| excluded.is_none() || a.booking() != excluded),
        );
        debug!(
            appointments = appointments.len(),
            rooms = timelines.len(),
            "built timelines"
        );

        Ok(self.finder.check(&option, &timelines))
    }

    /// Classifies a room for a requester at `at`.
    #[instrument(level = "debug", skip(self, code), fields(code = %code), err(Display))]
    pub fn is_room_available_for(
        &self,
        room: RoomAttributeId,
        kind: RequesterKind,
        code: &PartyCode,
        at: NaiveDateTime,
    ) -> Result<AvailabilityStatus, AvailabilityError> {
        let profile = self.profile(room)?;
        let requester = Requester::new(kind, code.clone());
        let status = LocationUsageResolver::resolve(
            profile.attributes(),
            profile.schedule(),
            &requester,
            at,
        );
        debug!(%status, "resolved room usage");
        Ok(status)
    }

    /// Checks whether `requester` may book `interval` in a room on `date`.
    pub fn permits_booking(
        &self,
        room: RoomAttributeId,
        requester: &Requester,
        date: NaiveDate,
        interval: &TimeInterval,
    ) -> Result<bool, AvailabilityError> {
        let profile = self.profile(room)?;
        Ok(LocationUsageResolver::permits_booking(
            profile.attributes(),
            profile.schedule(),
            requester,
            date.weekday(),
            interval,
        ))
    }

    fn profile(&self, room: RoomAttributeId) -> Result<RoomProfile, AvailabilityError> {
        self.source
            .room_profile(room)?
            .ok_or(AvailabilityError::RoomAttributesNotFound(room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use chrono::Weekday;
    use std::collections::BTreeSet;
    use vlb_model::{
        booking::ExistingAppointment,
        room::{RoomAttributes, RoomUsage},
        schedule::{RoomSchedule, ScheduleRow, ScheduleUsage},
    };

    const PRISON: &str = "MDI";
    const ROOM_ID: RoomAttributeId = RoomAttributeId::new(1);

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // A Monday.
    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn busy(room: &str, from: NaiveTime, to: NaiveTime) -> ExistingAppointment {
        ExistingAppointment::new(LocationKey::from(room), TimeInterval::try_new(from, to).unwrap())
    }

    fn service(source: InMemorySource) -> AvailabilityService<InMemorySource> {
        AvailabilityService::new(source, &EngineConfig::default())
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_room(PRISON, "VCC-1")
            .with_room(PRISON, "VCC-2")
            .with_appointment(date(), busy("VCC-1", hm(10, 0), hm(11, 0)).owned_by(BookingId::new(42)))
    }

    fn request(from: NaiveTime, to: NaiveTime) -> AvailabilityRequest {
        AvailabilityRequest::new(PRISON, Requester::court("ABC"), date())
            .with_main(LegRequest::new("VCC-1", from, to))
    }

    /// Fails every call, so any error other than a source error proves the
    /// request was rejected before a lookup.
    struct FailingSource;

    impl AppointmentSource for FailingSource {
        fn appointments_on(
            &self,
            _: &[LocationKey],
            _: NaiveDate,
        ) -> Result<Vec<ExistingAppointment>, SourceError> {
            Err(SourceError::new("appointments unavailable"))
        }
    }

    impl RoomSource for FailingSource {
        fn locations_at(&self, _: &PrisonCode) -> Result<BTreeSet<LocationKey>, SourceError> {
            Err(SourceError::new("rooms unavailable"))
        }

        fn room_profile(&self, _: RoomAttributeId) -> Result<Option<RoomProfile>, SourceError> {
            Err(SourceError::new("rooms unavailable"))
        }
    }

    #[test]
    fn test_free_request_is_available() {
        let outcome = service(source())
            .check_availability(&request(hm(11, 0), hm(12, 0)))
            .unwrap();
        assert!(outcome.is_available());
    }

    #[test]
    fn test_taken_request_gets_alternatives() {
        let outcome = service(source())
            .check_availability(&request(hm(10, 0), hm(11, 0)))
            .unwrap();
        assert!(!outcome.is_available());
        let starts: Vec<_> = outcome.alternatives().iter().map(|o| o.main_start()).collect();
        assert_eq!(starts, vec![hm(9, 0), hm(11, 0), hm(11, 15)]);
    }

    #[test]
    fn test_amendment_ignores_own_appointments() {
        let amended = request(hm(10, 0), hm(11, 0)).excluding(BookingId::new(42));
        assert!(service(source()).check_availability(&amended).unwrap().is_available());

        let other = request(hm(10, 0), hm(11, 0)).excluding(BookingId::new(7));
        assert!(!service(source()).check_availability(&other).unwrap().is_available());
    }

    #[test]
    fn test_room_at_other_prison_is_not_found() {
        let request = AvailabilityRequest::new("BMI", Requester::court("ABC"), date())
            .with_main(LegRequest::new("VCC-1", hm(9, 0), hm(10, 0)));
        let err = service(source()).check_availability(&request).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            AvailabilityError::RoomNotFound {
                location: LocationKey::from("VCC-1"),
                prison: PrisonCode::from("BMI"),
            }
        );
    }

    #[test]
    fn test_malformed_requests_fail_before_lookup() {
        let service = AvailabilityService::new(FailingSource, &EngineConfig::default());

        let missing_main = AvailabilityRequest::new(PRISON, Requester::court("ABC"), date());
        assert_eq!(
            service.check_availability(&missing_main).unwrap_err(),
            AvailabilityError::InvalidArgument(BookingOptionError::MissingMainLeg)
        );

        let backwards = request(hm(11, 0), hm(10, 0));
        let err = service.check_availability(&backwards).unwrap_err();
        assert!(err.is_invalid_argument());

        let out_of_order = request(hm(10, 0), hm(11, 0))
            .with_pre(LegRequest::new("VCC-2", hm(10, 30), hm(11, 0)));
        let err = service.check_availability(&out_of_order).unwrap_err();
        assert!(matches!(
            err,
            AvailabilityError::InvalidArgument(BookingOptionError::LegOrder(_))
        ));

        let valid = request(hm(10, 0), hm(11, 0));
        assert!(matches!(
            service.check_availability(&valid).unwrap_err(),
            AvailabilityError::Source(_)
        ));
    }

    #[test]
    fn test_is_room_available_for() {
        let schedule = RoomSchedule::from_rows([ScheduleRow::try_new(
            ScheduleUsage::Probation,
            Weekday::Mon,
            Weekday::Fri,
            hm(9, 0),
            hm(12, 0),
            ["TEAM1"],
        )
        .unwrap()])
        .unwrap();
        let attributes = RoomAttributes::builder()
            .usage(RoomUsage::Schedule)
            .build()
            .unwrap();
        let service = service(source().with_profile(ROOM_ID, RoomProfile::new(attributes, schedule)));
        let at = date().and_time(hm(10, 0));

        let status = service
            .is_room_available_for(ROOM_ID, RequesterKind::Probation, &PartyCode::from("TEAM1"), at)
            .unwrap();
        assert_eq!(status, AvailabilityStatus::ProbationTeam);

        let status = service
            .is_room_available_for(ROOM_ID, RequesterKind::Probation, &PartyCode::from("TEAM2"), at)
            .unwrap();
        assert_eq!(status, AvailabilityStatus::None);

        let err = service
            .is_room_available_for(RoomAttributeId::new(99), RequesterKind::Court, &PartyCode::from("ABC"), at)
            .unwrap_err();
        assert_eq!(err, AvailabilityError::RoomAttributesNotFound(RoomAttributeId::new(99)));
    }

    #[test]
    fn test_permits_booking_reads_weekday_from_date() {
        let schedule = RoomSchedule::from_rows([ScheduleRow::try_new(
            ScheduleUsage::Court,
            Weekday::Mon,
            Weekday::Mon,
            hm(9, 0),
            hm(12, 0),
            ["XYZ"],
        )
        .unwrap()])
        .unwrap();
        let attributes = RoomAttributes::builder()
            .usage(RoomUsage::Schedule)
            .build()
            .unwrap();
        let service = service(source().with_profile(ROOM_ID, RoomProfile::new(attributes, schedule)));
        let morning = TimeInterval::try_new(hm(10, 0), hm(11, 0)).unwrap();
        let court = Requester::court("ABC");

        assert!(!service.permits_booking(ROOM_ID, &court, date(), &morning).unwrap());
        let tuesday = date().succ_opt().unwrap();
        assert!(service.permits_booking(ROOM_ID, &court, tuesday, &morning).unwrap());
    }
}
