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

use crate::{err::RoomAttributesError, id::PartyCode, requester::RequesterKind};
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomStatus {
    #[default]
    Active,
    Inactive,
}

/// Who a room is set aside for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomUsage {
    /// Any court or probation team may book.
    #[default]
    Shared,
    Court,
    Probation,
    /// Access follows the room's weekly schedule.
    Schedule,
}

impl RoomUsage {
    /// The requester kind this usage is dedicated to, if any.
    #[inline]
    pub fn dedicated_to(self) -> Option<RequesterKind> {
        match self {
            RoomUsage::Court => Some(RequesterKind::Court),
            RoomUsage::Probation => Some(RequesterKind::Probation),
            RoomUsage::Shared | RoomUsage::Schedule => None,
        }
    }
}

impl Display for RoomUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomUsage::Shared => write!(f, "SHARED"),
            RoomUsage::Court => write!(f, "COURT"),
            RoomUsage::Probation => write!(f, "PROBATION"),
            RoomUsage::Schedule => write!(f, "SCHEDULE"),
        }
    }
}

/// Static attributes of a bookable room.
///
/// Values are immutable; use [`RoomAttributes::builder`] or
/// [`RoomAttributes::to_builder`] to derive a changed copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomAttributes {
    status: RoomStatus,
    usage: RoomUsage,
    allowed_parties: BTreeSet<PartyCode>,
}

impl RoomAttributes {
    #[inline]
    pub fn builder() -> RoomAttributesBuilder {
        RoomAttributesBuilder::default()
    }

    /// An active room open to everyone.
    #[inline]
    pub fn shared() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    #[inline]
    pub fn usage(&self) -> RoomUsage {
        self.usage
    }

    /// Parties the room is restricted to. Empty means any party of the
    /// matching usage.
    #[inline]
    pub fn allowed_parties(&self) -> &BTreeSet<PartyCode> {
        &self.allowed_parties
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == RoomStatus::Active
    }

    /// Starts a builder pre-populated with these attributes.
    pub fn to_builder(&self) -> RoomAttributesBuilder {
        RoomAttributesBuilder {
            status: self.status,
            usage: self.usage,
            allowed_parties: self.allowed_parties.iter().cloned().collect(),
        }
    }
}

/// Builder for [`RoomAttributes`].
#[derive(Debug, Clone, Default)]
pub struct RoomAttributesBuilder {
    status: RoomStatus,
    usage: RoomUsage,
    allowed_parties: Vec<PartyCode>,
}

impl RoomAttributesBuilder {
    #[inline]
    pub fn status(mut self, v: RoomStatus) -> Self {
        self.status = v;
        self
    }

    #[inline]
    pub fn usage(mut self, v: RoomUsage) -> Self {
        self.usage = v;
        self
    }

    #[inline]
    pub fn allowed_party(mut self, v: impl Into<PartyCode>) -> Self {
        self.allowed_parties.push(v.into());
        self
    }

    pub fn allowed_parties<I, P>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PartyCode>,
    {
        self.allowed_parties = parties.into_iter().map(Into::into).collect();
        self
    }

    /// Validates and freezes the attributes.
    ///
    /// Only court and probation rooms may be restricted to named parties;
    /// scheduled rooms carry their parties on individual schedule rows.
    pub fn build(self) -> Result<RoomAttributes, RoomAttributesError> {
        if !self.allowed_parties.is_empty() && self.usage.dedicated_to().is_none() {
            return Err(RoomAttributesError::PartiesNotApplicable(self.usage));
        }

        let mut allowed_parties = BTreeSet::new();
        for party in self.allowed_parties {
            if party.is_blank() {
                return Err(RoomAttributesError::BlankParty);
            }
            if allowed_parties.contains(&party) {
                return Err(RoomAttributesError::DuplicateParty(party));
            }
            allowed_parties.insert(party);
        }

        Ok(RoomAttributes {
            status: self.status,
            usage: self.usage,
            allowed_parties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_active_shared() {
        let attrs = RoomAttributes::shared();
        assert!(attrs.is_active());
        assert_eq!(attrs.usage(), RoomUsage::Shared);
        assert!(attrs.allowed_parties().is_empty());
    }

    #[test]
    fn test_build_court_room_with_parties() {
        let attrs = RoomAttributes::builder()
            .usage(RoomUsage::Court)
            .allowed_parties(["XYZ", "ABC"])
            .build()
            .unwrap();
        let parties: Vec<_> = attrs.allowed_parties().iter().map(PartyCode::as_str).collect();
        assert_eq!(parties, vec!["ABC", "XYZ"]);
    }

    #[test]
    fn test_build_rejects_parties_on_shared_and_scheduled_rooms() {
        for usage in [RoomUsage::Shared, RoomUsage::Schedule] {
            let err = RoomAttributes::builder()
                .usage(usage)
                .allowed_party("ABC")
                .build()
                .unwrap_err();
            assert_eq!(err, RoomAttributesError::PartiesNotApplicable(usage));
        }
    }

    #[test]
    fn test_build_rejects_blank_and_duplicate_parties() {
        let err = RoomAttributes::builder()
            .usage(RoomUsage::Probation)
            .allowed_party("  ")
            .build()
            .unwrap_err();
        assert_eq!(err, RoomAttributesError::BlankParty);

        let err = RoomAttributes::builder()
            .usage(RoomUsage::Probation)
            .allowed_parties(["T1", "T1"])
            .build()
            .unwrap_err();
        assert_eq!(err, RoomAttributesError::DuplicateParty(PartyCode::new("T1")));
    }

    #[test]
    fn test_to_builder_derives_new_value() {
        let original = RoomAttributes::builder()
            .usage(RoomUsage::Court)
            .build()
            .unwrap();
        let inactive = original
            .to_builder()
            .status(RoomStatus::Inactive)
            .build()
            .unwrap();

        assert!(original.is_active());
        assert!(!inactive.is_active());
        assert_eq!(inactive.usage(), RoomUsage::Court);
    }
}
