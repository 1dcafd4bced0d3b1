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

use crate::requester::RequesterKind;
use std::fmt::Display;

/// Outcome of classifying a room for a requester at a moment in time.
///
/// Variants are declared most-specific first, so the derived ordering can be
/// used to pick the strongest of several candidate statuses with `min()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AvailabilityStatus {
    /// Reserved for the requesting probation team by name.
    ProbationTeam,
    /// Reserved for probation use, any team.
    ProbationAny,
    /// Reserved for the requesting court by name.
    CourtRoom,
    /// Reserved for court use, any court.
    CourtAny,
    /// Open to everyone.
    Shared,
    /// The requester may not use the room.
    None,
}

impl AvailabilityStatus {
    /// The status granted to a requester named explicitly by a room or row.
    #[inline]
    pub fn named(kind: RequesterKind) -> Self {
        match kind {
            RequesterKind::Court => AvailabilityStatus::CourtRoom,
            RequesterKind::Probation => AvailabilityStatus::ProbationTeam,
        }
    }

    /// The status granted to any requester of the given kind.
    #[inline]
    pub fn any_of(kind: RequesterKind) -> Self {
        match kind {
            RequesterKind::Court => AvailabilityStatus::CourtAny,
            RequesterKind::Probation => AvailabilityStatus::ProbationAny,
        }
    }

    /// Whether the requester may use the room at all.
    #[inline]
    pub fn is_available(self) -> bool {
        self != AvailabilityStatus::None
    }
}

impl Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AvailabilityStatus::ProbationTeam => "PROBATION_TEAM",
            AvailabilityStatus::ProbationAny => "PROBATION_ANY",
            AvailabilityStatus::CourtRoom => "COURT_ROOM",
            AvailabilityStatus::CourtAny => "COURT_ANY",
            AvailabilityStatus::Shared => "SHARED",
            AvailabilityStatus::None => "NONE",
        };
        f.write_str(s)
    }
}
