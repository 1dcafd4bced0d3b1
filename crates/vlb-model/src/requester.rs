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

use crate::id::PartyCode;
use std::fmt::Display;

/// The kind of organisation asking to use a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequesterKind {
    Court,
    Probation,
}

impl Display for RequesterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequesterKind::Court => write!(f, "COURT"),
            RequesterKind::Probation => write!(f, "PROBATION"),
        }
    }
}

/// A court or probation team identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requester {
    kind: RequesterKind,
    code: PartyCode,
}

impl Requester {
    #[inline]
    pub fn new(kind: RequesterKind, code: impl Into<PartyCode>) -> Self {
        Self {
            kind,
            code: code.into(),
        }
    }

    #[inline]
    pub fn court(code: impl Into<PartyCode>) -> Self {
        Self::new(RequesterKind::Court, code)
    }

    #[inline]
    pub fn probation(code: impl Into<PartyCode>) -> Self {
        Self::new(RequesterKind::Probation, code)
    }

    #[inline]
    pub fn kind(&self) -> RequesterKind {
        self.kind
    }

    #[inline]
    pub fn code(&self) -> &PartyCode {
        &self.code
    }
}

impl Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.code)
    }
}
