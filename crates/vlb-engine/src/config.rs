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

use chrono::{NaiveTime, TimeDelta};
use vlb_core::{primitives::InvalidIntervalError, time::TimeInterval};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineConfigBuildError {
    #[error("invalid working day: {0}")]
    InvalidDayWindow(#[from] InvalidIntervalError<NaiveTime>),
    #[error("candidate step must be positive, got {0}")]
    NonPositiveStep(TimeDelta),
    #[error("max_alternatives must be at least 1")]
    ZeroAlternatives,
}

/// Tunables for the availability search.
///
/// `day_start`/`day_end` bound where alternative main legs may be placed,
/// `step` is the spacing of the candidate grid and `max_alternatives` caps
/// how many alternatives a single check returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    working_day: TimeInterval,
    step: TimeDelta,
    max_alternatives: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_day: TimeInterval::try_new(
                NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time"),
                NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time"),
            )
            .expect("09:00 is before 17:00"),
            step: TimeDelta::minutes(15),
            max_alternatives: 3,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    #[inline]
    pub fn day_start(&self) -> NaiveTime {
        self.working_day.start()
    }

    #[inline]
    pub fn day_end(&self) -> NaiveTime {
        self.working_day.end()
    }

    #[inline]
    pub fn working_day(&self) -> TimeInterval {
        self.working_day
    }

    #[inline]
    pub fn step(&self) -> TimeDelta {
        self.step
    }

    #[inline]
    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives
    }
}

/// Builder for [`EngineConfig`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    day_start: Option<NaiveTime>,
    day_end: Option<NaiveTime>,
    step: Option<TimeDelta>,
    max_alternatives: Option<usize>,
}

impl EngineConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn day_start(mut self, v: NaiveTime) -> Self {
        self.day_start = Some(v);
        self
    }

    #[inline]
    pub fn day_end(mut self, v: NaiveTime) -> Self {
        self.day_end = Some(v);
        self
    }

    #[inline]
    pub fn step(mut self, v: TimeDelta) -> Self {
        self.step = Some(v);
        self
    }

    #[inline]
    pub fn max_alternatives(mut self, v: usize) -> Self {
        self.max_alternatives = Some(v);
        self
    }

    pub fn build(self) -> Result<EngineConfig, EngineConfigBuildError> {
        let defaults = EngineConfig::default();
        let working_day = TimeInterval::try_new(
            self.day_start.unwrap_or(defaults.day_start()),
            self.day_end.unwrap_or(defaults.day_end()),
        )?;

        let step = self.step.unwrap_or(defaults.step);
        if step <= TimeDelta::zero() {
            return Err(EngineConfigBuildError::NonPositiveStep(step));
        }

        let max_alternatives = self.max_alternatives.unwrap_or(defaults.max_alternatives);
        if max_alternatives == 0 {
            return Err(EngineConfigBuildError::ZeroAlternatives);
        }

        Ok(EngineConfig {
            working_day,
            step,
            max_alternatives,
        })
    }
}
