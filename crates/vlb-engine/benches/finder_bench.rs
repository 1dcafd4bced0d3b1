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
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use vlb_core::time::TimeInterval;
use vlb_engine::{
    config::EngineConfig,
    finder::AvailabilityFinder,
    timeline::{Timelines, build_timelines},
};
use vlb_model::{
    booking::{BookingOption, ExistingAppointment, LocationLeg},
    id::LocationKey,
};

#[inline]
fn quarter(n: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(n / 4, (n % 4) * 15, 0).expect("quarter within the day")
}

#[inline]
fn leg(room: &str, a: u32, b: u32) -> LocationLeg {
    LocationLeg::new(
        LocationKey::from(room),
        TimeInterval::try_new(quarter(a), quarter(b)).expect("non-empty leg"),
    )
}

/// Books `density` of the quarter hours between 08:00 and 18:00 in each room.
fn gen_timelines(rooms: &[&str], density: f64, rng: &mut impl Rng) -> Timelines {
    let mut appointments = Vec::new();
    for room in rooms {
        for q in 32..72 {
            if rng.random_bool(density) {
                appointments.push(ExistingAppointment::new(
                    LocationKey::from(*room),
                    TimeInterval::try_new(quarter(q), quarter(q + 1)).expect("quarter slot"),
                ));
            }
        }
    }
    build_timelines(&appointments)
}

fn register_check(c: &mut Criterion, step_minutes: i64) {
    let mut group = c.benchmark_group(format!("finder_check/step_{step_minutes}m"));

    let config = EngineConfig::builder()
        .day_start(quarter(0))
        .day_end(quarter(95))
        .step(TimeDelta::minutes(step_minutes))
        .max_alternatives(3)
        .build()
        .expect("valid engine config");
    let finder = AvailabilityFinder::new(&config);

    let preferred = BookingOption::new(
        Some(leg("PRE", 47, 48)),
        leg("MAIN", 48, 52),
        Some(leg("POST", 52, 53)),
    )
    .expect("ordered legs");

    for &density in &[0.2f64, 0.5, 0.8] {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB00C_1A6E);
        let timelines = gen_timelines(&["PRE", "MAIN", "POST"], density, &mut rng);
        group.bench_function(BenchmarkId::new("density", density), |b| {
            b.iter(|| black_box(finder.check(&preferred, &timelines)))
        });
    }
    group.finish();
}

fn finder_benches(c: &mut Criterion) {
    for &step in &[5i64, 15, 60] {
        register_check(c, step);
    }
}

criterion_group!(benches, finder_benches);
criterion_main!(benches);
