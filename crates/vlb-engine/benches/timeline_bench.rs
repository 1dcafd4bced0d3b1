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

use chrono::NaiveTime;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use vlb_core::time::{TimeInterval, time_from_nanos};
use vlb_engine::timeline::{Timeline, build_timelines};
use vlb_model::{booking::ExistingAppointment, id::LocationKey};

const MINUTES_PER_DAY: i64 = 24 * 60;

#[inline]
fn at(minute: i64) -> NaiveTime {
    time_from_nanos(minute * 60_000_000_000).expect("minute within the day")
}

fn gen_intervals(n: usize, rng: &mut impl Rng) -> Vec<TimeInterval> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let a = rng.random_range(0..MINUTES_PER_DAY - 1);
        let w = rng.random_range(1..=120).min(MINUTES_PER_DAY - 1 - a);
        out.push(TimeInterval::try_new(at(a), at(a + w)).expect("non-empty interval"));
    }
    out
}

fn register_build(c: &mut Criterion, occupied_n: usize) {
    let mut group = c.benchmark_group("timeline_build");
    group.throughput(Throughput::Elements(occupied_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0x71AE_11AE);
    let occupied = gen_intervals(occupied_n, &mut rng);

    group.bench_function(BenchmarkId::new("from_occupied", occupied_n), |b| {
        b.iter(|| black_box(Timeline::from_occupied(&occupied)))
    });

    let appointments: Vec<ExistingAppointment> = occupied
        .iter()
        .enumerate()
        .map(|(i, iv)| ExistingAppointment::new(LocationKey::new(format!("ROOM-{}", i % 16)), *iv))
        .collect();
    group.bench_function(BenchmarkId::new("build_timelines", occupied_n), |b| {
        b.iter(|| black_box(build_timelines(&appointments)))
    });
    group.finish();
}

fn register_queries(c: &mut Criterion, occupied_n: usize, queries_n: usize) {
    let mut group = c.benchmark_group("timeline_queries");
    group.throughput(Throughput::Elements(queries_n as u64));

    let mut rng = ChaCha8Rng::seed_from_u64(0xF1EE_C0DE);
    let timeline = Timeline::from_occupied(&gen_intervals(occupied_n, &mut rng));
    let queries = gen_intervals(queries_n, &mut rng);

    group.bench_function(BenchmarkId::new("is_interval_free", occupied_n), |b| {
        b.iter(|| {
            let mut free_cnt = 0usize;
            for q in &queries {
                if timeline.is_interval_free(q) {
                    free_cnt += 1;
                }
            }
            black_box(free_cnt)
        })
    });
    group.finish();
}

fn timeline_benches(c: &mut Criterion) {
    for &n in &[8usize, 64, 512] {
        register_build(c, n);
        register_queries(c, n, 10_000);
    }
}

criterion_group!(benches, timeline_benches);
criterion_main!(benches);
