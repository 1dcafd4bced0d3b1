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

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    env,
    error::Error,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use vlb_core::time::TimeInterval;
use vlb_engine::prelude::*;
use vlb_model::prelude::*;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum KindDto {
    Court,
    Probation,
}

impl From<KindDto> for RequesterKind {
    fn from(value: KindDto) -> Self {
        match value {
            KindDto::Court => RequesterKind::Court,
            KindDto::Probation => RequesterKind::Probation,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum StatusDto {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum UsageDto {
    #[default]
    Shared,
    Court,
    Probation,
    Schedule,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RowUsageDto {
    Court,
    Probation,
    Blocked,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigDto {
    day_start: Option<NaiveTime>,
    day_end: Option<NaiveTime>,
    step_minutes: Option<i64>,
    max_alternatives: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScheduleRowDto {
    usage: RowUsageDto,
    start_day: Weekday,
    end_day: Weekday,
    start_time: NaiveTime,
    end_time: NaiveTime,
    #[serde(default)]
    allowed_parties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RoomDto {
    prison: String,
    location: String,
    attribute_id: Option<u64>,
    #[serde(default)]
    status: StatusDto,
    #[serde(default)]
    usage: UsageDto,
    #[serde(default)]
    allowed_parties: Vec<String>,
    #[serde(default)]
    schedule: Vec<ScheduleRowDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct AppointmentDto {
    location: String,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    booking: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequesterDto {
    kind: KindDto,
    code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LegDto {
    location: String,
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
struct RequestDto {
    prison: String,
    requester: RequesterDto,
    date: NaiveDate,
    pre: Option<LegDto>,
    main: Option<LegDto>,
    post: Option<LegDto>,
    exclude_booking: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct UsageQueryDto {
    attribute_id: u64,
    requester: RequesterDto,
    at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    config: ConfigDto,
    rooms: Vec<RoomDto>,
    appointments: Vec<AppointmentDto>,
    requests: Vec<RequestDto>,
    usage_queries: Vec<UsageQueryDto>,
}

#[derive(Debug, Clone, Serialize)]
struct OptionReport {
    pre: Option<LegDto>,
    main: LegDto,
    post: Option<LegDto>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestReport {
    idx: usize,
    requester: RequesterDto,
    available: Option<bool>,
    alternatives: Vec<OptionReport>,
    error_kind: Option<&'static str>,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct UsageReport {
    idx: usize,
    attribute_id: u64,
    requester: RequesterDto,
    at: NaiveDateTime,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    description: String,
    day_start: NaiveTime,
    day_end: NaiveTime,
    step_minutes: i64,
    max_alternatives: usize,
    requests: Vec<RequestReport>,
    usage_queries: Vec<UsageReport>,
}

fn leg_report(leg: &LocationLeg) -> LegDto {
    LegDto {
        location: leg.location().to_string(),
        start: leg.interval().start(),
        end: leg.interval().end(),
    }
}

fn option_report(option: &BookingOption) -> OptionReport {
    OptionReport {
        pre: option.pre().map(leg_report),
        main: leg_report(option.main()),
        post: option.post().map(leg_report),
    }
}

fn error_kind(e: &AvailabilityError) -> &'static str {
    if e.is_invalid_argument() {
        "INVALID_ARGUMENT"
    } else if e.is_not_found() {
        "NOT_FOUND"
    } else {
        "SOURCE"
    }
}

fn engine_config(dto: &ConfigDto) -> Result<EngineConfig, EngineConfigBuildError> {
    let mut builder = EngineConfig::builder();
    if let Some(v) = dto.day_start {
        builder = builder.day_start(v);
    }
    if let Some(v) = dto.day_end {
        builder = builder.day_end(v);
    }
    if let Some(v) = dto.step_minutes {
        builder = builder.step(TimeDelta::minutes(v));
    }
    if let Some(v) = dto.max_alternatives {
        builder = builder.max_alternatives(v);
    }
    builder.build()
}

fn room_profile(room: &RoomDto) -> Result<RoomProfile, Box<dyn Error>> {
    let attributes = RoomAttributes::builder()
        .status(match room.status {
            StatusDto::Active => RoomStatus::Active,
            StatusDto::Inactive => RoomStatus::Inactive,
        })
        .usage(match room.usage {
            UsageDto::Shared => RoomUsage::Shared,
            UsageDto::Court => RoomUsage::Court,
            UsageDto::Probation => RoomUsage::Probation,
            UsageDto::Schedule => RoomUsage::Schedule,
        })
        .allowed_parties(room.allowed_parties.iter().map(String::as_str))
        .build()?;

    let mut schedule = RoomSchedule::new();
    for row in &room.schedule {
        let usage = match row.usage {
            RowUsageDto::Court => ScheduleUsage::Court,
            RowUsageDto::Probation => ScheduleUsage::Probation,
            RowUsageDto::Blocked => ScheduleUsage::Blocked,
        };
        let row = ScheduleRow::try_new(
            usage,
            row.start_day,
            row.end_day,
            row.start_time,
            row.end_time,
            row.allowed_parties.iter().map(String::as_str),
        )?;
        schedule = schedule.with_row(row)?;
    }
    Ok(RoomProfile::new(attributes, schedule))
}

fn in_memory_source(scenario: &Scenario) -> Result<InMemorySource, Box<dyn Error>> {
    let mut source = InMemorySource::new();
    for room in &scenario.rooms {
        source = source.with_room(room.prison.as_str(), room.location.as_str());
        if let Some(id) = room.attribute_id {
            source = source.with_profile(id, room_profile(room)?);
        }
    }
    for a in &scenario.appointments {
        let mut appointment = ExistingAppointment::new(
            LocationKey::new(a.location.as_str()),
            TimeInterval::try_new(a.start, a.end)?,
        );
        if let Some(id) = a.booking {
            appointment = appointment.owned_by(BookingId::new(id));
        }
        source = source.with_appointment(a.date, appointment);
    }
    Ok(source)
}

fn availability_request(dto: &RequestDto) -> AvailabilityRequest {
    let leg = |l: &LegDto| LegRequest::new(l.location.as_str(), l.start, l.end);
    let requester = Requester::new(dto.requester.kind.into(), dto.requester.code.as_str());
    let mut request = AvailabilityRequest::new(dto.prison.as_str(), requester, dto.date);
    if let Some(l) = &dto.pre {
        request = request.with_pre(leg(l));
    }
    if let Some(l) = &dto.main {
        request = request.with_main(leg(l));
    }
    if let Some(l) = &dto.post {
        request = request.with_post(leg(l));
    }
    if let Some(id) = dto.exclude_booking {
        request = request.excluding(BookingId::new(id));
    }
    request
}

#[inline]
fn quarter(n: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(n / 4, (n % 4) * 15, 0).expect("quarter within the day")
}

/// A randomised prison with one room of each usage and a busy day.
fn synthetic_scenario(seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let prison = "MDI".to_string();
    let locations = ["MDI-VCC-SHARED", "MDI-VCC-COURT", "MDI-VCC-PROBATION", "MDI-VCC-SCHEDULED"];

    let rooms = vec![
        RoomDto {
            prison: prison.clone(),
            location: locations[0].into(),
            attribute_id: Some(1),
            status: StatusDto::Active,
            usage: UsageDto::Shared,
            allowed_parties: Vec::new(),
            schedule: Vec::new(),
        },
        RoomDto {
            prison: prison.clone(),
            location: locations[1].into(),
            attribute_id: Some(2),
            status: StatusDto::Active,
            usage: UsageDto::Court,
            allowed_parties: vec!["DRBYMC".into()],
            schedule: Vec::new(),
        },
        RoomDto {
            prison: prison.clone(),
            location: locations[2].into(),
            attribute_id: Some(3),
            status: StatusDto::Active,
            usage: UsageDto::Probation,
            allowed_parties: Vec::new(),
            schedule: Vec::new(),
        },
        RoomDto {
            prison: prison.clone(),
            location: locations[3].into(),
            attribute_id: Some(4),
            status: StatusDto::Active,
            usage: UsageDto::Schedule,
            allowed_parties: Vec::new(),
            schedule: vec![
                ScheduleRowDto {
                    usage: RowUsageDto::Court,
                    start_day: Weekday::Mon,
                    end_day: Weekday::Fri,
                    start_time: quarter(36),
                    end_time: quarter(48),
                    allowed_parties: Vec::new(),
                },
                ScheduleRowDto {
                    usage: RowUsageDto::Probation,
                    start_day: Weekday::Mon,
                    end_day: Weekday::Wed,
                    start_time: quarter(52),
                    end_time: quarter(68),
                    allowed_parties: vec!["BLKPPP".into()],
                },
            ],
        },
    ];

    let mut appointments = Vec::new();
    for (i, location) in locations.iter().enumerate() {
        for _ in 0..rng.random_range(2..6) {
            let start = rng.random_range(36..66);
            let len = rng.random_range(1..5);
            appointments.push(AppointmentDto {
                location: (*location).into(),
                date,
                start: quarter(start),
                end: quarter(start + len),
                booking: Some(i as u64 * 100 + u64::from(start)),
            });
        }
    }

    let requests = (0..6)
        .map(|i| {
            let location = locations[rng.random_range(0..locations.len())];
            let start = rng.random_range(36..64);
            let main = LegDto {
                location: location.into(),
                start: quarter(start),
                end: quarter(start + 2),
            };
            let requester = if i % 2 == 0 {
                RequesterDto { kind: KindDto::Court, code: "DRBYMC".into() }
            } else {
                RequesterDto { kind: KindDto::Probation, code: "BLKPPP".into() }
            };
            let pre = matches!(requester.kind, KindDto::Court).then(|| LegDto {
                location: locations[0].into(),
                start: quarter(start - 1),
                end: quarter(start),
            });
            RequestDto {
                prison: prison.clone(),
                requester,
                date,
                pre,
                main: Some(main),
                post: None,
                exclude_booking: None,
            }
        })
        .collect();

    let usage_queries = (1..=4)
        .flat_map(|id| {
            [
                RequesterDto { kind: KindDto::Court, code: "DRBYMC".into() },
                RequesterDto { kind: KindDto::Probation, code: "BLKPPP".into() },
            ]
            .into_iter()
            .map(move |requester| UsageQueryDto {
                attribute_id: id,
                requester,
                at: date.and_time(quarter(40)),
            })
        })
        .collect();

    Scenario {
        config: ConfigDto::default(),
        rooms,
        appointments,
        requests,
        usage_queries,
    }
}

fn load_scenario(path: &str) -> Result<Scenario, Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn run() -> Result<(), Box<dyn Error>> {
    let (scenario, description) = match env::args().nth(1) {
        Some(path) => (load_scenario(&path)?, format!("scenario {path}")),
        None => {
            let seed = 42;
            (synthetic_scenario(seed), format!("synthetic scenario, seed {seed}"))
        }
    };
    info!(%description, rooms = scenario.rooms.len(), requests = scenario.requests.len(), "loaded scenario");

    let config = engine_config(&scenario.config)?;
    let service = AvailabilityService::new(in_memory_source(&scenario)?, &config);

    let requests = scenario
        .requests
        .iter()
        .enumerate()
        .map(|(idx, dto)| {
            let (available, alternatives, error) =
                match service.check_availability(&availability_request(dto)) {
                    Ok(outcome) => (
                        Some(outcome.is_available()),
                        outcome.alternatives().iter().map(option_report).collect(),
                        None,
                    ),
                    Err(e) => {
                        warn!(idx, kind = error_kind(&e), error = %e, "availability check failed");
                        (None, Vec::new(), Some(e))
                    }
                };
            RequestReport {
                idx,
                requester: dto.requester.clone(),
                available,
                alternatives,
                error_kind: error.as_ref().map(error_kind),
                error: error.map(|e| e.to_string()),
            }
        })
        .collect();

    let usage_queries = scenario
        .usage_queries
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let result = service.is_room_available_for(
                RoomAttributeId::new(q.attribute_id),
                q.requester.kind.into(),
                &PartyCode::new(q.requester.code.as_str()),
                q.at,
            );
            UsageReport {
                idx,
                attribute_id: q.attribute_id,
                requester: q.requester.clone(),
                at: q.at,
                status: result.as_ref().ok().map(ToString::to_string),
                error: result.err().map(|e| e.to_string()),
            }
        })
        .collect();

    let report = Report {
        description,
        day_start: config.day_start(),
        day_end: config.day_end(),
        step_minutes: config.step().num_minutes(),
        max_alternatives: config.max_alternatives(),
        requests,
        usage_queries,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() {
    enable_tracing();
    if let Err(e) = run() {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}
