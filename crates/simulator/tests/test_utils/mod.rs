#![allow(dead_code)]

use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use model::{Coordinate, DataPoint, Leg, Route, Sample, Step};
use simulator::{progress::Progress, ReplaySummary, TelemetrySink};
use tokio_util::sync::CancellationToken;
use utility::polyline;

pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_463_000_000, 0).unwrap()
}

pub fn step(points: &[(f64, f64)], duration: f64, distance: f64) -> Step {
    let coordinates = points.iter().copied().map(Coordinate::from).collect::<Vec<_>>();
    Step {
        polyline: polyline::encode(&coordinates),
        duration,
        distance,
    }
}

pub fn leg(steps: Vec<Step>) -> Leg {
    Leg {
        duration: steps.iter().map(|step| step.duration).sum(),
        distance: steps.iter().map(|step| step.distance).sum(),
        steps,
    }
}

pub fn route(summary: &str, legs: Vec<Leg>) -> Route {
    Route {
        summary: summary.to_owned(),
        legs,
    }
}

/// One leg, one step of 100 s and 1000 m through three points in Aalborg.
pub fn aalborg_route() -> Route {
    route(
        "Hobrovej",
        vec![leg(vec![step(
            &[(57.01, 9.90), (57.015, 9.905), (57.02, 9.91)],
            100.0,
            1000.0,
        )])],
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Datapoint {
        data_points: Vec<DataPoint>,
        timestamp_ms: i64,
    },
    Waypoint {
        latitude: f64,
        longitude: f64,
        timestamp_ms: i64,
    },
}

#[derive(Debug)]
pub struct SinkFailure(pub &'static str);

impl Error for SinkFailure {}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records every call. Can be told to fail a given datapoint or waypoint
/// (0-based), or to cancel a token once some waypoints were delivered.
#[derive(Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<Call>>,
    pub fail_datapoint: Option<usize>,
    pub fail_waypoint: Option<usize>,
    pub cancel_after_waypoints: Option<(usize, CancellationToken)>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn waypoints(&self) -> Vec<(f64, f64, i64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Waypoint {
                    latitude,
                    longitude,
                    timestamp_ms,
                } => Some((latitude, longitude, timestamp_ms)),
                _ => None,
            })
            .collect()
    }

    pub fn datapoints(&self) -> Vec<(Vec<DataPoint>, i64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Datapoint {
                    data_points,
                    timestamp_ms,
                } => Some((data_points, timestamp_ms)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, datapoints: bool) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::Datapoint { .. }) == datapoints)
            .count()
    }
}

#[async_trait]
impl TelemetrySink for RecordingSink {
    type Error = SinkFailure;

    async fn create_datapoint(
        &self,
        data_points: &[DataPoint],
        timestamp_ms: i64,
    ) -> Result<(), Self::Error> {
        let index = self.count(true);
        self.calls.lock().unwrap().push(Call::Datapoint {
            data_points: data_points.to_vec(),
            timestamp_ms,
        });
        if self.fail_datapoint == Some(index) {
            return Err(SinkFailure("datapoint rejected"));
        }
        Ok(())
    }

    async fn create_waypoint(
        &self,
        latitude: f64,
        longitude: f64,
        timestamp_ms: i64,
    ) -> Result<(), Self::Error> {
        let index = self.count(false);
        self.calls.lock().unwrap().push(Call::Waypoint {
            latitude,
            longitude,
            timestamp_ms,
        });
        if self.fail_waypoint == Some(index) {
            return Err(SinkFailure("waypoint rejected"));
        }
        if let Some((after, token)) = &self.cancel_after_waypoints {
            if index + 1 >= *after {
                token.cancel();
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub emitted: Vec<(usize, Duration)>,
    pub finished: Vec<ReplaySummary>,
}

impl Progress for RecordingProgress {
    fn sample_emitted(&mut self, emitted: usize, time_left: Duration, _sample: &Sample) {
        self.emitted.push((emitted, time_left));
    }

    fn finished(&mut self, summary: &ReplaySummary) {
        self.finished.push(summary.clone());
    }
}
