use std::iter;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use model::{Coordinate, Sample, Trajectory};
use utility::duration;

/// Simulated minutes until the synthetic tank is refilled.
pub const FUEL_PERIOD_MINUTES: f64 = 100.0;

/// Simulated seconds since `start`, scaled by `speed_factor`.
pub fn simulated_time(
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    speed_factor: f64,
) -> f64 {
    duration::as_secs_f64(&(now - start)) * speed_factor
}

/// Sawtooth fuel level in percent: one point per simulated minute, refilled
/// every 100 minutes.
pub fn fuel_level(time: f64) -> f64 {
    100.0 - (time / 60.0).rem_euclid(FUEL_PERIOD_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedEstimate {
    /// meters along the lookahead window
    pub distance: f64,
    /// simulated seconds until the end of the window is reached
    pub duration: f64,
    /// meters per second
    pub speed: f64,
}

impl SpeedEstimate {
    const STANDING: SpeedEstimate = SpeedEstimate {
        distance: 0.0,
        duration: 0.0,
        speed: 0.0,
    };
}

/// Estimates the speed at `time` from the distance still to cover through the
/// next `lookahead` trajectory points and the time left to get there.
///
/// `current` is the interpolated position at `time`. The window starts at the
/// first point not before `time` and is cut at the last trajectory point. If
/// no time is left in the window the speed is 0.
pub fn estimate_speed(
    trajectory: &Trajectory,
    time: f64,
    current: Coordinate,
    lookahead: usize,
) -> SpeedEstimate {
    if lookahead == 0 {
        return SpeedEstimate::STANDING;
    }
    let points = trajectory.points();
    let last = points.len() - 1;
    let start = trajectory.insertion_index(time).min(last);
    let end = (start + lookahead - 1).min(last);
    let window = &points[start..=end];

    let distance = iter::once(current)
        .chain(window.iter().map(|point| point.coordinate))
        .tuple_windows()
        .map(|(from, to)| from.distance_m(&to))
        .sum::<f64>();
    let duration = points[end].time - time;

    if duration > 0.0 {
        SpeedEstimate {
            distance,
            duration,
            speed: distance / duration,
        }
    } else {
        SpeedEstimate {
            distance,
            duration,
            speed: 0.0,
        }
    }
}

/// Everything emitted for one iteration, plus the speed estimate behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub sample: Sample,
    pub estimate: SpeedEstimate,
}

/// Computes the sample for simulated `time`, stamped with wall-clock `now`.
pub fn measure(
    trajectory: &Trajectory,
    time: f64,
    now: DateTime<Utc>,
    lookahead: usize,
) -> Measurement {
    let position = trajectory.position_at(time);
    let estimate = estimate_speed(trajectory, time, position, lookahead);
    Measurement {
        sample: Sample {
            latitude: position.latitude,
            longitude: position.longitude,
            speed: estimate.speed,
            fuel_level: fuel_level(time),
            timestamp: now,
        },
        estimate,
    }
}
