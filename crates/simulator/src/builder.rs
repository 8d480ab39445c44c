use model::{Coordinate, Route, Trajectory, TrajectoryPoint};
use utility::{geo, polyline};

use crate::{config::TimingStrategy, BuildError};

/// Seconds after the start of the step at which each point is reached. The
/// last point is always reached after exactly `duration`.
fn step_times(points: &[Coordinate], duration: f64, timing: TimingStrategy) -> Vec<f64> {
    let segments = (points.len() - 1) as f64;
    let length = match timing {
        TimingStrategy::Uniform => 0.0,
        TimingStrategy::DistanceWeighted => geo::path_length_m(points),
    };

    let mut times = if length > 0.0 {
        let mut covered = 0.0;
        let mut times = Vec::with_capacity(points.len());
        times.push(0.0);
        for pair in points.windows(2) {
            covered += pair[0].distance_m(&pair[1]);
            times.push((duration * covered / length).min(duration));
        }
        times
    } else {
        (0..points.len())
            .map(|index| duration * index as f64 / segments)
            .collect::<Vec<_>>()
    };
    // rounding must not leave a gap to the next step
    if let Some(last) = times.last_mut() {
        *last = duration;
    }
    times
}

/// Turns a route into one time-indexed trajectory.
///
/// Steps are walked in leg-then-step order. Each step's polyline is decoded
/// and its duration is distributed over the decoded points according to
/// `timing`, starting where the previous step ended.
pub fn build_trajectory(
    route: &Route,
    timing: TimingStrategy,
) -> Result<Trajectory, BuildError> {
    let mut duration_offset = 0.0;
    let mut points = vec![];

    for (leg_index, leg) in route.legs.iter().enumerate() {
        for (step_index, step) in leg.steps.iter().enumerate() {
            if !step.duration.is_finite() || step.duration < 0.0 {
                return Err(BuildError::InvalidDuration {
                    leg: leg_index,
                    step: step_index,
                    duration: step.duration,
                });
            }
            let coordinates =
                polyline::decode(&step.polyline).map_err(|error| {
                    BuildError::Polyline {
                        leg: leg_index,
                        step: step_index,
                        error,
                    }
                })?;
            if coordinates.len() < 2 {
                return Err(BuildError::DegenerateStep {
                    leg: leg_index,
                    step: step_index,
                    points: coordinates.len(),
                });
            }
            let times = step_times(&coordinates, step.duration, timing);
            points.extend(coordinates.into_iter().zip(times).map(
                |(coordinate, time)| {
                    TrajectoryPoint::new(coordinate, duration_offset + time)
                },
            ));
            duration_offset += step.duration;
        }
    }

    if points.is_empty() {
        return Err(BuildError::EmptyRoute);
    }

    let trajectory = Trajectory::new(points, route.distance())?;
    log::debug!(
        "built trajectory of {} points, {:.0} s, {:.0} m",
        trajectory.points().len(),
        trajectory.total_duration(),
        trajectory.total_distance()
    );
    Ok(trajectory)
}
