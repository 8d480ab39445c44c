use std::error;
use std::fmt;

use utility::geo::Coordinate;

/// A position together with the simulated seconds since the route started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub coordinate: Coordinate,
    pub time: f64,
}

impl TrajectoryPoint {
    pub fn new(coordinate: Coordinate, time: f64) -> Self {
        Self { coordinate, time }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    TooShort { points: usize },
    NotStartingAtZero { time: f64 },
    OutOfOrder { index: usize, previous: f64, time: f64 },
    NonFiniteTime { index: usize },
}

impl error::Error for TrajectoryError {}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrajectoryError::TooShort { points } => {
                write!(f, "trajectory needs at least 2 points, got {}", points)
            }
            TrajectoryError::NotStartingAtZero { time } => {
                write!(f, "trajectory starts at {} s instead of 0 s", time)
            }
            TrajectoryError::OutOfOrder {
                index,
                previous,
                time,
            } => write!(
                f,
                "trajectory out of order at point {}: {} s then {} s",
                index, previous, time
            ),
            TrajectoryError::NonFiniteTime { index } => {
                write!(f, "trajectory time at point {} is not finite", index)
            }
        }
    }
}

/// Time-indexed path of a whole route. Times never decrease, the first point
/// is at 0 s and the last one at the total route duration.
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
    /// meters
    total_distance: f64,
}

impl Trajectory {
    pub fn new(
        points: Vec<TrajectoryPoint>,
        total_distance: f64,
    ) -> Result<Self, TrajectoryError> {
        if points.len() < 2 {
            return Err(TrajectoryError::TooShort {
                points: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|point| !point.time.is_finite())
        {
            return Err(TrajectoryError::NonFiniteTime { index });
        }
        if points[0].time != 0.0 {
            return Err(TrajectoryError::NotStartingAtZero {
                time: points[0].time,
            });
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(TrajectoryError::OutOfOrder {
                    index: index + 1,
                    previous: pair[0].time,
                    time: pair[1].time,
                });
            }
        }
        Ok(Self {
            points,
            total_distance,
        })
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn first(&self) -> &TrajectoryPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TrajectoryPoint {
        &self.points[self.points.len() - 1]
    }

    /// Seconds from start to the final point.
    pub fn total_duration(&self) -> f64 {
        self.last().time
    }

    /// Meters, as reported by the route source.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Index of the first point whose time is `>= time`. Equals the number of
    /// points if `time` lies beyond the last point.
    pub fn insertion_index(&self, time: f64) -> usize {
        self.points.partition_point(|point| point.time < time)
    }

    /// Piecewise-linear position at `time`. Times outside the trajectory are
    /// clamped to its first or last point.
    pub fn position_at(&self, time: f64) -> Coordinate {
        let index = self.insertion_index(time);
        if index == 0 {
            return self.first().coordinate;
        }
        if index == self.points.len() {
            return self.last().coordinate;
        }
        let next = &self.points[index];
        if next.time == time {
            return next.coordinate;
        }
        // previous.time < time < next.time
        let previous = &self.points[index - 1];
        let fraction = (time - previous.time) / (next.time - previous.time);
        previous.coordinate.lerp(&next.coordinate, fraction)
    }
}
