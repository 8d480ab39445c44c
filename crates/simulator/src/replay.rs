use model::Trajectory;
use tokio_util::sync::CancellationToken;
use utility::duration;

use crate::{
    clock::{Clock, Pacer, Paced},
    config::SimulationConfig,
    progress::Progress,
    sampler::{measure, simulated_time},
    sink::TelemetrySink,
    EmissionKind, ReplayError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Simulated time passed the end of the trajectory.
    Completed,
    /// Cancelled from outside before the end was reached.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub outcome: ReplayOutcome,
    /// number of samples whose datapoint and waypoint were both delivered
    pub samples: usize,
    /// simulated seconds at the last emitted sample
    pub simulated_time: f64,
}

/// Drives a trajectory in (scaled) real time and reports a sample per tick.
pub struct Replay<'a> {
    trajectory: &'a Trajectory,
    config: &'a SimulationConfig,
}

impl<'a> Replay<'a> {
    pub fn new(trajectory: &'a Trajectory, config: &'a SimulationConfig) -> Self {
        Self { trajectory, config }
    }

    /// Runs until simulated time exceeds the trajectory or `cancel` fires.
    ///
    /// Every iteration sends the datapoint and then the waypoint of the current
    /// sample. The first failing call ends the replay with an error, a failed
    /// datapoint is never followed by its waypoint. Cancellation is only
    /// observed between iterations and while pacing, so it never splits a
    /// sample.
    pub async fn run<C, S, P>(
        &self,
        clock: &C,
        sink: &S,
        progress: &mut P,
        cancel: &CancellationToken,
    ) -> Result<ReplaySummary, ReplayError>
    where
        C: Clock,
        S: TelemetrySink,
        P: Progress + ?Sized,
    {
        self.config.validate()?;

        let pacer = Pacer::new(clock, self.config.cadence);
        let speed_factor = self.config.speed_factor;
        let end_time = self.trajectory.total_duration();
        let wall_duration =
            duration::from_secs_f64(end_time / speed_factor);

        let start = clock.now();
        let mut summary = ReplaySummary {
            outcome: ReplayOutcome::Completed,
            samples: 0,
            simulated_time: 0.0,
        };

        loop {
            if cancel.is_cancelled() {
                summary.outcome = ReplayOutcome::Interrupted;
                break;
            }

            let now = clock.now();
            let time = simulated_time(start, now, speed_factor);
            if time > end_time {
                break;
            }

            let measurement = measure(
                self.trajectory,
                time,
                now,
                self.config.lookahead_steps,
            );
            let sample = &measurement.sample;
            let timestamp_ms = sample.timestamp_ms();

            sink.create_datapoint(&sample.data_points(), timestamp_ms)
                .await
                .map_err(|why| ReplayError::Emission {
                    kind: EmissionKind::Datapoint,
                    source: Box::new(why),
                })?;
            sink.create_waypoint(sample.latitude, sample.longitude, timestamp_ms)
                .await
                .map_err(|why| ReplayError::Emission {
                    kind: EmissionKind::Waypoint,
                    source: Box::new(why),
                })?;

            summary.samples += 1;
            summary.simulated_time = time;

            log::debug!(
                "Must travel {:.2} m, at {:.2} km/h, in {:.2} s [fuel {:.1} %]",
                measurement.estimate.distance,
                measurement.estimate.speed * 3.6,
                measurement.estimate.duration,
                sample.fuel_level
            );
            let time_left = (wall_duration - (now - start)).max(chrono::Duration::zero());
            progress.sample_emitted(summary.samples, time_left, sample);

            if pacer.pace(now, cancel).await == Paced::Cancelled {
                summary.outcome = ReplayOutcome::Interrupted;
                break;
            }
        }

        match summary.outcome {
            ReplayOutcome::Completed => log::info!(
                "route finished after {} samples ({:.0} s simulated)",
                summary.samples,
                summary.simulated_time
            ),
            ReplayOutcome::Interrupted => log::info!(
                "replay interrupted after {} samples ({:.0} s simulated)",
                summary.samples,
                summary.simulated_time
            ),
        }
        progress.finished(&summary);
        Ok(summary)
    }
}
