use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Source of wall-clock time for the replay loop.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// A manually driven clock. Sleeping advances time instantly, so a whole
/// replay runs without waiting.
#[derive(Debug)]
pub struct VirtualClock {
    now: Mutex<DateTime<Utc>>,
    /// added after every `now()` call, stands in for time spent working
    work_per_read: chrono::Duration,
}

impl VirtualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_work(start, chrono::Duration::zero())
    }

    pub fn with_work(start: DateTime<Utc>, work_per_read: chrono::Duration) -> Self {
        Self {
            now: Mutex::new(start),
            work_per_read,
        }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poison| poison.into_inner());
        *now += duration;
    }

    /// Current time without counting as a read.
    pub fn peek(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap_or_else(|poison| poison.into_inner());
        let current = *now;
        *now += self.work_per_read;
        current
    }

    async fn sleep(&self, duration: Duration) {
        if let Ok(duration) = chrono::Duration::from_std(duration) {
            self.advance(duration);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paced {
    /// Slept for the rest of the cadence.
    Slept,
    /// The iteration took at least one full cadence; no sleep.
    Overran,
    Cancelled,
}

/// Periodic tick source. Keeps iterations at least `cadence` apart but never
/// shortens a tick to catch up.
pub struct Pacer<'a, C: Clock> {
    clock: &'a C,
    cadence: Duration,
}

impl<'a, C: Clock> Pacer<'a, C> {
    pub fn new(clock: &'a C, cadence: Duration) -> Self {
        Self { clock, cadence }
    }

    /// Sleeps until `cadence` has passed since `iteration_started`.
    pub async fn pace(
        &self,
        iteration_started: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Paced {
        // a clock going backwards counts as no time spent
        let spent = (self.clock.now() - iteration_started)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if spent >= self.cadence {
            return Paced::Overran;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Paced::Cancelled,
            _ = self.clock.sleep(self.cadence - spent) => Paced::Slept,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn virtual_clock_counts_work_per_read() {
        let clock = VirtualClock::with_work(epoch(), chrono::Duration::milliseconds(250));
        assert_eq!(clock.now(), epoch());
        assert_eq!(clock.now(), epoch() + chrono::Duration::milliseconds(250));
        assert_eq!(clock.peek(), epoch() + chrono::Duration::milliseconds(500));
    }

    #[tokio::test]
    async fn pacer_sleeps_the_remainder() {
        let clock = VirtualClock::new(epoch());
        let pacer = Pacer::new(&clock, Duration::from_secs(1));
        let started = clock.now();
        clock.advance(chrono::Duration::milliseconds(300));
        let paced = pacer.pace(started, &CancellationToken::new()).await;
        assert_eq!(paced, Paced::Slept);
        assert_eq!(clock.peek(), epoch() + chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn pacer_never_shortens_after_overrun() {
        let clock = VirtualClock::new(epoch());
        let pacer = Pacer::new(&clock, Duration::from_secs(1));
        let started = clock.now();
        clock.advance(chrono::Duration::milliseconds(1500));
        let paced = pacer.pace(started, &CancellationToken::new()).await;
        assert_eq!(paced, Paced::Overran);
        assert_eq!(clock.peek(), epoch() + chrono::Duration::milliseconds(1500));
    }

    #[tokio::test]
    async fn pacer_stops_sleeping_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let clock = SystemClock;
        let pacer = Pacer::new(&clock, Duration::from_secs(3600));
        let paced = pacer.pace(clock.now(), &cancel).await;
        assert_eq!(paced, Paced::Cancelled);
    }
}
