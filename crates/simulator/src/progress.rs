use std::io::{self, Stdout, Write};

use chrono::Duration;
use model::Sample;
use utility::duration::format_hms;

use crate::replay::ReplaySummary;

/// Observes a running replay.
pub trait Progress {
    /// `time_left` is the estimated wall-clock time until the route ends.
    fn sample_emitted(&mut self, emitted: usize, time_left: Duration, sample: &Sample);

    fn finished(&mut self, _summary: &ReplaySummary) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn sample_emitted(&mut self, _emitted: usize, _time_left: Duration, _sample: &Sample) {}
}

/// Keeps a single status line updated in place.
pub struct TerminalProgress<W: Write> {
    output: W,
}

impl TerminalProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalProgress<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Progress for TerminalProgress<W> {
    fn sample_emitted(&mut self, emitted: usize, time_left: Duration, _sample: &Sample) {
        // the status line is cosmetic, a broken terminal must not stop the replay
        let _ = write!(
            self.output,
            "\r{} points made | estimated time left: {}",
            emitted,
            format_hms(&time_left)
        );
        let _ = self.output.flush();
    }

    fn finished(&mut self, _summary: &ReplaySummary) {
        let _ = writeln!(self.output);
    }
}
