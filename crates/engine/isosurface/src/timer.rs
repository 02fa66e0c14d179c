//! Stage timing for extraction passes
//!
//! Records an instant per tagged stage and reports the time spent between
//! consecutive stages, then starts over.

use std::time::{Duration, Instant};

/// Tagged checkpoints within one pass
#[derive(Debug, Clone, Default)]
pub struct StageTimer {
    marks: Vec<(String, Instant)>,
}

impl StageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the end of the stage named `tag`.
    ///
    /// The first call only marks the starting point.
    pub fn log(&mut self, tag: impl Into<String>) {
        self.marks.push((tag.into(), Instant::now()));
    }

    /// Time spent in each stage since the first mark
    pub fn stages(&self) -> Vec<(&str, Duration)> {
        self.marks
            .windows(2)
            .map(|w| (w[1].0.as_str(), w[1].1.duration_since(w[0].1)))
            .collect()
    }

    /// Sum of all stage durations
    pub fn total(&self) -> Duration {
        match (self.marks.first(), self.marks.last()) {
            (Some(first), Some(last)) => last.1.duration_since(first.1),
            _ => Duration::ZERO,
        }
    }

    /// Emit one debug line per stage and clear all marks.
    pub fn report(&mut self) {
        for (tag, elapsed) in self.stages() {
            tracing::debug!("{:>20}: {:.6}s", tag, elapsed.as_secs_f64());
        }
        self.marks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
