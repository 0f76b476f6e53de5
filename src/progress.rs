//! Progress reporting shared by every solver.
//!
//! A solver hands each new tour to a [`ProgressSink`] and then yields through
//! a [`Pacer`] for the configured step delay. The pacer is the only place a run
//! gives control back to its host, so it is also where cancellation is
//! observed.

use crate::tour::Tour;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Receives tour snapshots as a solver discovers them
pub trait ProgressSink {
    fn publish(&mut self, tour: &Tour);
}

impl<F: FnMut(&Tour)> ProgressSink for F {
    fn publish(&mut self, tour: &Tour) {
        self(tour)
    }
}

/// Sink that drops every event
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&mut self, _tour: &Tour) {}
}

/// Yield point after each emission
pub trait Pacer {
    fn suspend(&mut self, delay: Duration);
}

/// Blocks the current thread for the delay
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn suspend(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Returns immediately; used for batch runs and tests
pub struct NoPacing;

impl Pacer for NoPacing {
    fn suspend(&mut self, _delay: Duration) {}
}

/// Cooperative stop flag shared between a host and a running solver
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle a solver reports through for the length of one run
pub struct Progress<'a> {
    sink: &'a mut dyn ProgressSink,
    pacer: &'a mut dyn Pacer,
    step_delay: Duration,
    cancel: Option<CancelToken>,
    emitted: usize,
}

impl<'a> Progress<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink, pacer: &'a mut dyn Pacer, step_delay: Duration) -> Self {
        Progress {
            sink,
            pacer,
            step_delay,
            cancel: None,
            emitted: 0,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Publish a snapshot, then suspend. Breaks when the run was cancelled.
    pub fn emit(&mut self, tour: &Tour) -> ControlFlow<()> {
        self.sink.publish(tour);
        self.emitted += 1;
        self.pacer.suspend(self.step_delay);
        self.checkpoint()
    }

    /// Check the cancellation flag without emitting
    pub fn checkpoint(&self) -> ControlFlow<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    /// Number of snapshots published so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Sink that keeps a copy of every published tour
#[derive(Debug, Default)]
pub struct Recorder {
    pub tours: Vec<Tour>,
}

impl ProgressSink for Recorder {
    fn publish(&mut self, tour: &Tour) {
        self.tours.push(tour.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::Point;

    struct CountingPacer {
        calls: Vec<Duration>,
    }

    impl Pacer for CountingPacer {
        fn suspend(&mut self, delay: Duration) {
            self.calls.push(delay);
        }
    }

    #[test]
    fn test_emit_calls_sink_then_pacer() {
        let mut seen = Vec::new();
        let mut sink = |t: &Tour| seen.push(t.length());
        let mut pacer = CountingPacer { calls: Vec::new() };
        let tour = Tour::from_points(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);

        let mut progress = Progress::new(&mut sink, &mut pacer, Duration::from_millis(15));
        assert!(progress.emit(&tour).is_continue());
        assert!(progress.emit(&tour).is_continue());
        assert_eq!(progress.emitted(), 2);
        drop(progress);

        assert_eq!(seen, vec![5.0, 5.0]);
        assert_eq!(pacer.calls, vec![Duration::from_millis(15); 2]);
    }

    #[test]
    fn test_cancel_breaks_after_emission() {
        let token = CancelToken::new();
        let mut recorder = Recorder::default();
        let mut pacer = NoPacing;
        let mut progress = Progress::new(&mut recorder, &mut pacer, Duration::ZERO).with_cancel(token.clone());

        assert!(progress.checkpoint().is_continue());
        token.cancel();
        assert!(progress.emit(&Tour::empty()).is_break());
        drop(progress);
        assert_eq!(recorder.tours.len(), 1);
    }
}
