//! Search termination: wall-clock limit and external cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::SearchState;

/// Stops the search when the time limit elapses or a flag is raised.
///
/// The cancel flag is checked before the clock, so a raised flag always
/// reports [`SearchState::Cancelled`].
#[derive(Debug)]
pub struct Termination<'a> {
    started: Instant,
    limit: Duration,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Termination<'a> {
    /// Starts the clock now.
    pub fn start(limit: Duration, cancel: Option<&'a AtomicBool>) -> Self {
        Self {
            started: Instant::now(),
            limit,
            cancel,
        }
    }

    /// Time since [`Termination::start`].
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The terminal state to stop with, if any.
    pub fn check(&self) -> Option<SearchState> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(SearchState::Cancelled);
        }
        if self.elapsed() >= self.limit {
            return Some(SearchState::TimedOut);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_times_out() {
        let t = Termination::start(Duration::ZERO, None);
        assert_eq!(t.check(), Some(SearchState::TimedOut));
    }

    #[test]
    fn test_running() {
        let t = Termination::start(Duration::from_secs(60), None);
        assert_eq!(t.check(), None);
    }

    #[test]
    fn test_cancel_wins_over_timeout() {
        let flag = AtomicBool::new(false);
        let t = Termination::start(Duration::ZERO, Some(&flag));
        assert_eq!(t.check(), Some(SearchState::TimedOut));
        flag.store(true, Ordering::SeqCst);
        assert_eq!(t.check(), Some(SearchState::Cancelled));
    }
}
