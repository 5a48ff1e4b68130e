use crate::ui::SharedSink;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const DEFAULT_COMPLETION_MESSAGE: &str =
    "Time's up! Type 'next' to move on to the next countdown.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

impl CountdownStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CountdownStatus::Completed | CountdownStatus::Stopped)
    }
}

impl fmt::Display for CountdownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownStatus::Idle => write!(f, "not started"),
            CountdownStatus::Running => write!(f, "running"),
            CountdownStatus::Paused => write!(f, "paused"),
            CountdownStatus::Completed => write!(f, "completed"),
            CountdownStatus::Stopped => write!(f, "stopped"),
        }
    }
}

#[derive(Debug)]
struct CountdownState {
    status: CountdownStatus,
    /// Time left as of `resumed_at`, or as of the last pause.
    remaining: Duration,
    resumed_at: Option<Instant>,
}

impl CountdownState {
    fn remaining_now(&self) -> Duration {
        match (self.status, self.resumed_at) {
            (CountdownStatus::Running, Some(at)) => self.remaining.saturating_sub(at.elapsed()),
            (CountdownStatus::Completed | CountdownStatus::Stopped, _) => Duration::ZERO,
            _ => self.remaining,
        }
    }

    fn freeze(&mut self) {
        self.remaining = self.remaining_now();
        self.resumed_at = None;
    }
}

#[derive(Debug)]
struct Shared {
    state: Mutex<CountdownState>,
    wake: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CountdownState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single timed interval.
///
/// State lives behind a mutex shared with the ticker thread spawned by
/// [`Countdown::start`]; every transition takes that lock and checks the
/// current state first, so user commands and timer completion never race.
pub struct Countdown {
    description: String,
    duration: Duration,
    completion_message: String,
    shared: Arc<Shared>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Countdown {
    pub fn new(description: impl Into<String>, duration: Duration) -> Self {
        Self {
            description: description.into(),
            duration,
            completion_message: DEFAULT_COMPLETION_MESSAGE.to_string(),
            shared: Arc::new(Shared {
                state: Mutex::new(CountdownState {
                    status: CountdownStatus::Idle,
                    remaining: duration,
                    resumed_at: None,
                }),
                wake: Condvar::new(),
            }),
            ticker: Mutex::new(None),
        }
    }

    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = message.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn status(&self) -> CountdownStatus {
        self.shared.lock().status
    }

    pub fn is_idle(&self) -> bool {
        self.status() == CountdownStatus::Idle
    }

    /// Running or paused.
    pub fn is_running(&self) -> bool {
        matches!(
            self.status(),
            CountdownStatus::Running | CountdownStatus::Paused
        )
    }

    pub fn is_completed(&self) -> bool {
        self.status() == CountdownStatus::Completed
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == CountdownStatus::Stopped
    }

    pub fn remaining(&self) -> Duration {
        self.shared.lock().remaining_now()
    }

    /// Idle → Running, spawning the ticker. Returns false from any other state.
    pub fn start(&self, sink: &SharedSink) -> bool {
        let mut state = self.shared.lock();
        if state.status != CountdownStatus::Idle {
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let sink = Arc::clone(sink);
        let message = self.completion_message.clone();
        let description = self.description.clone();
        let spawned = thread::Builder::new()
            .name("countdown".to_string())
            .spawn(move || run_ticker(shared, sink, description, message));

        match spawned {
            Ok(handle) => {
                state.status = CountdownStatus::Running;
                state.resumed_at = Some(Instant::now());
                drop(state);
                tracing::info!(
                    description = %self.description,
                    duration_secs = self.duration.as_secs(),
                    "Countdown started"
                );
                let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
                *ticker = Some(handle);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to spawn countdown ticker");
                false
            }
        }
    }

    /// Running → Paused. Returns whether the transition happened.
    pub fn pause(&self) -> bool {
        let mut state = self.shared.lock();
        if state.status != CountdownStatus::Running {
            return false;
        }
        state.freeze();
        state.status = CountdownStatus::Paused;
        self.shared.wake.notify_all();
        tracing::debug!(description = %self.description, "Countdown paused");
        true
    }

    /// Paused → Running. Returns whether the transition happened.
    pub fn resume(&self) -> bool {
        let mut state = self.shared.lock();
        if state.status != CountdownStatus::Paused {
            return false;
        }
        state.status = CountdownStatus::Running;
        state.resumed_at = Some(Instant::now());
        self.shared.wake.notify_all();
        tracing::debug!(description = %self.description, "Countdown resumed");
        true
    }

    /// Any non-terminal state → Stopped. No-op once completed or stopped.
    pub fn set_stop(&self) {
        let mut state = self.shared.lock();
        if state.status.is_terminal() {
            return;
        }
        state.freeze();
        state.status = CountdownStatus::Stopped;
        self.shared.wake.notify_all();
        tracing::debug!(description = %self.description, "Countdown stopped");
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("description", &self.description)
            .field("duration", &self.duration)
            .field("status", &self.status())
            .finish()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.set_stop();
        let handle = self
            .ticker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

fn run_ticker(shared: Arc<Shared>, sink: SharedSink, description: String, message: String) {
    let mut state = shared.lock();
    loop {
        match state.status {
            CountdownStatus::Running => {
                let left = state.remaining_now();
                if left.is_zero() {
                    state.status = CountdownStatus::Completed;
                    state.remaining = Duration::ZERO;
                    state.resumed_at = None;
                    drop(state);
                    tracing::info!(description = %description, "Countdown completed");
                    sink.print(&message);
                    return;
                }
                state = shared
                    .wake
                    .wait_timeout(state, left)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0;
            }
            CountdownStatus::Paused => {
                state = shared
                    .wake
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            CountdownStatus::Idle | CountdownStatus::Completed | CountdownStatus::Stopped => {
                return;
            }
        }
    }
}

/// `mm:ss`, rounding partial seconds up.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_millis().div_ceil(1000);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemorySink;

    fn sink() -> (MemorySink, SharedSink) {
        let sink = MemorySink::new();
        let shared: SharedSink = Arc::new(sink.clone());
        (sink, shared)
    }

    fn wait_for(countdown: &Countdown, status: CountdownStatus) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if countdown.status() == status {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_new_countdown_is_idle() {
        let countdown = Countdown::new("Work", Duration::from_secs(60));
        assert!(countdown.is_idle());
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining(), Duration::from_secs(60));
    }

    #[test]
    fn test_start_only_from_idle() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_secs(60));
        assert!(countdown.start(&shared));
        assert!(countdown.is_running());
        assert!(!countdown.start(&shared));
    }

    #[test]
    fn test_completes_and_notifies() {
        let (memory, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_millis(20))
            .with_completion_message("done!");
        countdown.start(&shared);

        assert!(wait_for(&countdown, CountdownStatus::Completed));
        assert_eq!(countdown.remaining(), Duration::ZERO);
        assert!(wait_for_line(&memory, "done!"));
        assert!(!countdown.start(&shared));
    }

    fn wait_for_line(memory: &MemorySink, line: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if memory.contains(line) {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_set_stop_is_idempotent() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_secs(60));
        countdown.start(&shared);

        countdown.set_stop();
        countdown.set_stop();
        assert!(countdown.is_stopped());
        assert!(!countdown.start(&shared));
        assert!(!countdown.resume());
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_set_stop_on_idle_never_runs() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_secs(60));
        countdown.set_stop();
        assert!(countdown.is_stopped());
        assert!(!countdown.start(&shared));
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_set_stop_after_completion_keeps_completed() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_millis(10));
        countdown.start(&shared);
        assert!(wait_for(&countdown, CountdownStatus::Completed));

        countdown.set_stop();
        assert!(countdown.is_completed());
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_millis(200));
        countdown.start(&shared);
        assert!(countdown.pause());
        assert!(!countdown.pause());
        assert!(countdown.is_running());

        let frozen = countdown.remaining();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(countdown.remaining(), frozen);
        assert_eq!(countdown.status(), CountdownStatus::Paused);

        assert!(countdown.resume());
        assert!(wait_for(&countdown, CountdownStatus::Completed));
    }

    #[test]
    fn test_stop_while_paused() {
        let (_, shared) = sink();
        let countdown = Countdown::new("Work", Duration::from_secs(60));
        countdown.start(&shared);
        countdown.pause();
        countdown.set_stop();
        assert!(countdown.is_stopped());
    }

    #[test]
    fn test_stop_racing_completion_settles_once() {
        let (_, shared) = sink();
        for i in 0..200u64 {
            let countdown = Countdown::new("Work", Duration::from_micros((i % 3) * 500));
            assert!(countdown.start(&shared));
            thread::scope(|s| {
                s.spawn(|| countdown.set_stop());
                countdown.set_stop();
            });

            let settled = countdown.status();
            assert!(
                matches!(
                    settled,
                    CountdownStatus::Completed | CountdownStatus::Stopped
                ),
                "unexpected state {:?}",
                settled
            );
            assert!(!countdown.start(&shared));
            assert!(!countdown.resume());
            thread::sleep(Duration::from_millis(2));
            assert_eq!(countdown.status(), settled);
            drop(countdown);
        }
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(25 * 60)), "25:00");
        assert_eq!(format_remaining(Duration::from_millis(61_200)), "01:02");
        assert_eq!(format_remaining(Duration::ZERO), "00:00");
    }
}
