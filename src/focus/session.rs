use super::countdown::Countdown;
use crate::config::FocusSettings;
use crate::ui::SharedSink;

const LAST_COMPLETION_MESSAGE: &str = "Time's up! That was the last countdown of this session. \
     Type 'stop' to start over or 'home' to leave.";

/// The ordered run of countdowns a user works through, plus a cursor.
#[derive(Debug)]
pub struct Session {
    countdowns: Vec<Countdown>,
    current_index: usize,
    has_any_countdown: bool,
    sink: SharedSink,
}

impl Session {
    pub fn new(countdowns: Vec<Countdown>, sink: SharedSink) -> Self {
        Self {
            countdowns,
            current_index: 0,
            has_any_countdown: false,
            sink,
        }
    }

    /// One work countdown and one break per cycle; the final break is the long one.
    pub fn from_settings(settings: &FocusSettings, sink: SharedSink) -> Self {
        let cycles = settings.cycles.max(1);
        let mut countdowns = Vec::with_capacity(cycles as usize * 2);
        for cycle in 1..=cycles {
            countdowns.push(Countdown::new(
                format!(
                    "Work time! Focus on your task for {} minutes. (cycle {}/{})",
                    settings.work_minutes, cycle, cycles
                ),
                settings.work_duration(),
            ));
            if cycle == cycles {
                countdowns.push(
                    Countdown::new(
                        format!(
                            "Long break! Take {} minutes to recharge.",
                            settings.long_break_minutes
                        ),
                        settings.long_break_duration(),
                    )
                    .with_completion_message(LAST_COMPLETION_MESSAGE),
                );
            } else {
                countdowns.push(Countdown::new(
                    format!("Break time! Rest for {} minutes.", settings.break_minutes),
                    settings.break_duration(),
                ));
            }
        }
        Self::new(countdowns, sink)
    }

    pub fn countdowns(&self) -> &[Countdown] {
        &self.countdowns
    }

    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// True once any countdown of this session has been started.
    pub fn has_any_countdown(&self) -> bool {
        self.has_any_countdown
    }

    pub fn current(&self) -> Option<&Countdown> {
        self.countdowns.get(self.current_index)
    }

    /// The cursor sits on the final countdown (or the session is empty).
    pub fn is_at_last(&self) -> bool {
        self.current_index + 1 >= self.countdowns.len()
    }

    /// Start the first countdown if nothing has started yet.
    ///
    /// Returns the started countdown's description.
    pub fn start(&mut self) -> Option<String> {
        if self.has_any_countdown {
            return None;
        }
        self.start_current()
    }

    /// Move the cursor past the current countdown once it has completed.
    pub fn check_prev_countdown(&mut self) {
        let completed = self.current().is_some_and(Countdown::is_completed);
        if completed && !self.is_at_last() {
            self.current_index += 1;
            tracing::debug!(index = self.current_index, "Session advanced");
        }
    }

    /// Advance to and start the next countdown.
    ///
    /// A no-op on the last countdown. The countdown under the cursor is only
    /// started when it is neither completed nor already running, so a `next`
    /// racing the ticker never starts anything twice. Returns the started
    /// countdown's description.
    pub fn next(&mut self) -> Option<String> {
        if self.is_at_last() {
            return None;
        }
        self.check_prev_countdown();
        let startable = self
            .current()
            .is_some_and(|c| !c.is_completed() && !c.is_running());
        if !startable {
            return None;
        }
        self.start_current()
    }

    pub fn pause_current(&self) -> bool {
        self.current().is_some_and(Countdown::pause)
    }

    pub fn resume_current(&self) -> bool {
        self.current().is_some_and(Countdown::resume)
    }

    pub fn stop_current(&self) {
        if let Some(countdown) = self.current() {
            countdown.set_stop();
        }
    }

    fn start_current(&mut self) -> Option<String> {
        let countdown = self.countdowns.get(self.current_index)?;
        if !countdown.start(&self.sink) {
            return None;
        }
        self.has_any_countdown = true;
        Some(countdown.description().to_string())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for countdown in &self.countdowns {
            countdown.set_stop();
        }
    }
}
