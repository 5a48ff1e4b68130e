use super::commands::FocusCommand;
use super::session::Session;
use crate::command::{CommandRegistry, Outcome, dispatch};
use crate::config::FocusSettings;
use crate::error::Result;
use crate::ui::SharedSink;
use std::io::BufRead;
use std::sync::Arc;

const WELCOME_MESSAGE: &str = "Welcome to Focus Timer!\n\
    Type 'start' to begin your session, 'help' to see all commands.";

/// State the focus commands operate on.
#[derive(Debug)]
pub struct FocusTimer {
    settings: FocusSettings,
    session: Session,
    sink: SharedSink,
}

impl FocusTimer {
    pub fn new(settings: FocusSettings, sink: SharedSink) -> Self {
        let session = Session::from_settings(&settings, Arc::clone(&sink));
        Self {
            settings,
            session,
            sink,
        }
    }

    pub fn with_session(settings: FocusSettings, session: Session, sink: SharedSink) -> Self {
        Self {
            settings,
            session,
            sink,
        }
    }

    pub fn settings(&self) -> &FocusSettings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Replace the session with a fresh one built from the settings.
    pub fn reset(&mut self) {
        self.session = Session::from_settings(&self.settings, Arc::clone(&self.sink));
        tracing::debug!(countdowns = self.session.len(), "Session reset");
    }
}

/// Runs the focus timer feature: one fresh session per visit.
pub struct FocusManager {
    settings: FocusSettings,
    sink: SharedSink,
    registry: CommandRegistry<FocusCommand>,
}

impl FocusManager {
    pub fn new(settings: FocusSettings, sink: SharedSink) -> Self {
        Self {
            settings,
            sink,
            registry: FocusCommand::registry(),
        }
    }

    /// Read and execute commands until `home` or end of input.
    ///
    /// Whatever countdown is still running when the loop ends is stopped.
    pub fn run(&self, input: &mut dyn BufRead) -> Result<()> {
        tracing::info!(cycles = self.settings.cycles, "Entering focus timer");
        let mut timer = FocusTimer::new(self.settings.clone(), Arc::clone(&self.sink));
        self.sink.print(WELCOME_MESSAGE);

        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                timer.session().stop_current();
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let outcome = dispatch(&self.registry, &line, &mut timer, self.sink.as_ref());
            if outcome == Outcome::ExitFeature {
                break;
            }
        }
        tracing::info!("Leaving focus timer");
        Ok(())
    }
}
