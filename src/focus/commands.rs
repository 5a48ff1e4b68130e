use super::FEATURE_NAME;
use super::countdown::format_remaining;
use super::manager::FocusTimer;
use crate::command::{Addressing, ArgumentMap, Command, CommandRegistry, Outcome};
use crate::error::Result;
use crate::ui::OutputSink;
use crate::validation;

pub const HOME_MESSAGE: &str = "Thank you for using focus timer. Keep up the productivity!";

/// The focus timer's commands. Each is a bare keyword with no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCommand {
    Start,
    Next,
    Pause,
    Resume,
    Stop,
    Check,
    Help,
    Home,
}

impl FocusCommand {
    pub const ALL: [FocusCommand; 8] = [
        FocusCommand::Start,
        FocusCommand::Next,
        FocusCommand::Pause,
        FocusCommand::Resume,
        FocusCommand::Stop,
        FocusCommand::Check,
        FocusCommand::Help,
        FocusCommand::Home,
    ];

    pub fn registry() -> CommandRegistry<FocusCommand> {
        CommandRegistry::new(FEATURE_NAME, Addressing::Bare, Self::ALL)
    }

    fn invalid_arguments_message(&self) -> &'static str {
        match self {
            FocusCommand::Start => "Invalid command, expected 'start'",
            FocusCommand::Next => "Invalid command, expected 'next'",
            FocusCommand::Pause => "Invalid command, expected 'pause'",
            FocusCommand::Resume => "Invalid command, expected 'resume'",
            FocusCommand::Stop => "Invalid command, expected 'stop'",
            FocusCommand::Check => "Invalid command, expected 'check'",
            FocusCommand::Help => "Invalid command, expected 'help'",
            FocusCommand::Home => "That is not a valid home command for focus timer!",
        }
    }
}

impl Command for FocusCommand {
    type Target = FocusTimer;

    fn command_keyword(&self) -> &'static str {
        match self {
            FocusCommand::Start => "start",
            FocusCommand::Next => "next",
            FocusCommand::Pause => "pause",
            FocusCommand::Resume => "resume",
            FocusCommand::Stop => "stop",
            FocusCommand::Check => "check",
            FocusCommand::Help => "help",
            FocusCommand::Home => "home",
        }
    }

    fn feature_keyword(&self) -> &'static str {
        FEATURE_NAME
    }

    fn usage(&self) -> &'static str {
        self.command_keyword()
    }

    fn description(&self) -> &'static str {
        match self {
            FocusCommand::Start => "start the first countdown of your session",
            FocusCommand::Next => "start the next countdown once the current one is done",
            FocusCommand::Pause => "pause the running countdown",
            FocusCommand::Resume => "resume a paused countdown",
            FocusCommand::Stop => "stop the session and reset it",
            FocusCommand::Check => "show the time left on the current countdown",
            FocusCommand::Help => "show this list",
            FocusCommand::Home => "stop the timer and return to the main menu",
        }
    }

    fn validate(&self, arguments: &ArgumentMap) -> Result<()> {
        validation::expect_bare_keyword(
            arguments,
            self.command_keyword(),
            self.invalid_arguments_message(),
        )
    }

    fn run(
        &self,
        _arguments: &ArgumentMap,
        timer: &mut FocusTimer,
        ui: &dyn OutputSink,
    ) -> Result<Outcome> {
        match self {
            FocusCommand::Start => {
                match timer.session_mut().start() {
                    Some(description) => ui.print(&description),
                    None => ui.print(
                        "Your session has already started! Type 'check' to see the time left.",
                    ),
                }
                Ok(Outcome::Continue)
            }
            FocusCommand::Next => {
                if let Some(description) = timer.session_mut().next() {
                    ui.print(&description);
                }
                Ok(Outcome::Continue)
            }
            FocusCommand::Pause => {
                let session = timer.session();
                if session.pause_current() {
                    let left = session.current().map(|c| c.remaining()).unwrap_or_default();
                    ui.print(&format!(
                        "Timer paused with {} left. Type 'resume' to continue.",
                        format_remaining(left)
                    ));
                } else {
                    ui.print("There is no running countdown to pause.");
                }
                Ok(Outcome::Continue)
            }
            FocusCommand::Resume => {
                if timer.session().resume_current() {
                    ui.print("Timer resumed. Back to it!");
                } else {
                    ui.print("There is no paused countdown to resume.");
                }
                Ok(Outcome::Continue)
            }
            FocusCommand::Stop => {
                timer.session().stop_current();
                timer.reset();
                ui.print("Session stopped. Type 'start' to begin a new session.");
                Ok(Outcome::Continue)
            }
            FocusCommand::Check => {
                let session = timer.session();
                match session.current() {
                    Some(countdown) if session.has_any_countdown() => ui.print(&format!(
                        "Countdown {}/{} ({}): {} left\n{}",
                        session.current_index() + 1,
                        session.len(),
                        countdown.status(),
                        format_remaining(countdown.remaining()),
                        countdown.description()
                    )),
                    _ => ui.print("Your session has not started yet. Type 'start' to begin."),
                }
                Ok(Outcome::Continue)
            }
            FocusCommand::Help => {
                ui.print(&format!(
                    "Here are the commands for focus timer:\n{}",
                    Self::registry().help_text()
                ));
                Ok(Outcome::Continue)
            }
            FocusCommand::Home => {
                if !timer.session().is_empty() {
                    timer.session().stop_current();
                }
                ui.print(HOME_MESSAGE);
                Ok(Outcome::ExitFeature)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{dispatch, parse};
    use crate::config::FocusSettings;
    use crate::focus::countdown::{Countdown, CountdownStatus};
    use crate::focus::session::Session;
    use crate::ui::{MemorySink, SharedSink};
    use std::sync::Arc;
    use std::time::Duration;

    fn timer_with(countdowns: usize) -> (FocusTimer, MemorySink) {
        let memory = MemorySink::new();
        let sink: SharedSink = Arc::new(memory.clone());
        let session = Session::new(
            (0..countdowns)
                .map(|i| Countdown::new(format!("countdown {}", i), Duration::from_secs(60)))
                .collect(),
            Arc::clone(&sink),
        );
        (
            FocusTimer::with_session(FocusSettings::default(), session, sink),
            memory,
        )
    }

    fn run(timer: &mut FocusTimer, memory: &MemorySink, line: &str) -> Outcome {
        dispatch(&FocusCommand::registry(), line, timer, memory)
    }

    #[test]
    fn test_every_command_rejects_wrong_argument_count() {
        for command in FocusCommand::ALL {
            let keyword = command.command_keyword();
            let extra = parse(&format!("{} --now", keyword)).unwrap();
            assert!(command.validate(&extra).unwrap_err().is_bad_command());

            let exact = parse(keyword).unwrap();
            assert!(command.validate(&exact).is_ok());
        }
    }

    #[test]
    fn test_payload_must_be_empty() {
        let args = parse("next please").unwrap();
        assert!(FocusCommand::Next.validate(&args).is_err());
    }

    #[test]
    fn test_missing_keyword_rejected() {
        let args = parse("home").unwrap();
        assert!(FocusCommand::Next.validate(&args).is_err());
    }

    #[test]
    fn test_invalid_next_does_nothing() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "next --x 1");
        assert!(!timer.session().has_any_countdown());
        assert!(memory.contains("Invalid command, expected 'next'"));
    }

    #[test]
    fn test_next_starts_session_and_prints_description() {
        let (mut timer, memory) = timer_with(2);
        assert_eq!(run(&mut timer, &memory, "next"), Outcome::Continue);
        assert_eq!(memory.lines(), vec!["countdown 0"]);
        assert!(timer.session().countdowns()[0].is_running());
    }

    #[test]
    fn test_next_at_last_index_prints_nothing() {
        let (mut timer, memory) = timer_with(1);
        run(&mut timer, &memory, "next");
        assert!(memory.lines().is_empty());
        assert_eq!(timer.session().current_index(), 0);
        assert!(timer.session().countdowns()[0].is_idle());
    }

    #[test]
    fn test_start_twice() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "start");
        run(&mut timer, &memory, "start");
        assert!(memory.contains("countdown 0"));
        assert!(memory.contains("already started"));
    }

    #[test]
    fn test_home_stops_current_and_exits() {
        let (mut timer, memory) = timer_with(2);
        assert_eq!(run(&mut timer, &memory, "home"), Outcome::ExitFeature);
        assert_eq!(
            timer.session().countdowns()[0].status(),
            CountdownStatus::Stopped
        );
        assert!(memory.contains(HOME_MESSAGE));

        run(&mut timer, &memory, "next");
        assert_eq!(
            timer.session().countdowns()[0].status(),
            CountdownStatus::Stopped
        );
    }

    #[test]
    fn test_home_stops_running_countdown() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "start");
        run(&mut timer, &memory, "home");
        assert!(timer.session().countdowns()[0].is_stopped());
        assert!(timer.session().countdowns()[1].is_idle());
    }

    #[test]
    fn test_pause_resume_messages() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "pause");
        assert!(memory.contains("no running countdown"));

        run(&mut timer, &memory, "start");
        run(&mut timer, &memory, "pause");
        assert!(memory.contains("Timer paused with"));
        run(&mut timer, &memory, "resume");
        assert!(memory.contains("Timer resumed"));
    }

    #[test]
    fn test_stop_resets_session() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "start");
        run(&mut timer, &memory, "stop");

        assert!(!timer.session().has_any_countdown());
        assert_eq!(timer.session().len(), 4);
        assert!(memory.contains("Session stopped"));
    }

    #[test]
    fn test_check_reports_progress() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "check");
        assert!(memory.contains("not started yet"));

        run(&mut timer, &memory, "start");
        run(&mut timer, &memory, "check");
        assert!(memory.contains("Countdown 1/2 (running)"));
    }

    #[test]
    fn test_help_lists_commands() {
        let (mut timer, memory) = timer_with(2);
        run(&mut timer, &memory, "help");
        for keyword in FocusCommand::registry().keywords() {
            assert!(memory.contains(keyword));
        }
    }
}
