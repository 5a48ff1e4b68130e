//! Main menu: routes to the features until `exit` or end of input.

use crate::command::{Addressing, ArgumentMap, Command, CommandRegistry, Outcome, dispatch};
use crate::config::FocusSettings;
use crate::error::Result;
use crate::focus::FocusManager;
use crate::habit::HabitManager;
use crate::storage::DataStore;
use crate::ui::{OutputSink, SharedSink};
use crate::validation;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

const MENU_NAME: &str = "menu";

const GREETING: &str = "Hello! I am WellNUS, your personal wellness assistant.\n\
    Type 'help' to see the features I offer.";

pub const GOODBYE_MESSAGE: &str = "Goodbye! Take care of yourself.";

/// A feature chosen from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Habits,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Habits,
    Focus,
    Help,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 4] = [
        MenuCommand::Habits,
        MenuCommand::Focus,
        MenuCommand::Help,
        MenuCommand::Exit,
    ];

    pub fn registry() -> CommandRegistry<MenuCommand> {
        CommandRegistry::new(MENU_NAME, Addressing::Bare, Self::ALL)
    }
}

impl Command for MenuCommand {
    /// The feature to enter once the command returns.
    type Target = Option<Feature>;

    fn command_keyword(&self) -> &'static str {
        match self {
            MenuCommand::Habits => crate::habit::FEATURE_NAME,
            MenuCommand::Focus => crate::focus::FEATURE_NAME,
            MenuCommand::Help => "help",
            MenuCommand::Exit => "exit",
        }
    }

    fn feature_keyword(&self) -> &'static str {
        MENU_NAME
    }

    fn usage(&self) -> &'static str {
        self.command_keyword()
    }

    fn description(&self) -> &'static str {
        match self {
            MenuCommand::Habits => "track your atomic habits",
            MenuCommand::Focus => "work in focused intervals with breaks",
            MenuCommand::Help => "show this list",
            MenuCommand::Exit => "close WellNUS",
        }
    }

    fn validate(&self, arguments: &ArgumentMap) -> Result<()> {
        let message = format!(
            "'{}' takes no arguments here. Type '{}' on its own.",
            self.command_keyword(),
            self.command_keyword()
        );
        validation::expect_bare_keyword(arguments, self.command_keyword(), &message)
    }

    fn run(
        &self,
        _arguments: &ArgumentMap,
        selection: &mut Option<Feature>,
        ui: &dyn OutputSink,
    ) -> Result<Outcome> {
        match self {
            MenuCommand::Habits => *selection = Some(Feature::Habits),
            MenuCommand::Focus => *selection = Some(Feature::Focus),
            MenuCommand::Help => ui.print(&format!(
                "Here are the features I offer:\n{}",
                Self::registry().help_text()
            )),
            MenuCommand::Exit => {
                ui.print(GOODBYE_MESSAGE);
                return Ok(Outcome::ExitFeature);
            }
        }
        Ok(Outcome::Continue)
    }
}

/// The interactive application.
pub struct App {
    focus: FocusManager,
    habits: HabitManager,
    sink: SharedSink,
    registry: CommandRegistry<MenuCommand>,
}

impl App {
    pub fn new(
        focus_settings: FocusSettings,
        data_dir: impl Into<PathBuf>,
        sink: SharedSink,
    ) -> Self {
        Self {
            focus: FocusManager::new(focus_settings, Arc::clone(&sink)),
            habits: HabitManager::new(DataStore::new(data_dir), Arc::clone(&sink)),
            sink,
            registry: MenuCommand::registry(),
        }
    }

    /// Run the main menu. A feature's loop takes over the input until it exits.
    pub fn run(&self, input: &mut dyn BufRead) -> Result<()> {
        self.sink.print(GREETING);

        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("End of input at main menu");
                self.sink.print(GOODBYE_MESSAGE);
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let mut selection = None;
            let outcome = dispatch(&self.registry, &line, &mut selection, self.sink.as_ref());
            if outcome == Outcome::ExitFeature {
                break;
            }
            match selection {
                Some(Feature::Habits) => self.habits.run(input)?,
                Some(Feature::Focus) => self.focus.run(input)?,
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse;
    use crate::focus::HOME_MESSAGE;
    use crate::storage::HABIT_FILE;
    use crate::ui::MemorySink;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn app(temp_dir: &TempDir) -> (App, MemorySink) {
        let memory = MemorySink::new();
        let app = App::new(
            FocusSettings::default(),
            temp_dir.path(),
            Arc::new(memory.clone()),
        );
        (app, memory)
    }

    #[test]
    fn test_menu_commands_take_no_arguments() {
        for command in MenuCommand::ALL {
            let line = format!("{} --now", command.command_keyword());
            assert!(command.validate(&parse(&line).unwrap()).is_err());
            let line = format!("{} later", command.command_keyword());
            assert!(command.validate(&parse(&line).unwrap()).is_err());
        }
    }

    #[test]
    fn test_help_lists_features() {
        let temp_dir = TempDir::new().unwrap();
        let (app, memory) = app(&temp_dir);
        app.run(&mut Cursor::new("help\nexit\n")).unwrap();
        assert!(memory.contains("track your atomic habits"));
        assert!(memory.contains(GOODBYE_MESSAGE));
    }

    #[test]
    fn test_enter_habits_and_return() {
        let temp_dir = TempDir::new().unwrap();
        let (app, memory) = app(&temp_dir);
        app.run(&mut Cursor::new("hb\nhb add --name Drink water\nhb exit\nexit\n"))
            .unwrap();

        assert!(memory.contains("Welcome to Atomic Habits!"));
        assert!(memory.contains(GOODBYE_MESSAGE));
        let saved = std::fs::read_to_string(temp_dir.path().join(HABIT_FILE)).unwrap();
        assert_eq!(saved, "--description Drink water --count 1\n");
    }

    #[test]
    fn test_enter_focus_and_return() {
        let temp_dir = TempDir::new().unwrap();
        let (app, memory) = app(&temp_dir);
        app.run(&mut Cursor::new("ft\nhome\nexit\n")).unwrap();
        assert!(memory.contains("Welcome to Focus Timer!"));
        assert!(memory.contains(HOME_MESSAGE));
    }

    #[test]
    fn test_eof_inside_feature_ends_app() {
        let temp_dir = TempDir::new().unwrap();
        let (app, memory) = app(&temp_dir);
        app.run(&mut Cursor::new("hb\nhb add --name Stretch\n")).unwrap();
        assert!(memory.contains(GOODBYE_MESSAGE));
        assert!(temp_dir.path().join(HABIT_FILE).exists());
    }

    #[test]
    fn test_unknown_menu_command() {
        let temp_dir = TempDir::new().unwrap();
        let (app, memory) = app(&temp_dir);
        app.run(&mut Cursor::new("yoga\nexit\n")).unwrap();
        assert!(memory.contains("Unknown command 'yoga'"));
    }
}
