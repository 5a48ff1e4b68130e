use super::FEATURE_NAME;
use super::model::{AtomicHabit, AtomicHabitList};
use crate::command::{Addressing, ArgumentMap, Command, CommandRegistry, Outcome};
use crate::error::{Result, WellnusError};
use crate::ui::OutputSink;
use crate::validation;

pub const EXIT_MESSAGE: &str = "Thank you for using atomic habits. Do not forget about me!";

const NAME_ARGUMENT: &str = "name";
const ID_ARGUMENT: &str = "id";
const BY_ARGUMENT: &str = "by";

/// The habit tracker's commands, addressed as `hb <command> [--argument payload]...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitCommand {
    Add,
    List,
    Update,
    Delete,
    Help,
    Exit,
}

impl HabitCommand {
    pub const ALL: [HabitCommand; 6] = [
        HabitCommand::Add,
        HabitCommand::List,
        HabitCommand::Update,
        HabitCommand::Delete,
        HabitCommand::Help,
        HabitCommand::Exit,
    ];

    pub fn registry() -> CommandRegistry<HabitCommand> {
        CommandRegistry::new(FEATURE_NAME, Addressing::Prefixed, Self::ALL)
    }

    /// Arguments including the `hb <command>` pair itself.
    fn expected_arguments(&self) -> usize {
        match self {
            HabitCommand::Add | HabitCommand::Delete => 2,
            HabitCommand::Update => 3,
            HabitCommand::List | HabitCommand::Help | HabitCommand::Exit => 1,
        }
    }

    fn invalid_arguments_message(&self) -> String {
        format!(
            "That is not a valid {} command for atomic habits! Usage: {} {}",
            self.command_keyword(),
            FEATURE_NAME,
            self.usage()
        )
    }
}

impl Command for HabitCommand {
    type Target = AtomicHabitList;

    fn command_keyword(&self) -> &'static str {
        match self {
            HabitCommand::Add => "add",
            HabitCommand::List => "list",
            HabitCommand::Update => "update",
            HabitCommand::Delete => "delete",
            HabitCommand::Help => "help",
            HabitCommand::Exit => "exit",
        }
    }

    fn feature_keyword(&self) -> &'static str {
        FEATURE_NAME
    }

    fn usage(&self) -> &'static str {
        match self {
            HabitCommand::Add => "add --name <habit>",
            HabitCommand::List => "list",
            HabitCommand::Update => "update --id <id> --by <amount>",
            HabitCommand::Delete => "delete --id <id>",
            HabitCommand::Help => "help",
            HabitCommand::Exit => "exit",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            HabitCommand::Add => "add a habit to your list",
            HabitCommand::List => "list your habits and their counts",
            HabitCommand::Update => "change a habit's count, negative amounts decrease it",
            HabitCommand::Delete => "remove a habit from your list",
            HabitCommand::Help => "show this list",
            HabitCommand::Exit => "save your habits and return to the main menu",
        }
    }

    fn validate(&self, arguments: &ArgumentMap) -> Result<()> {
        let message = self.invalid_arguments_message();
        validation::expect_prefixed_command(
            arguments,
            FEATURE_NAME,
            self.command_keyword(),
            self.expected_arguments(),
            &message,
        )?;
        match self {
            HabitCommand::Add => {
                validation::expect_key(arguments, NAME_ARGUMENT, &message)?;
                validation::validate_description(arguments.get(NAME_ARGUMENT).unwrap_or_default())
            }
            HabitCommand::Update => {
                validation::expect_key(arguments, ID_ARGUMENT, &message)?;
                validation::expect_key(arguments, BY_ARGUMENT, &message)?;
                validation::parse_index(arguments.get(ID_ARGUMENT).unwrap_or_default())?;
                validation::parse_delta(arguments.get(BY_ARGUMENT).unwrap_or_default())?;
                Ok(())
            }
            HabitCommand::Delete => {
                validation::expect_key(arguments, ID_ARGUMENT, &message)?;
                validation::parse_index(arguments.get(ID_ARGUMENT).unwrap_or_default())?;
                Ok(())
            }
            HabitCommand::List | HabitCommand::Help | HabitCommand::Exit => Ok(()),
        }
    }

    fn run(
        &self,
        arguments: &ArgumentMap,
        habits: &mut AtomicHabitList,
        ui: &dyn OutputSink,
    ) -> Result<Outcome> {
        match self {
            HabitCommand::Add => {
                let habit = AtomicHabit::new(required(arguments, NAME_ARGUMENT)?)?;
                let message = format!(
                    "Yay! You have added a new habit:\n'{}' was successfully added",
                    habit.description()
                );
                let id = habits.add(habit);
                tracing::info!(id, "Habit added");
                ui.print(&message);
            }
            HabitCommand::List => ui.print(&render_list(habits)),
            HabitCommand::Update => {
                let id = validation::parse_index(required(arguments, ID_ARGUMENT)?)?;
                let delta = validation::parse_delta(required(arguments, BY_ARGUMENT)?)?;
                let habit = habits.update(id, delta)?;
                tracing::info!(id, delta, count = habit.count(), "Habit updated");
                let verb = if delta > 0 { "incremented" } else { "decremented" };
                ui.print(&format!(
                    "The following habit has been {}! Keep up the good work!\n{}.{}",
                    verb, id, habit
                ));
            }
            HabitCommand::Delete => {
                let id = validation::parse_index(required(arguments, ID_ARGUMENT)?)?;
                let habit = habits.remove(id)?;
                tracing::info!(id, "Habit deleted");
                ui.print(&format!(
                    "The following habit has been deleted:\n{}.{}",
                    id, habit
                ));
            }
            HabitCommand::Help => ui.print(&format!(
                "Here are the commands for atomic habits:\n{}",
                Self::registry().help_text()
            )),
            HabitCommand::Exit => {
                ui.print(EXIT_MESSAGE);
                return Ok(Outcome::ExitFeature);
            }
        }
        Ok(Outcome::Continue)
    }
}

fn required<'a>(arguments: &'a ArgumentMap, key: &str) -> Result<&'a str> {
    arguments
        .get(key)
        .ok_or_else(|| WellnusError::BadCommand(format!("Missing argument '--{}'", key)))
}

fn render_list(habits: &AtomicHabitList) -> String {
    if habits.is_empty() {
        return format!(
            "You have no habits in your list! Start adding some using '{} add --name <habit>'",
            FEATURE_NAME
        );
    }
    let rows = habits
        .habits()
        .iter()
        .enumerate()
        .map(|(i, habit)| format!("{}.{}", i + 1, habit))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here is the current accumulation of your habits!\n{}", rows)
}
