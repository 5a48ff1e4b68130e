use super::commands::HabitCommand;
use super::model::{AtomicHabit, AtomicHabitList};
use crate::command::{CommandRegistry, Outcome, dispatch};
use crate::error::{Result, WellnusError};
use crate::storage::{AtomicHabitTokenizer, DataStore, HABIT_FILE};
use crate::ui::SharedSink;
use std::io::BufRead;

const WELCOME_MESSAGE: &str = "Welcome to Atomic Habits!\n\
    Type 'hb help' to see what you can do, 'hb exit' to go back.";

/// Runs the habit tracker: load on entry, save on exit.
pub struct HabitManager {
    store: DataStore,
    sink: SharedSink,
    registry: CommandRegistry<HabitCommand>,
    tokenizer: AtomicHabitTokenizer,
}

impl HabitManager {
    pub fn new(store: DataStore, sink: SharedSink) -> Self {
        Self {
            store,
            sink,
            registry: HabitCommand::registry(),
            tokenizer: AtomicHabitTokenizer::new(),
        }
    }

    /// Load the saved habits.
    ///
    /// An unreadable file is reported, moved aside, and replaced by an empty list.
    pub fn load(&self) -> Result<AtomicHabitList> {
        let loaded: Result<Vec<AtomicHabit>> = self.store.load(HABIT_FILE, &self.tokenizer);
        match loaded {
            Ok(habits) => {
                tracing::info!(count = habits.len(), "Loaded habits");
                Ok(AtomicHabitList::from_habits(habits))
            }
            Err(e @ WellnusError::Tokenizer(_)) => {
                let moved = self.store.quarantine(HABIT_FILE)?;
                self.sink.print_error(
                    &e,
                    &format!(
                        "Your saved habits were moved to {}. Starting with an empty list.",
                        moved.display()
                    ),
                );
                Ok(AtomicHabitList::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, habits: &AtomicHabitList) -> Result<()> {
        self.store.save(HABIT_FILE, habits.habits(), &self.tokenizer)
    }

    /// Read and execute commands until `hb exit` or end of input, then save.
    ///
    /// A failed save is reported and does not end the application.
    pub fn run(&self, input: &mut dyn BufRead) -> Result<()> {
        tracing::info!(data_dir = %self.store.data_dir().display(), "Entering atomic habits");
        let mut habits = self.load()?;
        self.sink.print(WELCOME_MESSAGE);

        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let outcome = dispatch(&self.registry, &line, &mut habits, self.sink.as_ref());
            if outcome == Outcome::ExitFeature {
                break;
            }
        }

        match self.save(&habits) {
            Ok(()) => tracing::info!(count = habits.len(), "Leaving atomic habits"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save habits");
                self.sink.print_error(
                    &e,
                    &format!(
                        "Your habits could not be saved to {}.",
                        self.store.path_for(HABIT_FILE).display()
                    ),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::commands::EXIT_MESSAGE;
    use crate::ui::MemorySink;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir) -> (HabitManager, MemorySink) {
        let memory = MemorySink::new();
        let manager = HabitManager::new(DataStore::new(temp_dir.path()), Arc::new(memory.clone()));
        (manager, memory)
    }

    #[test]
    fn test_habits_persist_across_visits() {
        let temp_dir = TempDir::new().unwrap();
        let (manager, memory) = manager(&temp_dir);

        manager
            .run(&mut Cursor::new(
                "hb add --name Read 10 pages\nhb update --id 1 --by 2\nhb exit\n",
            ))
            .unwrap();
        assert!(memory.contains(EXIT_MESSAGE));

        let saved = std::fs::read_to_string(temp_dir.path().join(HABIT_FILE)).unwrap();
        assert_eq!(saved, "--description Read 10 pages --count 3\n");

        manager.run(&mut Cursor::new("hb list\nhb exit\n")).unwrap();
        assert!(memory.contains("1.Read 10 pages [3]"));
    }

    #[test]
    fn test_eof_still_saves() {
        let temp_dir = TempDir::new().unwrap();
        let (manager, _) = manager(&temp_dir);
        manager.run(&mut Cursor::new("hb add --name Stretch")).unwrap();

        let habits = manager.load().unwrap();
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn test_corrupted_file_is_quarantined() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(HABIT_FILE),
            "--description Read --count abc\n",
        )
        .unwrap();
        let (manager, memory) = manager(&temp_dir);

        let habits = manager.load().unwrap();
        assert!(habits.is_empty());
        assert!(memory.contains("might be corrupted"));
        assert!(temp_dir.path().join("habits.txt.corrupt").exists());
        assert!(!temp_dir.path().join(HABIT_FILE).exists());
    }

    #[test]
    fn test_non_utf8_file_is_quarantined() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(HABIT_FILE),
            b"--description R\xffead --count 1\n",
        )
        .unwrap();
        let (manager, memory) = manager(&temp_dir);

        manager.run(&mut Cursor::new("hb list\nhb exit\n")).unwrap();
        assert!(memory.contains("might be corrupted"));
        assert!(memory.contains("You have no habits"));
        assert!(memory.contains(EXIT_MESSAGE));
        assert_eq!(
            std::fs::read(temp_dir.path().join("habits.txt.corrupt")).unwrap(),
            b"--description R\xffead --count 1\n"
        );
    }

    #[test]
    fn test_second_corruption_keeps_first_copy() {
        let temp_dir = TempDir::new().unwrap();
        let (manager, _) = manager(&temp_dir);
        let habit_file = temp_dir.path().join(HABIT_FILE);

        std::fs::write(&habit_file, "--description First --count x\n").unwrap();
        manager.load().unwrap();
        std::fs::write(&habit_file, "--description Second --count y\n").unwrap();
        manager.load().unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("habits.txt.corrupt")).unwrap(),
            "--description First --count x\n"
        );
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("habits.txt.corrupt.1")).unwrap(),
            "--description Second --count y\n"
        );
    }

    #[test]
    fn test_failed_save_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_dir = temp_dir.path().join("occupied");
        std::fs::write(&not_a_dir, "plain file").unwrap();
        let memory = MemorySink::new();
        let manager = HabitManager::new(DataStore::new(&not_a_dir), Arc::new(memory.clone()));

        let result = manager.run(&mut Cursor::new("hb add --name Read\nhb exit\n"));
        assert!(result.is_ok());
        assert!(memory.contains("could not be saved"));
    }

    #[test]
    fn test_invalid_commands_keep_loop_running() {
        let temp_dir = TempDir::new().unwrap();
        let (manager, memory) = manager(&temp_dir);
        manager
            .run(&mut Cursor::new(
                "add --name Read\nhb add\nhb add --name Run\nhb exit\n",
            ))
            .unwrap();

        assert!(memory.contains("start with 'hb'"));
        assert!(memory.contains("not a valid add command"));
        assert_eq!(manager.load().unwrap().len(), 1);
    }
}
