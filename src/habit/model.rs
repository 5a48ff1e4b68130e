use crate::error::{Result, WellnusError};
use crate::validation;
use std::fmt;

/// A habit and how many times it has been done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicHabit {
    description: String,
    count: u32,
}

impl AtomicHabit {
    /// A freshly added habit starts with a count of one.
    pub fn new(description: &str) -> Result<Self> {
        Self::with_count(description, 1)
    }

    pub fn with_count(description: &str, count: i64) -> Result<Self> {
        validation::validate_description(description)
            .map_err(|e| WellnusError::Habit(e.to_string()))?;
        let count = u32::try_from(count).map_err(|_| {
            WellnusError::Habit(format!("Habit count must be between 0 and {}", u32::MAX))
        })?;
        Ok(Self {
            description: description.trim().to_string(),
            count,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Apply a signed change, refusing to go below zero.
    pub fn apply(&mut self, delta: i64) -> Result<()> {
        let updated = i64::from(self.count)
            .checked_add(delta)
            .filter(|c| *c >= 0)
            .ok_or_else(|| {
                WellnusError::Habit(format!(
                    "Cannot decrease '{}' by {}, its count is only {}",
                    self.description,
                    delta.unsigned_abs(),
                    self.count
                ))
            })?;
        self.count = u32::try_from(updated)
            .map_err(|_| WellnusError::Habit("Habit count is too large".to_string()))?;
        Ok(())
    }
}

impl fmt::Display for AtomicHabit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.description, self.count)
    }
}

/// Ordered habits, addressed by 1-based id in user-facing commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicHabitList {
    habits: Vec<AtomicHabit>,
}

impl AtomicHabitList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_habits(habits: Vec<AtomicHabit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[AtomicHabit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Append a habit and return its id.
    pub fn add(&mut self, habit: AtomicHabit) -> usize {
        self.habits.push(habit);
        self.habits.len()
    }

    pub fn get(&self, id: usize) -> Result<&AtomicHabit> {
        id.checked_sub(1)
            .and_then(|i| self.habits.get(i))
            .ok_or_else(|| self.missing(id))
    }

    /// Change the count of habit `id` by `delta`.
    pub fn update(&mut self, id: usize, delta: i64) -> Result<&AtomicHabit> {
        let missing = self.missing(id);
        let habit = id
            .checked_sub(1)
            .and_then(|i| self.habits.get_mut(i))
            .ok_or(missing)?;
        habit.apply(delta)?;
        Ok(&*habit)
    }

    pub fn remove(&mut self, id: usize) -> Result<AtomicHabit> {
        if id == 0 || id > self.habits.len() {
            return Err(self.missing(id));
        }
        Ok(self.habits.remove(id - 1))
    }

    fn missing(&self, id: usize) -> WellnusError {
        WellnusError::Habit(format!(
            "There is no habit with id {}. You have {} habit(s).",
            id,
            self.habits.len()
        ))
    }
}
