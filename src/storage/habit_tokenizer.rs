use super::tokenizer::{FieldKind, FieldSpec, RecordSchema, Tokenizer, corrupted};
use crate::error::{Result, WellnusError};
use crate::habit::AtomicHabit;

const DESCRIPTION_KEY: &str = "description";
const COUNT_KEY: &str = "count";

pub const HABIT_SCHEMA: RecordSchema = RecordSchema::new(&[
    FieldSpec::required(DESCRIPTION_KEY, FieldKind::Text),
    FieldSpec::required(COUNT_KEY, FieldKind::Integer),
]);

/// Stores each habit as `--description <text> --count <n>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicHabitTokenizer;

impl AtomicHabitTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn parse_habit(&self, line: &str) -> Result<AtomicHabit> {
        let fields = HABIT_SCHEMA.parse(line)?;
        let description = fields.text(DESCRIPTION_KEY)?;
        let count = fields.integer(COUNT_KEY)?;
        AtomicHabit::with_count(description, count).map_err(|e| match e {
            WellnusError::Habit(detail) => corrupted(detail),
            other => other,
        })
    }
}

impl Tokenizer<AtomicHabit> for AtomicHabitTokenizer {
    fn tokenize(&self, habits: &[AtomicHabit]) -> Vec<String> {
        habits
            .iter()
            .map(|habit| {
                HABIT_SCHEMA.render(&[
                    Some(habit.description().to_string()),
                    Some(habit.count().to_string()),
                ])
            })
            .collect()
    }

    fn detokenize(&self, lines: &[String]) -> Result<Vec<AtomicHabit>> {
        lines.iter().map(|line| self.parse_habit(line)).collect()
    }
}
