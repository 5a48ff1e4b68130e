//! File-based storage layer.
//!
//! Each record type lives in its own text file in the data directory, one
//! record per line:
//!
//! ```text
//! --description Read 10 pages --count 3
//! --description Meditate --count 1
//! ```
//!
//! Values are not escaped, so a value may never contain `--`.
//!
//! ## Components
//!
//! - [`Tokenizer`]: record list to and from lines
//! - [`RecordSchema`]: the exact keys a line may carry
//! - [`AtomicHabitTokenizer`]: the habit codec
//! - [`DataStore`]: reads and atomically writes the files

mod habit_tokenizer;
mod store;
mod tokenizer;

pub use habit_tokenizer::{AtomicHabitTokenizer, HABIT_SCHEMA};
pub use store::{DataStore, HABIT_FILE};
pub use tokenizer::{
    FieldKind, FieldSpec, PARAMETER_DELIMITER, RecordSchema, TokenFields, Tokenizer,
    split_parameters,
};
