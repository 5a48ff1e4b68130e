//! Atomic habits feature.
//!
//! - [`AtomicHabit`]: a habit and its count
//! - [`AtomicHabitList`]: the ordered list the commands operate on
//! - [`HabitCommand`]: `hb add`, `hb list`, `hb update`, `hb delete`, `hb help`, `hb exit`
//! - [`HabitManager`]: the feature loop, loading on entry and saving on exit

mod commands;
mod manager;
mod model;

pub use commands::{EXIT_MESSAGE, HabitCommand};
pub use manager::HabitManager;
pub use model::{AtomicHabit, AtomicHabitList};

/// Keyword that enters this feature and prefixes its commands.
pub const FEATURE_NAME: &str = "hb";
