//! Focus timer feature.
//!
//! A [`Session`] is an ordered run of [`Countdown`]s built from
//! [`FocusSettings`](crate::config::FocusSettings). Each countdown ticks on its
//! own thread; the foreground command loop only ever moves them through the
//! transition methods.

mod commands;
mod countdown;
mod manager;
mod session;

pub use commands::{FocusCommand, HOME_MESSAGE};
pub use countdown::{Countdown, CountdownStatus, format_remaining};
pub use manager::{FocusManager, FocusTimer};
pub use session::Session;

/// Keyword that enters this feature from the main menu.
pub const FEATURE_NAME: &str = "ft";
