//! Output capability handed to managers and commands.
//!
//! Nothing in the crate writes to stdout directly; everything user-facing goes
//! through an [`OutputSink`]. The focus timer prints from its ticker threads,
//! so sinks must be shareable across threads.

use colored::Colorize;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

const SEPARATOR: &str = "____________________________________________________________";

pub trait OutputSink: fmt::Debug + Send + Sync {
    /// Print a plain output message.
    fn print(&self, message: &str);

    /// Print an error together with an optional extra line of context.
    fn print_error(&self, error: &dyn Error, context: &str);
}

pub type SharedSink = Arc<dyn OutputSink>;

/// Colored terminal output, one message per separated block.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn shared() -> SharedSink {
        Arc::new(Self)
    }
}

impl OutputSink for ConsoleSink {
    fn print(&self, message: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", message);
        let _ = writeln!(out, "{}", SEPARATOR.dimmed());
        let _ = out.flush();
    }

    fn print_error(&self, error: &dyn Error, context: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{} {}", "Error:".red().bold(), error.to_string().red());
        if !context.is_empty() {
            let _ = writeln!(out, "{}", context);
        }
        let _ = writeln!(out, "{}", SEPARATOR.dimmed());
        let _ = out.flush();
    }
}

/// Captures every message in memory.
///
/// Errors are recorded as `"Error: <message>"` followed by the context line
/// when one is given.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl OutputSink for MemorySink {
    fn print(&self, message: &str) {
        self.push(message.to_string());
    }

    fn print_error(&self, error: &dyn Error, context: &str) {
        self.push(format!("Error: {}", error));
        if !context.is_empty() {
            self.push(context.to_string());
        }
    }
}
