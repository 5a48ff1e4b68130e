//! Command dispatch and validation.
//!
//! Every user action is a fixed-shape command: one keyword, a fixed number of
//! arguments, and a `validate` predicate that runs before anything is touched.
//!
//! - [`ArgumentMap`]: a parsed input line
//! - [`parse`]: raw line to [`ArgumentMap`]
//! - [`Command`]: the contract every feature's commands implement
//! - [`CommandRegistry`]: resolves an [`ArgumentMap`] to one of a feature's commands

mod arguments;
mod parser;
mod registry;

pub use arguments::ArgumentMap;
pub use parser::{ARGUMENT_DELIMITER, parse};
pub use registry::{Addressing, CommandRegistry};

use crate::error::Result;
use crate::ui::OutputSink;

/// Context line printed under a command error when there is nothing to add.
pub const NO_ADDITIONAL_MESSAGE: &str = "";

/// What the feature loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    ExitFeature,
}

pub trait Command: Copy + std::fmt::Debug {
    /// State the command operates on.
    type Target;

    fn command_keyword(&self) -> &'static str;

    fn feature_keyword(&self) -> &'static str;

    /// One-line usage, e.g. `add --name <habit>`.
    fn usage(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the argument map against this command's fixed shape.
    fn validate(&self, arguments: &ArgumentMap) -> Result<()>;

    /// Perform the action. Only called with arguments that passed [`Command::validate`].
    fn run(
        &self,
        arguments: &ArgumentMap,
        target: &mut Self::Target,
        ui: &dyn OutputSink,
    ) -> Result<Outcome>;

    /// Validate, then run. Failures are reported through `ui` and never abort the loop.
    fn execute(
        &self,
        arguments: &ArgumentMap,
        target: &mut Self::Target,
        ui: &dyn OutputSink,
    ) -> Outcome {
        if let Err(e) = self.validate(arguments) {
            tracing::debug!(command = %self.name(), error = %e, "Rejected command");
            ui.print_error(&e, NO_ADDITIONAL_MESSAGE);
            return Outcome::Continue;
        }
        match self.run(arguments, target, ui) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(command = %self.name(), error = %e, "Command failed");
                ui.print_error(&e, NO_ADDITIONAL_MESSAGE);
                Outcome::Continue
            }
        }
    }

    /// `"<feature> <command>"`, used in logs and help output.
    fn name(&self) -> String {
        format!("{} {}", self.feature_keyword(), self.command_keyword())
    }
}

/// Parse one input line and execute the command it names.
///
/// Parse and lookup failures are reported like validation failures.
pub fn dispatch<C: Command>(
    registry: &CommandRegistry<C>,
    line: &str,
    target: &mut C::Target,
    ui: &dyn OutputSink,
) -> Outcome {
    let resolved = parse(line).and_then(|arguments| {
        let command = registry.resolve(&arguments)?;
        Ok((command, arguments))
    });
    match resolved {
        Ok((command, arguments)) => {
            tracing::debug!(command = %command.name(), "Executing command");
            command.execute(&arguments, target, ui)
        }
        Err(e) => {
            ui.print_error(&e, &registry.hint());
            Outcome::Continue
        }
    }
}
