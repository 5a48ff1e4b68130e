use super::{ArgumentMap, Command};
use crate::error::{Result, WellnusError};

/// How a feature's command keyword is found in an [`ArgumentMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// The main keyword is the command keyword: `next`.
    Bare,
    /// The main keyword is the feature keyword and its payload names the command: `hb add`.
    Prefixed,
}

/// The commands of one feature, keyed by command keyword.
#[derive(Debug, Clone)]
pub struct CommandRegistry<C> {
    feature: &'static str,
    addressing: Addressing,
    commands: Vec<C>,
}

impl<C: Command> CommandRegistry<C> {
    pub fn new(
        feature: &'static str,
        addressing: Addressing,
        commands: impl IntoIterator<Item = C>,
    ) -> Self {
        let commands: Vec<C> = commands.into_iter().collect();
        debug_assert!(
            commands.iter().all(|c| c.feature_keyword() == feature),
            "every command must belong to the registry's feature"
        );
        Self {
            feature,
            addressing,
            commands,
        }
    }

    pub fn keywords(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.command_keyword()).collect()
    }

    pub fn lookup(&self, keyword: &str) -> Option<C> {
        self.commands
            .iter()
            .copied()
            .find(|c| c.command_keyword() == keyword)
    }

    /// The command keyword an argument map addresses under this feature's convention.
    pub fn command_keyword<'a>(&self, arguments: &'a ArgumentMap) -> Result<&'a str> {
        match self.addressing {
            Addressing::Bare => Ok(arguments.main_keyword()),
            Addressing::Prefixed if arguments.main_keyword() == self.feature => {
                Ok(arguments.main_payload())
            }
            Addressing::Prefixed => Err(WellnusError::BadCommand(format!(
                "Commands here start with '{}', e.g. '{} help'",
                self.feature, self.feature
            ))),
        }
    }

    pub fn resolve(&self, arguments: &ArgumentMap) -> Result<C> {
        let keyword = self.command_keyword(arguments)?;
        self.lookup(keyword).ok_or_else(|| {
            WellnusError::BadCommand(format!(
                "Unknown command '{}'. Available commands: {}",
                keyword,
                self.keywords().join(", ")
            ))
        })
    }

    /// Usage and description of every command, one per line.
    pub fn help_text(&self) -> String {
        self.commands
            .iter()
            .map(|c| {
                let usage = match self.addressing {
                    Addressing::Bare => c.usage().to_string(),
                    Addressing::Prefixed => format!("{} {}", self.feature, c.usage()),
                };
                format!("  {:<36} {}", usage, c.description())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Context line shown under dispatch errors.
    pub fn hint(&self) -> String {
        match self.addressing {
            Addressing::Bare => "Type 'help' to see what you can do here.".to_string(),
            Addressing::Prefixed => {
                format!("Type '{} help' to see what you can do here.", self.feature)
            }
        }
    }
}
