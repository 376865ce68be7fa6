//! Bare-minimum command

use anyhow::Result;

use super::Commander;
use crate::flags::FlagSet;

/// A named command with descriptions and nothing else.
///
/// Commands wrap one of these and call its [`Commander::init`] to pick up the
/// name, descriptions, aliases and deprecation notice before adding their own
/// flags.
#[derive(Debug, Clone, Default)]
pub struct SimpleCommand {
    name: String,
    short: String,
    long: Option<String>,
    deprecated: Option<String>,
    aliases: Vec<String>,
    hidden: bool,
}

impl SimpleCommand {
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Self { name: name.into(), short: short.into(), ..Self::default() }
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Mark the command deprecated, with a message shown in help and logged
    /// on every run.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }
}

impl Commander for SimpleCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, cmd: clap::Command, _flags: &mut FlagSet) -> Result<clap::Command> {
        let about = match &self.deprecated {
            Some(message) => format!("(deprecated: {}) {}", message, self.short),
            None => self.short.clone(),
        };

        let mut cmd = cmd.about(about).hide(self.hidden).visible_aliases(self.aliases.clone());
        if let Some(long) = &self.long {
            cmd = cmd.long_about(long.clone());
        }
        Ok(cmd)
    }

    fn pre_run(&mut self, _flags: &mut FlagSet) -> Result<()> {
        if let Some(message) = &self.deprecated {
            tracing::warn!("Command \"{}\" is deprecated: {}", self.name, message);
        }
        Ok(())
    }

    fn run(&mut self, _flags: &FlagSet) -> Result<()> {
        Ok(())
    }
}
