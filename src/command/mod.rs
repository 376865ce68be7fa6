//! Command lifecycle
//!
//! A command declares its flags in [`Commander::init`], gets a chance to
//! prepare in [`Commander::pre_run`] once the command line has been parsed,
//! and does its work in [`Commander::run`]. [`execute`] drives those hooks
//! with clap doing the argument parsing.

use anyhow::{Context, Result};
use std::ffi::OsString;

use crate::flags::FlagSet;

mod resolving;
mod simple;

pub use resolving::ResolvingCommand;
pub use simple::SimpleCommand;

pub trait Commander {
    fn name(&self) -> &str;

    /// Configure the clap command and declare flags.
    fn init(&mut self, cmd: clap::Command, flags: &mut FlagSet) -> Result<clap::Command>;

    /// Runs after the command line is parsed and before [`Commander::run`].
    fn pre_run(&mut self, _flags: &mut FlagSet) -> Result<()> {
        Ok(())
    }

    fn run(&mut self, flags: &FlagSet) -> Result<()>;
}

/// Parse `args` for `command` and run its lifecycle.
///
/// `args` includes the program name as its first item, as with
/// [`std::env::args_os`]. Help and version requests come back as a
/// [`clap::Error`] inside the returned error.
pub fn execute<C, I, T>(command: &mut C, args: I) -> Result<()>
where
    C: Commander + ?Sized,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let name = command.name().to_string();
    let mut flags = FlagSet::new();

    let cmd = command.init(clap::Command::new(name.clone()), &mut flags)?;
    let matches = cmd.args(flags.to_args()).try_get_matches_from(args)?;
    flags.apply_matches(&matches).with_context(|| format!("Invalid arguments for {}", name))?;

    command.pre_run(&mut flags)?;
    command.run(&flags)
}
