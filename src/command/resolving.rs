//! Commands whose flags fall back to the environment and a config file

use anyhow::{Context, Result};

use super::Commander;
use crate::config::{ConfigFile, ConfigResolver, EnvLookup, ProcessEnv, Resolution, ResolverConfig};
use crate::flags::FlagSet;

/// Wraps a command and resolves its flags before the command's own
/// `pre_run`.
///
/// Every hook is forwarded to the inner command; `pre_run` first fills flags
/// not given on the command line from the environment, then the config file.
#[derive(Debug)]
pub struct ResolvingCommand<C, E = ProcessEnv> {
    inner: C,
    resolver: ConfigResolver<E>,
    resolution: Option<Resolution>,
}

impl<C: Commander> ResolvingCommand<C, ProcessEnv> {
    pub fn new(inner: C, config: ResolverConfig) -> Self {
        Self::with_env(inner, config, ProcessEnv)
    }
}

impl<C: Commander, E: EnvLookup> ResolvingCommand<C, E> {
    pub fn with_env(inner: C, config: ResolverConfig, env: E) -> Self {
        Self { inner, resolver: ConfigResolver::with_env(config, env), resolution: None }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn resolver_config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    /// Outcome of the last resolution pass, once `pre_run` has run.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// Config file read by the last resolution pass, for settings that are
    /// not flags.
    pub fn config_file(&self) -> Option<&ConfigFile> {
        self.resolution.as_ref()?.config()
    }
}

impl<C: Commander, E: EnvLookup> Commander for ResolvingCommand<C, E> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn init(&mut self, cmd: clap::Command, flags: &mut FlagSet) -> Result<clap::Command> {
        self.inner.init(cmd, flags)
    }

    fn pre_run(&mut self, flags: &mut FlagSet) -> Result<()> {
        let resolution = self
            .resolver
            .resolve(flags)
            .with_context(|| format!("Failed to resolve flags for \"{}\"", self.inner.name()))?;
        tracing::debug!(
            command = self.inner.name(),
            command_line = resolution.from_command_line,
            environment = resolution.from_environment,
            file = resolution.from_file,
            default = resolution.from_default,
            "Resolved flags"
        );
        self.resolution = Some(resolution);

        self.inner.pre_run(flags)
    }

    fn run(&mut self, flags: &FlagSet) -> Result<()> {
        self.inner.run(flags)
    }
}
