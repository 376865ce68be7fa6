//! Command-line interface for the flagbind demo
//!
//! Runs `example-command` with its flags resolved from `FLAGBIND_*`
//! environment variables and an optional `flagbind.yml`.

use anyhow::Result;
use std::ffi::OsString;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flagbind::{
    execute, ConfigResolver, EnvLookup, FlagKind, FlagValue, KeyReplacer, ProcessEnv, ResolverConfig,
    ResolvingCommand,
};

mod example;

const ENV_PREFIX: &str = "flagbind";
const DEFAULT_CONFIG: &str = "flagbind.yml";

pub fn run() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let config = ResolverConfig::new()
        .env_prefix(ENV_PREFIX)
        .key_replacer(KeyReplacer::new([("-", "_")]))
        .config_file(DEFAULT_CONFIG)
        .optional_config_file(true)
        .config_flag("config");

    // Logging starts before flags are resolved, so look for --verbose directly.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if verbose_requested(&args, &config, &ProcessEnv) {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let mut command = ResolvingCommand::new(example::ExampleCommand::new(), config);

    match execute(&mut command, args) {
        Err(err) => match err.downcast_ref::<clap::Error>() {
            Some(clap_err) => clap_err.exit(),
            None => Err(err),
        },
        ok => ok,
    }
}

/// Whether `--verbose` is on, from the command line or from the same
/// environment variable the resolver would read for the flag.
fn verbose_requested(args: &[OsString], config: &ResolverConfig, env: &impl EnvLookup) -> bool {
    let is_true = |raw: &str| FlagKind::Bool.parse(raw) == Some(FlagValue::Bool(true));
    let on_command_line = args.iter().skip(1).filter_map(|arg| arg.to_str()).any(|arg| {
        arg == "--verbose" || arg.strip_prefix("--verbose=").is_some_and(is_true)
    });
    if on_command_line {
        return true;
    }

    let key = ConfigResolver::with_env(config.clone(), env).env_key("verbose");
    env.get(&key).is_some_and(|value| is_true(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagbind::MapEnv;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("flagbind").chain(list.iter().copied()).map(OsString::from).collect()
    }

    #[test]
    fn test_verbose_from_command_line() {
        let config = ResolverConfig::new().env_prefix(ENV_PREFIX);
        assert!(verbose_requested(&args(&["--verbose"]), &config, &MapEnv::new()));
        assert!(verbose_requested(&args(&["--verbose=1"]), &config, &MapEnv::new()));
        assert!(!verbose_requested(&args(&["--verbose=false"]), &config, &MapEnv::new()));
        assert!(!verbose_requested(&args(&[]), &config, &MapEnv::new()));
    }

    #[test]
    fn test_verbose_env_key_follows_resolver_config() {
        let env = MapEnv::new().with("FLAGBIND_VERBOSE", "true");
        assert!(verbose_requested(&args(&[]), &ResolverConfig::new().env_prefix(ENV_PREFIX), &env));

        let renamed = ResolverConfig::new().env_prefix("demo");
        assert!(!verbose_requested(&args(&[]), &renamed, &env));
        let env = MapEnv::new().with("DEMO_VERBOSE", "T");
        assert!(verbose_requested(&args(&[]), &renamed, &env));
    }
}
