//! flagbind: populate command-line flags from the environment and config files
//!
//! A command declares typed flags, clap parses the command line, and
//! [`ResolvingCommand`] fills every flag the user did not type from an
//! environment variable or a config file before the command runs.
//!
//! ```no_run
//! use flagbind::{execute, KeyReplacer, ResolverConfig, ResolvingCommand, SimpleCommand};
//!
//! let config = ResolverConfig::new()
//!     .env_prefix("cmd")
//!     .key_replacer(KeyReplacer::new([("-", "_")]))
//!     .config_file("testconfig.yml")
//!     .optional_config_file(true);
//! let mut command = ResolvingCommand::new(SimpleCommand::new("example-command", "An example"), config);
//! execute(&mut command, std::env::args_os()).unwrap();
//! ```

pub mod command;
pub mod config;
pub mod flags;

pub use command::{execute, Commander, ResolvingCommand, SimpleCommand};
pub use config::{
    ConfigFile, ConfigFormat, ConfigResolver, EnvLookup, KeyReplacer, LoadError, MapEnv, ProcessEnv,
    Resolution, ResolveError, ResolverConfig,
};
pub use flags::{Flag, FlagError, FlagKind, FlagSet, FlagValue, ValueSource};
