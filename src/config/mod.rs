//! Configuration loading and flag resolution
//!
//! Fills flags from environment variables and config files with proper
//! precedence (CLI > Env > File > Defaults).

pub mod env;
pub mod loader;
pub mod replacer;
pub mod resolver;

pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use loader::{ConfigFile, ConfigFormat, LoadError};
pub use replacer::KeyReplacer;
pub use resolver::{ConfigResolver, Resolution, ResolveError, ResolverConfig};
