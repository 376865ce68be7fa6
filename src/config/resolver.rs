//! Layered flag resolution
//!
//! Precedence, highest first: command line, environment, config file, the
//! flag's declared default.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::env::{EnvLookup, ProcessEnv};
use super::loader::{ConfigFile, LoadError};
use super::replacer::KeyReplacer;
use crate::flags::{Flag, FlagError, FlagKind, FlagSet, FlagValue, ValueSource};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to load config file {}: {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("invalid {expected} value {value:?} for flag --{flag} from {origin}")]
    TypeCoercion { flag: String, origin: ValueSource, value: String, expected: FlagKind },

    #[error("config flag --{0} is not declared")]
    UnknownFlag(String),

    #[error(transparent)]
    Flag(#[from] FlagError),
}

/// Options for one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    env_prefix: Option<String>,
    key_replacer: Option<KeyReplacer>,
    config_file: Option<PathBuf>,
    config_optional: bool,
    config_flag: Option<String>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix joined with `_` in front of every derived environment key.
    /// An empty prefix means none.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.env_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Substitutions applied to flag names before deriving environment keys.
    pub fn key_replacer(mut self, replacer: KeyReplacer) -> Self {
        self.key_replacer = (!replacer.is_empty()).then_some(replacer);
        self
    }

    /// Config file to read flag values from. An empty path means none.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.config_file = (!path.as_os_str().is_empty()).then_some(path);
        self
    }

    /// Tolerate a missing config file. A file that exists but does not parse
    /// is still an error.
    pub fn optional_config_file(mut self, optional: bool) -> Self {
        self.config_optional = optional;
        self
    }

    /// Name of a flag whose command-line or environment value replaces the
    /// config file path. A path given this way must exist.
    pub fn config_flag(mut self, name: impl Into<String>) -> Self {
        self.config_flag = Some(name.into());
        self
    }

    pub fn get_env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    pub fn get_config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn is_config_optional(&self) -> bool {
        self.config_optional
    }
}

/// Summary of a completed resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The config file that was read, if any.
    pub config_file: Option<PathBuf>,
    pub from_command_line: usize,
    pub from_environment: usize,
    pub from_file: usize,
    pub from_default: usize,
    file: Option<ConfigFile>,
}

impl Resolution {
    /// The loaded config document, including keys no flag is bound to.
    pub fn config(&self) -> Option<&ConfigFile> {
        self.file.as_ref()
    }

    fn record(&mut self, source: ValueSource) {
        match source {
            ValueSource::CommandLine => self.from_command_line += 1,
            ValueSource::Environment => self.from_environment += 1,
            ValueSource::File => self.from_file += 1,
            ValueSource::Default => self.from_default += 1,
        }
    }
}

/// Fills a [`FlagSet`] from the environment and an optional config file.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E = ProcessEnv> {
    config: ResolverConfig,
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_env(config, ProcessEnv)
    }
}

impl<E: EnvLookup> ConfigResolver<E> {
    pub fn with_env(config: ResolverConfig, env: E) -> Self {
        Self { config, env }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Environment variable consulted for the flag `name`.
    pub fn env_key(&self, name: &str) -> String {
        let key = match &self.config.key_replacer {
            Some(replacer) => replacer.replace(name),
            None => name.to_string(),
        };
        let key = match &self.config.env_prefix {
            Some(prefix) => format!("{}_{}", prefix, key),
            None => key,
        };
        key.to_uppercase()
    }

    /// Empty variables count as unset.
    fn lookup_env(&self, name: &str) -> Option<(String, String)> {
        let key = self.env_key(name);
        let value = self.env.get(&key).filter(|v| !v.is_empty())?;
        Some((key, value))
    }

    /// The config path to read and whether it must exist.
    fn config_path(&self, flags: &FlagSet) -> Result<Option<(PathBuf, bool)>, ResolveError> {
        if let Some(name) = &self.config.config_flag {
            let flag = flags.get(name).ok_or_else(|| ResolveError::UnknownFlag(name.clone()))?;
            let explicit = match (flag.source(), flag.value()) {
                (ValueSource::CommandLine, FlagValue::String(path)) if !path.is_empty() => {
                    Some(path.clone())
                }
                _ => self.lookup_env(name).map(|(_, value)| value),
            };
            if let Some(path) = explicit {
                return Ok(Some((PathBuf::from(path), true)));
            }
        }

        Ok(self.config.config_file.clone().map(|path| (path, !self.config.config_optional)))
    }

    fn load_config_file(&self, flags: &FlagSet) -> Result<Option<ConfigFile>, ResolveError> {
        let Some((path, required)) = self.config_path(flags)? else {
            return Ok(None);
        };

        match ConfigFile::load(&path) {
            Ok(file) => {
                debug!("Loaded config file {}", path.display());
                Ok(Some(file))
            }
            Err(LoadError::NotFound) if !required => {
                debug!("Optional config file {} not found, skipping", path.display());
                Ok(None)
            }
            Err(source) => Err(ResolveError::ConfigLoad { path, source }),
        }
    }

    /// Resolve every flag not set on the command line.
    ///
    /// All values are computed before any is written, so on error the flag
    /// set is left as it was.
    pub fn resolve(&self, flags: &mut FlagSet) -> Result<Resolution, ResolveError> {
        let file = self.load_config_file(flags)?;
        let mut resolution = Resolution {
            config_file: file.as_ref().map(|f| f.path().to_path_buf()),
            ..Resolution::default()
        };

        let mut updates = Vec::new();
        for flag in flags.iter() {
            if flag.source() == ValueSource::CommandLine {
                resolution.record(ValueSource::CommandLine);
                continue;
            }

            let (value, source) = if let Some((key, raw)) = self.lookup_env(flag.name()) {
                let value = flag
                    .parse(&raw)
                    .map_err(|_| coercion_error(flag, ValueSource::Environment, raw))?;
                debug!(flag = flag.name(), env = %key, "Resolved flag from environment");
                (value, ValueSource::Environment)
            } else if let Some(entry) = file_entry(file.as_ref(), flag.name()) {
                let value = file_value(flag, entry)?;
                debug!(flag = flag.name(), "Resolved flag from config file");
                (value, ValueSource::File)
            } else {
                (flag.default_value().clone(), ValueSource::Default)
            };

            resolution.record(source);
            if flag.source() != source || flag.value() != &value {
                updates.push((flag.name().to_string(), value, source));
            }
        }

        for (name, value, source) in updates {
            flags.store(&name, value, source)?;
        }

        resolution.file = file;
        Ok(resolution)
    }
}

/// Null entries count as absent.
fn file_entry<'a>(file: Option<&'a ConfigFile>, key: &str) -> Option<&'a Value> {
    file?.get(key).filter(|value| !value.is_null())
}

fn coercion_error(flag: &Flag, origin: ValueSource, value: String) -> ResolveError {
    ResolveError::TypeCoercion { flag: flag.name().to_string(), origin, value, expected: flag.kind() }
}

/// Convert a config file entry into the flag's type.
///
/// Scalars go through the same text parsing as environment values. Arrays
/// only bind to list flags, and mappings bind to nothing. Null list items are
/// skipped, and a float with no fractional part binds to an int flag.
fn file_value(flag: &Flag, entry: &Value) -> Result<FlagValue, ResolveError> {
    let parsed = match (flag.kind(), entry) {
        (FlagKind::List, Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(FlagValue::List),
        (_, Value::Array(_) | Value::Object(_)) => None,
        (FlagKind::Int, Value::Number(n)) if n.is_f64() => integral(n).map(FlagValue::Int),
        (kind, scalar) => scalar_text(scalar).and_then(|text| kind.parse(&text)),
    };

    parsed.ok_or_else(|| coercion_error(flag, ValueSource::File, entry.to_string()))
}

fn integral(n: &serde_json::Number) -> Option<i64> {
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
