//! Typed flag declarations
//!
//! A [`FlagSet`] is declared by a command before arguments are parsed. The
//! command line, the environment and config files then write into it, and
//! every flag remembers which of those supplied its current value.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

mod args;
pub mod value;

pub use value::{FlagKind, FlagValue};

/// Where a flag's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Default,
    CommandLine,
    Environment,
    File,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueSource::Default => "default",
            ValueSource::CommandLine => "command line",
            ValueSource::Environment => "environment",
            ValueSource::File => "config file",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("flag --{0} is declared more than once")]
    Duplicate(String),

    #[error("unknown flag --{0}")]
    Unknown(String),

    #[error("invalid {kind} value {value:?} for flag --{name}")]
    Parse { name: String, kind: FlagKind, value: String },
}

/// A single named flag.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    usage: String,
    default: FlagValue,
    value: FlagValue,
    source: ValueSource,
}

impl Flag {
    fn new(name: &str, default: FlagValue, usage: &str) -> Self {
        Self {
            name: name.to_string(),
            usage: usage.to_string(),
            value: default.clone(),
            default,
            source: ValueSource::Default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn kind(&self) -> FlagKind {
        self.default.kind()
    }

    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    pub fn source(&self) -> ValueSource {
        self.source
    }

    /// True once anything other than the declared default supplied the value.
    pub fn changed(&self) -> bool {
        self.source != ValueSource::Default
    }

    /// Parse text as a value of this flag's kind.
    pub fn parse(&self, raw: &str) -> Result<FlagValue, FlagError> {
        self.kind().parse(raw).ok_or_else(|| FlagError::Parse {
            name: self.name.clone(),
            kind: self.kind(),
            value: raw.to_string(),
        })
    }
}

/// Ordered collection of flags, unique by name.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, name: &str, default: FlagValue, usage: &str) -> Result<&mut Self, FlagError> {
        if self.get(name).is_some() {
            return Err(FlagError::Duplicate(name.to_string()));
        }
        self.flags.push(Flag::new(name, default, usage));
        Ok(self)
    }

    pub fn add_string(&mut self, name: &str, default: &str, usage: &str) -> Result<&mut Self, FlagError> {
        self.declare(name, FlagValue::String(default.to_string()), usage)
    }

    pub fn add_bool(&mut self, name: &str, default: bool, usage: &str) -> Result<&mut Self, FlagError> {
        self.declare(name, FlagValue::Bool(default), usage)
    }

    pub fn add_int(&mut self, name: &str, default: i64, usage: &str) -> Result<&mut Self, FlagError> {
        self.declare(name, FlagValue::Int(default), usage)
    }

    pub fn add_float(&mut self, name: &str, default: f64, usage: &str) -> Result<&mut Self, FlagError> {
        self.declare(name, FlagValue::Float(default), usage)
    }

    pub fn add_list(&mut self, name: &str, default: &[&str], usage: &str) -> Result<&mut Self, FlagError> {
        let items = default.iter().map(|s| s.to_string()).collect();
        self.declare(name, FlagValue::List(items), usage)
    }

    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.iter_mut().find(|flag| flag.name == name)
    }

    /// Flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)?.value() {
            FlagValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)?.value() {
            FlagValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)?.value() {
            FlagValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.get(name)?.value() {
            FlagValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.get(name)?.value() {
            FlagValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn source(&self, name: &str) -> Option<ValueSource> {
        self.get(name).map(Flag::source)
    }

    pub fn changed(&self, name: &str) -> bool {
        self.get(name).is_some_and(Flag::changed)
    }

    /// Parse `raw` with the flag's kind and store it as coming from `source`.
    pub fn set(&mut self, name: &str, raw: &str, source: ValueSource) -> Result<(), FlagError> {
        let flag = self.get_mut(name).ok_or_else(|| FlagError::Unknown(name.to_string()))?;
        flag.value = flag.parse(raw)?;
        flag.source = source;
        Ok(())
    }

    /// Store an already-typed value. The kind must match the declaration.
    pub(crate) fn store(
        &mut self,
        name: &str,
        value: FlagValue,
        source: ValueSource,
    ) -> Result<(), FlagError> {
        let flag = self.get_mut(name).ok_or_else(|| FlagError::Unknown(name.to_string()))?;
        if value.kind() != flag.kind() {
            return Err(FlagError::Parse {
                name: flag.name.clone(),
                kind: flag.kind(),
                value: value.to_string(),
            });
        }
        flag.value = value;
        flag.source = source;
        Ok(())
    }
}
