//! Flag kinds, typed values and text parsing

use serde::Serialize;
use std::fmt;

/// Declared type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    String,
    Bool,
    Int,
    Float,
    List,
}

impl FlagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::String => "string",
            FlagKind::Bool => "bool",
            FlagKind::Int => "int",
            FlagKind::Float => "float",
            FlagKind::List => "list",
        }
    }

    /// Parse text into a value of this kind.
    ///
    /// Returns `None` when the text is not a valid value for the kind.
    pub fn parse(&self, raw: &str) -> Option<FlagValue> {
        match self {
            FlagKind::String => Some(FlagValue::String(raw.to_string())),
            FlagKind::Bool => parse_bool(raw).map(FlagValue::Bool),
            FlagKind::Int => raw.trim().parse::<i64>().ok().map(FlagValue::Int),
            FlagKind::Float => raw.trim().parse::<f64>().ok().map(FlagValue::Float),
            FlagKind::List => Some(FlagValue::List(split_csv(raw))),
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed flag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::String(_) => FlagKind::String,
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::Int(_) => FlagKind::Int,
            FlagValue::Float(_) => FlagKind::Float,
            FlagValue::List(_) => FlagKind::List,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::String(s) => f.write_str(s),
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Int(n) => write!(f, "{}", n),
            FlagValue::Float(n) => write!(f, "{}", n),
            FlagValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Boolean spellings accepted on the command line, in the environment and in
/// config files.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated string into trimmed, non-empty parts.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["1", "t", "T", "true", "TRUE", "True", " true "] {
            assert_eq!(FlagKind::Bool.parse(raw), Some(FlagValue::Bool(true)), "{raw:?}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(FlagKind::Bool.parse(raw), Some(FlagValue::Bool(false)), "{raw:?}");
        }
        assert_eq!(FlagKind::Bool.parse("yes"), None);
        assert_eq!(FlagKind::Bool.parse(""), None);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(FlagKind::Int.parse(" 42 "), Some(FlagValue::Int(42)));
        assert_eq!(FlagKind::Int.parse("-7"), Some(FlagValue::Int(-7)));
        assert_eq!(FlagKind::Int.parse("4.2"), None);
        assert_eq!(FlagKind::Float.parse("0.25"), Some(FlagValue::Float(0.25)));
        assert_eq!(FlagKind::Float.parse("fast"), None);
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(
            FlagKind::String.parse("  spaced out "),
            Some(FlagValue::String("  spaced out ".to_string()))
        );
    }

    #[test]
    fn test_list_splits_and_trims() {
        assert_eq!(
            FlagKind::List.parse("a, b ,,c"),
            Some(FlagValue::List(vec!["a".into(), "b".into(), "c".into()]))
        );
        assert_eq!(FlagKind::List.parse(""), Some(FlagValue::List(Vec::new())));
    }

    #[test]
    fn test_display_list_joins_with_commas() {
        let value = FlagValue::List(vec!["x".into(), "y".into()]);
        assert_eq!(value.to_string(), "x,y");
        assert_eq!(value.kind(), FlagKind::List);
    }
}
