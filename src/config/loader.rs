//! Config file loading

use figment::providers::{Format, Json, Toml, Yaml};
use figment::Figment;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config file not found")]
    NotFound,

    #[error("failed reading config file: {0}")]
    Read(#[source] io::Error),

    #[error("unsupported config extension '.{0}'")]
    UnsupportedExtension(String),

    #[error("invalid {format} config: {source}")]
    Parse {
        format: ConfigFormat,
        #[source]
        source: figment::Error,
    },
}

/// Config file syntaxes, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(LoadError::UnsupportedExtension(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// A parsed config document, addressed by dotted keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    format: ConfigFormat,
    root: Map<String, Value>,
}

impl ConfigFile {
    /// Reads before looking at the extension, so a missing file is always
    /// [`LoadError::NotFound`] whatever its name.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Read(e),
        })?;
        let format = ConfigFormat::from_path(path)?;
        Self::parse(path, &content, format)
    }

    pub fn parse(path: &Path, content: &str, format: ConfigFormat) -> Result<Self, LoadError> {
        let root = if is_blank(content) {
            Map::new()
        } else {
            let figment = match format {
                ConfigFormat::Yaml => Figment::from(Yaml::string(content)),
                ConfigFormat::Toml => Figment::from(Toml::string(content)),
                ConfigFormat::Json => Figment::from(Json::string(content)),
            };
            figment.extract().map_err(|source| LoadError::Parse { format, source })?
        };

        Ok(Self { path: path.to_path_buf(), format, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Look up `key`, descending into nested mappings at each `.`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Files holding nothing but whitespace and `#` comments parse as empty.
fn is_blank(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}
