//! Generation options
//!
//! Options are assembled by the caller from an optional YAML file, per-path
//! overrides declared in the API document, and command-line flags. Generators
//! only ever read them.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Options shared by all generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Namespace the generated resources live in
    pub namespace: String,

    /// Backend service the resources route to
    pub service: ServiceOptions,

    /// Path handling
    pub path: PathOptions,

    /// Host the rules apply to; empty means any host
    pub host: String,

    /// Ingress specific settings
    pub ingress: IngressOptions,

    /// Per-path overrides keyed by path template
    pub paths: BTreeMap<String, PathSubOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    pub name: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Base path every API path is mounted under
    pub base: String,

    /// Force one resource per API path
    pub split: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngressOptions {
    /// Ingress class name; empty means the cluster default
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSubOptions {
    pub disabled: Option<bool>,
}

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_SERVICE_PORT: u16 = 80;
pub const DEFAULT_BASE_PATH: &str = "/";

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            service: ServiceOptions::default(),
            path: PathOptions::default(),
            host: String::new(),
            ingress: IngressOptions::default(),
            paths: BTreeMap::new(),
        }
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            port: DEFAULT_SERVICE_PORT,
        }
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_PATH.to_string(),
            split: false,
        }
    }
}

impl Options {
    /// Load options from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read options file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse options from {:?}: {}", path, e))
        })
    }

    /// Parse options from a YAML string; missing fields take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Whether the given path template is disabled by an override
    pub fn is_path_disabled(&self, path: &str) -> bool {
        self.paths
            .get(path)
            .and_then(|sub| sub.disabled)
            .unwrap_or(false)
    }

    /// Mark a path template as disabled
    pub fn disable_path(&mut self, path: impl Into<String>) {
        self.paths.entry(path.into()).or_default().disabled = Some(true);
    }

    /// Merge overrides that come from a lower-precedence source
    ///
    /// An override already present for a path wins over the merged one.
    pub fn merge_path_overrides<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        for (path, disabled) in overrides {
            let sub = self.paths.entry(path.into()).or_default();
            if sub.disabled.is_none() {
                sub.disabled = Some(disabled);
            }
        }
    }

    /// Set a single option by its dotted key, e.g. `path.base`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "namespace" => self.namespace = value.to_string(),
            "host" => self.host = value.to_string(),
            "service.name" => self.service.name = value.to_string(),
            "service.port" => {
                self.service.port = value.parse().map_err(|_| {
                    GeneratorError::Validation(format!("invalid service.port: {:?}", value))
                })?
            }
            "path.base" => self.path.base = value.to_string(),
            "path.split" => {
                self.path.split = value.parse().map_err(|_| {
                    GeneratorError::Validation(format!("invalid path.split: {:?}", value))
                })?
            }
            "ingress.class" => self.ingress.class = value.to_string(),
            other => {
                return Err(GeneratorError::Validation(format!(
                    "unknown option: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Check that the options are complete and well formed
    pub fn validate(&self) -> Result<()> {
        if !is_dns_label(&self.namespace) {
            return Err(GeneratorError::Validation(format!(
                "namespace {:?} is not a valid DNS-1123 label",
                self.namespace
            )));
        }

        if self.service.name.is_empty() {
            return Err(GeneratorError::Validation(
                "service.name is required".to_string(),
            ));
        }
        if !is_dns_label(&self.service.name) {
            return Err(GeneratorError::Validation(format!(
                "service.name {:?} is not a valid DNS-1123 label",
                self.service.name
            )));
        }
        if self.service.port == 0 {
            return Err(GeneratorError::Validation(
                "service.port must be between 1 and 65535".to_string(),
            ));
        }

        if !self.path.base.starts_with('/') {
            return Err(GeneratorError::Validation(format!(
                "path.base {:?} must begin with '/'",
                self.path.base
            )));
        }

        if self.host.contains('/') || self.host.contains(':') {
            return Err(GeneratorError::Validation(format!(
                "host {:?} must be a bare host name",
                self.host
            )));
        }

        Ok(())
    }
}

/// RFC 1123 label: lowercase alphanumerics and '-', alphanumeric at both ends
fn is_dns_label(s: &str) -> bool {
    if s.is_empty() || s.len() > 63 {
        return false;
    }
    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    s.chars().all(|c| valid_char(c) || c == '-')
        && s.starts_with(valid_char)
        && s.ends_with(valid_char)
}
