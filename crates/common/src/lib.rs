//! Common types and utilities for openapi-ingress
//!
//! This crate contains shared data structures, error types, and options
//! used across the parser, generator, and CLI components.

pub mod ingress;
pub mod options;

pub use ingress::{
    HttpIngressPath, HttpIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ObjectMeta, PathType, ServiceBackendPort,
};
pub use options::{IngressOptions, Options, PathOptions, PathSubOptions, ServiceOptions};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during ingress generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unable to serialize resource {resource}: {reason}")]
    Serialization { resource: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Intermediate representation of a parsed API description
///
/// Generators consume this instead of the raw OpenAPI document so they stay
/// independent of the document format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// API title from `info.title`
    pub title: String,

    /// API version from `info.version`
    pub version: String,

    /// Paths in document order
    pub paths: Vec<ApiPath>,
}

/// One path template of the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPath {
    /// Path template, e.g. `/pets/{id}`
    pub template: String,

    /// HTTP methods declared on the path, lowercase
    #[serde(default)]
    pub methods: Vec<String>,

    /// Disabled override declared in the document itself
    #[serde(default)]
    pub disabled: Option<bool>,
}

impl ApiPath {
    /// Create a path entry with no methods and no override
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            methods: Vec::new(),
            disabled: None,
        }
    }
}

impl ApiDefinition {
    /// Build a definition from bare path templates, keeping their order
    pub fn from_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: templates.into_iter().map(ApiPath::new).collect(),
            ..Self::default()
        }
    }

    /// Iterate path templates in document order
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.template.as_str())
    }
}
