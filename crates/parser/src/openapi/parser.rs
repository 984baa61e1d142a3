//! OpenAPI document loader

use super::types::OpenApiSpec;
use openapi_ingress_common::{ApiDefinition, GeneratorError, Result};
use std::fs;
use std::path::Path;

/// OpenAPI document parser
///
/// Reads OpenAPI 3.x documents written as JSON or YAML.
pub struct OpenApiParser {
    /// Loaded OpenAPI document
    spec: OpenApiSpec,
}

/// Serialization format of an OpenAPI document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Guess the format from a file extension, falling back to the content
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => SourceFormat::Json,
            Some("yaml") | Some("yml") => SourceFormat::Yaml,
            _ => Self::detect_content(content),
        }
    }

    /// JSON documents are objects; anything else is treated as YAML
    pub fn detect_content(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            SourceFormat::Json
        } else {
            SourceFormat::Yaml
        }
    }
}

impl OpenApiParser {
    /// Load an OpenAPI document from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("petstore.yaml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        match SourceFormat::detect(path.as_ref(), &content) {
            SourceFormat::Json => Self::from_json(&content),
            SourceFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Parse an OpenAPI document from a string of either format
    pub fn from_content(content: &str) -> Result<Self> {
        match SourceFormat::detect_content(content) {
            SourceFormat::Json => Self::from_json(content),
            SourceFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Parse an OpenAPI document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;

        Self::new(spec)
    }

    /// Parse an OpenAPI document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;

        Self::new(spec)
    }

    /// Wrap an already deserialized document
    pub fn new(spec: OpenApiSpec) -> Result<Self> {
        if !spec.openapi.starts_with("3.") {
            return Err(GeneratorError::Parse(format!(
                "Unsupported OpenAPI version {:?}, expected 3.x",
                spec.openapi
            )));
        }

        Ok(Self { spec })
    }

    /// Convert the document into an ApiDefinition
    pub fn parse(&self) -> Result<ApiDefinition> {
        super::converter::convert_openapi_to_api_definition(&self.spec)
    }

    /// Get reference to the underlying OpenAPI document
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}
