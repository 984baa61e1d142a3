//! Serialization of generated resources

use openapi_ingress_common::{GeneratorError, Ingress, Result};

/// Line starting every document of a multi-document stream
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Encodes a single resource to text
#[cfg_attr(test, mockall::automock)]
pub trait ResourceEncoder {
    fn encode(&self, ingress: &Ingress) -> Result<String>;
}

/// YAML encoder backed by serde_yaml
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl ResourceEncoder for YamlEncoder {
    fn encode(&self, ingress: &Ingress) -> Result<String> {
        Ok(serde_yaml::to_string(ingress)?)
    }
}

/// Encode one resource without a document separator
pub fn encode_single(ingress: &Ingress, encoder: &dyn ResourceEncoder) -> Result<String> {
    encoder.encode(ingress).map_err(|e| serialization_error(ingress, e))
}

/// Concatenate resources into one multi-document text, in the given order
///
/// The first failing resource aborts the whole assembly.
pub fn assemble(resources: &[Ingress], encoder: &dyn ResourceEncoder) -> Result<String> {
    let mut output = String::new();

    for ingress in resources {
        let document = encode_single(ingress, encoder)?;
        output.push_str(DOCUMENT_SEPARATOR);
        output.push_str(&document);
        if !document.ends_with('\n') {
            output.push('\n');
        }
    }

    Ok(output)
}

fn serialization_error(ingress: &Ingress, source: GeneratorError) -> GeneratorError {
    match source {
        GeneratorError::Serialization { .. } => source,
        other => GeneratorError::Serialization {
            resource: ingress.name().to_string(),
            reason: other.to_string(),
        },
    }
}
