//! Converts an OpenAPI document to the ApiDefinition IR

use super::types::OpenApiSpec;
use openapi_ingress_common::{ApiDefinition, ApiPath, GeneratorError, Result};

/// Convert OpenAPI document to ApiDefinition
pub fn convert_openapi_to_api_definition(spec: &OpenApiSpec) -> Result<ApiDefinition> {
    let mut paths = Vec::with_capacity(spec.paths.len());

    for (template, item) in spec.paths.iter() {
        check_template(template)?;

        paths.push(ApiPath {
            template: template.to_string(),
            methods: item.methods(),
            disabled: item.ingress_extension().and_then(|ext| ext.disabled),
        });
    }

    Ok(ApiDefinition {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        paths,
    })
}

/// Path templates must be absolute and every `{variable}` must be named,
/// closed, and kept within one segment
fn check_template(template: &str) -> Result<()> {
    if !template.starts_with('/') {
        return Err(GeneratorError::Parse(format!(
            "path {:?} must begin with '/'",
            template
        )));
    }

    // length of the variable name read so far, while inside braces
    let mut variable: Option<usize> = None;
    for c in template.chars() {
        variable = match (c, variable) {
            ('{', None) => Some(0),
            ('}', Some(0)) => {
                return Err(GeneratorError::Parse(format!(
                    "path {:?} has an unnamed variable",
                    template
                )))
            }
            ('}', Some(_)) => None,
            ('{' | '}' | '/', _) => return Err(malformed(template)),
            (_, Some(len)) => Some(len + 1),
            (_, None) => None,
        };
    }

    if variable.is_some() {
        return Err(malformed(template));
    }

    Ok(())
}

fn malformed(template: &str) -> GeneratorError {
    GeneratorError::Parse(format!("path {:?} has malformed variable braces", template))
}
