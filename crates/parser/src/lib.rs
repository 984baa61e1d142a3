//! OpenAPI parsing for ingress generation
//!
//! This crate loads OpenAPI 3 documents (JSON or YAML) and converts them into
//! the format-independent `ApiDefinition` consumed by generators.
//!
//! Paths keep the order they have in the document. Generators that need a
//! stable output order sort on their own.

pub mod openapi;

pub use openapi::{OpenApiParser, OpenApiSpec, SourceFormat};

use openapi_ingress_common::{ApiDefinition, Result};
use std::path::Path;

/// Load an OpenAPI document from a file and convert it
pub fn parse_openapi_file(path: &Path) -> Result<ApiDefinition> {
    OpenApiParser::from_file(path)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_openapi_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "openapi: 3.0.0\ninfo:\n  title: Pets\n  version: 1.0.0\npaths:\n  /pets:\n    get: {{}}"
        )
        .unwrap();

        let api = parse_openapi_file(file.path()).unwrap();
        assert_eq!(api.title, "Pets");
        assert_eq!(api.templates().collect::<Vec<_>>(), vec!["/pets"]);
    }
}
