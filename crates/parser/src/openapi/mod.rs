//! OpenAPI 3 document parser
//!
//! Reads OpenAPI 3.x documents in JSON or YAML form and converts them into
//! an `ApiDefinition`.
//!
//! ## Extensions
//!
//! A path item may carry an `x-ingress` extension to override options for
//! that path:
//!
//! ```yaml
//! paths:
//!   /internal/metrics:
//!     x-ingress:
//!       disabled: true
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_ingress_parser::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.yaml")?;
//! let api = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::{OpenApiParser, SourceFormat};
pub use types::*;
