//! Kubernetes Ingress generation from API definitions
//!
//! This crate turns a parsed `ApiDefinition` plus `Options` into serialized
//! Ingress resources.
//!
//! ## Modes
//! - **Consolidated**: one `<service>-ingress` resource with a prefix rule per
//!   path (or the base path alone when the API has no paths).
//! - **Split**: one `<service>-<path>` resource per enabled path, sorted by
//!   name. Selected by `path.split` or by disabling any path.
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_ingress_generator::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::with_builtin_generators()?;
//! let yaml = registry.require("ingress")?.generate(&options, &api)?;
//! ```

mod builder;
mod classifier;
mod ingress;
mod matcher;
mod naming;
mod output;
mod registry;

pub use builder::build_resource;
pub use classifier::should_split;
pub use ingress::{IngressGenerator, IngressPlan};
pub use matcher::{
    build_match, collapse_separators, MatchKind, MatchMode, MatchRule, VARIABLE_PATTERN,
};
pub use naming::{derive_name, resource_name, ROOT_NAME};
pub use output::{assemble, encode_single, ResourceEncoder, YamlEncoder, DOCUMENT_SEPARATOR};
pub use registry::{FlagKind, FlagSpec, Generator, GeneratorRegistry};

use openapi_ingress_common::{ApiDefinition, Options, Result};

/// Generate Ingress YAML with the default generator (convenience function)
pub fn generate_ingress(options: &Options, api: &ApiDefinition) -> Result<String> {
    IngressGenerator::new().generate(options, api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ingress() {
        let mut options = Options::default();
        options.service.name = "petstore".to_string();

        let yaml = generate_ingress(&options, &ApiDefinition::from_templates(["/pets"])).unwrap();
        assert!(yaml.contains("name: petstore-ingress"));
        assert!(!yaml.starts_with("---"));
    }
}
