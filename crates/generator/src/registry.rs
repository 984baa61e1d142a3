//! Generator registry
//!
//! Generators are registered explicitly on a registry value owned by the
//! caller; there is no process-wide table.

use crate::IngressGenerator;
use openapi_ingress_common::{ApiDefinition, GeneratorError, Options, Result};
use std::collections::BTreeMap;

/// Value type of a generator flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Bool,
}

/// Description of one generator-specific flag
///
/// `name` is the dotted option key the value is applied to, e.g. `path.base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
    pub default: &'static str,
    pub help: &'static str,
}

/// A pluggable resource generator
pub trait Generator {
    /// Command name used to select the generator
    fn name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Flags the generator understands
    fn flags(&self) -> Vec<FlagSpec>;

    /// Generate serialized resources for the API
    fn generate(&self, options: &Options, api: &ApiDefinition) -> Result<String>;
}

/// Map from generator name to generator
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every generator shipped with this crate
    pub fn with_builtin_generators() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(IngressGenerator::new()))?;
        Ok(registry)
    }

    /// Register a generator under its own name
    pub fn register(&mut self, generator: Box<dyn Generator>) -> Result<()> {
        let name = generator.name();
        if self.generators.contains_key(name) {
            return Err(GeneratorError::Registry(format!(
                "generator {:?} is already registered",
                name
            )));
        }

        self.generators.insert(name, generator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Generator> {
        self.generators.get(name).map(|g| g.as_ref())
    }

    /// Look up a generator, failing with a registry error if it is missing
    pub fn require(&self, name: &str) -> Result<&dyn Generator> {
        self.get(name).ok_or_else(|| {
            GeneratorError::Registry(format!(
                "unknown generator {:?}, available: {}",
                name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Registered names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.values().map(|g| g.as_ref())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Generator for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "echoes the API title"
        }

        fn flags(&self) -> Vec<FlagSpec> {
            Vec::new()
        }

        fn generate(&self, _options: &Options, api: &ApiDefinition) -> Result<String> {
            Ok(api.title.clone())
        }
    }

    #[test]
    fn test_builtin_generators() {
        let registry = GeneratorRegistry::with_builtin_generators().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ingress"]);
        assert!(registry.get("ingress").is_some());
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        registry.register(Box::new(Echo)).unwrap();

        let api = ApiDefinition {
            title: "Petstore".to_string(),
            ..ApiDefinition::default()
        };
        let out = registry
            .require("echo")
            .unwrap()
            .generate(&Options::default(), &api)
            .unwrap();
        assert_eq!(out, "Petstore");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = GeneratorRegistry::new();
        registry.register(Box::new(Echo)).unwrap();
        let err = registry.register(Box::new(Echo)).unwrap_err();
        assert!(matches!(err, GeneratorError::Registry(_)));
    }

    #[test]
    fn test_unknown_generator_lists_available() {
        let registry = GeneratorRegistry::with_builtin_generators().unwrap();
        let err = registry.require("linkerd").err().unwrap();
        assert!(err.to_string().contains("ingress"));
    }
}
