//! OpenAPI 3 type definitions
//!
//! Simplified representation focusing on paths and their extensions

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the vendor extension carrying per-path overrides
pub const EXTENSION_KEY: &str = "x-ingress";

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths in document order
    #[serde(default)]
    pub paths: Paths,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Ordered `paths` object
///
/// JSON objects and YAML mappings are unordered as far as most maps are
/// concerned, so entries are collected into a vector as they are read.
#[derive(Debug, Clone, Default)]
pub struct Paths(Vec<(String, PathItem)>);

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    /// Everything else, including `x-*` extensions
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-path overrides read from the `x-ingress` extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathExtension {
    #[serde(default)]
    pub disabled: Option<bool>,
}

impl Paths {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathItem)> {
        self.0.iter().map(|(path, item)| (path.as_str(), item))
    }

    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.0.iter().find(|(p, _)| p == path).map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PathItem)> for Paths {
    fn from_iter<T: IntoIterator<Item = (String, PathItem)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Paths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, item) in &self.0 {
            map.serialize_entry(path, item)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = Paths;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of path templates to path items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Paths, A::Error> {
                let mut entries: Vec<(String, PathItem)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((path, item)) = access.next_entry::<String, PathItem>()? {
                    if entries.iter().any(|(p, _)| *p == path) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate path {:?}",
                            path
                        )));
                    }
                    entries.push((path, item));
                }

                Ok(Paths(entries))
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

impl PathItem {
    /// Lowercase names of the HTTP methods defined on this path
    pub fn methods(&self) -> Vec<String> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter(|(_, op)| op.is_some())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Overrides from the `x-ingress` extension, if present and well formed
    pub fn ingress_extension(&self) -> Option<PathExtension> {
        self.extensions
            .get(EXTENSION_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
