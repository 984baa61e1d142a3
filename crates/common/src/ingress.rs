//! Kubernetes `networking.k8s.io/v1` Ingress schema
//!
//! Only the fields the generators emit are modelled. Field names follow the
//! Kubernetes API (camelCase) so the YAML output can be applied as-is.

use serde::{Deserialize, Serialize};

/// API version of generated Ingress resources
pub const INGRESS_API_VERSION: &str = "networking.k8s.io/v1";

/// Kind of generated Ingress resources
pub const INGRESS_KIND: &str = "Ingress";

/// Ingress resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingress {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: IngressSpec,
}

/// Resource identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// Omitted when empty so the cluster default class applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,

    #[serde(default)]
    pub rules: Vec<IngressRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    pub http: HttpIngressRuleValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpIngressRuleValue {
    pub paths: Vec<HttpIngressPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    pub path_type: PathType,
    pub path: String,
    pub backend: IngressBackend,
}

/// How an Ingress path is matched against request paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    Exact,
    Prefix,
    ImplementationSpecific,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressBackend {
    pub service: IngressServiceBackend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressServiceBackend {
    pub name: String,
    pub port: ServiceBackendPort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBackendPort {
    pub number: u16,
}

impl Ingress {
    /// Create an empty Ingress with the given identity
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: INGRESS_API_VERSION.to_string(),
            kind: INGRESS_KIND.to_string(),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec: IngressSpec::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// All HTTP paths across every rule
    pub fn http_paths(&self) -> impl Iterator<Item = &HttpIngressPath> {
        self.spec.rules.iter().flat_map(|r| r.http.paths.iter())
    }
}
