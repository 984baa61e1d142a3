//! Ingress resource assembly

use crate::matcher::MatchRule;
use openapi_ingress_common::{
    GeneratorError, HttpIngressPath, HttpIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, Result, ServiceBackendPort, ServiceOptions,
};

/// Assemble one Ingress routing `rules` to the backend service
///
/// All rules share a single host rule. An empty `host` matches any host and
/// an empty `ingress_class` leaves the class to the cluster default.
pub fn build_resource(
    name: &str,
    namespace: &str,
    rules: &[MatchRule],
    backend: &ServiceOptions,
    host: &str,
    ingress_class: &str,
) -> Result<Ingress> {
    if name.is_empty() {
        return Err(GeneratorError::InvalidInput(
            "resource name must not be empty".to_string(),
        ));
    }
    if backend.name.is_empty() {
        return Err(GeneratorError::InvalidInput(format!(
            "resource {} has no backend service name",
            name
        )));
    }
    if rules.is_empty() {
        return Err(GeneratorError::InvalidInput(format!(
            "resource {} has no path rules",
            name
        )));
    }

    let paths = rules
        .iter()
        .map(|rule| HttpIngressPath {
            path_type: rule.kind.into(),
            path: rule.path.clone(),
            backend: IngressBackend {
                service: IngressServiceBackend {
                    name: backend.name.clone(),
                    port: ServiceBackendPort {
                        number: backend.port,
                    },
                },
            },
        })
        .collect();

    let mut ingress = Ingress::new(name, namespace);
    ingress.spec.ingress_class_name = non_empty(ingress_class);
    ingress.spec.rules.push(IngressRule {
        host: non_empty(host),
        http: HttpIngressRuleValue { paths },
    });

    Ok(ingress)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
