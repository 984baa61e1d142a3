//! Ingress generator
//!
//! Produces either one Ingress covering the whole API or one Ingress per
//! path. Split output is sorted by resource name so repeated runs over the
//! same input are byte-identical.

use crate::builder::build_resource;
use crate::classifier::should_split;
use crate::matcher::{build_match, MatchMode, MatchRule};
use crate::naming::resource_name;
use crate::output::{assemble, encode_single, ResourceEncoder, YamlEncoder};
use crate::registry::{FlagKind, FlagSpec, Generator};
use openapi_ingress_common::{ApiDefinition, GeneratorError, Ingress, Options, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Resources planned for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngressPlan {
    /// A single Ingress routing every path
    Consolidated(Ingress),
    /// One Ingress per enabled path, sorted by name
    Split(Vec<Ingress>),
}

impl IngressPlan {
    pub fn resources(&self) -> &[Ingress] {
        match self {
            IngressPlan::Consolidated(ingress) => std::slice::from_ref(ingress),
            IngressPlan::Split(resources) => resources,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, IngressPlan::Split(_))
    }
}

/// Generator for `networking.k8s.io/v1` Ingress resources
pub struct IngressGenerator {
    encoder: Box<dyn ResourceEncoder>,
}

impl Default for IngressGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IngressGenerator {
    /// Create a generator writing YAML
    pub fn new() -> Self {
        Self::with_encoder(Box::new(YamlEncoder))
    }

    /// Create a generator with a custom resource encoder
    pub fn with_encoder(encoder: Box<dyn ResourceEncoder>) -> Self {
        Self { encoder }
    }

    /// Validate the options and decide which resources to emit
    ///
    /// Paths disabled by the document itself are treated like paths disabled
    /// in `options`, unless `options` has its own entry for the path.
    pub fn plan(&self, options: &Options, api: &ApiDefinition) -> Result<IngressPlan> {
        options.validate().map_err(|e| match e {
            GeneratorError::Validation(msg) => {
                GeneratorError::Validation(format!("failed to validate options: {}", msg))
            }
            other => other,
        })?;

        let options = &with_document_overrides(options, api);

        if should_split(options, &api.paths) {
            debug!(paths = api.paths.len(), "generating one ingress per path");
            Ok(IngressPlan::Split(split_resources(options, api)?))
        } else {
            debug!(paths = api.paths.len(), "generating a single ingress");
            let ingress = consolidated_resource(options, api)?;
            Ok(IngressPlan::Consolidated(ingress))
        }
    }

    /// Serialize a plan; a consolidated plan has no document separator
    pub fn render(&self, plan: &IngressPlan) -> Result<String> {
        match plan {
            IngressPlan::Consolidated(ingress) => encode_single(ingress, self.encoder.as_ref()),
            IngressPlan::Split(resources) => assemble(resources, self.encoder.as_ref()),
        }
    }
}

impl Generator for IngressGenerator {
    fn name(&self) -> &'static str {
        "ingress"
    }

    fn description(&self) -> &'static str {
        "generates a generic ingress definition for your service"
    }

    fn flags(&self) -> Vec<FlagSpec> {
        vec![
            FlagSpec {
                name: "path.base",
                kind: FlagKind::String,
                default: "/",
                help: "a base path for Service endpoints",
            },
            FlagSpec {
                name: "path.split",
                kind: FlagKind::Bool,
                default: "false",
                help: "generate a separate Ingress for each path",
            },
            FlagSpec {
                name: "ingress.class",
                kind: FlagKind::String,
                default: "",
                help: "Ingress class name; if omitted, the cluster default class applies",
            },
        ]
    }

    fn generate(&self, options: &Options, api: &ApiDefinition) -> Result<String> {
        let plan = self.plan(options, api)?;
        self.render(&plan)
    }
}

fn with_document_overrides(options: &Options, api: &ApiDefinition) -> Options {
    let mut options = options.clone();
    options.merge_path_overrides(
        api.paths
            .iter()
            .filter_map(|p| p.disabled.map(|disabled| (p.template.as_str(), disabled))),
    );
    options
}

fn consolidated_resource(options: &Options, api: &ApiDefinition) -> Result<Ingress> {
    let mut rules: Vec<MatchRule> = Vec::with_capacity(api.paths.len());
    for template in api.templates() {
        let rule = build_match(&options.path.base, template, MatchMode::Consolidated);
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }
    if rules.is_empty() {
        rules.push(MatchRule::base(&options.path.base));
    }

    let name = format!("{}-ingress", options.service.name);
    debug!(name = %name, rules = rules.len(), "built ingress");

    build_resource(
        &name,
        &options.namespace,
        &rules,
        &options.service,
        &options.host,
        &options.ingress.class,
    )
}

fn split_resources(options: &Options, api: &ApiDefinition) -> Result<Vec<Ingress>> {
    let mut resources = Vec::with_capacity(api.paths.len());

    for template in api.templates() {
        if options.is_path_disabled(template) {
            debug!(path = template, "skipping disabled path");
            continue;
        }

        let name = resource_name(&options.service.name, template);
        let rule = build_match(&options.path.base, template, MatchMode::Split);
        debug!(name = %name, path = %rule.path, "built ingress");

        resources.push(build_resource(
            &name,
            &options.namespace,
            std::slice::from_ref(&rule),
            &options.service,
            &options.host,
            &options.ingress.class,
        )?);
    }

    if resources.is_empty() {
        warn!("every path is disabled, no ingress resources generated");
    }

    resources.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    make_names_unique(&mut resources);
    resources.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));

    Ok(resources)
}

fn sort_key(ingress: &Ingress) -> (&str, Option<&str>) {
    (
        ingress.name(),
        ingress.http_paths().next().map(|p| p.path.as_str()),
    )
}

/// Suffix names shared by several paths, e.g. `/pets` and `/pets/`
///
/// A suffixed name never takes the name another path derives on its own.
fn make_names_unique(resources: &mut [Ingress]) {
    let natural: HashSet<String> = resources
        .iter()
        .map(|ingress| ingress.metadata.name.clone())
        .collect();
    let mut used: HashSet<String> = HashSet::with_capacity(resources.len());

    for ingress in resources.iter_mut() {
        let base = ingress.metadata.name.clone();
        let mut candidate = base.clone();
        let mut n = 2;
        while used.contains(&candidate) || (candidate != base && natural.contains(&candidate))
        {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        if candidate != base {
            warn!(name = %base, renamed = %candidate, "duplicate ingress name");
            ingress.metadata.name = candidate.clone();
        }
        used.insert(candidate);
    }
}
