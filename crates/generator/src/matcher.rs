//! Path matching rules derived from OpenAPI path templates

use openapi_ingress_common::PathType;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Capture group substituted for every `{variable}` segment
///
/// Only alphanumeric values are matched; parameters allowing other
/// characters are not routed.
pub const VARIABLE_PATTERN: &str = "([A-z0-9]+)";

static PATH_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}/]+\}").expect("Invalid path variable regex"));

static REPEATED_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/{2,}").expect("Invalid separator regex"));

/// How a rule's path is compared with request paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The request path must equal the rule path
    Exact,
    /// The rule path is a prefix, possibly containing capture patterns
    Prefix,
}

/// Which generation mode a rule is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// One resource covering every path
    Consolidated,
    /// One resource per path
    Split,
}

/// A single path rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    pub path: String,
    pub kind: MatchKind,
}

impl From<MatchKind> for PathType {
    fn from(kind: MatchKind) -> Self {
        match kind {
            MatchKind::Exact => PathType::Exact,
            MatchKind::Prefix => PathType::Prefix,
        }
    }
}

impl MatchMode {
    /// Kind used for literal (variable free) templates
    fn literal_kind(self) -> MatchKind {
        match self {
            MatchMode::Consolidated => MatchKind::Prefix,
            MatchMode::Split => MatchKind::Exact,
        }
    }
}

impl MatchRule {
    /// Prefix rule matching everything under `base`
    pub fn base(base: &str) -> Self {
        Self {
            path: collapse_separators(base),
            kind: MatchKind::Prefix,
        }
    }
}

/// Build the rule matching `template` mounted under `base`
///
/// Templates with variables become prefix patterns in either mode. The root
/// template anchors to the base path with `$`.
pub fn build_match(base: &str, template: &str, mode: MatchMode) -> MatchRule {
    let (path, kind) = if PATH_VARIABLE.is_match(template) {
        let pattern = PATH_VARIABLE.replace_all(template, NoExpand(VARIABLE_PATTERN));
        (join(base, &pattern), MatchKind::Prefix)
    } else if template.is_empty() || template == "/" {
        (format!("{}$", anchor(base)), mode.literal_kind())
    } else {
        (join(base, template), mode.literal_kind())
    };

    MatchRule {
        path: collapse_separators(&path),
        kind,
    }
}

/// Base without trailing separators; the root base stays `/`
fn anchor(base: &str) -> &str {
    match base.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn join(base: &str, tail: &str) -> String {
    format!("{}/{}", base, tail)
}

/// Replace every run of `/` with a single `/`
pub fn collapse_separators(path: &str) -> String {
    REPEATED_SEPARATOR.replace_all(path, "/").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_path() {
        let rule = build_match("/", "/pets", MatchMode::Consolidated);
        assert_eq!(rule.path, "/pets");
        assert_eq!(rule.kind, MatchKind::Prefix);

        let rule = build_match("/api", "/pets", MatchMode::Split);
        assert_eq!(rule.path, "/api/pets");
        assert_eq!(rule.kind, MatchKind::Exact);
    }

    #[test]
    fn test_variable_path_is_pattern() {
        let rule = build_match("/api", "/pets/{id}", MatchMode::Split);
        assert_eq!(rule.path, "/api/pets/([A-z0-9]+)");
        assert_eq!(rule.kind, MatchKind::Prefix);

        let rule = build_match("/", "/owners/{owner}/pets/{pet}", MatchMode::Consolidated);
        assert_eq!(rule.path, "/owners/([A-z0-9]+)/pets/([A-z0-9]+)");
    }

    #[test]
    fn test_root_template_anchors_base() {
        let rule = build_match("/", "/", MatchMode::Split);
        assert_eq!(rule.path, "/$");
        assert_eq!(rule.kind, MatchKind::Exact);

        let rule = build_match("/api", "/", MatchMode::Consolidated);
        assert_eq!(rule.path, "/api$");
        assert_eq!(rule.kind, MatchKind::Prefix);
    }

    #[test]
    fn test_root_template_ignores_trailing_base_separator() {
        assert_eq!(build_match("/api/", "/", MatchMode::Split).path, "/api$");
        assert_eq!(build_match("/api//", "", MatchMode::Split).path, "/api$");
        assert_eq!(build_match("//", "/", MatchMode::Split).path, "/$");
    }

    #[test]
    fn test_variable_only_template_anchors_under_base() {
        assert_eq!(
            build_match("/api", "/{id}", MatchMode::Split).path,
            "/api/([A-z0-9]+)"
        );
        assert_eq!(
            build_match("/api", "{id}", MatchMode::Split).path,
            "/api/([A-z0-9]+)"
        );
        assert_eq!(
            build_match("/", "/{id}", MatchMode::Split).path,
            "/([A-z0-9]+)"
        );
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(
            build_match("/api/", "/pets", MatchMode::Split).path,
            "/api/pets"
        );
        assert_eq!(
            build_match("//api//", "//pets//", MatchMode::Split).path,
            "/api/pets/"
        );
        assert_eq!(collapse_separators("///"), "/");
    }

    #[test]
    fn test_base_rule() {
        let rule = MatchRule::base("/api//v1");
        assert_eq!(rule.path, "/api/v1");
        assert_eq!(rule.kind, MatchKind::Prefix);
    }

    #[test]
    fn test_match_kind_to_path_type() {
        assert_eq!(PathType::from(MatchKind::Exact), PathType::Exact);
        assert_eq!(PathType::from(MatchKind::Prefix), PathType::Prefix);
    }
}
