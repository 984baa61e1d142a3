//! Generation mode selection

use openapi_ingress_common::{ApiPath, Options};

/// Whether one resource per path is required
///
/// A single resource routes every path under the base, so it cannot leave a
/// disabled path out. Any disabled path therefore forces split mode.
pub fn should_split(options: &Options, paths: &[ApiPath]) -> bool {
    if options.path.split {
        return true;
    }

    paths
        .iter()
        .any(|path| options.is_path_disabled(&path.template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_ingress_common::ApiDefinition;

    fn api() -> ApiDefinition {
        ApiDefinition::from_templates(["/", "/pets", "/pets/{id}"])
    }

    #[test]
    fn test_split_flag_forces_split() {
        let mut options = Options::default();
        options.path.split = true;
        assert!(should_split(&options, &api().paths));
        assert!(should_split(&options, &[]));
    }

    #[test]
    fn test_disabled_path_forces_split() {
        let mut options = Options::default();
        options.disable_path("/pets/{id}");
        assert!(should_split(&options, &api().paths));
    }

    #[test]
    fn test_override_for_unknown_path_is_ignored() {
        let mut options = Options::default();
        options.disable_path("/not-in-spec");
        assert!(!should_split(&options, &api().paths));
    }

    #[test]
    fn test_explicitly_enabled_path_does_not_split() {
        let mut options = Options::default();
        options.merge_path_overrides([("/pets", false)]);
        assert!(!should_split(&options, &api().paths));
    }

    #[test]
    fn test_defaults_do_not_split() {
        assert!(!should_split(&Options::default(), &api().paths));
    }
}
