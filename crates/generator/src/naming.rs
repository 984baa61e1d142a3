//! Resource name derivation from path templates

/// Fragment used for the root path and for templates with no usable text
pub const ROOT_NAME: &str = "root";

/// Derive a resource name fragment from a path template
///
/// Segments are lowercased and joined with `-`; variable braces are dropped.
/// Any character that is not ASCII alphanumeric acts as a separator, so the
/// result is always a valid Kubernetes name token.
///
/// ```
/// use openapi_ingress_generator::derive_name;
///
/// assert_eq!(derive_name("/pets/{petId}"), "pets-petid");
/// assert_eq!(derive_name("/"), "root");
/// ```
pub fn derive_name(template: &str) -> String {
    let name = template
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");

    if name.is_empty() {
        ROOT_NAME.to_string()
    } else {
        name
    }
}

/// Full resource name for one path of a service
pub fn resource_name(service: &str, template: &str) -> String {
    format!("{}-{}", service, derive_name(template))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_paths() {
        assert_eq!(derive_name(""), "root");
        assert_eq!(derive_name("/"), "root");
        assert_eq!(derive_name("//"), "root");
        assert_eq!(derive_name("/{}"), "root");
    }

    #[test]
    fn test_segments_are_joined() {
        assert_eq!(derive_name("/pets"), "pets");
        assert_eq!(derive_name("/pets/{id}"), "pets-id");
        assert_eq!(derive_name("/Pets/{petId}/Photos"), "pets-petid-photos");
        assert_eq!(derive_name("//pets///owners/"), "pets-owners");
    }

    #[test]
    fn test_punctuation_becomes_separator() {
        assert_eq!(derive_name("/v1.2/pet_store"), "v1-2-pet-store");
        assert_eq!(derive_name("/-weird-/"), "weird");
        assert_eq!(derive_name("/pets/{id}.json"), "pets-id-json");
    }

    #[test]
    fn test_resource_name() {
        assert_eq!(resource_name("petstore", "/pets"), "petstore-pets");
        assert_eq!(resource_name("petstore", "/"), "petstore-root");
    }
}
