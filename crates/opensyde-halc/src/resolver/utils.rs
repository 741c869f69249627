// crates/opensyde-halc/src/resolver/utils.rs

//! Utility functions for the resolver.

use crate::availability::parse_availability;
use crate::constants::HALC_FILE_VERSION;
use crate::error::HalcError;
use crate::types::Availability;
use crate::xml_path::XmlPath;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Returns the value of a required attribute.
pub(super) fn required<'a>(
    value: Option<&'a String>,
    attribute: &'static str,
    path: &XmlPath,
) -> Result<&'a str, HalcError> {
    value
        .map(String::as_str)
        .ok_or_else(|| HalcError::MissingAttribute {
            attribute,
            context: path.to_string(),
        })
}

/// Returns a required child element.
pub(super) fn required_element<'a, T>(
    node: Option<&'a T>,
    element: &'static str,
    path: &XmlPath,
) -> Result<&'a T, HalcError> {
    node.ok_or_else(|| HalcError::MissingElement {
        element,
        context: path.to_string(),
    })
}

/// Returns the text of a required child element.
pub(super) fn required_text<'a>(
    value: Option<&'a String>,
    element: &'static str,
    path: &XmlPath,
) -> Result<&'a str, HalcError> {
    value
        .map(String::as_str)
        .ok_or_else(|| HalcError::MissingElement {
            element,
            context: path.to_string(),
        })
}

/// Parses a numeric attribute or text node.
pub(super) fn parse_number<T: FromStr>(
    text: &str,
    attribute: &'static str,
    path: &XmlPath,
) -> Result<T, HalcError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| invalid_format(attribute, text, path))
}

/// Parses a required numeric attribute.
pub(super) fn parse_required_number<T: FromStr>(
    value: Option<&String>,
    attribute: &'static str,
    path: &XmlPath,
) -> Result<T, HalcError> {
    parse_number(required(value, attribute, path)?, attribute, path)
}

/// Parses a `true`/`false` attribute.
pub(super) fn parse_bool(text: &str, attribute: &'static str, path: &XmlPath) -> Result<bool, HalcError> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid_format(attribute, text, path)),
    }
}

pub(super) fn invalid_format(attribute: &'static str, value: &str, path: &XmlPath) -> HalcError {
    HalcError::InvalidAttributeFormat {
        attribute,
        value: value.to_string(),
        context: path.to_string(),
    }
}

/// Checks the `file-version` text node.
pub(super) fn check_file_version(value: Option<&String>, path: &XmlPath) -> Result<(), HalcError> {
    let text = required_text(value, "file-version", path)?;
    let found: u32 = parse_number(text, "file-version", path)?;
    if found != HALC_FILE_VERSION {
        return Err(HalcError::VersionMismatch {
            found,
            expected: HALC_FILE_VERSION,
        });
    }
    Ok(())
}

/// Compares a declared list length against the number of children actually read.
pub(super) fn check_length(
    declared: Option<&String>,
    actual: usize,
    path: &XmlPath,
) -> Result<(), HalcError> {
    let expected: usize = parse_required_number(declared, "length", path)?;
    if expected != actual {
        return Err(HalcError::validation(
            path,
            format!(
                "declared length {} does not match the {} entries found",
                expected, actual
            ),
        ));
    }
    Ok(())
}

/// Parses an availability attribute for `channel_count` channels.
pub(super) fn parse_availability_attribute(
    text: &str,
    channel_count: u32,
    attribute: &'static str,
    path: &XmlPath,
) -> Result<Vec<Availability>, HalcError> {
    parse_availability(text, channel_count).map_err(|source| HalcError::InvalidAvailability {
        attribute,
        context: path.to_string(),
        source,
    })
}

/// Rejects repeated channel indices within one availability attribute.
pub(super) fn check_unique_indices(
    entries: &[Availability],
    attribute: &'static str,
    path: &XmlPath,
) -> Result<(), HalcError> {
    let mut seen = BTreeSet::new();
    for entry in entries {
        if !seen.insert(entry.value_index) {
            return Err(HalcError::validation(
                path,
                format!("channel {} appears more than once in \"{}\"", entry.value_index, attribute),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn path() -> XmlPath {
        XmlPath::root("test")
    }

    #[test]
    fn test_required_attribute() {
        let value = Some("x".to_string());
        assert_eq!(required(value.as_ref(), "name", &path()).unwrap(), "x");
        let err = required(None, "name", &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("true", "active", &path()).unwrap());
        assert!(!parse_bool("0", "active", &path()).unwrap());
        assert!(parse_bool("yes", "active", &path()).is_err());
    }

    #[test]
    fn test_file_version_gate() {
        assert!(check_file_version(Some(&"1".to_string()), &path()).is_ok());
        let err = check_file_version(Some(&"2".to_string()), &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionMismatch);
        let err = check_file_version(None, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_length_mismatch_is_invalid() {
        let err = check_length(Some(&"3".to_string()), 2, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert!(check_length(Some(&"2".to_string()), 2, &path()).is_ok());
    }
}
