// crates/opensyde-halc/src/parser.rs

use crate::LoadOptions;
use crate::constants::{CONFIGURATION_ROOT_NODE, DEFINITION_ROOT_NODE};
use crate::error::HalcError;
use crate::filer;
use crate::model::{HalcDescription, NodeIoConfig};
use crate::resolver;
use crate::types::{Configuration, Definition, DefinitionSource};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;
use std::sync::Arc;

/// Parses a HALC definition (`opensyde-HALC-description`) from a string slice.
///
/// # Errors
/// Returns a `HalcError` if the root node is wrong, the XML cannot be parsed,
/// the `file-version` is unsupported or any content check fails.
pub fn load_definition_from_str(xml_content: &str) -> Result<Definition, HalcError> {
    load_definition_from_str_with(xml_content, &LoadOptions::default())
}

/// Like `load_definition_from_str`, with explicit load options.
pub fn load_definition_from_str_with(
    xml_content: &str,
    options: &LoadOptions,
) -> Result<Definition, HalcError> {
    check_root(xml_content, DEFINITION_ROOT_NODE)?;
    let model: HalcDescription = quick_xml::de::from_str(xml_content)?;
    resolver::resolve_definition(&model, options)
}

/// Parses a HALC configuration (`opensyde-node-io-config`) from a string slice.
///
/// Without `base_path` the definition is read from the inline copy inside the
/// document. With `base_path` it is loaded from the file named by
/// `<io-base-file>/<relative-path>`, relative to `base_path`.
///
/// # Errors
/// Returns a `HalcError` on any problem with either document. A configuration
/// written for another definition content version yields
/// `HalcError::ChecksumMismatch`.
pub fn load_configuration_from_str(
    xml_content: &str,
    base_path: Option<&Path>,
) -> Result<Configuration, HalcError> {
    load_configuration_from_str_with(xml_content, base_path, &LoadOptions::default())
}

/// Like `load_configuration_from_str`, with explicit load options for the definition.
pub fn load_configuration_from_str_with(
    xml_content: &str,
    base_path: Option<&Path>,
    options: &LoadOptions,
) -> Result<Configuration, HalcError> {
    check_root(xml_content, CONFIGURATION_ROOT_NODE)?;
    let model: NodeIoConfig = quick_xml::de::from_str(xml_content)?;

    let io_base_file = model.io_base_file.as_ref().ok_or(HalcError::MissingElement {
        element: "io-base-file",
        context: CONFIGURATION_ROOT_NODE.to_string(),
    })?;
    let context = || format!("{}/io-base-file", CONFIGURATION_ROOT_NODE);

    let (definition, source) = match base_path {
        None => {
            let description = io_base_file.description.as_deref().ok_or_else(|| {
                HalcError::MissingElement {
                    element: DEFINITION_ROOT_NODE,
                    context: context(),
                }
            })?;
            let original_file_name = io_base_file.original_file_name.clone().ok_or_else(|| {
                HalcError::MissingAttribute {
                    attribute: "original_file_name",
                    context: context(),
                }
            })?;
            let content = io_base_file.original_file_content.as_deref().ok_or_else(|| {
                HalcError::MissingAttribute {
                    attribute: "original_file_content",
                    context: context(),
                }
            })?;
            log::debug!("Using the inline definition \"{}\"", original_file_name);
            let definition = resolver::resolve_definition(description, options)?;
            let source = DefinitionSource::Embedded {
                original_file_name,
                original_content: hex::decode(content.trim())?,
            };
            (definition, source)
        }
        Some(base_path) => {
            let relative_path = io_base_file.relative_path.clone().ok_or_else(|| {
                HalcError::MissingElement {
                    element: "relative-path",
                    context: context(),
                }
            })?;
            let definition =
                filer::load_definition_from_file_with(base_path.join(&relative_path), options)?;
            (definition, DefinitionSource::External { relative_path })
        }
    };

    let mut configuration = Configuration::new(Arc::new(definition), source);
    resolver::resolve_configuration(&model, &mut configuration)?;
    Ok(configuration)
}

/// Checks the name of the first element of the document.
fn check_root(xml_content: &str, expected: &'static str) -> Result<(), HalcError> {
    let mut reader = Reader::from_str(xml_content);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if found == expected {
                    return Ok(());
                }
                return Err(HalcError::UnexpectedRoot {
                    expected,
                    found: Some(found),
                });
            }
            Event::Eof => {
                return Err(HalcError::UnexpectedRoot {
                    expected,
                    found: None,
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_check_root() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- halc -->\n<opensyde-node-io-config/>";
        assert!(check_root(xml, CONFIGURATION_ROOT_NODE).is_ok());

        let err = check_root(xml, DEFINITION_ROOT_NODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(
            err,
            HalcError::UnexpectedRoot { found: Some(ref f), .. } if f == "opensyde-node-io-config"
        ));

        let err = check_root("", DEFINITION_ROOT_NODE).unwrap_err();
        assert!(matches!(err, HalcError::UnexpectedRoot { found: None, .. }));
    }
}
