// crates/opensyde-halc/src/builder/mod.rs

//! Provides functionality to serialize `Definition` and `Configuration` values
//! back into HALC XML strings.
//!
//! This module converts the public `types` back to the internal `model`
//! structs required by `quick-xml` for serialization.

mod config;
mod content;
mod description;
mod structs;

pub(crate) use config::build_node_io_config;
pub(crate) use description::build_description;

use crate::error::HalcError;
use crate::model::config::IoBaseFileNode;
use crate::types::{Configuration, Definition, DefinitionSource};
use serde::Serialize;
use std::fmt::Write;

/// Serializes a `Definition` into a complete `opensyde-HALC-description` document.
pub fn save_definition_to_string(definition: &Definition) -> Result<String, HalcError> {
    serialize_document(&build_description(definition))
}

/// Serializes a `Configuration` with its definition embedded inline.
///
/// The original definition file name and content are stored along with the
/// definition itself. A configuration whose definition was loaded from an
/// external file stores the serialized definition as original content.
pub fn save_configuration_to_string(configuration: &Configuration) -> Result<String, HalcError> {
    let io_base_file = build_inline_base_file(configuration)?;
    serialize_document(&build_node_io_config(configuration, io_base_file))
}

fn build_inline_base_file(configuration: &Configuration) -> Result<IoBaseFileNode, HalcError> {
    let source = configuration.definition_source();
    let content = match source {
        DefinitionSource::Embedded {
            original_content, ..
        } if !original_content.is_empty() => hex::encode(original_content),
        _ => hex::encode(save_definition_to_string(configuration.definition())?),
    };
    Ok(IoBaseFileNode {
        original_file_name: Some(source.file_name().to_string()),
        original_file_content: Some(content),
        relative_path: None,
        description: Some(Box::new(build_description(configuration.definition()))),
    })
}

/// Writes the XML declaration followed by the indented document.
pub(crate) fn serialize_document<T: Serialize>(document: &T) -> Result<String, HalcError> {
    let mut buffer = String::new();
    writeln!(&mut buffer, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);

    document.serialize(serializer)?;
    Ok(buffer)
}
