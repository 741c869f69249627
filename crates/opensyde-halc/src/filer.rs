// crates/opensyde-halc/src/filer.rs

//! File system entry points.
//!
//! Saving creates missing parent directories and deletes an existing file
//! before writing the new one. A failed write therefore leaves no file behind.

use crate::LoadOptions;
use crate::builder::{self, build_node_io_config, serialize_document};
use crate::error::HalcError;
use crate::model::config::IoBaseFileNode;
use crate::parser;
use crate::types::{Configuration, Definition, DefinitionSource};
use std::fs;
use std::path::Path;

/// Loads a HALC definition file.
pub fn load_definition_from_file(path: impl AsRef<Path>) -> Result<Definition, HalcError> {
    load_definition_from_file_with(path, &LoadOptions::default())
}

/// Loads a HALC definition file with explicit load options.
pub fn load_definition_from_file_with(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Definition, HalcError> {
    let path = path.as_ref();
    log::info!("Loading HALC definition from \"{}\"", path.display());
    let content = read_file(path)?;
    parser::load_definition_from_str_with(&content, options)
}

/// Writes a HALC definition file.
pub fn save_definition_to_file(definition: &Definition, path: impl AsRef<Path>) -> Result<(), HalcError> {
    let path = path.as_ref();
    log::info!("Saving HALC definition to \"{}\"", path.display());
    let content = builder::save_definition_to_string(definition)?;
    write_file(path, content.as_bytes())
}

/// Loads a HALC configuration file.
///
/// See `load_configuration_from_str` for the meaning of `base_path`.
pub fn load_configuration_from_file(
    path: impl AsRef<Path>,
    base_path: Option<&Path>,
) -> Result<Configuration, HalcError> {
    load_configuration_from_file_with(path, base_path, &LoadOptions::default())
}

/// Loads a HALC configuration file with explicit load options for its definition.
pub fn load_configuration_from_file_with(
    path: impl AsRef<Path>,
    base_path: Option<&Path>,
    options: &LoadOptions,
) -> Result<Configuration, HalcError> {
    let path = path.as_ref();
    log::info!("Loading HALC configuration from \"{}\"", path.display());
    let content = read_file(path)?;
    parser::load_configuration_from_str_with(&content, base_path, options)
}

/// Writes a HALC configuration file.
///
/// Without `base_path` the definition is embedded. With `base_path` the
/// definition is written to `base_path` under the file name of its source
/// and only referenced from the configuration.
pub fn save_configuration_to_file(
    configuration: &Configuration,
    path: impl AsRef<Path>,
    base_path: Option<&Path>,
) -> Result<(), HalcError> {
    let path = path.as_ref();
    log::info!("Saving HALC configuration to \"{}\"", path.display());
    let Some(base_path) = base_path else {
        let content = builder::save_configuration_to_string(configuration)?;
        return write_file(path, content.as_bytes());
    };

    let source = configuration.definition_source();
    let file_name = source.file_name();
    if file_name.is_empty() {
        return Err(HalcError::validation(
            "io-base-file",
            "no file name for the definition",
        ));
    }
    let definition_content = match source {
        DefinitionSource::Embedded {
            original_content, ..
        } if !original_content.is_empty() => original_content.clone(),
        _ => builder::save_definition_to_string(configuration.definition())?.into_bytes(),
    };
    let definition_path = base_path.join(file_name);
    log::info!("Saving HALC definition to \"{}\"", definition_path.display());
    write_file(&definition_path, &definition_content)?;

    let io_base_file = IoBaseFileNode {
        relative_path: Some(file_name.to_string()),
        ..Default::default()
    };
    let content = serialize_document(&build_node_io_config(configuration, io_base_file))?;
    write_file(path, content.as_bytes())
}

fn read_file(path: &Path) -> Result<String, HalcError> {
    fs::read_to_string(path).map_err(|e| HalcError::io(path, e))
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), HalcError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| HalcError::io(parent, e))?;
    }
    if path.exists() {
        fs::remove_file(path).map_err(|e| HalcError::io(path, e))?;
    }
    fs::write(path, content).map_err(|e| HalcError::io(path, e))
}
