// crates/opensyde-halc/src/resolver/mod.rs

//! Handles the business logic of resolving values from a deserialized HALC model.
//!
//! Every function here takes the raw `model` structs, parses the string
//! attributes, applies defaults and runs the cross-checks before handing out
//! the public `types`.

use crate::LoadOptions;
use crate::constants::DEFINITION_ROOT_NODE;
use crate::error::HalcError;
use crate::model::HalcDescription;
use crate::types::Definition;
use crate::xml_path::XmlPath;

// --- Sub-modules ---

mod config;
mod content;
mod domain;
mod header;
mod structs;
mod utils;
mod validation;

pub(crate) use config::resolve_configuration;

/// Resolves the final `Definition` from the raw deserialized description.
pub(crate) fn resolve_definition(
    model: &HalcDescription,
    options: &LoadOptions,
) -> Result<Definition, HalcError> {
    let path = XmlPath::root(DEFINITION_ROOT_NODE);
    utils::check_file_version(model.file_version.as_ref(), &path)?;

    let header = header::resolve_header(model, &path)?;
    log::debug!(
        "Definition \"{}\", content version {}, {:?}, {} configuration copies",
        header.device_name,
        header.content_version,
        header.safety_mode,
        header.num_config_copies
    );

    let domains = model
        .domain
        .iter()
        .map(|node| domain::resolve_domain(node, options, &path))
        .collect::<Result<Vec<_>, _>>()?;
    validation::check_unique_domain_ids(&domains, &path)?;

    Ok(Definition {
        content_version: header.content_version,
        device_name: header.device_name,
        safety_mode: header.safety_mode,
        num_config_copies: header.num_config_copies,
        nvm: header.nvm,
        domains,
    })
}
