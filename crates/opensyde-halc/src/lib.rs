// crates/opensyde-halc/src/lib.rs

#![doc = "Loads, validates and saves openSYDE HALC (Hardware Abstraction Layer Configuration) files."]
#![doc = ""]
#![doc = "A HALC *definition* (`opensyde-HALC-description`) describes the I/O domains,"]
#![doc = "channels, use-cases and parameters a device model offers. A HALC"]
#![doc = "*configuration* (`opensyde-node-io-config`) holds the values selected for one"]
#![doc = "device and embeds or references its definition."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_definition_from_str` / `save_definition_to_string` and their file variants."]
#![doc = "- `load_configuration_from_str` / `save_configuration_to_string` and their file variants."]
#![doc = "- `parse_availability` / `format_availability` for the channel availability expressions."]

// --- Crate Modules ---

mod availability;
mod builder;
pub mod constants;
mod error;
mod filer;
mod model;
mod parser;
mod resolver;
mod types;
mod xml_path;

// --- Public API Re-exports ---

pub use availability::{AvailabilityError, format_availability, parse_availability};
pub use builder::{save_configuration_to_string, save_definition_to_string};
pub use error::{ErrorKind, HalcError};
pub use filer::{
    load_configuration_from_file, load_configuration_from_file_with, load_definition_from_file,
    load_definition_from_file_with, save_configuration_to_file, save_definition_to_file,
};
pub use parser::{
    load_configuration_from_str, load_configuration_from_str_with, load_definition_from_str,
    load_definition_from_str_with,
};
pub use types::{
    Availability, BitMaskItem, ChannelDef, ChannelUseCase, ConfigChannel, ConfigDomain,
    ConfigParameter, ConfigParameterStruct, Configuration, ContentKind, ContentValue, Definition,
    DefinitionSource, Domain, DomainCategory, Element, ElementValue, EnumItem, NvmConfig,
    ParameterStruct, ReservedListSizes, SafetyMode, Scalar, ScalarType, StructGroup, TypedContent,
    ValueRange, ValueSet,
};

use constants::DEFAULT_NAME_MAX_CHAR_LIMIT;

/// Options applied while loading a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Global identifier length limit; `singular-name` may use this many
    /// characters minus the ones reserved for generated suffixes.
    pub name_max_char_limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            name_max_char_limit: DEFAULT_NAME_MAX_CHAR_LIMIT,
        }
    }
}
