// crates/opensyde-halc/src/types/configuration.rs

//! The per-project, mutable channel configuration (`opensyde-node-io-config`).

use super::content::TypedContent;
use super::definition::{Definition, Domain, ParameterStruct};
use crate::error::HalcError;
use std::sync::Arc;

/// Where the definition of a configuration is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    /// Embedded in the configuration file, together with the original definition file.
    Embedded {
        original_file_name: String,
        original_content: Vec<u8>,
    },
    /// A separate file, relative to a caller-supplied base path.
    External { relative_path: String },
}

impl DefinitionSource {
    /// File name used when the definition is written next to the configuration.
    pub fn file_name(&self) -> &str {
        match self {
            DefinitionSource::Embedded {
                original_file_name, ..
            } => original_file_name,
            DefinitionSource::External { relative_path } => relative_path,
        }
    }
}

/// A HALC configuration: the selected use-cases and parameter values of every channel.
///
/// The definition is shared read-only; the list of domains always mirrors the
/// definition's domain list and can only be modified per existing index.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    definition: Arc<Definition>,
    definition_source: DefinitionSource,
    content_version: u32,
    domains: Vec<ConfigDomain>,
}

impl Configuration {
    /// Creates the initial configuration of `definition`: every channel uses its
    /// default use-case and the definition's default parameter values.
    pub fn new(definition: Arc<Definition>, definition_source: DefinitionSource) -> Self {
        let domains = definition
            .domains
            .iter()
            .map(ConfigDomain::from_definition)
            .collect();
        Self {
            content_version: definition.content_version,
            definition,
            definition_source,
            domains,
        }
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// The shared handle to the definition.
    pub fn shared_definition(&self) -> Arc<Definition> {
        Arc::clone(&self.definition)
    }

    pub fn definition_source(&self) -> &DefinitionSource {
        &self.definition_source
    }

    pub fn set_definition_source(&mut self, source: DefinitionSource) {
        self.definition_source = source;
    }

    /// Content version of the definition this configuration was created for.
    pub fn content_version(&self) -> u32 {
        self.content_version
    }

    pub fn domains(&self) -> &[ConfigDomain] {
        &self.domains
    }

    pub fn domain(&self, index: usize) -> Option<&ConfigDomain> {
        self.domains.get(index)
    }

    /// Replaces the configuration of an existing domain.
    pub fn set_domain_config(&mut self, index: usize, domain: ConfigDomain) -> Result<(), HalcError> {
        let count = self.domains.len();
        let slot = self.domains.get_mut(index).ok_or_else(|| {
            HalcError::validation(
                "configuration",
                format!("domain index {} out of range ({} domains defined)", index, count),
            )
        })?;
        *slot = domain;
        Ok(())
    }
}

/// Configuration of one domain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigDomain {
    /// Domain-level settings (`<config>`).
    pub domain_config: ConfigChannel,
    /// One entry per channel of the domain.
    pub channel_configs: Vec<ConfigChannel>,
}

impl ConfigDomain {
    /// Default configuration derived from a definition domain.
    pub fn from_definition(domain: &Domain) -> Self {
        let domain_config = ConfigChannel {
            safety_relevant: false,
            use_case_index: 0,
            name: domain.name.clone(),
            comment: String::new(),
            parameters: default_parameters(&domain.domain_values.parameters),
        };
        let channel_configs = domain
            .channels
            .iter()
            .enumerate()
            .map(|(index, channel)| ConfigChannel {
                safety_relevant: false,
                use_case_index: domain.default_use_case_index(index as u32).unwrap_or(0),
                name: channel.name.clone(),
                comment: String::new(),
                parameters: default_parameters(&domain.channel_values.parameters),
            })
            .collect();
        Self {
            domain_config,
            channel_configs,
        }
    }
}

fn default_parameters(structs: &[ParameterStruct]) -> Vec<ConfigParameterStruct> {
    structs
        .iter()
        .map(|s| match s {
            ParameterStruct::Single(element) => ConfigParameterStruct::Single(ConfigParameter {
                value: element.value.content.clone(),
                comment: element.comment.clone(),
            }),
            ParameterStruct::Group(group) => ConfigParameterStruct::Group(
                group
                    .elements
                    .iter()
                    .map(|element| ConfigParameter {
                        value: element.value.content.clone(),
                        comment: element.comment.clone(),
                    })
                    .collect(),
            ),
        })
        .collect()
}

/// Settings of one channel (or of the domain itself).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigChannel {
    pub safety_relevant: bool,
    /// Index into the domain's use-case list.
    pub use_case_index: u32,
    pub name: String,
    pub comment: String,
    pub parameters: Vec<ConfigParameterStruct>,
}

/// A configured `<parameter-struct>`; same either/or shape as `ParameterStruct`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigParameterStruct {
    Single(ConfigParameter),
    Group(Vec<ConfigParameter>),
}

/// A configured value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigParameter {
    pub value: TypedContent,
    pub comment: String,
}
