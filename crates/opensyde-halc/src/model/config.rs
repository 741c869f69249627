// crates/opensyde-halc/src/model/config.rs

//! The configuration document (`<opensyde-node-io-config>`).

use super::description::HalcDescription;
use super::structs::StructListNode;
use serde::{Deserialize, Serialize};

/// The root element of a HALC configuration file.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename = "opensyde-node-io-config")]
pub struct NodeIoConfig {
    #[serde(rename = "file-version", default, skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    #[serde(rename = "ref-content-version", default, skip_serializing_if = "Option::is_none")]
    pub ref_content_version: Option<String>,

    #[serde(rename = "io-base-file", default, skip_serializing_if = "Option::is_none")]
    pub io_base_file: Option<IoBaseFileNode>,

    /// Legacy block; written for older tools, never read.
    #[serde(rename = "general", default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralNode>,

    #[serde(rename = "domains", default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<ConfigDomainsNode>,
}

/// Represents `<io-base-file>`: either an embedded definition or a relative path.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct IoBaseFileNode {
    #[serde(rename = "@original_file_name", default, skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,

    /// Hex encoded bytes of the original definition file.
    #[serde(rename = "@original_file_content", default, skip_serializing_if = "Option::is_none")]
    pub original_file_content: Option<String>,

    #[serde(rename = "relative-path", default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,

    #[serde(
        rename = "opensyde-HALC-description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Box<HalcDescription>>,
}

/// Represents `<general>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneralNode {
    #[serde(rename = "@is-safe-datablock-set")]
    pub is_safe_datablock_set: String,
    #[serde(rename = "@safe-datablock-index")]
    pub safe_datablock_index: String,
    #[serde(rename = "@is-unsafe-datablock-set")]
    pub is_unsafe_datablock_set: String,
    #[serde(rename = "@unsafe-datablock-index")]
    pub unsafe_datablock_index: String,
}

impl Default for GeneralNode {
    fn default() -> Self {
        Self {
            is_safe_datablock_set: "false".into(),
            safe_datablock_index: "0".into(),
            is_unsafe_datablock_set: "false".into(),
            unsafe_datablock_index: "0".into(),
        }
    }
}

/// Represents `<domains length="n">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigDomainsNode {
    #[serde(rename = "@length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    #[serde(rename = "domain", default)]
    pub domain: Vec<ConfigDomainNode>,
}

/// Represents one configured `<domain>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigDomainNode {
    #[serde(rename = "config", default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigChannelNode>,

    #[serde(rename = "channels", default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<ConfigChannelsNode>,
}

/// Represents `<channels length="n">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigChannelsNode {
    #[serde(rename = "@length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    #[serde(rename = "channel", default)]
    pub channel: Vec<ConfigChannelNode>,
}

/// Represents `<config>` and `<channel>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigChannelNode {
    #[serde(rename = "@safety-relevant", default, skip_serializing_if = "Option::is_none")]
    pub safety_relevant: Option<String>,

    #[serde(rename = "@use-case-index", default, skip_serializing_if = "Option::is_none")]
    pub use_case_index: Option<String>,

    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(rename = "parameter-structs", default, skip_serializing_if = "Option::is_none")]
    pub parameter_structs: Option<StructListNode>,
}
