// crates/opensyde-halc/src/model/description.rs

//! The definition document (`<opensyde-HALC-description>`).

use super::structs::{StructSectionNode, ValueNode, ValuesSectionNode};
use serde::{Deserialize, Serialize};

/// The root element of a HALC definition file.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename = "opensyde-HALC-description")]
pub struct HalcDescription {
    #[serde(rename = "file-version", default, skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    #[serde(rename = "content-version", default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,

    #[serde(rename = "device-name", default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    #[serde(rename = "safety-mode", default, skip_serializing_if = "Option::is_none")]
    pub safety_mode: Option<String>,

    #[serde(
        rename = "number-of-configuration-copies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_configuration_copies: Option<String>,

    #[serde(rename = "nvm-config", default, skip_serializing_if = "Option::is_none")]
    pub nvm_config: Option<NvmConfigNode>,

    #[serde(rename = "domain", default)]
    pub domain: Vec<DomainNode>,
}

/// Represents `<nvm-config active="...">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct NvmConfigNode {
    #[serde(rename = "@active", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,

    #[serde(
        rename = "datapools-start-address-offset",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub datapools_start_address_offset: Option<DatapoolOffsetsNode>,

    #[serde(
        rename = "lists-reserved-size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lists_reserved_size: Option<ListsReservedSizeNode>,
}

/// Represents `<datapools-start-address-offset>` with one attribute per copy and level.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DatapoolOffsetsNode {
    #[serde(rename = "@address-offset-datapool-1-non-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_1_non_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-1-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_1_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-2-non-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_2_non_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-2-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_2_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-3-non-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_3_non_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-3-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_3_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-4-non-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_4_non_safe: Option<String>,
    #[serde(rename = "@address-offset-datapool-4-safe", default, skip_serializing_if = "Option::is_none")]
    pub datapool_4_safe: Option<String>,
}

impl DatapoolOffsetsNode {
    /// `true` if the node carries no offset attribute at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The offset attribute of configuration copy `copy` (0 based).
    pub fn offset(&self, copy: usize, safe: bool) -> Option<&String> {
        match (copy, safe) {
            (0, false) => self.datapool_1_non_safe.as_ref(),
            (0, true) => self.datapool_1_safe.as_ref(),
            (1, false) => self.datapool_2_non_safe.as_ref(),
            (1, true) => self.datapool_2_safe.as_ref(),
            (2, false) => self.datapool_3_non_safe.as_ref(),
            (2, true) => self.datapool_3_safe.as_ref(),
            (3, false) => self.datapool_4_non_safe.as_ref(),
            (3, true) => self.datapool_4_safe.as_ref(),
            _ => None,
        }
    }

    pub fn set_offset(&mut self, copy: usize, safe: bool, value: String) {
        let slot = match (copy, safe) {
            (0, false) => &mut self.datapool_1_non_safe,
            (0, true) => &mut self.datapool_1_safe,
            (1, false) => &mut self.datapool_2_non_safe,
            (1, true) => &mut self.datapool_2_safe,
            (2, false) => &mut self.datapool_3_non_safe,
            (2, true) => &mut self.datapool_3_safe,
            (3, false) => &mut self.datapool_4_non_safe,
            (3, true) => &mut self.datapool_4_safe,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Attribute name of an offset, for error messages.
    pub fn attribute_name(copy: usize, safe: bool) -> &'static str {
        match (copy, safe) {
            (0, false) => "address-offset-datapool-1-non-safe",
            (0, true) => "address-offset-datapool-1-safe",
            (1, false) => "address-offset-datapool-2-non-safe",
            (1, true) => "address-offset-datapool-2-safe",
            (2, false) => "address-offset-datapool-3-non-safe",
            (2, true) => "address-offset-datapool-3-safe",
            (3, false) => "address-offset-datapool-4-non-safe",
            _ => "address-offset-datapool-4-safe",
        }
    }
}

/// Represents `<lists-reserved-size>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ListsReservedSizeNode {
    #[serde(rename = "@parameters-list-size", default, skip_serializing_if = "Option::is_none")]
    pub parameters_list_size: Option<String>,
    #[serde(rename = "@input-values-list-size", default, skip_serializing_if = "Option::is_none")]
    pub input_values_list_size: Option<String>,
    #[serde(rename = "@output-values-list-size", default, skip_serializing_if = "Option::is_none")]
    pub output_values_list_size: Option<String>,
    #[serde(rename = "@status-values-list-size", default, skip_serializing_if = "Option::is_none")]
    pub status_values_list_size: Option<String>,
}

/// Represents one `<domain id="...">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DomainNode {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "singular-name", default, skip_serializing_if = "Option::is_none")]
    pub singular_name: Option<String>,

    #[serde(rename = "category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "channels", default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelsNode>,

    #[serde(rename = "channel-use-cases", default, skip_serializing_if = "Option::is_none")]
    pub channel_use_cases: Option<UseCasesNode>,

    #[serde(rename = "domain-parameters", default, skip_serializing_if = "Option::is_none")]
    pub domain_parameters: Option<StructSectionNode>,

    #[serde(rename = "domain-values", default, skip_serializing_if = "Option::is_none")]
    pub domain_values: Option<ValuesSectionNode>,

    #[serde(rename = "channel-parameters", default, skip_serializing_if = "Option::is_none")]
    pub channel_parameters: Option<StructSectionNode>,

    #[serde(rename = "channel-values", default, skip_serializing_if = "Option::is_none")]
    pub channel_values: Option<ValuesSectionNode>,
}

/// Represents `<channels count="n">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ChannelsNode {
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,

    #[serde(rename = "channel", default)]
    pub channel: Vec<ChannelNode>,
}

/// Represents `<channel name="..."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ChannelNode {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Represents `<channel-use-cases>`; the type attributes apply to every use-case value.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct UseCasesNode {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(rename = "@is-array", default, skip_serializing_if = "Option::is_none")]
    pub is_array: Option<String>,

    #[serde(rename = "@array-size", default, skip_serializing_if = "Option::is_none")]
    pub array_size: Option<String>,

    #[serde(rename = "@strlen", default, skip_serializing_if = "Option::is_none")]
    pub strlen: Option<String>,

    #[serde(rename = "channel-use-case", default)]
    pub channel_use_case: Vec<UseCaseNode>,
}

/// Represents one `<channel-use-case>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct UseCaseNode {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "@display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "@availability", default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    #[serde(rename = "@is-default-for", default, skip_serializing_if = "Option::is_none")]
    pub is_default_for: Option<String>,

    /// Only the `value` attribute or `array-element` children are used; the type
    /// comes from the enclosing `<channel-use-cases>`.
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueNode>,

    #[serde(rename = "comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
