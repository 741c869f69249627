// crates/opensyde-halc/src/model/structs.rs

//! Parameter structs and typed values, shared by definition and configuration.

use serde::{Deserialize, Serialize};

/// Represents `<domain-parameters>` / `<channel-parameters>` / `<input-values>` etc.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StructSectionNode {
    #[serde(
        rename = "parameter-structs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parameter_structs: Option<StructListNode>,
}

/// Represents `<domain-values>` / `<channel-values>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ValuesSectionNode {
    #[serde(rename = "input-values", default, skip_serializing_if = "Option::is_none")]
    pub input_values: Option<StructSectionNode>,

    #[serde(rename = "output-values", default, skip_serializing_if = "Option::is_none")]
    pub output_values: Option<StructSectionNode>,

    #[serde(rename = "status-values", default, skip_serializing_if = "Option::is_none")]
    pub status_values: Option<StructSectionNode>,
}

/// Represents `<parameter-structs length="n">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StructListNode {
    #[serde(rename = "@length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    #[serde(rename = "parameter-struct", default)]
    pub parameter_struct: Vec<StructNode>,
}

/// Represents `<parameter-struct>`: either a `<single-value>` or a `<parameters>` group.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StructNode {
    /// Display name of a group struct.
    #[serde(rename = "@display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Comment of a group struct.
    #[serde(rename = "comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(rename = "single-value", default, skip_serializing_if = "Option::is_none")]
    pub single_value: Option<ElementNode>,

    #[serde(rename = "parameters", default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ElementListNode>,
}

/// Represents `<parameters length="n">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ElementListNode {
    #[serde(rename = "@length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,

    #[serde(rename = "parameter", default)]
    pub parameter: Vec<ElementNode>,
}

/// Represents `<single-value>` and `<parameter>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ElementNode {
    #[serde(rename = "@display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueNode>,

    #[serde(rename = "comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Represents a typed `<value>` node.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ValueNode {
    /// `uint8` ... `float64`, `enum`, `bitmask` or `string`.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Scalar type of an enum or bitmask.
    #[serde(rename = "@base-type", default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(rename = "@is-array", default, skip_serializing_if = "Option::is_none")]
    pub is_array: Option<String>,

    #[serde(rename = "@array-size", default, skip_serializing_if = "Option::is_none")]
    pub array_size: Option<String>,

    /// Maximum length of a string value.
    #[serde(rename = "@strlen", default, skip_serializing_if = "Option::is_none")]
    pub strlen: Option<String>,

    /// The value of a non-array content.
    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "@min", default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,

    #[serde(rename = "@max", default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    #[serde(rename = "@availability", default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    #[serde(rename = "array-element", default, skip_serializing_if = "Vec::is_empty")]
    pub array_element: Vec<ArrayElementNode>,

    #[serde(rename = "enum-item", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_item: Vec<EnumItemNode>,

    #[serde(
        rename = "bitmask-selection",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub bitmask_selection: Vec<BitMaskSelectionNode>,
}

/// Represents `<array-element value="..."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ArrayElementNode {
    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Represents `<enum-item display="..." value="..."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct EnumItemNode {
    #[serde(rename = "@display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Represents `<bitmask-selection display="..." value="0x.." apply-by-default="..."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct BitMaskSelectionNode {
    #[serde(rename = "@display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(
        rename = "@apply-by-default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub apply_by_default: Option<String>,

    #[serde(rename = "comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
