// crates/opensyde-halc/src/resolver/header.rs

//! Device identity, safety mode, configuration copies and NVM layout.

use super::utils::{
    invalid_format, parse_bool, parse_number, parse_required_number, required, required_text,
};
use crate::constants::MAX_CONFIG_COPIES;
use crate::error::HalcError;
use crate::model::description::{
    DatapoolOffsetsNode, HalcDescription, ListsReservedSizeNode, NvmConfigNode,
};
use crate::types::{NvmConfig, ReservedListSizes, SafetyMode};
use crate::xml_path::XmlPath;

/// Header fields of a definition, everything but the domains.
#[derive(Debug)]
pub(super) struct Header {
    pub content_version: u32,
    pub device_name: String,
    pub safety_mode: SafetyMode,
    pub num_config_copies: u8,
    pub nvm: NvmConfig,
}

/// Resolves the header fields. `file-version` must already be checked.
pub(super) fn resolve_header(model: &HalcDescription, path: &XmlPath) -> Result<Header, HalcError> {
    let content_version = parse_number(
        required_text(model.content_version.as_ref(), "content-version", path)?,
        "content-version",
        path,
    )?;
    let device_name = required_text(model.device_name.as_ref(), "device-name", path)?;

    let safety_mode = match model.safety_mode.as_deref() {
        Some(tag) => SafetyMode::from_tag(tag.trim())
            .ok_or_else(|| invalid_format("safety-mode", tag, path))?,
        None => {
            log::warn!("No safety-mode in {}, using the default", path);
            SafetyMode::default()
        }
    };

    let num_config_copies = match model.number_of_configuration_copies.as_deref() {
        Some(text) => {
            let copies: u8 = parse_number(text, "number-of-configuration-copies", path)?;
            if copies == 0 || copies > MAX_CONFIG_COPIES {
                return Err(HalcError::validation(
                    path.child("number-of-configuration-copies"),
                    format!("{} is outside of [1, {}]", copies, MAX_CONFIG_COPIES),
                ));
            }
            copies
        }
        None => 1,
    };

    let nvm = match &model.nvm_config {
        Some(node) => resolve_nvm(node, safety_mode, num_config_copies, &path.child("nvm-config"))?,
        None => {
            log::warn!("No nvm-config in {}, NVM is inactive", path);
            NvmConfig::default()
        }
    };

    Ok(Header {
        content_version,
        device_name: device_name.to_string(),
        safety_mode,
        num_config_copies,
        nvm,
    })
}

/// Offsets are read whenever their node exists; an active NVM requires both sub-nodes.
fn resolve_nvm(
    node: &NvmConfigNode,
    safety_mode: SafetyMode,
    copies: u8,
    path: &XmlPath,
) -> Result<NvmConfig, HalcError> {
    let active = parse_bool(required(node.active.as_ref(), "active", path)?, "active", path)?;

    let (safe_offsets, non_safe_offsets) = match &node.datapools_start_address_offset {
        // Inactive NVM layouts are saved with an empty offsets node.
        Some(offsets) if !active && offsets.is_empty() => (Vec::new(), Vec::new()),
        Some(offsets) => resolve_offsets(
            offsets,
            safety_mode,
            copies,
            &path.child("datapools-start-address-offset"),
        )?,
        None if active => {
            return Err(HalcError::MissingElement {
                element: "datapools-start-address-offset",
                context: path.to_string(),
            });
        }
        None => (Vec::new(), Vec::new()),
    };

    let reserved_sizes = match &node.lists_reserved_size {
        Some(sizes) => resolve_reserved_sizes(sizes, &path.child("lists-reserved-size"))?,
        None if active => {
            return Err(HalcError::MissingElement {
                element: "lists-reserved-size",
                context: path.to_string(),
            });
        }
        None => ReservedListSizes::default(),
    };

    Ok(NvmConfig {
        active,
        safe_offsets,
        non_safe_offsets,
        reserved_sizes,
    })
}

fn resolve_offsets(
    node: &DatapoolOffsetsNode,
    safety_mode: SafetyMode,
    copies: u8,
    path: &XmlPath,
) -> Result<(Vec<u32>, Vec<u32>), HalcError> {
    let mut safe = Vec::new();
    let mut non_safe = Vec::new();
    for copy in 0..usize::from(copies) {
        if safety_mode.has_non_safe_datapools() {
            let attribute = DatapoolOffsetsNode::attribute_name(copy, false);
            non_safe.push(parse_required_number(node.offset(copy, false), attribute, path)?);
        }
        if safety_mode.has_safe_datapools() {
            let attribute = DatapoolOffsetsNode::attribute_name(copy, true);
            safe.push(parse_required_number(node.offset(copy, true), attribute, path)?);
        }
    }
    Ok((safe, non_safe))
}

fn resolve_reserved_sizes(
    node: &ListsReservedSizeNode,
    path: &XmlPath,
) -> Result<ReservedListSizes, HalcError> {
    Ok(ReservedListSizes {
        parameters: parse_required_number(node.parameters_list_size.as_ref(), "parameters-list-size", path)?,
        input_values: parse_required_number(node.input_values_list_size.as_ref(), "input-values-list-size", path)?,
        output_values: parse_required_number(node.output_values_list_size.as_ref(), "output-values-list-size", path)?,
        status_values: parse_required_number(node.status_values_list_size.as_ref(), "status-values-list-size", path)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn model() -> HalcDescription {
        HalcDescription {
            file_version: Some("1".to_string()),
            content_version: Some("6".to_string()),
            device_name: Some("ESX-3CM".to_string()),
            ..Default::default()
        }
    }

    fn path() -> XmlPath {
        XmlPath::root("opensyde-HALC-description")
    }

    fn offsets() -> DatapoolOffsetsNode {
        let mut node = DatapoolOffsetsNode::default();
        for copy in 0..2 {
            node.set_offset(copy, false, format!("{}", copy * 0x1000));
            node.set_offset(copy, true, format!("{}", copy * 0x1000 + 0x800));
        }
        node
    }

    #[test]
    fn test_defaults_without_optional_nodes() {
        let header = resolve_header(&model(), &path()).unwrap();
        assert_eq!(header.content_version, 6);
        assert_eq!(header.device_name, "ESX-3CM");
        assert_eq!(header.safety_mode, SafetyMode::TwoLevelsWithDropping);
        assert_eq!(header.num_config_copies, 1);
        assert!(!header.nvm.active);
        assert_eq!(header.nvm.reserved_sizes, ReservedListSizes::default());
    }

    #[test]
    fn test_configuration_copies_cap() {
        let mut m = model();
        m.number_of_configuration_copies = Some("5".to_string());
        let err = resolve_header(&m, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);

        m.number_of_configuration_copies = Some("four".to_string());
        let err = resolve_header(&m, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_offsets_follow_safety_mode() {
        let mut m = model();
        m.safety_mode = Some("one-level-all-safe".to_string());
        m.number_of_configuration_copies = Some("2".to_string());
        m.nvm_config = Some(NvmConfigNode {
            active: Some("true".to_string()),
            datapools_start_address_offset: Some(offsets()),
            lists_reserved_size: Some(ListsReservedSizeNode {
                parameters_list_size: Some("10".to_string()),
                input_values_list_size: Some("20".to_string()),
                output_values_list_size: Some("30".to_string()),
                status_values_list_size: Some("40".to_string()),
            }),
        });
        let header = resolve_header(&m, &path()).unwrap();
        assert_eq!(header.nvm.safe_offsets, vec![0x800, 0x1800]);
        assert!(header.nvm.non_safe_offsets.is_empty());
        assert_eq!(header.nvm.reserved_sizes.status_values, 40);
    }

    #[test]
    fn test_missing_conditional_offset_fails() {
        let mut m = model();
        let mut node = DatapoolOffsetsNode::default();
        node.set_offset(0, false, "0".to_string());
        m.nvm_config = Some(NvmConfigNode {
            active: Some("false".to_string()),
            datapools_start_address_offset: Some(node),
            lists_reserved_size: None,
        });
        // Two levels need the safe offset as well.
        let err = resolve_header(&m, &path()).unwrap_err();
        assert!(matches!(
            err,
            HalcError::MissingAttribute {
                attribute: "address-offset-datapool-1-safe",
                ..
            }
        ));
    }

    #[test]
    fn test_inactive_nvm_accepts_empty_offsets() {
        let mut m = model();
        m.nvm_config = Some(NvmConfigNode {
            active: Some("false".to_string()),
            datapools_start_address_offset: Some(DatapoolOffsetsNode::default()),
            lists_reserved_size: None,
        });
        let header = resolve_header(&m, &path()).unwrap();
        assert!(header.nvm.safe_offsets.is_empty());

        m.nvm_config = Some(NvmConfigNode {
            active: Some("true".to_string()),
            datapools_start_address_offset: Some(DatapoolOffsetsNode::default()),
            lists_reserved_size: None,
        });
        let err = resolve_header(&m, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_active_nvm_requires_sub_nodes() {
        let mut m = model();
        m.nvm_config = Some(NvmConfigNode {
            active: Some("true".to_string()),
            datapools_start_address_offset: Some(offsets()),
            lists_reserved_size: None,
        });
        let err = resolve_header(&m, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
