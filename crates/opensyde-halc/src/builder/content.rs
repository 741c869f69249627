// crates/opensyde-halc/src/builder/content.rs

//! Contains builder functions to convert `types::TypedContent` into `model::ValueNode`.

use crate::availability::format_availability;
use crate::model::structs::{ArrayElementNode, BitMaskSelectionNode, EnumItemNode, ValueNode};
use crate::types::{Availability, ContentKind, ContentValue, Scalar, TypedContent, ValueRange};

/// Builds a `<value>` node carrying the type attributes, item lists and data.
pub(super) fn build_value_node(content: &TypedContent) -> ValueNode {
    let mut node = ValueNode {
        content_type: Some(content.kind.type_tag().to_string()),
        is_array: Some(content.is_array().to_string()),
        ..Default::default()
    };

    match &content.kind {
        ContentKind::Plain(_) => {}
        ContentKind::Enum { base, items } => {
            node.base_type = Some(base.as_str().to_string());
            node.enum_item = items
                .iter()
                .map(|item| EnumItemNode {
                    display: Some(item.display.clone()),
                    value: Some(item.value.to_string()),
                })
                .collect();
        }
        ContentKind::BitMask { base, items } => {
            node.base_type = Some(base.as_str().to_string());
            node.bitmask_selection = items
                .iter()
                .map(|item| BitMaskSelectionNode {
                    display: Some(item.display.clone()),
                    value: Some(format!("0x{:X}", item.value)),
                    apply_by_default: Some(item.apply_by_default.to_string()),
                    comment: Some(item.comment.clone()),
                })
                .collect();
        }
        ContentKind::String { strlen } => {
            node.strlen = Some(strlen.to_string());
        }
    }

    match &content.value {
        ContentValue::Scalar(value) => {
            node.value = Some(format_scalar(&content.kind, value));
        }
        ContentValue::Array(values) => {
            node.array_size = Some(values.len().to_string());
            node.array_element = values
                .iter()
                .map(|value| ArrayElementNode {
                    value: Some(format_scalar(&content.kind, value)),
                })
                .collect();
        }
        ContentValue::Text(text) => {
            node.array_size = Some(content.array_size().to_string());
            node.value = Some(text.clone());
        }
    }
    node
}

/// Adds the template-only attributes of a definition element.
pub(super) fn add_constraints(
    node: &mut ValueNode,
    range: Option<&ValueRange>,
    availability: &[Availability],
    channel_count: u32,
) {
    if let Some(range) = range {
        node.min = Some(range.min.to_string());
        node.max = Some(range.max.to_string());
    }
    node.availability = Some(format_availability(availability, channel_count, true));
}

/// Enum values are written as item display names, bitmasks as `0x%X`.
fn format_scalar(kind: &ContentKind, value: &Scalar) -> String {
    match kind {
        ContentKind::Enum { items, .. } => items
            .iter()
            .find(|item| item.value == *value)
            .map_or_else(|| value.to_string(), |item| item.display.clone()),
        ContentKind::BitMask { .. } => match value.as_bits() {
            Some(bits) => format!("0x{:X}", bits),
            None => value.to_string(),
        },
        ContentKind::Plain(_) | ContentKind::String { .. } => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BitMaskItem, EnumItem, ScalarType};

    #[test]
    fn test_enum_value_written_as_display() {
        let content = TypedContent {
            kind: ContentKind::Enum {
                base: ScalarType::S8,
                items: vec![
                    EnumItem {
                        display: "Off".to_string(),
                        value: Scalar::S8(0),
                    },
                    EnumItem {
                        display: "On".to_string(),
                        value: Scalar::S8(1),
                    },
                ],
            },
            value: ContentValue::Scalar(Scalar::S8(1)),
        };
        let node = build_value_node(&content);
        assert_eq!(node.content_type.as_deref(), Some("enum"));
        assert_eq!(node.base_type.as_deref(), Some("sint8"));
        assert_eq!(node.value.as_deref(), Some("On"));
        assert_eq!(node.enum_item.len(), 2);
    }

    #[test]
    fn test_bitmask_written_as_hex() {
        let content = TypedContent {
            kind: ContentKind::BitMask {
                base: ScalarType::U16,
                items: vec![BitMaskItem {
                    display: "Bit 8".to_string(),
                    value: 0x100,
                    apply_by_default: true,
                    comment: String::new(),
                }],
            },
            value: ContentValue::Scalar(Scalar::U16(0x1AB)),
        };
        let node = build_value_node(&content);
        assert_eq!(node.value.as_deref(), Some("0x1AB"));
        assert_eq!(node.bitmask_selection[0].value.as_deref(), Some("0x100"));
        assert_eq!(node.bitmask_selection[0].apply_by_default.as_deref(), Some("true"));
    }

    #[test]
    fn test_string_layout_attributes() {
        let node = build_value_node(&TypedContent::string(7, "pump"));
        assert_eq!(node.is_array.as_deref(), Some("true"));
        assert_eq!(node.array_size.as_deref(), Some("8"));
        assert_eq!(node.strlen.as_deref(), Some("7"));
        assert_eq!(node.value.as_deref(), Some("pump"));
    }

    #[test]
    fn test_constraints() {
        let mut node = build_value_node(&TypedContent::plain(Scalar::U8(3)));
        let range = ValueRange {
            min: Scalar::U8(1),
            max: Scalar::U8(9),
        };
        let availability = vec![Availability::single(0), Availability::single(2)];
        add_constraints(&mut node, Some(&range), &availability, 3);
        assert_eq!(node.min.as_deref(), Some("1"));
        assert_eq!(node.max.as_deref(), Some("9"));
        assert_eq!(node.availability.as_deref(), Some("0,2"));
    }
}
