// crates/opensyde-halc/src/resolver/content.rs

//! Resolves type-tagged `<value>` nodes into `TypedContent`.

use super::utils::{
    check_unique_indices, invalid_format, parse_availability_attribute, parse_bool, parse_number,
    required, required_element,
};
use super::validation::check_symmetric_groups;
use crate::constants::MAX_ARRAY_SIZE;
use crate::error::HalcError;
use crate::model::structs::{BitMaskSelectionNode, EnumItemNode, ValueNode};
use crate::types::{
    BitMaskItem, ContentKind, ContentValue, ElementValue, EnumItem, Scalar, ScalarType,
    TypedContent, ValueRange,
};
use crate::xml_path::XmlPath;
use std::cmp::Ordering;

/// Resolves a `<value>` node of a definition element: the default content,
/// its permitted range and the channels it is available on.
pub(super) fn resolve_element_value(
    node: &ValueNode,
    channel_count: u32,
    path: &XmlPath,
) -> Result<ElementValue, HalcError> {
    let content = resolve_content(node, path)?;

    let range = match content.kind {
        ContentKind::Plain(scalar) => {
            let range = resolve_range(node, scalar, path)?;
            check_in_range(&content, &range, path)?;
            Some(range)
        }
        _ => None,
    };

    let availability_text = node.availability.as_deref().unwrap_or("all");
    let availability =
        parse_availability_attribute(availability_text, channel_count, "availability", path)?;
    check_unique_indices(&availability, "availability", path)?;
    check_symmetric_groups(&availability, path)?;

    Ok(ElementValue {
        content,
        range,
        availability,
    })
}

/// Resolves the type attributes, item lists and stored data of a `<value>` node.
pub(super) fn resolve_content(node: &ValueNode, path: &XmlPath) -> Result<TypedContent, HalcError> {
    let kind = resolve_kind(node, path)?;

    if let ContentKind::String { strlen } = kind {
        return resolve_string(node, strlen, path);
    }

    let is_array = match node.is_array.as_deref() {
        Some(text) => parse_bool(text, "is-array", path)?,
        None => false,
    };

    let value = if is_array {
        let size: u32 = parse_number(required(node.array_size.as_ref(), "array-size", path)?, "array-size", path)?;
        if size > MAX_ARRAY_SIZE {
            return Err(HalcError::validation(
                path,
                format!("array-size {} exceeds the maximum of {}", size, MAX_ARRAY_SIZE),
            ));
        }
        // Bounded above, so the conversion is lossless.
        let size = size as usize;
        if node.array_element.is_empty() {
            ContentValue::Array(vec![default_scalar(&kind); size])
        } else {
            if node.array_element.len() != size {
                return Err(HalcError::validation(
                    path,
                    format!(
                        "array-size {} does not match the {} array elements found",
                        size,
                        node.array_element.len()
                    ),
                ));
            }
            let values = node
                .array_element
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    let element_path = path.indexed("array-element", i);
                    let text = required(element.value.as_ref(), "value", &element_path)?;
                    parse_scalar(&kind, text, &element_path)
                })
                .collect::<Result<Vec<_>, _>>()?;
            ContentValue::Array(values)
        }
    } else {
        match node.value.as_deref() {
            Some(text) => ContentValue::Scalar(parse_scalar(&kind, text, path)?),
            None => ContentValue::Scalar(default_scalar(&kind)),
        }
    };

    Ok(TypedContent { kind, value })
}

/// Reads `type` (and `base-type` / `strlen`) plus the enum and bitmask items.
fn resolve_kind(node: &ValueNode, path: &XmlPath) -> Result<ContentKind, HalcError> {
    let tag = required(node.content_type.as_ref(), "type", path)?;
    match tag {
        "enum" => {
            let base = resolve_base_type(node, path)?;
            let items = resolve_enum_items(&node.enum_item, base, path)?;
            Ok(ContentKind::Enum { base, items })
        }
        "bitmask" => {
            let base = resolve_base_type(node, path)?;
            if !base.is_integer() {
                return Err(HalcError::validation(
                    path,
                    format!("bitmask base type must be an integer type, found \"{}\"", base),
                ));
            }
            let items = resolve_bitmask_items(&node.bitmask_selection, base, path)?;
            Ok(ContentKind::BitMask { base, items })
        }
        "string" => {
            let strlen = parse_number(required(node.strlen.as_ref(), "strlen", path)?, "strlen", path)?;
            Ok(ContentKind::String { strlen })
        }
        other => ScalarType::from_tag(other)
            .map(ContentKind::Plain)
            .ok_or_else(|| invalid_format("type", other, path)),
    }
}

fn resolve_base_type(node: &ValueNode, path: &XmlPath) -> Result<ScalarType, HalcError> {
    let tag = required(node.base_type.as_ref(), "base-type", path)?;
    ScalarType::from_tag(tag).ok_or_else(|| invalid_format("base-type", tag, path))
}

fn resolve_enum_items(
    nodes: &[EnumItemNode],
    base: ScalarType,
    path: &XmlPath,
) -> Result<Vec<EnumItem>, HalcError> {
    if nodes.is_empty() {
        return Err(HalcError::validation(path, "enum value without any enum-item"));
    }
    nodes
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = path.indexed("enum-item", i);
            let display = required(item.display.as_ref(), "display", &item_path)?;
            let text = required(item.value.as_ref(), "value", &item_path)?;
            let value = base
                .parse_value(text)
                .ok_or_else(|| invalid_format("value", text, &item_path))?;
            Ok(EnumItem {
                display: display.to_string(),
                value,
            })
        })
        .collect()
}

fn resolve_bitmask_items(
    nodes: &[BitMaskSelectionNode],
    base: ScalarType,
    path: &XmlPath,
) -> Result<Vec<BitMaskItem>, HalcError> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = path.indexed("bitmask-selection", i);
            let display = required(item.display.as_ref(), "display", &item_path)?;
            let text = required(item.value.as_ref(), "value", &item_path)?;
            let value = parse_mask(base, text, &item_path)?;
            let apply_by_default = match item.apply_by_default.as_deref() {
                Some(flag) => parse_bool(flag, "apply-by-default", &item_path)?,
                None => false,
            };
            Ok(BitMaskItem {
                display: display.to_string(),
                value,
                apply_by_default,
                comment: item.comment.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Parses a bitmask and checks that it fits the base type.
fn parse_mask(base: ScalarType, text: &str, path: &XmlPath) -> Result<u64, HalcError> {
    ScalarType::U64
        .parse_value(text)
        .and_then(|v| v.as_bits())
        .filter(|bits| base.from_bits(*bits).is_some())
        .ok_or_else(|| invalid_format("value", text, path))
}

fn resolve_string(node: &ValueNode, strlen: u32, path: &XmlPath) -> Result<TypedContent, HalcError> {
    if let Some(size) = node.array_size.as_deref() {
        let size: u32 = parse_number(size, "array-size", path)?;
        if Some(size) != strlen.checked_add(1) {
            return Err(HalcError::validation(
                path,
                format!("string array-size {} must be strlen + 1 ({})", size, strlen),
            ));
        }
    }
    let text = node.value.clone().unwrap_or_default();
    if text.len() > strlen as usize {
        return Err(HalcError::validation(
            path,
            format!("string \"{}\" exceeds strlen {}", text, strlen),
        ));
    }
    Ok(TypedContent::string(strlen, text))
}

/// Parses one stored scalar of `kind`.
///
/// Enum values are written as item display names; the numeric item value is
/// accepted as well. Bitmask values are masks in decimal or `0x` notation.
fn parse_scalar(kind: &ContentKind, text: &str, path: &XmlPath) -> Result<Scalar, HalcError> {
    let parsed = match kind {
        ContentKind::Plain(scalar) => scalar.parse_value(text),
        ContentKind::Enum { base, items } => items
            .iter()
            .find(|item| item.display == text)
            .map(|item| item.value)
            .or_else(|| {
                base.parse_value(text)
                    .filter(|v| items.iter().any(|item| item.value == *v))
            }),
        ContentKind::BitMask { base, .. } => ScalarType::U64
            .parse_value(text)
            .and_then(|v| v.as_bits())
            .and_then(|bits| base.from_bits(bits)),
        ContentKind::String { .. } => None,
    };
    parsed.ok_or_else(|| invalid_format("value", text, path))
}

/// Value used when a `<value>` node carries no data.
fn default_scalar(kind: &ContentKind) -> Scalar {
    match kind {
        ContentKind::Plain(scalar) => scalar.zero(),
        ContentKind::Enum { base, items } => items.first().map_or(base.zero(), |item| item.value),
        ContentKind::BitMask { base, items } => {
            let mask = items
                .iter()
                .filter(|item| item.apply_by_default)
                .fold(0u64, |acc, item| acc | item.value);
            base.from_bits(mask).unwrap_or(base.zero())
        }
        // Strings never reach the scalar path.
        ContentKind::String { .. } => Scalar::U8(0),
    }
}

fn resolve_range(node: &ValueNode, scalar: ScalarType, path: &XmlPath) -> Result<ValueRange, HalcError> {
    let bound = |value: Option<&String>, attribute: &'static str, fallback: Scalar| match value {
        Some(text) => scalar
            .parse_value(text)
            .ok_or_else(|| invalid_format(attribute, text, path)),
        None => Ok(fallback),
    };
    let min = bound(node.min.as_ref(), "min", scalar.min_value())?;
    let max = bound(node.max.as_ref(), "max", scalar.max_value())?;
    if min.compare(&max) == Some(Ordering::Greater) {
        return Err(HalcError::validation(
            path,
            format!("min {} is greater than max {}", min, max),
        ));
    }
    Ok(ValueRange { min, max })
}

fn check_in_range(content: &TypedContent, range: &ValueRange, path: &XmlPath) -> Result<(), HalcError> {
    for value in content.scalars() {
        let below = value.compare(&range.min) == Some(Ordering::Less);
        let above = value.compare(&range.max) == Some(Ordering::Greater);
        if below || above {
            return Err(HalcError::validation(
                path,
                format!(
                    "value {} outside of range [{}, {}]",
                    value, range.min, range.max
                ),
            ));
        }
    }
    Ok(())
}

/// Resolves the mandatory `<value>` child of an element.
pub(super) fn required_value<'a>(
    value: Option<&'a ValueNode>,
    path: &XmlPath,
) -> Result<&'a ValueNode, HalcError> {
    required_element(value, "value", path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::structs::ArrayElementNode;

    fn path() -> XmlPath {
        XmlPath::root("value")
    }

    fn plain(tag: &str, value: Option<&str>) -> ValueNode {
        ValueNode {
            content_type: Some(tag.to_string()),
            value: value.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_value_with_default_range() {
        let node = plain("sint16", Some("-5"));
        let value = resolve_element_value(&node, 4, &path()).unwrap();
        assert_eq!(value.content, TypedContent::plain(Scalar::S16(-5)));
        let range = value.range.unwrap();
        assert_eq!(range.min, Scalar::S16(i16::MIN));
        assert_eq!(range.max, Scalar::S16(i16::MAX));
        // No availability attribute means every channel.
        assert_eq!(value.availability.len(), 4);
    }

    #[test]
    fn test_value_outside_range_is_invalid() {
        let mut node = plain("uint8", Some("20"));
        node.min = Some("0".to_string());
        node.max = Some("10".to_string());
        let err = resolve_element_value(&node, 1, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let err = resolve_content(&plain("uint128", Some("1")), &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_enum_value_by_display_and_default() {
        let mut node = ValueNode {
            content_type: Some("enum".to_string()),
            base_type: Some("uint8".to_string()),
            value: Some("High".to_string()),
            ..Default::default()
        };
        node.enum_item = vec![
            EnumItemNode {
                display: Some("Low".to_string()),
                value: Some("0".to_string()),
            },
            EnumItemNode {
                display: Some("High".to_string()),
                value: Some("1".to_string()),
            },
        ];
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.value, ContentValue::Scalar(Scalar::U8(1)));

        node.value = None;
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.value, ContentValue::Scalar(Scalar::U8(0)));

        node.value = Some("Medium".to_string());
        assert!(resolve_content(&node, &path()).is_err());
    }

    #[test]
    fn test_bitmask_defaults_to_applied_selections() {
        let selection = |display: &str, value: &str, apply: &str| BitMaskSelectionNode {
            display: Some(display.to_string()),
            value: Some(value.to_string()),
            apply_by_default: Some(apply.to_string()),
            comment: None,
        };
        let node = ValueNode {
            content_type: Some("bitmask".to_string()),
            base_type: Some("uint16".to_string()),
            bitmask_selection: vec![
                selection("A", "0x1", "true"),
                selection("B", "0x2", "false"),
                selection("C", "0x100", "true"),
            ],
            ..Default::default()
        };
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.value, ContentValue::Scalar(Scalar::U16(0x101)));
    }

    #[test]
    fn test_bitmask_on_float_base_is_invalid() {
        let node = ValueNode {
            content_type: Some("bitmask".to_string()),
            base_type: Some("float32".to_string()),
            ..Default::default()
        };
        let err = resolve_content(&node, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn test_array_size_must_match_elements() {
        let mut node = plain("uint32", None);
        node.is_array = Some("true".to_string());
        node.array_size = Some("3".to_string());
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.value, ContentValue::Array(vec![Scalar::U32(0); 3]));

        node.array_element = vec![ArrayElementNode {
            value: Some("7".to_string()),
        }];
        let err = resolve_content(&node, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn test_oversized_array_is_rejected() {
        let mut node = plain("uint8", None);
        node.is_array = Some("true".to_string());
        node.array_size = Some("18446744073709551615".to_string());
        let err = resolve_content(&node, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        node.array_size = Some("4000000000".to_string());
        let err = resolve_content(&node, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);

        node.array_size = Some(MAX_ARRAY_SIZE.to_string());
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.array_size(), MAX_ARRAY_SIZE);
    }

    #[test]
    fn test_signed_bitmask_uses_sign_bit() {
        let node = ValueNode {
            content_type: Some("bitmask".to_string()),
            base_type: Some("sint8".to_string()),
            value: Some("0x81".to_string()),
            bitmask_selection: vec![BitMaskSelectionNode {
                display: Some("Top".to_string()),
                value: Some("0x80".to_string()),
                apply_by_default: Some("true".to_string()),
                comment: None,
            }],
            ..Default::default()
        };
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.value, ContentValue::Scalar(Scalar::S8(-127)));

        let mut wide = node.clone();
        wide.value = Some("0x100".to_string());
        let err = resolve_content(&wide, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_string_length_limits() {
        let mut node = ValueNode {
            content_type: Some("string".to_string()),
            strlen: Some("4".to_string()),
            array_size: Some("5".to_string()),
            value: Some("abcd".to_string()),
            ..Default::default()
        };
        let content = resolve_content(&node, &path()).unwrap();
        assert_eq!(content.array_size(), 5);

        node.value = Some("abcde".to_string());
        assert!(resolve_content(&node, &path()).is_err());

        node.value = Some("ab".to_string());
        node.array_size = Some("4".to_string());
        assert!(resolve_content(&node, &path()).is_err());
    }
}
