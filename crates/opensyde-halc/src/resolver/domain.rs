// crates/opensyde-halc/src/resolver/domain.rs

use super::content::resolve_content;
use super::structs::resolve_value_set;
use super::utils::{
    check_unique_indices, invalid_format, parse_availability_attribute, parse_required_number,
    required, required_element, required_text,
};
use super::validation::{check_symmetric_groups, validate_domain};
use crate::LoadOptions;
use crate::constants::RESERVED_IDENTIFIER_CHARS;
use crate::error::HalcError;
use crate::model::description::{ChannelsNode, DomainNode, UseCasesNode};
use crate::types::{ChannelDef, ChannelUseCase, Domain, DomainCategory};
use crate::xml_path::XmlPath;

/// Parses a `model::DomainNode` into a validated `types::Domain`.
pub(super) fn resolve_domain(
    node: &DomainNode,
    options: &LoadOptions,
    parent: &XmlPath,
) -> Result<Domain, HalcError> {
    let id = required(node.id.as_ref(), "id", parent)?;
    let path = parent.keyed("domain", id);
    log::debug!("Resolving domain \"{}\"", id);

    let name = required_text(node.name.as_ref(), "name", &path)?;
    let singular_name = node.singular_name.as_deref().unwrap_or(name);
    let limit = options
        .name_max_char_limit
        .saturating_sub(RESERVED_IDENTIFIER_CHARS);
    if singular_name.chars().count() > limit {
        return Err(HalcError::validation(
            path.child("singular-name"),
            format!(
                "\"{}\" is longer than {} characters",
                singular_name, limit
            ),
        ));
    }

    let channels = resolve_channels(
        required_element(node.channels.as_ref(), "channels", &path)?,
        &path.child("channels"),
    )?;
    let channel_count = channels.len() as u32;

    let category = match node.category.as_deref() {
        Some(tag) => DomainCategory::from_tag(tag.trim())
            .ok_or_else(|| invalid_format("category", tag, &path))?,
        None => DomainCategory::Other,
    };

    let use_cases = match &node.channel_use_cases {
        Some(use_cases) => {
            resolve_use_cases(use_cases, channel_count, &path.child("channel-use-cases"))?
        }
        None => Vec::new(),
    };

    let domain_values = resolve_value_set(
        node.domain_parameters.as_ref(),
        node.domain_values.as_ref(),
        channel_count,
        &path.child("domain-parameters"),
        &path.child("domain-values"),
    )?;
    let channel_values = resolve_value_set(
        node.channel_parameters.as_ref(),
        node.channel_values.as_ref(),
        channel_count,
        &path.child("channel-parameters"),
        &path.child("channel-values"),
    )?;

    let domain = Domain {
        id: id.to_string(),
        name: name.to_string(),
        singular_name: singular_name.to_string(),
        category,
        channels,
        use_cases,
        domain_values,
        channel_values,
    };
    validate_domain(&domain, &path)?;
    Ok(domain)
}

fn resolve_channels(node: &ChannelsNode, path: &XmlPath) -> Result<Vec<ChannelDef>, HalcError> {
    let count: usize = parse_required_number(node.count.as_ref(), "count", path)?;
    if count != node.channel.len() {
        return Err(HalcError::validation(
            path,
            format!(
                "declared count {} does not match the {} channels found",
                count,
                node.channel.len()
            ),
        ));
    }
    node.channel
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            let name = required(channel.name.as_ref(), "name", &path.indexed("channel", i))?;
            Ok(ChannelDef {
                name: name.to_string(),
            })
        })
        .collect()
}

/// The wrapper's type attributes apply to every use-case value.
fn resolve_use_cases(
    node: &UseCasesNode,
    channel_count: u32,
    path: &XmlPath,
) -> Result<Vec<ChannelUseCase>, HalcError> {
    let tag = required(node.content_type.as_ref(), "type", path)?;
    if tag == "enum" || tag == "bitmask" {
        return Err(invalid_format("type", tag, path));
    }

    node.channel_use_case
        .iter()
        .enumerate()
        .map(|(i, use_case)| {
            let use_case_path = path.indexed("channel-use-case", i);
            let id = required(use_case.id.as_ref(), "id", &use_case_path)?;
            let display = required(use_case.display.as_ref(), "display", &use_case_path)?;

            let mut value_node = use_case.value.clone().unwrap_or_default();
            value_node.content_type = node.content_type.clone();
            value_node.is_array = node.is_array.clone();
            value_node.array_size = node.array_size.clone();
            value_node.strlen = node.strlen.clone();
            let value = resolve_content(&value_node, &use_case_path.child("value"))?;

            let availability_text = required(
                use_case.availability.as_ref(),
                "availability",
                &use_case_path,
            )?;
            let availability = parse_availability_attribute(
                availability_text,
                channel_count,
                "availability",
                &use_case_path,
            )?;
            check_unique_indices(&availability, "availability", &use_case_path)?;
            check_symmetric_groups(&availability, &use_case_path)?;

            let default_channels = match use_case.is_default_for.as_deref() {
                Some(text) => {
                    let entries = parse_availability_attribute(
                        text,
                        channel_count,
                        "is-default-for",
                        &use_case_path,
                    )?;
                    if entries.iter().any(|e| !e.dependent_values.is_empty()) {
                        return Err(HalcError::validation(
                            &use_case_path,
                            "\"is-default-for\" must not contain groups",
                        ));
                    }
                    entries.into_iter().map(|e| e.value_index).collect()
                }
                None => Vec::new(),
            };

            Ok(ChannelUseCase {
                id: id.to_string(),
                display: display.to_string(),
                value,
                availability,
                default_channels,
                comment: use_case.comment.clone().unwrap_or_default(),
            })
        })
        .collect()
}
