// crates/opensyde-halc/src/builder/description.rs

//! Contains builder functions to convert a `types::Definition` into `model::HalcDescription`.

use super::content::build_value_node;
use super::structs::build_value_set;
use crate::availability::format_availability;
use crate::constants::HALC_FILE_VERSION;
use crate::model::description::{
    ChannelNode, ChannelsNode, DatapoolOffsetsNode, DomainNode, HalcDescription,
    ListsReservedSizeNode, NvmConfigNode, UseCaseNode, UseCasesNode,
};
use crate::types::{Availability, ChannelUseCase, Definition, Domain, NvmConfig};

/// Builds the complete description model. Every field is written, defaults included.
pub(crate) fn build_description(definition: &Definition) -> HalcDescription {
    HalcDescription {
        file_version: Some(HALC_FILE_VERSION.to_string()),
        content_version: Some(definition.content_version.to_string()),
        device_name: Some(definition.device_name.clone()),
        safety_mode: Some(definition.safety_mode.as_str().to_string()),
        number_of_configuration_copies: Some(definition.num_config_copies.to_string()),
        nvm_config: Some(build_nvm(&definition.nvm)),
        domain: definition.domains.iter().map(build_domain).collect(),
    }
}

fn build_nvm(nvm: &NvmConfig) -> NvmConfigNode {
    let mut offsets = DatapoolOffsetsNode::default();
    for (copy, offset) in nvm.non_safe_offsets.iter().enumerate() {
        offsets.set_offset(copy, false, offset.to_string());
    }
    for (copy, offset) in nvm.safe_offsets.iter().enumerate() {
        offsets.set_offset(copy, true, offset.to_string());
    }
    let sizes = &nvm.reserved_sizes;
    NvmConfigNode {
        active: Some(nvm.active.to_string()),
        datapools_start_address_offset: Some(offsets),
        lists_reserved_size: Some(ListsReservedSizeNode {
            parameters_list_size: Some(sizes.parameters.to_string()),
            input_values_list_size: Some(sizes.input_values.to_string()),
            output_values_list_size: Some(sizes.output_values.to_string()),
            status_values_list_size: Some(sizes.status_values.to_string()),
        }),
    }
}

fn build_domain(domain: &Domain) -> DomainNode {
    let channel_count = domain.channel_count();
    let (domain_parameters, domain_values) = build_value_set(&domain.domain_values, channel_count);
    let (channel_parameters, channel_values) =
        build_value_set(&domain.channel_values, channel_count);

    DomainNode {
        id: Some(domain.id.clone()),
        name: Some(domain.name.clone()),
        singular_name: Some(domain.singular_name.clone()),
        category: Some(domain.category.as_str().to_string()),
        channels: Some(ChannelsNode {
            count: Some(domain.channels.len().to_string()),
            channel: domain
                .channels
                .iter()
                .map(|c| ChannelNode {
                    name: Some(c.name.clone()),
                })
                .collect(),
        }),
        channel_use_cases: build_use_cases(&domain.use_cases, channel_count),
        domain_parameters: Some(domain_parameters),
        domain_values: Some(domain_values),
        channel_parameters: Some(channel_parameters),
        channel_values: Some(channel_values),
    }
}

/// The type attributes move from the values to the wrapper. Without use-cases
/// there is no type to write, so the wrapper is omitted.
fn build_use_cases(use_cases: &[ChannelUseCase], channel_count: u32) -> Option<UseCasesNode> {
    let first = build_value_node(&use_cases.first()?.value);
    let children = use_cases
        .iter()
        .map(|use_case| {
            let mut value = build_value_node(&use_case.value);
            value.content_type = None;
            value.base_type = None;
            value.is_array = None;
            value.array_size = None;
            value.strlen = None;

            let defaults: Vec<Availability> = use_case
                .default_channels
                .iter()
                .map(|c| Availability::single(*c))
                .collect();
            UseCaseNode {
                id: Some(use_case.id.clone()),
                display: Some(use_case.display.clone()),
                availability: Some(format_availability(&use_case.availability, channel_count, true)),
                is_default_for: (!defaults.is_empty())
                    .then(|| format_availability(&defaults, channel_count, false)),
                value: Some(value),
                comment: Some(use_case.comment.clone()),
            }
        })
        .collect();
    Some(UseCasesNode {
        content_type: first.content_type,
        is_array: first.is_array,
        array_size: first.array_size,
        strlen: first.strlen,
        channel_use_case: children,
    })
}
