// crates/opensyde-halc/src/builder/structs.rs

//! Contains builder functions for `<parameter-structs>` lists.

use super::content::{add_constraints, build_value_node};
use crate::model::structs::{
    ElementListNode, ElementNode, StructListNode, StructNode, StructSectionNode, ValuesSectionNode,
};
use crate::types::{ConfigParameter, ConfigParameterStruct, Element, ParameterStruct, ValueSet};

/// Builds the parameter section and the values wrapper of one level.
pub(super) fn build_value_set(
    values: &ValueSet,
    channel_count: u32,
) -> (StructSectionNode, ValuesSectionNode) {
    let section = |structs: &[ParameterStruct]| build_section(structs, channel_count);
    (
        section(&values.parameters),
        ValuesSectionNode {
            input_values: Some(section(&values.input_values)),
            output_values: Some(section(&values.output_values)),
            status_values: Some(section(&values.status_values)),
        },
    )
}

fn build_section(structs: &[ParameterStruct], channel_count: u32) -> StructSectionNode {
    StructSectionNode {
        parameter_structs: Some(StructListNode {
            length: Some(structs.len().to_string()),
            parameter_struct: structs
                .iter()
                .map(|s| build_struct(s, channel_count))
                .collect(),
        }),
    }
}

fn build_struct(parameter_struct: &ParameterStruct, channel_count: u32) -> StructNode {
    match parameter_struct {
        ParameterStruct::Single(element) => StructNode {
            single_value: Some(build_element(element, channel_count)),
            ..Default::default()
        },
        ParameterStruct::Group(group) => StructNode {
            display: Some(group.display.clone()),
            comment: Some(group.comment.clone()),
            parameters: Some(ElementListNode {
                length: Some(group.elements.len().to_string()),
                parameter: group
                    .elements
                    .iter()
                    .map(|e| build_element(e, channel_count))
                    .collect(),
            }),
            ..Default::default()
        },
    }
}

fn build_element(element: &Element, channel_count: u32) -> ElementNode {
    let mut value = build_value_node(&element.value.content);
    add_constraints(
        &mut value,
        element.value.range.as_ref(),
        &element.value.availability,
        channel_count,
    );
    ElementNode {
        display: Some(element.display.clone()),
        value: Some(value),
        comment: Some(element.comment.clone()),
    }
}

/// Builds the configured `<parameter-structs>` of a channel.
pub(super) fn build_config_structs(structs: &[ConfigParameterStruct]) -> StructListNode {
    StructListNode {
        length: Some(structs.len().to_string()),
        parameter_struct: structs
            .iter()
            .map(|s| match s {
                ConfigParameterStruct::Single(parameter) => StructNode {
                    single_value: Some(build_config_parameter(parameter)),
                    ..Default::default()
                },
                ConfigParameterStruct::Group(parameters) => StructNode {
                    parameters: Some(ElementListNode {
                        length: Some(parameters.len().to_string()),
                        parameter: parameters.iter().map(build_config_parameter).collect(),
                    }),
                    ..Default::default()
                },
            })
            .collect(),
    }
}

fn build_config_parameter(parameter: &ConfigParameter) -> ElementNode {
    ElementNode {
        display: None,
        value: Some(build_value_node(&parameter.value)),
        comment: Some(parameter.comment.clone()),
    }
}
