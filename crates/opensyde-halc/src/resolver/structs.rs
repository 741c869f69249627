// crates/opensyde-halc/src/resolver/structs.rs

//! Resolves `<parameter-structs>` lists, both as definition templates and as
//! configured values.

use super::content::{required_value, resolve_content, resolve_element_value};
use super::utils::{check_length, required};
use crate::error::HalcError;
use crate::model::structs::{ElementNode, StructListNode, StructNode, StructSectionNode, ValuesSectionNode};
use crate::types::{
    ConfigParameter, ConfigParameterStruct, Element, ParameterStruct, StructGroup, ValueSet,
};
use crate::xml_path::XmlPath;

/// Resolves the parameter section and the three value sections of one level.
pub(super) fn resolve_value_set(
    parameters: Option<&StructSectionNode>,
    values: Option<&ValuesSectionNode>,
    channel_count: u32,
    parameters_path: &XmlPath,
    values_path: &XmlPath,
) -> Result<ValueSet, HalcError> {
    let section = |node: Option<&StructSectionNode>, name: &str| {
        resolve_section(node, channel_count, &values_path.child(name))
    };
    Ok(ValueSet {
        parameters: resolve_section(parameters, channel_count, parameters_path)?,
        input_values: section(values.and_then(|v| v.input_values.as_ref()), "input-values")?,
        output_values: section(values.and_then(|v| v.output_values.as_ref()), "output-values")?,
        status_values: section(values.and_then(|v| v.status_values.as_ref()), "status-values")?,
    })
}

/// Resolves one section. An absent section is empty.
fn resolve_section(
    node: Option<&StructSectionNode>,
    channel_count: u32,
    path: &XmlPath,
) -> Result<Vec<ParameterStruct>, HalcError> {
    let Some(list) = node.and_then(|n| n.parameter_structs.as_ref()) else {
        return Ok(Vec::new());
    };
    let list_path = path.child("parameter-structs");
    let structs = list
        .parameter_struct
        .iter()
        .enumerate()
        .map(|(i, s)| resolve_struct(s, channel_count, &list_path.indexed("parameter-struct", i)))
        .collect::<Result<Vec<_>, _>>()?;
    check_length(list.length.as_ref(), structs.len(), &list_path)?;
    log::debug!("Resolved {} parameter structs in {}", structs.len(), path);
    Ok(structs)
}

fn resolve_struct(
    node: &StructNode,
    channel_count: u32,
    path: &XmlPath,
) -> Result<ParameterStruct, HalcError> {
    if let Some(single) = &node.single_value {
        return resolve_element(single, channel_count, &path.child("single-value"))
            .map(ParameterStruct::Single);
    }
    let Some(parameters) = &node.parameters else {
        return Err(HalcError::MissingElement {
            element: "single-value",
            context: path.to_string(),
        });
    };
    let display = required(node.display.as_ref(), "display", path)?;
    let parameters_path = path.child("parameters");
    let elements = parameters
        .parameter
        .iter()
        .enumerate()
        .map(|(i, e)| resolve_element(e, channel_count, &parameters_path.indexed("parameter", i)))
        .collect::<Result<Vec<_>, _>>()?;
    check_length(parameters.length.as_ref(), elements.len(), &parameters_path)?;
    Ok(ParameterStruct::Group(StructGroup {
        display: display.to_string(),
        comment: node.comment.clone().unwrap_or_default(),
        elements,
    }))
}

fn resolve_element(node: &ElementNode, channel_count: u32, path: &XmlPath) -> Result<Element, HalcError> {
    let display = required(node.display.as_ref(), "display", path)?;
    let value_path = path.child("value");
    let value = resolve_element_value(required_value(node.value.as_ref(), path)?, channel_count, &value_path)?;
    Ok(Element {
        display: display.to_string(),
        comment: node.comment.clone().unwrap_or_default(),
        value,
    })
}

/// Resolves configured parameter values. Types are taken from the file itself.
pub(super) fn resolve_config_structs(
    node: Option<&StructListNode>,
    path: &XmlPath,
) -> Result<Vec<ConfigParameterStruct>, HalcError> {
    let Some(list) = node else {
        return Ok(Vec::new());
    };
    let list_path = path.child("parameter-structs");
    let structs = list
        .parameter_struct
        .iter()
        .enumerate()
        .map(|(i, s)| resolve_config_struct(s, &list_path.indexed("parameter-struct", i)))
        .collect::<Result<Vec<_>, _>>()?;
    check_length(list.length.as_ref(), structs.len(), &list_path)?;
    Ok(structs)
}

fn resolve_config_struct(node: &StructNode, path: &XmlPath) -> Result<ConfigParameterStruct, HalcError> {
    if let Some(single) = &node.single_value {
        return resolve_config_parameter(single, &path.child("single-value"))
            .map(ConfigParameterStruct::Single);
    }
    let Some(parameters) = &node.parameters else {
        return Err(HalcError::MissingElement {
            element: "single-value",
            context: path.to_string(),
        });
    };
    let parameters_path = path.child("parameters");
    let values = parameters
        .parameter
        .iter()
        .enumerate()
        .map(|(i, p)| resolve_config_parameter(p, &parameters_path.indexed("parameter", i)))
        .collect::<Result<Vec<_>, _>>()?;
    check_length(parameters.length.as_ref(), values.len(), &parameters_path)?;
    Ok(ConfigParameterStruct::Group(values))
}

fn resolve_config_parameter(node: &ElementNode, path: &XmlPath) -> Result<ConfigParameter, HalcError> {
    let value = resolve_content(required_value(node.value.as_ref(), path)?, &path.child("value"))?;
    Ok(ConfigParameter {
        value,
        comment: node.comment.clone().unwrap_or_default(),
    })
}
