// crates/opensyde-halc/src/resolver/validation.rs

//! Cross-checks run on fully resolved domains and definitions.

use crate::error::HalcError;
use crate::types::{Availability, Domain, ParameterStruct, ValueSet};
use crate::xml_path::XmlPath;
use std::collections::{BTreeMap, BTreeSet};

/// Runs all checks of one domain. The first violation aborts.
pub(super) fn validate_domain(domain: &Domain, path: &XmlPath) -> Result<(), HalcError> {
    check_use_case_ids(domain, path)?;
    check_default_coverage(domain, path)?;
    check_default_availability(domain, path)?;
    check_use_case_values(domain, path)?;
    check_display_names(&domain.domain_values, "domain", path)?;
    check_display_names(&domain.channel_values, "channel", path)?;
    Ok(())
}

fn check_use_case_ids(domain: &Domain, path: &XmlPath) -> Result<(), HalcError> {
    let mut ids = BTreeSet::new();
    for use_case in &domain.use_cases {
        if !ids.insert(use_case.id.as_str()) {
            return Err(HalcError::validation(
                path,
                format!("duplicate use-case id \"{}\"", use_case.id),
            ));
        }
    }
    Ok(())
}

/// Every channel needs exactly one default use-case.
fn check_default_coverage(domain: &Domain, path: &XmlPath) -> Result<(), HalcError> {
    if domain.use_cases.is_empty() {
        return Ok(());
    }
    for channel in 0..domain.channel_count() {
        let defaults = domain
            .use_cases
            .iter()
            .flat_map(|uc| uc.default_channels.iter())
            .filter(|c| **c == channel)
            .count();
        match defaults {
            0 => {
                return Err(HalcError::validation(
                    path,
                    format!("no default use-case for channel {}", channel),
                ));
            }
            1 => {}
            _ => {
                return Err(HalcError::validation(
                    path,
                    format!("ambiguous default use-case for channel {}", channel),
                ));
            }
        }
    }
    Ok(())
}

fn check_default_availability(domain: &Domain, path: &XmlPath) -> Result<(), HalcError> {
    for use_case in &domain.use_cases {
        for channel in &use_case.default_channels {
            if !use_case.availability.iter().any(|a| a.value_index == *channel) {
                return Err(HalcError::validation(
                    path,
                    format!(
                        "default channel {} not available for use-case \"{}\"",
                        channel, use_case.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_use_case_values(domain: &Domain, path: &XmlPath) -> Result<(), HalcError> {
    for (i, first) in domain.use_cases.iter().enumerate() {
        for second in &domain.use_cases[i + 1..] {
            if !first.value.same_type(&second.value) {
                return Err(HalcError::validation(
                    path,
                    format!(
                        "use-cases \"{}\" and \"{}\" have different value types",
                        first.id, second.id
                    ),
                ));
            }
            if first.value.value == second.value.value {
                return Err(HalcError::validation(
                    path,
                    format!(
                        "use-cases \"{}\" and \"{}\" have a duplicate value",
                        first.id, second.id
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Display names must be unique within each section: struct names among the
/// structs, element names among all elements.
fn check_display_names(values: &ValueSet, level: &str, path: &XmlPath) -> Result<(), HalcError> {
    for (section, structs) in values.sections() {
        let mut struct_names = BTreeSet::new();
        let mut element_names = BTreeSet::new();
        for parameter_struct in structs {
            let elements: Vec<&str> = match parameter_struct {
                ParameterStruct::Single(element) => vec![element.display.as_str()],
                ParameterStruct::Group(group) => {
                    group.elements.iter().map(|e| e.display.as_str()).collect()
                }
            };
            let duplicate = if !struct_names.insert(parameter_struct.display()) {
                Some(parameter_struct.display())
            } else {
                elements.into_iter().find(|name| !element_names.insert(*name))
            };
            if let Some(name) = duplicate {
                return Err(HalcError::validation(
                    path,
                    format!("duplicate display name \"{}\" in {}-{}", name, level, section),
                ));
            }
        }
    }
    Ok(())
}

/// Every member of a `{...}` group must list the same group.
pub(super) fn check_symmetric_groups(entries: &[Availability], path: &XmlPath) -> Result<(), HalcError> {
    let groups: BTreeMap<u32, BTreeSet<u32>> = entries
        .iter()
        .map(|entry| {
            let members = std::iter::once(entry.value_index)
                .chain(entry.dependent_values.iter().copied())
                .collect();
            (entry.value_index, members)
        })
        .collect();
    for (index, members) in &groups {
        for member in members {
            if groups.get(member) != Some(members) {
                return Err(HalcError::validation(
                    path,
                    format!("dependent channels of {} and {} do not match", index, member),
                ));
            }
        }
    }
    Ok(())
}

/// Domain ids must be unique within a definition.
pub(super) fn check_unique_domain_ids(domains: &[Domain], path: &XmlPath) -> Result<(), HalcError> {
    let mut ids = BTreeSet::new();
    for domain in domains {
        if !ids.insert(domain.id.as_str()) {
            return Err(HalcError::validation(
                path,
                format!("duplicate domain id \"{}\"", domain.id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{
        ChannelDef, ChannelUseCase, Element, Scalar, StructGroup, TypedContent,
    };

    fn use_case(id: &str, value: u8, defaults: Vec<u32>) -> ChannelUseCase {
        ChannelUseCase {
            id: id.to_string(),
            display: id.to_string(),
            value: TypedContent::plain(Scalar::U8(value)),
            availability: vec![Availability::single(0), Availability::single(1)],
            default_channels: defaults,
            comment: String::new(),
        }
    }

    fn domain(use_cases: Vec<ChannelUseCase>) -> Domain {
        Domain {
            id: "DI".to_string(),
            name: "Digital Input".to_string(),
            singular_name: "DI".to_string(),
            channels: vec![
                ChannelDef { name: "DI0".to_string() },
                ChannelDef { name: "DI1".to_string() },
            ],
            use_cases,
            ..Default::default()
        }
    }

    fn path() -> XmlPath {
        XmlPath::root("domain[DI]")
    }

    #[test]
    fn test_valid_domain_passes() {
        let d = domain(vec![use_case("A", 0, vec![0]), use_case("B", 1, vec![1])]);
        assert!(validate_domain(&d, &path()).is_ok());
    }

    #[test]
    fn test_uncovered_channel_fails() {
        let d = domain(vec![use_case("A", 0, vec![0])]);
        let err = validate_domain(&d, &path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert!(err.to_string().contains("no default use-case for channel 1"));
    }

    #[test]
    fn test_ambiguous_default_fails() {
        let d = domain(vec![use_case("A", 0, vec![0, 1]), use_case("B", 1, vec![0])]);
        let err = validate_domain(&d, &path()).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_default_must_be_available() {
        let mut a = use_case("A", 0, vec![0, 1]);
        a.availability = vec![Availability::single(0)];
        let err = validate_domain(&domain(vec![a]), &path()).unwrap_err();
        assert!(err.to_string().contains("not available"));
    }

    #[test]
    fn test_use_case_values_type_and_duplicates() {
        let mut b = use_case("B", 1, vec![1]);
        b.value = TypedContent::plain(Scalar::U16(1));
        let err = validate_domain(&domain(vec![use_case("A", 0, vec![0]), b]), &path()).unwrap_err();
        assert!(err.to_string().contains("different value types"));

        let d = domain(vec![use_case("A", 3, vec![0]), use_case("B", 3, vec![1])]);
        let err = validate_domain(&d, &path()).unwrap_err();
        assert!(err.to_string().contains("duplicate value"));
    }

    #[test]
    fn test_duplicate_display_name_in_channel_parameters() {
        let speed = |value| Element {
            display: "Speed".to_string(),
            value: crate::types::ElementValue {
                content: TypedContent::plain(Scalar::U8(value)),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut d = domain(Vec::new());
        d.channel_values.parameters = vec![
            ParameterStruct::Single(speed(1)),
            ParameterStruct::Group(StructGroup {
                display: "Limits".to_string(),
                comment: String::new(),
                elements: vec![speed(2)],
            }),
        ];
        let err = validate_domain(&d, &path()).unwrap_err();
        assert!(err.to_string().contains("\"Speed\" in channel-parameters"));

        // The same name in another section is fine.
        let mut d = domain(Vec::new());
        d.channel_values.parameters = vec![ParameterStruct::Single(speed(1))];
        d.channel_values.status_values = vec![ParameterStruct::Single(speed(1))];
        assert!(validate_domain(&d, &path()).is_ok());
    }

    #[test]
    fn test_asymmetric_group_fails() {
        let entries = vec![
            Availability {
                value_index: 0,
                dependent_values: vec![1],
            },
            Availability::single(1),
        ];
        assert!(check_symmetric_groups(&entries, &path()).is_err());

        let entries = vec![
            Availability {
                value_index: 0,
                dependent_values: vec![1],
            },
            Availability {
                value_index: 1,
                dependent_values: vec![0],
            },
        ];
        assert!(check_symmetric_groups(&entries, &path()).is_ok());
    }
}
