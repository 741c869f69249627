// crates/opensyde-halc/src/resolver/config.rs

//! Applies the `<domains>` of a configuration document onto the initial
//! configuration built from its definition.

use super::structs::resolve_config_structs;
use super::utils::{
    check_file_version, check_length, parse_bool, parse_number, parse_required_number, required,
    required_element, required_text,
};
use crate::constants::CONFIGURATION_ROOT_NODE;
use crate::error::HalcError;
use crate::model::config::{ConfigChannelNode, ConfigDomainNode, NodeIoConfig};
use crate::types::{ConfigChannel, ConfigDomain, Configuration, Domain};
use crate::xml_path::XmlPath;

/// Checks versions and overwrites the domains of `configuration` with the file content.
pub(crate) fn resolve_configuration(
    model: &NodeIoConfig,
    configuration: &mut Configuration,
) -> Result<(), HalcError> {
    let path = XmlPath::root(CONFIGURATION_ROOT_NODE);
    check_file_version(model.file_version.as_ref(), &path)?;

    let reference: u32 = parse_number(
        required_text(model.ref_content_version.as_ref(), "ref-content-version", &path)?,
        "ref-content-version",
        &path,
    )?;
    if reference != configuration.content_version() {
        return Err(HalcError::ChecksumMismatch {
            definition: configuration.content_version(),
            configuration: reference,
        });
    }
    // <general> is write-only.

    let domains_path = path.child("domains");
    let domains = required_element(model.domains.as_ref(), "domains", &path)?;
    for (index, node) in domains.domain.iter().enumerate() {
        let domain_path = domains_path.indexed("domain", index);
        let definition = configuration.shared_definition();
        let (Some(mut domain), Some(domain_def)) =
            (configuration.domain(index).cloned(), definition.domains.get(index))
        else {
            return Err(HalcError::validation(
                &domain_path,
                "domain count higher than in the definition",
            ));
        };
        resolve_config_domain(node, domain_def, &mut domain, &domain_path)?;
        configuration.set_domain_config(index, domain)?;
    }
    check_length(domains.length.as_ref(), domains.domain.len(), &domains_path)?;
    log::debug!("Resolved {} configured domains", domains.domain.len());
    Ok(())
}

/// The domain config is overwritten, the channel list is replaced as a whole.
fn resolve_config_domain(
    node: &ConfigDomainNode,
    definition: &Domain,
    domain: &mut ConfigDomain,
    path: &XmlPath,
) -> Result<(), HalcError> {
    let config_path = path.child("config");
    domain.domain_config = resolve_config_channel(
        required_element(node.config.as_ref(), "config", path)?,
        &config_path,
    )?;

    let channels_path = path.child("channels");
    let channels = required_element(node.channels.as_ref(), "channels", path)?;
    let channel_configs = channels
        .channel
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            let channel_path = channels_path.indexed("channel", i);
            let config = resolve_config_channel(channel, &channel_path)?;
            if !definition.use_cases.is_empty()
                && config.use_case_index as usize >= definition.use_cases.len()
            {
                return Err(HalcError::validation(
                    &channel_path,
                    format!(
                        "use-case-index {} exceeds the {} use-cases of domain \"{}\"",
                        config.use_case_index,
                        definition.use_cases.len(),
                        definition.id
                    ),
                ));
            }
            Ok(config)
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_length(channels.length.as_ref(), channel_configs.len(), &channels_path)?;
    if channel_configs.len() != definition.channels.len() {
        return Err(HalcError::validation(
            &channels_path,
            format!(
                "{} channels configured but domain \"{}\" defines {}",
                channel_configs.len(),
                definition.id,
                definition.channels.len()
            ),
        ));
    }
    domain.channel_configs = channel_configs;
    Ok(())
}

fn resolve_config_channel(node: &ConfigChannelNode, path: &XmlPath) -> Result<ConfigChannel, HalcError> {
    let safety_relevant = parse_bool(
        required(node.safety_relevant.as_ref(), "safety-relevant", path)?,
        "safety-relevant",
        path,
    )?;
    let use_case_index = parse_required_number(node.use_case_index.as_ref(), "use-case-index", path)?;
    Ok(ConfigChannel {
        safety_relevant,
        use_case_index,
        name: node.name.clone().unwrap_or_default(),
        comment: node.comment.clone().unwrap_or_default(),
        parameters: resolve_config_structs(node.parameter_structs.as_ref(), path)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::config::{ConfigChannelsNode, ConfigDomainsNode};
    use crate::types::{ChannelDef, Definition, DefinitionSource};
    use std::sync::Arc;

    fn configuration(channels: usize) -> Configuration {
        let definition = Definition {
            content_version: 6,
            device_name: "Device".to_string(),
            num_config_copies: 1,
            domains: vec![Domain {
                id: "DI".to_string(),
                name: "Digital".to_string(),
                channels: (0..channels)
                    .map(|i| ChannelDef {
                        name: format!("DI{}", i),
                    })
                    .collect(),
                ..Default::default()
            }],
            ..Default::default()
        };
        Configuration::new(
            Arc::new(definition),
            DefinitionSource::External {
                relative_path: "device.syde_halc_def".to_string(),
            },
        )
    }

    fn channel(name: &str) -> ConfigChannelNode {
        ConfigChannelNode {
            safety_relevant: Some("true".to_string()),
            use_case_index: Some("0".to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn model(version: &str, domains: Vec<ConfigDomainNode>) -> NodeIoConfig {
        NodeIoConfig {
            file_version: Some("1".to_string()),
            ref_content_version: Some(version.to_string()),
            domains: Some(ConfigDomainsNode {
                length: Some(domains.len().to_string()),
                domain: domains,
            }),
            ..Default::default()
        }
    }

    fn domain_node(channels: usize) -> ConfigDomainNode {
        ConfigDomainNode {
            config: Some(channel("Digital")),
            channels: Some(ConfigChannelsNode {
                length: Some(channels.to_string()),
                channel: (0..channels).map(|i| channel(&format!("Input {}", i))).collect(),
            }),
        }
    }

    #[test]
    fn test_domains_are_overwritten() {
        let mut config = configuration(2);
        resolve_configuration(&model("6", vec![domain_node(2)]), &mut config).unwrap();
        let domain = config.domain(0).unwrap();
        assert_eq!(domain.channel_configs[1].name, "Input 1");
        assert!(domain.channel_configs[1].safety_relevant);
    }

    #[test]
    fn test_content_version_mismatch() {
        let mut config = configuration(2);
        let err = resolve_configuration(&model("5", vec![domain_node(2)]), &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn test_more_domains_than_defined() {
        let mut config = configuration(1);
        let err = resolve_configuration(&model("6", vec![domain_node(1), domain_node(1)]), &mut config)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert!(err.to_string().contains("domain count higher than in the definition"));
    }

    #[test]
    fn test_channel_count_must_match_definition() {
        let mut config = configuration(3);
        let err = resolve_configuration(&model("6", vec![domain_node(2)]), &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }
}
