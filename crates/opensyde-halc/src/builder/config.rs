// crates/opensyde-halc/src/builder/config.rs

//! Contains builder functions to convert a `types::Configuration` into `model::NodeIoConfig`.

use super::structs::build_config_structs;
use crate::constants::HALC_FILE_VERSION;
use crate::model::config::{
    ConfigChannelNode, ConfigChannelsNode, ConfigDomainNode, ConfigDomainsNode, GeneralNode,
    IoBaseFileNode, NodeIoConfig,
};
use crate::types::{ConfigChannel, ConfigDomain, Configuration};

/// Builds the configuration model around an already prepared `<io-base-file>`.
pub(crate) fn build_node_io_config(
    configuration: &Configuration,
    io_base_file: IoBaseFileNode,
) -> NodeIoConfig {
    let domains = configuration.domains();
    NodeIoConfig {
        file_version: Some(HALC_FILE_VERSION.to_string()),
        ref_content_version: Some(configuration.content_version().to_string()),
        io_base_file: Some(io_base_file),
        // Legacy datablock assignment, kept for older tools.
        general: Some(GeneralNode::default()),
        domains: Some(ConfigDomainsNode {
            length: Some(domains.len().to_string()),
            domain: domains.iter().map(build_domain).collect(),
        }),
    }
}

fn build_domain(domain: &ConfigDomain) -> ConfigDomainNode {
    ConfigDomainNode {
        config: Some(build_channel(&domain.domain_config)),
        channels: Some(ConfigChannelsNode {
            length: Some(domain.channel_configs.len().to_string()),
            channel: domain.channel_configs.iter().map(build_channel).collect(),
        }),
    }
}

fn build_channel(channel: &ConfigChannel) -> ConfigChannelNode {
    ConfigChannelNode {
        safety_relevant: Some(channel.safety_relevant.to_string()),
        use_case_index: Some(channel.use_case_index.to_string()),
        name: Some(channel.name.clone()),
        comment: Some(channel.comment.clone()),
        parameter_structs: Some(build_config_structs(&channel.parameters)),
    }
}
