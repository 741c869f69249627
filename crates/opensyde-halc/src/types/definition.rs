// crates/opensyde-halc/src/types/definition.rs

//! The immutable device definition (`opensyde-HALC-description`).

use super::content::{Scalar, TypedContent};
use crate::constants::DEFAULT_RESERVED_LIST_SIZE;

/// Represents a fully parsed and validated HALC definition file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Definition {
    /// `<content-version>`
    pub content_version: u32,
    /// `<device-name>`
    pub device_name: String,
    /// `<safety-mode>`
    pub safety_mode: SafetyMode,
    /// `<number-of-configuration-copies>` (1 to 4)
    pub num_config_copies: u8,
    /// `<nvm-config>`
    pub nvm: NvmConfig,
    /// All `<domain>` blocks, in file order.
    pub domains: Vec<Domain>,
}

impl Definition {
    pub fn domain_by_id(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }
}

/// How many configuration levels exist and whether dropping is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafetyMode {
    #[default]
    TwoLevelsWithDropping,
    TwoLevelsWithoutDropping,
    OneLevelAllSafe,
    OneLevelAllNonSafe,
}

impl SafetyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SafetyMode::TwoLevelsWithDropping => "two-levels-with-dropping",
            SafetyMode::TwoLevelsWithoutDropping => "two-levels-without-dropping",
            SafetyMode::OneLevelAllSafe => "one-level-all-safe",
            SafetyMode::OneLevelAllNonSafe => "one-level-all-non-safe",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "two-levels-with-dropping" => Some(SafetyMode::TwoLevelsWithDropping),
            "two-levels-without-dropping" => Some(SafetyMode::TwoLevelsWithoutDropping),
            "one-level-all-safe" => Some(SafetyMode::OneLevelAllSafe),
            "one-level-all-non-safe" => Some(SafetyMode::OneLevelAllNonSafe),
            _ => None,
        }
    }

    /// Whether the NVM layout has a safe datapool per copy.
    pub fn has_safe_datapools(self) -> bool {
        self != SafetyMode::OneLevelAllNonSafe
    }

    /// Whether the NVM layout has a non-safe datapool per copy.
    pub fn has_non_safe_datapools(self) -> bool {
        self != SafetyMode::OneLevelAllSafe
    }
}

/// Represents the `<nvm-config>` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NvmConfig {
    /// `@active`
    pub active: bool,
    /// Safe datapool start offsets, one per configuration copy.
    pub safe_offsets: Vec<u32>,
    /// Non-safe datapool start offsets, one per configuration copy.
    pub non_safe_offsets: Vec<u32>,
    /// `<lists-reserved-size>`
    pub reserved_sizes: ReservedListSizes,
}

/// Represents `<lists-reserved-size>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedListSizes {
    pub parameters: u32,
    pub input_values: u32,
    pub output_values: u32,
    pub status_values: u32,
}

impl Default for ReservedListSizes {
    fn default() -> Self {
        Self {
            parameters: DEFAULT_RESERVED_LIST_SIZE,
            input_values: DEFAULT_RESERVED_LIST_SIZE,
            output_values: DEFAULT_RESERVED_LIST_SIZE,
            status_values: DEFAULT_RESERVED_LIST_SIZE,
        }
    }
}

/// Represents `<category>` of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainCategory {
    Input,
    Output,
    #[default]
    Other,
}

impl DomainCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DomainCategory::Input => "input",
            DomainCategory::Output => "output",
            DomainCategory::Other => "other",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "input" => Some(DomainCategory::Input),
            "output" => Some(DomainCategory::Output),
            "other" => Some(DomainCategory::Other),
            _ => None,
        }
    }
}

/// A logical grouping of the device's I/O capability (`<domain>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Domain {
    /// `@id`, stable across definition versions.
    pub id: String,
    pub name: String,
    pub singular_name: String,
    pub category: DomainCategory,
    pub channels: Vec<ChannelDef>,
    pub use_cases: Vec<ChannelUseCase>,
    /// Values that exist once per domain.
    pub domain_values: ValueSet,
    /// Values that exist once per channel.
    pub channel_values: ValueSet,
}

impl Domain {
    pub fn channel_count(&self) -> u32 {
        self.channels.len() as u32
    }

    /// Index of the use-case that is the default for `channel`.
    pub fn default_use_case_index(&self, channel: u32) -> Option<u32> {
        self.use_cases
            .iter()
            .position(|uc| uc.default_channels.contains(&channel))
            .map(|i| i as u32)
    }
}

/// Represents one `<channel>` of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelDef {
    pub name: String,
}

/// A named operating mode a channel can be set to (`<channel-use-case>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelUseCase {
    pub id: String,
    pub display: String,
    /// Discriminator value a channel holds when this use-case is selected.
    pub value: TypedContent,
    /// Channels that can use this use-case.
    pub availability: Vec<Availability>,
    /// Channels for which this use-case is the default.
    pub default_channels: Vec<u32>,
    pub comment: String,
}

/// One entry of an availability expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Availability {
    /// Channel index.
    pub value_index: u32,
    /// Other channels bundled with this one by `{...}` group notation.
    pub dependent_values: Vec<u32>,
}

impl Availability {
    pub fn single(value_index: u32) -> Self {
        Availability {
            value_index,
            dependent_values: Vec::new(),
        }
    }
}

/// The four value sections of one level (domain or channel).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSet {
    pub parameters: Vec<ParameterStruct>,
    pub input_values: Vec<ParameterStruct>,
    pub output_values: Vec<ParameterStruct>,
    pub status_values: Vec<ParameterStruct>,
}

impl ValueSet {
    /// The sections paired with their node names.
    pub fn sections(&self) -> [(&'static str, &[ParameterStruct]); 4] {
        [
            ("parameters", self.parameters.as_slice()),
            ("input-values", self.input_values.as_slice()),
            ("output-values", self.output_values.as_slice()),
            ("status-values", self.status_values.as_slice()),
        ]
    }
}

/// A `<parameter-struct>`: either one typed element or a named group of elements.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterStruct {
    Single(Element),
    Group(StructGroup),
}

impl ParameterStruct {
    pub fn display(&self) -> &str {
        match self {
            ParameterStruct::Single(element) => &element.display,
            ParameterStruct::Group(group) => &group.display,
        }
    }
}

/// The grouped form of a `ParameterStruct`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructGroup {
    pub display: String,
    pub comment: String,
    pub elements: Vec<Element>,
}

/// One typed template element (`<single-value>` or `<parameter>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub display: String,
    pub comment: String,
    pub value: ElementValue,
}

/// The template `<value>` of an element: default content plus its constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementValue {
    pub content: TypedContent,
    /// Permitted range; only present for plain scalar types.
    pub range: Option<ValueRange>,
    /// Channels this element applies to.
    pub availability: Vec<Availability>,
}

/// Inclusive `[min, max]` range of a plain value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: Scalar,
    pub max: Scalar,
}
