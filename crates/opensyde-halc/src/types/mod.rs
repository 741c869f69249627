// crates/opensyde-halc/src/types/mod.rs

//! Public, ergonomic data structures for parsed HALC definitions and configurations.

mod configuration;
mod content;
mod definition;

pub use configuration::{
    ConfigChannel, ConfigDomain, ConfigParameter, ConfigParameterStruct, Configuration,
    DefinitionSource,
};
pub use content::{
    BitMaskItem, ContentKind, ContentValue, EnumItem, Scalar, ScalarType, TypedContent,
};
pub use definition::{
    Availability, ChannelDef, ChannelUseCase, Definition, Domain, DomainCategory, Element,
    ElementValue, NvmConfig, ParameterStruct, ReservedListSizes, SafetyMode, StructGroup,
    ValueRange, ValueSet,
};
