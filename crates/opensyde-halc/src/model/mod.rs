//! Internal `serde` data structures that map directly to the HALC XML files.
//!
//! Both document types are described here: the definition
//! (`opensyde-HALC-description`) and the configuration
//! (`opensyde-node-io-config`). Every scalar is kept as a string so the
//! resolver can report missing and malformed values with their location.
//! These structs are not intended for direct public use.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

pub mod config;
pub mod description;
pub mod structs;

// Re-export key components for internal use
pub use config::NodeIoConfig;
pub use description::HalcDescription;
