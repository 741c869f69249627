// crates/opensyde-halc/src/constants.rs

//! Fixed values of the HALC file formats.

/// The only `file-version` both document types are written with and accepted in.
pub const HALC_FILE_VERSION: u32 = 1;

/// Root node of a definition document.
pub const DEFINITION_ROOT_NODE: &str = "opensyde-HALC-description";

/// Root node of a configuration document.
pub const CONFIGURATION_ROOT_NODE: &str = "opensyde-node-io-config";

/// Upper bound of `number-of-configuration-copies`.
pub const MAX_CONFIG_COPIES: u8 = 4;

/// Reserved list size used when the definition has no `nvm-config` block.
pub const DEFAULT_RESERVED_LIST_SIZE: u32 = 100;

/// Default global identifier length limit.
pub const DEFAULT_NAME_MAX_CHAR_LIMIT: usize = 31;

/// Characters of an identifier reserved for generated suffixes.
pub const RESERVED_IDENTIFIER_CHARS: usize = 13;

/// Largest `array-size` accepted for array values.
pub const MAX_ARRAY_SIZE: u32 = 65_535;
