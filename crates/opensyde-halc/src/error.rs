// crates/opensyde-halc/src/error.rs

use crate::availability::AvailabilityError;
use hex::FromHexError;
use quick_xml::Error as XmlError;
use quick_xml::errors::serialize::DeError;
use quick_xml::errors::serialize::SeError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// The coarse classes every `HalcError` falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file, element or expected root node is missing.
    NotFound,
    /// The document structure or an attribute could not be parsed.
    Malformed,
    /// The content parsed but is semantically inconsistent.
    Invalid,
    /// Unsupported `file-version`.
    VersionMismatch,
    /// Configuration and definition `content-version` disagree.
    ChecksumMismatch,
    /// Reading, writing, removing or creating a file system entry failed.
    IoFailure,
}

/// Errors that can occur while loading or saving HALC files.
#[derive(Debug)]
pub enum HalcError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` serializer.
    XmlSerializing(SeError),

    /// An error from the `quick-xml` reader (used for the root tag scan).
    XmlReading(XmlError),

    /// The embedded original definition content contained invalid hex.
    HexParsing(FromHexError),

    /// An error occurred during string formatting.
    FmtError(fmt::Error),

    /// A file system operation failed.
    Io { path: PathBuf, source: io::Error },

    /// The document root is not the expected node.
    UnexpectedRoot {
        expected: &'static str,
        found: Option<String>,
    },

    /// A required XML element was missing.
    MissingElement {
        element: &'static str,
        context: String,
    },

    /// A required attribute was missing.
    MissingAttribute {
        attribute: &'static str,
        context: String,
    },

    /// An attribute or text node had an invalid format.
    InvalidAttributeFormat {
        attribute: &'static str,
        value: String,
        context: String,
    },

    /// An availability expression could not be parsed.
    InvalidAvailability {
        attribute: &'static str,
        context: String,
        source: AvailabilityError,
    },

    /// The `file-version` is not supported.
    VersionMismatch { found: u32, expected: u32 },

    /// The configuration was written for another definition content version.
    ChecksumMismatch { definition: u32, configuration: u32 },

    /// A semantic check failed.
    ValidationError { context: String, message: String },
}

impl HalcError {
    /// Shorthand for a `ValidationError` at `context`.
    pub(crate) fn validation(context: impl fmt::Display, message: impl Into<String>) -> Self {
        HalcError::ValidationError {
            context: context.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HalcError::Io {
            path: path.into(),
            source,
        }
    }

    /// Maps this error onto one of the caller-facing error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HalcError::XmlParsing(_)
            | HalcError::XmlReading(_)
            | HalcError::HexParsing(_)
            | HalcError::MissingAttribute { .. }
            | HalcError::InvalidAttributeFormat { .. }
            | HalcError::InvalidAvailability { .. }
            | HalcError::XmlSerializing(_)
            | HalcError::FmtError(_) => ErrorKind::Malformed,
            HalcError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            HalcError::Io { .. } => ErrorKind::IoFailure,
            HalcError::UnexpectedRoot { .. } | HalcError::MissingElement { .. } => {
                ErrorKind::NotFound
            }
            HalcError::VersionMismatch { .. } => ErrorKind::VersionMismatch,
            HalcError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            HalcError::ValidationError { .. } => ErrorKind::Invalid,
        }
    }
}

impl From<DeError> for HalcError {
    fn from(e: DeError) -> Self {
        HalcError::XmlParsing(e)
    }
}

impl From<SeError> for HalcError {
    fn from(e: SeError) -> Self {
        HalcError::XmlSerializing(e)
    }
}

impl From<XmlError> for HalcError {
    fn from(e: XmlError) -> Self {
        HalcError::XmlReading(e)
    }
}

impl From<FromHexError> for HalcError {
    fn from(e: FromHexError) -> Self {
        HalcError::HexParsing(e)
    }
}

impl From<fmt::Error> for HalcError {
    fn from(e: fmt::Error) -> Self {
        HalcError::FmtError(e)
    }
}

impl fmt::Display for HalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalcError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            HalcError::XmlSerializing(e) => write!(f, "XML serializing error: {}", e),
            HalcError::XmlReading(e) => write!(f, "XML reading error: {}", e),
            HalcError::HexParsing(e) => write!(f, "Hex parsing error: {}", e),
            HalcError::FmtError(e) => write!(f, "Formatting error: {}", e),
            HalcError::Io { path, source } => {
                write!(f, "File access failed for \"{}\": {}", path.display(), source)
            }
            HalcError::UnexpectedRoot { expected, found } => match found {
                Some(found) => write!(
                    f,
                    "Unexpected root node \"{}\", expected \"{}\"",
                    found, expected
                ),
                None => write!(f, "Missing root node \"{}\"", expected),
            },
            HalcError::MissingElement { element, context } => {
                write!(f, "Missing required XML element \"{}\" in {}", element, context)
            }
            HalcError::MissingAttribute { attribute, context } => {
                write!(f, "Missing required attribute \"{}\" in {}", attribute, context)
            }
            HalcError::InvalidAttributeFormat {
                attribute,
                value,
                context,
            } => write!(
                f,
                "Invalid format for \"{}\" in {}: \"{}\"",
                attribute, context, value
            ),
            HalcError::InvalidAvailability {
                attribute,
                context,
                source,
            } => write!(f, "Invalid \"{}\" in {}: {}", attribute, context, source),
            HalcError::VersionMismatch { found, expected } => write!(
                f,
                "Unsupported file version {} (expected {})",
                found, expected
            ),
            HalcError::ChecksumMismatch {
                definition,
                configuration,
            } => write!(
                f,
                "Configuration references content version {} but the definition has content version {}",
                configuration, definition
            ),
            HalcError::ValidationError { context, message } => {
                write!(f, "Validation error in {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for HalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalcError::XmlParsing(e) => Some(e),
            HalcError::XmlSerializing(e) => Some(e),
            HalcError::XmlReading(e) => Some(e),
            HalcError::HexParsing(e) => Some(e),
            HalcError::FmtError(e) => Some(e),
            HalcError::Io { source, .. } => Some(source),
            HalcError::InvalidAvailability { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, HalcError};
    use std::io;

    #[test]
    fn test_from_de_error() {
        let xml_err = quick_xml::de::from_str::<u32>("<a>x</a>").unwrap_err();
        let halc_err: HalcError = xml_err.into();
        assert!(matches!(halc_err, HalcError::XmlParsing(_)));
        assert_eq!(halc_err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_serializing_errors_are_malformed() {
        let halc_err: HalcError = std::fmt::Error.into();
        assert_eq!(halc_err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_from_hex_error() {
        let hex_err = hex::decode("Z").unwrap_err();
        let halc_err: HalcError = hex_err.into();
        assert!(matches!(halc_err, HalcError::HexParsing(_)));
    }

    #[test]
    fn test_io_kind_depends_on_cause() {
        let missing = HalcError::io("a.xml", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let denied = HalcError::io("a.xml", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_validation_message_contains_context() {
        let err = HalcError::validation("domain[DI]", "no default use-case for channel 1");
        assert_eq!(err.kind(), ErrorKind::Invalid);
        let text = err.to_string();
        assert!(text.contains("domain[DI]"));
        assert!(text.contains("channel 1"));
    }
}
