//! Custom error types for metadata processing

use std::fmt;
use std::io;

use quick_xml::events::attributes::AttrError;

/// Metadata-specific error types
#[derive(Debug)]
pub enum MetadataError {
    /// I/O error
    IoError(io::Error),
    /// The XML document is not well-formed
    XmlError(quick_xml::Error),
    /// The XML document has no `bands` container
    MissingBandsContainer,
    /// Malformed input that is not an XML syntax problem
    ParseError(String),
    /// A required key was not found under any known schema
    LookupError(String),
    /// A metadata value could not be interpreted
    InvalidValue { key: String, value: String },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::IoError(e) => write!(f, "I/O error: {}", e),
            MetadataError::XmlError(e) => write!(f, "XML parse error: {}", e),
            MetadataError::MissingBandsContainer => write!(f, "XML parse error: no <bands> element found"),
            MetadataError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            MetadataError::LookupError(key) => write!(f, "Metadata key not found: {}", key),
            MetadataError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
            MetadataError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::IoError(e) => Some(e),
            MetadataError::XmlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MetadataError {
    fn from(error: io::Error) -> Self {
        MetadataError::IoError(error)
    }
}

impl From<quick_xml::Error> for MetadataError {
    fn from(error: quick_xml::Error) -> Self {
        MetadataError::XmlError(error)
    }
}

impl From<AttrError> for MetadataError {
    fn from(error: AttrError) -> Self {
        MetadataError::XmlError(quick_xml::Error::InvalidAttr(error))
    }
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

impl From<String> for MetadataError {
    fn from(msg: String) -> Self {
        MetadataError::GenericError(msg)
    }
}

impl MetadataError {
    /// True for the error kinds that mean "the input could not be parsed"
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            MetadataError::XmlError(_)
                | MetadataError::MissingBandsContainer
                | MetadataError::ParseError(_)
                | MetadataError::InvalidValue { .. }
        )
    }
}
