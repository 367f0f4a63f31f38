use std::fmt::Display;
use std::str::Utf8Error;

use serde::{de, ser};

use crate::value::Kind;

/// Boxed error returned by `Marshaler` / `Unmarshaler` implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for `serde_qp`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The top-level value is not a struct-shaped record.
    #[error("expected struct but got {found}")]
    Type { found: &'static str },

    /// A field has no built-in conversion and no capability implementation.
    #[error("field {field:?}: unsupported type {kind}")]
    UnsupportedType { field: String, kind: &'static str },

    /// Malformed scalar text on the decode path.
    #[error("cannot parse {value:?} as {kind}: {source}")]
    Parse {
        kind: Kind,
        value: String,
        #[source]
        source: BoxError,
    },

    /// Wraps a failure with the resolved key of the field it occurred on.
    #[error("field {key:?}: {source}")]
    Field {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// Error raised by a `Marshaler` or `Unmarshaler` implementation.
    #[error(transparent)]
    Capability(BoxError),

    /// Custom message raised through `serde`.
    #[error("{0}")]
    Custom(String),

    /// Invalid UTF-8 in a percent-decoded query string.
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
}

/// Text is not one of the accepted spellings.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid syntax")]
pub struct InvalidSyntax;

/// Text describes a number outside of the destination's range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("value out of range")]
pub struct OutOfRange;

impl Error {
    /// Generate error to show top-level type cannot be converted.
    pub fn top_level(found: &'static str) -> Self {
        Error::Type { found }
    }

    pub(crate) fn unsupported(field: impl Into<String>, kind: &'static str) -> Self {
        Error::UnsupportedType {
            field: field.into(),
            kind,
        }
    }

    pub(crate) fn parse<E>(kind: Kind, value: &str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Parse {
            kind,
            value: value.to_owned(),
            source: source.into(),
        }
    }

    pub(crate) fn capability<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Capability(source.into())
    }

    /// Attach the resolved key of the failing field.
    ///
    /// Errors that already carry a key are returned unchanged.
    pub fn with_key(self, key: impl Into<String>) -> Self {
        match self {
            Error::Field { .. } => self,
            other => Error::Field {
                key: key.into(),
                source: Box::new(other),
            },
        }
    }

    /// Resolved key of the field this error occurred on, if known.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Field { key, .. } => Some(key),
            Error::UnsupportedType { field, .. } => Some(field),
            _ => None,
        }
    }

    /// The error with any field wrapper removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the underlying failure is malformed scalar text.
    pub fn is_parse(&self) -> bool {
        matches!(self.root(), Error::Parse { .. })
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_wrapper_is_not_nested() {
        let err = Error::parse(Kind::Int, "abc", InvalidSyntax)
            .with_key("count")
            .with_key("other");
        assert_eq!(err.key(), Some("count"));
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "field \"count\": cannot parse \"abc\" as int: invalid syntax"
        );
    }

    #[test]
    fn capability_is_transparent() {
        let err = Error::capability(InvalidSyntax);
        assert_eq!(err.to_string(), "invalid syntax");
        assert!(!err.is_parse());
        assert_eq!(err.key(), None);
    }
}
