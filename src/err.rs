use std::{error, fmt};

/// Errors that can occur when extracting from, or encoding to, a configuration tree.
///
/// Every failure is raised synchronously at the point of detection and propagates up the
/// recursive decode/encode call chain unmodified. The one exception is [`Error::BadPath`], an
/// umbrella raised when a destructuring produced nothing at all; a failure that already carries a
/// specific cause (a type mismatch, a named missing field) is never re-wrapped into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A type descriptor's arguments do not match the arity its classification requires.
    ///
    /// Unreachable through [`FromConf`](crate::FromConf) — the compiler resolves generic
    /// arguments — but hand-assembled descriptors from custom registry builders are checked at
    /// resolution, before any tree access.
    UnresolvableType(&'static str),
    /// No registered decoder matches the type, or a value's runtime shape cannot be encoded.
    UnsupportedType(&'static str),
    /// A string leaf did not match any of the enum's constant names.
    InvalidEnumValue {
        /// The string read from the tree.
        value: String,
        /// The constant names that would have matched.
        allowed: &'static [&'static str],
    },
    /// A required field (not optional, no default) has no node at its path.
    MissingField(String),
    /// Extraction could not produce a value of the requested type at this path at all.
    BadPath(String),
    /// The named-path extraction entry point was called with an empty path. Root extraction is a
    /// separate, explicit call.
    EmptyPath,
    /// A node exists but is not of the kind the type requires.
    WrongType {
        /// Path of the offending node.
        path: String,
        /// The kind the decoder wanted.
        expected: &'static str,
        /// The kind (or range problem) it found.
        found: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnresolvableType(name) => {
                write!(f, "type descriptor for '{}' has mismatched arguments", name)
            }
            Error::UnsupportedType(name) => write!(f, "unsupported type '{}'", name),
            Error::InvalidEnumValue { value, allowed } => write!(
                f,
                "invalid enum value '{}', expected one of [{}]",
                value,
                allowed.join(", ")
            ),
            Error::MissingField(path) => write!(f, "missing required field at '{}'", path),
            Error::BadPath(path) => {
                write!(f, "no value of the requested type at '{}'", path)
            }
            Error::EmptyPath => write!(f, "path must not be empty, use root extraction instead"),
            Error::WrongType {
                path,
                expected,
                found,
            } => write!(f, "expected {} at '{}', found {}", expected, path, found),
        }
    }
}

impl error::Error for Error {}
