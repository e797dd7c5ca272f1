use std::path::PathBuf;

use thiserror::Error;

use super::component::Component;

/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Debug, Error)]
pub enum Error {
    /// The input does not follow the generic URI grammar or the character
    /// rules of one of its components.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The input is a syntactically valid URI but the scheme policy bound to
    /// it rejects it.
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// None of the keys of a server environment table could be used to
    /// determine the host.
    #[error("hostname could not be detected")]
    HostnameNotDetected,

    /// A file used to build a data URI could not be read.
    #[error("the file `{}` does not exist or is not readable", .path.display())]
    UnreadableFile {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the semantic error, if this is one.
    #[must_use]
    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            Error::Semantic(error) => Some(error),
            _ => None,
        }
    }

    /// Determines if the error is a grammar-level failure.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    /// Determines if the error is a scheme policy rejection.
    #[must_use]
    pub fn is_semantic(&self) -> bool {
        matches!(self, Error::Semantic(_))
    }
}

/// A URI, or one of its components, does not conform to RFC 3986.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {} `{input}`: {reason}", subject(.component))]
pub struct SyntaxError {
    /// The offending component, or `None` when the whole input is at fault.
    pub component: Option<Component>,
    /// The offending raw text.
    pub input: String,
    /// What is wrong with it.
    pub reason: SyntaxReason,
}

impl SyntaxError {
    pub(crate) fn new<T>(component: Option<Component>, input: T, reason: SyntaxReason) -> Self
    where
        T: Into<String>,
    {
        Self {
            component,
            input: input.into(),
            reason,
        }
    }
}

fn subject(component: &Option<Component>) -> &'static str {
    component.map_or("URI", Component::name)
}

/// The grammar rule a [`SyntaxError`] violates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxReason {
    /// Nothing to parse.
    #[error("input is empty")]
    EmptyInput,

    /// A scheme must have at least one character.
    #[error("scheme is empty")]
    EmptyScheme,

    /// A character outside the component's allowed set.
    #[error("illegal character {character:?} at position {position}")]
    IllegalCharacter {
        /// The character found.
        character: char,
        /// Its byte offset in the component.
        position: usize,
    },

    /// `%` not followed by two hexadecimal digits.
    #[error("malformed percent-encoding at position {position}")]
    MalformedPercentEncoding {
        /// Byte offset of the `%`.
        position: usize,
    },

    /// The port contains something other than decimal digits.
    #[error("port must only contain decimal digits")]
    InvalidPort,

    /// The port does not fit in 16 bits.
    #[error("port is greater than 65535")]
    PortOutOfRange,

    /// A bracketed host is neither a valid IPv6 address nor a valid IPvFuture.
    #[error("invalid IP literal")]
    InvalidIpLiteral,

    /// Something other than a port follows a bracketed host.
    #[error("unexpected characters after IP literal")]
    TrailingCharactersAfterIpLiteral,

    /// With an authority, the path must be empty or start with `/`.
    #[error("path must be empty or begin with `/` when an authority is present")]
    RelativePathWithAuthority,

    /// Without an authority, the path must not start with `//`.
    #[error("path must not begin with `//` when no authority is present")]
    PathLooksLikeAuthority,

    /// Without a scheme or authority, the first path segment would be read
    /// back as a scheme.
    #[error("first path segment would be read as a scheme")]
    PathLooksLikeScheme,

    /// A data URI path with non US-ASCII characters.
    #[error("data path must only contain US-ASCII characters")]
    NonAsciiDataPath,

    /// A data URI path without the `,` separating media type and data.
    #[error("data path must contain a `,` separating the media type from the data")]
    MissingDataSeparator,
}

/// A syntactically valid URI is rejected by the scheme policy bound to it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{policy} URI rejected: {rule}")]
pub struct SemanticError {
    /// Name of the rejecting policy.
    pub policy: &'static str,
    /// The component the rule applies to, if any.
    pub component: Option<Component>,
    /// The rule which failed.
    pub rule: SemanticRule,
}

impl SemanticError {
    pub(crate) fn new(policy: &'static str, component: Option<Component>, rule: SemanticRule) -> Self {
        Self {
            policy,
            component,
            rule,
        }
    }
}

/// The scheme rule a [`SemanticError`] reports.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SemanticRule {
    /// The scheme is not in the policy's registry.
    #[error("scheme `{0}` is not supported")]
    UnsupportedScheme(String),

    /// The scheme is mandatory for this policy.
    #[error("a scheme is required")]
    MissingScheme,

    /// The host is present but empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// A scheme is present but the authority is not.
    #[error("an authority is required when a scheme is present")]
    MissingAuthority,

    /// The policy forbids this component.
    #[error("{0} is not allowed")]
    UnexpectedComponent(Component),

    /// The data URI mime type is not `type/subtype`.
    #[error("mime type `{0}` is invalid")]
    InvalidMimeType(String),

    /// A data URI media type parameter is not a `key=value` pair.
    #[error("media type parameter `{0}` is invalid")]
    InvalidParameter(String),

    /// The data URI payload is flagged as base64 but does not decode.
    #[error("data `{0}` is not valid base64")]
    InvalidBase64(String),

    /// The data URI payload decodes but is not in canonical form.
    #[error("data `{0}` is not canonically base64 encoded")]
    NonCanonicalBase64(String),
}
