use std::{borrow::Cow, path::Path};

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64},
        DecodePaddingMode,
    },
    Engine as _,
};
use once_cell::sync::Lazy;

use super::{
    character_classes::MIME_TOKEN,
    codec::{encode, percent_decode},
    component::Component,
    error::{Error, SemanticError, SemanticRule, SyntaxError, SyntaxReason},
    media_type::sniff,
    policy::{SchemePolicy, SchemeRegistry},
    uri::{Components, Uri},
};

static DATA_SCHEMES: Lazy<SchemeRegistry> =
    Lazy::new(|| SchemeRegistry::new([("data", None)]).unwrap_or_default());

const DEFAULT_MIME_TYPE: &str = "text/plain";
const DEFAULT_PARAMETERS: &str = "charset=us-ascii";
const BINARY_FLAG: &str = "base64";

// Accepts any padding and trailing bits, so that non-canonical payloads can
// be told apart from undecodable ones.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The policy of `data` URIs ([RFC 2397](https://tools.ietf.org/html/rfc2397)).
///
/// A data URI has the `data` scheme and a path only.  The path is
/// `mimetype;parameters,data` where an empty mimetype stands for
/// `text/plain` and empty parameters for `charset=us-ascii`; both defaults
/// are written out when the URI is built.  When the parameters end with the
/// `base64` flag, the data must be canonical base64.
///
/// ```rust
/// use uri_schemes::{Data, Uri};
///
/// let uri = Uri::<Data>::parse("data:,A%20brief%20note").unwrap();
/// assert_eq!("data:text/plain;charset=us-ascii,A%20brief%20note", uri.to_string());
/// assert_eq!(b"A brief note".to_vec(), uri.decoded_data());
///
/// let uri = Uri::<Data>::parse("data:text/plain;base64,SGVsbG8=").unwrap();
/// assert!(uri.is_binary());
/// assert_eq!(b"Hello".to_vec(), uri.decoded_data());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Data {
    registry: SchemeRegistry,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            registry: DATA_SCHEMES.clone(),
        }
    }
}

impl Data {
    fn reject(&self, rule: SemanticRule) -> Error {
        SemanticError::new(self.name(), Some(Component::Path), rule).into()
    }

    fn filter_path<'a>(&self, path: &'a str) -> Result<Cow<'a, str>, Error> {
        if path.is_empty() {
            return Ok(Cow::Owned(format!("{};{},", DEFAULT_MIME_TYPE, DEFAULT_PARAMETERS)));
        }
        if !path.is_ascii() {
            return Err(SyntaxError::new(Some(Component::Path), path, SyntaxReason::NonAsciiDataPath).into());
        }
        let (media_type, data) = path.split_once(',').ok_or_else(|| {
            SyntaxError::new(Some(Component::Path), path, SyntaxReason::MissingDataSeparator)
        })?;
        let (mime_type, parameters) = media_type.split_once(';').unwrap_or((media_type, ""));
        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };
        let parameters = if parameters.is_empty() {
            DEFAULT_PARAMETERS
        } else {
            parameters
        };
        self.check_mime_type(mime_type)?;
        let (parameters_without_flag, is_binary) = split_binary_flag(parameters);
        self.check_parameters(parameters_without_flag)?;
        if is_binary {
            self.check_base64(data)?;
        }
        let filtered = format!("{};{},{}", mime_type, parameters, data);
        if filtered == path {
            Ok(Cow::Borrowed(path))
        } else {
            Ok(Cow::Owned(filtered))
        }
    }

    fn check_mime_type(&self, mime_type: &str) -> Result<(), Error> {
        // The mimetype is still percent-encoded here; a triplet never spells a token.
        let is_token = |s: &str| {
            !s.is_empty() && s.chars().all(|c| c != '%' && MIME_TOKEN.contains(&c))
        };
        match mime_type.split_once('/') {
            Some((kind, subtype)) if is_token(kind) && is_token(subtype) => Ok(()),
            _ => Err(self.reject(SemanticRule::InvalidMimeType(mime_type.to_string()))),
        }
    }

    fn check_parameters(&self, parameters: &str) -> Result<(), Error> {
        for parameter in parameters.split(';').filter(|parameter| !parameter.is_empty()) {
            let valid = match parameter.split_once('=') {
                Some((key, value)) => {
                    !key.is_empty() && !value.contains('=') && !key.eq_ignore_ascii_case(BINARY_FLAG)
                }
                None => false,
            };
            if !valid {
                return Err(self.reject(SemanticRule::InvalidParameter(parameter.to_string())));
            }
        }
        Ok(())
    }

    fn check_base64(&self, data: &str) -> Result<(), Error> {
        let decoded = LENIENT_BASE64
            .decode(data)
            .map_err(|_| self.reject(SemanticRule::InvalidBase64(data.to_string())))?;
        if BASE64.encode(decoded) != data {
            return Err(self.reject(SemanticRule::NonCanonicalBase64(data.to_string())));
        }
        Ok(())
    }
}

impl SchemePolicy for Data {
    fn name(&self) -> &'static str {
        "data"
    }

    fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    fn filter_component<'a>(&self, component: Component, value: &'a str) -> Result<Cow<'a, str>, Error> {
        match component {
            Component::Path => self.filter_path(value),
            _ => Ok(Cow::Borrowed(value)),
        }
    }

    fn check(&self, uri: &Uri<Self>) -> Result<(), SemanticError> {
        let reject = |component: Component, rule: SemanticRule| {
            Err(SemanticError::new(self.name(), Some(component), rule))
        };
        match uri.scheme() {
            None => return reject(Component::Scheme, SemanticRule::MissingScheme),
            Some(scheme) if !self.registry.contains(scheme) => {
                return reject(
                    Component::Scheme,
                    SemanticRule::UnsupportedScheme(scheme.to_string()),
                )
            }
            Some(_) => {}
        }
        if uri.authority().is_some() {
            return reject(Component::Host, SemanticRule::UnexpectedComponent(Component::Host));
        }
        if uri.query().is_some() {
            return reject(Component::Query, SemanticRule::UnexpectedComponent(Component::Query));
        }
        if uri.fragment().is_some() {
            return reject(
                Component::Fragment,
                SemanticRule::UnexpectedComponent(Component::Fragment),
            );
        }
        Ok(())
    }
}

/// Separate a trailing `base64` flag from the parameters.
fn split_binary_flag(parameters: &str) -> (&str, bool) {
    let (rest, last) = match parameters.rsplit_once(';') {
        Some((rest, last)) => (rest, last),
        None => ("", parameters),
    };
    if last.eq_ignore_ascii_case(BINARY_FLAG) {
        (rest, true)
    } else {
        (parameters, false)
    }
}

impl Uri<Data> {
    /// Build a data URI holding the content of a file, base64-encoded, with
    /// a media type guessed from the content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreadableFile`] if the file can't be read.
    pub fn from_path<T>(path: T) -> Result<Self, Error>
    where
        T: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| Error::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        let media_type = sniff(&content);
        log::trace!("sniffed {} as {}", path.display(), media_type);
        let components = Components {
            scheme: Some("data".to_string()),
            path: format!("{};{},{}", media_type, BINARY_FLAG, BASE64.encode(&content)),
            ..Components::default()
        };
        Self::from_components(components, Data::default())
    }

    /// Borrow the payload, as it appears in the URI.
    #[must_use]
    pub fn data(&self) -> &str {
        self.split_data_path().2
    }

    /// Decode the payload: base64 when the URI is binary, percent-decoding
    /// otherwise.
    #[must_use]
    pub fn decoded_data(&self) -> Vec<u8> {
        if self.is_binary() {
            // Canonical base64 was checked when the URI was built.
            BASE64.decode(self.data()).unwrap_or_default()
        } else {
            percent_decode(self.data())
        }
    }

    /// Determines if the payload is base64-encoded.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        split_binary_flag(self.split_data_path().1).1
    }

    /// Borrow the mimetype, e.g. `text/plain`.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.split_data_path().0
    }

    /// Borrow the media type parameters, without the `base64` flag.
    #[must_use]
    pub fn parameters(&self) -> &str {
        split_binary_flag(self.split_data_path().1).0
    }

    /// Derive a data URI holding the same payload encoded as ASCII text
    /// (percent-encoded, without the `base64` flag).
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn to_ascii(&self) -> Result<Self, Error> {
        if !self.is_binary() {
            return Ok(self.clone());
        }
        let path = format!(
            "{};{},{}",
            self.mime_type(),
            self.parameters(),
            encode(Component::Path, &self.decoded_data())
        );
        self.with_path(&path)
    }

    /// Derive a data URI holding the same payload encoded as base64.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn to_binary(&self) -> Result<Self, Error> {
        if self.is_binary() {
            return Ok(self.clone());
        }
        let path = format!(
            "{};{},{}",
            self.mime_type(),
            with_binary_flag(self.parameters()),
            BASE64.encode(self.decoded_data())
        );
        self.with_path(&path)
    }

    /// Derive a data URI with different media type parameters.  The
    /// payload and its encoding are kept.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the parameters are invalid.
    pub fn with_parameters(&self, parameters: &str) -> Result<Self, Error> {
        let parameters = if self.is_binary() {
            with_binary_flag(parameters)
        } else {
            parameters.to_string()
        };
        let path = format!("{};{},{}", self.mime_type(), parameters, self.data());
        self.with_path(&path)
    }

    // mimetype, parameters (with the flag), data
    fn split_data_path(&self) -> (&str, &str, &str) {
        let (media_type, data) = self.path().split_once(',').unwrap_or((self.path(), ""));
        let (mime_type, parameters) = media_type.split_once(';').unwrap_or((media_type, ""));
        (mime_type, parameters, data)
    }
}

fn with_binary_flag(parameters: &str) -> String {
    if parameters.is_empty() {
        BINARY_FLAG.to_string()
    } else {
        format!("{};{}", parameters, BINARY_FLAG)
    }
}
