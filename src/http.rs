use once_cell::sync::Lazy;

use super::{
    component::Component,
    error::{SemanticError, SemanticRule},
    policy::{SchemePolicy, SchemeRegistry},
    uri::Uri,
};

static HTTP_SCHEMES: Lazy<SchemeRegistry> = Lazy::new(|| {
    SchemeRegistry::new([("http", Some(80)), ("https", Some(443))]).unwrap_or_default()
});

/// The policy of `http` and `https` URIs ([RFC 7230 section
/// 2.7](https://tools.ietf.org/html/rfc7230#section-2.7)).
///
/// * a scheme, when present, must be one of the registry's;
/// * an authority, when present, must have a non-empty host;
/// * a URI with a scheme must have an authority.
///
/// Relative references (no scheme) are accepted, so that partial HTTP URIs
/// such as `/path?query` can be held and later completed.
///
/// ```rust
/// use uri_schemes::{Http, Uri};
///
/// let uri = Uri::<Http>::parse("HTTPS://Example.COM:443/").unwrap();
/// assert_eq!("https://example.com/", uri.to_string());
/// assert!(Uri::<Http>::parse("ftp://example.com/").is_err());
/// assert!(Uri::<Http>::parse("http:///path").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Http {
    registry: SchemeRegistry,
}

impl Http {
    /// An HTTP policy accepting the schemes of `registry` instead of
    /// `http` and `https`.
    #[must_use]
    pub fn with_registry(registry: SchemeRegistry) -> Self {
        Self { registry }
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            registry: HTTP_SCHEMES.clone(),
        }
    }
}

impl SchemePolicy for Http {
    fn name(&self) -> &'static str {
        "http"
    }

    fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    fn check(&self, uri: &Uri<Self>) -> Result<(), SemanticError> {
        if let Some(scheme) = uri.scheme() {
            if !self.registry.contains(scheme) {
                return Err(SemanticError::new(
                    self.name(),
                    Some(Component::Scheme),
                    SemanticRule::UnsupportedScheme(scheme.to_string()),
                ));
            }
        }
        match (uri.scheme(), uri.host()) {
            (_, Some("")) => Err(SemanticError::new(
                self.name(),
                Some(Component::Host),
                SemanticRule::EmptyHost,
            )),
            (Some(_), None) => Err(SemanticError::new(
                self.name(),
                Some(Component::Host),
                SemanticRule::MissingAuthority,
            )),
            _ => Ok(()),
        }
    }
}
