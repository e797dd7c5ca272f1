use std::{borrow::Cow, collections::BTreeMap, sync::Arc};

use super::{
    component::Component,
    error::{Error, SemanticError, SyntaxError},
    parser::check_scheme,
    uri::Uri,
};

/// The rules a scheme adds on top of the generic URI grammar.
///
/// A policy value is bound to every [`Uri`] when it is constructed and is
/// applied again, unchanged, whenever a modified copy is derived from it.
/// Construction runs, in order: the generic grammar and character class
/// checks, [`filter_component`] on every present component, normalization
/// (which consults [`registry`] for default ports) and finally [`check`] on
/// the assembled candidate.
///
/// Adding support for a new scheme is a matter of implementing this trait.
///
/// ```rust
/// use uri_schemes::{Component, SchemePolicy, SchemeRegistry, SemanticError, SemanticRule, Uri};
///
/// #[derive(Clone, Debug)]
/// struct Mailto(SchemeRegistry);
///
/// impl SchemePolicy for Mailto {
///     fn name(&self) -> &'static str {
///         "mailto"
///     }
///
///     fn registry(&self) -> &SchemeRegistry {
///         &self.0
///     }
///
///     fn check(&self, uri: &Uri<Self>) -> Result<(), SemanticError> {
///         match uri.authority() {
///             None => Ok(()),
///             Some(_) => Err(SemanticError {
///                 policy: self.name(),
///                 component: Some(Component::Host),
///                 rule: SemanticRule::UnexpectedComponent(Component::Host),
///             }),
///         }
///     }
/// }
///
/// let policy = Mailto(SchemeRegistry::new([("mailto", None)]).unwrap());
/// assert!(Uri::parse_with("mailto:joe@example.com", policy.clone()).is_ok());
/// assert!(Uri::parse_with("mailto://example.com", policy).is_err());
/// ```
///
/// [`Uri`]: struct.Uri.html
/// [`filter_component`]: #method.filter_component
/// [`registry`]: #tymethod.registry
/// [`check`]: #tymethod.check
pub trait SchemePolicy: Clone + std::fmt::Debug {
    /// Name of the policy, reported in [`SemanticError`]s.
    fn name(&self) -> &'static str;

    /// The schemes this policy knows about, with their default ports.
    fn registry(&self) -> &SchemeRegistry;

    /// Transform or reject a raw component before it is normalized.  Only
    /// present components are filtered.  The default keeps the value as it
    /// is.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the component breaks a rule of the scheme.
    fn filter_component<'a>(
        &self,
        component: Component,
        value: &'a str,
    ) -> Result<Cow<'a, str>, Error> {
        let _ = component;
        Ok(Cow::Borrowed(value))
    }

    /// Decide whether a fully parsed and normalized URI is acceptable.
    ///
    /// # Errors
    ///
    /// Returns a [`SemanticError`] naming the rule which the URI breaks.
    fn check(&self, uri: &Uri<Self>) -> Result<(), SemanticError>;
}

/// An immutable set of scheme names, each with an optional default port.
///
/// Names are stored in lowercase.  Cloning is cheap; clones share the same
/// table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemeRegistry {
    schemes: Arc<BTreeMap<String, Option<u16>>>,
}

impl SchemeRegistry {
    /// Build a registry from `(scheme, default port)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if a name is not a valid scheme.
    pub fn new<I, T>(schemes: I) -> Result<Self, SyntaxError>
    where
        I: IntoIterator<Item = (T, Option<u16>)>,
        T: AsRef<str>,
    {
        let schemes = schemes
            .into_iter()
            .map(|(scheme, port)| Ok((check_scheme(scheme.as_ref())?.to_ascii_lowercase(), port)))
            .collect::<Result<BTreeMap<_, _>, SyntaxError>>()?;
        Ok(Self {
            schemes: Arc::new(schemes),
        })
    }

    /// Determines if the scheme is registered.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.schemes.contains_key(&scheme.to_ascii_lowercase())
    }

    /// The default port of a registered scheme, if it has one.
    #[must_use]
    pub fn default_port(&self, scheme: &str) -> Option<u16> {
        self.schemes
            .get(&scheme.to_ascii_lowercase())
            .copied()
            .flatten()
    }

    /// Determines if no scheme is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Iterate over the registered schemes in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u16>)> + '_ {
        self.schemes
            .iter()
            .map(|(scheme, port)| (scheme.as_str(), *port))
    }
}

/// The policy of plain RFC 3986 URIs: any scheme, no constraint beyond the
/// generic grammar.
///
/// By default no scheme has a default port, so no port is ever dropped
/// during normalization.  Use [`with_registry`](#method.with_registry) to
/// supply some.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generic {
    registry: SchemeRegistry,
}

impl Generic {
    /// A generic policy which knows the default ports of `registry`.
    #[must_use]
    pub fn with_registry(registry: SchemeRegistry) -> Self {
        Self { registry }
    }
}

impl SchemePolicy for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    fn check(&self, _uri: &Uri<Self>) -> Result<(), SemanticError> {
        Ok(())
    }
}
