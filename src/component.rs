/// Names one of the generic components a URI is made of.  Used to select the
/// character class applied by the codec, to tell a [`SchemePolicy`] which
/// component it is asked to filter, and to point at the offending part of a
/// URI in errors.
///
/// [`SchemePolicy`]: trait.SchemePolicy.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// The scheme, e.g. `http` in `http://example.com/`.
    Scheme,
    /// The `user:password` part of the authority.
    UserInfo,
    /// The host part of the authority.
    Host,
    /// The port part of the authority.
    Port,
    /// The path, always present (possibly empty).
    Path,
    /// The query, following `?`.
    Query,
    /// The fragment, following `#`.
    Fragment,
}

impl Component {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::UserInfo => "user info",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
