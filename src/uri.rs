use std::{
    borrow::Cow,
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
    string::FromUtf8Error,
};

use super::{
    authority::Authority,
    character_classes::{PATH_NOT_PCT_ENCODED, QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, USER_INFO_NOT_PCT_ENCODED},
    codec::{percent_decode, validate_element},
    component::Component,
    error::{Error, SyntaxError, SyntaxReason},
    normalizer::normalize,
    parse_host_port::validate_host,
    parser::{check_scheme, parse, split_scheme},
    policy::{Generic, SchemePolicy},
};

/// The generic components of a URI, in their raw (percent-encoded) form.
///
/// This is what a [`Uri`] is built from and what it can be taken apart
/// into.  `None` means the component is absent, which is not the same thing
/// as present and empty: `http://example.com/?` has an empty query while
/// `http://example.com/` has none.
///
/// The user info, host and port make up the authority.  If any of them is
/// present the URI has an authority, and a missing host in it is taken to be
/// empty.
///
/// [`Uri`]: struct.Uri.html
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Components {
    /// The scheme, without the trailing `:`.
    pub scheme: Option<String>,
    /// The user info, without the trailing `@`.
    pub user_info: Option<String>,
    /// The host, with brackets around IP literals.
    pub host: Option<String>,
    /// The port.
    pub port: Option<u16>,
    /// The path.
    pub path: String,
    /// The query, without the leading `?`.
    pub query: Option<String>,
    /// The fragment, without the leading `#`.
    pub fragment: Option<String>,
}

/// This type is an immutable, validated URI bound to a [`SchemePolicy`].
///
/// Components are held in their raw, percent-encoded and normalized form:
/// the scheme and host are lowercase, percent-encoded triplets use uppercase
/// hexadecimal digits and a port equal to the scheme's default port is
/// dropped.  Two URIs compare equal when their normalized components do.
///
/// A `Uri` is never modified.  The `with_*` methods build a new, fully
/// validated `Uri` under the same policy, leaving the original as it was.
///
/// # Examples
///
/// ## Parsing a URI into its components
///
/// ```rust
/// use uri_schemes::{Http, Uri};
///
/// # fn main() -> Result<(), uri_schemes::Error> {
/// let uri = Uri::<Http>::parse("HTTP://user:pass@[::1]:8080/p?q#f")?;
/// assert_eq!(Some("http"), uri.scheme());
/// assert_eq!(Some("user:pass"), uri.user_info());
/// assert_eq!(Some("[::1]"), uri.host());
/// assert_eq!(Some(8080), uri.port());
/// assert_eq!("/p", uri.path());
/// assert_eq!(Some("q"), uri.query());
/// assert_eq!(Some("f"), uri.fragment());
/// # Ok(())
/// # }
/// ```
///
/// ## Deriving a modified URI
///
/// ```rust
/// use uri_schemes::{Http, Uri};
///
/// # fn main() -> Result<(), uri_schemes::Error> {
/// let uri = Uri::<Http>::parse("http://www.example.com/foo")?;
/// let secure = uri.with_scheme(Some("https"))?.with_port(Some(443))?;
/// assert_eq!("https://www.example.com/foo", secure.to_string());
/// assert_eq!("http://www.example.com/foo", uri.to_string());
/// assert!(uri.with_host(Some("")).is_err());
/// # Ok(())
/// # }
/// ```
pub struct Uri<P: SchemePolicy = Generic> {
    scheme: Option<String>,
    authority: Option<Authority>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    policy: P,
    raw: String,
}

impl<P: SchemePolicy> Uri<P> {
    /// Borrow the authority (if any) of the URI.
    #[must_use = "authority not used"]
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Take the URI apart into its raw components.
    #[must_use]
    pub fn components(&self) -> Components {
        Components {
            scheme: self.scheme.clone(),
            user_info: self.user_info().map(str::to_string),
            host: self.host().map(str::to_string),
            port: self.port(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }

    /// Borrow the fragment (if any) of the URI.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Decode the fragment (if any) into a string.
    ///
    /// # Errors
    ///
    /// Since decoded fragments may contain non-UTF8 byte sequences, this
    /// function may return a [`FromUtf8Error`].
    pub fn fragment_to_string(&self) -> Result<Option<String>, FromUtf8Error> {
        self.fragment().map(decode_to_string).transpose()
    }

    /// Validate `components` and assemble them into a `Uri` bound to
    /// `policy`.
    ///
    /// Each component is checked against its character class, then handed
    /// to the policy's [`filter_component`], then normalized.  The result
    /// must satisfy the generic path rules of [RFC 3986 section
    /// 3.3](https://tools.ietf.org/html/rfc3986#section-3.3) and finally the
    /// policy's [`check`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when a component is malformed and
    /// [`Error::Semantic`] when the policy rejects the URI.  No `Uri` is
    /// built in either case.
    ///
    /// [`filter_component`]: trait.SchemePolicy.html#method.filter_component
    /// [`check`]: trait.SchemePolicy.html#tymethod.check
    pub fn from_components(components: Components, policy: P) -> Result<Self, Error> {
        let components = Self::validate(components)?;
        let components = Self::filter(components, &policy)?;
        let components = normalize(components, policy.registry());
        Self::check_shape(&components)?;
        let uri = Self::assemble(components, policy);
        if let Err(error) = uri.policy.check(&uri) {
            log::debug!("{} policy rejected {:?}: {}", uri.policy.name(), uri.raw, error.rule);
            return Err(error.into());
        }
        Ok(uri)
    }

    /// Borrow the host (if any) of the URI, including the brackets of an IP
    /// literal.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.authority.as_ref().map(Authority::host)
    }

    /// Determines if the URI is a `relative-ref` (relative reference), as
    /// defined in [RFC 3986 section
    /// 4.2](https://tools.ietf.org/html/rfc3986#section-4.2).  A relative
    /// reference has no scheme, but may still have an authority.
    #[must_use]
    pub fn is_relative_reference(&self) -> bool {
        self.scheme.is_none()
    }

    /// Return the normalized form of the URI.  Since a `Uri` is normalized
    /// when it is built, this gives back an equal `Uri`.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let components = normalize(self.components(), self.policy.registry());
        Self::assemble(components, self.policy.clone())
    }

    /// Interpret the given string as a URI under `policy`, separating its
    /// various components, returning a `Uri` value containing them.
    ///
    /// # Errors
    ///
    /// There are many ways to screw up a URI string, and this function will
    /// let you know what's up by returning an [`Error`].
    pub fn parse_with<T>(uri_string: T, policy: P) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let components = parse(uri_string.as_ref())?;
        Self::from_components(components, policy)
    }

    /// Borrow the path component of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decode the path into a string.
    ///
    /// # Errors
    ///
    /// Since decoded paths may contain non-UTF8 byte sequences, this function
    /// may return a [`FromUtf8Error`].
    pub fn path_to_string(&self) -> Result<String, FromUtf8Error> {
        decode_to_string(&self.path)
    }

    /// Borrow the policy bound to the URI.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Return a copy of the port (if any) contained in the URI.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.authority.as_ref().and_then(Authority::port)
    }

    /// Borrow the query (if any) of the URI.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decode the query (if any) into a string.
    ///
    /// # Errors
    ///
    /// Since decoded queries may contain non-UTF8 byte sequences, this
    /// function may return a [`FromUtf8Error`].
    pub fn query_to_string(&self) -> Result<Option<String>, FromUtf8Error> {
        self.query().map(decode_to_string).transpose()
    }

    /// Borrow the scheme (if any) component of the URI.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Borrow the `user_info` portion (if any) of the Authority (if any) of the
    /// URI.
    ///
    /// Note that you can get `None` if there is either no Authority in the URI
    /// or there is an Authority in the URI but it has no `user_info` in it.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.authority.as_ref().and_then(Authority::user_info)
    }

    /// Decode the `user_info` (if any) into a string.
    ///
    /// # Errors
    ///
    /// Since decoded user info may contain non-UTF8 byte sequences, this
    /// function may return a [`FromUtf8Error`].
    pub fn user_info_to_string(&self) -> Result<Option<String>, FromUtf8Error> {
        self.user_info().map(decode_to_string).transpose()
    }

    /// Derive a URI with a different fragment.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_fragment(&self, fragment: Option<&str>) -> Result<Self, Error> {
        self.derive(|components| components.fragment = fragment.map(str::to_string))
    }

    /// Derive a URI with a different host.  Removing the host of a URI which
    /// keeps user info or a port leaves an empty host.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_host(&self, host: Option<&str>) -> Result<Self, Error> {
        self.derive(|components| components.host = host.map(str::to_string))
    }

    /// Derive a URI with a different path.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_path(&self, path: &str) -> Result<Self, Error> {
        self.derive(|components| components.path = path.to_string())
    }

    /// Derive a URI with a different port.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_port(&self, port: Option<u16>) -> Result<Self, Error> {
        self.derive(|components| components.port = port)
    }

    /// Derive a URI with a different query.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_query(&self, query: Option<&str>) -> Result<Self, Error> {
        self.derive(|components| components.query = query.map(str::to_string))
    }

    /// Derive a URI with a different scheme.
    ///
    /// # Errors
    ///
    /// The set of characters allowed in the scheme of a URI is limited, and
    /// the policy may not support the new scheme.
    pub fn with_scheme(&self, scheme: Option<&str>) -> Result<Self, Error> {
        self.derive(|components| components.scheme = scheme.map(str::to_string))
    }

    /// Derive a URI with a different `user_info`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting URI is invalid.
    pub fn with_user_info(&self, user_info: Option<&str>) -> Result<Self, Error> {
        self.derive(|components| components.user_info = user_info.map(str::to_string))
    }

    // ----------------------------------------------------------------------------------------------
    //                                         private methods
    // ----------------------------------------------------------------------------------------------
    fn assemble(components: Components, policy: P) -> Self {
        let Components {
            scheme,
            user_info,
            host,
            port,
            path,
            query,
            fragment,
        } = components;
        let authority = if user_info.is_some() || host.is_some() || port.is_some() {
            Some(Authority {
                user_info,
                host: host.unwrap_or_default(),
                port,
            })
        } else {
            None
        };
        let mut raw = String::new();
        if let Some(scheme) = &scheme {
            raw.push_str(scheme);
            raw.push(':');
        }
        if let Some(authority) = &authority {
            raw.push_str("//");
            raw.push_str(&authority.to_string());
        }
        raw.push_str(&path);
        if let Some(query) = &query {
            raw.push('?');
            raw.push_str(query);
        }
        if let Some(fragment) = &fragment {
            raw.push('#');
            raw.push_str(fragment);
        }
        Self {
            scheme,
            authority,
            path,
            query,
            fragment,
            policy,
            raw,
        }
    }

    fn check_shape(components: &Components) -> Result<(), SyntaxError> {
        let path = components.path.as_str();
        let has_authority = components.host.is_some();
        let reason = if has_authority && !path.is_empty() && !path.starts_with('/') {
            Some(SyntaxReason::RelativePathWithAuthority)
        } else if !has_authority && path.starts_with("//") {
            Some(SyntaxReason::PathLooksLikeAuthority)
        } else if !has_authority && components.scheme.is_none() && split_scheme(path).is_some() {
            Some(SyntaxReason::PathLooksLikeScheme)
        } else {
            None
        };
        match reason {
            Some(reason) => Err(SyntaxError::new(Some(Component::Path), path, reason)),
            None => Ok(()),
        }
    }

    fn derive<F>(&self, change: F) -> Result<Self, Error>
    where
        F: FnOnce(&mut Components),
    {
        let mut components = self.components();
        change(&mut components);
        Self::from_components(components, self.policy.clone())
    }

    fn filter(components: Components, policy: &P) -> Result<Components, Error> {
        let filter = |component: Component, value: String| -> Result<String, Error> {
            let filtered = match policy.filter_component(component, &value)? {
                Cow::Borrowed(_) => None,
                Cow::Owned(filtered) => Some(filtered),
            };
            match filtered {
                None => Ok(value),
                Some(filtered) => {
                    log::trace!("{} policy rewrote {} {:?} as {:?}", policy.name(), component, value, filtered);
                    Self::validate_component(component, &filtered)?;
                    Ok(filtered)
                }
            }
        };
        Ok(Components {
            scheme: components
                .scheme
                .map(|scheme| filter(Component::Scheme, scheme))
                .transpose()?,
            user_info: components
                .user_info
                .map(|user_info| filter(Component::UserInfo, user_info))
                .transpose()?,
            host: components
                .host
                .map(|host| filter(Component::Host, host))
                .transpose()?,
            port: components.port,
            path: filter(Component::Path, components.path)?,
            query: components
                .query
                .map(|query| filter(Component::Query, query))
                .transpose()?,
            fragment: components
                .fragment
                .map(|fragment| filter(Component::Fragment, fragment))
                .transpose()?,
        })
    }

    fn validate(mut components: Components) -> Result<Components, SyntaxError> {
        if components.host.is_none() && (components.user_info.is_some() || components.port.is_some()) {
            components.host = Some(String::new());
        }
        if let Some(scheme) = &components.scheme {
            Self::validate_component(Component::Scheme, scheme)?;
        }
        if let Some(user_info) = &components.user_info {
            Self::validate_component(Component::UserInfo, user_info)?;
        }
        if let Some(host) = &components.host {
            Self::validate_component(Component::Host, host)?;
        }
        Self::validate_component(Component::Path, &components.path)?;
        if let Some(query) = &components.query {
            Self::validate_component(Component::Query, query)?;
        }
        if let Some(fragment) = &components.fragment {
            Self::validate_component(Component::Fragment, fragment)?;
        }
        Ok(components)
    }

    fn validate_component(component: Component, value: &str) -> Result<(), SyntaxError> {
        match component {
            Component::Scheme => check_scheme(value).map(drop),
            Component::UserInfo => validate_element(value, &USER_INFO_NOT_PCT_ENCODED, component),
            Component::Host => validate_host(value),
            // Ports are numbers by the time they get here.
            Component::Port => Ok(()),
            Component::Path => validate_element(value, &PATH_NOT_PCT_ENCODED, component),
            Component::Query | Component::Fragment => {
                validate_element(value, &QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, component)
            }
        }
    }
}

impl<P: SchemePolicy + Default> Uri<P> {
    /// Interpret the given string as a URI under the default value of the
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the string is not a valid URI for the policy.
    pub fn parse<T>(uri_string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        Self::parse_with(uri_string, P::default())
    }
}

fn decode_to_string(element: &str) -> Result<String, FromUtf8Error> {
    String::from_utf8(percent_decode(element))
}

impl<P: SchemePolicy> Clone for Uri<P> {
    fn clone(&self) -> Self {
        Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            policy: self.policy.clone(),
            raw: self.raw.clone(),
        }
    }
}

impl<P: SchemePolicy> PartialEq for Uri<P> {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl<P: SchemePolicy> Eq for Uri<P> {}

impl<P: SchemePolicy> Hash for Uri<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.authority.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
    }
}

impl<P: SchemePolicy> std::fmt::Debug for Uri<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Uri").field(&self.raw).finish()
    }
}

impl<P: SchemePolicy> std::fmt::Display for Uri<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.raw)
    }
}

impl<P: SchemePolicy> Deref for Uri<P> {
    type Target = str;
    fn deref(&self) -> &str {
        &self.raw
    }
}

impl<P: SchemePolicy> AsRef<str> for Uri<P> {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl<P: SchemePolicy + Default> FromStr for Uri<P> {
    type Err = Error;

    fn from_str(uri_string: &str) -> Result<Self, Self::Err> {
        Self::parse(uri_string)
    }
}

impl<P: SchemePolicy + Default> TryFrom<&'_ str> for Uri<P> {
    type Error = Error;

    fn try_from(uri_string: &'_ str) -> Result<Self, Self::Error> {
        Self::parse(uri_string)
    }
}

impl<P: SchemePolicy + Default> TryFrom<String> for Uri<P> {
    type Error = Error;

    fn try_from(uri_string: String) -> Result<Self, Self::Error> {
        Self::parse(uri_string)
    }
}

#[cfg(feature = "url")]
impl<P: SchemePolicy + Default> TryFrom<&url_::Url> for Uri<P> {
    type Error = Error;

    fn try_from(url: &url_::Url) -> Result<Self, Self::Error> {
        Self::parse(url.as_str())
    }
}

#[cfg(feature = "url")]
impl<P: SchemePolicy> TryFrom<&Uri<P>> for url_::Url {
    type Error = url_::ParseError;

    fn try_from(uri: &Uri<P>) -> Result<Self, Self::Error> {
        url_::Url::parse(&uri.raw)
    }
}

#[cfg(feature = "serde")]
impl<P: SchemePolicy> serde_::Serialize for Uri<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: SchemePolicy + Default> serde_::Deserialize<'de> for Uri<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_::Deserializer<'de>,
    {
        let s = <String as serde_::Deserialize>::deserialize(deserializer)?;
        Self::parse(s).map_err(serde_::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn parse(uri_string: &str) -> Result<Uri, Error> {
        Uri::parse(uri_string)
    }

    #[test]
    fn no_scheme() {
        let uri = parse("foo/bar");
        assert!(uri.is_ok());
        let uri = uri.unwrap();
        assert_eq!(None, uri.scheme());
        assert_eq!("foo/bar", uri.path());
        assert_eq!("foo/bar", uri.path_to_string().unwrap());
    }

    #[test]
    fn url() {
        let uri: Result<Uri, Error> = "http://www.example.com/foo/bar".try_into();
        assert!(uri.is_ok());
        let uri = uri.unwrap();
        assert_eq!(Some("http"), uri.scheme());
        assert_eq!(Some("www.example.com"), uri.host());
        assert_eq!(uri.path(), "/foo/bar");
    }

    #[test]
    fn urn_default_path_delimiter() {
        let uri = Uri::<Generic>::try_from("urn:book:fantasy:Hobbit");
        assert!(uri.is_ok());
        let uri = uri.unwrap();
        assert_eq!(Some("urn"), uri.scheme());
        assert_eq!(None, uri.host());
        assert_eq!(uri.path(), "book:fantasy:Hobbit");
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        let error = parse("").unwrap_err();
        assert_eq!(
            SyntaxReason::EmptyInput,
            error.as_syntax().unwrap().reason
        );
    }

    #[test]
    fn uri_ends_after_authority() {
        let uri = parse("http://www.example.com");
        assert!(uri.is_ok());
        assert_eq!("", uri.unwrap().path());
    }

    #[test]
    fn relative_vs_non_relative_references() {
        struct Test {
            uri_string: &'static str,
            is_relative_reference: bool,
        }
        let test_vectors: &[Test] = &[
            Test {
                uri_string: "http://www.example.com/",
                is_relative_reference: false,
            },
            Test {
                uri_string: "http://www.example.com",
                is_relative_reference: false,
            },
            Test {
                uri_string: "/",
                is_relative_reference: true,
            },
            Test {
                uri_string: "foo",
                is_relative_reference: true,
            },
            Test {
                uri_string: "//example.com",
                is_relative_reference: true,
            },
        ];
        for test_vector in test_vectors {
            let uri = parse(test_vector.uri_string);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(
                test_vector.is_relative_reference,
                uri.is_relative_reference()
            );
        }
    }

    #[test]
    fn query_and_fragment_elements() {
        struct Test {
            uri_string: &'static str,
            host: &'static str,
            query: Option<&'static str>,
            fragment: Option<&'static str>,
        }
        let test_vectors: &[Test] = &[
            Test {
                uri_string: "http://www.example.com/",
                host: "www.example.com",
                query: None,
                fragment: None,
            },
            Test {
                uri_string: "http://example.com?foo",
                host: "example.com",
                query: Some("foo"),
                fragment: None,
            },
            Test {
                uri_string: "http://www.example.com#foo",
                host: "www.example.com",
                query: None,
                fragment: Some("foo"),
            },
            Test {
                uri_string: "http://www.example.com?foo#bar",
                host: "www.example.com",
                query: Some("foo"),
                fragment: Some("bar"),
            },
            Test {
                uri_string: "http://www.example.com?earth?day#bar",
                host: "www.example.com",
                query: Some("earth?day"),
                fragment: Some("bar"),
            },
            Test {
                uri_string: "http://www.example.com/spam?foo#bar",
                host: "www.example.com",
                query: Some("foo"),
                fragment: Some("bar"),
            },
            Test {
                uri_string: "http://www.example.com/?",
                host: "www.example.com",
                query: Some(""),
                fragment: None,
            },
        ];
        for (test_index, test_vector) in test_vectors.iter().enumerate() {
            let uri = parse(test_vector.uri_string);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(Some(test_vector.host), uri.host());
            assert_eq!(test_vector.query, uri.query(), "{}", test_index);
            assert_eq!(test_vector.fragment, uri.fragment());
        }
    }

    #[test]
    fn scheme_shaped_prefixes_that_are_not_schemes() {
        let test_vectors = [
            "://www.example.com/",
            "0://www.example.com/",
            "+://www.example.com/",
            ".://www.example.com/",
            "h@://www.example.com/",
        ];
        for test_vector in &test_vectors {
            let uri = parse(test_vector);
            assert!(uri.is_ok(), "{}", test_vector);
            let uri = uri.unwrap();
            assert_eq!(None, uri.scheme());
            assert_eq!(*test_vector, uri.path());
        }
    }

    #[test]
    fn scheme_mixed_case() {
        let test_vectors = [
            "http://www.example.com/",
            "hTtp://www.example.com/",
            "HTTP://www.example.com/",
            "Http://www.example.com/",
            "HttP://www.example.com/",
        ];
        for test_vector in &test_vectors {
            let uri = parse(test_vector);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(Some("http"), uri.scheme());
        }
    }

    #[test]
    fn host_mixed_case() {
        let test_vectors = [
            "http://www.example.com/",
            "http://www.EXAMPLE.com/",
            "http://www.exAMple.com/",
            "http://www.example.cOM/",
            "http://wWw.exampLe.Com/",
        ];
        for test_vector in &test_vectors {
            let uri = parse(test_vector).unwrap();
            assert_eq!(Some("www.example.com"), uri.host());
        }
    }

    #[test]
    fn dont_misinterpret_colon_in_other_places_as_scheme_delimiter() {
        let test_vectors = [
            "//foo:bar@www.example.com/",
            "//www.example.com/a:b",
            "//www.example.com/foo?a:b",
            "//www.example.com/foo#a:b",
            "//[v7.:]/",
            "/:/foo",
        ];
        for test_vector in &test_vectors {
            let uri = parse(test_vector);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(None, uri.scheme());
        }
    }

    #[test]
    fn path_illegal_characters() {
        let test_vectors = [
            "http://www.example.com/foo[bar",
            "http://www.example.com/]bar",
            "http://www.example.com/foo]",
            "http://www.example.com/[",
            "http://www.example.com/abc/foo]",
            "http://www.example.com/[/abc",
            "/foo[bar",
            "/]bar",
            "/abc/[",
            "/foo]/",
        ];
        for test_vector in &test_vectors {
            let error = parse(test_vector).unwrap_err();
            assert_eq!(
                Some(Component::Path),
                error.as_syntax().unwrap().component
            );
        }
    }

    #[test]
    fn path_barely_legal() {
        let test_vectors: &[(&str, &str)] = &[
            ("/:/foo", "/:/foo"),
            ("bob@/foo", "bob@/foo"),
            ("hello!", "hello!"),
            ("urn:hello,%20w%6Frld", "hello, world"),
            ("//example.com/foo/(bar)/", "/foo/(bar)/"),
        ];
        for (uri_string, path) in test_vectors {
            let uri = parse(uri_string);
            assert!(uri.is_ok(), "{}", uri_string);
            let uri = uri.unwrap();
            assert_eq!(*path, uri.path_to_string().unwrap());
        }
    }

    #[test]
    fn query_illegal_characters() {
        let test_vectors = [
            "http://www.example.com/?foo[bar",
            "http://www.example.com/?]bar",
            "http://www.example.com/?abc/[",
            "?foo[bar",
            "?]bar",
            "?[/",
        ];
        for test_vector in &test_vectors {
            let error = parse(test_vector).unwrap_err();
            assert_eq!(
                Some(Component::Query),
                error.as_syntax().unwrap().component
            );
        }
    }

    #[test]
    fn query_barely_legal() {
        let test_vectors: &[(&str, &str)] = &[
            ("/?:/foo", ":/foo"),
            ("?bob@/foo", "bob@/foo"),
            ("?hello!", "hello!"),
            ("urn:?hello,%20w%6Frld", "hello, world"),
            ("//example.com/foo?(bar)/", "(bar)/"),
            ("http://www.example.com/?foo?bar", "foo?bar"),
        ];
        for (test_index, (uri_string, query)) in test_vectors.iter().enumerate() {
            let uri = parse(uri_string);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(
                Some(*query),
                uri.query_to_string().unwrap().as_deref(),
                "{}",
                test_index
            );
        }
    }

    #[test]
    fn fragment_illegal_characters() {
        let test_vectors = [
            "http://www.example.com/#foo[bar",
            "http://www.example.com/#]bar",
            "http://www.example.com/#foo#bar",
            "#foo[bar",
            "#]bar",
            "#[/",
        ];
        for test_vector in &test_vectors {
            let error = parse(test_vector).unwrap_err();
            assert_eq!(
                Some(Component::Fragment),
                error.as_syntax().unwrap().component
            );
        }
    }

    #[test]
    fn fragment_barely_legal() {
        let test_vectors: &[(&str, &str)] = &[
            ("/#:/foo", ":/foo"),
            ("#bob@/foo", "bob@/foo"),
            ("#hello!", "hello!"),
            ("urn:#hello,%20w%6Frld", "hello, world"),
            ("//example.com/foo#(bar)/", "(bar)/"),
            ("http://www.example.com/#foo?bar", "foo?bar"),
        ];
        for (uri_string, fragment) in test_vectors {
            let uri = parse(uri_string);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(
                Some(*fragment),
                uri.fragment_to_string().unwrap().as_deref()
            );
        }
    }

    #[test]
    fn paths_with_percent_encoded_characters() {
        struct Test {
            uri_string: &'static str,
            path: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                uri_string: "%41",
                path: "%41",
            },
            Test {
                uri_string: "%4a",
                path: "%4A",
            },
            Test {
                uri_string: "%bc",
                path: "%BC",
            },
            Test {
                uri_string: "%Bc",
                path: "%BC",
            },
            Test {
                uri_string: "%41%4A%43%4b",
                path: "%41%4A%43%4B",
            },
        ];
        for test_vector in test_vectors {
            let uri = parse(test_vector.uri_string);
            assert!(uri.is_ok());
            let uri = uri.unwrap();
            assert_eq!(test_vector.path, uri.path());
        }
    }

    #[test]
    fn malformed_percent_encoding() {
        let test_vectors = ["/%", "/%4", "/%G0", "?%zz", "#abc%"];
        for test_vector in &test_vectors {
            let error = parse(test_vector).unwrap_err();
            assert!(matches!(
                error.as_syntax().unwrap().reason,
                SyntaxReason::MalformedPercentEncoding { .. }
            ));
        }
    }

    #[test]
    fn construct_normalize_and_compare_equivalent_uris() {
        let uri1 = parse("example://a/b/c/%7Bfoo%7D").unwrap();
        let uri2 = parse("eXAMPLE://a/b/c/%7bfoo%7d").unwrap();
        assert_eq!(uri1, uri2);
        assert_eq!(uri1.to_string(), uri2.to_string());
        let uri3 = parse("HTTP://EXAMPLE.com/").unwrap();
        let uri4 = parse("http://example.com/").unwrap();
        assert_eq!(uri3, uri4);
        assert_ne!(uri4, parse("http://example.com/?").unwrap());
    }

    #[test]
    fn normalize_is_idempotent() {
        let uri = parse("HtTp://User%3a@WWW.Example.com:8080/%7e?%aa#%bB").unwrap();
        let once = uri.normalize();
        assert_eq!(uri, once);
        assert_eq!(once, once.normalize());
        assert_eq!("http://User%3A@www.example.com:8080/%7E?%AA#%BB", once.to_string());
    }

    #[test]
    fn empty_path_in_uri_with_authority_is_kept_empty() {
        let uri = parse("http://example.com").unwrap();
        assert_eq!("", uri.path());
        assert_eq!("http://example.com", uri.to_string());
        assert_ne!(uri, parse("http://example.com/").unwrap());
    }

    #[test]
    fn generate_string() {
        struct Test {
            components: Components,
            expected: &'static str,
        }
        let test_vectors = vec![
            Test {
                components: Components {
                    scheme: Some("http".into()),
                    user_info: Some("bob".into()),
                    host: Some("www.example.com".into()),
                    port: Some(8080),
                    path: "/abc/def".into(),
                    query: Some("foobar".into()),
                    fragment: Some("ch2".into()),
                },
                expected: "http://bob@www.example.com:8080/abc/def?foobar#ch2",
            },
            Test {
                components: Components {
                    scheme: Some("http".into()),
                    host: Some("www.example.com".into()),
                    port: Some(0),
                    ..Components::default()
                },
                expected: "http://www.example.com:0",
            },
            Test {
                components: Components {
                    scheme: Some("http".into()),
                    host: Some("[::ffff:1.2.3.4]".into()),
                    path: "/".into(),
                    ..Components::default()
                },
                expected: "http://[::ffff:1.2.3.4]/",
            },
            Test {
                components: Components {
                    scheme: Some("urn".into()),
                    path: "book:fantasy:Hobbit".into(),
                    ..Components::default()
                },
                expected: "urn:book:fantasy:Hobbit",
            },
            Test {
                components: Components {
                    user_info: Some("bob".into()),
                    port: Some(8080),
                    ..Components::default()
                },
                expected: "//bob@:8080",
            },
            Test {
                components: Components {
                    path: "foo".into(),
                    query: Some("".into()),
                    fragment: Some("".into()),
                    ..Components::default()
                },
                expected: "foo?#",
            },
            Test {
                components: Components::default(),
                expected: "",
            },
        ];
        for test_vector in test_vectors {
            let uri = Uri::from_components(test_vector.components, Generic::default()).unwrap();
            assert_eq!(test_vector.expected, uri.to_string());
        }
    }

    #[test]
    fn shape_errors() {
        struct Test {
            components: Components,
            reason: SyntaxReason,
        }
        let test_vectors = vec![
            Test {
                components: Components {
                    host: Some("example.com".into()),
                    path: "relative".into(),
                    ..Components::default()
                },
                reason: SyntaxReason::RelativePathWithAuthority,
            },
            Test {
                components: Components {
                    scheme: Some("x".into()),
                    path: "//not-a-host".into(),
                    ..Components::default()
                },
                reason: SyntaxReason::PathLooksLikeAuthority,
            },
            Test {
                components: Components {
                    path: "a:b".into(),
                    ..Components::default()
                },
                reason: SyntaxReason::PathLooksLikeScheme,
            },
        ];
        for test_vector in test_vectors {
            let error = Uri::from_components(test_vector.components, Generic::default()).unwrap_err();
            assert_eq!(test_vector.reason, error.as_syntax().unwrap().reason);
        }
    }

    #[test]
    fn with_component_replaces_only_that_component() {
        let uri = parse("http://bob@www.example.com:8080/abc?q#f").unwrap();

        let changed = uri.with_scheme(Some("ftp")).unwrap();
        assert_eq!("ftp://bob@www.example.com:8080/abc?q#f", changed.to_string());

        let changed = uri.with_user_info(None).unwrap();
        assert_eq!("http://www.example.com:8080/abc?q#f", changed.to_string());

        let changed = uri.with_host(Some("Example.ORG")).unwrap();
        assert_eq!(Some("example.org"), changed.host());

        let changed = uri.with_port(None).unwrap();
        assert_eq!("http://bob@www.example.com/abc?q#f", changed.to_string());

        let changed = uri.with_path("/x/y").unwrap();
        assert_eq!("/x/y", changed.path());

        let changed = uri.with_query(Some("")).unwrap();
        assert_eq!(Some(""), changed.query());

        let changed = uri.with_fragment(None).unwrap();
        assert_eq!("http://bob@www.example.com:8080/abc?q", changed.to_string());

        assert_eq!("http://bob@www.example.com:8080/abc?q#f", uri.to_string());
    }

    #[test]
    fn failed_derivations_leave_the_uri_alone() {
        let uri = parse("http://www.example.com/abc").unwrap();
        assert!(uri.with_scheme(Some("1nvalid")).unwrap_err().is_syntax());
        assert!(uri.with_host(Some("exa mple")).unwrap_err().is_syntax());
        assert!(uri.with_path("relative").unwrap_err().is_syntax());
        assert!(uri.with_query(Some("#")).unwrap_err().is_syntax());
        assert_eq!("http://www.example.com/abc", uri.to_string());
    }

    #[test]
    fn removing_the_authority() {
        let uri = parse("http://www.example.com/abc").unwrap();
        let changed = uri.with_host(None).unwrap();
        assert_eq!(None, changed.authority());
        assert_eq!("http:/abc", changed.to_string());
    }

    #[test]
    fn components_round_trip() {
        let uri = parse("http://bob@[::1]:8080/abc?q#f").unwrap();
        let rebuilt = Uri::from_components(uri.components(), Generic::default()).unwrap();
        assert_eq!(uri, rebuilt);
    }

    #[test]
    fn decoded_helpers() {
        let uri = parse("//j%40ne:p%3Ass@example.com/caf%C3%A9?a%20b#%E2%9C%93").unwrap();
        assert_eq!(Some("j@ne:p:ss"), uri.user_info_to_string().unwrap().as_deref());
        assert_eq!("/caf\u{e9}", uri.path_to_string().unwrap());
        assert_eq!(Some("a b"), uri.query_to_string().unwrap().as_deref());
        assert_eq!(Some("\u{2713}"), uri.fragment_to_string().unwrap().as_deref());
        assert!(parse("/%FF").unwrap().path_to_string().is_err());
    }

    #[test]
    fn deref_and_debug() {
        let uri = parse("http://example.com/").unwrap();
        assert!(uri.starts_with("http:"));
        assert_eq!("Uri(\"http://example.com/\")", format!("{:?}", uri));
    }

    #[test]
    fn hash_follows_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(parse("HTTP://Example.com/%7e").unwrap());
        assert!(set.contains(&parse("http://example.com/%7E").unwrap()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_the_string_form() {
        let uri = parse("http://example.com/a?b#c").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!("\"http://example.com/a?b#c\"", json);
        let back: Uri = serde_json::from_str(&json).unwrap();
        assert_eq!(uri, back);
        assert!(serde_json::from_str::<Uri>("\"http://[/\"").is_err());
    }

    #[cfg(feature = "url")]
    #[test]
    fn url_conversions() {
        let uri = parse("http://example.com/a?b#c").unwrap();
        let url = url_::Url::try_from(&uri).unwrap();
        assert_eq!("http://example.com/a?b#c", url.as_str());
        let back: Uri = Uri::try_from(&url).unwrap();
        assert_eq!(uri, back);
    }
}
