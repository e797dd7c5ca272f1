use super::{
    character_classes::USER_INFO_NOT_PCT_ENCODED,
    codec::validate_element,
    component::Component,
    error::SyntaxError,
    parse_host_port::{parse_host_port, validate_host},
};

/// This is the optional part of a URI which governs the URI's namespace.  It
/// typically contains a host name or IP address, and may also include a port
/// number and/or `user_info` component.
///
/// Components are held in their raw, percent-encoded form.  IP literals keep
/// their brackets.
///
/// # Examples
///
/// ## Parsing an Authority into its components
///
/// ```rust
/// use uri_schemes::Authority;
///
/// # fn main() -> Result<(), uri_schemes::SyntaxError> {
/// let authority = Authority::parse("nobody@[::1]:8080")?;
/// assert_eq!(Some("nobody"), authority.user_info());
/// assert_eq!("[::1]", authority.host());
/// assert_eq!(Some(8080), authority.port());
/// # Ok(())
/// # }
/// ```
///
/// ## Generating an Authority from its components
///
/// ```rust
/// use uri_schemes::Authority;
///
/// # fn main() -> Result<(), uri_schemes::SyntaxError> {
/// let authority = Authority::new(Some("nobody"), "www.example.com", Some(8080))?;
/// assert_eq!("nobody@www.example.com:8080", authority.to_string());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    pub(crate) user_info: Option<String>,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
}

impl Authority {
    /// Assemble an Authority from raw components, checking each against its
    /// character class.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the user info or the host is malformed.
    pub fn new<T>(user_info: Option<&str>, host: T, port: Option<u16>) -> Result<Self, SyntaxError>
    where
        T: Into<String>,
    {
        let host = host.into();
        if let Some(user_info) = user_info {
            validate_element(user_info, &USER_INFO_NOT_PCT_ENCODED, Component::UserInfo)?;
        }
        validate_host(&host)?;
        Ok(Self {
            user_info: user_info.map(str::to_string),
            host,
            port,
        })
    }

    /// Borrow the host, including the brackets of an IP literal.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Interpret the given string as the Authority component of a URI,
    /// separating its various subcomponents, returning an `Authority` value
    /// containing them.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if parsing fails
    pub fn parse<T>(authority_string: T) -> Result<Self, SyntaxError>
    where
        T: AsRef<str>,
    {
        let (user_info, host, port) = Self::split(authority_string.as_ref())?;
        Self::new(user_info, host, port)
    }

    /// Return a copy of the port (if any).
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Borrow the `user_info` (if any).
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// Separate user info, host and port without checking the user info and
    /// host against their character classes.  User info ends at the last
    /// `@`.
    pub(crate) fn split(authority: &str) -> Result<(Option<&str>, &str, Option<u16>), SyntaxError> {
        let (user_info, host_port) = match authority.rfind('@') {
            Some(delimiter) => (
                Some(&authority[..delimiter]),
                &authority[delimiter + 1..],
            ),
            None => (None, authority),
        };
        let (host, port) = parse_host_port(host_port)?;
        Ok((user_info, host, port))
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(user_info) = &self.user_info {
            write!(f, "{}@", user_info)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}
