use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use super::{
    character_classes::UNRESERVED,
    codec::encode_element,
    error::Error,
    http::Http,
    parse_host_port::{parse_host_port, parse_port},
    uri::{Components, Uri},
    validate_ipv4_address::validate_ipv4_address,
};

impl Uri<Http> {
    /// Build the URI of the request being served from a CGI-style
    /// environment table (`HTTPS`, `HTTP_HOST`, `REQUEST_URI` and friends).
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use uri_schemes::{Http, Uri};
    ///
    /// let server: HashMap<String, String> = [
    ///     ("HTTPS", "on"),
    ///     ("HTTP_HOST", "example.com:8443"),
    ///     ("REQUEST_URI", "/search?q=rust"),
    /// ]
    /// .iter()
    /// .map(|(k, v)| (k.to_string(), v.to_string()))
    /// .collect();
    /// let uri = Uri::<Http>::from_server(&server).unwrap();
    /// assert_eq!("https://example.com:8443/search?q=rust", uri.to_string());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::HostnameNotDetected`] when neither `HTTP_HOST` nor
    /// `SERVER_ADDR` is set, and any other [`Error`] if the values found do
    /// not make a valid HTTP URI.
    pub fn from_server(server: &HashMap<String, String>) -> Result<Self, Error> {
        let get = |key: &str| server.get(key).map(String::as_str);
        let (host, port) = fetch_host_port(&get)?;
        let (path, query) = fetch_request_uri(&get);
        let components = Components {
            scheme: Some(fetch_scheme(&get).to_string()),
            user_info: fetch_user_info(&get),
            host: Some(host),
            port,
            path,
            query,
            fragment: None,
        };
        log::trace!("detected {:?} from server environment", components);
        Self::from_components(components, Http::default())
    }
}

fn fetch_scheme<'a, F>(get: &F) -> &'static str
where
    F: Fn(&str) -> Option<&'a str>,
{
    match get("HTTPS") {
        Some(https)
            if ["1", "true", "on", "yes"]
                .iter()
                .any(|truthy| https.eq_ignore_ascii_case(truthy)) =>
        {
            "https"
        }
        _ => "http",
    }
}

fn fetch_user_info<'a, F>(get: &F) -> Option<String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let (user, password) = match get("HTTP_AUTHORIZATION").and_then(decode_basic_credentials) {
        Some((user, password)) => (Some(user), password),
        None => (
            get("PHP_AUTH_USER").map(|user| user.as_bytes().to_vec()),
            get("PHP_AUTH_PW").map(|password| password.as_bytes().to_vec()),
        ),
    };
    let mut user_info = encode_element(user?, &UNRESERVED);
    if let Some(password) = password {
        user_info.push(':');
        user_info.push_str(&encode_element(password, &UNRESERVED));
    }
    Some(user_info)
}

// `Basic <base64(user:password)>`; anything else is ignored.
fn decode_basic_credentials(authorization: &str) -> Option<(Vec<u8>, Option<Vec<u8>>)> {
    let (kind, credentials) = authorization.split_once(' ')?;
    if !kind.eq_ignore_ascii_case("basic") {
        return None;
    }
    let mut credentials = BASE64.decode(credentials.trim()).ok()?;
    match credentials.iter().position(|&b| b == b':') {
        Some(delimiter) => {
            let password = credentials.split_off(delimiter + 1);
            credentials.truncate(delimiter);
            Some((credentials, Some(password)))
        }
        None => Some((credentials, None)),
    }
}

fn fetch_host_port<'a, F>(get: &F) -> Result<(String, Option<u16>), Error>
where
    F: Fn(&str) -> Option<&'a str>,
{
    // Only read when nothing else gives a port.
    let server_port = || -> Result<Option<u16>, Error> {
        Ok(get("SERVER_PORT").map(parse_port).transpose()?.flatten())
    };
    if let Some(host_port) = get("HTTP_HOST") {
        let (host, port) = parse_host_port(host_port)?;
        let port = match port {
            Some(port) => Some(port),
            None => server_port()?,
        };
        return Ok((host.to_string(), port));
    }
    match get("SERVER_ADDR") {
        Some(address) if validate_ipv4_address(address) => {
            Ok((address.to_string(), server_port()?))
        }
        Some(address) => Ok((format!("[{}]", address), server_port()?)),
        None => {
            log::debug!("neither HTTP_HOST nor SERVER_ADDR is set");
            Err(Error::HostnameNotDetected)
        }
    }
}

fn fetch_request_uri<'a, F>(get: &F) -> (String, Option<String>)
where
    F: Fn(&str) -> Option<&'a str>,
{
    let query_string = get("QUERY_STRING")
        .filter(|query| !query.is_empty())
        .map(str::to_string);
    match get("REQUEST_URI") {
        Some(request_uri) => match request_uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (request_uri.to_string(), query_string),
        },
        None => (get("PHP_SELF").unwrap_or_default().to_string(), query_string),
    }
}
