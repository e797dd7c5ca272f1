use super::{
    authority::Authority,
    character_classes::{ALPHA, SCHEME_NOT_FIRST},
    component::Component,
    error::{SyntaxError, SyntaxReason},
    uri::Components,
};

/// Split a URI reference into its raw components following the generic
/// grammar of [RFC 3986 section 3](https://tools.ietf.org/html/rfc3986#section-3).
///
/// Only the structure is checked here, along with the port which has to be
/// turned into a number.  Character classes are checked when the components
/// are assembled into a [`Uri`](struct.Uri.html).
pub(crate) fn parse(uri_string: &str) -> Result<Components, SyntaxError> {
    if uri_string.is_empty() {
        return Err(SyntaxError::new(None, uri_string, SyntaxReason::EmptyInput));
    }
    let (rest, fragment) = split_off(uri_string, '#');
    let (rest, query) = split_off(rest, '?');
    let (scheme, rest) = match split_scheme(rest) {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, rest),
    };
    let (user_info, host, port, path) = match rest.strip_prefix("//") {
        Some(authority_and_path) => {
            let authority_end = authority_and_path
                .find('/')
                .unwrap_or(authority_and_path.len());
            let (authority, path) = authority_and_path.split_at(authority_end);
            let (user_info, host, port) = Authority::split(authority)?;
            (user_info, Some(host), port, path)
        }
        None => (None, None, None, rest),
    };
    log::trace!(
        "split {:?} into scheme={:?} user_info={:?} host={:?} port={:?} path={:?} query={:?} fragment={:?}",
        uri_string,
        scheme,
        user_info,
        host,
        port,
        path,
        query,
        fragment
    );
    Ok(Components {
        scheme: scheme.map(str::to_string),
        user_info: user_info.map(str::to_string),
        host: host.map(str::to_string),
        port,
        path: path.to_string(),
        query: query.map(str::to_string),
        fragment: fragment.map(str::to_string),
    })
}

/// Check the given string against the `scheme` rule.
pub(crate) fn check_scheme(scheme: &str) -> Result<&str, SyntaxError> {
    let mut chars = scheme.char_indices();
    match chars.next() {
        None => Err(SyntaxError::new(
            Some(Component::Scheme),
            scheme,
            SyntaxReason::EmptyScheme,
        )),
        Some((_, first)) if !ALPHA.contains(&first) => Err(illegal_scheme_character(scheme, first, 0)),
        Some(_) => match chars.find(|(_, c)| !SCHEME_NOT_FIRST.contains(c)) {
            Some((position, c)) => Err(illegal_scheme_character(scheme, c, position)),
            None => Ok(scheme),
        },
    }
}

/// Split off a leading scheme.  A scheme is only recognized when a valid
/// scheme is followed by a colon occurring before the first slash;
/// otherwise the whole input is a schemeless path.
pub(crate) fn split_scheme(uri_string: &str) -> Option<(&str, &str)> {
    // Limit our search so we don't scan into the authority
    // or path elements, because these may have the colon
    // character as well, which we might misinterpret
    // as the scheme delimiter.
    let authority_or_path_delimiter_start = uri_string.find('/').unwrap_or(uri_string.len());
    let scheme_end = uri_string[..authority_or_path_delimiter_start].find(':')?;
    let scheme = &uri_string[..scheme_end];
    check_scheme(scheme)
        .ok()
        .map(|scheme| (scheme, &uri_string[scheme_end + 1..]))
}

fn split_off(s: &str, delimiter: char) -> (&str, Option<&str>) {
    match s.find(delimiter) {
        Some(index) => (&s[..index], Some(&s[index + 1..])),
        None => (s, None),
    }
}

fn illegal_scheme_character(scheme: &str, character: char, position: usize) -> SyntaxError {
    SyntaxError::new(
        Some(Component::Scheme),
        scheme,
        SyntaxReason::IllegalCharacter {
            character,
            position,
        },
    )
}
