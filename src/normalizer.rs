use super::{codec::normalize_element, policy::SchemeRegistry, uri::Components};

/// Canonicalize already validated components without changing what they
/// mean, following [RFC 3986 section
/// 6.2.2](https://tools.ietf.org/html/rfc3986#section-6.2.2):
///
/// * the scheme and the host are folded to lowercase;
/// * percent-encoded triplets use uppercase hexadecimal digits everywhere;
/// * a port equal to the default port the registry gives for the scheme is
///   removed.
///
/// Normalizing normalized components gives them back unchanged.
pub(crate) fn normalize(components: Components, registry: &SchemeRegistry) -> Components {
    let Components {
        scheme,
        user_info,
        host,
        port,
        path,
        query,
        fragment,
    } = components;
    let scheme = scheme.map(|scheme| scheme.to_ascii_lowercase());
    let port = match (&scheme, port) {
        (Some(scheme), Some(port)) if registry.default_port(scheme) == Some(port) => None,
        (_, port) => port,
    };
    Components {
        scheme,
        user_info: user_info.map(|user_info| normalize_element(&user_info, false)),
        host: host.map(|host| normalize_element(&host, true)),
        port,
        path: normalize_element(&path, false),
        query: query.map(|query| normalize_element(&query, false)),
        fragment: fragment.map(|fragment| normalize_element(&fragment, false)),
    }
}
