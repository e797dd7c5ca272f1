use super::{
    character_classes::{HEXDIG, IPV_FUTURE_LAST_PART, REG_NAME_NOT_PCT_ENCODED},
    codec::validate_element,
    component::Component,
    error::{SyntaxError, SyntaxReason},
    validate_ipv6_address::validate_ipv6_address,
};

/// Split the `host [ ":" port ]` part of an authority.  The port delimiter is
/// the last colon which is not inside a bracketed IP literal.
pub(crate) fn parse_host_port(host_port: &str) -> Result<(&str, Option<u16>), SyntaxError> {
    let (host, port) = split_host_port(host_port)?;
    Ok((host, port.map(parse_port).transpose()?.flatten()))
}

fn split_host_port(host_port: &str) -> Result<(&str, Option<&str>), SyntaxError> {
    if host_port.starts_with('[') {
        let literal_end = host_port.find(']').ok_or_else(|| {
            SyntaxError::new(
                Some(Component::Host),
                host_port,
                SyntaxReason::InvalidIpLiteral,
            )
        })?;
        let (host, rest) = host_port.split_at(literal_end + 1);
        return match rest {
            "" => Ok((host, None)),
            rest => match rest.strip_prefix(':') {
                Some(port) => Ok((host, Some(port))),
                None => Err(SyntaxError::new(
                    Some(Component::Host),
                    host_port,
                    SyntaxReason::TrailingCharactersAfterIpLiteral,
                )),
            },
        };
    }
    Ok(match host_port.rfind(':') {
        Some(delimiter) => (&host_port[..delimiter], Some(&host_port[delimiter + 1..])),
        None => (host_port, None),
    })
}

/// Interpret the text of a port.  An empty port is the same as no port.
pub(crate) fn parse_port(port: &str) -> Result<Option<u16>, SyntaxError> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SyntaxError::new(
            Some(Component::Port),
            port,
            SyntaxReason::InvalidPort,
        ));
    }
    // Leading zeros are allowed by the grammar, so skip them before checking
    // the range.
    let significant = port.trim_start_matches('0');
    if significant.len() > 5 {
        return Err(SyntaxError::new(
            Some(Component::Port),
            port,
            SyntaxReason::PortOutOfRange,
        ));
    }
    match significant {
        "" => Ok(Some(0)),
        digits => digits.parse::<u16>().map(Some).map_err(|_| {
            SyntaxError::new(Some(Component::Port), port, SyntaxReason::PortOutOfRange)
        }),
    }
}

/// Check a host against the `host` rule: a bracketed IPv6 address or
/// IPvFuture, or a registered name (which covers IPv4 addresses).
pub(crate) fn validate_host(host: &str) -> Result<(), SyntaxError> {
    match host
        .strip_prefix('[')
        .and_then(|literal| literal.strip_suffix(']'))
    {
        Some(literal) if is_ip_literal(literal) => Ok(()),
        Some(_) => Err(SyntaxError::new(
            Some(Component::Host),
            host,
            SyntaxReason::InvalidIpLiteral,
        )),
        None if host.starts_with('[') => Err(SyntaxError::new(
            Some(Component::Host),
            host,
            SyntaxReason::InvalidIpLiteral,
        )),
        None => validate_element(host, &REG_NAME_NOT_PCT_ENCODED, Component::Host),
    }
}

fn is_ip_literal(literal: &str) -> bool {
    match literal.strip_prefix(&['v', 'V'][..]) {
        Some(future) => is_ipv_future(future),
        None => validate_ipv6_address(literal),
    }
}

// IPvFuture  = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
fn is_ipv_future(future: &str) -> bool {
    match future.split_once('.') {
        Some((version, rest)) => {
            !version.is_empty()
                && version.chars().all(|c| HEXDIG.contains(&c))
                && !rest.is_empty()
                && rest.chars().all(|c| IPV_FUTURE_LAST_PART.contains(&c))
        }
        None => false,
    }
}
