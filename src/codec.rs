//! Percent-encoding and character class validation shared by every URI
//! component.
//!
//! ```rust
//! use uri_schemes::{codec, Component};
//!
//! let raw = codec::encode(Component::Path, b"/a b/%");
//! assert_eq!("/a%20b/%25", raw);
//! assert_eq!(b"/a b/%".to_vec(), codec::decode(Component::Path, &raw).unwrap());
//! ```

use std::collections::HashSet;

use super::{
    character_classes::{
        DIGIT, PATH_NOT_PCT_ENCODED, QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, REG_NAME_NOT_PCT_ENCODED, SCHEME_NOT_FIRST,
        USER_INFO_NOT_PCT_ENCODED,
    },
    component::Component,
    error::{SyntaxError, SyntaxReason},
    parse_host_port::validate_host,
    parser::check_scheme,
};

/// Validate `raw` against the character class of `component` and decode its
/// percent-encoded triplets.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for a character outside the component's class or
/// a `%` which is not followed by two hexadecimal digits.
pub fn decode(component: Component, raw: &str) -> Result<Vec<u8>, SyntaxError> {
    match component {
        Component::Scheme => {
            check_scheme(raw)?;
            Ok(raw.as_bytes().to_vec())
        }
        Component::Port => decode_element(raw, &DIGIT, component),
        Component::Host if raw.starts_with('[') => {
            validate_host(raw)?;
            Ok(raw.as_bytes().to_vec())
        }
        _ => decode_element(raw, decoded_characters(component), component),
    }
}

/// Percent-encode every byte of `value` which may not appear as itself in
/// `component`.  Hexadecimal digits of the triplets are uppercase.
#[must_use]
pub fn encode(component: Component, value: &[u8]) -> String {
    encode_element(value, decoded_characters(component))
}

fn decoded_characters(component: Component) -> &'static HashSet<char> {
    match component {
        Component::Scheme => &SCHEME_NOT_FIRST,
        Component::UserInfo => &USER_INFO_NOT_PCT_ENCODED,
        Component::Host => &REG_NAME_NOT_PCT_ENCODED,
        Component::Port => &DIGIT,
        Component::Path => &PATH_NOT_PCT_ENCODED,
        Component::Query | Component::Fragment => &QUERY_OR_FRAGMENT_NOT_PCT_ENCODED,
    }
}

pub(crate) fn decode_element<T>(
    element: T,
    allowed_characters: &HashSet<char>,
    component: Component,
) -> Result<Vec<u8>, SyntaxError>
where
    T: AsRef<str>,
{
    let element = element.as_ref();
    let bytes = element.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut chars = element.char_indices();
    while let Some((position, c)) = chars.next() {
        if c == '%' {
            let byte = bytes
                .get(position + 1..position + 3)
                .and_then(|pair| Some(hex_value(pair[0])? << 4 | hex_value(pair[1])?))
                .ok_or_else(|| {
                    SyntaxError::new(
                        Some(component),
                        element,
                        SyntaxReason::MalformedPercentEncoding { position },
                    )
                })?;
            decoded.push(byte);
            // Both digits are ASCII, hence one char each.
            chars.next();
            chars.next();
        } else if allowed_characters.contains(&c) {
            decoded.push(c as u8);
        } else {
            return Err(SyntaxError::new(
                Some(component),
                element,
                SyntaxReason::IllegalCharacter {
                    character: c,
                    position,
                },
            ));
        }
    }
    Ok(decoded)
}

pub(crate) fn validate_element<T>(
    element: T,
    allowed_characters: &HashSet<char>,
    component: Component,
) -> Result<(), SyntaxError>
where
    T: AsRef<str>,
{
    decode_element(element, allowed_characters, component).map(drop)
}

pub(crate) fn encode_element<T>(element: T, allowed_characters: &HashSet<char>) -> String
where
    T: AsRef<[u8]>,
{
    element
        .as_ref()
        .iter()
        .fold(String::new(), |mut encoding, &byte| {
            let c = char::from(byte);
            if byte.is_ascii() && allowed_characters.contains(&c) {
                encoding.push(c);
            } else {
                encoding.push('%');
                encoding.push(hex_digit(byte >> 4));
                encoding.push(hex_digit(byte & 0x0F));
            }
            encoding
        })
}

/// Decode the percent-encoded triplets of an already validated raw element.
pub(crate) fn percent_decode(element: &str) -> Vec<u8> {
    let bytes = element.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let triplet = bytes
            .get(i + 1..i + 3)
            .filter(|_| bytes[i] == b'%')
            .and_then(|pair| Some(hex_value(pair[0])? << 4 | hex_value(pair[1])?));
        match triplet {
            Some(byte) => {
                decoded.push(byte);
                i += 3;
            }
            None => {
                decoded.push(bytes[i]);
                i += 1;
            }
        }
    }
    decoded
}

/// Rewrite an already validated raw element so that every percent-encoded
/// triplet uses uppercase hexadecimal digits.  With `lowercase`, the other
/// ASCII letters are folded to lowercase.
pub(crate) fn normalize_element(element: &str, lowercase: bool) -> String {
    let mut normalized = String::with_capacity(element.len());
    let mut digits_left = 0;
    for c in element.chars() {
        if digits_left > 0 {
            normalized.push(c.to_ascii_uppercase());
            digits_left -= 1;
        } else if c == '%' {
            normalized.push(c);
            digits_left = 2;
        } else if lowercase {
            normalized.push(c.to_ascii_lowercase());
        } else {
            normalized.push(c);
        }
    }
    normalized
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from(b"0123456789ABCDEF"[usize::from(nibble)])
}
