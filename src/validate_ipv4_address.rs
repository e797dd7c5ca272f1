/// Determines if the given string is an `IPv4address` as specified in
/// [RFC 3986 section 3.2.2](https://tools.ietf.org/html/rfc3986#section-3.2.2):
/// four dot-separated decimal octets without leading zeros.
pub(crate) fn validate_ipv4_address<T>(address: T) -> bool
where
    T: AsRef<str>,
{
    let mut octets = 0;
    for octet in address.as_ref().split('.') {
        octets += 1;
        let valid = match octet.as_bytes() {
            [] => false,
            [b'0'] => true,
            [b'0', ..] => false,
            digits if digits.len() <= 3 && digits.iter().all(u8::is_ascii_digit) => {
                octet.parse::<u16>().map_or(false, |value| value <= 255)
            }
            _ => false,
        };
        if !valid || octets > 4 {
            return false;
        }
    }
    octets == 4
}
