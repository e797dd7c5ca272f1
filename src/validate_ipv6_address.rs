use super::validate_ipv4_address::validate_ipv4_address;

/// Determines if the given string is an `IPv6address` as specified in
/// [RFC 3986 section 3.2.2](https://tools.ietf.org/html/rfc3986#section-3.2.2),
/// without the surrounding brackets.
pub(crate) fn validate_ipv6_address<T>(address: T) -> bool
where
    T: AsRef<str>,
{
    let address = address.as_ref();
    let (head, tail) = match address.find("::") {
        Some(ellipsis) => (&address[..ellipsis], Some(&address[ellipsis + 2..])),
        None => (address, None),
    };
    let head_groups = match count_groups(head, tail.is_none()) {
        Some(groups) => groups,
        None => return false,
    };
    match tail {
        // The ellipsis stands for at least one group of zeros.
        Some(tail) => count_groups(tail, true).map_or(false, |tail_groups| {
            !tail.contains("::") && head_groups + tail_groups <= 7
        }),
        None => head_groups == 8,
    }
}

// Counts the 16-bit groups of a colon-separated run, an IPv4 address
// counting as two.  The IPv4 address may only close the whole address.
fn count_groups(run: &str, closes_address: bool) -> Option<usize> {
    if run.is_empty() {
        return Some(0);
    }
    let groups: Vec<&str> = run.split(':').collect();
    let mut count = 0;
    for (i, group) in groups.iter().enumerate() {
        let last = i + 1 == groups.len();
        if last && closes_address && group.contains('.') {
            if !validate_ipv4_address(group) {
                return None;
            }
            count += 2;
        } else if (1..=4).contains(&group.len()) && group.chars().all(|c| c.is_ascii_hexdigit()) {
            count += 1;
        } else {
            return None;
        }
    }
    Some(count)
}
