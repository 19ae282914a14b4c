//! Semi-octet (nibble swapped BCD) helpers

/// Swap each pair of hex characters, padding an odd tail with `F`, then drop
/// every `F`
///
/// `"1032547698F1"` becomes `"0123456789"` with the trailing `1F` pair read as
/// a padded odd digit.
pub fn swap_nibbles(hex: &str) -> String {
    let chars: Vec<char> = hex.chars().collect();
    let mut swapped = String::with_capacity(chars.len() + 1);
    for pair in chars.chunks(2) {
        match *pair {
            [hi, lo] => {
                swapped.push(lo);
                swapped.push(hi);
            }
            [last] => {
                swapped.push(last);
                swapped.push('F');
            }
            _ => {}
        }
    }
    swapped.retain(|c| !c.eq_ignore_ascii_case(&'F'));
    swapped
}

/// Decode semi-octets: low nibble first, `F` padding dropped
///
/// Nibbles A to E are kept as uppercase hex characters.
pub fn semi_octets(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        for nibble in [b & 0x0F, b >> 4] {
            if nibble != 0x0F {
                out.push(nibble_char(nibble));
            }
        }
    }
    out
}

/// Decode semi-octets keeping decimal digits only
pub fn digits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        for nibble in [b & 0x0F, b >> 4] {
            if nibble <= 9 {
                out.push(char::from(b'0' + nibble));
            }
        }
    }
    out
}

/// Swap the nibbles of one byte and render both as hex characters
pub(crate) const fn swapped_pair(byte: u8) -> [char; 2] {
    [nibble_char(byte & 0x0F), nibble_char(byte >> 4)]
}

const fn nibble_char(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'A' + nibble - 10) as char,
    }
}
