//! GSM 7-bit default alphabet packing
//!
//! Septets are mapped 1:1 to their code point; the national and extension
//! tables are not applied.

/// Unpack 7-bit packed septets
///
/// N input octets yield `N * 8 / 7` characters. Callers truncate to the
/// declared character count, since fill bits decode as trailing `@`.
pub fn unpack(octets: &[u8]) -> String {
    let mut out = String::with_capacity(octets.len() * 8 / 7 + 1);
    let mut current: u32 = 0;
    let mut shift = 0;

    for &octet in octets {
        current |= u32::from(octet) << shift;
        out.push(septet(current));
        current >>= 7;
        shift += 1;

        if shift == 7 {
            out.push(septet(current));
            current = 0;
            shift = 0;
        }
    }

    out
}

/// Pack text into 7-bit septets
///
/// Characters outside the 7-bit range are replaced with `?`.
pub fn pack(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 7 / 8 + 1);
    let mut current: u32 = 0;
    let mut bits = 0;

    for c in text.chars() {
        let code = u32::from(if c.is_ascii() { c } else { '?' });
        current |= code << bits;
        bits += 7;
        while bits >= 8 {
            out.push(current as u8);
            current >>= 8;
            bits -= 8;
        }
    }

    if bits > 0 {
        out.push(current as u8);
    }

    out
}

const fn septet(value: u32) -> char {
    (value & 0x7F) as u8 as char
}
