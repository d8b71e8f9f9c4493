//! Text renderings for addresses and raw payload bytes.

use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Format 6 bytes as a lowercase, colon-separated MAC address.
///
/// ```
/// use capfield::engine::format::format_mac;
///
/// assert_eq!(format_mac([0xaa, 0xbb, 0x0c, 0xdd, 0xee, 0x01]), "aa:bb:0c:dd:ee:01");
/// ```
pub fn format_mac(bytes: [u8; 6]) -> String {
    let [a, b, c, d, e, f] = bytes;
    format!("{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}")
}

pub fn format_ipv4(bytes: [u8; 4]) -> String {
    Ipv4Addr::from(bytes).to_string()
}

pub fn format_ipv6(bytes: [u8; 16]) -> String {
    Ipv6Addr::from(bytes).to_string()
}

/// Uppercase hex without separators, two characters per byte.
pub fn hex_upper(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02X}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_is_zero_padded() {
        assert_eq!(format_mac([0, 1, 2, 3, 4, 5]), "00:01:02:03:04:05");
    }

    #[test]
    fn ipv6_uses_compressed_form() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xfe;
        bytes[1] = 0x80;
        bytes[15] = 1;
        assert_eq!(format_ipv6(bytes), "fe80::1");
    }

    #[test]
    fn hex_is_uppercase() {
        assert_eq!(hex_upper(&[0x0a, 0xff, 0x10]), "0AFF10");
        assert_eq!(hex_upper(&[]), "");
    }
}
