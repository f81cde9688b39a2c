use std::fmt::Write;

/// Lowercase hex with no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hex() {
        assert_eq!(to_hex(&[0xde, 0xad, 0x0f]), "dead0f");
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_hex(&[]), "");
    }
}
