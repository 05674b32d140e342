//! Boundary functions for operating systems other than Windows.
//!
//! Other operating systems do not have a concept of the ANSI character set. While a custom
//! character set may be chosen, the absolute majority of systems use UTF-8, so the ANSI side of
//! the boundary is treated as UTF-8 here.


/// Converts a UTF-8 byte string into UTF-16 code units.
pub fn ansi_bytes_to_wide(ansi_bytes: &[u8]) -> Option<Vec<u16>> {
    let s = std::str::from_utf8(ansi_bytes).ok()?;
    Some(s.encode_utf16().collect())
}


/// Converts UTF-16 code units into a UTF-8 byte string.
pub fn wide_to_ansi_bytes(wide: &[u16]) -> Option<Vec<u8>> {
    let s = String::from_utf16(wide).ok()?;
    Some(s.into_bytes())
}
