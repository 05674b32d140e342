//! Conversions between Rust strings and the null-terminated UTF-16 strings expected by
//! wide-character APIs.
//!
//! Win32 `W` entry points, and wide-character interfaces in general, take a pointer to a sequence
//! of 16-bit code units whose end is marked by a single zero unit. Rust strings are UTF-8 and
//! carry an explicit length instead, so every call across such a boundary needs a conversion.
//! [`WideString`] owns a converted, terminated buffer; the free functions cover the raw unit and
//! byte-level forms.
//!
//! Sample usage:
//! ```
//! let title = utf16z::WideString::new("my window")
//!     .expect("title contains an embedded null");
//!
//! // hand title.as_ptr() to a function expecting a null-terminated wide string,
//! // e.g. CreateWindowExW; the buffer stays valid as long as `title` lives
//! assert_eq!(title.as_units().last(), Some(&0x0000));
//!
//! // reading a wide out-parameter back into a Rust string
//! let buf = [0x0041, 0x0042, 0x0000, 0xFFFF];
//! let s = utf16z::utf16_null_to_string(&buf).unwrap();
//! assert_eq!(s, "AB");
//! ```


#[cfg(windows)]
mod boundary_windows;

#[cfg(not(windows))]
mod boundary_portable;


use std::fmt;

#[cfg(windows)]
use crate::boundary_windows::{ansi_bytes_to_wide, wide_to_ansi_bytes};

#[cfg(not(windows))]
use crate::boundary_portable::{ansi_bytes_to_wide, wide_to_ansi_bytes};


/// An error that may occur while converting between Rust strings and wide strings.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EncodingError {
    /// The input string contains a null scalar value, which a consumer of a null-terminated
    /// string would misread as the end of the string.
    EmbeddedNul { position: usize },

    /// A sequence of 16-bit code units could not be decoded as UTF-16.
    InvalidUtf16 { value: Vec<u16> },

    /// A byte buffer holding little-endian UTF-16 data has an odd number of bytes.
    OddByteLength { obtained_length: usize },

    /// A byte string cannot be decoded using the platform ANSI encoding.
    InvalidAnsi { value: Vec<u8> },

    /// A string cannot be encoded using the platform ANSI encoding.
    NonAnsiEncodable { string: String },
}
impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmbeddedNul { position }
                => write!(f, "string contains a null scalar value at index {}", position),
            Self::InvalidUtf16 { value }
                => write!(f, "failed to decode value as UTF-16: {:?}", value),
            Self::OddByteLength { obtained_length }
                => write!(f, "byte length {} not divisible by 2", obtained_length),
            Self::InvalidAnsi { value }
                => write!(f, "failed to decode value with the platform ANSI encoding: {:?}", value),
            Self::NonAnsiEncodable { string }
                => write!(f, "failed to encode {:?} using the platform ANSI encoding", string),
        }
    }
}
impl std::error::Error for EncodingError {
}


/// An owned, null-terminated UTF-16 string.
///
/// The buffer always ends with exactly one zero code unit and, by construction, contains no other
/// zero unit, so a pointer to it can be passed directly to an API expecting a terminated wide
/// string. Use [`str_to_utf16_null`] instead if embedded null scalar values must be passed
/// through literally.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WideString {
    units: Vec<u16>,
}
impl WideString {
    /// Converts the given string, rejecting input that contains a null scalar value.
    pub fn new(s: &str) -> Result<Self, EncodingError> {
        if let Some(position) = s.chars().position(|c| c == '\u{0}') {
            return Err(EncodingError::EmbeddedNul { position });
        }
        Ok(Self::new_unchecked(s))
    }

    /// Converts the given string without checking for embedded null scalar values.
    ///
    /// Any null scalar value in the input is encoded literally; a consumer reading up to the
    /// first zero unit then sees a truncated string.
    pub fn new_unchecked(s: &str) -> Self {
        Self { units: str_to_utf16_null(s) }
    }

    /// Returns the code units of this string, including the terminator.
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// Returns a pointer to the first code unit, suitable for a wide-string API parameter.
    ///
    /// The pointer is valid for as long as this value is neither dropped nor moved.
    pub fn as_ptr(&self) -> *const u16 {
        self.units.as_ptr()
    }

    /// Returns the number of code units before the terminator.
    pub fn units_len(&self) -> usize {
        self.units.len() - 1
    }

    /// Returns whether this string is empty, i.e. consists of the terminator alone.
    pub fn is_empty(&self) -> bool {
        self.units.len() == 1
    }

    /// Consumes this string, returning the underlying terminated buffer.
    pub fn into_units(self) -> Vec<u16> {
        self.units
    }
}
impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decoded = String::from_utf16_lossy(&self.units[..self.units.len() - 1]);
        f.write_str(&decoded)
    }
}
impl TryFrom<&str> for WideString {
    type Error = EncodingError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}


/// Converts the given string into UTF-16 code units followed by a single zero terminator.
///
/// Scalar values up to U+FFFF become one unit; values above become a high/low surrogate pair.
/// The output therefore always has at least one unit and its final unit is always zero. A null
/// scalar value in the input is passed through literally; see [`WideString::new`] for the
/// checked variant.
pub fn str_to_utf16_null(s: &str) -> Vec<u16> {
    let mut units: Vec<u16> = s.encode_utf16().collect();
    units.push(0x0000);
    units
}


/// Converts a buffer of UTF-16 code units into a string, reading up to the first zero unit.
///
/// Wide-character APIs commonly fill a fixed-size buffer and terminate the logical string within
/// it; anything after the first zero unit is ignored. A buffer containing no zero unit is decoded
/// in full.
pub fn utf16_null_to_string(units: &[u16]) -> Result<String, EncodingError> {
    let logical = match units.iter().position(|&w| w == 0x0000) {
        Some(nul_index) => &units[..nul_index],
        None => units,
    };
    String::from_utf16(logical)
        .or(Err(EncodingError::InvalidUtf16 { value: Vec::from(logical) }))
}


/// Converts the given string into UTF-16 values stored as bytes in little-endian format.
///
/// No terminator is appended; this is the form wide strings take in length-prefixed protocol
/// fields and file formats.
pub fn str_to_utf16_le_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .flat_map(|w| w.to_le_bytes())
        .collect()
}


/// Converts UTF-16 values stored as bytes in little-endian format into a string.
pub fn utf16_le_bytes_to_string(bytes: &[u8]) -> Result<String, EncodingError> {
    if bytes.len() % 2 != 0 {
        return Err(EncodingError::OddByteLength { obtained_length: bytes.len() });
    }
    let u16s: Vec<u16> = bytes.chunks_exact(2)
        .map(|chk| u16::from_le_bytes(chk.try_into().unwrap()))
        .collect();
    String::from_utf16(&u16s)
        .or(Err(EncodingError::InvalidUtf16 { value: u16s }))
}


/// Converts a byte string in the platform ANSI encoding into a Rust string.
///
/// On Windows this consults the configured ANSI code page; elsewhere the bytes are taken to be
/// UTF-8.
pub fn ansi_bytes_to_string(bytes: &[u8]) -> Result<String, EncodingError> {
    let wide = ansi_bytes_to_wide(bytes)
        .ok_or_else(|| EncodingError::InvalidAnsi { value: Vec::from(bytes) })?;
    String::from_utf16(&wide)
        .or(Err(EncodingError::InvalidUtf16 { value: wide }))
}


/// Converts a Rust string into a byte string in the platform ANSI encoding.
pub fn string_to_ansi_bytes(s: &str) -> Result<Vec<u8>, EncodingError> {
    let wide: Vec<u16> = s.encode_utf16().collect();
    wide_to_ansi_bytes(&wide)
        .ok_or_else(|| EncodingError::NonAnsiEncodable { string: s.to_owned() })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_ascii_maps_one_to_one() {
        let units = str_to_utf16_null("hello");
        let expected: Vec<u16> = "hello".bytes()
            .map(u16::from)
            .chain(std::iter::once(0x0000))
            .collect();
        assert_eq!(units, expected);
    }

    #[test]
    fn encode_concrete_vectors() {
        assert_eq!(str_to_utf16_null("AB"), vec![0x0041, 0x0042, 0x0000]);
        assert_eq!(str_to_utf16_null(""), vec![0x0000]);
        assert_eq!(str_to_utf16_null("\u{1F600}"), vec![0xD83D, 0xDE00, 0x0000]);
    }

    #[test]
    fn encode_terminator_is_the_only_zero() {
        for s in ["", "A", "ein größerer Text", "\u{1F600}\u{10000}\u{10FFFF}"] {
            let units = str_to_utf16_null(s);
            assert_eq!(units.iter().filter(|&&w| w == 0x0000).count(), 1);
            assert_eq!(units.last(), Some(&0x0000));
        }
    }

    #[test]
    fn encode_surrogate_pairs_reconstruct() {
        for scalar in [0x10000_u32, 0x103A5, 0x1F600, 0x10FFFF] {
            let c = char::from_u32(scalar).unwrap();
            let units = str_to_utf16_null(&c.to_string());
            assert_eq!(units.len(), 3);
            let (high, low) = (u32::from(units[0]), u32::from(units[1]));
            assert!((0xD800..=0xDBFF).contains(&high));
            assert!((0xDC00..=0xDFFF).contains(&low));
            let reconstructed = 0x10000 + (((high - 0xD800) << 10) | (low - 0xDC00));
            assert_eq!(reconstructed, scalar);
        }
    }

    #[test]
    fn encode_passes_embedded_nul_through() {
        assert_eq!(str_to_utf16_null("A\u{0}B"), vec![0x0041, 0x0000, 0x0042, 0x0000]);
    }

    #[test]
    fn decode_round_trips() {
        for s in ["", "AB", "ein größerer Text", "\u{1F600} ok \u{10FFFF}"] {
            let units = str_to_utf16_null(s);
            assert_eq!(utf16_null_to_string(&units).unwrap(), s);
        }
    }

    #[test]
    fn decode_stops_at_first_nul() {
        let buf = [0x0041, 0x0042, 0x0000, 0x0043, 0x0000, 0xFFFF];
        assert_eq!(utf16_null_to_string(&buf).unwrap(), "AB");
    }

    #[test]
    fn decode_unterminated_buffer_in_full() {
        let buf = [0x0041, 0x0042];
        assert_eq!(utf16_null_to_string(&buf).unwrap(), "AB");
    }

    #[test]
    fn decode_rejects_unpaired_surrogate() {
        let buf = [0x0041, 0xD800, 0x0000];
        assert_eq!(
            utf16_null_to_string(&buf),
            Err(EncodingError::InvalidUtf16 { value: vec![0x0041, 0xD800] }),
        );
    }

    #[test]
    fn wide_string_rejects_embedded_nul() {
        assert_eq!(
            WideString::new("AB\u{0}C"),
            Err(EncodingError::EmbeddedNul { position: 2 }),
        );
    }

    #[test]
    fn wide_string_accessors() {
        let ws = WideString::new("AB").unwrap();
        assert_eq!(ws.as_units(), &[0x0041, 0x0042, 0x0000]);
        assert_eq!(ws.units_len(), 2);
        assert!(!ws.is_empty());
        assert_eq!(ws.to_string(), "AB");

        let empty = WideString::new("").unwrap();
        assert_eq!(empty.as_units(), &[0x0000]);
        assert_eq!(empty.units_len(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn wide_string_unchecked_keeps_nul() {
        let ws = WideString::new_unchecked("A\u{0}B");
        assert_eq!(ws.as_units(), &[0x0041, 0x0000, 0x0042, 0x0000]);
        assert_eq!(ws.units_len(), 3);
    }

    #[test]
    fn le_bytes_round_trip() {
        let bytes = str_to_utf16_le_bytes("A\u{1F600}");
        assert_eq!(bytes, vec![0x41, 0x00, 0x3D, 0xD8, 0x00, 0xDE]);
        assert_eq!(utf16_le_bytes_to_string(&bytes).unwrap(), "A\u{1F600}");
    }

    #[test]
    fn le_bytes_reject_odd_length() {
        assert_eq!(
            utf16_le_bytes_to_string(&[0x41, 0x00, 0x42]),
            Err(EncodingError::OddByteLength { obtained_length: 3 }),
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn ansi_round_trip_is_utf8() {
        let bytes = string_to_ansi_bytes("größer").unwrap();
        assert_eq!(bytes, "größer".as_bytes());
        assert_eq!(ansi_bytes_to_string(&bytes).unwrap(), "größer");
    }

    #[cfg(not(windows))]
    #[test]
    fn ansi_rejects_invalid_bytes() {
        assert_eq!(
            ansi_bytes_to_string(&[0x41, 0xFF]),
            Err(EncodingError::InvalidAnsi { value: vec![0x41, 0xFF] }),
        );
    }
}
