//! Windows-specific boundary functions.
//!
//! On Windows, the operating system provides functions to convert between the configured ANSI
//! code page and UTF-16. We use these for the ANSI side of the boundary and hand out `PCWSTR`
//! pointers for the wide side.


use windows::core::PCWSTR;
use windows::Win32::Globalization::{
    CP_ACP, MB_ERR_INVALID_CHARS, MB_PRECOMPOSED, MultiByteToWideChar, WC_COMPOSITECHECK,
    WideCharToMultiByte,
};

use crate::WideString;


impl WideString {
    /// Returns this string as a `PCWSTR` for a Win32 `W` entry point.
    ///
    /// The pointer is valid for as long as this value is neither dropped nor moved.
    pub fn as_pcwstr(&self) -> PCWSTR {
        PCWSTR::from_raw(self.as_ptr())
    }
}


/// Converts a byte string in the configured ANSI code page into UTF-16 code units.
pub fn ansi_bytes_to_wide(ansi_bytes: &[u8]) -> Option<Vec<u16>> {
    if ansi_bytes.len() == 0 {
        // okay, this is easy
        return Some(Vec::new());
    }

    // how many code units will we require?
    let wide_char_count = unsafe {
        MultiByteToWideChar(
            CP_ACP,
            MB_ERR_INVALID_CHARS | MB_PRECOMPOSED,
            ansi_bytes,
            None,
        )
    };
    let wide_char_usize: usize = wide_char_count.try_into().ok()?;
    if wide_char_usize == 0 {
        return None;
    }

    let mut buf = vec![0u16; wide_char_usize];
    let chars_written = unsafe {
        MultiByteToWideChar(
            CP_ACP,
            MB_ERR_INVALID_CHARS | MB_PRECOMPOSED,
            ansi_bytes,
            Some(buf.as_mut_slice()),
        )
    };
    let chars_written_usize: usize = chars_written.try_into().ok()?;
    if chars_written_usize == 0 {
        return None;
    }
    buf.truncate(chars_written_usize);

    Some(buf)
}


/// Converts UTF-16 code units into a byte string in the configured ANSI code page.
pub fn wide_to_ansi_bytes(wide: &[u16]) -> Option<Vec<u8>> {
    if wide.len() == 0 {
        return Some(Vec::new());
    }

    // how many bytes will we require?
    let byte_count = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_COMPOSITECHECK,
            wide,
            None,
            None,
            None,
        )
    };
    let byte_count_usize: usize = byte_count.try_into().ok()?;
    if byte_count_usize == 0 {
        return None;
    }

    let mut buf = vec![0u8; byte_count_usize];
    let bytes_written = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_COMPOSITECHECK,
            wide,
            Some(buf.as_mut_slice()),
            None,
            None,
        )
    };
    let bytes_written_usize: usize = bytes_written.try_into().ok()?;
    if bytes_written_usize == 0 {
        return None;
    }
    buf.truncate(bytes_written_usize);

    Some(buf)
}
