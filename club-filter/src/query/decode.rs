//! Percent-decoding of query string components.

use crate::constants::MAX_URL_DECODED_LEN;
use crate::error::DecodeError;

/// Decode one query string component: `%XX` escapes and `+` as space.
///
/// Malformed escapes are kept as written. Bytes that do not form valid
/// UTF-8 after decoding are replaced with U+FFFD.
///
/// # Errors
///
/// Returns [`DecodeError::TooLong`] when the decoded output would exceed
/// 64KB.
///
/// # Examples
///
/// ```
/// use club_filter::url_decode;
///
/// assert_eq!(url_decode("spring+gala").unwrap(), "spring gala");
/// assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
/// assert_eq!(url_decode("100%").unwrap(), "100%");
/// ```
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(s.len().min(MAX_URL_DECODED_LEN));
    let mut bytes = s.bytes();

    while let Some(b) = bytes.next() {
        match b {
            b'%' => {
                let h1 = bytes.next();
                let h2 = bytes.next();
                match (h1, h2) {
                    (Some(h1), Some(h2)) => match (hex_val(h1), hex_val(h2)) {
                        (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                        _ => out.extend_from_slice(&[b'%', h1, h2]),
                    },
                    (Some(h1), None) => out.extend_from_slice(&[b'%', h1]),
                    _ => out.push(b'%'),
                }
            },
            b'+' => out.push(b' '),
            _ => out.push(b),
        }

        // a malformed escape pushes up to 3 bytes at once
        if out.len() > MAX_URL_DECODED_LEN {
            return Err(DecodeError::TooLong);
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

const fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
