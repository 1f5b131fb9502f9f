//! The url-safe, unpadded encoding that binary credential fields use on the
//! wire, since raw bytes cannot cross the JSON boundary directly.

use data_encoding::{BASE64URL, BASE64URL_NOPAD, Specification};

/// Convert bytes to base64url without padding.
pub fn base64url(data: &[u8]) -> String {
    BASE64URL_NOPAD.encode(data)
}

/// Parse unpadded base64url text back into the bytes it encodes.
///
/// Only the url-safe alphabet `[A-Za-z0-9_-]` is accepted; standard base64
/// (`+`, `/`) and padding characters are rejected. Non-canonical trailing
/// bits are tolerated, matching what lenient platform decoders accept.
pub fn try_from_base64url(input: &str) -> Result<Vec<u8>, NotBase64UrlEncoded> {
    let specs = Specification {
        check_trailing_bits: false,
        padding: None,
        ..BASE64URL.specification()
    };
    let encoding = specs.encoding().expect("specification is valid");
    encoding
        .decode(input.as_bytes())
        .map_err(|_| NotBase64UrlEncoded)
}

/// The string given for decoding is not unpadded `base64url` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("input is not unpadded base64url data")]
pub struct NotBase64UrlEncoded;
