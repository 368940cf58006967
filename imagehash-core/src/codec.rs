//! Byte-stream and hex helpers shared by the fixed and extended hash codecs.

use std::io::{self, Read};

use crate::error::{HashError, Result};
use crate::kind::Kind;

/// Separator between the kind character and the hex payload.
pub const KIND_SEPARATOR: char = ':';

/// Read into `buf` until it is full or the reader is exhausted.
///
/// Returns the number of bytes read, so callers can tell an empty stream
/// from a truncated one.
pub(crate) fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fill `buf` completely or fail with [`HashError::TruncatedStream`].
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let actual = read_up_to(reader, buf)?;
    if actual < buf.len() {
        return Err(HashError::TruncatedStream {
            expected: buf.len(),
            actual,
        });
    }
    Ok(())
}

/// Read the leading kind byte of a dumped hash.
pub(crate) fn read_kind<R: Read + ?Sized>(reader: &mut R) -> Result<Kind> {
    let mut code = [0u8; 1];
    if read_up_to(reader, &mut code)? == 0 {
        return Err(HashError::EmptyStream);
    }
    Kind::from_code(code[0])
}

/// Split `"<k>:<hex>"` into its kind and (non-empty) hex payload.
pub(crate) fn split_kind(text: &str) -> Result<(Kind, &str)> {
    if text.is_empty() {
        return Err(HashError::EmptyInput);
    }

    let (prefix, payload) = text.split_once(KIND_SEPARATOR).ok_or_else(|| {
        HashError::MalformedEncoding(format!("missing '{KIND_SEPARATOR}' separator"))
    })?;

    let mut chars = prefix.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => Kind::from_char(c)?,
        _ => {
            return Err(HashError::MalformedEncoding(format!(
                "kind prefix must be a single character, got {prefix:?}"
            )))
        }
    };

    if payload.is_empty() {
        return Err(HashError::MalformedEncoding("empty hex payload".into()));
    }
    if let Some(bad) = payload.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HashError::MalformedEncoding(format!(
            "non-hexadecimal character {bad:?} in payload"
        )));
    }

    Ok((kind, payload))
}

/// Render `bytes` as exactly `digits` lowercase hex digits.
///
/// The dropped leading digits must be zero; hash types keep their unused
/// high bits clear, so this only trims padding.
pub(crate) fn encode_hex(bytes: &[u8], digits: usize) -> String {
    let full = hex::encode(bytes);
    let skip = full.len().saturating_sub(digits);
    full[skip..].to_string()
}

/// Decode a hex payload into exactly `byte_len` big-endian bytes.
///
/// Short payloads are left-padded with zeros; payloads with more digits than
/// fit in `byte_len` bytes are rejected.
pub(crate) fn decode_hex(payload: &str, byte_len: usize) -> Result<Vec<u8>> {
    let max_digits = byte_len * 2;
    if payload.len() > max_digits {
        return Err(HashError::MalformedEncoding(format!(
            "hex payload has {} digits, at most {max_digits} allowed",
            payload.len()
        )));
    }

    let mut padded = "0".repeat(max_digits - payload.len());
    padded.push_str(payload);

    hex::decode(&padded).map_err(|e| HashError::MalformedEncoding(format!("invalid hex payload: {e}")))
}
