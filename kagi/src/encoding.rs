//! Base58Check encoding.
//!
//! Base58Check appends the first four bytes of `SHA256(SHA256(payload))` to
//! the payload and renders the result with the Bitcoin Base58 alphabet. It is
//! the shared text codec for WIF private keys and P2PKH addresses.

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Length of the Base58Check checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Compute the 4-byte Base58Check checksum of `payload`.
#[inline]
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = double_sha256(payload);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode bytes to Base58Check.
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));

    bs58::encode(data).into_string()
}

/// Encode a version byte followed by `payload` to Base58Check.
pub fn base58check_encode_versioned(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);

    base58check_encode(&data)
}

/// Decode a Base58Check string and verify its checksum.
///
/// Returns the payload without the checksum.
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding)?;

    // At least one payload byte plus the checksum
    if data.len() <= CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            expected: CHECKSUM_LEN + 1,
            actual: data.len(),
        });
    }

    let payload_len = data.len() - CHECKSUM_LEN;
    if data[payload_len..] != checksum(&data[..payload_len]) {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(payload_len);
    Ok(data)
}

/// Returns `true` if `encoded` is valid Base58 with a matching checksum.
pub fn is_valid_base58check(encoded: &str) -> bool {
    base58check_decode(encoded).is_ok()
}
