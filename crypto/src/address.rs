//! Bech32 account addresses.
//!
//! Address format: `<prefix>1<data><checksum>` per BIP-173. The data part is
//! the raw account bytes: 20 for key-derived accounts, 32 for module and
//! multisig-derived accounts.
//!
//! Snapshot files carry addresses under whatever prefix the source chain
//! used; `convert_prefix` moves the same bytes under the canonical prefix.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use genesis_types::AccountAddress;
use thiserror::Error;

/// Payload lengths accepted for an account address.
const ACCOUNT_LENGTHS: [usize; 2] = [20, 32];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address")]
    Empty,

    #[error("invalid bech32 string {address}: {reason}")]
    Decode { address: String, reason: String },

    #[error("invalid prefix {prefix}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("address {address} has prefix {found}, expected {expected}")]
    PrefixMismatch {
        address: String,
        expected: String,
        found: String,
    },

    #[error("address {address} carries {len} bytes, expected 20 or 32")]
    InvalidLength { address: String, len: usize },

    #[error("address {address} is not in canonical form {canonical}")]
    NotCanonical { address: String, canonical: String },

    #[error("cannot encode address: {0}")]
    Encode(String),
}

/// Decode a bech32 string into its lowercase prefix and raw data bytes.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>), AddressError> {
    if address.trim().is_empty() {
        return Err(AddressError::Empty);
    }
    let checked =
        CheckedHrpstring::new::<Bech32>(address).map_err(|e| AddressError::Decode {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
    let prefix = checked.hrp().to_lowercase();
    let bytes: Vec<u8> = checked.byte_iter().collect();
    Ok((prefix, bytes))
}

/// Encode raw account bytes under `prefix`.
pub fn encode_account_address(prefix: &str, bytes: &[u8]) -> Result<AccountAddress, AddressError> {
    let hrp = Hrp::parse(prefix).map_err(|e| AddressError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: e.to_string(),
    })?;
    let encoded =
        bech32::encode::<Bech32>(hrp, bytes).map_err(|e| AddressError::Encode(e.to_string()))?;
    Ok(AccountAddress::new(encoded))
}

/// Re-encode an address from its own prefix to `prefix`, keeping the bytes.
pub fn convert_prefix(raw: &str, prefix: &str) -> Result<AccountAddress, AddressError> {
    let (_, bytes) = decode_address(raw.trim())?;
    encode_account_address(prefix, &bytes)
}

/// Check that `address` is a well-formed account address under `prefix`.
///
/// The string must also be the canonical lowercase encoding of its bytes, so
/// two accepted addresses are equal exactly when their bytes are. Returns the
/// decoded bytes on success.
pub fn validate_account_address(
    address: &AccountAddress,
    prefix: &str,
) -> Result<Vec<u8>, AddressError> {
    let (found, bytes) = decode_address(address.as_str())?;
    if found != prefix.to_lowercase() {
        return Err(AddressError::PrefixMismatch {
            address: address.to_string(),
            expected: prefix.to_string(),
            found,
        });
    }
    if !ACCOUNT_LENGTHS.contains(&bytes.len()) {
        return Err(AddressError::InvalidLength {
            address: address.to_string(),
            len: bytes.len(),
        });
    }
    let canonical = encode_account_address(prefix, &bytes)?;
    if &canonical != address {
        return Err(AddressError::NotCanonical {
            address: address.to_string(),
            canonical: canonical.to_string(),
        });
    }
    Ok(bytes)
}
