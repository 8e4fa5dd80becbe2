//! Address and hashing primitives used while preparing a genesis.
//!
//! - **bech32** (BIP-173) decoding, prefix conversion and account-address
//!   validation
//! - **Blake2b-256** for the determinism digest of a preparation run

pub mod address;
pub mod hash;

pub use address::{
    convert_prefix, decode_address, encode_account_address, validate_account_address,
    AddressError,
};
pub use hash::{blake2b_256, Blake2bDigest};
