use alloc::{format, string::String, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use core::{fmt, str::FromStr};
use sha2::{Digest, Sha256};

/// SHA-256 digest of the given bytes.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// A 32-byte SHA-256 based hash, displayed in base58.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct CryptoHash(pub [u8; 32]);

impl CryptoHash {
    /// Hash of the raw bytes.
    pub fn hash_bytes(bytes: &[u8]) -> Self {
        CryptoHash(sha256(bytes))
    }

    /// Hash of the borsh serialization of the given value.
    pub fn hash_borsh<T: BorshSerialize>(value: T) -> Self {
        CryptoHash(sha256(
            &borsh::to_vec(&value).expect("in-memory serialization never fails"),
        ))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Hash of the concatenation of two hashes, serialized as a fixed pair.
///
/// A fixed-length pair of 32-byte arrays is borsh-encoded as the 64 raw
/// bytes with no length prefix, so this is `sha256(hash1 ‖ hash2)`.
pub fn combine_hash(hash1: &CryptoHash, hash2: &CryptoHash) -> CryptoHash {
    CryptoHash::hash_borsh((hash1, hash2))
}

impl AsRef<[u8]> for CryptoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for CryptoHash {
    type Error = TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(CryptoHash(<[u8; 32]>::try_from(bytes).map_err(|_| {
            TryFromSliceError {
                expected: 32,
                actual: bytes.len(),
            }
        })?))
    }
}

/// Error returned when constructing a hash from a slice of the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFromSliceError {
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for TryFromSliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid hash length: expected {} bytes, got {}",
            self.expected, self.actual
        )
    }
}

impl FromStr for CryptoHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: Vec<u8> = bs58::decode(s)
            .into_vec()
            .map_err(|err| format!("invalid base58 hash: {}", err))?;
        CryptoHash::try_from(bytes.as_slice()).map_err(|err| format!("{}", err))
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
