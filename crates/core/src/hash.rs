//! Blake3 hashing utilities for the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named alias for a 32-byte(u8) array, used to represent a 256-bit hash.
pub type H256 = [u8; 32];

/// Width of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A block digest in lowercase hexadecimal form.
///
/// The only non-hex value ever stored is the literal `"0"` used as the
/// genesis block's back-link.
#[derive(Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// The back-link stored in the genesis block.
    pub const GENESIS_PARENT: &'static str = "0";

    /// The digest the genesis block points back to.
    pub fn genesis_parent() -> Self {
        Self(Self::GENESIS_PARENT.to_string())
    }

    /// Create a digest from raw bytes.
    pub fn from_bytes(bytes: H256) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse from a hex string, normalising to lowercase.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self::from_bytes(arr))
    }

    /// Borrow the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the genesis back-link.
    pub fn is_genesis_parent(&self) -> bool {
        self.0 == Self::GENESIS_PARENT
    }

    /// Number of leading `'0'` hex characters.
    pub fn leading_zeros(&self) -> usize {
        self.0.chars().take_while(|c| *c == '0').count()
    }

    /// Check the proof-of-work condition: the first `difficulty` hex
    /// characters are all `'0'`.
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        self.0.len() >= difficulty && self.leading_zeros() >= difficulty
    }

    /// A shortened form for log lines and tables.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(16)]
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.0[..self.0.len().min(8)])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<H256> for Digest {
    fn from(bytes: H256) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Digest {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Digest {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Hash arbitrary data using Blake3.
pub fn hash(data: &[u8]) -> Digest {
    Digest::from_bytes(blake3::hash(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"hello world";
        assert_eq!(hash(data), hash(data));
    }

    #[test]
    fn test_hash_different_inputs() {
        assert_ne!(hash(b"hello"), hash(b"world"));
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let h = hash(b"test data");
        assert_eq!(h.as_str().len(), DIGEST_HEX_LEN);
        assert!(h
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_from_hex_normalises_case() {
        let h = hash(b"test");
        let upper = h.as_str().to_uppercase();
        assert_eq!(Digest::from_hex(&upper).unwrap(), h);
        assert!(Digest::from_hex("abcd").is_err());
    }

    #[test]
    fn test_genesis_parent() {
        let parent = Digest::genesis_parent();
        assert!(parent.is_genesis_parent());
        assert_eq!(parent, "0");
        assert!(!hash(b"x").is_genesis_parent());
    }

    #[test]
    fn test_meets_difficulty() {
        let d = Digest::from_hex(&format!("00a{}", "f".repeat(61))).unwrap();
        assert_eq!(d.leading_zeros(), 2);
        assert!(d.meets_difficulty(0));
        assert!(d.meets_difficulty(2));
        assert!(!d.meets_difficulty(3));
    }
}
