//! Content hashing for source files
//!
//! Provides [`ContentHash`], a 32-byte Blake3 digest used to tell whether a
//! migration actually changed a file and to identify file revisions in logs.

use std::fmt::{self, Display, Formatter};

/// A 32-byte content hash (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        let h1 = ContentHash::compute(b"export const a = 1;\n");
        let h2 = ContentHash::compute(b"export const a = 1;\n");
        assert_eq!(h1, h2);
    }

    #[test]
    fn single_byte_difference_changes_hash() {
        let h1 = ContentHash::compute(b"let a = 1;\n");
        let h2 = ContentHash::compute(b"let a = 1;\r\n");
        assert_ne!(h1, h2);
    }

    #[test]
    fn short_is_display_prefix() {
        let hash = ContentHash::compute(b"test");
        let short = hash.short();
        assert_eq!(short.len(), 16);
        assert!(hash.to_string().starts_with(&short));
        assert_eq!(hash.to_string().len(), 64);
    }
}
