//! Canonical cache keys for integer sequences.

use std::fmt;

const WORD: usize = std::mem::size_of::<i64>();

/// A canonical, order-preserving encoding of an integer sequence.
///
/// Layout: the element count as a little-endian `u64`, followed by every
/// element as a little-endian `i64`. The encoding is lossless, so two keys are
/// byte-identical exactly when their sequences are element-wise equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Box<[u8]>);

impl CacheKey {
    /// Derives the key for `sequence`.
    pub fn from_sequence(sequence: &[i64]) -> Self {
        let mut bytes = Vec::with_capacity(WORD * (sequence.len() + 1));
        bytes.extend_from_slice(&(sequence.len() as u64).to_le_bytes());
        for value in sequence {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        Self(bytes.into_boxed_slice())
    }

    /// Raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of elements in the encoded sequence.
    pub fn sequence_len(&self) -> usize {
        (self.0.len() / WORD).saturating_sub(1)
    }

    /// Decodes the key back into the sequence it was derived from.
    pub fn to_sequence(&self) -> Vec<i64> {
        self.0[WORD..]
            .chunks_exact(WORD)
            .map(|chunk| {
                let mut word = [0u8; WORD];
                word.copy_from_slice(chunk);
                i64::from_le_bytes(word)
            })
            .collect()
    }
}

impl From<&[i64]> for CacheKey {
    fn from(sequence: &[i64]) -> Self {
        Self::from_sequence(sequence)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.to_sequence().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_sequence_same_key() {
        let a = CacheKey::from_sequence(&[3, 6, -2, -5, 7, 3]);
        let b = CacheKey::from_sequence(&[3, 6, -2, -5, 7, 3]);
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_order_matters() {
        let a = CacheKey::from_sequence(&[1, 2]);
        let b = CacheKey::from_sequence(&[2, 1]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_length_prefix_separates_prefixes() {
        // [] vs [0]: without the count both would be empty/zero-padded
        assert_ne!(CacheKey::from_sequence(&[]), CacheKey::from_sequence(&[0]));
        assert_ne!(
            CacheKey::from_sequence(&[0, 0]),
            CacheKey::from_sequence(&[0, 0, 0])
        );
    }

    #[test]
    fn test_decode_and_display() {
        let key = CacheKey::from_sequence(&[i64::MIN, -1, 0, i64::MAX]);
        assert_eq!(key.sequence_len(), 4);
        assert_eq!(key.to_sequence(), vec![i64::MIN, -1, 0, i64::MAX]);
        assert_eq!(
            key.to_string(),
            format!("[{}, -1, 0, {}]", i64::MIN, i64::MAX)
        );
        assert_eq!(CacheKey::from_sequence(&[]).to_string(), "[]");
    }
}
