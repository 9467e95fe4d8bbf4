use core::fmt;

/// A 128-bit partition-aware key.
///
/// The top `w` bits of the high word carry the partition prefix, the 14 bits
/// below them carry the date code, and every remaining bit is random
/// suffix. `w` is a property of the generator, not of the key, so field
/// extraction goes through [`KeyGenerator::prefix_field`] and
/// [`KeyGenerator::date_code_of`].
///
/// Keys are plain immutable values: `Copy`, totally ordered, hashable. The
/// ordering is the unsigned ordering of the 128-bit value.
///
/// [`KeyGenerator::prefix_field`]: crate::KeyGenerator::prefix_field
/// [`KeyGenerator::date_code_of`]: crate::KeyGenerator::date_code_of
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PrefixKey {
    id: u128,
}

impl PrefixKey {
    /// Assembles a key from its high and low 64-bit words.
    #[must_use]
    pub const fn from_words(high: u64, low: u64) -> Self {
        Self {
            id: ((high as u128) << 64) | low as u128,
        }
    }

    /// The high word, which carries the prefix and date fields.
    #[must_use]
    pub const fn high(&self) -> u64 {
        (self.id >> 64) as u64
    }

    /// The low word: pure random suffix.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.id as u64
    }

    /// Converts this key into its raw integer representation.
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw integer into a key.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// Big-endian bytes, high word first. This is the byte order the text
    /// codec encodes.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    /// Reassembles a key from its big-endian bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self {
            id: u128::from_be_bytes(bytes),
        }
    }
}

impl fmt::Debug for PrefixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefixKey({:#034x})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_round_trip() {
        let key = PrefixKey::from_words(0x0011_2233_4455_6677, 0x8899_AABB_CCDD_EEFF);
        assert_eq!(key.high(), 0x0011_2233_4455_6677);
        assert_eq!(key.low(), 0x8899_AABB_CCDD_EEFF);
        assert_eq!(key.to_raw(), 0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF);
        assert_eq!(PrefixKey::from_raw(key.to_raw()), key);
    }

    #[test]
    fn byte_order_is_high_word_first() {
        let key = PrefixKey::from_words(0x0102_0304_0506_0708, 0x090A_0B0C_0D0E_0F10);
        let bytes = key.to_be_bytes();
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[7], 0x08);
        assert_eq!(bytes[8], 0x09);
        assert_eq!(bytes[15], 0x10);
        assert_eq!(PrefixKey::from_be_bytes(bytes), key);
    }

    #[test]
    fn ordering_follows_the_raw_value() {
        let a = PrefixKey::from_words(1, u64::MAX);
        let b = PrefixKey::from_words(2, 0);
        assert!(a < b);
    }
}
