use crate::{DecodeError, PrefixKey, Result};
use core::fmt;

/// Length of the textual key form: 22 characters covering all 128 bits.
pub const TEXT_KEY_LEN: usize = 22;

const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 6;

/// Lookup table for URL-safe base64 decoding. Strict: no aliases, no
/// whitespace, no padding characters.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < 64 {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

impl PrefixKey {
    /// Encodes this key as a fixed 22-character URL-safe base64 string.
    ///
    /// The 16 big-endian bytes would encode to 24 characters under padded
    /// base64; the final two are padding artifacts carrying no payload and
    /// are dropped. All 128 bits land in the first 22 characters, so
    /// distinct keys always produce distinct strings, and keys sharing a
    /// prefix share their leading characters.
    ///
    /// # Example
    /// ```
    /// use keyprefix::PrefixKey;
    ///
    /// let key = PrefixKey::from_words(0x0011_2233_4455_6677, 0x8899_AABB_CCDD_EEFF);
    /// assert_eq!(key.encode(), "ABEiM0RVZneImaq7zN3u_w");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0u8; TEXT_KEY_LEN];
        self.encode_to_buf(&mut buf);
        // SAFETY: the output is always ASCII drawn from ALPHABET.
        unsafe { String::from_utf8_unchecked(buf.to_vec()) }
    }

    /// Encodes into a caller-provided buffer without allocating.
    pub fn encode_to_buf(&self, buf: &mut [u8; TEXT_KEY_LEN]) {
        let mut acc = 0u16;
        let mut bits = 0;
        let mut out = 0;
        for &b in &self.to_be_bytes() {
            acc = (acc << 8) | u16::from(b);
            bits += 8;
            while bits >= BITS_PER_CHAR {
                bits -= BITS_PER_CHAR;
                buf[out] = ALPHABET[((acc >> bits) & 0x3F) as usize];
                out += 1;
            }
        }
        // Two payload bits remain. Left-align them into the final character,
        // exactly where a padded encoder would put them before appending
        // "==".
        buf[out] = ALPHABET[((acc << (BITS_PER_CHAR - bits)) & 0x3F) as usize];
    }

    /// Decodes a 22-character string produced by [`PrefixKey::encode`].
    ///
    /// Decoding is exact: the truncated characters were padding, so every
    /// payload bit survives the round trip. The final character may only use
    /// its top two bits; anything else is rejected as non-canonical rather
    /// than silently folded onto another key's encoding.
    ///
    /// # Errors
    /// [`DecodeError`] when the input has the wrong length, contains a byte
    /// outside the URL-safe alphabet, or carries non-zero trailing bits.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != TEXT_KEY_LEN {
            return Err(DecodeError::InvalidLength { len: bytes.len() }.into());
        }
        let mut acc = 0u128;
        for (index, &byte) in bytes[..TEXT_KEY_LEN - 1].iter().enumerate() {
            let val = LOOKUP[byte as usize];
            if val == NO_VALUE {
                return Err(DecodeError::InvalidChar { byte, index }.into());
            }
            acc = (acc << BITS_PER_CHAR) | u128::from(val);
        }
        let byte = bytes[TEXT_KEY_LEN - 1];
        let last = LOOKUP[byte as usize];
        if last == NO_VALUE {
            return Err(DecodeError::InvalidChar {
                byte,
                index: TEXT_KEY_LEN - 1,
            }
            .into());
        }
        if last & 0x0F != 0 {
            return Err(DecodeError::TrailingBits { byte }.into());
        }
        Ok(Self::from_raw((acc << 2) | u128::from(last >> 4)))
    }
}

/// Displays the key in its textual form.
impl fmt::Display for PrefixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; TEXT_KEY_LEN];
        self.encode_to_buf(&mut buf);
        // SAFETY: the output is always ASCII drawn from ALPHABET.
        f.write_str(unsafe { core::str::from_utf8_unchecked(&buf) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn encodes_known_values() {
        let cases: [(u64, u64, &str); 5] = [
            (0, 0, "AAAAAAAAAAAAAAAAAAAAAA"),
            (u64::MAX, u64::MAX, "_____________________w"),
            (0, 1, "AAAAAAAAAAAAAAAAAAAAAQ"),
            (1 << 63, 0, "gAAAAAAAAAAAAAAAAAAAAA"),
            (
                0x0011_2233_4455_6677,
                0x8899_AABB_CCDD_EEFF,
                "ABEiM0RVZneImaq7zN3u_w",
            ),
        ];
        for (high, low, expected) in cases {
            let key = PrefixKey::from_words(high, low);
            assert_eq!(key.encode(), expected);
            assert_eq!(key.to_string(), expected);
        }
    }

    #[test]
    fn encoding_is_fixed_length_and_url_safe() {
        let keys = [
            PrefixKey::from_raw(0),
            PrefixKey::from_raw(u128::MAX),
            PrefixKey::from_words(0xFFF0_0000_0000_0000, 42),
        ];
        for key in keys {
            let text = key.encode();
            assert_eq!(text.len(), TEXT_KEY_LEN);
            assert!(
                text.bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
                "{text}"
            );
            // Deterministic: same input, same output.
            assert_eq!(key.encode(), text);
        }
    }

    #[test]
    fn truncation_loses_no_payload_bits() {
        // Walking a single set bit across all 128 positions exercises every
        // payload bit, including the two that land in the final character.
        for bit in 0..128 {
            let key = PrefixKey::from_raw(1u128 << bit);
            let decoded = PrefixKey::decode(&key.encode()).unwrap();
            assert_eq!(decoded, key, "bit {bit}");
        }
    }

    #[test]
    fn shared_prefix_bits_share_leading_characters() {
        // With the default 12-bit prefix, the first two characters encode
        // exactly the prefix field: partition routing can work on the
        // leading characters of the text form alone.
        let a = PrefixKey::from_words(0xABC0_0000_0000_0000, 7);
        let b = PrefixKey::from_words(0xABCF_FFFF_FFFF_FFFF, u64::MAX);
        assert_eq!(a.encode()[..2], b.encode()[..2]);
    }

    #[test]
    fn decode_rejects_bad_lengths() {
        assert_eq!(
            PrefixKey::decode("short").unwrap_err(),
            Error::Decode(DecodeError::InvalidLength { len: 5 })
        );
        assert_eq!(
            PrefixKey::decode("AAAAAAAAAAAAAAAAAAAAAA==").unwrap_err(),
            Error::Decode(DecodeError::InvalidLength { len: 24 })
        );
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        // '+' and '/' belong to the standard alphabet, not the URL-safe one.
        assert_eq!(
            PrefixKey::decode("+AAAAAAAAAAAAAAAAAAAAA").unwrap_err(),
            Error::Decode(DecodeError::InvalidChar {
                byte: b'+',
                index: 0
            })
        );
        assert_eq!(
            PrefixKey::decode("AAAAAAAAAAAAAAAAAAAAA/").unwrap_err(),
            Error::Decode(DecodeError::InvalidChar {
                byte: b'/',
                index: 21
            })
        );
    }

    #[test]
    fn decode_rejects_noncanonical_trailing_bits() {
        // 'B' sets low bits in the final character; only the top two bits
        // of the last character carry payload.
        assert_eq!(
            PrefixKey::decode("AAAAAAAAAAAAAAAAAAAAAB").unwrap_err(),
            Error::Decode(DecodeError::TrailingBits { byte: b'B' })
        );
        // 'Q' (value 16) uses only the top payload bit and stays canonical.
        assert_eq!(
            PrefixKey::decode("AAAAAAAAAAAAAAAAAAAAAQ").unwrap(),
            PrefixKey::from_raw(1)
        );
    }
}
