use chrono::NaiveDate;

use crate::{
    Error, PrefixKey, RandSource, Result, ThreadRandom,
    date::{date_code, today},
    mask::MaskPair,
};

/// Prefix width used by [`KeyGenerator::default`]. Spreads keys across up to
/// 4096 partition ranges, a good fit for most tables.
pub const DEFAULT_PREFIX_BITS: u32 = 12;

/// Widest supported prefix field.
pub const MAX_PREFIX_BITS: u32 = 31;

/// Generator of partition-aware 128-bit keys.
///
/// Every key packs three disjoint fields into its high word: the top
/// `prefix_bits` bits of a caller-supplied (or freshly drawn) prefix, the
/// 14-bit code of a calendar date, and fresh random bits everywhere else.
/// Rows minted with the same prefix land in the same partition range; the
/// date code gives range scans temporal locality; the random remainder makes
/// collisions practically impossible without any coordination.
///
/// The generator holds no mutable state. All methods take `&self`, and the
/// bundled [`ThreadRandom`] source is contention-free across threads, so a
/// single instance can be shared freely by concurrent writers.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use keyprefix::KeyGenerator;
///
/// let generator = KeyGenerator::new(12)?;
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// // One prefix per logical batch, many keys sharing it.
/// let prefix = generator.next_prefix();
/// let a = generator.next_key_on(prefix, date);
/// let b = generator.next_key_on(prefix, date);
///
/// assert_eq!(generator.prefix_field(a), generator.prefix_field(b));
/// assert_eq!(generator.date_code_of(a), 8966);
/// # Ok::<(), keyprefix::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyGenerator<R = ThreadRandom> {
    mask_pos: u32,
    rng: R,
}

impl KeyGenerator {
    /// Creates a generator using the bundled thread-local random source.
    ///
    /// # Errors
    /// [`Error::InvalidPrefixBits`] when `prefix_bits` is outside `1..=31`.
    pub fn new(prefix_bits: u32) -> Result<Self> {
        Self::with_rand(prefix_bits, ThreadRandom)
    }
}

impl Default for KeyGenerator {
    /// A generator with the default 12-bit prefix, which is always a valid
    /// width.
    fn default() -> Self {
        Self {
            mask_pos: DEFAULT_PREFIX_BITS - 1,
            rng: ThreadRandom,
        }
    }
}

impl<R> KeyGenerator<R>
where
    R: RandSource<u64> + RandSource<u128>,
{
    /// Creates a generator with an explicit random source.
    ///
    /// Injecting the source makes field placement testable bit for bit; see
    /// [`RandSource`].
    ///
    /// # Errors
    /// [`Error::InvalidPrefixBits`] when `prefix_bits` is outside `1..=31`.
    pub fn with_rand(prefix_bits: u32, rng: R) -> Result<Self> {
        if prefix_bits < 1 || prefix_bits > MAX_PREFIX_BITS {
            return Err(Error::InvalidPrefixBits { bits: prefix_bits });
        }
        Ok(Self {
            mask_pos: prefix_bits - 1,
            rng,
        })
    }

    /// Prefix width this generator was configured with, in bits.
    #[must_use]
    pub const fn prefix_bits(&self) -> u32 {
        self.mask_pos + 1
    }

    /// Draws a fresh 64-bit prefix.
    ///
    /// Consecutive calls are independent draws. Share one returned value
    /// across a batch of related keys to colocate them in one partition
    /// range.
    pub fn next_prefix(&self) -> u64 {
        RandSource::<u64>::rand(&self.rng)
    }

    /// Mints a key carrying `prefix` and `date`.
    ///
    /// The top `prefix_bits` bits of the result equal the corresponding bits
    /// of `prefix`, the next 14 bits equal `date_code(date)`, and every
    /// remaining bit comes from a fresh random draw, independent of both
    /// arguments.
    pub fn next_key_on(&self, prefix: u64, date: NaiveDate) -> PrefixKey {
        let raw: u128 = RandSource::<u128>::rand(&self.rng);
        let masks = MaskPair::at(self.mask_pos as usize);
        let mut high = ((raw >> 64) as u64) & !(masks.prefix | masks.date);
        let code = u64::from(date_code(date)) << (49 - self.mask_pos);
        high |= (prefix & masks.prefix) | (code & masks.date);
        PrefixKey::from_words(high, raw as u64)
    }

    /// Mints a key carrying `prefix`, dated today (UTC).
    pub fn next_key_with(&self, prefix: u64) -> PrefixKey {
        self.next_key_on(prefix, today())
    }

    /// Mints a key with a fresh prefix, dated today (UTC).
    pub fn next_key(&self) -> PrefixKey {
        self.next_key_on(self.next_prefix(), today())
    }

    /// The prefix bits `key` carries, in place (masked, not shifted down).
    ///
    /// Two keys minted with the same prefix by generators of the same width
    /// agree on this value.
    #[must_use]
    pub fn prefix_field(&self, key: PrefixKey) -> u64 {
        key.high() & MaskPair::at(self.mask_pos as usize).prefix
    }

    /// The 14-bit date code embedded in `key`.
    #[must_use]
    pub fn date_code_of(&self, key: PrefixKey) -> u16 {
        let masks = MaskPair::at(self.mask_pos as usize);
        ((key.high() & masks.date) >> (49 - self.mask_pos)) as u16
    }
}
