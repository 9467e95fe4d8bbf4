/// A trait for random sources that return random integers.
///
/// Key generation draws all of its entropy through this seam: 64-bit values
/// for fresh prefixes and 128-bit values for the raw key material. Plugging
/// in a fixed or scripted source lets tests pin every random bit and assert
/// field placement exactly, with no statistical tolerance.
///
/// The random type `T` is generic (here `u64` or `u128`).
///
/// # Example
/// ```
/// use keyprefix::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u64> for FixedRand {
///     fn rand(&self) -> u64 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}
