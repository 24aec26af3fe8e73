use crate::Generator;
use lariat_core::{ShortCode, ALPHABET};
use rand::Rng;

/// A short code generator drawing uniform random samples from the
/// 62-symbol alphanumeric alphabet.
///
/// Collisions are possible and become likely once the stored corpus
/// approaches the square root of the code space (birthday bound:
/// P ≈ 1 − exp(−N²/(2·62^L)) for N entries at length L). At length 6
/// the space holds ~5.7e10 codes, so collisions stay rare up to a few
/// hundred thousand entries; at length 3 they appear after only a few
/// hundred. Size `length` against the expected corpus accordingly.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of the given length.
    ///
    /// # Panics
    ///
    /// Panics if `length` is outside `ShortCode`'s accepted bounds;
    /// such codes would fail validation on every lookup, leaving the
    /// stored mappings unreachable.
    pub fn new(length: usize) -> Self {
        assert!(
            (ShortCode::MIN_LENGTH..=ShortCode::MAX_LENGTH).contains(&length),
            "code length must be between {} and {}, got {}",
            ShortCode::MIN_LENGTH,
            ShortCode::MAX_LENGTH,
            length
        );
        Self { length }
    }

    /// The length of the codes this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
