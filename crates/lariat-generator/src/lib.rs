pub mod random;
pub mod seq;

use lariat_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is not guaranteed by the generator itself; the shorten
/// workflow handles collisions by retrying the atomic store insert.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code.
    fn generate(&self) -> ShortCode;
}
