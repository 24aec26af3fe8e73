use crate::Generator;
use lariat_core::ShortCode;

/// A collision-free short code generator using a sequential counter.
///
/// Produces codes like "ln000000", "ln000001", etc. Codes are unique
/// within a single instance, which makes this generator useful for
/// deterministic tests and single-node setups. For multi-node
/// deployments each node needs its own prefix.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a new sequential generator with the given prefix.
    ///
    /// The prefix must consist of alphabet characters only, since it
    /// becomes part of the emitted short codes.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
