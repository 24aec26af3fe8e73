pub mod service;

pub use service::{ShortenerService, ShortenerSettings};

pub use lariat_core::{ShortenParams, Shortener, ShortenerError};
