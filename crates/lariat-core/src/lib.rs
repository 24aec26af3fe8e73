//! Core types and traits for the lariat URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage
//! backends, the shortener service, and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{ReadRepository, Repository, UrlMapping, UrlRecord};
pub use shortcode::{ShortCode, ALPHABET};
pub use shortener::{ShortenParams, Shortener};
