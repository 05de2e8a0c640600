// src/utils/mod.rs
pub mod error;
pub mod logging;

pub use error::ScrapeError; // Re-export main error type for convenience
