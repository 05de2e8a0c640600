// src/extractors/mod.rs
pub mod dom;
pub mod fields;
pub mod images;
pub mod locator;
pub mod notation;
pub mod outline;
pub mod rich_text;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use locator::{Fragment, Locator};
#[allow(unused_imports)]
pub use notation::Notation;
