// src/classify/mod.rs
//! Pure classifiers used while building discussion records.

pub mod category;
pub mod platform;

pub use category::categorize;
pub use platform::platform_for_url;
