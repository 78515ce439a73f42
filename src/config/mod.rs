// src/config/mod.rs
pub mod search;

pub use search::{load_config_default, load_config_from, SearchConfig, StoreConfig};
