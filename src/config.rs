//! Configuration schema and loader.
//!
//! Settings cover playback defaults (volume, shuffle, end-of-track policy)
//! and library scanning. Loaded from a TOML file with env-var overrides.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
