//! Track catalog: mood folders, track metadata and the fetch boundary.
//!
//! The catalog is read-only to the player; it hands out track lists for a
//! folder or a mood query and the playback queue takes it from there.

mod model;
mod scan;
mod store;

pub use model::*;
pub use scan::scan_library;
pub use store::Catalog;
