//! Track metadata and the read-only catalog the engine resolves tracks from.

mod catalog;
mod display;
mod model;

pub use catalog::{MemoryCatalog, TrackCatalog};
pub use display::display_from_fields;
pub use model::{Track, TrackId};

#[cfg(test)]
mod tests;
