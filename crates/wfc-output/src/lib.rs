//! CSV output for the waveform catalog.
//!
//! Writers are scope-owned: a run creates one [`CatalogWriter`] (or a single
//! [`TableWriter`] for the records-only update), passes it by `&mut` to the
//! extraction loop, and calls `finish` at the end. Dropping a writer on an
//! error path still flushes what was written.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{CatalogWriter, TableCount, TableWriter, ensure_parent_dir};
