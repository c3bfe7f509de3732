//! Waveform catalog derivations.
//!
//! Pure functions that turn header attributes and numerics cells into the
//! values written to the catalog tables.
//!
//! # Overview
//!
//! - **Identity**: subject and admission ids from header comments
//! - **Timing**: record end, segment start and duration, numerics timestamps
//! - **Segments**: layout/placeholder detection
//! - **Signal classification**: label to [`SignalType`](wfc_model::SignalType)
//! - **Numerics mapping**: free-form numerics columns to the fixed schema
//!
//! # Design Principles
//!
//! - **No I/O**: everything here works on values already read by `wfc-ingest`
//! - **Degrade, don't fail**: a value that cannot be derived becomes `None`

mod classify;
mod error;
mod identity;
mod numeric;
mod numerics;
mod segment;
mod timing;

pub use classify::classify_signal;
pub use error::{Result, TransformError};
pub use identity::{Identity, resolve_identity};
pub use numeric::parse_numeric;
pub use numerics::{ColumnKind, NumericsLayout, PressureComponent, classify_column};
pub use segment::is_layout_segment;
pub use timing::{
    offset_by_samples, record_end, segment_duration, segment_offset_samples, segment_start,
    tick_timestamp,
};
