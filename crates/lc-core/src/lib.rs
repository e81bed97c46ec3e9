//! lc-core: parameter model for the laser-cut export panel.
//!
//! Contains:
//! - params (Preset, ParameterSet, ParameterSnapshot, joint fits)
//! - field (editable field identifiers + typed values)
//! - numeric (measurement parsing + exact comparison helpers)
//! - error (shared error types)

pub mod error;
pub mod field;
pub mod numeric;
pub mod params;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use field::{Field, FieldValue};
pub use numeric::*;
pub use params::*;
