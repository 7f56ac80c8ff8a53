//! Configuration translation module
//!
//! Maps typed configuration onto provider request bodies.
//!
//! # Overview
//!
//! Every translatable type implements [`Translate`]. Types with server
//! populated fields also implement [`FieldSchema`], a static table of each
//! field's writability; the translator rejects input that sets a read-only
//! field instead of silently dropping it.

mod dataset;
mod types;

pub use dataset::{DatasetMetadata, DatasetMetadataToUpdate};
pub use types::{
    check_read_only, duration_to_millis, millis_to_duration, present_fields, translate,
    FieldAccess, FieldSchema, FieldSpec, Translate,
};

#[cfg(test)]
mod tests;
