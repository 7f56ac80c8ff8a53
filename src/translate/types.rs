//! Translation traits and field tables
//!
//! Defines how typed configuration becomes a wire request, and the static
//! per-field writability tables the translator consults.

use crate::error::{Error, Result};
use std::time::Duration;

/// A typed configuration that maps onto a provider request body
pub trait Translate {
    /// Wire request; its `Default` is the empty request
    type Wire: Default;

    /// Build the wire request, failing on values that cannot be written
    fn translate(&self) -> Result<Self::Wire>;
}

/// Translate an optional config. An absent config is the empty request.
pub fn translate<T: Translate>(config: Option<&T>) -> Result<T::Wire> {
    match config {
        Some(config) => config.translate(),
        None => Ok(T::Wire::default()),
    }
}

/// Whether the server accepts a field as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    /// Accepted and persisted as given
    Writable,
    /// Populated by the server; must be unset on input
    ReadOnly,
}

/// One row of a type's field table
pub struct FieldSpec<T> {
    /// Field name as reported in validation errors
    pub name: &'static str,
    /// Writability of the field
    pub access: FieldAccess,
    /// Whether the field holds a non-zero value
    pub is_set: fn(&T) -> bool,
}

impl<T> FieldSpec<T> {
    /// A field the server accepts
    pub const fn writable(name: &'static str, is_set: fn(&T) -> bool) -> Self {
        Self {
            name,
            access: FieldAccess::Writable,
            is_set,
        }
    }

    /// A field the server populates
    pub const fn read_only(name: &'static str, is_set: fn(&T) -> bool) -> Self {
        Self {
            name,
            access: FieldAccess::ReadOnly,
            is_set,
        }
    }
}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("access", &self.access)
            .finish()
    }
}

/// Static field table for a configuration type
pub trait FieldSchema: Sized + 'static {
    /// Every field of the type, in declaration order
    const FIELDS: &'static [FieldSpec<Self>];

    /// Look up a field by name
    fn field(name: &str) -> Option<&'static FieldSpec<Self>> {
        Self::FIELDS.iter().find(|spec| spec.name == name)
    }
}

/// Fail on the first read-only field that holds a value
pub fn check_read_only<T: FieldSchema>(value: &T) -> Result<()> {
    match T::FIELDS
        .iter()
        .find(|spec| spec.access == FieldAccess::ReadOnly && (spec.is_set)(value))
    {
        Some(spec) => Err(Error::validation(
            spec.name,
            "field is read-only and must be unset",
        )),
        None => Ok(()),
    }
}

/// Names of every field holding a value
pub fn present_fields<T: FieldSchema>(value: &T) -> Vec<&'static str> {
    T::FIELDS
        .iter()
        .filter(|spec| (spec.is_set)(value))
        .map(|spec| spec.name)
        .collect()
}

/// Convert a duration to whole milliseconds without losing precision
pub fn duration_to_millis(field: &str, duration: Duration) -> Result<i64> {
    if duration.subsec_nanos() % 1_000_000 != 0 {
        return Err(Error::validation(
            field,
            format!("{duration:?} is not a whole number of milliseconds"),
        ));
    }
    i64::try_from(duration.as_millis())
        .map_err(|_| Error::validation(field, format!("{duration:?} does not fit in int64 ms")))
}

/// Convert wire milliseconds back to a duration
pub fn millis_to_duration(field: &str, millis: i64) -> Result<Duration> {
    u64::try_from(millis)
        .map(Duration::from_millis)
        .map_err(|_| Error::decode(format!("negative duration {millis}ms in '{field}'")))
}
