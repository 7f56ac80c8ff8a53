//! Dataset metadata translation
//!
//! `DatasetMetadata` becomes the body of a `datasets.insert`,
//! `DatasetMetadataToUpdate` the body of a `datasets.patch`.

use super::types::{
    check_read_only, duration_to_millis, millis_to_duration, FieldSchema, FieldSpec, Translate,
};
use crate::error::{Error, Result};
use crate::resources::{DatasetPatch, DatasetResource};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Metadata of a dataset as the caller sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetMetadata {
    /// Friendly name
    pub name: String,
    pub description: String,
    /// Zero means tables never expire
    pub default_table_expiration: Duration,
    /// Geographic location, e.g. "EU"; only settable at creation
    pub location: String,
    pub labels: HashMap<String, String>,

    // Server populated. Setting any of these on input is an error.
    pub full_id: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub etag: String,
}

impl FieldSchema for DatasetMetadata {
    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::writable("name", |m| !m.name.is_empty()),
        FieldSpec::writable("description", |m| !m.description.is_empty()),
        FieldSpec::writable("default_table_expiration", |m| {
            !m.default_table_expiration.is_zero()
        }),
        FieldSpec::writable("location", |m| !m.location.is_empty()),
        FieldSpec::writable("labels", |m| !m.labels.is_empty()),
        FieldSpec::read_only("full_id", |m| !m.full_id.is_empty()),
        FieldSpec::read_only("creation_time", |m| m.creation_time.is_some()),
        FieldSpec::read_only("last_modified_time", |m| m.last_modified_time.is_some()),
        FieldSpec::read_only("etag", |m| !m.etag.is_empty()),
    ];
}

impl Translate for DatasetMetadata {
    type Wire = DatasetResource;

    fn translate(&self) -> Result<DatasetResource> {
        check_read_only(self)?;

        Ok(DatasetResource {
            friendly_name: self.name.clone(),
            description: self.description.clone(),
            default_table_expiration_ms: duration_to_millis(
                "default_table_expiration",
                self.default_table_expiration,
            )?,
            location: self.location.clone(),
            labels: self.labels.clone(),
            ..DatasetResource::default()
        })
    }
}

impl DatasetMetadata {
    /// Build metadata from a server response, read-only fields included
    pub fn from_resource(resource: &DatasetResource) -> Result<Self> {
        Ok(Self {
            name: resource.friendly_name.clone(),
            description: resource.description.clone(),
            default_table_expiration: millis_to_duration(
                "defaultTableExpirationMs",
                resource.default_table_expiration_ms,
            )?,
            location: resource.location.clone(),
            labels: resource.labels.clone(),
            full_id: resource.id.clone().unwrap_or_default(),
            creation_time: resource
                .creation_time
                .map(|ms| timestamp_millis("creationTime", ms))
                .transpose()?,
            last_modified_time: resource
                .last_modified_time
                .map(|ms| timestamp_millis("lastModifiedTime", ms))
                .transpose()?,
            etag: resource.etag.clone().unwrap_or_default(),
        })
    }
}

fn timestamp_millis(field: &str, ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::decode(format!("timestamp {ms} out of range in '{field}'")))
}

/// Fields to change on an existing dataset. `None` leaves a field alone;
/// `Some` of an empty value clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetMetadataToUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some(Duration::ZERO)` removes the default expiration
    pub default_table_expiration: Option<Duration>,
    labels: HashMap<String, Option<String>>,
}

impl DatasetMetadataToUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the friendly name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default table expiration
    #[must_use]
    pub fn default_table_expiration(mut self, expiration: Duration) -> Self {
        self.default_table_expiration = Some(expiration);
        self
    }

    /// Add or replace a label
    #[must_use]
    pub fn set_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), Some(value.into()));
        self
    }

    /// Remove a label
    #[must_use]
    pub fn delete_label(mut self, key: impl Into<String>) -> Self {
        self.labels.insert(key.into(), None);
        self
    }
}

impl FieldSchema for DatasetMetadataToUpdate {
    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::writable("name", |u| u.name.is_some()),
        FieldSpec::writable("description", |u| u.description.is_some()),
        FieldSpec::writable("default_table_expiration", |u| {
            u.default_table_expiration.is_some()
        }),
        FieldSpec::writable("labels", |u| !u.labels.is_empty()),
    ];
}

impl Translate for DatasetMetadataToUpdate {
    type Wire = DatasetPatch;

    fn translate(&self) -> Result<DatasetPatch> {
        check_read_only(self)?;

        Ok(DatasetPatch {
            friendly_name: self.name.clone(),
            description: self.description.clone(),
            default_table_expiration_ms: self
                .default_table_expiration
                .map(|d| duration_to_millis("default_table_expiration", d))
                .transpose()?,
            labels: self.labels.clone(),
        })
    }
}
