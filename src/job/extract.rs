//! Extract job configuration
//!
//! Exports a table into Cloud Storage objects.

use crate::error::{Error, Result};
use crate::resources::{JobConfigurationExtract, TableReference};
use crate::translate::Translate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Compression applied to exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compression {
    None,
    Gzip,
    Deflate,
    Snappy,
    Zstd,
}

impl Compression {
    /// Provider name of the codec
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Gzip => "GZIP",
            Self::Deflate => "DEFLATE",
            Self::Snappy => "SNAPPY",
            Self::Zstd => "ZSTD",
        }
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "deflate" => Ok(Self::Deflate),
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            other => Err(Error::validation(
                "compression",
                format!("unknown compression '{other}'"),
            )),
        }
    }
}

/// File format of exported data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataFormat {
    Csv,
    #[serde(rename = "NEWLINE_DELIMITED_JSON")]
    Json,
    Avro,
    Parquet,
}

impl DataFormat {
    /// Provider name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "NEWLINE_DELIMITED_JSON",
            Self::Avro => "AVRO",
            Self::Parquet => "PARQUET",
        }
    }
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "newline_delimited_json" | "ndjson" => Ok(Self::Json),
            "avro" => Ok(Self::Avro),
            "parquet" => Ok(Self::Parquet),
            other => Err(Error::validation(
                "destination_format",
                format!("unknown format '{other}'"),
            )),
        }
    }
}

/// Cloud Storage destination of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcsReference {
    uris: Vec<String>,
    /// `None` leaves the provider default (no compression)
    pub compression: Option<Compression>,
    /// `None` leaves the provider default (CSV)
    pub destination_format: Option<DataFormat>,
    /// Empty leaves the provider default (",")
    pub field_delimiter: String,
}

impl GcsReference {
    /// Reference one or more `gs://bucket/object` URIs; a single `*` wildcard
    /// in the object name shards the export.
    pub fn new<I>(uris: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.destination_format = Some(format);
        self
    }

    #[must_use]
    pub fn with_field_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.field_delimiter = delimiter.into();
        self
    }
}

/// Configuration of an extract job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Job ID to use; a random one is generated when empty
    pub job_id: String,
    /// Append a random suffix to `job_id`
    pub add_job_id_suffix: bool,
    /// Table to export
    pub src: TableReference,
    /// Where to write the export
    pub dst: GcsReference,
    /// Do not print a header row in exported data
    pub disable_header: bool,
}

impl ExtractConfig {
    pub fn new(src: TableReference, dst: GcsReference) -> Self {
        Self {
            src,
            dst,
            ..Self::default()
        }
    }

    /// Check the job can be submitted: a complete source table and at least
    /// one `gs://` destination
    pub fn validate(&self) -> Result<()> {
        if self.dst.uris.is_empty() {
            return Err(Error::validation(
                "dst.uris",
                "at least one destination URI is required",
            ));
        }
        if let Some(bad) = self.dst.uris.iter().find(|uri| !uri.starts_with("gs://")) {
            return Err(Error::validation(
                "dst.uris",
                format!("'{bad}' is not a gs:// URI"),
            ));
        }

        let src = &self.src;
        if src.project_id.is_empty() || src.dataset_id.is_empty() || src.table_id.is_empty() {
            return Err(Error::validation("src", "source table is incomplete"));
        }
        Ok(())
    }
}

impl Translate for ExtractConfig {
    type Wire = JobConfigurationExtract;

    fn translate(&self) -> Result<JobConfigurationExtract> {
        let src = &self.src;
        Ok(JobConfigurationExtract {
            destination_uris: self.dst.uris.clone(),
            compression: self
                .dst
                .compression
                .map(|c| c.as_str().to_owned())
                .unwrap_or_default(),
            destination_format: self
                .dst
                .destination_format
                .map(|f| f.as_str().to_owned())
                .unwrap_or_default(),
            field_delimiter: self.dst.field_delimiter.clone(),
            source_table: (*src != TableReference::default()).then(|| src.clone()),
            print_header: self.disable_header.then_some(false),
        })
    }
}
