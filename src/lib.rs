// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # bigquery-kit
//!
//! The core of a BigQuery client: lazy iteration over paginated listings and
//! translation of typed configuration into API requests.
//!
//! ## Features
//!
//! - **Listings**: datasets and tables as a lazily advancing [`Cursor`],
//!   with hidden dataset suppression and server-side label filters
//! - **Dataset metadata**: create and patch bodies with read-only field
//!   checks and exact duration conversion
//! - **Extract jobs**: Cloud Storage exports with explicit, suffixed or
//!   random job IDs
//! - **REST transport**: a thin reqwest implementation of every
//!   collaborator trait, replaceable by any other [`Transport`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bigquery_kit::{BigQueryClient, ClientConfig, GcsReference, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut config = ClientConfig::new("my-project");
//!     config.apply_env();
//!     let client = BigQueryClient::from_config(&config)?;
//!
//!     let mut tables = client.dataset("sales").tables().into_cursor();
//!     while let Some(table) = tables.next().await? {
//!         let mut export = table.extractor_to(GcsReference::new([format!(
//!             "gs://exports/{}-*.csv",
//!             table.table_id()
//!         )]));
//!         export.config.add_job_id_suffix = true;
//!         export.config.job_id = format!("export_{}", table.table_id());
//!         export.run().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  BigQueryClient → Dataset → Table → Extractor                 │
//! └───────────────────────────────────────────────────────────────┘
//!          │                  │                     │
//! ┌────────┴───────┬──────────┴─────────┬───────────┴────────────┐
//! │   Pagination   │     Translate      │          Job           │
//! ├────────────────┼────────────────────┼────────────────────────┤
//! │ Cursor         │ DatasetMetadata    │ JobSubmitter           │
//! │ PageSource     │ FieldSchema        │ job ID resolution      │
//! │ PageSizeLimits │ duration → ms      │ ExtractConfig          │
//! └────────────────┴────────────────────┴────────────────────────┘
//!                               │
//!              Transport (ListDatasets, ListTables,
//!                 InsertJob, DatasetAdmin) → REST
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Wire types of the REST API
pub mod resources;

/// Generic page-buffering cursor
pub mod pagination;

/// Typed configuration to request body translation
pub mod translate;

/// Job configuration, identity and submission
pub mod job;

/// Client, resource handles and transports
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use client::{
    BigQueryClient, Dataset, DatasetPages, Extractor, RestTransport, Table, TablePages, Transport,
};
pub use config::ClientConfig;
pub use job::{
    Compression, DataFormat, ExtractConfig, GcsReference, JobConfig, JobHandle, JobSubmitter,
};
pub use pagination::{Cursor, Page, PageSource};
pub use resources::TableReference;
pub use translate::{translate, DatasetMetadata, DatasetMetadataToUpdate, Translate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
