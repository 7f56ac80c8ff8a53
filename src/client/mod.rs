//! Client module
//!
//! [`BigQueryClient`] and the resource handles it hands out, the
//! collaborator traits it calls and their REST implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use bigquery_kit::{BigQueryClient, ClientConfig, GcsReference};
//!
//! let client = BigQueryClient::from_config(&ClientConfig::new("my-project"))?;
//!
//! let mut datasets = client.datasets().filter("labels.env:prod").into_cursor();
//! while let Some(dataset) = datasets.next().await? {
//!     println!("{}", dataset.dataset_id);
//! }
//!
//! let handle = client
//!     .dataset("sales")
//!     .table("orders")
//!     .extractor_to(GcsReference::new(["gs://exports/orders-*.csv"]))
//!     .run()
//!     .await?;
//! ```

mod bigquery;
mod pages;
mod rest;
mod types;

pub use bigquery::{BigQueryClient, Dataset, Extractor, Table};
pub use pages::{DatasetPages, TablePages};
pub use rest::RestTransport;
pub use types::{
    DatasetAdmin, DatasetScope, InsertJob, ListDatasets, ListTables, TableScope, Transport,
};
