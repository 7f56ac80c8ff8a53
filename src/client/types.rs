//! Collaborator traits and listing scopes

use crate::error::{Error, Result};
use crate::job::JobHandle;
use crate::pagination::Page;
use crate::resources::{DatasetListEntry, DatasetPatch, DatasetResource, Job, TableListEntry};
use async_trait::async_trait;

// ============================================================================
// Scopes
// ============================================================================

/// Server-side parameters of a dataset listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetScope {
    pub project_id: String,
    /// Label filter, e.g. `labels.env:prod`. Applied by the server.
    pub filter: Option<String>,
}

impl DatasetScope {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            filter: None,
        }
    }

    /// Check that an entry belongs to this scope
    pub fn check(&self, project_id: &str) -> Result<()> {
        if project_id != self.project_id {
            return Err(Error::scope_mismatch(
                "project_id",
                &self.project_id,
                project_id,
            ));
        }
        Ok(())
    }
}

/// Server-side parameters of a table listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableScope {
    pub project_id: String,
    pub dataset_id: String,
}

impl TableScope {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }

    /// Check that an entry belongs to this scope
    pub fn check(&self, project_id: &str, dataset_id: &str) -> Result<()> {
        if project_id != self.project_id {
            return Err(Error::scope_mismatch(
                "project_id",
                &self.project_id,
                project_id,
            ));
        }
        if dataset_id != self.dataset_id {
            return Err(Error::scope_mismatch(
                "dataset_id",
                &self.dataset_id,
                dataset_id,
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// `datasets.list`
#[async_trait]
pub trait ListDatasets: Send + Sync {
    /// Fetch one page of datasets, hidden ones included.
    ///
    /// An empty `page_token` asks for the first page.
    async fn list_datasets(
        &self,
        scope: &DatasetScope,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<DatasetListEntry>>;
}

/// `tables.list`
#[async_trait]
pub trait ListTables: Send + Sync {
    async fn list_tables(
        &self,
        scope: &TableScope,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<TableListEntry>>;
}

/// `jobs.insert`
#[async_trait]
pub trait InsertJob: Send + Sync {
    async fn insert_job(&self, job: &Job) -> Result<JobHandle>;
}

/// `datasets.insert` and `datasets.patch`
#[async_trait]
pub trait DatasetAdmin: Send + Sync {
    async fn insert_dataset(
        &self,
        project_id: &str,
        dataset: &DatasetResource,
    ) -> Result<DatasetResource>;

    async fn patch_dataset(
        &self,
        project_id: &str,
        dataset_id: &str,
        patch: &DatasetPatch,
    ) -> Result<DatasetResource>;
}

/// Everything a [`BigQueryClient`](super::BigQueryClient) needs from the
/// provider
pub trait Transport: ListDatasets + ListTables + InsertJob + DatasetAdmin {}

impl<T> Transport for T where T: ListDatasets + ListTables + InsertJob + DatasetAdmin {}
