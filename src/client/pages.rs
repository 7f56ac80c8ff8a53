//! Dataset and table listings
//!
//! Both sources decode raw entries into handles bound to the listing's
//! client and reject entries from outside their scope.

use super::bigquery::{BigQueryClient, Dataset, Table};
use super::types::{DatasetScope, TableScope};
use crate::error::{Error, Result};
use crate::pagination::{Cursor, Page, PageSource};
use crate::resources::{DatasetListEntry, TableListEntry};
use async_trait::async_trait;

// ============================================================================
// Datasets
// ============================================================================

/// Page source over the datasets of one project
#[derive(Debug, Clone)]
pub struct DatasetPages {
    client: BigQueryClient,
    scope: DatasetScope,
    list_hidden: bool,
}

impl DatasetPages {
    pub(crate) fn new(client: BigQueryClient, project_id: impl Into<String>) -> Self {
        Self {
            client,
            scope: DatasetScope::new(project_id),
            list_hidden: false,
        }
    }

    /// Include datasets whose ID starts with an underscore
    #[must_use]
    pub fn list_hidden(mut self, list_hidden: bool) -> Self {
        self.list_hidden = list_hidden;
        self
    }

    /// Only list datasets matching a label filter, e.g. `labels.env:prod`
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.scope.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    pub fn scope(&self) -> &DatasetScope {
        &self.scope
    }

    /// Start iterating with the client's configured page size
    pub fn into_cursor(self) -> Cursor<Self> {
        let page_size = self.client.page_size();
        Cursor::with_page_size(self, page_size)
    }
}

#[async_trait]
impl PageSource for DatasetPages {
    type Raw = DatasetListEntry;
    type Item = Dataset;

    async fn fetch(&self, page_size: u32, page_token: &str) -> Result<Page<DatasetListEntry>> {
        self.client
            .transport()
            .list_datasets(&self.scope, page_size, page_token)
            .await
    }

    fn decode(&self, raw: DatasetListEntry) -> Result<Dataset> {
        let reference = raw
            .dataset_reference
            .ok_or_else(|| Error::decode("dataset entry has no datasetReference"))?;
        self.scope.check(&reference.project_id)?;

        Ok(Dataset::new(
            self.client.clone(),
            reference.project_id,
            reference.dataset_id,
        ))
    }

    fn retain(&self, dataset: &Dataset) -> bool {
        self.list_hidden || !dataset.is_hidden()
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Page source over the tables of one dataset
#[derive(Debug, Clone)]
pub struct TablePages {
    client: BigQueryClient,
    scope: TableScope,
}

impl TablePages {
    pub(crate) fn new(
        client: BigQueryClient,
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            scope: TableScope::new(project_id, dataset_id),
        }
    }

    pub fn scope(&self) -> &TableScope {
        &self.scope
    }

    /// Start iterating with the client's configured page size
    pub fn into_cursor(self) -> Cursor<Self> {
        let page_size = self.client.page_size();
        Cursor::with_page_size(self, page_size)
    }
}

#[async_trait]
impl PageSource for TablePages {
    type Raw = TableListEntry;
    type Item = Table;

    async fn fetch(&self, page_size: u32, page_token: &str) -> Result<Page<TableListEntry>> {
        self.client
            .transport()
            .list_tables(&self.scope, page_size, page_token)
            .await
    }

    fn decode(&self, raw: TableListEntry) -> Result<Table> {
        let reference = raw
            .table_reference
            .ok_or_else(|| Error::decode("table entry has no tableReference"))?;
        self.scope
            .check(&reference.project_id, &reference.dataset_id)?;

        Ok(Table::new(self.client.clone(), reference))
    }
}
