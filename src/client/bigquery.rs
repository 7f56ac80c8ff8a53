//! Client and resource handles

use super::pages::{DatasetPages, TablePages};
use super::rest::RestTransport;
use super::types::Transport;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::job::{ExtractConfig, GcsReference, JobConfig, JobHandle, JobSubmitter};
use crate::resources::{DatasetReference, TableReference};
use crate::translate::{translate, DatasetMetadata, DatasetMetadataToUpdate, Translate};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Client
// ============================================================================

/// Entry point to the API. Cloning is cheap; clones share one transport.
#[derive(Clone)]
pub struct BigQueryClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    project_id: String,
    location: Option<String>,
    page_size: u32,
    transport: Arc<dyn Transport>,
}

impl BigQueryClient {
    /// Create a client for `project_id` on top of any transport
    pub fn new(project_id: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                project_id: project_id.into(),
                location: None,
                page_size: 0,
                transport,
            }),
        }
    }

    /// Create a client talking to the REST API described by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = RestTransport::new(config)?;
        Ok(Self::with_settings(
            config,
            Arc::new(transport) as Arc<dyn Transport>,
        ))
    }

    /// Create a client with the settings of `config` on top of any transport
    pub fn with_settings(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                project_id: config.project_id.clone(),
                location: config.location.clone().filter(|l| !l.is_empty()),
                page_size: config.page_size,
                transport,
            }),
        }
    }

    /// Project jobs and listings default to
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Location jobs run in
    pub fn location(&self) -> Option<&str> {
        self.inner.location.as_deref()
    }

    /// Configured listing page size; 0 means the provider default
    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    pub fn transport(&self) -> &dyn Transport {
        &*self.inner.transport
    }

    /// Datasets of the client's project. Hidden datasets are skipped unless
    /// [`DatasetPages::list_hidden`] is set.
    pub fn datasets(&self) -> DatasetPages {
        DatasetPages::new(self.clone(), self.project_id())
    }

    /// Datasets of another project
    pub fn project_datasets(&self, project_id: impl Into<String>) -> DatasetPages {
        DatasetPages::new(self.clone(), project_id)
    }

    /// Handle to a dataset of the client's project
    pub fn dataset(&self, dataset_id: impl Into<String>) -> Dataset {
        Dataset::new(self.clone(), self.project_id(), dataset_id)
    }

    /// Handle to a dataset of any project
    pub fn dataset_in_project(
        &self,
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Dataset {
        Dataset::new(self.clone(), project_id, dataset_id)
    }

    /// Job submitter bound to the client's project and location
    pub fn submitter(&self) -> JobSubmitter {
        let submitter = JobSubmitter::new(self.project_id());
        match self.location() {
            Some(location) => submitter.with_location(location),
            None => submitter,
        }
    }

    /// Build and insert a job
    pub async fn run_job(&self, config: &JobConfig) -> Result<JobHandle> {
        self.submitter().run(config, self.transport()).await
    }
}

impl PartialEq for BigQueryClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for BigQueryClient {}

impl std::fmt::Debug for BigQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigQueryClient")
            .field("project_id", &self.inner.project_id)
            .field("location", &self.inner.location)
            .field("page_size", &self.inner.page_size)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Handle to a dataset. Creating one does not touch the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub project_id: String,
    pub dataset_id: String,
    client: BigQueryClient,
}

impl Dataset {
    pub(crate) fn new(
        client: BigQueryClient,
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            client,
        }
    }

    pub fn client(&self) -> &BigQueryClient {
        &self.client
    }

    pub fn reference(&self) -> DatasetReference {
        DatasetReference::new(&self.project_id, &self.dataset_id)
    }

    /// Hidden datasets have IDs starting with an underscore
    pub fn is_hidden(&self) -> bool {
        self.dataset_id.starts_with('_')
    }

    /// Tables of this dataset
    pub fn tables(&self) -> TablePages {
        TablePages::new(self.client.clone(), &self.project_id, &self.dataset_id)
    }

    /// Handle to a table of this dataset
    pub fn table(&self, table_id: impl Into<String>) -> Table {
        Table::new(
            self.client.clone(),
            TableReference::new(&self.project_id, &self.dataset_id, table_id),
        )
    }

    /// Create the dataset. `None` creates it with provider defaults.
    pub async fn create(&self, metadata: Option<&DatasetMetadata>) -> Result<DatasetMetadata> {
        let mut body = translate(metadata)?;
        body.dataset_reference = Some(self.reference());

        debug!(project = %self.project_id, dataset = %self.dataset_id, "Creating dataset");
        let created = self
            .client
            .transport()
            .insert_dataset(&self.project_id, &body)
            .await?;
        DatasetMetadata::from_resource(&created)
    }

    /// Change the fields set in `update`
    pub async fn update(&self, update: &DatasetMetadataToUpdate) -> Result<DatasetMetadata> {
        let patch = update.translate()?;

        debug!(project = %self.project_id, dataset = %self.dataset_id, "Updating dataset");
        let updated = self
            .client
            .transport()
            .patch_dataset(&self.project_id, &self.dataset_id, &patch)
            .await?;
        DatasetMetadata::from_resource(&updated)
    }
}

// ============================================================================
// Table
// ============================================================================

/// Handle to a table. Creating one does not touch the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub reference: TableReference,
    client: BigQueryClient,
}

impl Table {
    pub(crate) fn new(client: BigQueryClient, reference: TableReference) -> Self {
        Self { reference, client }
    }

    pub fn client(&self) -> &BigQueryClient {
        &self.client
    }

    pub fn table_id(&self) -> &str {
        &self.reference.table_id
    }

    /// Prepare an export of this table to Cloud Storage. Adjust
    /// [`Extractor::config`] before calling [`Extractor::run`].
    pub fn extractor_to(&self, dst: GcsReference) -> Extractor {
        Extractor {
            config: ExtractConfig::new(self.reference.clone(), dst),
            client: self.client.clone(),
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// An extract job bound to a client
#[derive(Debug, Clone)]
pub struct Extractor {
    pub config: ExtractConfig,
    client: BigQueryClient,
}

impl Extractor {
    /// Insert the extract job through the client's transport
    pub async fn run(&self) -> Result<JobHandle> {
        self.client
            .run_job(&JobConfig::Extract(self.config.clone()))
            .await
    }
}
