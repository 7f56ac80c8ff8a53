//! REST transport
//!
//! Plain JSON over HTTP against the v2 API. Every request is sent once;
//! non-2xx responses become [`Error::HttpStatus`] and connection failures
//! become [`Error::Transport`] naming the API method.

use super::types::{DatasetAdmin, DatasetScope, InsertJob, ListDatasets, ListTables, TableScope};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::job::JobHandle;
use crate::pagination::Page;
use crate::resources::{
    DatasetList, DatasetListEntry, DatasetPatch, DatasetResource, Job, TableList, TableListEntry,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// reqwest implementation of every collaborator trait
pub struct RestTransport {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl RestTransport {
    /// Create a transport from client settings
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// API root every request is relative to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/projects/{project}/{segments...}` with each segment
    /// percent-encoded
    fn url(&self, project_id: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base_url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("projects")
            .push(project_id)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        req: RequestBuilder,
    ) -> Result<T> {
        let response = req
            .send()
            .await
            .map_err(|e| Error::transport(operation, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(operation, e))?;

        if !status.is_success() {
            return Err(Error::http_status(
                operation,
                status.as_u16(),
                error_message(operation, body),
            ));
        }

        debug!(operation, status = status.as_u16(), "Request succeeded");

        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("{operation} response: {e}")))
    }
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("has_access_token", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the message out of a `{"error": {"message": ...}}` body
fn error_message(operation: &str, body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            warn!(operation, "Error response is not JSON, using raw body");
            body
        }
    }
}

#[async_trait]
impl ListDatasets for RestTransport {
    async fn list_datasets(
        &self,
        scope: &DatasetScope,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<DatasetListEntry>> {
        let mut url = self.url(&scope.project_id, &["datasets"])?;
        {
            let mut query = url.query_pairs_mut();
            // hidden datasets are filtered client side
            query.append_pair("all", "true");
            if page_size > 0 {
                query.append_pair("maxResults", &page_size.to_string());
            }
            if !page_token.is_empty() {
                query.append_pair("pageToken", page_token);
            }
            if let Some(filter) = &scope.filter {
                query.append_pair("filter", filter);
            }
        }

        let list: DatasetList = self
            .send("datasets.list", self.request(Method::GET, url))
            .await?;
        Ok(Page::new(
            list.datasets,
            list.next_page_token.unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl ListTables for RestTransport {
    async fn list_tables(
        &self,
        scope: &TableScope,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<TableListEntry>> {
        let mut url = self.url(&scope.project_id, &["datasets", &scope.dataset_id, "tables"])?;
        {
            let mut query = url.query_pairs_mut();
            if page_size > 0 {
                query.append_pair("maxResults", &page_size.to_string());
            }
            if !page_token.is_empty() {
                query.append_pair("pageToken", page_token);
            }
        }
        // drop a dangling '?' when no parameter was added
        if url.query() == Some("") {
            url.set_query(None);
        }

        let list: TableList = self
            .send("tables.list", self.request(Method::GET, url))
            .await?;
        Ok(Page::new(
            list.tables,
            list.next_page_token.unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl InsertJob for RestTransport {
    async fn insert_job(&self, job: &Job) -> Result<JobHandle> {
        let project_id = job
            .job_reference
            .as_ref()
            .map(|r| r.project_id.as_str())
            .ok_or_else(|| Error::validation("job_reference", "job has no reference"))?;
        let url = self.url(project_id, &["jobs"])?;

        let inserted: Job = self
            .send("jobs.insert", self.request(Method::POST, url).json(job))
            .await?;
        JobHandle::from_job(inserted)
    }
}

#[async_trait]
impl DatasetAdmin for RestTransport {
    async fn insert_dataset(
        &self,
        project_id: &str,
        dataset: &DatasetResource,
    ) -> Result<DatasetResource> {
        let url = self.url(project_id, &["datasets"])?;
        self.send("datasets.insert", self.request(Method::POST, url).json(dataset))
            .await
    }

    async fn patch_dataset(
        &self,
        project_id: &str,
        dataset_id: &str,
        patch: &DatasetPatch,
    ) -> Result<DatasetResource> {
        let url = self.url(project_id, &["datasets", dataset_id])?;
        self.send("datasets.patch", self.request(Method::PATCH, url).json(patch))
            .await
    }
}
