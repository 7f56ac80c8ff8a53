//! Client configuration
//!
//! `ClientConfig` is loaded from a YAML or JSON file, overlaid with
//! environment variables and finally with builder calls (the CLI maps its
//! flags onto the builder).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding `project_id`
pub const ENV_PROJECT: &str = "BIGQUERY_PROJECT";
/// Environment variable overriding `access_token`
pub const ENV_ACCESS_TOKEN: &str = "BIGQUERY_ACCESS_TOKEN";
/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "BIGQUERY_BASE_URL";

/// Settings shared by the client and its REST transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project that owns listings and jobs
    #[serde(default)]
    pub project_id: String,

    /// Root of the v2 REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 bearer token sent with every request
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Location jobs run in, e.g. "EU"
    #[serde(default)]
    pub location: Option<String>,

    /// User agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size for listings; 0 uses the provider default
    #[serde(default)]
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            base_url: default_base_url(),
            access_token: None,
            location: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            page_size: 0,
        }
    }
}

fn default_base_url() -> String {
    "https://bigquery.googleapis.com/bigquery/v2/".to_string()
}

fn default_user_agent() -> String {
    format!("bigquery-kit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config for a project with every other setting defaulted
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(project) = get(ENV_PROJECT) {
            self.project_id = project;
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url;
        }
    }

    /// Set the project
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the job location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the listing page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL as a directory, so relative joins keep its path
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.project_id.is_empty() {
            return Err(Error::config(format!(
                "project_id is required \
                 (set it in the config file, with --project or {ENV_PROJECT})"
            )));
        }
        let url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot be a base URL",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}
