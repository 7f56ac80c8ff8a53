//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::BigQueryClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::job::{ExtractConfig, GcsReference, JobConfig};
use crate::pagination::{Cursor, PageSource};
use crate::resources::TableReference;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;

        match &self.cli.command {
            Commands::Datasets {
                all,
                filter,
                page_size,
            } => {
                let client = connect(&config)?;
                let mut pages = client.datasets().list_hidden(*all);
                if let Some(filter) = filter {
                    pages = pages.filter(filter.as_str());
                }
                let cursor =
                    Cursor::with_page_size(pages, page_size.unwrap_or(config.page_size));
                self.drain(cursor, |dataset| {
                    json!({
                        "project_id": dataset.project_id,
                        "dataset_id": dataset.dataset_id,
                    })
                })
                .await
            }
            Commands::Tables { dataset, page_size } => {
                let client = connect(&config)?;
                let pages = client.dataset(dataset.as_str()).tables();
                let cursor =
                    Cursor::with_page_size(pages, page_size.unwrap_or(config.page_size));
                self.drain(cursor, |table| json!(table.reference)).await
            }
            Commands::Extract { dry_run, .. } => {
                let client = connect(&config)?;
                let job_config = JobConfig::Extract(self.extract_config()?);

                if *dry_run {
                    let job = client.submitter().new_job(&job_config)?;
                    return self.emit(&job);
                }

                let handle = client.run_job(&job_config).await?;
                self.emit(&json!({
                    "project_id": handle.project_id,
                    "job_id": handle.job_id,
                    "location": handle.location,
                    "state": handle.status.map(|s| s.state),
                }))
            }
        }
    }

    /// Resolve the client config: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        config.apply_env();
        if let Some(project) = &self.cli.project {
            config.project_id.clone_from(project);
        }
        Ok(config)
    }

    /// Build the extract job from `extract` arguments
    pub fn extract_config(&self) -> Result<ExtractConfig> {
        let Commands::Extract {
            table,
            uris,
            format,
            compression,
            delimiter,
            no_header,
            job_id,
            suffix,
            ..
        } = &self.cli.command
        else {
            return Err(Error::config("not an extract command"));
        };

        let src = TableReference::parse(table).ok_or_else(|| {
            Error::validation("src", format!("'{table}' is not project.dataset.table"))
        })?;

        let mut dst = GcsReference::new(uris.iter().cloned());
        if let Some(format) = format {
            dst = dst.with_format(format.parse()?);
        }
        if let Some(compression) = compression {
            dst = dst.with_compression(compression.parse()?);
        }
        if let Some(delimiter) = delimiter {
            dst = dst.with_field_delimiter(delimiter.as_str());
        }

        Ok(ExtractConfig {
            job_id: job_id.clone().unwrap_or_default(),
            add_job_id_suffix: *suffix,
            disable_header: *no_header,
            ..ExtractConfig::new(src, dst)
        })
    }

    async fn drain<S, F>(&self, mut cursor: Cursor<S>, render: F) -> Result<()>
    where
        S: PageSource,
        F: Fn(&S::Item) -> serde_json::Value,
    {
        while let Some(item) = cursor.next().await? {
            self.emit(&render(&item))?;
        }
        let stats = cursor.stats();
        debug!(
            pages = stats.pages_fetched,
            served = stats.items_served,
            filtered = stats.items_filtered,
            "Listing complete"
        );
        Ok(())
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.output {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}

fn connect(config: &ClientConfig) -> Result<BigQueryClient> {
    BigQueryClient::from_config(config)
        .with_context(|| format!("Failed to set up client for project '{}'", config.project_id))
}
