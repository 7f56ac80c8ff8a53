//! Job envelope construction and submission

use super::extract::ExtractConfig;
use super::identity::{random_job_id, resolve_job_id};
use crate::client::InsertJob;
use crate::error::{Error, Result};
use crate::resources::{Job, JobConfiguration, JobReference, JobStatus};
use crate::translate::Translate;
use tracing::{debug, info};

// ============================================================================
// Job Config
// ============================================================================

/// A job of one of the supported kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JobConfig {
    Extract(ExtractConfig),
}

impl JobConfig {
    /// Short name of the job kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
        }
    }

    /// Reject a job that could not run
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Extract(c) => c.validate(),
        }
    }

    /// Caller supplied ID and whether to suffix it
    fn identity(&self) -> (&str, bool) {
        match self {
            Self::Extract(c) => (&c.job_id, c.add_job_id_suffix),
        }
    }
}

impl From<ExtractConfig> for JobConfig {
    fn from(config: ExtractConfig) -> Self {
        Self::Extract(config)
    }
}

impl Translate for JobConfig {
    type Wire = JobConfiguration;

    fn translate(&self) -> Result<JobConfiguration> {
        match self {
            Self::Extract(c) => Ok(JobConfiguration {
                extract: Some(c.translate()?),
                ..JobConfiguration::default()
            }),
        }
    }
}

// ============================================================================
// Job Handle
// ============================================================================

/// What the provider returned for an inserted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub project_id: String,
    pub job_id: String,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobHandle {
    /// Build a handle from an insert response
    pub fn from_job(job: Job) -> Result<Self> {
        let reference = job
            .job_reference
            .ok_or_else(|| Error::decode("job response has no jobReference"))?;
        Ok(Self {
            project_id: reference.project_id,
            job_id: reference.job_id,
            location: reference.location,
            status: job.status,
        })
    }

    /// Check whether the provider already reports a failure
    pub fn failed(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|status| status.first_error().is_some())
    }
}

// ============================================================================
// Submitter
// ============================================================================

/// Builds job envelopes for a project and hands them to an [`InsertJob`]
#[derive(Debug, Clone)]
pub struct JobSubmitter {
    project_id: String,
    location: Option<String>,
    id_source: fn() -> String,
}

impl JobSubmitter {
    /// Create a submitter for jobs in `project_id`
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: None,
            id_source: random_job_id,
        }
    }

    /// Run jobs in a specific location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = (!location.is_empty()).then_some(location);
        self
    }

    /// Replace the random ID generator
    #[must_use]
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Resolve the job's identity and build the request envelope.
    ///
    /// Nothing is sent; the returned job carries its final ID.
    pub fn new_job(&self, config: &JobConfig) -> Result<Job> {
        config.validate()?;
        let (job_id, add_suffix) = config.identity();
        let job_id = resolve_job_id(job_id, add_suffix, self.id_source)?;
        let configuration = config.translate()?;

        debug!(kind = config.kind(), job_id = %job_id, "Built job");

        Ok(Job {
            job_reference: Some(JobReference {
                project_id: self.project_id.clone(),
                job_id,
                location: self.location.clone(),
            }),
            configuration,
            ..Job::default()
        })
    }

    /// Build the job and insert it with one collaborator call
    pub async fn run<I>(&self, config: &JobConfig, inserter: &I) -> Result<JobHandle>
    where
        I: InsertJob + ?Sized,
    {
        let job = self.new_job(config)?;
        let handle = inserter.insert_job(&job).await?;
        info!(
            kind = config.kind(),
            project = %handle.project_id,
            job_id = %handle.job_id,
            "Inserted job"
        );
        Ok(handle)
    }
}
