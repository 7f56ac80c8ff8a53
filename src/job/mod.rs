//! Job module
//!
//! Turns typed job configuration into an inserted job.
//!
//! # Job identity
//!
//! | `job_id` | `add_job_id_suffix` | submitted ID     |
//! |----------|---------------------|------------------|
//! | `"x"`    | `false`             | `x`              |
//! | `"x"`    | `true`              | `x-{random}`     |
//! | `""`     | any                 | `{random}`       |
//!
//! Random parts are UUIDv4 in simple (hex) form.

mod extract;
mod identity;
mod submitter;

pub use extract::{Compression, DataFormat, ExtractConfig, GcsReference};
pub use identity::{random_job_id, resolve_job_id, validate_job_id, MAX_JOB_ID_LEN};
pub use submitter::{JobConfig, JobHandle, JobSubmitter};

#[cfg(test)]
mod tests;
