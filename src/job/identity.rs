//! Job ID resolution
//!
//! Every job gets its final ID before submission, so a caller can look it up
//! again or detect a duplicate insert.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static JOB_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Provider limit on job ID length
pub const MAX_JOB_ID_LEN: usize = 1024;

/// A collision resistant random ID
pub fn random_job_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Resolve the ID a job will be submitted with.
///
/// - explicit ID, no suffix: used as-is
/// - explicit ID with suffix: `{id}-{random}`
/// - no ID: `random`
pub fn resolve_job_id(
    job_id: &str,
    add_suffix: bool,
    random: impl FnOnce() -> String,
) -> Result<String> {
    if job_id.is_empty() {
        return Ok(random());
    }

    let resolved = if add_suffix {
        format!("{job_id}-{}", random())
    } else {
        job_id.to_owned()
    };

    validate_job_id(&resolved)?;
    Ok(resolved)
}

/// Check an ID against the provider's character set and length limit
pub fn validate_job_id(job_id: &str) -> Result<()> {
    if job_id.len() > MAX_JOB_ID_LEN {
        return Err(Error::validation(
            "job_id",
            format!("longer than {MAX_JOB_ID_LEN} characters"),
        ));
    }
    if !JOB_ID.is_match(job_id) {
        return Err(Error::validation(
            "job_id",
            format!("'{job_id}' may only contain letters, digits, '_' and '-'"),
        ));
    }
    Ok(())
}
