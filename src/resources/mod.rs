//! Wire types for the BigQuery v2 REST schema
//!
//! Only the fields this crate reads or writes are modelled. JSON is
//! camelCase; int64 values travel as strings.

mod dataset;
mod job;
mod table;

pub use dataset::{DatasetList, DatasetListEntry, DatasetPatch, DatasetResource};
pub use job::{
    ErrorProto, Job, JobConfiguration, JobConfigurationExtract, JobReference, JobState, JobStatus,
};
pub use table::{TableList, TableListEntry};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    pub project_id: String,
    pub dataset_id: String,
}

impl DatasetReference {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableReference {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Parse `project.dataset.table` or `project:dataset.table`.
    ///
    /// Domain-scoped projects such as `example.com:proj` are accepted in
    /// either form.
    pub fn parse(s: &str) -> Option<Self> {
        let (rest, table) = s.rsplit_once('.')?;
        let (project, dataset) = rest.rsplit_once([':', '.'])?;

        // only the domain prefix of a project may contain dots
        let project_name = project.rsplit_once(':').map_or(project, |(_, name)| name);
        if project_name.contains('.') || [project, dataset, table].iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self::new(project, dataset, table))
    }
}

impl std::fmt::Display for TableReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

// used for `#[serde(skip_serializing_if = "is_zero")]` attrs
#[inline]
pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// int64 fields are encoded as JSON strings, but accept bare numbers too.
pub(crate) mod int64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrInt {
        Str(String),
        Int(i64),
    }

    impl StrOrInt {
        fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
            match self {
                Self::Int(value) => Ok(value),
                Self::Str(s) => s.parse().map_err(E::custom),
            }
        }
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        StrOrInt::deserialize(deserializer)?.into_i64()
    }

    pub mod optional {
        use super::StrOrInt;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<i64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.collect_str(value),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<i64>, D::Error> {
            Option::<StrOrInt>::deserialize(deserializer)?
                .map(StrOrInt::into_i64)
                .transpose()
        }
    }
}
