use super::{int64, is_zero, DatasetReference};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dataset resource, used for inserts and returned by gets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_reference: Option<DatasetReference>,
    /// Always sent: an empty name clears it on the server
    #[serde(default)]
    pub friendly_name: String,
    /// Always sent: an empty description clears it on the server
    #[serde(default)]
    pub description: String,
    /// 0 means tables never expire
    #[serde(default, with = "int64", skip_serializing_if = "is_zero")]
    pub default_table_expiration_ms: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    // output only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(
        default,
        with = "int64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<i64>,
    #[serde(
        default,
        with = "int64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified_time: Option<i64>,
}

/// Partial dataset body for `datasets.patch`. Only `Some` fields are sent,
/// empty values included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "int64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_table_expiration_ms: Option<i64>,
    /// A `None` value deletes the label
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, Option<String>>,
}

impl DatasetPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One entry of a `datasets.list` page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetListEntry {
    #[serde(default)]
    pub dataset_reference: Option<DatasetReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl DatasetListEntry {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_reference: Some(DatasetReference::new(project_id, dataset_id)),
            ..Self::default()
        }
    }
}

/// `datasets.list` response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetList {
    #[serde(default)]
    pub datasets: Vec<DatasetListEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
