use super::{int64, TableReference};
use serde::{Deserialize, Serialize};

/// One entry of a `tables.list` page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableListEntry {
    #[serde(default)]
    pub table_reference: Option<TableReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// TABLE, VIEW, EXTERNAL, ...
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
}

impl TableListEntry {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            table_reference: Some(TableReference::new(project_id, dataset_id, table_id)),
            ..Self::default()
        }
    }
}

/// `tables.list` response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableList {
    #[serde(default)]
    pub tables: Vec<TableListEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(
        default,
        with = "int64::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_items: Option<i64>,
}
