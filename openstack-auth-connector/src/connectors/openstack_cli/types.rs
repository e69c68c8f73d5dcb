use serde::Deserialize;
use serde_json::{Value, json};

use crate::types::ServiceCatalog;

/// Output of `openstack token issue -f json`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenIssueOutput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One row of `openstack catalog list -f json`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogListEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub service_type: String,
    /// A list of endpoint objects on current clients, a preformatted string
    /// on older ones.
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Value,
}

/// Folds catalog rows into a map keyed by service type.
///
/// When several services share a type, the first row wins.
pub(crate) fn catalog_from_entries(entries: &[CatalogListEntry]) -> ServiceCatalog {
    let mut catalog = ServiceCatalog::new();
    for entry in entries {
        catalog
            .entry(entry.service_type.clone())
            .or_insert_with(|| json!({ "name": entry.name, "endpoints": entry.endpoints }));
    }
    catalog
}
