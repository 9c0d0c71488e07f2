use crate::{kind::ReportKind, schema::ReportSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A YAML file of schema overrides, one entry per report kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub schema_version: String,
    pub schemas: Vec<ReportSchema>,
}

/// Form input as authored in YAML: scalar fields plus parameter tables, each a
/// list of row mappings. Values are coerced into form values when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInputFile {
    pub kind: ReportKind,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<BTreeMap<String, serde_yaml::Value>>>,
}
