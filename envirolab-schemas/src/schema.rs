//! Declarative per-kind report schemas.
//!
//! A `ReportSchema` describes everything that differs between report kinds:
//! which scalar fields exist and which are required, their defaults, the shape
//! of each parameter table, how the finished document is laid out, and the
//! fallback text used when a value is missing. One generic form engine and one
//! projector are driven entirely by these descriptions.

use crate::kind::ReportKind;
use crate::parameter::ParameterRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Date,
}

/// The value a field receives when the form is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Empty,
    Text(String),
    /// The mount date, taken from the form's clock.
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    ReportNo,
    SampleRegNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum FieldRole {
    /// Entered by the user.
    Authored,
    /// Generated once at mount and read-only afterwards.
    Identifier(IdentifierField),
    /// Filled with the submission date when left blank.
    Stamped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub default: DefaultValue,
    #[serde(default)]
    pub required: bool,
    pub role: FieldRole,
}

impl FieldSpec {
    pub fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type: FieldType::Text,
            default: DefaultValue::Empty,
            required: false,
            role: FieldRole::Authored,
        }
    }

    pub fn date(key: &str, label: &str) -> Self {
        Self {
            field_type: FieldType::Date,
            default: DefaultValue::Today,
            ..Self::text(key, label)
        }
    }

    pub fn identifier(key: &str, label: &str, field: IdentifierField) -> Self {
        Self {
            role: FieldRole::Identifier(field),
            ..Self::text(key, label)
        }
    }

    pub fn stamped(key: &str, label: &str) -> Self {
        Self {
            role: FieldRole::Stamped,
            ..Self::date(key, label)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_text(mut self, text: &str) -> Self {
        self.default = DefaultValue::Text(text.to_string());
        self
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.role, FieldRole::Identifier(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
    /// Relative column width in percent, for renderers that lay out tables.
    pub width: u8,
}

impl ColumnSpec {
    pub fn new(key: &str, header: &str, width: u8) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            width,
        }
    }
}

/// Which cells of each row must be filled before submission, and whether
/// they must hold numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRule {
    pub columns: Vec<String>,
    #[serde(default)]
    pub numeric: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub key: String,
    pub title: String,
    /// Used in the placeholder row, e.g. "air quality parameters".
    pub noun: String,
    pub columns: Vec<ColumnSpec>,
    pub result_rule: ResultRule,
    #[serde(default)]
    pub default_rows: Vec<ParameterRow>,
    pub new_row: ParameterRow,
    #[serde(default)]
    pub note: Option<String>,
}

impl TableSpec {
    pub fn column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRef {
    pub label: String,
    pub path: String,
}

impl FieldRef {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionTemplate {
    Fields { title: String, fields: Vec<FieldRef> },
    Table { title: String, table: String },
    Text { title: String, paragraphs: Vec<String> },
}

impl SectionTemplate {
    pub fn title(&self) -> &str {
        match self {
            SectionTemplate::Fields { title, .. }
            | SectionTemplate::Table { title, .. }
            | SectionTemplate::Text { title, .. } => title,
        }
    }
}

pub const SCALAR_FALLBACK: &str = "N/A";
pub const CELL_FALLBACK: &str = "-";
pub const REMARKS_FALLBACK: &str = "No remarks provided.";

/// Text substituted for absent or empty values at projection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallbacks {
    pub scalar: String,
    pub cell: String,
    #[serde(default)]
    pub by_path: BTreeMap<String, String>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            scalar: SCALAR_FALLBACK.to_string(),
            cell: CELL_FALLBACK.to_string(),
            by_path: BTreeMap::from([("remarks".to_string(), REMARKS_FALLBACK.to_string())]),
        }
    }
}

impl Fallbacks {
    pub fn scalar_for(&self, path: &str) -> &str {
        self.by_path.get(path).map_or(self.scalar.as_str(), String::as_str)
    }

    pub fn cell_for(&self, table: &str, column: &str) -> &str {
        self.by_path
            .get(&format!("{table}.{column}"))
            .map_or(self.cell.as_str(), String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSchema {
    pub kind: ReportKind,
    pub title: String,
    /// `None` produces the bare `RPT-` identifiers used by water reports.
    pub identifier_prefix: Option<String>,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
    pub sections: Vec<SectionTemplate>,
    #[serde(default)]
    pub fallbacks: Fallbacks,
}

impl ReportSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn table(&self, key: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn identifier_key(&self, which: IdentifierField) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.role == FieldRole::Identifier(which))
            .map(|f| f.key.as_str())
    }
}
