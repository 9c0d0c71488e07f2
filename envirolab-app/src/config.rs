use anyhow::{Context, Result};
use envirolab_core::catalog::{Catalog, DEFAULT_ISSUED_TO};
use envirolab_schemas::{file_formats::SchemaFile, schema::ReportSchema};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

/// Who issues the reports: printed in the signatory footer and used as the
/// default addressee of new forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabProfile {
    pub organisation: String,
    pub signatory: String,
    pub default_issued_to: String,
}

impl Default for LabProfile {
    fn default() -> Self {
        Self {
            organisation: "KEC International Limited".to_string(),
            signatory: "Authorized Signatory".to_string(),
            default_issued_to: DEFAULT_ISSUED_TO.to_string(),
        }
    }
}

impl LabProfile {
    /// Reads a profile from YAML, or returns the built-in profile when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lab profile: {:?}", path))?;
        let profile: LabProfile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse lab profile from {:?}", path))?;
        tracing::info!(organisation = %profile.organisation, "loaded lab profile");
        Ok(profile)
    }
}

/// The built-in catalog, with any schemas found under `override_dir` replacing
/// the built-in schema of the same kind.
pub fn load_catalog(override_dir: Option<&Path>) -> Result<Catalog> {
    let catalog = Catalog::builtin();
    let Some(dir) = override_dir else {
        return Ok(catalog);
    };

    let overrides = load_yaml_files_into_map(
        dir,
        |file: SchemaFile| file.schemas,
        |schema: &ReportSchema| schema.kind.to_string(),
    )?;
    tracing::info!(count = overrides.len(), dir = ?dir, "loaded schema overrides");

    Ok(overrides
        .into_values()
        .fold(catalog, |catalog, schema| catalog.with_schema(schema)))
}

/// Generic helper to load all YAML files in a directory into a HashMap.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<HashMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., SchemaFile)
    E: Fn(F) -> Vec<T>,                  // Extracts the items from the wrapper
    K: Fn(&T) -> String,                 // Map key for an item
{
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    // Later files win, so make "later" deterministic.
    paths.sort();

    let mut map = HashMap::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

        for item in extract_vec(file_wrapper) {
            map.insert(get_key(&item), item);
        }
    }
    Ok(map)
}
