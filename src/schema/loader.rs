//! Loading and saving schema documents

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::schema::registry::Schema;

/// Load a schema document from a JSON file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    debug!("Loading schema from: {}", path.display());
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

    let schema: Schema = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse schema file: {}", path.display()))?;

    info!(
        "Loaded schema `{}` v{} ({} instructions, {} account layouts)",
        schema.name,
        schema.version,
        schema.instructions.len(),
        schema.accounts.len()
    );
    Ok(schema)
}

/// Save a schema document to a JSON file, creating parent directories as
/// needed.
pub fn save_schema(schema: &Schema, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(schema)
        .with_context(|| format!("Failed to serialize schema `{}`", schema.name))?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write schema file: {}", path.display()))?;

    info!("Saved schema `{}` to: {}", schema.name, path.display());
    Ok(())
}
