use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One priced entry of the drinks catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub category: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

// ── Input ──

pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("HTML file not found at '{}'", path.display());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file '{}'", path.display()))
}

// ── Output ──

/// Render the catalog as a 4-space indented JSON array, non-ASCII left as is.
pub fn to_json(items: &[MenuItem]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Serialize first, then write the file in one call.
pub fn write_catalog(path: &Path, items: &[MenuItem]) -> Result<()> {
    let json = to_json(items)?;
    fs::write(path, json)
        .with_context(|| format!("Error writing JSON file '{}'", path.display()))
}

pub fn read_catalog(path: &Path) -> Result<Vec<MenuItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Malformed catalog '{}'", path.display()))
}
