//! Reading CycloneDX JSON BOMs.

use super::cyclonedx::{CdxBom, BOM_FORMAT};
use crate::error::{ErrorContext, ReconcileError, Result};
use crate::model::ComponentRecord;
use std::path::Path;

/// Parse a CycloneDX JSON document into component records, in document order.
pub fn parse_bom_str(content: &str) -> Result<Vec<ComponentRecord>> {
    let bom: CdxBom = serde_json::from_str(content)?;

    match bom.bom_format.as_deref() {
        Some(BOM_FORMAT) => {}
        Some(other) => return Err(ReconcileError::unknown_format(other)),
        None => tracing::warn!("BOM has no bomFormat field, assuming CycloneDX"),
    }

    bom.components
        .into_iter()
        .enumerate()
        .map(|(idx, component)| match component.name.clone() {
            Some(name) if !name.is_empty() => Ok(component.into_record(name)),
            _ => Err(ReconcileError::missing_field(
                "name",
                format!("component #{}", idx + 1),
            )),
        })
        .collect()
}

/// Read a CycloneDX JSON BOM from disk.
pub fn read_bom(path: &Path) -> Result<Vec<ComponentRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
    let records =
        parse_bom_str(&content).with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), components = records.len(), "read BOM");
    Ok(records)
}
