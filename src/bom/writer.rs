//! Writing CycloneDX JSON BOMs.

use super::cyclonedx::{CdxBom, CdxComponent, CdxMetadata, CdxTool, CdxTools, BOM_FORMAT, SPEC_VERSION};
use crate::error::{ReconcileError, Result};
use crate::model::ComponentRecord;
use chrono::{SecondsFormat, Utc};
use std::path::Path;

fn build_bom(records: &[ComponentRecord]) -> CdxBom {
    CdxBom {
        bom_format: Some(BOM_FORMAT.to_string()),
        spec_version: Some(SPEC_VERSION.to_string()),
        serial_number: None,
        version: Some(1),
        metadata: Some(CdxMetadata {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tools: CdxTools {
                components: vec![CdxTool {
                    tool_type: "application".to_string(),
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                }],
            },
        }),
        components: records.iter().map(CdxComponent::from_record).collect(),
    }
}

/// Serialize records as a CycloneDX JSON document, keeping their order.
pub fn bom_to_string(records: &[ComponentRecord], pretty: bool) -> Result<String> {
    let bom = build_bom(records);
    let json = if pretty {
        serde_json::to_string_pretty(&bom)?
    } else {
        serde_json::to_string(&bom)?
    };
    Ok(json)
}

/// Write records to `path` as a pretty-printed CycloneDX JSON document.
pub fn write_bom(records: &[ComponentRecord], path: &Path) -> Result<()> {
    let json = bom_to_string(records, true)?;
    std::fs::write(path, json).map_err(|e| ReconcileError::io(path, e))?;
    tracing::debug!(path = %path.display(), components = records.len(), "wrote BOM");
    Ok(())
}
