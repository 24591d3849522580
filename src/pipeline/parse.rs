//! BOM loading with context for error messages.

use crate::bom::read_bom;
use crate::model::ComponentRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a BOM file, logging progress unless `quiet`.
pub fn read_bom_with_context(path: &Path, quiet: bool) -> Result<Vec<ComponentRecord>> {
    if !quiet {
        tracing::info!("Reading BOM: {}", path.display());
    }

    let records =
        read_bom(path).with_context(|| format!("Failed to read BOM: {}", path.display()))?;

    if !quiet {
        tracing::info!("Read {} components", records.len());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_path() {
        let err = read_bom_with_context(Path::new("/nonexistent/bom.json"), true).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bom.json"));
    }

    #[test]
    fn test_reads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.json");
        std::fs::write(
            &path,
            r#"{"bomFormat":"CycloneDX","components":[{"name":"zlib","version":"1.3"}]}"#,
        )
        .unwrap();

        let records = read_bom_with_context(&path, true).unwrap();
        assert_eq!(records, vec![ComponentRecord::new("zlib", "1.3")]);
    }
}
