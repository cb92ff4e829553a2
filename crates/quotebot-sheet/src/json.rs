//! JSON cell sink
//!
//! Collects cells in memory and saves them as a flat JSON object keyed by
//! cell reference. Useful when no template is at hand and in tests.

use crate::error::SheetError;
use crate::layout::is_cell_reference;
use quotebot_domain::traits::CellSink;
use quotebot_domain::CellValue;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// In-memory sink saved as JSON
#[derive(Debug, Clone, Default)]
pub struct JsonSink {
    cells: BTreeMap<String, CellValue>,
}

impl JsonSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells written so far
    pub fn cells(&self) -> &BTreeMap<String, CellValue> {
        &self.cells
    }

    /// Value of one cell
    pub fn get(&self, cell: &str) -> Option<&CellValue> {
        self.cells.get(cell)
    }

    /// Serialize the cells as pretty JSON
    pub fn to_json(&self) -> Result<String, SheetError> {
        Ok(serde_json::to_string_pretty(&self.cells)?)
    }
}

impl CellSink for JsonSink {
    type Error = SheetError;

    fn write_cell(&mut self, cell: &str, value: CellValue) -> Result<(), Self::Error> {
        if !is_cell_reference(cell) {
            return Err(SheetError::InvalidCell(cell.to_string()));
        }
        self.cells.insert(cell.to_string(), value);
        Ok(())
    }

    fn persist(&mut self, path: &Path) -> Result<(), Self::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Saved {} cells to {}", self.cells.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut sink = JsonSink::new();
        sink.write_cell("B8", CellValue::from("first")).unwrap();
        sink.write_cell("B8", CellValue::from("second")).unwrap();

        assert_eq!(sink.cells().len(), 1);
        assert_eq!(sink.get("B8"), Some(&CellValue::from("second")));
    }

    #[test]
    fn test_persist_writes_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quote.json");

        let mut sink = JsonSink::new();
        sink.write_cell("C12", CellValue::Integer(3)).unwrap();
        sink.write_cell("B8", CellValue::from("INSURED: X")).unwrap();
        sink.persist(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["B8"], "INSURED: X");
        assert_eq!(value["C12"], 3);
    }

    #[test]
    fn test_invalid_cell_rejected() {
        let mut sink = JsonSink::new();
        assert!(sink.write_cell("", CellValue::Integer(0)).is_err());
    }
}
