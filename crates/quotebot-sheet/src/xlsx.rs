//! Spreadsheet template sink
//!
//! Opens an existing `.xlsx` template, fills cells on its first worksheet and
//! saves the result to a new file. Formatting and any cells not written are
//! kept as they are in the template.

use crate::error::SheetError;
use crate::layout::is_cell_reference;
use quotebot_domain::traits::CellSink;
use quotebot_domain::CellValue;
use rust_decimal::prelude::ToPrimitive;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use umya_spreadsheet::Spreadsheet;

const SHEET_INDEX: usize = 0;

/// Writes cells into a copy of an `.xlsx` template
pub struct XlsxTemplateSink {
    template: PathBuf,
    book: Spreadsheet,
    written: usize,
}

impl XlsxTemplateSink {
    /// Load the template
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read as a workbook or has no
    /// worksheet.
    pub fn open(template: impl Into<PathBuf>) -> Result<Self, SheetError> {
        let template = template.into();
        debug!("Loading template {}", template.display());

        let book = umya_spreadsheet::reader::xlsx::read(&template)
            .map_err(|e| SheetError::Xlsx(format!("{}: {}", template.display(), e)))?;

        if book.get_sheet(&SHEET_INDEX).is_none() {
            return Err(SheetError::NoWorksheet(template));
        }

        Ok(Self {
            template,
            book,
            written: 0,
        })
    }

    /// Path of the template this sink was loaded from
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Cells written since the template was loaded
    pub fn written(&self) -> usize {
        self.written
    }
}

impl CellSink for XlsxTemplateSink {
    type Error = SheetError;

    fn write_cell(&mut self, cell: &str, value: CellValue) -> Result<(), Self::Error> {
        if !is_cell_reference(cell) {
            return Err(SheetError::InvalidCell(cell.to_string()));
        }

        let sheet = self
            .book
            .get_sheet_mut(&SHEET_INDEX)
            .ok_or_else(|| SheetError::NoWorksheet(self.template.clone()))?;
        let target = sheet.get_cell_mut(cell);

        match value {
            CellValue::Text(text) => {
                target.set_value_string(text);
            }
            CellValue::Integer(n) => {
                target.set_value_number(n as f64);
            }
            CellValue::Number(d) => {
                let n = d
                    .to_f64()
                    .ok_or_else(|| SheetError::Xlsx(format!("{} does not fit a cell", d)))?;
                target.set_value_number(n);
            }
        }

        self.written += 1;
        Ok(())
    }

    fn persist(&mut self, path: &Path) -> Result<(), Self::Error> {
        if same_file(path, &self.template) {
            return Err(SheetError::OverwritesTemplate(self.template.clone()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .map_err(|e| SheetError::Xlsx(format!("{}: {}", path.display(), e)))?;

        info!("Saved {} cells to {}", self.written, path.display());
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn template(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("template.xlsx");
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_mut(&0)
            .unwrap()
            .get_cell_mut("A1")
            .set_value_string("PROFESSIONAL INDEMNITY QUOTATION");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path
    }

    #[test]
    fn test_write_and_persist() {
        let dir = TempDir::new().unwrap();
        let mut sink = XlsxTemplateSink::open(template(&dir)).unwrap();

        sink.write_cell("B8", CellValue::from("INSURED: OTIENO LLP")).unwrap();
        sink.write_cell("C12", CellValue::Integer(2)).unwrap();
        sink.write_cell("E32", CellValue::Number(dec!(4391613.55))).unwrap();
        assert_eq!(sink.written(), 3);

        let output = dir.path().join("out").join("quote.xlsx");
        sink.persist(&output).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
        let sheet = book.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value("B8"), "INSURED: OTIENO LLP");
        assert_eq!(sheet.get_value("A1"), "PROFESSIONAL INDEMNITY QUOTATION");
    }

    #[test]
    fn test_template_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = template(&dir);
        let mut sink = XlsxTemplateSink::open(&path).unwrap();
        sink.write_cell("B8", CellValue::from("INSURED: X")).unwrap();
        sink.persist(&dir.path().join("quote.xlsx")).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        assert_eq!(book.get_sheet(&0).unwrap().get_value("B8"), "");
    }

    #[test]
    fn test_refuses_to_overwrite_template() {
        let dir = TempDir::new().unwrap();
        let path = template(&dir);
        let mut sink = XlsxTemplateSink::open(&path).unwrap();

        let result = sink.persist(&path);
        assert!(matches!(result, Err(SheetError::OverwritesTemplate(_))));
    }

    #[test]
    fn test_invalid_cell_rejected() {
        let dir = TempDir::new().unwrap();
        let mut sink = XlsxTemplateSink::open(template(&dir)).unwrap();
        let result = sink.write_cell("not-a-cell", CellValue::Integer(1));
        assert!(matches!(result, Err(SheetError::InvalidCell(_))));
        assert_eq!(sink.written(), 0);
    }

    #[test]
    fn test_missing_template() {
        let result = XlsxTemplateSink::open("/nonexistent/quotebot/template.xlsx");
        assert!(matches!(result, Err(SheetError::Xlsx(_))));
    }
}
