//! Projection of a quotation onto template cells
//!
//! This is the only place cell coordinates appear. The workbook is computed
//! in memory first; the sink only ever receives the final values.

use crate::error::SheetError;
use quotebot_domain::traits::CellSink;
use quotebot_domain::{CellValue, ExtractedRecord, PremiumWorkbook, NOT_FOUND};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cell coordinates for every written value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellLayout {
    /// Insured name cell
    pub insured: String,
    /// Text written before the insured name
    pub insured_prefix: String,
    /// Headcount per staff category
    pub staff_headcount: [String; 4],
    /// Per-head rate per staff category
    pub staff_rate: [String; 4],
    /// Amount per staff category
    pub staff_amount: [String; 4],
    /// Indemnity limit on the base-rate row
    pub indemnity_basis: String,
    /// Base rate
    pub indemnity_rate: String,
    /// Indemnity line
    pub indemnity_amount: String,
    /// Running total
    pub running_total: String,
    /// Indemnity limit on the scale row
    pub limit_basis: String,
    /// Scale factor
    pub limit_rate: String,
    /// Limit line
    pub limit_amount: String,
    /// Profession text
    pub profession_name: String,
    /// Profession fee
    pub profession_fee: String,
    /// Profession line
    pub profession_amount: String,
    /// Combined total
    pub combined_total: String,
    /// Loading lines
    pub loadings: [String; 3],
    /// Loaded total
    pub loaded_total: String,
    /// Final-tier line
    pub final_tier: String,
    /// Fixed fee
    pub fixed_fee: String,
    /// Grand total
    pub grand_total: String,
    /// Excess amount; not written unless set
    pub excess: Option<String>,
}

impl Default for CellLayout {
    fn default() -> Self {
        let four = |names: [&str; 4]| names.map(str::to_string);

        Self {
            insured: "B8".to_string(),
            insured_prefix: "INSURED: ".to_string(),
            staff_headcount: four(["C12", "C13", "C14", "C15"]),
            staff_rate: four(["D12", "D13", "D14", "D15"]),
            staff_amount: four(["E12", "E13", "E14", "E15"]),
            indemnity_basis: "C17".to_string(),
            indemnity_rate: "D17".to_string(),
            indemnity_amount: "E17".to_string(),
            running_total: "E18".to_string(),
            limit_basis: "C20".to_string(),
            limit_rate: "D20".to_string(),
            limit_amount: "E20".to_string(),
            profession_name: "C22".to_string(),
            profession_fee: "D22".to_string(),
            profession_amount: "E22".to_string(),
            combined_total: "E24".to_string(),
            loadings: ["E26", "E27", "E28"].map(str::to_string),
            loaded_total: "E29".to_string(),
            final_tier: "E30".to_string(),
            fixed_fee: "E31".to_string(),
            grand_total: "E32".to_string(),
            excess: None,
        }
    }
}

impl CellLayout {
    /// Every configured cell reference
    fn references(&self) -> Vec<&str> {
        let mut refs = vec![self.insured.as_str()];
        refs.extend(self.staff_headcount.iter().map(String::as_str));
        refs.extend(self.staff_rate.iter().map(String::as_str));
        refs.extend(self.staff_amount.iter().map(String::as_str));
        refs.extend([
            self.indemnity_basis.as_str(),
            self.indemnity_rate.as_str(),
            self.indemnity_amount.as_str(),
            self.running_total.as_str(),
            self.limit_basis.as_str(),
            self.limit_rate.as_str(),
            self.limit_amount.as_str(),
            self.profession_name.as_str(),
            self.profession_fee.as_str(),
            self.profession_amount.as_str(),
            self.combined_total.as_str(),
        ]);
        refs.extend(self.loadings.iter().map(String::as_str));
        refs.extend([
            self.loaded_total.as_str(),
            self.final_tier.as_str(),
            self.fixed_fee.as_str(),
            self.grand_total.as_str(),
        ]);
        refs.extend(self.excess.as_deref());
        refs
    }

    /// Check every reference looks like `B8`
    pub fn validate(&self) -> Result<(), SheetError> {
        match self.references().into_iter().find(|r| !is_cell_reference(r)) {
            Some(bad) => Err(SheetError::InvalidCell(bad.to_string())),
            None => Ok(()),
        }
    }
}

/// Whether `reference` is a column-letters-then-row-number reference
pub fn is_cell_reference(reference: &str) -> bool {
    let split = reference
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(reference.len());
    let (column, row) = reference.split_at(split);

    !column.is_empty()
        && column.len() <= 3
        && column.chars().all(|c| c.is_ascii_uppercase())
        && !row.is_empty()
        && !row.starts_with('0')
        && row.chars().all(|c| c.is_ascii_digit())
}

fn whole(amount: u64) -> CellValue {
    match i64::try_from(amount) {
        Ok(n) => CellValue::Integer(n),
        Err(_) => CellValue::Number(Decimal::from(amount)),
    }
}

/// Map a record and its workbook onto cells, in worksheet order
pub fn project(
    record: &ExtractedRecord,
    workbook: &PremiumWorkbook,
    layout: &CellLayout,
) -> Vec<(String, CellValue)> {
    let mut cells: Vec<(String, CellValue)> = Vec::new();
    let mut put = |cell: &str, value: CellValue| cells.push((cell.to_string(), value));

    put(
        &layout.insured,
        CellValue::Text(format!(
            "{}{}",
            layout.insured_prefix,
            record.insured_name_or_not_found()
        )),
    );

    for (i, line) in workbook.staff.iter().enumerate() {
        put(&layout.staff_headcount[i], CellValue::from(line.headcount));
    }
    for (i, line) in workbook.staff.iter().enumerate() {
        put(&layout.staff_rate[i], CellValue::Number(line.rate));
    }
    for (i, line) in workbook.staff.iter().enumerate() {
        put(&layout.staff_amount[i], CellValue::Number(line.amount));
    }

    put(&layout.indemnity_basis, whole(workbook.indemnity.basis));
    put(&layout.indemnity_rate, CellValue::Number(workbook.indemnity.rate));
    put(&layout.indemnity_amount, CellValue::Number(workbook.indemnity.amount));
    put(&layout.running_total, CellValue::Number(workbook.running_total));

    put(&layout.limit_basis, whole(workbook.limit_scale.basis));
    put(&layout.limit_rate, CellValue::Number(workbook.limit_scale.rate));
    put(&layout.limit_amount, CellValue::Number(workbook.limit_scale.amount));

    put(
        &layout.profession_name,
        CellValue::from(workbook.profession.profession.as_deref().unwrap_or(NOT_FOUND)),
    );
    put(&layout.profession_fee, CellValue::from(workbook.profession.fee));
    put(&layout.profession_amount, CellValue::Number(workbook.profession.amount));

    put(&layout.combined_total, CellValue::Number(workbook.combined_total));
    for (cell, loading) in layout.loadings.iter().zip(workbook.loadings.iter()) {
        put(cell, CellValue::Number(*loading));
    }
    put(&layout.loaded_total, CellValue::Number(workbook.loaded_total));
    put(&layout.final_tier, CellValue::Number(workbook.final_tier));
    put(&layout.fixed_fee, CellValue::Number(workbook.fixed_fee));
    put(&layout.grand_total, CellValue::Number(workbook.grand_total));

    if let Some(cell) = &layout.excess {
        let value = match record.excess_amount {
            Some(amount) => whole(amount),
            None => CellValue::from(NOT_FOUND),
        };
        put(cell, value);
    }

    cells
}

/// Write a quotation into a sink
///
/// Returns the number of cells written. The sink is not persisted.
pub fn write_quote<S: CellSink>(
    sink: &mut S,
    record: &ExtractedRecord,
    workbook: &PremiumWorkbook,
    layout: &CellLayout,
) -> Result<usize, S::Error> {
    let cells = project(record, workbook, layout);
    let count = cells.len();
    for (cell, value) in cells {
        sink.write_cell(&cell, value)?;
    }
    debug!("Wrote {} cells", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebot_domain::compute;
    use rust_decimal_macros::dec;

    fn quote() -> (ExtractedRecord, PremiumWorkbook) {
        let record = ExtractedRecord {
            insured_name: Some("OTIENO AND PARTNERS LLP".to_string()),
            partner_count: 2,
            qualified_assistants: Some(1),
            indemnity_amount: Some(1_000_000),
            excess_amount: Some(25_000),
            profession: Some("Doctors".to_string()),
        };
        let workbook = compute(&record).unwrap();
        (record, workbook)
    }

    fn lookup<'a>(cells: &'a [(String, CellValue)], cell: &str) -> &'a CellValue {
        &cells.iter().find(|(c, _)| c == cell).unwrap().1
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert!(CellLayout::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_reference_rejected() {
        let mut layout = CellLayout::default();
        layout.grand_total = "E-32".to_string();
        assert!(matches!(layout.validate(), Err(SheetError::InvalidCell(c)) if c == "E-32"));
    }

    #[test]
    fn test_cell_reference_shapes() {
        assert!(is_cell_reference("B8"));
        assert!(is_cell_reference("AA100"));
        assert!(!is_cell_reference("b8"));
        assert!(!is_cell_reference("B"));
        assert!(!is_cell_reference("8"));
        assert!(!is_cell_reference("B08"));
        assert!(!is_cell_reference(""));
    }

    #[test]
    fn test_projection_matches_template() {
        let (record, workbook) = quote();
        let cells = project(&record, &workbook, &CellLayout::default());

        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0].0, "B8");
        assert_eq!(
            lookup(&cells, "B8"),
            &CellValue::Text("INSURED: OTIENO AND PARTNERS LLP".to_string())
        );
        assert_eq!(lookup(&cells, "C12"), &CellValue::Integer(2));
        assert_eq!(lookup(&cells, "C13"), &CellValue::Integer(1));
        assert_eq!(lookup(&cells, "C14"), &CellValue::Integer(0));
        assert_eq!(lookup(&cells, "D12"), &CellValue::Number(dec!(3000)));
        assert_eq!(lookup(&cells, "E12"), &CellValue::Number(dec!(6000)));
        assert_eq!(lookup(&cells, "C17"), &CellValue::Integer(1_000_000));
        assert_eq!(lookup(&cells, "D17"), &CellValue::Number(dec!(0.0105)));
        assert_eq!(lookup(&cells, "E18"), &CellValue::Number(dec!(19000)));
        assert_eq!(lookup(&cells, "C22"), &CellValue::Text("Doctors".to_string()));
        assert_eq!(lookup(&cells, "D22"), &CellValue::Integer(175));
        assert_eq!(lookup(&cells, "E28"), &CellValue::Number(dec!(336300)));
        assert_eq!(lookup(&cells, "E32"), &CellValue::Number(dec!(4391613.55)));
    }

    #[test]
    fn test_missing_fields_render_not_found() {
        let record = ExtractedRecord {
            indemnity_amount: Some(3_000_000),
            ..ExtractedRecord::default()
        };
        let workbook = compute(&record).unwrap();
        let cells = project(&record, &workbook, &CellLayout::default());

        assert_eq!(lookup(&cells, "B8"), &CellValue::Text("INSURED: Not found".to_string()));
        assert_eq!(lookup(&cells, "C22"), &CellValue::Text("Not found".to_string()));
        assert_eq!(lookup(&cells, "C13"), &CellValue::Integer(0));
    }

    #[test]
    fn test_excess_written_only_when_configured() {
        let (record, workbook) = quote();
        let mut layout = CellLayout::default();
        assert!(project(&record, &workbook, &layout)
            .iter()
            .all(|(_, v)| v != &CellValue::Integer(25_000)));

        layout.excess = Some("C34".to_string());
        let cells = project(&record, &workbook, &layout);
        assert_eq!(lookup(&cells, "C34"), &CellValue::Integer(25_000));
    }
}
