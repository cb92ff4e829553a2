//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::RunSummary;
use colored::*;
use quotebot_domain::rates::{base_indemnity_table, limit_scale_table, profession_fees, StepRateTable};
use quotebot_domain::{display_field, ExtractedRecord, PremiumWorkbook};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{object::Columns, object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted fields.
    pub fn format_record(&self, record: &ExtractedRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record.missing_fields().join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Insured", &record.insured_name_or_not_found()]);
                builder.push_record(["Partners", &record.partner_count.to_string()]);
                builder.push_record([
                    "Qualified assistants",
                    &display_field(&record.qualified_assistants),
                ]);
                builder.push_record(["Indemnity", &display_field(&record.indemnity_amount)]);
                builder.push_record(["Excess", &display_field(&record.excess_amount)]);
                builder.push_record(["Profession", &record.profession_or_not_found()]);
                Ok(self.render(builder.build()))
            }
        }
    }

    /// Format a premium workbook.
    pub fn format_workbook(&self, workbook: &PremiumWorkbook) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(workbook)?),
            OutputFormat::Quiet => Ok(money(workbook.grand_total)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Line", "Basis", "Rate", "Amount"]);

                for line in &workbook.staff {
                    builder.push_record([
                        line.category.label().to_string(),
                        line.headcount.to_string(),
                        money(line.rate),
                        money(line.amount),
                    ]);
                }
                builder.push_record([
                    "Indemnity".to_string(),
                    workbook.indemnity.basis.to_string(),
                    workbook.indemnity.rate.normalize().to_string(),
                    money(workbook.indemnity.amount),
                ]);
                builder.push_record(total_row("Running total", workbook.running_total));
                builder.push_record([
                    "Limit of indemnity".to_string(),
                    workbook.limit_scale.basis.to_string(),
                    workbook.limit_scale.rate.normalize().to_string(),
                    money(workbook.limit_scale.amount),
                ]);
                builder.push_record([
                    "Profession".to_string(),
                    display_field(&workbook.profession.profession),
                    workbook.profession.fee.to_string(),
                    money(workbook.profession.amount),
                ]);
                builder.push_record(total_row("Combined total", workbook.combined_total));
                for (i, loading) in workbook.loadings.iter().enumerate() {
                    builder.push_record(total_row(&format!("Loading {}", i + 1), *loading));
                }
                builder.push_record(total_row("Loaded total", workbook.loaded_total));
                builder.push_record(total_row("Final tier", workbook.final_tier));
                builder.push_record(total_row("Fixed fee", workbook.fixed_fee));
                builder.push_record(total_row("Grand total", workbook.grand_total));

                let mut table = builder.build();
                table.with(Modify::new(Columns::new(1..)).with(Alignment::right()));
                Ok(self.render(table))
            }
        }
    }

    /// Format the outcome of a run.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary
                .quoted
                .iter()
                .map(|q| q.output.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summary.quoted.is_empty() && summary.skipped.is_empty() {
                    return Ok(self.colorize("No documents found.", "yellow"));
                }

                let mut out = Vec::new();
                if !summary.quoted.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Document", "Insured", "Grand total", "Output"]);
                    for quoted in &summary.quoted {
                        builder.push_record([
                            quoted.id.clone(),
                            quoted.record.insured_name_or_not_found().to_string(),
                            money(quoted.grand_total),
                            quoted.output.display().to_string(),
                        ]);
                    }
                    out.push(self.render(builder.build()));
                }
                for skipped in &summary.skipped {
                    out.push(self.warning(&format!("Skipped {}: {}", skipped.id, skipped.reason)));
                }
                out.push(self.success(&format!(
                    "{} quotation(s) written",
                    summary.quoted.len()
                )));
                Ok(out.join("\n"))
            }
        }
    }

    /// Format the three rate tables.
    pub fn format_rates(&self) -> Result<String> {
        let fees = profession_fees();

        match self.format {
            OutputFormat::Json => {
                let fee_entries: Vec<serde_json::Value> = fees
                    .entries()
                    .into_iter()
                    .map(|(profession, fee)| serde_json::json!({ "profession": profession, "fee": fee }))
                    .collect();
                let value = serde_json::json!({
                    "base_indemnity": tiers_json(base_indemnity_table()),
                    "limit_scale": tiers_json(limit_scale_table()),
                    "profession_fees": fee_entries,
                    "default_fee": fees.default_fee(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet | OutputFormat::Table => {
                let mut out = vec![
                    self.colorize("Base indemnity rate", "cyan"),
                    self.render(tiers_table(base_indemnity_table())),
                    self.colorize("Limit of indemnity scale", "cyan"),
                    self.render(tiers_table(limit_scale_table())),
                    self.colorize("Profession fee", "cyan"),
                ];

                let mut builder = Builder::default();
                builder.push_record(["Profession", "Fee"]);
                for (profession, fee) in fees.entries() {
                    builder.push_record([profession.to_string(), fee.to_string()]);
                }
                builder.push_record(["(other)".to_string(), fees.default_fee().to_string()]);
                out.push(self.render(builder.build()));

                Ok(out.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Two-decimal rendering of an amount
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn total_row(label: &str, amount: Decimal) -> [String; 4] {
    [label.to_string(), String::new(), String::new(), money(amount)]
}

fn tiers_table(table: &StepRateTable) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Up to", "Rate"]);
    for tier in table.tiers() {
        builder.push_record([tier.upper_bound.to_string(), tier.rate.normalize().to_string()]);
    }
    builder.push_record(["above".to_string(), table.catch_all().normalize().to_string()]);
    builder.build()
}

fn tiers_json(table: &StepRateTable) -> serde_json::Value {
    let tiers: Vec<serde_json::Value> = table
        .tiers()
        .iter()
        .map(|tier| serde_json::json!({ "up_to": tier.upper_bound, "rate": tier.rate }))
        .collect();
    serde_json::json!({ "tiers": tiers, "above": table.catch_all() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{QuotedDocument, SkippedDocument};
    use quotebot_domain::compute;
    use std::path::PathBuf;
    use rust_decimal_macros::dec;

    fn record() -> ExtractedRecord {
        ExtractedRecord {
            insured_name: Some("MWANGI AND PARTNERS LLP".to_string()),
            partner_count: 2,
            qualified_assistants: Some(1),
            indemnity_amount: Some(1_000_000),
            excess_amount: None,
            profession: Some("Doctors".to_string()),
        }
    }

    #[test]
    fn test_record_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&record()).unwrap();
        assert!(output.contains("MWANGI AND PARTNERS LLP"));
        assert!(output.contains("Excess"));
        assert!(output.contains("Not found"));
    }

    #[test]
    fn test_record_quiet_lists_missing() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_record(&record()).unwrap();
        assert_eq!(output, "excess_amount");
    }

    #[test]
    fn test_workbook_quiet_is_grand_total() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let workbook = compute(&record()).unwrap();
        assert_eq!(formatter.format_workbook(&workbook).unwrap(), "4391613.55");
    }

    #[test]
    fn test_workbook_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let workbook = compute(&record()).unwrap();
        let output = formatter.format_workbook(&workbook).unwrap();
        assert!(output.contains("Grand total"));
        assert!(output.contains("3325000.00"));
    }

    #[test]
    fn test_workbook_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let workbook = compute(&record()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_workbook(&workbook).unwrap()).unwrap();
        assert!(value.get("grand_total").is_some());
    }

    #[test]
    fn test_rates_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rates().unwrap();
        assert!(output.contains("Architects"));
        assert!(output.contains("0.0105"));
        assert!(output.contains("4.5"));
    }

    #[test]
    fn test_empty_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&RunSummary::default()).unwrap();
        assert!(output.contains("No documents found"));
    }

    #[test]
    fn test_summary_table_lists_quotations() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let record = record();
        let workbook = compute(&record).unwrap();
        let summary = RunSummary {
            quoted: vec![QuotedDocument {
                id: "a.pdf".to_string(),
                output: PathBuf::from("output/a.xlsx"),
                record,
                grand_total: workbook.grand_total,
            }],
            skipped: vec![SkippedDocument {
                id: "b.pdf".to_string(),
                reason: "no text extracted".to_string(),
            }],
        };

        let output = formatter.format_summary(&summary).unwrap();
        assert!(output.contains("MWANGI AND PARTNERS LLP"));
        assert!(output.contains("4391613.55"));
        assert!(output.contains("Skipped b.pdf: no text extracted"));
        assert!(output.contains("1 quotation(s) written"));
    }

    #[test]
    fn test_money() {
        assert_eq!(money(dec!(19673.55)), "19673.55");
        assert_eq!(money(dec!(6000)), "6000.00");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
