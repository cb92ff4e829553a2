//! Extracted record module - the fields read off a proposal form

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering used for a field that was not present in the document
pub const NOT_FOUND: &str = "Not found";

/// Structured output of field extraction
///
/// Every field is independently optional. A field the form did not yield is
/// `None`; it is rendered as [`NOT_FOUND`] when shown or written out, and
/// consumers must decide what absence means before doing arithmetic with it.
///
/// `partner_count` is the exception: the partner section is counted, and a
/// missing section simply counts zero partners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Name of the insured firm
    pub insured_name: Option<String>,

    /// Number of partners listed in the partner section
    pub partner_count: u32,

    /// Number of qualified assistants
    pub qualified_assistants: Option<u32>,

    /// Requested limit of indemnity, in whole currency units
    pub indemnity_amount: Option<u64>,

    /// Excess (deductible), in whole currency units
    pub excess_amount: Option<u64>,

    /// Profession / business activity description
    pub profession: Option<String>,
}

impl ExtractedRecord {
    /// Names of the optional fields that were not found
    ///
    /// # Examples
    ///
    /// ```
    /// use quotebot_domain::ExtractedRecord;
    ///
    /// let record = ExtractedRecord::default();
    /// assert!(record.missing_fields().contains(&"indemnity_amount"));
    /// ```
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.insured_name.is_none() {
            missing.push("insured_name");
        }
        if self.qualified_assistants.is_none() {
            missing.push("qualified_assistants");
        }
        if self.indemnity_amount.is_none() {
            missing.push("indemnity_amount");
        }
        if self.excess_amount.is_none() {
            missing.push("excess_amount");
        }
        if self.profession.is_none() {
            missing.push("profession");
        }
        missing
    }

    /// Whether every optional field was found
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Qualified assistants as a headcount; absence counts as none
    pub fn qualified_assistant_headcount(&self) -> u32 {
        self.qualified_assistants.unwrap_or(0)
    }

    /// Insured name, or [`NOT_FOUND`]
    pub fn insured_name_or_not_found(&self) -> &str {
        self.insured_name.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Profession, or [`NOT_FOUND`]
    pub fn profession_or_not_found(&self) -> &str {
        self.profession.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Display an optional field, using [`NOT_FOUND`] for absence
pub fn display_field<T: fmt::Display>(field: &Option<T>) -> String {
    match field {
        Some(value) => value.to_string(),
        None => NOT_FOUND.to_string(),
    }
}

impl fmt::Display for ExtractedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name of Insured: {}", self.insured_name_or_not_found())?;
        writeln!(f, "Number of Directors/Partners: {}", self.partner_count)?;
        writeln!(f, "Qualified Assistants: {}", display_field(&self.qualified_assistants))?;
        writeln!(f, "Indemnity: {}", display_field(&self.indemnity_amount))?;
        writeln!(f, "Excess: {}", display_field(&self.excess_amount))?;
        write!(f, "Profession: {}", self.profession_or_not_found())
    }
}
