//! quotebot Extractor
//!
//! Pulls the quotation fields out of OCR text from a professional-indemnity
//! proposal form.
//!
//! # Overview
//!
//! The form has a fixed layout, so extraction is a battery of regular
//! expressions anchored on the form's label text rather than general
//! language processing. Each field is searched independently; a field that
//! is not found is `None` and never stops the others.
//!
//! # Architecture
//!
//! ```text
//! OCR text → FieldExtractor → ExtractedRecord → Premium calculator
//! ```
//!
//! # Example Usage
//!
//! ```
//! use quotebot_extractor::extract;
//!
//! let record = extract("Limit of Indemnity: KSH 1,500,000\nExcess: KSHS. 50,000\n");
//! assert_eq!(record.indemnity_amount, Some(1_500_000));
//! assert_eq!(record.excess_amount, Some(50_000));
//! assert_eq!(record.insured_name, None);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod patterns;


pub use config::{ExtractorConfig, PatternConfig};
pub use error::ExtractorError;
pub use extractor::{extract, FieldExtractor};
