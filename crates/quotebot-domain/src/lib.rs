//! quotebot Domain Layer
//!
//! Core data model and business rules for professional-indemnity quotations.
//! Nothing in this crate performs I/O; OCR, spreadsheets and the filesystem
//! are reached through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **ExtractedRecord**: the fields pulled out of a proposal document, each
//!   independently optional
//! - **Rate tables**: step functions keyed on the indemnity limit, and a flat
//!   fee keyed on the profession
//! - **PremiumWorkbook**: the ordered chain of line items ending in the grand
//!   total
//!
//! ## Example
//!
//! ```
//! use quotebot_domain::{compute, ExtractedRecord};
//! use rust_decimal_macros::dec;
//!
//! let record = ExtractedRecord {
//!     partner_count: 2,
//!     qualified_assistants: Some(1),
//!     indemnity_amount: Some(1_000_000),
//!     profession: Some("Doctors".to_string()),
//!     ..ExtractedRecord::default()
//! };
//!
//! let workbook = compute(&record).unwrap();
//! assert_eq!(workbook.grand_total, dec!(4391613.55));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cell;
pub mod document;
pub mod error;
pub mod premium;
pub mod rates;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use cell::CellValue;
pub use document::DocumentRef;
pub use error::MissingRequiredFieldError;
pub use premium::{
    compute, LineKey, PremiumWorkbook, ProfessionLine, RatedLine, StaffCategory, StaffLine,
    FINAL_TIER_RATE, FIXED_FEE, LOADING_COUNT, LOADING_RATE,
};
pub use rates::{
    base_indemnity_rate, base_indemnity_table, limit_scale_factor, limit_scale_table,
    profession_fee, profession_fees, ProfessionFees, RateTier, StepRateTable,
};
pub use record::{display_field, ExtractedRecord, NOT_FOUND};
