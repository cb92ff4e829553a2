//! quotebot Sheet Output
//!
//! Projects a computed quotation onto spreadsheet cells and writes them
//! through a `CellSink`.
//!
//! # Sinks
//!
//! - `XlsxTemplateSink`: fills a copy of an `.xlsx` template
//! - `JsonSink`: flat JSON object keyed by cell reference
//!
//! # Examples
//!
//! ```
//! use quotebot_domain::{compute, ExtractedRecord};
//! use quotebot_sheet::{write_quote, CellLayout, JsonSink};
//!
//! let record = ExtractedRecord {
//!     indemnity_amount: Some(1_000_000),
//!     partner_count: 1,
//!     ..ExtractedRecord::default()
//! };
//! let workbook = compute(&record).unwrap();
//!
//! let mut sink = JsonSink::new();
//! write_quote(&mut sink, &record, &workbook, &CellLayout::default()).unwrap();
//! assert_eq!(sink.get("B8").unwrap().to_string(), "INSURED: Not found");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod json;
pub mod layout;
pub mod xlsx;

pub use error::SheetError;
pub use json::JsonSink;
pub use layout::{project, write_quote, CellLayout};
pub use xlsx::XlsxTemplateSink;
