//! Premium calculator
//!
//! A fixed chain of line items. Each item depends only on items computed
//! before it, and the whole workbook is built in one pass from an
//! [`ExtractedRecord`] and the constant rate tables.

use crate::error::MissingRequiredFieldError;
use crate::rates::{base_indemnity_rate, limit_scale_factor, profession_fees};
use crate::record::ExtractedRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Markup applied to the combined total, once per loading line
pub const LOADING_RATE: Decimal = dec!(0.10);

/// Number of loading lines
pub const LOADING_COUNT: usize = 3;

/// Rate applied to the loaded total for the final-tier line
pub const FINAL_TIER_RATE: Decimal = dec!(0.0045);

/// Flat fee added to every quotation
pub const FIXED_FEE: Decimal = dec!(40);

/// Staff categories priced per head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffCategory {
    /// Partners / directors
    Partners,
    /// Qualified assistants
    QualifiedAssistants,
    /// Unqualified assistants
    UnqualifiedAssistants,
    /// All other staff
    Others,
}

impl StaffCategory {
    /// All categories in workbook order
    pub const ALL: [StaffCategory; 4] = [
        StaffCategory::Partners,
        StaffCategory::QualifiedAssistants,
        StaffCategory::UnqualifiedAssistants,
        StaffCategory::Others,
    ];

    /// Per-head rate
    pub fn rate(&self) -> Decimal {
        match self {
            StaffCategory::Partners => dec!(3000),
            StaffCategory::QualifiedAssistants => dec!(2500),
            StaffCategory::UnqualifiedAssistants => dec!(2000),
            StaffCategory::Others => dec!(1000),
        }
    }

    /// Headcount taken from the record
    ///
    /// The proposal form only yields partners and qualified assistants; the
    /// other categories are always zero.
    pub fn headcount(&self, record: &ExtractedRecord) -> u32 {
        match self {
            StaffCategory::Partners => record.partner_count,
            StaffCategory::QualifiedAssistants => record.qualified_assistant_headcount(),
            StaffCategory::UnqualifiedAssistants | StaffCategory::Others => 0,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StaffCategory::Partners => "Partners",
            StaffCategory::QualifiedAssistants => "Qualified assistants",
            StaffCategory::UnqualifiedAssistants => "Unqualified assistants",
            StaffCategory::Others => "Others",
        }
    }
}

/// Headcount line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffLine {
    /// Category priced on this line
    pub category: StaffCategory,
    /// Number of staff in the category
    pub headcount: u32,
    /// Per-head rate
    pub rate: Decimal,
    /// headcount × rate
    pub amount: Decimal,
}

/// Line priced as basis × rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatedLine {
    /// Indemnity limit used to pick the rate
    pub basis: u64,
    /// Rate looked up from the tier table
    pub rate: Decimal,
    /// Resulting amount
    pub amount: Decimal,
}

/// Profession line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionLine {
    /// Profession as extracted
    pub profession: Option<String>,
    /// Flat fee multiplier for the profession
    pub fee: u32,
    /// limit line × fee
    pub amount: Decimal,
}

/// Named line items in computation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKey {
    /// Partners headcount line
    Partners,
    /// Qualified assistants headcount line
    QualifiedAssistants,
    /// Unqualified assistants headcount line
    UnqualifiedAssistants,
    /// Other staff headcount line
    Others,
    /// Indemnity limit × base rate
    Indemnity,
    /// Staff subtotal + indemnity line
    RunningTotal,
    /// Running total × limit scale factor
    LimitScale,
    /// Limit line × profession fee
    Profession,
    /// Running total + limit line + profession line
    CombinedTotal,
    /// First loading
    Loading1,
    /// Second loading
    Loading2,
    /// Third loading
    Loading3,
    /// Combined total + loadings
    LoadedTotal,
    /// Loaded total × final-tier rate
    FinalTier,
    /// Flat fee
    FixedFee,
    /// Loaded total + final-tier line + fixed fee
    GrandTotal,
}

impl LineKey {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            LineKey::Partners => "Partners",
            LineKey::QualifiedAssistants => "Qualified assistants",
            LineKey::UnqualifiedAssistants => "Unqualified assistants",
            LineKey::Others => "Others",
            LineKey::Indemnity => "Indemnity",
            LineKey::RunningTotal => "Running total",
            LineKey::LimitScale => "Limit of indemnity",
            LineKey::Profession => "Profession",
            LineKey::CombinedTotal => "Combined total",
            LineKey::Loading1 => "Loading 1",
            LineKey::Loading2 => "Loading 2",
            LineKey::Loading3 => "Loading 3",
            LineKey::LoadedTotal => "Loaded total",
            LineKey::FinalTier => "Final tier",
            LineKey::FixedFee => "Fixed fee",
            LineKey::GrandTotal => "Grand total",
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived monetary line items for one quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumWorkbook {
    /// One line per staff category, in [`StaffCategory::ALL`] order
    pub staff: [StaffLine; 4],
    /// Sum of the staff lines
    pub staff_subtotal: Decimal,
    /// Indemnity limit × base rate
    pub indemnity: RatedLine,
    /// Staff subtotal + indemnity line
    pub running_total: Decimal,
    /// Running total × scale factor keyed on the indemnity limit
    pub limit_scale: RatedLine,
    /// Limit line × profession fee
    pub profession: ProfessionLine,
    /// Running total + limit line + profession line
    pub combined_total: Decimal,
    /// Loading lines, each combined total × [`LOADING_RATE`]
    pub loadings: [Decimal; LOADING_COUNT],
    /// Combined total + loadings
    pub loaded_total: Decimal,
    /// Loaded total × [`FINAL_TIER_RATE`]
    pub final_tier: Decimal,
    /// [`FIXED_FEE`]
    pub fixed_fee: Decimal,
    /// Loaded total + final-tier line + fixed fee
    pub grand_total: Decimal,
}

impl PremiumWorkbook {
    /// Line items in computation order
    pub fn line_items(&self) -> Vec<(LineKey, Decimal)> {
        vec![
            (LineKey::Partners, self.staff[0].amount),
            (LineKey::QualifiedAssistants, self.staff[1].amount),
            (LineKey::UnqualifiedAssistants, self.staff[2].amount),
            (LineKey::Others, self.staff[3].amount),
            (LineKey::Indemnity, self.indemnity.amount),
            (LineKey::RunningTotal, self.running_total),
            (LineKey::LimitScale, self.limit_scale.amount),
            (LineKey::Profession, self.profession.amount),
            (LineKey::CombinedTotal, self.combined_total),
            (LineKey::Loading1, self.loadings[0]),
            (LineKey::Loading2, self.loadings[1]),
            (LineKey::Loading3, self.loadings[2]),
            (LineKey::LoadedTotal, self.loaded_total),
            (LineKey::FinalTier, self.final_tier),
            (LineKey::FixedFee, self.fixed_fee),
            (LineKey::GrandTotal, self.grand_total),
        ]
    }

    /// Value of a single line item
    pub fn get(&self, key: LineKey) -> Decimal {
        self.line_items()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }
}

fn staff_line(category: StaffCategory, record: &ExtractedRecord) -> StaffLine {
    let headcount = category.headcount(record);
    let rate = category.rate();
    StaffLine {
        category,
        headcount,
        rate,
        amount: Decimal::from(headcount) * rate,
    }
}

/// Compute the premium workbook for a record
///
/// # Errors
///
/// Returns [`MissingRequiredFieldError`] naming `indemnity_amount` when the
/// record has no indemnity limit; every later line depends on it.
///
/// # Examples
///
/// ```
/// use quotebot_domain::{compute, ExtractedRecord};
///
/// let err = compute(&ExtractedRecord::default()).unwrap_err();
/// assert_eq!(err.field, "indemnity_amount");
/// ```
pub fn compute(record: &ExtractedRecord) -> Result<PremiumWorkbook, MissingRequiredFieldError> {
    let indemnity_amount = record
        .indemnity_amount
        .ok_or(MissingRequiredFieldError::new("indemnity_amount"))?;

    let staff = StaffCategory::ALL.map(|category| staff_line(category, record));
    let staff_subtotal: Decimal = staff.iter().map(|line| line.amount).sum();

    let base_rate = base_indemnity_rate(indemnity_amount);
    let indemnity = RatedLine {
        basis: indemnity_amount,
        rate: base_rate,
        amount: Decimal::from(indemnity_amount) * base_rate,
    };

    let running_total = staff_subtotal + indemnity.amount;

    // Tier picked by the indemnity limit, applied to the running total.
    let scale = limit_scale_factor(indemnity_amount);
    let limit_scale = RatedLine {
        basis: indemnity_amount,
        rate: scale,
        amount: running_total * scale,
    };

    let fee = profession_fees().fee_for(record.profession.as_deref());
    let profession = ProfessionLine {
        profession: record.profession.clone(),
        fee,
        amount: limit_scale.amount * Decimal::from(fee),
    };

    let combined_total = running_total + limit_scale.amount + profession.amount;

    let loadings = [combined_total * LOADING_RATE; LOADING_COUNT];
    let loaded_total = combined_total + loadings.iter().copied().sum::<Decimal>();

    let final_tier = loaded_total * FINAL_TIER_RATE;
    let grand_total = loaded_total + final_tier + FIXED_FEE;

    Ok(PremiumWorkbook {
        staff,
        staff_subtotal,
        indemnity,
        running_total,
        limit_scale,
        profession,
        combined_total,
        loadings,
        loaded_total,
        final_tier,
        fixed_fee: FIXED_FEE,
        grand_total,
    })
}
