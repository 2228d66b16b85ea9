//! Pure Indian income tax computation for the old and new statutory regimes.
//!
//! The crate has no I/O and no shared state: [`calculate`] maps
//! (gross income, regime, deductions) to a [`Computation`] and nothing
//! else. Bracket constants are fixed at design time; a future tax year
//! would version the tables rather than make them configurable.

mod error;
mod slabs;

pub use error::EngineError;

use serde::{Deserialize, Serialize};

/// Flat deduction applied before bracket computation under the old regime.
pub const STANDARD_DEDUCTION: f64 = 50_000.0;

/// Health and education cess, applied to the bracket-computed tax under
/// the old regime.
pub const CESS_RATE: f64 = 0.04;

/// Statutory regime selector. Closed set: new regimes are versioned
/// events, not an open hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    #[default]
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Old => "old",
            Regime::New => "new",
        }
    }
}

/// One line of the itemized computation.
///
/// Slab entries cover the marginal brackets; the old regime additionally
/// reports its standard deduction and cess as non-slab adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BreakdownEntry {
    Slab {
        lower_bound: f64,
        /// `None` for the open-ended top slab.
        upper_bound: Option<f64>,
        rate: f64,
        tax_for_slab: f64,
    },
    StandardDeduction {
        amount: f64,
    },
    Cess {
        rate: f64,
        amount: f64,
    },
}

/// Result of a single tax computation. Immutable snapshot; identical
/// inputs always produce an identical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    /// `max(0, gross income - deductions)`. The old regime's standard
    /// deduction is applied internally on top of this and reported as a
    /// breakdown entry, not subtracted here.
    pub taxable_income: f64,
    /// Total tax owed, rounded once to the nearest whole currency unit.
    pub tax_amount: f64,
    /// Percentage of the applicable taxable base, rounded to 2 decimals.
    pub effective_rate: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Compute tax owed on `gross_income` under `regime` after `deductions`.
///
/// Inputs must be finite and non-negative; anything else is rejected with
/// an [`EngineError`] before any arithmetic runs. Valid inputs never fail.
pub fn calculate(
    gross_income: f64,
    regime: Regime,
    deductions: f64,
) -> Result<Computation, EngineError> {
    check_amount("income", gross_income)?;
    check_amount("deductions", deductions)?;

    let taxable_income = (gross_income - deductions).max(0.0);

    Ok(match regime {
        Regime::New => compute_new(taxable_income),
        Regime::Old => compute_old(taxable_income),
    })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(EngineError::Negative { field });
    }
    Ok(())
}

fn compute_new(taxable_income: f64) -> Computation {
    let (tax, breakdown) = slabs::apply_slabs(slabs::NEW_REGIME, taxable_income);

    Computation {
        taxable_income,
        tax_amount: tax.round(),
        effective_rate: effective_rate(tax, taxable_income),
        breakdown,
    }
}

fn compute_old(taxable_income: f64) -> Computation {
    let final_taxable_income = (taxable_income - STANDARD_DEDUCTION).max(0.0);
    let (slab_tax, mut breakdown) = slabs::apply_slabs(slabs::OLD_REGIME, final_taxable_income);

    let cess = slab_tax * CESS_RATE;
    let tax = slab_tax + cess;
    breakdown.push(BreakdownEntry::Cess {
        rate: CESS_RATE,
        amount: cess,
    });
    breakdown.push(BreakdownEntry::StandardDeduction {
        amount: STANDARD_DEDUCTION,
    });

    Computation {
        taxable_income,
        tax_amount: tax.round(),
        // The rate base is the income the brackets actually saw.
        effective_rate: effective_rate(tax, final_taxable_income),
        breakdown,
    }
}

// Two-step rounding: the unrounded tax drives the rate, which is rounded
// to 2 decimals independently of the rounded tax amount. The last decimal
// can drift from rounded-tax / base; that order is authoritative.
fn effective_rate(tax: f64, base: f64) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    let rate = tax / base * 100.0;
    (rate * 100.0).round() / 100.0
}
