//! Static slab tables and the marginal-bracket reducer shared by both
//! regimes.

use crate::BreakdownEntry;

/// One marginal bracket. `cumulative` is the fixed total tax owed at the
/// slab's lower bound, so the top bracket never recomputes the brackets
/// below it.
pub(crate) struct Slab {
    /// Upper bound of the bracket; `None` for the open-ended top slab.
    pub upper: Option<f64>,
    pub rate: f64,
    pub cumulative: f64,
}

/// New regime (FY 2023-24), applied to taxable income directly.
pub(crate) const NEW_REGIME: &[Slab] = &[
    Slab { upper: Some(300_000.0), rate: 0.0, cumulative: 0.0 },
    Slab { upper: Some(600_000.0), rate: 0.05, cumulative: 0.0 },
    Slab { upper: Some(900_000.0), rate: 0.10, cumulative: 15_000.0 },
    Slab { upper: Some(1_200_000.0), rate: 0.15, cumulative: 45_000.0 },
    Slab { upper: Some(1_500_000.0), rate: 0.20, cumulative: 90_000.0 },
    Slab { upper: None, rate: 0.30, cumulative: 150_000.0 },
];

/// Old regime, applied after the standard deduction.
pub(crate) const OLD_REGIME: &[Slab] = &[
    Slab { upper: Some(250_000.0), rate: 0.0, cumulative: 0.0 },
    Slab { upper: Some(500_000.0), rate: 0.05, cumulative: 0.0 },
    Slab { upper: Some(1_000_000.0), rate: 0.20, cumulative: 12_500.0 },
    Slab { upper: None, rate: 0.30, cumulative: 112_500.0 },
];

/// Apportion `income` across the table's brackets.
///
/// Returns the unrounded total tax plus one itemized entry per touched
/// slab. A slab at an exact boundary belongs to the bracket below it, so
/// income of 300_000 under the new regime owes nothing. Slabs entirely
/// above the income are omitted, except the zero-rate first slab which is
/// always reported.
pub(crate) fn apply_slabs(table: &[Slab], income: f64) -> (f64, Vec<BreakdownEntry>) {
    let mut entries = Vec::new();
    let mut total = 0.0;
    let mut lower = 0.0;

    for slab in table {
        match slab.upper {
            // Bracket is fully used; its span times its rate.
            Some(upper) if income > upper => {
                entries.push(BreakdownEntry::Slab {
                    lower_bound: lower,
                    upper_bound: slab.upper,
                    rate: slab.rate,
                    tax_for_slab: (upper - lower) * slab.rate,
                });
                lower = upper;
            }
            // Bracket holding the income (or the exempt first slab).
            _ => {
                let portion = (income - lower) * slab.rate;
                total = slab.cumulative + portion;
                entries.push(BreakdownEntry::Slab {
                    lower_bound: lower,
                    upper_bound: slab.upper,
                    rate: slab.rate,
                    tax_for_slab: portion,
                });
                break;
            }
        }
    }

    (total, entries)
}
