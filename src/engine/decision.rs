//! Decision rules applied to a finished three-year projection.

use super::types::{Breakeven, Confidence, Decision};

/// Latest breakeven year that still qualifies for GO.
pub const GO_MAX_BREAKEVEN_YEAR: u8 = 2;
/// ROI (percent) that must be exceeded for GO.
pub const GO_MIN_ROI_PCT: f64 = 30.0;
/// ROI (percent) below which a never-breaking-even scenario is NO GO.
pub const NO_GO_MAX_ROI_PCT: f64 = 15.0;
/// Year-3 penetration (percentage points) below which the projection is
/// flagged as highly sensitive.
pub const HIGH_SENSITIVITY_PENETRATION_PCT: f64 = 0.5;

/// First year whose cumulative profit is strictly positive.
pub fn breakeven_year(cumulative: [f64; 3]) -> Breakeven {
    if cumulative[0] > 0.0 {
        Breakeven::Year1
    } else if cumulative[1] > 0.0 {
        Breakeven::Year2
    } else if cumulative[2] > 0.0 {
        Breakeven::Year3
    } else {
        Breakeven::Beyond
    }
}

/// Three-year cumulative profit as a percentage of entry investment.
/// Zero when nothing was invested.
pub fn roi_pct(three_year_cumulative_profit: f64, entry_investment: f64) -> f64 {
    if entry_investment == 0.0 {
        return 0.0;
    }
    (three_year_cumulative_profit / entry_investment) * 100.0
}

/// Ordered rule set: GO, then NO GO, else REVIEW.
pub fn decide(breakeven: Breakeven, roi_pct: f64) -> Decision {
    let early_breakeven = breakeven
        .year()
        .is_some_and(|year| year <= GO_MAX_BREAKEVEN_YEAR);

    if early_breakeven && roi_pct > GO_MIN_ROI_PCT {
        Decision::Go
    } else if breakeven == Breakeven::Beyond && roi_pct < NO_GO_MAX_ROI_PCT {
        Decision::NoGo
    } else {
        Decision::Review
    }
}

pub fn confidence(penetration_y3: f64) -> Confidence {
    if penetration_y3 < HIGH_SENSITIVITY_PENETRATION_PCT {
        Confidence::HighSensitivity
    } else {
        Confidence::LowSensitivity
    }
}
