//! Three-year revenue/cost projection for a market entry scenario.

use super::decision::{breakeven_year, confidence, decide, roi_pct};
use super::types::{Inputs, Results, YearResult};

/// Project one year before cumulative profit is known.
///
/// Fixed headcount is charged in full every year regardless of scale.
pub fn project_year(inputs: &Inputs, penetration_pct: f64) -> YearResult {
    let customers = inputs.total_addressable_customers * (penetration_pct / 100.0);
    let revenue = customers * inputs.average_selling_price;
    let sales_marketing = revenue * (inputs.sales_and_marketing_pct / 100.0);
    let ops = revenue * (inputs.ops_support_pct / 100.0);
    let costs = sales_marketing + ops + inputs.fixed_headcount_cost;

    YearResult {
        customers,
        revenue,
        costs,
        margin: revenue - costs,
        cumulative_profit: 0.0,
    }
}

/// Compute the full projection and recommendation.
///
/// Total for any input: out-of-range values propagate arithmetically and
/// the only guard is the zero-investment ROI case.
pub fn compute(inputs: &Inputs) -> Results {
    let entry_investment = inputs.entry_costs.total();

    let mut year1 = project_year(inputs, inputs.penetration(1));
    let mut year2 = project_year(inputs, inputs.penetration(2));
    let mut year3 = project_year(inputs, inputs.penetration(3));

    // Entry investment hits year 1 only.
    year1.cumulative_profit = year1.margin - entry_investment;
    year2.cumulative_profit = year2.margin + year1.cumulative_profit;
    year3.cumulative_profit = year3.margin + year2.cumulative_profit;

    let breakeven = breakeven_year([
        year1.cumulative_profit,
        year2.cumulative_profit,
        year3.cumulative_profit,
    ]);
    let roi = roi_pct(year3.cumulative_profit, entry_investment);

    Results {
        year1,
        year2,
        year3,
        entry_investment,
        breakeven,
        three_year_cumulative_profit: year3.cumulative_profit,
        roi_pct: roi,
        decision: decide(breakeven, roi),
        confidence: confidence(inputs.penetration_y3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Breakeven, Confidence, Decision, EntryCosts};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn zero_inputs() -> Inputs {
        Inputs {
            total_addressable_customers: 0.0,
            penetration_y1: 0.0,
            penetration_y2: 0.0,
            penetration_y3: 0.0,
            sales_cycle_months: 0.0,
            average_selling_price: 0.0,
            entry_costs: EntryCosts {
                legal_setup: 0.0,
                compliance: 0.0,
                localization: 0.0,
                launch_campaign: 0.0,
                tools_integrations: 0.0,
                other: 0.0,
            },
            sales_and_marketing_pct: 0.0,
            ops_support_pct: 0.0,
            fixed_headcount_cost: 0.0,
            ..Inputs::default()
        }
    }

    #[test]
    fn test_default_scenario_year_one() {
        // 1000 customers * 2% = 20; 20 * 50k = 1M revenue
        // costs = 300k S&M + 150k ops + 100k headcount = 550k
        let r = compute(&Inputs::default());
        assert_close(r.year1.customers, 20.0);
        assert_close(r.year1.revenue, 1_000_000.0);
        assert_close(r.year1.costs, 550_000.0);
        assert_close(r.year1.margin, 450_000.0);
        assert_close(r.entry_investment, 75_000.0);
        assert_close(r.year1.cumulative_profit, 375_000.0);
        assert_eq!(r.breakeven, Breakeven::Year1);
    }

    #[test]
    fn test_default_scenario_later_years_and_decision() {
        // Y2: 50 customers, 2.5M revenue, 1.225M costs, 1.275M margin
        // Y3: 100 customers, 5M revenue, 2.35M costs, 2.65M margin
        let r = compute(&Inputs::default());
        assert_close(r.year2.margin, 1_275_000.0);
        assert_close(r.year2.cumulative_profit, 1_650_000.0);
        assert_close(r.year3.margin, 2_650_000.0);
        assert_close(r.year3.cumulative_profit, 4_300_000.0);
        assert_eq!(r.three_year_cumulative_profit, r.year3.cumulative_profit);
        // 4.3M / 75k * 100
        assert_close(r.roi_pct, 4_300_000.0 / 75_000.0 * 100.0);
        assert_eq!(r.decision, Decision::Go);
        assert_eq!(r.confidence, Confidence::LowSensitivity);
    }

    #[test]
    fn test_all_zero_inputs() {
        let r = compute(&zero_inputs());
        for year in r.years() {
            assert_eq!(year.customers, 0.0);
            assert_eq!(year.revenue, 0.0);
            assert_eq!(year.costs, 0.0);
            assert_eq!(year.margin, 0.0);
            assert_eq!(year.cumulative_profit, 0.0);
        }
        assert_eq!(r.breakeven, Breakeven::Beyond);
        assert_eq!(r.roi_pct, 0.0);
        assert_eq!(r.decision, Decision::NoGo);
        assert_eq!(r.confidence, Confidence::HighSensitivity);
    }

    #[test]
    fn test_year_three_breakeven_with_high_roi_is_review() {
        // Only year 3 sells: 1000 * 10% = 100 customers * 30 = 3000 revenue.
        // Entry 1000 → cumulative -1000, -1000, 2000 → ROI 200 %.
        let mut inputs = zero_inputs();
        inputs.total_addressable_customers = 1000.0;
        inputs.penetration_y3 = 10.0;
        inputs.average_selling_price = 30.0;
        inputs.entry_costs.legal_setup = 1000.0;

        let r = compute(&inputs);
        assert_close(r.year1.cumulative_profit, -1000.0);
        assert_close(r.year2.cumulative_profit, -1000.0);
        assert_close(r.year3.cumulative_profit, 2000.0);
        assert_eq!(r.breakeven, Breakeven::Year3);
        assert_close(r.roi_pct, 200.0);
        assert_eq!(r.decision, Decision::Review);
    }

    #[test]
    fn test_fixed_headcount_charged_every_year() {
        let mut inputs = zero_inputs();
        inputs.fixed_headcount_cost = 40_000.0;
        let r = compute(&inputs);
        for year in r.years() {
            assert_eq!(year.costs, 40_000.0);
            assert_eq!(year.margin, -40_000.0);
        }
        assert_eq!(r.year3.cumulative_profit, -120_000.0);
    }

    #[test]
    fn test_entry_investment_only_charged_in_year_one() {
        let mut inputs = zero_inputs();
        inputs.entry_costs.launch_campaign = 5_000.0;
        let r = compute(&inputs);
        assert_eq!(r.year1.cumulative_profit, -5_000.0);
        assert_eq!(r.year2.cumulative_profit, -5_000.0);
        assert_eq!(r.year3.cumulative_profit, -5_000.0);
        // -5000 / 5000 → -100 %, never breaks even
        assert_eq!(r.roi_pct, -100.0);
        assert_eq!(r.decision, Decision::NoGo);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let mut inputs = zero_inputs();
        inputs.total_addressable_customers = -100.0;
        inputs.penetration_y1 = 10.0;
        inputs.average_selling_price = 10.0;
        let r = compute(&inputs);
        assert_close(r.year1.customers, -10.0);
        assert_close(r.year1.revenue, -100.0);
        assert_eq!(r.breakeven, Breakeven::Beyond);
    }

    #[test]
    fn test_unclamped_percentages() {
        // Costs above 100% of revenue are allowed and simply lose money.
        let mut inputs = zero_inputs();
        inputs.total_addressable_customers = 100.0;
        inputs.penetration_y1 = 150.0;
        inputs.average_selling_price = 10.0;
        inputs.sales_and_marketing_pct = 80.0;
        inputs.ops_support_pct = 40.0;
        let r = compute(&inputs);
        assert_close(r.year1.customers, 150.0);
        assert_close(r.year1.revenue, 1500.0);
        assert_close(r.year1.costs, 1800.0);
        assert_close(r.year1.margin, -300.0);
    }
}
