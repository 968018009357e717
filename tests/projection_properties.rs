//! Property tests for the projection engine.

use market_entry::engine::{compute, Breakeven, Decision, EntryCosts, Inputs};
use proptest::prelude::*;

fn inputs_from(
    customers: u32,
    pen: (u32, u32, u32),
    asp: u32,
    sm_pct: u32,
    ops_pct: u32,
    fixed: u32,
    entry: [u32; 6],
) -> Inputs {
    Inputs {
        total_addressable_customers: customers as f64,
        // tenths of a percentage point
        penetration_y1: pen.0 as f64 / 10.0,
        penetration_y2: pen.1 as f64 / 10.0,
        penetration_y3: pen.2 as f64 / 10.0,
        average_selling_price: asp as f64,
        sales_and_marketing_pct: sm_pct as f64,
        ops_support_pct: ops_pct as f64,
        fixed_headcount_cost: fixed as f64,
        entry_costs: EntryCosts {
            legal_setup: entry[0] as f64,
            compliance: entry[1] as f64,
            localization: entry[2] as f64,
            launch_campaign: entry[3] as f64,
            tools_integrations: entry[4] as f64,
            other: entry[5] as f64,
        },
        ..Inputs::default()
    }
}

fn arb_inputs() -> impl Strategy<Value = Inputs> {
    (
        0u32..50_000,
        (0u32..1000, 0u32..1000, 0u32..1000),
        0u32..200_000,
        0u32..=60,
        0u32..=40,
        0u32..2_000_000,
        prop::array::uniform6(0u32..200_000),
    )
        .prop_map(|(customers, pen, asp, sm, ops, fixed, entry)| {
            inputs_from(customers, pen, asp, sm, ops, fixed, entry)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_entry_investment_is_order_independent_sum(entry in prop::array::uniform6(0u32..1_000_000)) {
        let inputs = inputs_from(100, (10, 20, 30), 1000, 10, 10, 0, entry);
        let r = compute(&inputs);
        let forward: f64 = entry.iter().map(|&c| c as f64).sum();
        let backward: f64 = entry.iter().rev().map(|&c| c as f64).sum();
        prop_assert_eq!(r.entry_investment, forward);
        prop_assert_eq!(r.entry_investment, backward);
    }

    #[test]
    fn prop_zero_investment_means_zero_roi(
        customers in 0u32..50_000,
        asp in 0u32..200_000,
        fixed in 0u32..2_000_000,
    ) {
        let inputs = inputs_from(customers, (5, 50, 500), asp, 20, 20, fixed, [0; 6]);
        let r = compute(&inputs);
        prop_assert_eq!(r.entry_investment, 0.0);
        prop_assert_eq!(r.roi_pct, 0.0);
    }

    #[test]
    fn prop_cumulative_year3_is_three_year_total(inputs in arb_inputs()) {
        let r = compute(&inputs);
        prop_assert_eq!(r.year3.cumulative_profit, r.three_year_cumulative_profit);
    }

    #[test]
    fn prop_higher_price_never_hurts(inputs in arb_inputs(), bump in 1u32..100_000) {
        let low = compute(&inputs);
        let mut raised = inputs.clone();
        raised.average_selling_price += bump as f64;
        let high = compute(&raised);

        // Float rounding may wobble a few ulps when costs eat all revenue.
        let scale: f64 = high
            .years()
            .iter()
            .map(|y| y.revenue.abs() + y.costs.abs())
            .sum::<f64>()
            + high.entry_investment;
        let tol = 1e-9 * (1.0 + scale);
        for (a, b) in low.years().iter().zip(high.years().iter()) {
            prop_assert!(b.revenue >= a.revenue - tol);
            prop_assert!(b.margin >= a.margin - tol);
            prop_assert!(b.cumulative_profit >= a.cumulative_profit - tol);
        }
    }

    #[test]
    fn prop_breakeven_is_first_positive_year(inputs in arb_inputs()) {
        let r = compute(&inputs);
        let cumulative = [
            r.year1.cumulative_profit,
            r.year2.cumulative_profit,
            r.year3.cumulative_profit,
        ];
        let expected = match cumulative.iter().position(|&c| c > 0.0) {
            Some(0) => Breakeven::Year1,
            Some(1) => Breakeven::Year2,
            Some(_) => Breakeven::Year3,
            None => Breakeven::Beyond,
        };
        prop_assert_eq!(r.breakeven, expected);
    }

    #[test]
    fn prop_review_is_the_only_fallback(inputs in arb_inputs()) {
        let r = compute(&inputs);
        let go = matches!(r.breakeven, Breakeven::Year1 | Breakeven::Year2) && r.roi_pct > 30.0;
        let no_go = r.breakeven == Breakeven::Beyond && r.roi_pct < 15.0;
        let expected = if go {
            Decision::Go
        } else if no_go {
            Decision::NoGo
        } else {
            Decision::Review
        };
        prop_assert_eq!(r.decision, expected);
    }

    #[test]
    fn prop_compute_is_idempotent(inputs in arb_inputs()) {
        let first = compute(&inputs);
        let second = compute(&inputs);
        prop_assert_eq!(first.clone(), second.clone());
        for (a, b) in first.years().iter().zip(second.years().iter()) {
            prop_assert_eq!(a.cumulative_profit.to_bits(), b.cumulative_profit.to_bits());
            prop_assert_eq!(a.margin.to_bits(), b.margin.to_bits());
        }
        prop_assert_eq!(first.roi_pct.to_bits(), second.roi_pct.to_bits());
    }

    #[test]
    fn prop_descriptive_fields_do_not_move_numbers(inputs in arb_inputs(), months in 0u32..36) {
        let mut relabeled = inputs.clone();
        relabeled.country = "Elsewhere".to_string();
        relabeled.sales_cycle_months = months as f64;
        relabeled.segment = market_entry::engine::Segment::Smb;
        prop_assert_eq!(compute(&inputs), compute(&relabeled));
    }
}
