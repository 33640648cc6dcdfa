/// ============================================================
///  Subscription Savings Estimator
///
///  Pipeline:
///   1. Consumption   – bill / blended tariff, rounded to kWh
///   2. Compensable   – consumption above the phase minimum (>= 0)
///   3. Fio B         – non-compensable share of the wire tariff
///   4. Residual bill – availability cost + public lighting + Fio B
///   5. Subscription  – (gross compensable - Fio B) × (1 - discount),
///                      intro tier for months 1-3, bracket tier for 4-12
///   6. Competitor    – same shape with a flat year-round discount
/// ============================================================

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::simulation::{SimulationParams, SimulationResult};

// ─── Contract window ─────────────────────────────────────────
pub const INTRO_MONTHS: f64 = 3.0;
pub const SUSTAINED_MONTHS: f64 = 9.0;
pub const CONTRACT_MONTHS: f64 = INTRO_MONTHS + SUSTAINED_MONTHS;

/// Utility tariff components (R$).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Tariff {
    /// Blended price per kWh, taxes included
    pub average_rate_kwh: f64,
    /// Flat municipal public lighting fee per bill
    pub public_lighting_fee: f64,
    /// TUSD Fio B component per kWh
    pub wire_rate_kwh: f64,
    /// Share of Fio B that credits cannot offset in the current regulatory year
    pub wire_non_compensable_fraction: f64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            average_rate_kwh: 0.95,
            public_lighting_fee: 25.0,
            wire_rate_kwh: 0.28,
            wire_non_compensable_fraction: 0.45,
        }
    }
}

/// Discount applied to the compensable energy value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DiscountSchedule {
    /// Months 1-3
    pub intro_rate: f64,
    /// Bills below this get `low_rate` from month 4
    pub low_threshold: f64,
    /// Bills above this get `high_rate` from month 4
    pub high_threshold: f64,
    pub low_rate: f64,
    pub mid_rate: f64,
    pub high_rate: f64,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self {
            intro_rate: 0.50,
            low_threshold: 1000.0,
            high_threshold: 4000.0,
            low_rate: 0.25,
            mid_rate: 0.28,
            high_rate: 0.30,
        }
    }
}

impl DiscountSchedule {
    /// Single discount for every month and bracket.
    pub fn flat(rate: f64) -> Self {
        Self {
            intro_rate: rate,
            low_rate: rate,
            mid_rate: rate,
            high_rate: rate,
            ..Self::default()
        }
    }

    /// Months 4-12 rate. Both thresholds belong to the mid bracket.
    pub fn rate_for_bill(&self, bill_value: f64) -> f64 {
        if bill_value > self.high_threshold {
            self.high_rate
        } else if bill_value >= self.low_threshold {
            self.mid_rate
        } else {
            self.low_rate
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsEstimator {
    pub tariff: Tariff,
    pub schedule: DiscountSchedule,
}

impl SavingsEstimator {
    pub fn new(tariff: Tariff, schedule: DiscountSchedule) -> Self {
        Self { tariff, schedule }
    }

    pub fn estimate(&self, params: &SimulationParams) -> SimulationResult {
        let t = &self.tariff;
        let bill = params.bill_value;

        // ── 1. Consumption & regulatory floor ───────────────────
        let estimated_kwh = (bill / t.average_rate_kwh).round() as i64;
        let min_kwh = params.phase.min_consumption_kwh();
        // the cast saturates for huge or infinite bills
        let compensable_kwh = estimated_kwh.saturating_sub(i64::from(min_kwh)).max(0) as u64;
        let compensable = compensable_kwh as f64;

        // ── 2. Values ───────────────────────────────────────────
        let gross_compensable = compensable * t.average_rate_kwh;
        let fio_b_tax = compensable * t.wire_rate_kwh * t.wire_non_compensable_fraction;
        let availability_cost = f64::from(min_kwh) * t.average_rate_kwh;
        let residual_bill = availability_cost + t.public_lighting_fee + fio_b_tax;
        let discountable = gross_compensable - fio_b_tax;

        // ── 3. Tiers ────────────────────────────────────────────
        let discount_1to3 = self.schedule.intro_rate;
        let discount_4to12 = self.schedule.rate_for_bill(bill);

        let subscription_1to3 = discountable * (1.0 - discount_1to3);
        let total_1to3 = subscription_1to3 + residual_bill;
        let savings_1to3 = (bill - total_1to3).max(0.0);

        let subscription_4to12 = discountable * (1.0 - discount_4to12);
        let total_4to12 = subscription_4to12 + residual_bill;
        let savings_4to12 = (bill - total_4to12).max(0.0);

        let annual_savings = savings_1to3 * INTRO_MONTHS + savings_4to12 * SUSTAINED_MONTHS;

        let mut result = SimulationResult {
            estimated_consumption_kwh: estimated_kwh,
            min_consumption_kwh: min_kwh,
            compensable_energy_kwh: compensable_kwh,
            original_bill_value: bill,
            new_total_value: total_1to3,
            subscription_cost: subscription_1to3,
            monthly_savings: savings_1to3,
            annual_savings,
            residual_bill,
            fio_b_tax,
            savings_month1to3: savings_1to3,
            savings_month4to12: savings_4to12,
            discount_applied_month1to3: discount_1to3,
            discount_applied_month4to12: discount_4to12,
            monthly_cost_month1to3: total_1to3,
            monthly_cost_month4to12: total_4to12,
            has_competitor: params.has_competitor,
            competitor_total_value: 0.0,
            competitor_savings: 0.0,
            extra_savings: 0.0,
        };

        // ── 4. Competitor (flat all year) ───────────────────────
        if let Some(rate) = params.competitor_rate() {
            let competitor_total = discountable * (1.0 - rate) + residual_bill;
            let own_annual_cost = total_1to3 * INTRO_MONTHS + total_4to12 * SUSTAINED_MONTHS;
            let competitor_annual_cost = competitor_total * CONTRACT_MONTHS;

            result.competitor_total_value = competitor_total;
            result.competitor_savings = (bill - competitor_total).max(0.0);
            result.extra_savings = (competitor_annual_cost - own_annual_cost).max(0.0);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::simulation::PhaseType;
    use proptest::prelude::*;
    use rstest::rstest;

    const EPS: f64 = 0.01;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn calculate_savings(params: &SimulationParams) -> SimulationResult {
        SavingsEstimator::default().estimate(params)
    }

    #[test]
    fn test_reference_single_phase_350() {
        let r = calculate_savings(&SimulationParams::new(350.0, PhaseType::SinglePhase));
        assert_eq!(r.estimated_consumption_kwh, 368);
        assert_eq!(r.min_consumption_kwh, 30);
        assert_eq!(r.compensable_energy_kwh, 338);
        assert!(close(r.fio_b_tax, 42.59), "fio b {:.4}", r.fio_b_tax);
        assert!(close(r.subscription_cost, 139.26), "subscription {:.4}", r.subscription_cost);
        assert!(close(r.residual_bill, 96.09), "residual {:.4}", r.residual_bill);
        // unrounded sums: 235.344 and 114.656, not the cent-rounded 235.35 / 114.65
        assert!(close(r.new_total_value, 235.34), "total {:.4}", r.new_total_value);
        assert!(close(r.savings_month1to3, 114.66), "savings {:.4}", r.savings_month1to3);
        assert_eq!(r.monthly_savings, r.savings_month1to3);

        // months 4-12 at 25%
        assert_eq!(r.discount_applied_month4to12, 0.25);
        assert!(close(r.monthly_cost_month4to12, 304.97));
        assert!(close(r.savings_month4to12, 45.03));
        assert!(close(r.annual_savings, 749.22), "annual {:.4}", r.annual_savings);

        assert!(!r.has_competitor);
        assert_eq!(r.competitor_total_value, 0.0);
        assert_eq!(r.competitor_savings, 0.0);
        assert_eq!(r.extra_savings, 0.0);
    }

    #[test]
    fn test_competitor_at_ten_percent() {
        let params = SimulationParams::new(350.0, PhaseType::SinglePhase).with_competitor(10.0);
        let r = calculate_savings(&params);
        assert!(r.has_competitor);
        assert!(close(r.competitor_total_value, 346.75), "competitor {:.4}", r.competitor_total_value);
        assert!(r.competitor_total_value > r.monthly_cost_month1to3);
        assert!(r.competitor_total_value > r.monthly_cost_month4to12);
        assert!(close(r.competitor_savings, 3.25));
        assert!(close(r.extra_savings, 710.21), "extra {:.4}", r.extra_savings);
    }

    #[test]
    fn test_better_competitor_reports_no_extra_savings() {
        let params = SimulationParams::new(350.0, PhaseType::SinglePhase).with_competitor(60.0);
        let r = calculate_savings(&params);
        assert_eq!(r.extra_savings, 0.0);
        assert!(r.competitor_savings > 0.0);
    }

    #[test]
    fn test_bill_below_floor_has_no_compensable_energy() {
        let r = calculate_savings(&SimulationParams::new(50.0, PhaseType::TriPhase));
        assert_eq!(r.estimated_consumption_kwh, 53);
        assert_eq!(r.compensable_energy_kwh, 0);
        assert_eq!(r.fio_b_tax, 0.0);
        assert_eq!(r.subscription_cost, 0.0);
        // residual 95 + 25 exceeds the bill
        assert_eq!(r.monthly_savings, 0.0);
        assert_eq!(r.annual_savings, 0.0);
    }

    #[test]
    fn test_zero_and_negative_bills_are_total() {
        for bill in [0.0, -200.0] {
            let r = calculate_savings(&SimulationParams::new(bill, PhaseType::BiPhase).with_competitor(150.0));
            assert_eq!(r.compensable_energy_kwh, 0);
            assert_eq!(r.savings_month1to3, 0.0);
            assert_eq!(r.savings_month4to12, 0.0);
            assert_eq!(r.annual_savings, 0.0);
            assert_eq!(r.competitor_savings, 0.0);
            assert!(r.extra_savings >= 0.0);
        }
    }

    #[test]
    fn test_extreme_bills_do_not_overflow() {
        for bill in [-1e20, f64::NEG_INFINITY, f64::MIN, f64::NAN] {
            for phase in PhaseType::ALL {
                let r = calculate_savings(&SimulationParams::new(bill, phase).with_competitor(10.0));
                assert_eq!(r.compensable_energy_kwh, 0, "bill {bill} phase {phase:?}");
                assert_eq!(r.monthly_savings, 0.0);
                assert_eq!(r.annual_savings, 0.0);
                assert_eq!(r.competitor_savings, 0.0);
                assert!(r.extra_savings >= 0.0);
            }
        }

        let r = calculate_savings(&SimulationParams::new(f64::INFINITY, PhaseType::TriPhase));
        assert_eq!(r.estimated_consumption_kwh, i64::MAX);
        assert_eq!(r.compensable_energy_kwh, (i64::MAX - 100) as u64);
        assert!(r.monthly_savings >= 0.0);
    }

    #[test]
    fn test_annual_savings_ignore_a_losing_tier() {
        // Intro tier saves money, the sustained tier costs more than the bill
        let schedule = DiscountSchedule { low_rate: -0.5, ..DiscountSchedule::default() };
        let estimator = SavingsEstimator::new(Tariff::default(), schedule);
        let r = estimator.estimate(&SimulationParams::new(350.0, PhaseType::SinglePhase));
        assert!(r.monthly_cost_month4to12 > 350.0);
        assert_eq!(r.savings_month4to12, 0.0);
        assert!(close(r.annual_savings, r.savings_month1to3 * INTRO_MONTHS));
    }

    #[rstest]
    #[case(999.99, 0.25)]
    #[case(1000.0, 0.28)]
    #[case(2500.0, 0.28)]
    #[case(4000.0, 0.28)]
    #[case(4000.01, 0.30)]
    #[case(5000.0, 0.30)]
    fn test_sustained_bracket(#[case] bill: f64, #[case] expected: f64) {
        let r = calculate_savings(&SimulationParams::new(bill, PhaseType::SinglePhase));
        assert_eq!(r.discount_applied_month1to3, 0.50);
        assert_eq!(r.discount_applied_month4to12, expected);
    }

    #[test]
    fn test_flat_schedule_matches_single_tier_pricing() {
        let estimator = SavingsEstimator::new(Tariff::default(), DiscountSchedule::flat(0.15));
        let r = estimator.estimate(&SimulationParams::new(5000.0, PhaseType::TriPhase));
        assert_eq!(r.discount_applied_month1to3, 0.15);
        assert_eq!(r.discount_applied_month4to12, 0.15);
        assert_eq!(r.monthly_cost_month1to3, r.monthly_cost_month4to12);
        assert!(close(r.annual_savings, r.monthly_savings * CONTRACT_MONTHS));
    }

    fn any_phase() -> impl Strategy<Value = PhaseType> {
        prop_oneof![
            Just(PhaseType::SinglePhase),
            Just(PhaseType::BiPhase),
            Just(PhaseType::TriPhase),
        ]
    }

    proptest! {
        #[test]
        fn prop_savings_never_negative(
            bill in -1e20f64..1e20,
            phase in any_phase(),
            competitor in proptest::option::of(-50.0f64..200.0),
        ) {
            let mut params = SimulationParams::new(bill, phase);
            if let Some(d) = competitor {
                params = params.with_competitor(d);
            }
            let r = calculate_savings(&params);
            prop_assert!(r.monthly_savings >= 0.0);
            prop_assert!(r.annual_savings >= 0.0);
            prop_assert!(r.savings_month1to3 >= 0.0);
            prop_assert!(r.savings_month4to12 >= 0.0);
            prop_assert!(r.competitor_savings >= 0.0);
            prop_assert!(r.extra_savings >= 0.0);
        }

        #[test]
        fn prop_consumption_monotonic_in_bill(
            bill in 0.0f64..50_000.0,
            delta in 0.0f64..5_000.0,
            phase in any_phase(),
        ) {
            let lo = calculate_savings(&SimulationParams::new(bill, phase));
            let hi = calculate_savings(&SimulationParams::new(bill + delta, phase));
            prop_assert!(hi.estimated_consumption_kwh >= lo.estimated_consumption_kwh);
            prop_assert!(hi.compensable_energy_kwh >= lo.compensable_energy_kwh);
            prop_assert!(lo.estimated_consumption_kwh >= 0);
        }

        #[test]
        fn prop_estimate_is_deterministic(bill in 0.0f64..20_000.0, phase in any_phase(), d in 0.0f64..100.0) {
            let params = SimulationParams::new(bill, phase).with_competitor(d);
            let a = calculate_savings(&params);
            let b = calculate_savings(&params);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_no_competitor_leaves_comparison_zero(bill in 0.0f64..20_000.0, phase in any_phase()) {
            let r = calculate_savings(&SimulationParams::new(bill, phase));
            prop_assert_eq!(r.competitor_total_value, 0.0);
            prop_assert_eq!(r.competitor_savings, 0.0);
            prop_assert_eq!(r.extra_savings, 0.0);
        }
    }
}
