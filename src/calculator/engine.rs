//! Cost aggregator: program fees, financing, payment, tax, insurance and income

use crate::amortization::{first_payment_split, level_payment};
use crate::fees::{annual_mip, hazard_insurance, upfront_mip, va_funding_fee};
use crate::loan::{LoanInput, ProgramType};
use crate::rates::{RateTables, QUALIFYING_INCOME_MULTIPLIER, STANDARD_RATES};
use super::breakdown::CostBreakdown;

/// Price a loan against the standard rate tables
pub fn calculate(input: &LoanInput) -> CostBreakdown {
    CostCalculator::standard().calculate(input)
}

/// Loan cost calculator bound to a set of rate tables
///
/// Holds no state between calls; the same input always produces the same
/// breakdown.
#[derive(Debug, Clone, Copy)]
pub struct CostCalculator<'r> {
    rates: &'r RateTables,
}

impl CostCalculator<'static> {
    /// Calculator over the compiled-in tables
    pub fn standard() -> Self {
        Self { rates: &STANDARD_RATES }
    }
}

impl Default for CostCalculator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> CostCalculator<'r> {
    pub fn new(rates: &'r RateTables) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'r RateTables {
        self.rates
    }

    /// Upfront fee the program finances, computed on the base loan amount.
    ///
    /// Zero for conventional loans.
    pub fn program_fee(&self, input: &LoanInput) -> f64 {
        let base = input.base_loan_amount();
        match input.program {
            ProgramType::Conventional => 0.0,
            ProgramType::Fha => upfront_mip(self.rates, base),
            ProgramType::Va => va_funding_fee(
                self.rates,
                base,
                input.down_payment_percent,
                input.va_first_time_use,
            ),
        }
    }

    /// Full monthly cost breakdown for a loan
    pub fn calculate(&self, input: &LoanInput) -> CostBreakdown {
        let base_loan_amount = input.base_loan_amount();

        // Upfront fees are financed into the loan
        let program_fee = self.program_fee(input);
        let financed_loan_amount = base_loan_amount + program_fee;

        log::debug!(
            "Pricing {} loan: base={:.2} fee={:.2} financed={:.2}",
            input.program, base_loan_amount, program_fee, financed_loan_amount
        );

        let periodic_rate = input.periodic_rate();
        let monthly_principal_interest =
            level_payment(periodic_rate, input.num_payments(), financed_loan_amount);
        let first_payment =
            first_payment_split(periodic_rate, monthly_principal_interest, financed_loan_amount);

        let monthly_tax = input.purchase_price * (input.state_tax_rate / 12.0);
        let mut total_monthly_payment = monthly_principal_interest + monthly_tax;

        // Annual MIP tiers on the financed amount
        let monthly_mip = match input.program {
            ProgramType::Fha => {
                let mip = annual_mip(
                    self.rates,
                    financed_loan_amount,
                    input.down_payment_percent,
                    input.term_years,
                );
                total_monthly_payment += mip;
                Some(mip)
            }
            ProgramType::Conventional | ProgramType::Va => None,
        };

        let monthly_insurance = hazard_insurance(self.rates, input.purchase_price);
        total_monthly_payment += monthly_insurance;

        let qualifying_annual_income = total_monthly_payment * QUALIFYING_INCOME_MULTIPLIER;

        CostBreakdown {
            program: input.program,
            base_loan_amount,
            financed_loan_amount,
            program_fee,
            monthly_principal_interest,
            first_payment,
            monthly_tax,
            monthly_insurance,
            monthly_mip,
            total_monthly_payment,
            qualifying_annual_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::VaDownPaymentBand;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn scenario_a() -> LoanInput {
        LoanInput::new(300_000.0, 3.5, 6.0, 30, 0.0125, ProgramType::Fha)
    }

    fn scenario_b() -> LoanInput {
        LoanInput::new(500_000.0, 20.0, 5.0, 30, 0.01, ProgramType::Conventional)
    }

    #[test]
    fn test_fha_scenario() {
        let b = calculate(&scenario_a());

        assert_eq!(b.program, ProgramType::Fha);
        assert_relative_eq!(b.base_loan_amount, 289_500.0, epsilon = 1e-9);
        assert_relative_eq!(b.program_fee, 5_066.25, epsilon = 1e-6);
        assert_relative_eq!(b.financed_loan_amount, 294_566.25, epsilon = 1e-6);
        assert_abs_diff_eq!(b.monthly_principal_interest, 1_766.07, epsilon = 0.01);
        assert_relative_eq!(b.monthly_tax, 312.5, epsilon = 1e-9);
        assert_relative_eq!(b.monthly_insurance, 105.0, epsilon = 1e-9);

        // dp < 5, term > 15, financed amount under the limit
        let mip = b.monthly_mip.expect("FHA breakdown carries MIP");
        assert_relative_eq!(mip, 0.0055 * 294_566.25 / 12.0, epsilon = 1e-9);

        assert_abs_diff_eq!(b.total_monthly_payment, 2_318.58, epsilon = 0.01);
        assert_abs_diff_eq!(b.qualifying_annual_income, 55_645.99, epsilon = 0.01);
        assert_relative_eq!(b.qualifying_annual_income, b.total_monthly_payment * 24.0);
        assert!(b.is_finite());
    }

    #[test]
    fn test_conventional_scenario() {
        let input = scenario_b();
        let b = calculate(&input);

        assert_eq!(b.program_fee, 0.0);
        assert_eq!(b.financed_loan_amount, b.base_loan_amount);
        assert_eq!(b.financed_loan_amount, input.base_loan_amount());
        assert_relative_eq!(b.financed_loan_amount, 400_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.monthly_principal_interest, 2_147.29, epsilon = 0.01);
        assert_abs_diff_eq!(b.monthly_tax, 416.67, epsilon = 0.01);
        assert_relative_eq!(b.monthly_insurance, 175.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.total_monthly_payment, 2_738.95, epsilon = 0.01);
        assert!(b.monthly_mip.is_none());
    }

    #[test]
    fn test_conventional_never_finances_a_fee() {
        for dp in [0.0, 3.0, 5.0, 10.0, 22.0, 50.0, 100.0] {
            for term in [10, 15, 30] {
                let input = LoanInput::new(450_000.0, dp, 6.25, term, 0.011, ProgramType::Conventional);
                let b = calculate(&input);
                assert_eq!(b.program_fee, 0.0);
                assert_eq!(b.financed_loan_amount, input.base_loan_amount());
                assert_eq!(b.monthly_mip_or_zero(), 0.0);
            }
        }
    }

    #[test]
    fn test_va_first_use_under_five_percent() {
        let input = LoanInput::new(400_000.0, 4.0, 6.5, 30, 0.01, ProgramType::Va);
        let b = calculate(&input);

        assert_relative_eq!(b.base_loan_amount, 384_000.0, epsilon = 1e-9);
        assert_relative_eq!(b.program_fee, 384_000.0 * 0.0215, epsilon = 1e-9);
        assert_relative_eq!(b.financed_loan_amount, 392_256.0, epsilon = 1e-6);
        assert!(b.monthly_mip.is_none());
        assert_abs_diff_eq!(b.total_monthly_payment, 2_952.66, epsilon = 0.01);
    }

    #[test]
    fn test_va_band_edges_route_to_adjacent_band() {
        let at_five = LoanInput::new(400_000.0, 5.0, 6.5, 30, 0.01, ProgramType::Va);
        let at_ten = LoanInput::new(400_000.0, 10.0, 6.5, 30, 0.01, ProgramType::Va);

        assert_eq!(VaDownPaymentBand::from_percent(5.0).as_str(), "gte5AndLt10");
        assert_eq!(VaDownPaymentBand::from_percent(10.0).as_str(), "gte10");

        let calc = CostCalculator::standard();
        assert_relative_eq!(calc.program_fee(&at_five), at_five.base_loan_amount() * 0.015, epsilon = 1e-9);
        assert_relative_eq!(calc.program_fee(&at_ten), at_ten.base_loan_amount() * 0.0125, epsilon = 1e-9);
    }

    #[test]
    fn test_va_subsequent_use() {
        let input = LoanInput::new(400_000.0, 0.0, 6.5, 30, 0.01, ProgramType::Va)
            .with_va_first_time_use(false);
        let b = calculate(&input);
        assert_relative_eq!(b.program_fee, 400_000.0 * 0.033, epsilon = 1e-9);
    }

    #[test]
    fn test_fha_mip_uses_financed_amount_against_limit() {
        // Base 720,000 is under the limit, financed 732,600 is over it
        let input = LoanInput::new(720_000.0, 0.0, 6.0, 30, 0.01, ProgramType::Fha);
        let b = calculate(&input);
        assert!(b.base_loan_amount <= 726_200.0);
        assert!(b.financed_loan_amount > 726_200.0);
        assert_relative_eq!(
            b.monthly_mip.unwrap(),
            0.0075 * b.financed_loan_amount / 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_interest_rate() {
        let input = LoanInput::new(360_000.0, 0.0, 0.0, 30, 0.0, ProgramType::Conventional);
        let b = calculate(&input);
        assert_eq!(b.monthly_principal_interest, 1_000.0);
        assert_eq!(b.first_payment.interest, 0.0);
        assert!(b.is_finite());
    }

    #[test]
    fn test_zero_term_is_not_finite() {
        let input = LoanInput::new(300_000.0, 10.0, 6.0, 0, 0.01, ProgramType::Conventional);
        let b = calculate(&input);
        assert!(!b.is_finite());
    }

    #[test]
    fn test_idempotent() {
        for input in [scenario_a(), scenario_b()] {
            let first = calculate(&input);
            let second = calculate(&input);
            assert_eq!(first, second);
            assert_eq!(
                first.total_monthly_payment.to_bits(),
                second.total_monthly_payment.to_bits()
            );
        }
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let b = calculate(&scenario_a());
        let sum = b.monthly_principal_interest
            + b.monthly_tax
            + b.monthly_mip_or_zero()
            + b.monthly_insurance;
        assert_relative_eq!(b.total_monthly_payment, sum, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_rates() {
        let mut rates = RateTables::standard();
        rates.hazard_insurance_rate = 0.0005;
        let calc = CostCalculator::new(&rates);
        let b = calc.calculate(&scenario_b());
        assert_relative_eq!(b.monthly_insurance, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_breakdown_json_omits_absent_mip() {
        let json = serde_json::to_value(calculate(&scenario_b())).unwrap();
        assert!(json.get("monthly_mip").is_none());
        assert_eq!(json["program"], "CONV");

        let json = serde_json::to_value(calculate(&scenario_a())).unwrap();
        assert!(json["monthly_mip"].is_number());
    }
}
