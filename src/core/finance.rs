use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bound on generated periods, shared by all three models.
///
/// Keeps a pathological input (e.g. a huge target profit against a near-zero
/// rate) from allocating an absurd sequence.
pub const MAX_PERIOD_COUNT: u32 = 100_000;

const MONTHS_PER_YEAR: u32 = 12;

/// Inputs for the linear simple-interest growth model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestParams {
    pub capital: f64,
    pub interest_percent: f64,
    pub period_count: u32,
}

/// Inputs for compound growth toward a target profit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalizedInterestParams {
    pub capital: f64,
    pub interest_percent: f64,
    pub target_profit: f64,
}

/// Inputs for fixed-payment (annuity) loan amortization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParams {
    pub loan_amount: f64,
    pub interest_percent: f64,
    pub duration_years: u32,
}

/// Capital after `period` periods of simple interest.
#[must_use]
pub fn simple_interest_value(capital: f64, interest_percent: f64, period: u32) -> f64 {
    capital + capital * interest_percent / 100.0 * f64::from(period)
}

/// Capital after `period` periods of compounding.
#[must_use]
pub fn capitalized_interest_value(capital: f64, interest_percent: f64, period: u32) -> f64 {
    capital * (1.0 + interest_percent / 100.0).powi(period as i32)
}

/// Smallest whole period count whose compounded value reaches
/// `capital + target_profit`.
pub fn capitalized_interest_periods(
    capital: f64,
    interest_percent: f64,
    target_profit: f64,
) -> EngineResult<u32> {
    ensure_positive("capital", capital)?;
    ensure_non_negative("interest rate", interest_percent)?;
    ensure_non_negative("target profit", target_profit)?;

    if target_profit == 0.0 {
        return Ok(0);
    }
    if interest_percent == 0.0 {
        return Err(EngineError::InvalidData(
            "a positive target profit is unreachable at 0% interest".to_owned(),
        ));
    }

    let periods = ((1.0 + target_profit / capital).ln() / (1.0 + interest_percent / 100.0).ln())
        .ceil();
    if !periods.is_finite() || periods < 0.0 || periods > f64::from(MAX_PERIOD_COUNT) {
        return Err(EngineError::InvalidData(format!(
            "derived period count {periods} is outside 0..={MAX_PERIOD_COUNT}"
        )));
    }
    Ok(periods as u32)
}

/// Fixed monthly annuity payment; the 0% rate uses the linear limit.
pub fn loan_monthly_payment(
    loan_amount: f64,
    interest_percent: f64,
    months: u32,
) -> EngineResult<f64> {
    ensure_positive("loan amount", loan_amount)?;
    ensure_non_negative("interest rate", interest_percent)?;
    if months == 0 {
        return Err(EngineError::InvalidData(
            "loan duration must cover at least one month".to_owned(),
        ));
    }

    let monthly_rate = interest_percent / 100.0 / f64::from(MONTHS_PER_YEAR);
    if monthly_rate == 0.0 {
        return Ok(loan_amount / f64::from(months));
    }
    Ok(loan_amount * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(months as i32))))
}

/// Sequence of length `period_count + 1`: `value[i] = capital * (1 + rate * i)`.
pub fn simple_interest_sequence(params: SimpleInterestParams) -> EngineResult<Vec<f64>> {
    ensure_positive("capital", params.capital)?;
    ensure_non_negative("interest rate", params.interest_percent)?;
    ensure_period_budget(params.period_count)?;

    Ok((0..=params.period_count)
        .map(|period| simple_interest_value(params.capital, params.interest_percent, period))
        .collect())
}

/// Sequence of length `n + 1` where `n` is the derived compounding period
/// count: `value[i] = capital * (1 + rate)^i`.
pub fn capitalized_interest_sequence(params: CapitalizedInterestParams) -> EngineResult<Vec<f64>> {
    let periods = capitalized_interest_periods(
        params.capital,
        params.interest_percent,
        params.target_profit,
    )?;

    Ok((0..=periods)
        .map(|period| {
            capitalized_interest_value(params.capital, params.interest_percent, period)
        })
        .collect())
}

/// Declining-balance sequence of length `months + 1`, from the total
/// repayment down to exactly zero.
pub fn loan_sequence(params: LoanParams) -> EngineResult<Vec<f64>> {
    let months = params
        .duration_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EngineError::InvalidData("loan duration overflows months".to_owned()))?;
    ensure_period_budget(months)?;
    let payment = loan_monthly_payment(params.loan_amount, params.interest_percent, months)?;

    let total = payment * f64::from(months);
    Ok((0..=months)
        .map(|month| total - f64::from(month) * payment)
        .collect())
}

fn ensure_positive(name: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn ensure_period_budget(periods: u32) -> EngineResult<()> {
    if periods > MAX_PERIOD_COUNT {
        return Err(EngineError::InvalidData(format!(
            "period count {periods} exceeds the {MAX_PERIOD_COUNT} cap"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        CapitalizedInterestParams, LoanParams, SimpleInterestParams,
        capitalized_interest_periods, capitalized_interest_sequence, loan_monthly_payment,
        loan_sequence, simple_interest_sequence,
    };

    #[test]
    fn simple_interest_matches_hand_computed_example() {
        let sequence = simple_interest_sequence(SimpleInterestParams {
            capital: 1000.0,
            interest_percent: 5.0,
            period_count: 3,
        })
        .expect("valid params");
        assert_eq!(sequence, vec![1000.0, 1050.0, 1100.0, 1150.0]);
    }

    #[test]
    fn capitalized_period_derivation_is_minimal() {
        // 1000 at 5% doubles (+1000 profit) after ceil(log1.05(2)) = 15 periods.
        let periods = capitalized_interest_periods(1000.0, 5.0, 1000.0).expect("valid params");
        assert_eq!(periods, 15);

        let sequence = capitalized_interest_sequence(CapitalizedInterestParams {
            capital: 1000.0,
            interest_percent: 5.0,
            target_profit: 1000.0,
        })
        .expect("valid params");
        assert_eq!(sequence.len(), 16);
        assert!(sequence[15] >= 2000.0);
        assert!(sequence[14] < 2000.0);
    }

    #[test]
    fn zero_profit_needs_zero_periods() {
        let sequence = capitalized_interest_sequence(CapitalizedInterestParams {
            capital: 1000.0,
            interest_percent: 5.0,
            target_profit: 0.0,
        })
        .expect("valid params");
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0], 1000.0);
    }

    #[test]
    fn positive_profit_at_zero_interest_is_rejected() {
        let err = capitalized_interest_periods(1000.0, 0.0, 10.0).expect_err("unreachable");
        assert!(format!("{err}").contains("unreachable"));
    }

    #[test]
    fn loan_sequence_ends_at_exactly_zero() {
        let sequence = loan_sequence(LoanParams {
            loan_amount: 1200.0,
            interest_percent: 12.0,
            duration_years: 1,
        })
        .expect("valid params");

        assert_eq!(sequence.len(), 13);
        let payment = loan_monthly_payment(1200.0, 12.0, 12).expect("payment");
        assert!((payment - 106.618_546_414_009_93).abs() <= 1e-9);
        assert!((sequence[0] - payment * 12.0).abs() <= 1e-9);
        assert_eq!(sequence[12], 0.0);
    }

    #[test]
    fn zero_rate_loan_amortizes_linearly() {
        let sequence = loan_sequence(LoanParams {
            loan_amount: 1200.0,
            interest_percent: 0.0,
            duration_years: 1,
        })
        .expect("valid params");
        assert!((sequence[0] - 1200.0).abs() <= 1e-9);
        assert!((sequence[6] - 600.0).abs() <= 1e-9);
        assert_eq!(sequence[12], 0.0);
    }

    #[test]
    fn degenerate_inputs_are_rejected_instead_of_minting_nan() {
        assert!(
            simple_interest_sequence(SimpleInterestParams {
                capital: 0.0,
                interest_percent: 5.0,
                period_count: 3,
            })
            .is_err()
        );
        assert!(
            capitalized_interest_sequence(CapitalizedInterestParams {
                capital: -10.0,
                interest_percent: 5.0,
                target_profit: 10.0,
            })
            .is_err()
        );
        assert!(
            loan_sequence(LoanParams {
                loan_amount: 1200.0,
                interest_percent: 12.0,
                duration_years: 0,
            })
            .is_err()
        );
    }
}
