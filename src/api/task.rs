use serde::{Deserialize, Serialize};

use crate::core::finance::{
    CapitalizedInterestParams, LoanParams, SimpleInterestParams, capitalized_interest_sequence,
    loan_sequence, simple_interest_sequence,
};
use crate::error::{EngineError, EngineResult};
use crate::input::form::{FieldSpec, FieldValues};
use crate::input::validation::FieldKind;

/// Accent fills for the three builtin tasks, packed `0xRRGGBB`.
pub const SIMPLE_INTEREST_ACCENT: u32 = 0x29B6F6;
pub const CAPITALIZED_INTEREST_ACCENT: u32 = 0xAED581;
pub const LOAN_ACCENT: u32 = 0xEF5350;

/// Which financial model a task computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinanceModel {
    SimpleInterest,
    CapitalizedInterest,
    Loan,
}

impl FinanceModel {
    /// One value per period from the task's parsed field values.
    pub fn sequence(&self, values: &FieldValues) -> EngineResult<Vec<f64>> {
        match self {
            Self::SimpleInterest => simple_interest_sequence(SimpleInterestParams {
                capital: values.get("capital")?,
                interest_percent: values.get("interest")?,
                period_count: to_whole_count(values.get("period_count")?, "period count")?,
            }),
            Self::CapitalizedInterest => {
                capitalized_interest_sequence(CapitalizedInterestParams {
                    capital: values.get("capital")?,
                    interest_percent: values.get("interest")?,
                    target_profit: values.get("profit")?,
                })
            }
            Self::Loan => loan_sequence(LoanParams {
                loan_amount: values.get("loan_amount")?,
                interest_percent: values.get("interest")?,
                duration_years: to_whole_count(values.get("loan_duration")?, "loan duration")?,
            }),
        }
    }

    /// The headline number the readout counts toward.
    pub fn answer(&self, sequence: &[f64]) -> EngineResult<f64> {
        match self {
            Self::SimpleInterest => sequence
                .last()
                .copied()
                .ok_or_else(|| EngineError::InvalidData("empty sequence".to_owned())),
            Self::CapitalizedInterest => Ok((sequence.len().saturating_sub(1)) as f64),
            Self::Loan => {
                if sequence.len() < 2 {
                    return Err(EngineError::InvalidData(
                        "loan sequence needs at least two samples".to_owned(),
                    ));
                }
                Ok(sequence[0] - sequence[1])
            }
        }
    }

    /// Value domain for the y scale, `(low, high)` from the sequence ends.
    ///
    /// Growth tasks pull the floor just below the first value so the first
    /// bar keeps a visible sliver; loans run from zero up to the total.
    #[must_use]
    pub fn y_domain(&self, initial: f64, last: f64) -> (f64, f64) {
        match self {
            Self::SimpleInterest | Self::CapitalizedInterest => {
                (initial * (initial / last), last)
            }
            Self::Loan => (last, initial),
        }
    }
}

/// Static description of one interactive task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    /// Bar fill, packed `0xRRGGBB`.
    pub color: u32,
    pub model: FinanceModel,
    pub answer_label: String,
}

impl TaskSpec {
    #[must_use]
    pub fn simple_interest() -> Self {
        Self {
            name: "Simple interest".to_owned(),
            fields: vec![
                capital_field(),
                interest_field(),
                FieldSpec::new("period_count", "Periods", "n", FieldKind::Integer),
            ],
            color: SIMPLE_INTEREST_ACCENT,
            model: FinanceModel::SimpleInterest,
            answer_label: "Profit".to_owned(),
        }
    }

    #[must_use]
    pub fn capitalized_interest() -> Self {
        Self {
            name: "Capitalized interest".to_owned(),
            fields: vec![
                capital_field(),
                interest_field(),
                FieldSpec::new("profit", "Target profit", "$", FieldKind::Decimal),
            ],
            color: CAPITALIZED_INTEREST_ACCENT,
            model: FinanceModel::CapitalizedInterest,
            answer_label: "Periods".to_owned(),
        }
    }

    #[must_use]
    pub fn loan() -> Self {
        Self {
            name: "Loan".to_owned(),
            fields: vec![
                FieldSpec::new("loan_amount", "Loan amount", "$", FieldKind::Decimal),
                interest_field(),
                FieldSpec::new("loan_duration", "Duration (years)", "y", FieldKind::Integer),
            ],
            color: LOAN_ACCENT,
            model: FinanceModel::Loan,
            answer_label: "Monthly payment".to_owned(),
        }
    }

    /// The three builtin tasks in menu order.
    #[must_use]
    pub fn builtin_tasks() -> Vec<Self> {
        vec![
            Self::simple_interest(),
            Self::capitalized_interest(),
            Self::loan(),
        ]
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.fields.is_empty() {
            return Err(EngineError::InvalidData(format!(
                "task `{}` defines no fields",
                self.name
            )));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|other| other.key == field.key) {
                return Err(EngineError::InvalidData(format!(
                    "task `{}` repeats field key `{}`",
                    self.name, field.key
                )));
            }
        }
        Ok(())
    }
}

fn capital_field() -> FieldSpec {
    FieldSpec::new("capital", "Capital", "$", FieldKind::Decimal)
}

fn interest_field() -> FieldSpec {
    FieldSpec::new("interest", "Interest rate", "%", FieldKind::Decimal)
}

fn to_whole_count(value: f64, name: &str) -> EngineResult<u32> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(EngineError::InvalidData(format!(
            "{name} must be a whole number in range, got {value}"
        )));
    }
    Ok(value as u32)
}
