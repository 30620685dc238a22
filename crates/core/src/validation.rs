use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialog::{Message, SlotName, Slots};
use crate::intents::portfolio::RiskLevel;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 64;
pub const MIN_INVESTMENT_AMOUNT: f64 = 5000.0;

/// How age and investment amount behave when they are not numbers.
///
/// `Lenient` treats unreadable input as not-a-number, which fails no
/// comparison and therefore passes. `Strict` rejects it with a re-prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericParsePolicy {
    #[default]
    Strict,
    Lenient,
}

impl NumericParsePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl FromStr for NumericParsePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unsupported numeric policy `{other}` (expected strict|lenient)")),
        }
    }
}

/// Outcome of checking the collected slots. A violation always names the slot
/// and carries the message to re-prompt with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "ValidationReport")]
pub enum ValidationResult {
    Valid,
    Invalid { violated_slot: SlotName, message: Message },
}

impl ValidationResult {
    fn invalid(violated_slot: SlotName, content: impl Into<String>) -> Self {
        Self::Invalid { violated_slot, message: Message::plain(content) }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn violated_slot(&self) -> Option<SlotName> {
        match self {
            Self::Valid => None,
            Self::Invalid { violated_slot, .. } => Some(*violated_slot),
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Valid => None,
            Self::Invalid { message, .. } => Some(message),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    violated_slot: Option<SlotName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<Message>,
}

impl From<ValidationResult> for ValidationReport {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Valid => {
                Self { is_valid: true, violated_slot: None, message: None }
            }
            ValidationResult::Invalid { violated_slot, message } => {
                Self { is_valid: false, violated_slot: Some(violated_slot), message: Some(message) }
            }
        }
    }
}

/// Raw slot values as collected so far. `None` means not yet collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotInputs<'a> {
    pub first_name: Option<&'a str>,
    pub age: Option<&'a str>,
    pub investment_amount: Option<&'a str>,
    pub risk_level: Option<&'a str>,
}

impl<'a> SlotInputs<'a> {
    pub fn from_slots(slots: &'a Slots) -> Self {
        Self {
            first_name: slots.get(SlotName::FirstName),
            age: slots.get(SlotName::Age),
            investment_amount: slots.get(SlotName::InvestmentAmount),
            risk_level: slots.get(SlotName::RiskLevel),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validator {
    policy: NumericParsePolicy,
}

impl Validator {
    pub fn new(policy: NumericParsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NumericParsePolicy {
        self.policy
    }

    /// Checks present slots in the order name, age, amount, risk level and
    /// reports the first violation only.
    pub fn validate(&self, inputs: &SlotInputs<'_>) -> ValidationResult {
        let result = self.first_violation(inputs).unwrap_or(ValidationResult::Valid);
        if let ValidationResult::Invalid { violated_slot, .. } = &result {
            debug!(
                event_name = "dialog.validation.violation",
                violated_slot = %violated_slot,
                numeric_policy = self.policy.as_str(),
                "slot failed validation"
            );
        }
        result
    }

    fn first_violation(&self, inputs: &SlotInputs<'_>) -> Option<ValidationResult> {
        if let Some(first_name) = inputs.first_name {
            if first_name.is_empty() {
                return Some(ValidationResult::invalid(
                    SlotName::FirstName,
                    "You provided an empty name... Please try again.",
                ));
            }
        }

        if let Some(raw_age) = inputs.age {
            if let Some(violation) = self.check_age(raw_age) {
                return Some(violation);
            }
        }

        if let Some(raw_amount) = inputs.investment_amount {
            if let Some(violation) = self.check_investment_amount(raw_amount) {
                return Some(violation);
            }
        }

        if let Some(risk_level) = inputs.risk_level {
            if risk_level.parse::<RiskLevel>().is_err() {
                return Some(ValidationResult::invalid(
                    SlotName::RiskLevel,
                    "I didn't get that, please try again...",
                ));
            }
        }

        None
    }

    fn check_age(&self, raw: &str) -> Option<ValidationResult> {
        let too_young = || {
            ValidationResult::invalid(
                SlotName::Age,
                "You have to be at least 1 year old to seek investment advise... Please provide a different age.",
            )
        };
        let too_old = || {
            ValidationResult::invalid(
                SlotName::Age,
                "This service is only valid for people less than 65 years old... Sorry, but we cannot help you today.",
            )
        };

        let age = match raw.trim().parse::<i64>() {
            Ok(age) => age,
            // Whole numbers beyond i64 are still out of range, not unreadable.
            Err(error) if *error.kind() == IntErrorKind::PosOverflow => return Some(too_old()),
            Err(error) if *error.kind() == IntErrorKind::NegOverflow => return Some(too_young()),
            Err(_) => {
                return match self.policy {
                    NumericParsePolicy::Lenient => None,
                    NumericParsePolicy::Strict => Some(ValidationResult::invalid(
                        SlotName::Age,
                        "I could not understand that age... Please provide your age as a whole number.",
                    )),
                };
            }
        };

        if age < MIN_AGE {
            return Some(too_young());
        }
        if age > MAX_AGE {
            return Some(too_old());
        }

        None
    }

    fn check_investment_amount(&self, raw: &str) -> Option<ValidationResult> {
        let parsed = raw.trim().parse::<f64>().ok();
        let amount = match (parsed, self.policy) {
            (Some(amount), NumericParsePolicy::Lenient) => amount,
            (Some(amount), NumericParsePolicy::Strict) if amount.is_finite() => amount,
            (None, NumericParsePolicy::Lenient) => return None,
            (_, NumericParsePolicy::Strict) => {
                return Some(ValidationResult::invalid(
                    SlotName::InvestmentAmount,
                    "I could not understand that amount... Please provide the amount to invest as a number.",
                ));
            }
        };

        // NaN compares false here, matching the lenient contract.
        if amount <= MIN_INVESTMENT_AMOUNT {
            return Some(ValidationResult::invalid(
                SlotName::InvestmentAmount,
                format!(
                    "You've got to be kidding me?!  I can't provide advise for $ {amount:?}! Please provide a high amount and try again."
                ),
            ));
        }

        None
    }
}
