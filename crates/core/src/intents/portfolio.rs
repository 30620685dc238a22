use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::dialog::{
    close, delegate, elicit_slot, DialogResponse, FulfillmentState, IntentRequest,
    InvocationSource, Message, SlotName,
};
use crate::dispatch::IntentHandler;
use crate::errors::DispatchError;
use crate::validation::{SlotInputs, ValidationResult, Validator};

pub const RECOMMEND_PORTFOLIO: &str = "RecommendPortfolio";

/// Risk appetite offered to the user. Labels match the interpreter's slot
/// values case-sensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Maximum,
    VeryHigh,
    High,
    Mid,
    Low,
    VeryLow,
    None,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown risk level `{0}`")]
pub struct UnknownRiskLevel(pub String);

impl RiskLevel {
    pub const ALL: [RiskLevel; 7] = [
        RiskLevel::Maximum,
        RiskLevel::VeryHigh,
        RiskLevel::High,
        RiskLevel::Mid,
        RiskLevel::Low,
        RiskLevel::VeryLow,
        RiskLevel::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Maximum => "Maximum",
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Mid => "Mid",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
            Self::None => "None",
        }
    }

    /// Bond/equity split for this level. `Maximum` is accepted during dialog
    /// but has no allocation.
    pub fn recommendation(&self) -> Option<&'static str> {
        match self {
            Self::None => Some("100% bonds (AGG), 0% equities (SPY)"),
            Self::VeryLow => Some("80% bonds (AGG), 20% equities (SPY)"),
            Self::Low => Some("60% bonds (AGG), 40% equities (SPY)"),
            Self::Mid => Some("40% bonds (AGG), 60% equities (SPY)"),
            Self::High => Some("20% bonds (AGG), 80% equities (SPY)"),
            Self::VeryHigh => Some("0% bonds (AGG), 100% equities (SPY)"),
            Self::Maximum => Option::None,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.label() == value)
            .ok_or_else(|| UnknownRiskLevel(value.to_owned()))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dialog management and fulfillment for the portfolio recommendation intent.
#[derive(Clone, Debug, Default)]
pub struct RecommendPortfolio {
    validator: Validator,
}

impl RecommendPortfolio {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    fn on_dialog(&self, request: &IntentRequest) -> DialogResponse {
        let result = self.validator.validate(&SlotInputs::from_slots(request.slots()));

        match result {
            ValidationResult::Valid => delegate(
                request.session_attributes.clone(),
                request.current_intent.slots.clone(),
            ),
            ValidationResult::Invalid { violated_slot, message } => {
                let mut slots = request.slots().clone();
                slots.clear(violated_slot);
                info!(
                    event_name = "dialog.slot.elicited",
                    intent_name = request.intent_name(),
                    slot_to_elicit = %violated_slot,
                    "re-eliciting invalid slot"
                );
                elicit_slot(
                    request.session_attributes.clone(),
                    request.intent_name(),
                    slots,
                    violated_slot,
                    message,
                )
            }
        }
    }

    fn on_fulfillment(&self, request: &IntentRequest) -> Result<DialogResponse, DispatchError> {
        let slots = request.slots();
        let raw_risk_level = slots
            .get(SlotName::RiskLevel)
            .ok_or(DispatchError::MissingSlot { slot: SlotName::RiskLevel })?;
        let recommendation = raw_risk_level
            .parse::<RiskLevel>()
            .ok()
            .and_then(|level| level.recommendation())
            .ok_or_else(|| DispatchError::UnmappedRiskLevel {
                risk_level: raw_risk_level.to_owned(),
            })?;
        let first_name = slots
            .get(SlotName::FirstName)
            .ok_or(DispatchError::MissingSlot { slot: SlotName::FirstName })?;

        info!(
            event_name = "dialog.intent.fulfilled",
            intent_name = request.intent_name(),
            risk_level = raw_risk_level,
            "portfolio recommendation issued"
        );

        Ok(close(
            request.session_attributes.clone(),
            FulfillmentState::Fulfilled,
            Message::plain(format!(
                "{first_name} thank you for your information; based on the risk level you defined, \
                 my recommendation is to choose an investment portfolio with {recommendation}"
            )),
        ))
    }
}

impl IntentHandler for RecommendPortfolio {
    fn intent_name(&self) -> &'static str {
        RECOMMEND_PORTFOLIO
    }

    fn handle(&self, request: &IntentRequest) -> Result<DialogResponse, DispatchError> {
        match request.invocation_source {
            InvocationSource::DialogCodeHook => Ok(self.on_dialog(request)),
            InvocationSource::FulfillmentCodeHook => self.on_fulfillment(request),
        }
    }
}
