//! Dialog fulfillment for the portfolio recommendation bot.
//!
//! Each invocation is one conversational turn handed over by the upstream
//! interpreter. The flow is:
//!
//! ```text
//! event → handler::lambda_handler → IntentRouter → RecommendPortfolio
//!                                                    ├─ DialogCodeHook:      Validator → ElicitSlot | Delegate
//!                                                    └─ FulfillmentCodeHook: RiskLevel table → Close
//! ```
//!
//! Nothing is persisted between turns; session attributes are echoed back as
//! received.

pub mod config;
pub mod dialog;
pub mod dispatch;
pub mod errors;
pub mod handler;
pub mod intents;
pub mod validation;

pub use dialog::{
    DialogAction, DialogResponse, FulfillmentState, IntentRequest, InvocationSource, Message,
    SlotName, Slots,
};
pub use dispatch::{IntentHandler, IntentRouter};
pub use errors::{DispatchError, HandlerError};
pub use handler::{handle_request, lambda_handler, InvocationContext};
pub use intents::{RecommendPortfolio, RiskLevel};
pub use validation::{NumericParsePolicy, SlotInputs, ValidationResult, Validator};
