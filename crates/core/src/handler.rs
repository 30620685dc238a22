use serde_json::Value;
use tracing::{error, info};

use crate::dialog::{DialogResponse, IntentRequest};
use crate::dispatch::IntentRouter;
use crate::errors::HandlerError;

/// Per-invocation metadata supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationContext {
    pub correlation_id: String,
}

impl InvocationContext {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self { correlation_id: correlation_id.into() }
    }
}

/// Entry point: decodes the event, routes it, and encodes the response.
pub fn lambda_handler(
    event: Value,
    context: &InvocationContext,
    router: &IntentRouter,
) -> Result<Value, HandlerError> {
    let request = serde_json::from_value::<IntentRequest>(event).map_err(|source| {
        error!(
            event_name = "dialog.request.rejected",
            correlation_id = %context.correlation_id,
            error = %source,
            "event could not be decoded"
        );
        HandlerError::InvalidEvent(source.to_string())
    })?;

    let response = handle_request(&request, context, router)?;
    serde_json::to_value(&response).map_err(|source| HandlerError::Encode(source.to_string()))
}

pub fn handle_request(
    request: &IntentRequest,
    context: &InvocationContext,
    router: &IntentRouter,
) -> Result<DialogResponse, HandlerError> {
    info!(
        event_name = "dialog.request.received",
        correlation_id = %context.correlation_id,
        intent_name = request.intent_name(),
        invocation_source = %request.invocation_source,
        "intent request received"
    );

    let response = router.dispatch(request).map_err(|source| {
        error!(
            event_name = "dialog.request.failed",
            correlation_id = %context.correlation_id,
            intent_name = request.intent_name(),
            error = %source,
            "intent request failed"
        );
        HandlerError::from(source)
    })?;

    info!(
        event_name = "dialog.response.sent",
        correlation_id = %context.correlation_id,
        intent_name = request.intent_name(),
        dialog_action = response.dialog_action.kind(),
        "dialog response produced"
    );

    Ok(response)
}
