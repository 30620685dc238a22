use std::collections::BTreeMap;

use tracing::warn;

use crate::dialog::{DialogResponse, IntentRequest};
use crate::errors::DispatchError;
use crate::intents::RecommendPortfolio;
use crate::validation::Validator;

pub trait IntentHandler: Send + Sync {
    fn intent_name(&self) -> &'static str;
    fn handle(&self, request: &IntentRequest) -> Result<DialogResponse, DispatchError>;
}

/// Routes a request to the handler registered for its intent name.
pub struct IntentRouter {
    handlers: BTreeMap<&'static str, Box<dyn IntentHandler>>,
}

impl IntentRouter {
    pub fn empty() -> Self {
        Self { handlers: BTreeMap::new() }
    }

    /// Router with every intent this bot supports.
    pub fn new(validator: Validator) -> Self {
        let mut router = Self::empty();
        router.register(RecommendPortfolio::new(validator));
        router
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: IntentHandler + 'static,
    {
        self.handlers.insert(handler.intent_name(), Box::new(handler));
    }

    pub fn intents(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&self, request: &IntentRequest) -> Result<DialogResponse, DispatchError> {
        let intent_name = request.intent_name();
        let Some(handler) = self.handlers.get(intent_name) else {
            warn!(
                event_name = "dialog.intent.unsupported",
                intent_name,
                "no handler registered for intent"
            );
            return Err(DispatchError::UnsupportedIntent { intent_name: intent_name.to_owned() });
        };

        handler.handle(request)
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{IntentHandler, IntentRouter};
    use crate::dialog::{
        delegate, DialogResponse, IntentRequest, InvocationSource, SlotName, Slots,
    };
    use crate::errors::DispatchError;

    #[test]
    fn default_router_serves_recommend_portfolio_only() {
        let router = IntentRouter::default();
        assert_eq!(router.intents().collect::<Vec<_>>(), ["RecommendPortfolio"]);

        let response = router
            .dispatch(
                &IntentRequest::new("RecommendPortfolio", InvocationSource::DialogCodeHook)
                    .with_slots(Slots::new().with(SlotName::FirstName, "Jo")),
            )
            .expect("known intent");
        assert_eq!(response.dialog_action.kind(), "Delegate");
    }

    #[test]
    fn unknown_intent_is_unsupported() {
        let error = IntentRouter::default()
            .dispatch(&IntentRequest::new("Unknown", InvocationSource::DialogCodeHook))
            .expect_err("must reject");

        assert_eq!(error, DispatchError::UnsupportedIntent { intent_name: "Unknown".to_owned() });
        assert_eq!(error.to_string(), "Intent with name Unknown not supported");
    }

    #[test]
    fn intent_names_are_case_sensitive() {
        let result = IntentRouter::default()
            .dispatch(&IntentRequest::new("recommendportfolio", InvocationSource::DialogCodeHook));
        assert!(matches!(result, Err(DispatchError::UnsupportedIntent { .. })));
    }

    #[test]
    fn registered_handlers_receive_their_requests() {
        #[derive(Default)]
        struct RecordingHandler {
            calls: Mutex<Vec<String>>,
        }

        impl IntentHandler for RecordingHandler {
            fn intent_name(&self) -> &'static str {
                "CheckBalance"
            }

            fn handle(&self, request: &IntentRequest) -> Result<DialogResponse, DispatchError> {
                self.calls.lock().expect("lock").push(request.intent_name().to_owned());
                Ok(delegate(None, Some(request.slots().clone())))
            }
        }

        let mut router = IntentRouter::default();
        router.register(RecordingHandler::default());
        assert_eq!(router.len(), 2);

        router
            .dispatch(&IntentRequest::new("CheckBalance", InvocationSource::FulfillmentCodeHook))
            .expect("registered intent");
        router
            .dispatch(&IntentRequest::new("RecommendPortfolio", InvocationSource::DialogCodeHook))
            .expect("default intent");
    }
}
