use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dialog::slots::Slots;

/// Opaque attributes owned by the caller; echoed back unchanged.
pub type SessionAttributes = Map<String, Value>;

static NO_SLOTS: Slots = Slots::from_map(BTreeMap::new());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
}

impl InvocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DialogCodeHook => "DialogCodeHook",
            Self::FulfillmentCodeHook => "FulfillmentCodeHook",
        }
    }
}

impl fmt::Display for InvocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentIntent {
    pub name: String,
    /// `None` when the interpreter sent `null` or no bag at all.
    #[serde(default)]
    pub slots: Option<Slots>,
}

/// One turn of the conversation as handed over by the interpreter. Fields the
/// interpreter adds beyond these (`userId`, `inputTranscript`, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub current_intent: CurrentIntent,
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
}

impl IntentRequest {
    pub fn new(intent_name: impl Into<String>, invocation_source: InvocationSource) -> Self {
        Self {
            current_intent: CurrentIntent { name: intent_name.into(), slots: None },
            invocation_source,
            session_attributes: None,
        }
    }

    pub fn with_slots(mut self, slots: Slots) -> Self {
        self.current_intent.slots = Some(slots);
        self
    }

    pub fn with_session_attributes(mut self, attributes: SessionAttributes) -> Self {
        self.session_attributes = Some(attributes);
        self
    }

    pub fn intent_name(&self) -> &str {
        &self.current_intent.name
    }

    /// Collected slots; an absent bag reads as empty.
    pub fn slots(&self) -> &Slots {
        self.current_intent.slots.as_ref().unwrap_or(&NO_SLOTS)
    }
}
