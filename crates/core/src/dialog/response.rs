use serde::{Deserialize, Serialize};

use crate::dialog::request::SessionAttributes;
use crate::dialog::slots::{SlotName, Slots};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

impl Message {
    pub fn plain(content: impl Into<String>) -> Self {
        Self { content_type: ContentType::PlainText, content: content.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogAction {
    #[serde(rename_all = "camelCase")]
    ElicitSlot { intent_name: String, slots: Slots, slot_to_elicit: SlotName, message: Message },
    Delegate { slots: Option<Slots> },
    #[serde(rename_all = "camelCase")]
    Close { fulfillment_state: FulfillmentState, message: Message },
}

impl DialogAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ElicitSlot { .. } => "ElicitSlot",
            Self::Delegate { .. } => "Delegate",
            Self::Close { .. } => "Close",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_attributes: Option<SessionAttributes>,
    pub dialog_action: DialogAction,
}

pub fn elicit_slot(
    session_attributes: Option<SessionAttributes>,
    intent_name: impl Into<String>,
    slots: Slots,
    slot_to_elicit: SlotName,
    message: Message,
) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::ElicitSlot {
            intent_name: intent_name.into(),
            slots,
            slot_to_elicit,
            message,
        },
    }
}

pub fn delegate(
    session_attributes: Option<SessionAttributes>,
    slots: Option<Slots>,
) -> DialogResponse {
    DialogResponse { session_attributes, dialog_action: DialogAction::Delegate { slots } }
}

pub fn close(
    session_attributes: Option<SessionAttributes>,
    fulfillment_state: FulfillmentState,
    message: Message,
) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::Close { fulfillment_state, message },
    }
}
