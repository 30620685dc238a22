pub mod request;
pub mod response;
pub mod slots;

pub use request::{CurrentIntent, IntentRequest, InvocationSource, SessionAttributes};
pub use response::{
    close, delegate, elicit_slot, ContentType, DialogAction, DialogResponse, FulfillmentState,
    Message,
};
pub use slots::{SlotName, Slots};
