use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Slots collected by the `RecommendPortfolio` intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotName {
    FirstName,
    Age,
    InvestmentAmount,
    RiskLevel,
}

impl SlotName {
    pub const ALL: [SlotName; 4] =
        [SlotName::FirstName, SlotName::Age, SlotName::InvestmentAmount, SlotName::RiskLevel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::Age => "age",
            Self::InvestmentAmount => "investmentAmount",
            Self::RiskLevel => "riskLevel",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot bag as sent by the interpreter. Keys outside [`SlotName`] are kept so
/// the bag can be handed back untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(BTreeMap<String, Option<String>>);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn from_map(map: BTreeMap<String, Option<String>>) -> Self {
        Self(map)
    }

    pub fn with(mut self, slot: SlotName, value: impl Into<String>) -> Self {
        self.0.insert(slot.as_str().to_owned(), Some(value.into()));
        self
    }

    pub fn get(&self, slot: SlotName) -> Option<&str> {
        self.0.get(slot.as_str()).and_then(|value| value.as_deref())
    }

    pub fn contains(&self, slot: SlotName) -> bool {
        self.0.contains_key(slot.as_str())
    }

    /// Sets the slot to absent. The key stays in the bag so the interpreter
    /// sees an explicit `null` for it.
    pub fn clear(&mut self, slot: SlotName) {
        self.0.insert(slot.as_str().to_owned(), None);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
