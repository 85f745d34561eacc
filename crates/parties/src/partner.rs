use serde::{Deserialize, Serialize};

use timberledger_core::{Entity, EntityId};

/// Partner identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartnerId(pub EntityId);

impl PartnerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PartnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Party a loan is owed to / owed by.
///
/// The company side of every loan is implicit; this names the other side.
/// `Administrator` is the company's own pseudo-counterparty: money parked
/// there flows straight into the general balance. It is a tagged variant,
/// not a reserved id, so it cannot collide with a real partner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum LoanSource {
    Partner(PartnerId),
    Administrator,
}

impl LoanSource {
    pub fn partner_id(&self) -> Option<PartnerId> {
        match self {
            LoanSource::Partner(id) => Some(*id),
            LoanSource::Administrator => None,
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, LoanSource::Administrator)
    }
}

/// Entity: a trading partner the company lends to or borrows from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
}

impl Partner {
    pub fn new(id: PartnerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Partner {
    type Id = PartnerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
