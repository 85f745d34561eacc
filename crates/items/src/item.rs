use serde::{Deserialize, Serialize};

use timberledger_core::{Entity, EntityId};

/// Item identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub EntityId);

impl ItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Unit of measurement an order's quantity is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    CubicMeters,
    Pieces,
    Tons,
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Unit::CubicMeters => "m3",
            Unit::Pieces => "pcs",
            Unit::Tons => "t",
        };
        f.write_str(s)
    }
}

/// Entity: a traded wood assortment (e.g. pine saw logs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit: Unit,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id,
            name: name.into(),
            unit,
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
