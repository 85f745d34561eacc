use serde::{Deserialize, Serialize};

use timberledger_core::{Entity, EntityId};

use crate::partner::{LoanSource, PartnerId};

/// Manager identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ManagerId(pub EntityId);

impl ManagerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ManagerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: a manager who buys warehouse stock from the company for resale.
///
/// A manager may carry a partner identity; loans created by their resales are
/// owed by that partner. Without one, proceeds fall back to the
/// administrator pseudo-partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
    pub partner_id: Option<PartnerId>,
}

impl Manager {
    pub fn new(id: ManagerId, name: impl Into<String>, partner_id: Option<PartnerId>) -> Self {
        Self {
            id,
            name: name.into(),
            partner_id,
        }
    }

    /// The loan source that receives this manager's debts to the company.
    pub fn loan_source(&self) -> LoanSource {
        match self.partner_id {
            Some(id) => LoanSource::Partner(id),
            None => LoanSource::Administrator,
        }
    }
}

impl Entity for Manager {
    type Id = ManagerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_without_partner_falls_back_to_administrator() {
        let manager = Manager::new(ManagerId::new(EntityId::new()), "Oleg", None);
        assert_eq!(manager.loan_source(), LoanSource::Administrator);
    }

    #[test]
    fn manager_with_partner_identity_uses_it() {
        let partner = PartnerId::new(EntityId::new());
        let manager = Manager::new(ManagerId::new(EntityId::new()), "Oleg", Some(partner));
        assert_eq!(manager.loan_source(), LoanSource::Partner(partner));
    }
}
