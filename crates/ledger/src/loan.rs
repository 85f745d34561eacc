use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberledger_core::{DomainError, DomainResult, Entity, EntityId, Money};
use timberledger_parties::{LoanSource, ManagerId};

/// Loan identifier. UUIDv7, so id order is creation order (FIFO walks).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoanId(pub EntityId);

impl LoanId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LoanId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: cash owed between the company and a counterparty.
///
/// Invariants: `amount >= 0`; once `is_paid` the loan is terminal and
/// `amount` never changes again. A partial payment lowers `amount` and keeps
/// `is_paid = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub source: LoanSource,
    /// Order this loan funded, if any. Pay-loan's balance guard excludes the
    /// order's own funding loan through this reference.
    pub order_ref: Option<EntityId>,
    /// Manager who owes this loan, set when it originates in the manager
    /// sub-ledger (a manager-linked sale or a resale). Settlement walks for
    /// a take or an approved transfer select on this, not on `source`:
    /// a partner-less manager shares `LoanSource::Administrator` with seed
    /// capital and funding loans that are not theirs to settle.
    #[serde(default)]
    pub manager_ref: Option<ManagerId>,
    pub amount: Money,
    pub is_paid: bool,
    pub loan_date: Option<DateTime<Utc>>,
    pub description: String,
}

impl Loan {
    pub fn new(
        id: LoanId,
        source: LoanSource,
        amount: Money,
        order_ref: Option<EntityId>,
        loan_date: Option<DateTime<Utc>>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        if amount.is_negative() {
            return Err(DomainError::validation("loan amount must be non-negative"));
        }
        Ok(Self {
            id,
            source,
            order_ref,
            manager_ref: None,
            amount,
            is_paid: amount.is_zero(),
            loan_date,
            description: description.into(),
        })
    }

    /// Marks `manager` as the debtor on this loan.
    pub fn owed_by(mut self, manager: ManagerId) -> Self {
        self.manager_ref = Some(manager);
        self
    }

    /// Repay `amount` against this loan.
    ///
    /// A payment covering the full remaining amount closes the loan
    /// (`is_paid = true`, terminal); anything less just lowers `amount`.
    pub fn repay(&mut self, amount: Money) -> DomainResult<()> {
        if self.is_paid {
            return Err(DomainError::conflict("loan is already paid"));
        }
        if amount.is_negative() || amount.is_zero() {
            return Err(DomainError::validation("repayment must be positive"));
        }
        if amount > self.amount {
            return Err(DomainError::validation(format!(
                "repayment {amount} exceeds outstanding amount {}",
                self.amount
            )));
        }
        self.amount = self.amount.checked_sub(amount)?;
        if self.amount.is_zero() {
            self.is_paid = true;
        }
        Ok(())
    }

    /// Absorb up to `amount` into this loan, returning what was absorbed.
    ///
    /// Settlement-walk variant of [`repay`](Self::repay): never overshoots,
    /// paid loans absorb nothing.
    pub fn absorb(&mut self, amount: Money) -> DomainResult<Money> {
        if self.is_paid || amount.is_zero() || amount.is_negative() {
            return Ok(Money::ZERO);
        }
        let taken = if amount > self.amount {
            self.amount
        } else {
            amount
        };
        self.repay(taken)?;
        Ok(taken)
    }

    /// Increase the outstanding amount (e.g. a `loan`-status order's value
    /// was increased after creation).
    pub fn increase(&mut self, amount: Money) -> DomainResult<()> {
        if self.is_paid {
            return Err(DomainError::conflict("loan is already paid"));
        }
        if amount.is_negative() || amount.is_zero() {
            return Err(DomainError::validation("increase must be positive"));
        }
        self.amount = self.amount.checked_add(amount)?;
        Ok(())
    }
}

impl Entity for Loan {
    type Id = LoanId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(amount: i64) -> Loan {
        Loan::new(
            LoanId::new(EntityId::new()),
            LoanSource::Administrator,
            Money::from_minor(amount),
            None,
            None,
            "test loan",
        )
        .unwrap()
    }

    #[test]
    fn partial_repayment_lowers_amount_and_stays_open() {
        let mut l = loan(15_000);
        l.repay(Money::from_minor(10_000)).unwrap();
        assert_eq!(l.amount, Money::from_minor(5_000));
        assert!(!l.is_paid);
    }

    #[test]
    fn full_repayment_is_terminal() {
        let mut l = loan(15_000);
        l.repay(Money::from_minor(15_000)).unwrap();
        assert!(l.is_paid);
        assert_eq!(l.amount, Money::ZERO);

        let err = l.repay(Money::from_minor(1)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn overpayment_is_rejected() {
        let mut l = loan(100);
        let err = l.repay(Money::from_minor(101)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(l.amount, Money::from_minor(100));
    }

    #[test]
    fn absorb_never_overshoots() {
        let mut l = loan(100);
        let taken = l.absorb(Money::from_minor(250)).unwrap();
        assert_eq!(taken, Money::from_minor(100));
        assert!(l.is_paid);

        let more = l.absorb(Money::from_minor(50)).unwrap();
        assert_eq!(more, Money::ZERO);
    }

    #[test]
    fn owed_by_records_the_debtor() {
        let manager = ManagerId::new(EntityId::new());
        let l = loan(500).owed_by(manager);
        assert_eq!(l.manager_ref, Some(manager));
        assert_eq!(loan(500).manager_ref, None);
    }

    #[test]
    fn negative_amount_loan_is_rejected() {
        let err = Loan::new(
            LoanId::new(EntityId::new()),
            LoanSource::Administrator,
            Money::from_minor(-1),
            None,
            None,
            "bad",
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
