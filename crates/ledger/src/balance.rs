//! Derived cash balance.
//!
//! The balance is always recomputed from the ledger rows — there is no
//! cached running total to drift out of sync with the tables.

use timberledger_core::{DomainError, DomainResult, Money};

use crate::expense::Expense;
use crate::loan::Loan;

/// Available cash derived from the ledger:
///
/// `balance = Σ(amount of unpaid loans)
///          + Σ(|amount| of expenses with amount < 0)
///          − Σ(amount of expenses with amount >= 0)`
///
/// Accumulates in i128; a ledger large enough to overflow i64 at the end is
/// reported as a validation error rather than wrapped.
pub fn balance<'a>(
    loans: impl IntoIterator<Item = &'a Loan>,
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> DomainResult<Money> {
    let mut total: i128 = 0;

    for loan in loans {
        if !loan.is_paid {
            total += loan.amount.minor() as i128;
        }
    }

    for expense in expenses {
        // Negative expenses are income; both signs end up subtracted, which
        // is exactly |amount| added for inflows.
        total -= expense.amount().minor() as i128;
    }

    i64::try_from(total)
        .map(Money::from_minor)
        .map_err(|_| DomainError::validation("ledger balance overflows"))
}

/// Guard for every cash-spending transition: `cost <= available`.
///
/// Reports required vs. available on failure so the caller can surface both.
pub fn ensure_funds(cost: Money, available: Money) -> DomainResult<()> {
    if cost > available {
        return Err(DomainError::insufficient_funds(cost, available));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{ExpenseId, ExpenseType};
    use crate::loan::LoanId;
    use chrono::Utc;
    use proptest::prelude::*;
    use timberledger_core::EntityId;
    use timberledger_parties::LoanSource;

    fn loan(amount: i64, paid: bool) -> Loan {
        let mut l = Loan::new(
            LoanId::new(EntityId::new()),
            LoanSource::Administrator,
            Money::from_minor(amount),
            None,
            None,
            "loan",
        )
        .unwrap();
        if paid {
            l.is_paid = true;
        }
        l
    }

    fn expense(amount: i64) -> Expense {
        Expense::new(
            ExpenseId::new(EntityId::new()),
            Money::from_minor(amount),
            "expense",
            ExpenseType::Other,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn balance_follows_the_ledger_formula() {
        let loans = vec![loan(10_000, false), loan(7_000, true)];
        let expenses = vec![expense(4_000), expense(-2_500)];

        // 10_000 (unpaid loan) + 2_500 (income) - 4_000 (spend) = 8_500
        let b = balance(loans.iter(), expenses.iter()).unwrap();
        assert_eq!(b, Money::from_minor(8_500));
    }

    #[test]
    fn paid_loans_do_not_count() {
        let loans = vec![loan(10_000, true)];
        let b = balance(loans.iter(), [].iter()).unwrap();
        assert_eq!(b, Money::ZERO);
    }

    #[test]
    fn ensure_funds_reports_required_and_available() {
        let err = ensure_funds(Money::from_minor(1_200_000), Money::from_minor(1_000_000))
            .unwrap_err();
        match err {
            DomainError::InsufficientFunds {
                required,
                available,
            } => {
                assert_eq!(required, Money::from_minor(1_200_000));
                assert_eq!(available, Money::from_minor(1_000_000));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn exact_cover_is_sufficient() {
        assert!(ensure_funds(Money::from_minor(500), Money::from_minor(500)).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the recomputed balance always equals a running total
        /// tracked incrementally alongside the same entries (no drift).
        #[test]
        fn recomputed_balance_matches_incremental_total(
            loan_amounts in prop::collection::vec(0i64..1_000_000, 0..20),
            expense_amounts in prop::collection::vec(-1_000_000i64..1_000_000, 0..20),
        ) {
            let mut running: i64 = 0;
            let mut loans = Vec::new();
            let mut expenses = Vec::new();

            for a in loan_amounts {
                // Zero-amount loans are born paid and contribute nothing.
                let l = loan(a, false);
                if !l.is_paid {
                    running += a;
                }
                loans.push(l);
            }
            for a in expense_amounts {
                running -= a;
                expenses.push(expense(a));
            }

            let b = balance(loans.iter(), expenses.iter()).unwrap();
            prop_assert_eq!(b, Money::from_minor(running));
        }
    }
}
