//! FIFO settlement of a counterparty's unpaid loans.

use timberledger_core::{DomainResult, Money};

use crate::loan::Loan;

/// Walk `loans` in the order given (callers supply oldest-created-first) and
/// absorb up to `amount` into them, reducing or closing each in turn.
///
/// Returns the unabsorbed remainder — money left over once every loan in the
/// walk is cleared. The caller decides what the remainder becomes (for an
/// admin "take", a fresh administrator-sourced loan).
pub fn settle_loans_fifo<'a>(
    loans: impl IntoIterator<Item = &'a mut Loan>,
    amount: Money,
) -> DomainResult<Money> {
    let mut remaining = amount;

    for loan in loans {
        if remaining.is_zero() {
            break;
        }
        let taken = loan.absorb(remaining)?;
        remaining = remaining.checked_sub(taken)?;
    }

    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::LoanId;
    use proptest::prelude::*;
    use timberledger_core::EntityId;
    use timberledger_parties::LoanSource;

    fn loans(amounts: &[i64]) -> Vec<Loan> {
        amounts
            .iter()
            .map(|a| {
                Loan::new(
                    LoanId::new(EntityId::new()),
                    LoanSource::Administrator,
                    Money::from_minor(*a),
                    None,
                    None,
                    "loan",
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn settlement_walks_oldest_first() {
        let mut ls = loans(&[100, 200, 300]);
        let rest = settle_loans_fifo(ls.iter_mut(), Money::from_minor(250)).unwrap();

        assert_eq!(rest, Money::ZERO);
        assert!(ls[0].is_paid);
        assert_eq!(ls[1].amount, Money::from_minor(50));
        assert!(!ls[1].is_paid);
        assert_eq!(ls[2].amount, Money::from_minor(300));
    }

    #[test]
    fn remainder_is_returned_when_all_loans_clear() {
        let mut ls = loans(&[100, 50]);
        let rest = settle_loans_fifo(ls.iter_mut(), Money::from_minor(500)).unwrap();

        assert_eq!(rest, Money::from_minor(350));
        assert!(ls.iter().all(|l| l.is_paid));
    }

    #[test]
    fn paid_loans_are_skipped() {
        let mut ls = loans(&[100, 100]);
        ls[0].is_paid = true;
        ls[0].amount = Money::ZERO;

        let rest = settle_loans_fifo(ls.iter_mut(), Money::from_minor(60)).unwrap();
        assert_eq!(rest, Money::ZERO);
        assert_eq!(ls[1].amount, Money::from_minor(40));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: settlement conserves money (absorbed + remainder equals
        /// the input) and never drives any loan negative, and a later loan is
        /// only touched once every earlier loan is fully paid.
        #[test]
        fn fifo_settlement_is_conservative_and_ordered(
            amounts in prop::collection::vec(0i64..10_000, 1..12),
            take in 0i64..100_000,
        ) {
            let mut ls = loans(&amounts);
            let before: i64 = ls.iter().map(|l| l.amount.minor()).sum();

            let rest = settle_loans_fifo(ls.iter_mut(), Money::from_minor(take)).unwrap();
            let after: i64 = ls.iter().map(|l| l.amount.minor()).sum();

            prop_assert!(rest.minor() >= 0);
            prop_assert_eq!(before - after, take - rest.minor());
            prop_assert!(ls.iter().all(|l| l.amount.minor() >= 0));

            // Ordering: an unpaid loan may only be followed by untouched ones.
            let first_open = ls.iter().position(|l| !l.is_paid);
            if let Some(i) = first_open {
                for (j, l) in ls.iter().enumerate().skip(i + 1) {
                    prop_assert_eq!(
                        l.amount.minor(), amounts[j],
                        "loan {} was touched before loan {} was cleared", j, i
                    );
                }
            }
        }
    }
}
