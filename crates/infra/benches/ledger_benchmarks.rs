//! Benchmarks for the ledger hot path: the balance is recomputed from the
//! loan and expense tables on every read, so its cost scales with ledger
//! size. These measure that recompute against a naive cached counter to
//! keep the "derive, don't cache" decision honest.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::Utc;
use timberledger_core::{EntityId, Money};
use timberledger_ledger::{balance, Expense, ExpenseId, ExpenseType, Loan, LoanId};
use timberledger_parties::LoanSource;

fn make_ledger(rows: usize) -> (Vec<Loan>, Vec<Expense>) {
    let loans = (0..rows)
        .map(|i| {
            Loan::new(
                LoanId::new(EntityId::new()),
                LoanSource::Administrator,
                Money::from_minor(1_000 + i as i64),
                None,
                None,
                "bench loan",
            )
            .unwrap()
        })
        .collect();
    let expenses = (0..rows)
        .map(|i| {
            // Alternate outflows and income so both signs are exercised.
            let amount = if i % 2 == 0 { 700 } else { -300 };
            Expense::new(
                ExpenseId::new(EntityId::new()),
                Money::from_minor(amount),
                "bench expense",
                ExpenseType::Other,
                None,
                Utc::now(),
            )
        })
        .collect();
    (loans, expenses)
}

fn bench_balance_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_recompute");
    for rows in [100usize, 1_000, 10_000] {
        let (loans, expenses) = make_ledger(rows);
        group.throughput(Throughput::Elements(rows as u64 * 2));
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &rows,
            |b, _| {
                b.iter(|| {
                    let total =
                        balance(black_box(loans.iter()), black_box(expenses.iter())).unwrap();
                    black_box(total)
                })
            },
        );
    }
    group.finish();
}

fn bench_cached_counter_baseline(c: &mut Criterion) {
    // What a mutable running total would cost per read, for comparison.
    let cached = Money::from_minor(123_456);
    c.bench_function("balance_cached_counter_read", |b| {
        b.iter(|| black_box(cached))
    });
}

criterion_group!(benches, bench_balance_recompute, bench_cached_counter_baseline);
criterion_main!(benches);
