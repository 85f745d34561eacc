use axum::{routing::get, Router};

pub mod audit;
pub mod debts;
pub mod items;
pub mod ledger;
pub mod loans;
pub mod managers;
pub mod orders;
pub mod partners;
pub mod suppliers;
pub mod system;
pub mod transfers;

/// Router for every business endpoint (one nested router per domain area).
pub fn router() -> Router {
    Router::new()
        .route("/balance", get(ledger::balance))
        .nest("/orders", orders::router())
        .nest("/loans", loans::router())
        .nest("/debts", debts::router())
        .nest("/managers", managers::router())
        .nest("/transfers", transfers::router())
        .nest("/partners", partners::router())
        .nest("/suppliers", suppliers::router())
        .nest("/items", items::router())
        .nest("/audit", audit::router())
}
