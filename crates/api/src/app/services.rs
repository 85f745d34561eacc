//! Infrastructure wiring for the HTTP layer.

use std::sync::Arc;

use timberledger_audit::InMemoryAuditTrail;
use timberledger_infra::{Store, TradeOps};

/// Everything the route handlers need, built once at startup.
pub struct AppServices {
    pub ops: TradeOps,
}

pub fn build_services() -> AppServices {
    let store = Arc::new(Store::new());
    let audit = Arc::new(InMemoryAuditTrail::new());
    AppServices {
        ops: TradeOps::new(store, audit),
    }
}
