//! Request DTOs and mapping into operation inputs.
//!
//! Amounts arrive as integers in minor units (cents), quantities as integer
//! units; ids are plain UUID strings. Responses serialize the domain
//! entities directly.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use timberledger_core::{EntityId, Money, Quantity};
use timberledger_debts::NettingMode;
use timberledger_infra::{CreateOrderRequest, CreateLoanRequest, NettingRequest, ResaleRequest, SellRequest};
use timberledger_items::{ItemId, Unit};
use timberledger_managers::TransferDestination;
use timberledger_orders::{ContainerSpec, OrderId, SaleId};
use timberledger_parties::{LoanSource, ManagerId, PartnerId, SupplierId};

use crate::app::errors;

#[derive(Debug, Deserialize)]
pub struct ContainerBody {
    pub quantity: i64,
    pub cost: Option<i64>,
    pub note: Option<String>,
}

impl ContainerBody {
    pub fn into_spec(self) -> ContainerSpec {
        ContainerSpec {
            quantity: Quantity::from_units(self.quantity),
            cost: self.cost.map(Money::from_minor),
            note: self.note,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NettingBody {
    pub mode: NettingMode,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    pub supplier_id: Uuid,
    pub item_id: Uuid,
    pub number: String,
    pub date: Option<DateTime<Utc>>,
    pub quantity: i64,
    pub price_per_unit: i64,
    #[serde(default)]
    pub company_funded: bool,
    #[serde(default)]
    pub containers: Vec<ContainerBody>,
    pub unloaded: Option<i64>,
    pub netting: Option<NettingBody>,
}

impl CreateOrderBody {
    pub fn into_request(self) -> CreateOrderRequest {
        CreateOrderRequest {
            supplier_id: SupplierId::new(EntityId::from_uuid(self.supplier_id)),
            item_id: ItemId::new(EntityId::from_uuid(self.item_id)),
            number: self.number,
            order_date: self.date.unwrap_or_else(Utc::now),
            quantity: Quantity::from_units(self.quantity),
            price_per_unit: Money::from_minor(self.price_per_unit),
            company_funded: self.company_funded,
            containers: self
                .containers
                .into_iter()
                .map(ContainerBody::into_spec)
                .collect(),
            unloaded: self.unloaded.map(Quantity::from_units),
            netting: self.netting.map(|n| NettingRequest {
                mode: n.mode,
                quantity: Quantity::from_units(n.quantity),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PayLoanBody {
    pub containers: Vec<ContainerBody>,
}

#[derive(Debug, Deserialize)]
pub struct PayTransportationBody {
    pub cost: i64,
    pub container_indices: Vec<u32>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PayCustomsBody {
    pub cost: i64,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SellBody {
    pub quantity: i64,
    pub unit_price: i64,
    pub buyer: String,
    pub date: Option<DateTime<Utc>>,
    pub manager_id: Option<Uuid>,
}

impl SellBody {
    pub fn into_request(self, order_id: OrderId) -> SellRequest {
        SellRequest {
            order_id,
            quantity: Quantity::from_units(self.quantity),
            unit_price: Money::from_minor(self.unit_price),
            buyer: self.buyer,
            date: self.date.unwrap_or_else(Utc::now),
            manager_id: self
                .manager_id
                .map(|id| ManagerId::new(EntityId::from_uuid(id))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IncreaseValueBody {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateLoanBody {
    /// Lender. Omit and set `from_administrator` for administrator money.
    pub partner_id: Option<Uuid>,
    #[serde(default)]
    pub from_administrator: bool,
    pub amount: i64,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl CreateLoanBody {
    pub fn into_request(self) -> Result<CreateLoanRequest, axum::response::Response> {
        let source = match (self.partner_id, self.from_administrator) {
            (Some(id), _) => LoanSource::Partner(PartnerId::new(EntityId::from_uuid(id))),
            (None, true) => LoanSource::Administrator,
            (None, false) => {
                return Err(errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "either partner_id or from_administrator is required",
                ))
            }
        };
        Ok(CreateLoanRequest {
            source,
            amount: Money::from_minor(self.amount),
            loan_date: self.date,
            description: self.description.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RepayLoanBody {
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct ResaleBody {
    pub sale_id: Uuid,
    pub quantity: i64,
    pub unit_price: i64,
    pub buyer: String,
    pub date: Option<DateTime<Utc>>,
}

impl ResaleBody {
    pub fn into_request(self, manager_id: ManagerId) -> ResaleRequest {
        ResaleRequest {
            manager_id,
            sale_id: SaleId::new(EntityId::from_uuid(self.sale_id)),
            quantity: Quantity::from_units(self.quantity),
            unit_price: Money::from_minor(self.unit_price),
            buyer: self.buyer,
            date: self.date.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RequestTransferBody {
    pub manager_id: Uuid,
    pub destination: DestinationBody,
    pub amount: i64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum DestinationBody {
    Company,
    Partner(Uuid),
}

impl DestinationBody {
    pub fn into_destination(self) -> TransferDestination {
        match self {
            DestinationBody::Company => TransferDestination::Company,
            DestinationBody::Partner(id) => {
                TransferDestination::Partner(PartnerId::new(EntityId::from_uuid(id)))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransferDecisionBody {
    pub approver: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TakeMoneyBody {
    pub amount: i64,
    pub description: Option<String>,
    pub approver: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateNamedBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateManagerBody {
    pub name: String,
    pub partner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub name: String,
    pub unit: Unit,
}
