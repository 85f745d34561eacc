//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a domain entity (orders, loans, debts, ...).
///
/// Domain crates wrap this in their own newtypes (`OrderId`, `LoanId`, ...)
/// so references cannot be mixed up.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(Uuid);

/// Identifier of the actor performing an operation (for the audit trail).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActorId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered), so lexicographic id order equals
            /// creation order. FIFO settlement walks rely on this. Prefer
            /// passing IDs explicitly in tests for determinism.
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(EntityId, "EntityId");
impl_uuid_newtype!(ActorId, "ActorId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_time_ordered() {
        // UUIDv7 embeds a millisecond timestamp in the high bits; ids minted
        // later never sort below ids minted earlier.
        let a = EntityId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = EntityId::new();
        assert!(a < b);
    }

    #[test]
    fn entity_id_round_trips_through_string() {
        let id = EntityId::new();
        let parsed: EntityId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_id_string_is_rejected() {
        let err = "not-a-uuid".parse::<EntityId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
