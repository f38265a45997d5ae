//! Route Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariantError, carriers::records::CarrierRecord, shipments::records::ShipmentRecord,
    },
    ids::{TypedId, TypedUuid},
};

/// Route ID
pub type RouteId = TypedId<RouteRecord>;

/// Route UUID
pub type RouteUuid = TypedUuid<RouteRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "route_status", rename_all = "snake_case")]
pub enum RouteStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Assigned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal routes no longer hold their shipments.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl Display for RouteStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = UnknownVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariantError::new("route status", value))
    }
}

/// Route Record, materialized with its carrier and bound shipments.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub id: RouteId,
    pub uuid: RouteUuid,
    pub carrier: CarrierRecord,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub notes: Option<String>,
    pub status: RouteStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub shipments: Vec<RouteShipmentRecord>,
}

/// A shipment as bound to a route.
///
/// `released_at` is set once the route reached a terminal status.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteShipmentRecord {
    pub shipment: ShipmentRecord,
    pub assigned_at: Timestamp,
    pub released_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        let terminal: Vec<_> = RouteStatus::ALL
            .into_iter()
            .filter(|status| status.is_terminal())
            .collect();

        assert_eq!(terminal, vec![RouteStatus::Completed, RouteStatus::Cancelled]);
    }

    #[test]
    fn status_parsing_uses_snake_case() {
        assert_eq!("in_progress".parse(), Ok(RouteStatus::InProgress));
        assert!("InProgress".parse::<RouteStatus>().is_err(), "labels are snake_case");
    }
}
