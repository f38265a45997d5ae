//! Routes Data

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use smallvec::SmallVec;

use crate::domain::{
    carriers::records::CarrierId, routes::records::RouteUuid, shipments::records::ShipmentId,
};

/// New Route Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    pub uuid: RouteUuid,
    pub carrier_id: CarrierId,
    pub shipment_ids: SmallVec<[ShipmentId; 8]>,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub notes: Option<String>,
}

/// Inclusive range of calendar days, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// First and last instant covered by the range: `start` at midnight and
    /// `end` at 23:59:59.999.
    pub fn bounds(&self) -> Result<(Timestamp, Timestamp), jiff::Error> {
        let first = self.start.to_zoned(TimeZone::UTC)?.timestamp();

        let last = self
            .end
            .at(23, 59, 59, 999_000_000)
            .to_zoned(TimeZone::UTC)?
            .timestamp();

        Ok((first, last))
    }
}
