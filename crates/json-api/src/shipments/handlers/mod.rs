//! Shipment Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod history;
pub(crate) mod index;
pub(crate) mod update_status;
