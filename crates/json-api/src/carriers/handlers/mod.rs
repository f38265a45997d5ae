//! Carrier Handlers

use salvo::prelude::StatusError;

use crate::validation;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

pub(super) fn validate_name(name: &str) -> Result<(), StatusError> {
    validation::length_between("name", name, 2, 100)
}

pub(super) fn validate_phone(phone: &str) -> Result<(), StatusError> {
    validation::phone_number("phone", phone)
}

pub(super) fn validate_vehicle(
    model: Option<&str>,
    plate: Option<&str>,
) -> Result<(), StatusError> {
    if let Some(model) = model {
        validation::length_between("vehicle_model", model, 1, 100)?;
    }

    if let Some(plate) = plate {
        validation::length_between("vehicle_plate", plate, 1, 10)?;
    }

    Ok(())
}
