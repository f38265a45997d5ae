//! Typed Identifiers
//!
//! Every persisted entity carries two identifiers: a database-assigned
//! sequential id used for joins and internal references, and a UUID used as the
//! public-facing opaque reference. Both are tagged with the record type they
//! belong to so a `ShipmentId` can never be passed where a `CarrierId` is
//! expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use uuid::Uuid;

/// Public-facing UUID tagged with its record type.
pub struct TypedUuid<T>(Uuid, PhantomData<T>);

/// Sequential database id tagged with its record type.
pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedUuid<T> {
    /// Generate a new time-ordered UUID.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypedId<T> {
    pub const fn from_i64(id: i64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }
}

macro_rules! impl_identifier_traits {
    ($name:ident, $inner:ty) => {
        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> Debug for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                Debug::fmt(&self.0, f)
            }
        }

        impl<T> Display for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                Display::fmt(&self.0, f)
            }
        }

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<T> Eq for $name<T> {}

        impl<T> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl<T> PartialOrd for $name<T> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T> Ord for $name<T> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl<T> From<$inner> for $name<T> {
            fn from(value: $inner) -> Self {
                Self(value, PhantomData)
            }
        }

        impl<T> From<$name<T>> for $inner {
            fn from(value: $name<T>) -> Self {
                value.0
            }
        }
    };
}

impl_identifier_traits!(TypedUuid, Uuid);
impl_identifier_traits!(TypedId, i64);
