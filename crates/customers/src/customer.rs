use core::str::FromStr;

use serde::{Deserialize, Serialize};

use mechanic_shop_core::FieldSpec;

pub const FIRST_NAME: FieldSpec = FieldSpec::required("first_name", 50);
pub const LAST_NAME: FieldSpec = FieldSpec::required("last_name", 50);
pub const EMAIL: FieldSpec = FieldSpec::required("email", 120);
pub const PHONE: FieldSpec = FieldSpec::optional("phone", 20);
pub const ADDRESS: FieldSpec = FieldSpec::optional("address", 200);

/// Every writable Customer field, in wire/declaration order.
///
/// `id` is not listed: it is assigned by storage and never read from input.
pub const CUSTOMER_FIELDS: [FieldSpec; 5] = [FIRST_NAME, LAST_NAME, EMAIL, PHONE, ADDRESS];

/// Storage-assigned customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CustomerId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// A persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A customer that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    /// Attach the id the storage layer assigned.
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// A partial update.
///
/// `None` leaves a field untouched. For optional fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }

    /// Merge these changes over `existing`. The id never changes.
    pub fn apply_to(&self, existing: &Customer) -> Customer {
        Customer {
            id: existing.id,
            first_name: pick(&self.first_name, &existing.first_name),
            last_name: pick(&self.last_name, &existing.last_name),
            email: pick(&self.email, &existing.email),
            phone: pick(&self.phone, &existing.phone),
            address: pick(&self.address, &existing.address),
        }
    }
}

fn pick<T: Clone>(change: &Option<T>, current: &T) -> T {
    change.as_ref().unwrap_or(current).clone()
}
