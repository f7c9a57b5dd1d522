//! Wire JSON <-> Customer mapping.
//!
//! Decoding walks the static field list in declaration order, so errors come
//! back in a stable order. Unknown keys (including `id`) are ignored.

use serde_json::{Value, json};

use mechanic_shop_core::{DomainError, DomainResult, FieldErrors, as_object};

use crate::customer::{
    ADDRESS, Customer, CustomerChanges, EMAIL, FIRST_NAME, LAST_NAME, NewCustomer, PHONE,
};

/// Decode a create body. All required fields must be present and valid.
pub fn decode(body: &Value) -> DomainResult<NewCustomer> {
    let obj = as_object(body)?;
    let mut errors = FieldErrors::new();

    let first_name = FIRST_NAME.read_required(obj, &mut errors);
    let last_name = LAST_NAME.read_required(obj, &mut errors);
    let email = EMAIL.read_required(obj, &mut errors);
    let phone = PHONE.read_present(obj, &mut errors).flatten();
    let address = ADDRESS.read_present(obj, &mut errors).flatten();

    errors.into_result()?;

    let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email) else {
        return Err(DomainError::validation("missing required customer fields"));
    };

    Ok(NewCustomer {
        first_name,
        last_name,
        email,
        phone,
        address,
    })
}

/// Decode an update body. Only fields present in the body are validated.
pub fn decode_changes(body: &Value) -> DomainResult<CustomerChanges> {
    let obj = as_object(body)?;
    let mut errors = FieldErrors::new();

    let changes = CustomerChanges {
        first_name: FIRST_NAME.read_present(obj, &mut errors).flatten(),
        last_name: LAST_NAME.read_present(obj, &mut errors).flatten(),
        email: EMAIL.read_present(obj, &mut errors).flatten(),
        phone: PHONE.read_present(obj, &mut errors),
        address: ADDRESS.read_present(obj, &mut errors),
    };

    errors.into_result()?;
    Ok(changes)
}

/// Decode an update body and merge it over `existing`.
pub fn decode_partial(body: &Value, existing: &Customer) -> DomainResult<Customer> {
    Ok(decode_changes(body)?.apply_to(existing))
}

pub fn encode(customer: &Customer) -> Value {
    json!({
        "id": customer.id,
        "first_name": customer.first_name,
        "last_name": customer.last_name,
        "email": customer.email,
        "phone": customer.phone,
        "address": customer.address,
    })
}

pub fn encode_many(customers: &[Customer]) -> Value {
    Value::Array(customers.iter().map(encode).collect())
}
