//! Customer storage boundary.
//!
//! Handlers receive an explicit `Arc<dyn CustomerStore>`; which backend sits
//! behind it is decided once at startup.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryCustomerStore;
pub use r#trait::{CustomerStore, StoreError, StoreResult};
pub use sqlite::SqliteCustomerStore;

/// Behavioral checks every `CustomerStore` implementation must pass.
#[cfg(test)]
pub(crate) mod conformance {
    use mechanic_shop_core::DomainError;
    use mechanic_shop_customers::{CustomerChanges, CustomerId, NewCustomer};

    use super::{CustomerStore, StoreError};

    pub fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            phone: None,
            address: Some("12 Garage Rd".to_string()),
        }
    }

    fn assert_constraint(err: StoreError) {
        assert!(
            matches!(err, StoreError::Domain(DomainError::ConstraintViolation(_))),
            "expected ConstraintViolation, got {err:?}"
        );
    }

    pub async fn run_all(store: &dyn CustomerStore) {
        list_on_empty_store_is_empty(store).await;
        insert_then_get_returns_same_record(store).await;
        duplicate_email_is_rejected_and_original_kept(store).await;
        update_changes_only_given_fields(store).await;
        update_to_taken_email_is_rejected(store).await;
        update_keeping_own_email_succeeds(store).await;
        missing_ids_are_not_found(store).await;
        delete_is_hard_and_not_idempotent(store).await;
        list_returns_records_in_insertion_order(store).await;
    }

    async fn list_on_empty_store_is_empty(store: &dyn CustomerStore) {
        assert!(store.list_all().await.unwrap().is_empty());
    }

    async fn insert_then_get_returns_same_record(store: &dyn CustomerStore) {
        let new = new_customer("get@example.com");
        let stored = store.insert(new.clone()).await.unwrap();

        let fetched = store.get_by_id(stored.id).await.unwrap();
        assert_eq!(fetched, new.with_id(stored.id));
    }

    async fn duplicate_email_is_rejected_and_original_kept(store: &dyn CustomerStore) {
        let original = store.insert(new_customer("dup@example.com")).await.unwrap();

        let mut again = new_customer("dup@example.com");
        again.first_name = "Imposter".to_string();
        let err = store.insert(again).await.unwrap_err();
        assert_constraint(err);

        assert_eq!(store.get_by_id(original.id).await.unwrap(), original);
    }

    async fn update_changes_only_given_fields(store: &dyn CustomerStore) {
        let before = store.insert(new_customer("phone@example.com")).await.unwrap();
        let changes = CustomerChanges {
            phone: Some(Some("555-1234".to_string())),
            ..Default::default()
        };

        let after = store.update(before.id, changes).await.unwrap();
        assert_eq!(after.phone.as_deref(), Some("555-1234"));
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(after.last_name, before.last_name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.address, before.address);
        assert_eq!(store.get_by_id(before.id).await.unwrap(), after);
    }

    async fn update_to_taken_email_is_rejected(store: &dyn CustomerStore) {
        store.insert(new_customer("taken@example.com")).await.unwrap();
        let other = store.insert(new_customer("other@example.com")).await.unwrap();

        let changes = CustomerChanges {
            email: Some("taken@example.com".to_string()),
            ..Default::default()
        };
        assert_constraint(store.update(other.id, changes).await.unwrap_err());
        assert_eq!(store.get_by_id(other.id).await.unwrap(), other);
    }

    async fn update_keeping_own_email_succeeds(store: &dyn CustomerStore) {
        let c = store.insert(new_customer("same@example.com")).await.unwrap();
        let changes = CustomerChanges {
            email: Some("same@example.com".to_string()),
            last_name: Some("Park".to_string()),
            ..Default::default()
        };
        let updated = store.update(c.id, changes).await.unwrap();
        assert_eq!(updated.last_name, "Park");
        assert_eq!(updated.id, c.id);
    }

    async fn missing_ids_are_not_found(store: &dyn CustomerStore) {
        let missing = CustomerId(999_999);
        assert!(store.get_by_id(missing).await.unwrap_err().is_not_found());
        assert!(store.delete(missing).await.unwrap_err().is_not_found());
        assert!(
            store
                .update(missing, CustomerChanges::default())
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    async fn delete_is_hard_and_not_idempotent(store: &dyn CustomerStore) {
        let c = store.insert(new_customer("gone@example.com")).await.unwrap();
        store.delete(c.id).await.unwrap();

        assert!(store.get_by_id(c.id).await.unwrap_err().is_not_found());
        assert!(store.delete(c.id).await.unwrap_err().is_not_found());

        // The email is free again once the row is gone.
        store.insert(new_customer("gone@example.com")).await.unwrap();
    }

    async fn list_returns_records_in_insertion_order(store: &dyn CustomerStore) {
        let all = store.list_all().await.unwrap();
        assert!(!all.is_empty());
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }
}
