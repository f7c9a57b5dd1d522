//! SQLite-backed customer store.
//!
//! One table, `customer`, keyed by an `AUTOINCREMENT` id so deleted ids are
//! never handed out again. Length limits and email uniqueness are enforced by
//! the schema itself; violations reported by SQLite are mapped to
//! `DomainError::ConstraintViolation`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use mechanic_shop_core::DomainError;
use mechanic_shop_customers::{Customer, CustomerChanges, CustomerId, NewCustomer};

use super::r#trait::{CustomerStore, StoreError, StoreResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customer (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50)  NOT NULL CHECK (length(first_name) <= 50),
    last_name  VARCHAR(50)  NOT NULL CHECK (length(last_name) <= 50),
    email      VARCHAR(120) NOT NULL UNIQUE CHECK (length(email) <= 120),
    phone      VARCHAR(20)  CHECK (phone IS NULL OR length(phone) <= 20),
    address    VARCHAR(200) CHECK (address IS NULL OR length(address) <= 200)
)
"#;

const SELECT_BY_ID: &str =
    "SELECT id, first_name, last_name, email, phone, address FROM customer WHERE id = ?";

const SELECT_ALL: &str =
    "SELECT id, first_name, last_name, email, phone, address FROM customer ORDER BY id";

/// SQLite customer store over a sqlx connection pool.
///
/// The pool is `Send + Sync` and cheap to clone; every operation checks out a
/// connection for the duration of one statement (or one transaction for
/// `update`).
#[derive(Debug, Clone)]
pub struct SqliteCustomerStore {
    pool: SqlitePool,
}

impl SqliteCustomerStore {
    /// Connection acquire timeout.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Open (creating if missing) the database at `url` and ensure the schema exists.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Self::ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        info!(url = %url, max_connections, "customer store connected");
        Ok(store)
    }

    /// A private in-memory database.
    ///
    /// Every `sqlite::memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `customer` table if it does not exist. Idempotent.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_customer(row: &SqliteRow) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: CustomerId(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
    })
}

/// Map a failed INSERT/UPDATE to a constraint violation where SQLite reports one.
fn write_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::duplicate_email(email);
        }
        if db_err.is_check_violation() {
            return StoreError::Domain(DomainError::constraint(db_err.message().to_string()));
        }
    }
    StoreError::from(err)
}

#[async_trait]
impl CustomerStore for SqliteCustomerStore {
    async fn insert(&self, customer: NewCustomer) -> StoreResult<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customer (first_name, last_name, email, phone, address)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &customer.email))?;

        let stored = customer.with_id(CustomerId(result.last_insert_rowid()));
        debug!(customer_id = %stored.id, "customer row inserted");
        Ok(stored)
    }

    async fn get_by_id(&self, id: CustomerId) -> StoreResult<Customer> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_customer(&row)?),
            None => Err(StoreError::not_found()),
        }
    }

    async fn list_all(&self) -> StoreResult<Vec<Customer>> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(row_to_customer)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> StoreResult<Customer> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await?;
        let existing = match row {
            Some(row) => row_to_customer(&row)?,
            None => return Err(StoreError::not_found()),
        };

        let merged = changes.apply_to(&existing);
        sqlx::query(
            r#"
            UPDATE customer
            SET first_name = ?, last_name = ?, email = ?, phone = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.email)
        .bind(&merged.phone)
        .bind(&merged.address)
        .bind(id.get())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, &merged.email))?;

        tx.commit().await?;
        debug!(customer_id = %id, "customer row updated");
        Ok(merged)
    }

    async fn delete(&self, id: CustomerId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found());
        }
        debug!(customer_id = %id, "customer row deleted");
        Ok(())
    }
}
