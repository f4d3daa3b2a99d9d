//! Per-test PostgreSQL databases
//!
//! One PostgreSQL container is started for the whole test binary. Every
//! [`TestDb`] creates its own database inside it with migrations applied, so
//! services can commit normally and tests never observe each other's rows.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

use crate::database::MIGRATOR;

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases queued for dropping once their `TestDb` goes away.
static DROP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name(DB_USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn start_drop_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER.get_or_init(start_container).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
        .unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/{database}")
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect(&server_url("postgres").await).await?;

    query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// An isolated, migrated database that is dropped in the background on `Drop`.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_SENDER.get() {
            let _queued = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROP_SENDER.get_or_init(start_drop_task).await;

        // Simple-format UUIDs are lowercase hex, always a valid identifier suffix.
        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        let mut conn = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&server_url(&name).await)
            .await
            .expect("Failed to create pool for test database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_databases_are_migrated() -> TestResult {
        let test_db = TestDb::new().await;

        let tables: i64 = query_scalar(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('users', 'products', 'cart_lines', 'orders', 'order_lines')",
        )
        .fetch_one(test_db.pool())
        .await?;

        assert_eq!(tables, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_databases_are_isolated() -> TestResult {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        query("CREATE TABLE only_in_first (id INTEGER)")
            .execute(first.pool())
            .await?;

        let result = query("SELECT count(*) FROM only_in_first")
            .fetch_one(second.pool())
            .await;

        assert!(result.is_err(), "second database must not see the table");

        Ok(())
    }
}
