//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        settings: PoolSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, settings)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool))
    }

    /// Wire every service onto an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let db = Db::new(pool.clone());

        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
            users: Arc::new(PgUsersService::new(pool.clone())),
            auth: Arc::new(PgAuthService::new(pool)),
        }
    }
}
