//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartLinesRepository,
        orders::{
            checkout::{plan_checkout, shipping_address},
            data::PlaceOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    lines_repository: PgOrderLinesRepository,
    cart_lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            lines_repository: PgOrderLinesRepository::new(),
            cart_lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Convert the user's cart into a committed order.
    ///
    /// Every step, including reading the placed order back, runs in one
    /// transaction; any early return drops it and rolls back whatever was
    /// already written.
    async fn checkout(
        &self,
        user: UserUuid,
        order: OrderUuid,
        shipping_address: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .cart_lines_repository
            .lock_cart_for_checkout(&mut tx, user)
            .await?;

        let plan = plan_checkout(cart)?;

        let created = self
            .orders_repository
            .create_order(&mut tx, order, user, plan.total, shipping_address)
            .await?;

        for (position, line) in (0_u32..).zip(plan.lines.iter()) {
            self.lines_repository
                .create_order_line(&mut tx, created.uuid, position, line)
                .await?;

            let decremented = self
                .products_repository
                .apply_stock_delta(&mut tx, line.product_uuid, -i64::from(line.quantity))
                .await?;

            if decremented.is_none() {
                return Err(OrdersServiceError::InsufficientStock {
                    product_uuid: line.product_uuid,
                    product_name: line.product_name.clone(),
                    requested: line.quantity,
                    available: line.stock,
                });
            }
        }

        let cleared = self.cart_lines_repository.clear_cart(&mut tx, user).await?;

        let mut placed = self
            .orders_repository
            .get_order(&mut tx, user, created.uuid)
            .await?;

        let mut lines = self
            .lines_repository
            .get_order_lines(&mut tx, &[placed.uuid])
            .await?;

        placed.lines = lines.remove(&placed.uuid).unwrap_or_default();

        tx.commit().await?;

        debug!(order_uuid = %placed.uuid, cleared, "cart converted to order");

        Ok(placed)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        request: PlaceOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let address = shipping_address(request.shipping_address.as_deref())?;
        let order = request.uuid.unwrap_or_default();

        let order = self.checkout(user, order, &address).await?;

        info!(
            order_uuid = %order.uuid,
            user_uuid = %user,
            total = order.total,
            lines = order.lines.len(),
            "placed order"
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, user, order).await?;

        let mut lines = self
            .lines_repository
            .get_order_lines(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        order.lines = lines.remove(&order.uuid).unwrap_or_default();

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut lines = self
            .lines_repository
            .get_order_lines(&mut tx, &uuids)
            .await?;

        tx.commit().await?;

        for order in &mut orders {
            order.lines = lines.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
/// Order placement and history.
pub trait OrdersService: Send + Sync {
    /// Place an order from the user's cart.
    ///
    /// Atomically checks stock under row locks, writes the order and its lines,
    /// decrements stock and empties the cart. Nothing is written when any step
    /// fails.
    async fn place_order(
        &self,
        user: UserUuid,
        request: PlaceOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve one of the user's orders with its lines.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// All of the user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
