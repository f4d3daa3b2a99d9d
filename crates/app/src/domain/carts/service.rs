//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartLine,
            errors::CartsServiceError,
            records::{CartLineRecord, CartLineUuid, CartRecord},
            repository::PgCartLinesRepository,
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
    money::sum_amounts,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.lines_repository.get_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        let total = sum_amounts(lines.iter().map(|line| line.subtotal))
            .ok_or(CartsServiceError::TotalOverflow)?;

        Ok(CartRecord {
            user_uuid: user,
            lines,
            total,
        })
    }

    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, line.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        let (line_uuid, quantity) = self
            .lines_repository
            .add_cart_line(&mut tx, user, product.uuid, line.quantity)
            .await?;

        if quantity > product.stock {
            return Err(CartsServiceError::InsufficientStock {
                product_uuid: product.uuid,
                requested: quantity,
                available: product.stock,
            });
        }

        let added = self
            .lines_repository
            .get_cart_line(&mut tx, user, line_uuid)
            .await?;

        tx.commit().await?;

        Ok(added)
    }

    async fn update_line(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let existing = self
            .lines_repository
            .get_cart_line(&mut tx, user, line)
            .await?;

        if quantity > existing.stock {
            return Err(CartsServiceError::InsufficientStock {
                product_uuid: existing.product_uuid,
                requested: quantity,
                available: existing.stock,
            });
        }

        let rows_affected = self
            .lines_repository
            .update_cart_line(&mut tx, user, line, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let updated = self
            .lines_repository
            .get_cart_line(&mut tx, user, line)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .lines_repository
            .delete_cart_line(&mut tx, user, line)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let removed = self.lines_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
/// Per-user shopping cart operations.
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with live prices and totals.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the cart, or increase its quantity if already present.
    ///
    /// Fails with [`CartsServiceError::InsufficientStock`] when the resulting
    /// quantity exceeds the product's stock.
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Set a line's quantity.
    async fn update_line(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Remove a single line.
    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError>;

    /// Remove every line, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, records::ProductUuid},
        test::{
            TestContext,
            helpers::{add_line, create_product, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_empty_returns_no_lines_and_zero_total() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.user_uuid, ctx.user_uuid);
        assert!(cart.lines.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_computes_subtotals_and_total() -> TestResult {
        let ctx = TestContext::new().await;
        let a = create_product(&ctx, "A", 10_00, 5).await?;
        let b = create_product(&ctx, "B", 5_00, 1).await?;

        add_line(&ctx, ctx.user_uuid, a.uuid, 2).await?;
        add_line(&ctx, ctx.user_uuid, b.uuid, 1).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total, 25_00);

        let first = cart.lines.first().ok_or("missing first line")?;
        assert_eq!(first.product_name, "A");
        assert_eq!(first.subtotal, 20_00);

        Ok(())
    }

    #[tokio::test]
    async fn add_line_twice_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Socks", 3_00, 10).await?;

        let first = add_line(&ctx, ctx.user_uuid, product.uuid, 2).await?;
        let second = add_line(&ctx, ctx.user_uuid, product.uuid, 3).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(second.quantity, 5);

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;
        assert_eq!(cart.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_line_beyond_stock_returns_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Vase", 12_00, 2).await?;

        add_line(&ctx, ctx.user_uuid, product.uuid, 2).await?;

        let result = add_line(&ctx, ctx.user_uuid, product.uuid, 1).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    requested: 3,
                    available: 2,
                    ..
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;
        let line = cart.lines.first().ok_or("missing line")?;

        assert_eq!(line.quantity, 2, "rejected add must not change the line");

        Ok(())
    }

    #[tokio::test]
    async fn add_line_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;

        let result = add_line(&ctx, ctx.user_uuid, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_line_zero_quantity_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Cup", 2_00, 4).await?;

        let result = add_line(&ctx, ctx.user_uuid, product.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_line_sets_quantity_within_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Plate", 6_00, 4).await?;
        let line = add_line(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let updated = ctx.carts.update_line(ctx.user_uuid, line.uuid, 4).await?;
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.subtotal, 24_00);

        let result = ctx.carts.update_line(ctx.user_uuid, line.uuid, 5).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn lines_of_other_users_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let other = create_user(&ctx, "other@example.com").await?;
        let product = create_product(&ctx, "Bowl", 4_00, 4).await?;
        let line = add_line(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let update = ctx.carts.update_line(other.uuid, line.uuid, 2).await;

        assert!(
            matches!(update, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {update:?}"
        );

        let remove = ctx.carts.remove_line(other.uuid, line.uuid).await;

        assert!(
            matches!(remove, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {remove:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_line_deletes_only_that_line() -> TestResult {
        let ctx = TestContext::new().await;
        let a = create_product(&ctx, "A", 1_00, 5).await?;
        let b = create_product(&ctx, "B", 2_00, 5).await?;

        let line = add_line(&ctx, ctx.user_uuid, a.uuid, 1).await?;
        add_line(&ctx, ctx.user_uuid, b.uuid, 1).await?;

        ctx.carts.remove_line(ctx.user_uuid, line.uuid).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total, 2_00);

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_removes_every_line() -> TestResult {
        let ctx = TestContext::new().await;
        let a = create_product(&ctx, "A", 1_00, 5).await?;
        let b = create_product(&ctx, "B", 2_00, 5).await?;

        add_line(&ctx, ctx.user_uuid, a.uuid, 1).await?;
        add_line(&ctx, ctx.user_uuid, b.uuid, 2).await?;

        let removed = ctx.carts.clear_cart(ctx.user_uuid).await?;
        assert_eq!(removed, 2);

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;
        assert!(cart.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_hides_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Gone", 1_00, 5).await?;

        add_line(&ctx, ctx.user_uuid, product.uuid, 1).await?;
        ctx.products.delete_product(product.uuid).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;
        assert!(cart.lines.is_empty());

        Ok(())
    }
}
