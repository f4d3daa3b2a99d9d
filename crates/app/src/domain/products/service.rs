//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartLinesRepository,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    cart_lines_repository: PgCartLinesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            cart_lines_repository: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        let removed_lines = self
            .cart_lines_repository
            .delete_lines_for_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        debug!(%product, removed_lines, "deleted product");

        Ok(())
    }

    async fn adjust_stock(
        &self,
        product: ProductUuid,
        delta: i64,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(adjusted) = self
            .repository
            .apply_stock_delta(&mut tx, product, delta)
            .await?
        else {
            // Distinguish a missing product from a rejected delta.
            self.repository.get_product(&mut tx, product).await?;

            return Err(if delta < 0 {
                ProductsServiceError::InsufficientStock
            } else {
                ProductsServiceError::InvalidData
            });
        };

        tx.commit().await?;

        Ok(adjusted)
    }
}

#[automock]
#[async_trait]
/// Catalog operations.
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching the filter, newest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates the given fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product and removes it from every cart.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Applies a signed change to a product's stock.
    ///
    /// A negative delta larger than the current stock fails with
    /// [`ProductsServiceError::InsufficientStock`] and leaves the stock unchanged.
    async fn adjust_stock(
        &self,
        product: ProductUuid,
        delta: i64,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::carts::{CartsService, data::NewCartLine},
        test::{TestContext, helpers::create_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let created = ctx
            .products
            .create_product(NewProduct {
                uuid,
                name: "Kettle".to_string(),
                description: Some("Stainless steel".to_string()),
                category: Some("kitchen".to_string()),
                price: 39_99,
                stock: 7,
            })
            .await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Kettle");
        assert_eq!(created.category.as_deref(), Some("kitchen"));
        assert_eq!(created.price, 39_99);
        assert_eq!(created.stock, 7);
        assert!(created.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_blank_name_returns_missing_required_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "  ".to_string(),
                description: None,
                category: None,
                price: 100,
                stock: 1,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mug", 8_00, 3).await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: product.uuid,
                name: "Mug again".to_string(),
                description: None,
                category: None,
                price: 8_00,
                stock: 3,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_category_and_search() -> TestResult {
        let ctx = TestContext::new().await;

        for (name, category) in [
            ("Blue Teapot", "kitchen"),
            ("Red Teapot", "kitchen"),
            ("Desk Lamp", "office"),
        ] {
            ctx.products
                .create_product(NewProduct {
                    uuid: ProductUuid::new(),
                    name: name.to_string(),
                    description: None,
                    category: Some(category.to_string()),
                    price: 10_00,
                    stock: 1,
                })
                .await?;
        }

        let kitchen = ctx
            .products
            .list_products(ProductFilter {
                category: Some("kitchen".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(kitchen.len(), 2);

        let teapots = ctx
            .products
            .list_products(ProductFilter {
                search: Some("red tea".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(teapots.len(), 1);
        assert_eq!(teapots.first().map(|p| p.name.as_str()), Some("Red Teapot"));

        let paged = ctx
            .products
            .list_products(ProductFilter {
                limit: 1,
                offset: 1,
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(paged.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_wildcard_characters_literally() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["Mug 500ml", "Gift card 50% off", "Tea_Towel", "Tea Towel"] {
            create_product(&ctx, name, 5_00, 1).await?;
        }

        for (search, expected) in [("50%", "Gift card 50% off"), ("tea_", "Tea_Towel")] {
            let found = ctx
                .products
                .list_products(ProductFilter {
                    search: Some(search.to_string()),
                    ..ProductFilter::default()
                })
                .await?;

            let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();

            assert_eq!(names, vec![expected], "search {search:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn update_product_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Lamp", 20_00, 4).await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    price: Some(25_00),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Lamp");
        assert_eq!(updated.price, 25_00);
        assert_eq!(updated.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_hides_it_and_clears_cart_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Chair", 45_00, 2).await?;

        ctx.carts
            .add_line(
                ctx.user_uuid,
                NewCartLine {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert!(cart.lines.is_empty(), "cart should no longer hold the product");

        let again = ctx.products.delete_product(product.uuid).await;

        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adjust_stock_applies_signed_delta() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Pen", 1_50, 5).await?;

        let restocked = ctx.products.adjust_stock(product.uuid, 10).await?;
        assert_eq!(restocked.stock, 15);

        let sold = ctx.products.adjust_stock(product.uuid, -15).await?;
        assert_eq!(sold.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_stock_below_zero_returns_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Pencil", 50, 2).await?;

        let result = ctx.products.adjust_stock(product.uuid, -3).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );

        let unchanged = ctx.products.get_product(product.uuid).await?;
        assert_eq!(unchanged.stock, 2);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_stock_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.adjust_stock(ProductUuid::new(), -1).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
