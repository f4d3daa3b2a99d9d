//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{encode_count, try_get_amount, try_get_count},
    domain::{
        carts::records::{CartLineRecord, CartLineUuid, LockedCartLine},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    money::line_amount,
};

const GET_CART_LINES_SQL: &str = include_str!("sql/get_cart_lines.sql");
const GET_CART_LINE_SQL: &str = include_str!("sql/get_cart_line.sql");
const ADD_CART_LINE_SQL: &str = include_str!("sql/add_cart_line.sql");
const UPDATE_CART_LINE_SQL: &str = include_str!("sql/update_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("sql/delete_cart_line.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const DELETE_LINES_FOR_PRODUCT_SQL: &str = include_str!("sql/delete_lines_for_product.sql");
const LOCK_CART_FOR_CHECKOUT_SQL: &str = include_str!("sql/lock_cart_for_checkout.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(line.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a line, or add `quantity` to the user's existing line for the product.
    ///
    /// Returns the line's UUID and its resulting quantity.
    pub(crate) async fn add_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(CartLineUuid, u32), sqlx::Error> {
        let row = query(ADD_CART_LINE_SQL)
            .bind(CartLineUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(encode_count(quantity)?)
            .fetch_one(&mut **tx)
            .await?;

        Ok((
            CartLineUuid::from_uuid(row.try_get("uuid")?),
            try_get_count(&row, "quantity")?,
        ))
    }

    pub(crate) async fn update_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(line.into_uuid())
            .bind(encode_count(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(user.into_uuid())
            .bind(line.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_lines_for_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINES_FOR_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Read the user's cart, locking its lines and their products until the
    /// transaction ends.
    ///
    /// Products are locked in UUID order so concurrent checkouts sharing
    /// products cannot deadlock on each other.
    pub(crate) async fn lock_cart_for_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<LockedCartLine>, sqlx::Error> {
        query_as::<Postgres, LockedCartLine>(LOCK_CART_FOR_CHECKOUT_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price = try_get_amount(row, "unit_price")?;
        let quantity = try_get_count(row, "quantity")?;

        let subtotal =
            line_amount(quantity, unit_price).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "unit_price".to_string(),
                source: "line subtotal overflows".into(),
            })?;

        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price,
            stock: try_get_count(row, "stock")?,
            quantity,
            subtotal,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LockedCartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            stock: try_get_count(row, "stock")?,
        })
    }
}
