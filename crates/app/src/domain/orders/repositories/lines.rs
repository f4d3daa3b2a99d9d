//! Order Lines Repository

use rustc_hash::FxHashMap;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};
use uuid::Uuid;

use crate::{
    database::{encode_amount, encode_count, try_get_amount, try_get_count},
    domain::{
        carts::records::LockedCartLine,
        orders::records::{OrderLineRecord, OrderLineUuid, OrderUuid},
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_LINE_SQL: &str = include_str!("../sql/create_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("../sql/get_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Copy a locked cart line into the order at `position`.
    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: u32,
        line: &LockedCartLine,
    ) -> Result<OrderLineUuid, sqlx::Error> {
        let uuid = OrderLineUuid::new();

        query(CREATE_ORDER_LINE_SQL)
            .bind(uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(encode_count(position)?)
            .bind(line.product_uuid.into_uuid())
            .bind(encode_count(line.quantity)?)
            .bind(encode_amount(line.unit_price)?)
            .execute(&mut **tx)
            .await?;

        Ok(uuid)
    }

    /// Lines of each given order, in position order.
    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<FxHashMap<OrderUuid, Vec<OrderLineRecord>>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        let rows = query(GET_ORDER_LINES_SQL)
            .bind(order_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for row in rows {
            let order = OrderUuid::from_uuid(row.try_get("order_uuid")?);

            lines.entry(order).or_default().push(order_line_from_row(&row)?);
        }

        Ok(lines)
    }
}

fn order_line_from_row(row: &PgRow) -> Result<OrderLineRecord, sqlx::Error> {
    Ok(OrderLineRecord {
        uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
        position: try_get_count(row, "position")?,
        product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        product_name: row.try_get("product_name")?,
        quantity: try_get_count(row, "quantity")?,
        unit_price: try_get_amount(row, "unit_price")?,
    })
}
