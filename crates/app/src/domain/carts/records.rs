//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// A user's cart: every line whose product is still listed.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLineRecord>,

    /// Sum of line subtotals at current prices.
    pub total: u64,
}

/// Cart Line Record
///
/// Product name, price and stock are read live from the catalog.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub stock: u32,
    pub quantity: u32,
    pub subtotal: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line read under row lock while placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedCartLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,

    /// Stock as of the lock; no other transaction can change it until commit.
    pub stock: u32,
}
