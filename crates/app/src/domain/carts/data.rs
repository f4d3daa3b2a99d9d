//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Line Data
///
/// Adding a product already in the cart increases that line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
