//! Products Data

use crate::domain::products::records::ProductUuid;

/// Default page size for product listings.
pub const DEFAULT_PRODUCTS_LIMIT: u32 = 50;

/// Upper bound on the product listing page size.
pub const MAX_PRODUCTS_LIMIT: u32 = 200;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub stock: u32,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
}

/// Product listing filter
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,

    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,

    pub limit: u32,
    pub offset: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            limit: DEFAULT_PRODUCTS_LIMIT,
            offset: 0,
        }
    }
}

impl ProductFilter {
    /// Page size clamped to `1..=MAX_PRODUCTS_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_PRODUCTS_LIMIT)
    }
}
