//! Minor-unit money arithmetic

/// Amount for `quantity` units at `unit_price`, or `None` on overflow.
#[must_use]
pub fn line_amount(quantity: u32, unit_price: u64) -> Option<u64> {
    unit_price.checked_mul(u64::from(quantity))
}

/// Sum of `amounts`, or `None` on overflow.
pub fn sum_amounts(amounts: impl IntoIterator<Item = u64>) -> Option<u64> {
    amounts
        .into_iter()
        .try_fold(0_u64, |total, amount| total.checked_add(amount))
}
