// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CatalogProduct, DiscountType, OrderContext, Voucher};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to 2 decimal places, half-up.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the discount a voucher grants for an order.
///
/// Pure; assumes the voucher already passed the validation pipeline.
/// The result is non-negative and rounded to 2 decimal places.
///
/// Per type:
/// - Percentage: `order_amount * value / 100`, clamped to
///   `max_discount_amount` when set.
/// - `FixedAmount` / Refund: `min(value, order_amount)`.
/// - `FreeShipping`: zero. The discount is a signal; shipping cost is
///   settled outside the engine.
/// - `FreeItem`: the matching cart item's price times the granted
///   quantity (capped at the in-cart quantity). Without a matching cart
///   item the catalog price is used for the full granted quantity. The
///   two paths can price differently; both are intentional.
#[must_use]
pub fn calculate_discount(
    voucher: &Voucher,
    order: &OrderContext,
    free_item_product: Option<&CatalogProduct>,
) -> Decimal {
    let raw: Decimal = match voucher.discount_type {
        DiscountType::Percentage => {
            let mut discount: Decimal =
                order.order_amount * voucher.discount_value / Decimal::ONE_HUNDRED;
            if let Some(cap) = voucher.max_discount_amount {
                discount = discount.min(cap);
            }
            discount
        }
        DiscountType::FixedAmount | DiscountType::Refund => {
            voucher.discount_value.min(order.order_amount)
        }
        DiscountType::FreeShipping => Decimal::ZERO,
        DiscountType::FreeItem => free_item_discount(voucher, order, free_item_product),
    };

    round_currency(raw.max(Decimal::ZERO))
}

fn free_item_discount(
    voucher: &Voucher,
    order: &OrderContext,
    free_item_product: Option<&CatalogProduct>,
) -> Decimal {
    let Some(product_id) = voucher.free_item_product_id.as_deref() else {
        return Decimal::ZERO;
    };
    let quantity: i64 = voucher.free_item_quantity.max(1);

    if let Some(item) = order.item_matching(product_id, voucher.free_item_variant_id.as_deref()) {
        return item.unit_price * Decimal::from(quantity.min(item.quantity));
    }

    // Catalog fallback: the item is granted even though it is not in the
    // cart, priced from the catalog.
    free_item_product.map_or(Decimal::ZERO, |product| {
        product.price_for_variant(voucher.free_item_variant_id.as_deref()) * Decimal::from(quantity)
    })
}
