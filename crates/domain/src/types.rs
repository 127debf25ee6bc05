// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The discount mechanics a voucher applies at checkout.
///
/// The type is fixed at creation time and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// A percentage of the order amount, optionally capped.
    Percentage,
    /// A fixed currency amount, never exceeding the order amount.
    FixedAmount,
    /// A configured catalog product granted free of charge.
    FreeItem,
    /// Free shipping. The engine only signals it; shipping cost is external.
    FreeShipping,
    /// A refund credit bound to a specific user identity.
    Refund,
}

impl DiscountType {
    /// The canonical storage representation of this discount type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::FixedAmount => "FIXED_AMOUNT",
            Self::FreeItem => "FREE_ITEM",
            Self::FreeShipping => "FREE_SHIPPING",
            Self::Refund => "REFUND",
        }
    }

    /// Parses the canonical storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PERCENTAGE" => Some(Self::Percentage),
            "FIXED_AMOUNT" => Some(Self::FixedAmount),
            "FREE_ITEM" => Some(Self::FreeItem),
            "FREE_SHIPPING" => Some(Self::FreeShipping),
            "REFUND" => Some(Self::Refund),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted voucher record.
///
/// `used_count` is advanced exclusively by the persistence layer's
/// redemption recording; lifecycle transitions never write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    /// Database-assigned identifier.
    pub voucher_id: i64,
    /// Normalized uppercase code, unique among non-deleted vouchers.
    pub code: String,
    /// Owning organization. `None` means platform-global.
    pub organization_id: Option<String>,
    /// Denormalized organization display name.
    pub organization_name: Option<String>,
    /// The discount mechanics. Immutable after creation.
    pub discount_type: DiscountType,
    /// Percentage in (0, 100] or currency amount > 0, depending on type.
    pub discount_value: Decimal,
    /// Minimum order amount required to redeem.
    pub min_order_amount: Option<Decimal>,
    /// Cap on the computed discount (Percentage only).
    pub max_discount_amount: Option<Decimal>,
    /// When non-empty, the order must contain at least one of these products.
    pub applicable_product_ids: Vec<String>,
    /// When non-empty, the order must contain at least one of these categories.
    pub applicable_category_ids: Vec<String>,
    /// The granted product (FreeItem only).
    pub free_item_product_id: Option<String>,
    /// Optional specific variant of the granted product.
    pub free_item_variant_id: Option<String>,
    /// How many units of the free item are granted.
    pub free_item_quantity: i64,
    /// Overall redemption cap. `None` means unlimited.
    pub usage_limit: Option<i64>,
    /// Per-user redemption cap.
    pub usage_limit_per_user: i64,
    /// Total recorded redemptions. Monotonic.
    pub used_count: i64,
    /// Start of the validity window (inclusive).
    pub valid_from: OffsetDateTime,
    /// End of the validity window. The instant itself still validates.
    pub valid_until: Option<OffsetDateTime>,
    /// Whether the voucher currently accepts redemptions.
    pub is_active: bool,
    /// Soft-delete flag. Terminal; forces `is_active = false`.
    pub is_deleted: bool,
    /// The only user who may redeem this voucher (Refund only).
    pub assigned_to_user_id: Option<String>,
    /// Identifier of the actor who created the voucher.
    pub created_by: String,
    /// Denormalized display name of the creating actor.
    pub created_by_name: Option<String>,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last modification timestamp.
    pub updated_at: OffsetDateTime,
}

impl Voucher {
    /// Builds the redacted summary exposed by validation responses.
    #[must_use]
    pub fn summary(&self) -> VoucherSummary {
        VoucherSummary {
            voucher_id: self.voucher_id,
            code: self.code.clone(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            organization_id: self.organization_id.clone(),
        }
    }
}

/// A voucher that has been validated but not yet persisted.
///
/// Produced by the core `apply_create` transition; the persistence layer
/// assigns the `voucher_id` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    pub code: String,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub max_discount_amount: Option<Decimal>,
    pub applicable_product_ids: Vec<String>,
    pub applicable_category_ids: Vec<String>,
    pub free_item_product_id: Option<String>,
    pub free_item_variant_id: Option<String>,
    pub free_item_quantity: i64,
    pub usage_limit: Option<i64>,
    pub usage_limit_per_user: i64,
    pub used_count: i64,
    pub valid_from: OffsetDateTime,
    pub valid_until: Option<OffsetDateTime>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub assigned_to_user_id: Option<String>,
    pub created_by: String,
    pub created_by_name: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl NewVoucher {
    /// Attaches the database-assigned identifier after insertion.
    #[must_use]
    pub fn with_id(self, voucher_id: i64) -> Voucher {
        Voucher {
            voucher_id,
            code: self.code,
            organization_id: self.organization_id,
            organization_name: self.organization_name,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_amount: self.min_order_amount,
            max_discount_amount: self.max_discount_amount,
            applicable_product_ids: self.applicable_product_ids,
            applicable_category_ids: self.applicable_category_ids,
            free_item_product_id: self.free_item_product_id,
            free_item_variant_id: self.free_item_variant_id,
            free_item_quantity: self.free_item_quantity,
            usage_limit: self.usage_limit,
            usage_limit_per_user: self.usage_limit_per_user,
            used_count: self.used_count,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            assigned_to_user_id: self.assigned_to_user_id,
            created_by: self.created_by,
            created_by_name: self.created_by_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The redacted voucher view returned to checkout callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherSummary {
    pub voucher_id: i64,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub organization_id: Option<String>,
}

/// One line of the order being checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// The catalog product identifier.
    pub product_id: String,
    /// The specific variant in the cart, if the product has variants.
    pub variant_id: Option<String>,
    /// The categories the product belongs to.
    pub category_ids: Vec<String>,
    /// Unit price of the item.
    pub unit_price: Decimal,
    /// Number of units in the cart.
    pub quantity: i64,
}

/// The order-side context a voucher is validated against.
///
/// This is a read-only projection of the caller's cart; the engine never
/// mutates or persists it. `product_ids` and `category_ids` are supplied
/// separately from `items` so a caller can check applicability before a
/// full cart payload exists; `items` carry the prices the discount is
/// computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContext {
    /// The redeeming user, when authenticated.
    pub user_id: Option<String>,
    /// The storefront organization the order is placed against.
    pub organization_id: Option<String>,
    /// The order total the discount is computed from.
    pub order_amount: Decimal,
    /// The products in the order, for applicability checks.
    pub product_ids: Vec<String>,
    /// The categories the ordered products belong to.
    pub category_ids: Vec<String>,
    /// The items in the cart. May be empty when only id lists are known.
    pub items: Vec<CartItem>,
}

impl OrderContext {
    /// Whether the order contains the given product, in the id list or
    /// among the cart items.
    #[must_use]
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
            || self.items.iter().any(|item| item.product_id == product_id)
    }

    /// Whether the order touches the given category, in the id list or
    /// among the cart items.
    #[must_use]
    pub fn contains_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|id| id == category_id)
            || self
                .items
                .iter()
                .any(|item| item.category_ids.iter().any(|c| c == category_id))
    }

    /// Finds a cart item by product, and by variant when one is required.
    ///
    /// With `variant_id = None` any variant of the product matches.
    #[must_use]
    pub fn item_matching(&self, product_id: &str, variant_id: Option<&str>) -> Option<&CartItem> {
        self.items.iter().find(|item| {
            item.product_id == product_id
                && variant_id.is_none_or(|v| item.variant_id.as_deref() == Some(v))
        })
    }
}

/// A sellable variant of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    pub variant_id: String,
    pub price: Decimal,
}

/// The catalog view of a product, as resolved by the caller's lookup.
///
/// The engine never talks to the catalog itself; handlers resolve the
/// configured free-item product and pass it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub product_id: String,
    pub is_deleted: bool,
    /// Price used when the product has no variants.
    pub base_price: Decimal,
    pub variants: Vec<ProductVariant>,
}

impl CatalogProduct {
    /// The cheapest purchasable price of this product.
    #[must_use]
    pub fn lowest_price(&self) -> Decimal {
        self.variants
            .iter()
            .map(|variant| variant.price)
            .min()
            .unwrap_or(self.base_price)
    }

    /// The price of a specific variant, or the cheapest price when no
    /// variant is requested or the requested variant is unknown.
    #[must_use]
    pub fn price_for_variant(&self, variant_id: Option<&str>) -> Decimal {
        variant_id
            .and_then(|v| {
                self.variants
                    .iter()
                    .find(|variant| variant.variant_id == v)
                    .map(|variant| variant.price)
            })
            .unwrap_or_else(|| self.lowest_price())
    }
}
