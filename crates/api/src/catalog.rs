// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product catalog access.
//!
//! The voucher engine does not own product data. Handlers that need to
//! resolve free-item products or per-variant prices go through this
//! trait; deployments implement it against the marketplace's catalog
//! service.

use voucher_domain::CatalogProduct;

/// Errors raised by a product catalog implementation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog backend could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    /// The catalog returned a malformed product record.
    #[error("invalid product record for '{product_id}': {message}")]
    InvalidRecord {
        /// The product the record belongs to.
        product_id: String,
        /// What was wrong with it.
        message: String,
    },
}

/// Read access to the product catalog.
pub trait ProductCatalog {
    /// Looks up a product by identifier.
    ///
    /// Returns `Ok(None)` for products the catalog has never seen;
    /// deleted products are returned with their `is_deleted` flag set
    /// so callers can distinguish "gone" from "never existed".
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    fn product(&self, product_id: &str) -> Result<Option<CatalogProduct>, CatalogError>;
}
