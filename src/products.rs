//! Products

use serde::Deserialize;

/// One row of the `products` table, restricted to the dashboard projection.
///
/// Unique by [`sku`](Self::sku). Stock levels are mutated by the external
/// automation service between renders; this crate never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Stock keeping unit, the external identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Units currently on hand. The source column is signed, so oversold
    /// stock can come back negative.
    pub stock: i64,
}
