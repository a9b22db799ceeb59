//! Orders and their flattened display rows.

use jiff::Timestamp;
use serde::Deserialize;

/// Timestamp format used by the history table.
const DATE_FORMAT: &str = "%d.%m.%y %H:%M";

/// Projection of the joined product embedded in an order row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderProduct {
    /// Display name of the referenced product.
    pub name: String,

    /// Stock keeping unit of the referenced product.
    pub sku: String,
}

/// One row of the `orders` query with its embedded product join.
///
/// The join is optional on the wire: a dangling product reference comes back
/// as `null` (or not at all), so the missing-product case is a checked
/// branch instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Creation time as stored by the database.
    pub created_at: Timestamp,

    /// Name of the ordering customer.
    pub customer_name: String,

    /// Ordered quantity.
    pub quantity: i64,

    /// The joined product, when the reference resolves.
    #[serde(default, rename = "products")]
    pub product: Option<OrderProduct>,
}

/// Flattened (order, joined product) pair for tabular display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// [`Order::created_at`] reformatted as `dd.mm.yy HH:MM` (UTC).
    pub date: String,

    /// Customer name, copied verbatim.
    pub customer: String,

    /// Name of the joined product.
    pub product: String,

    /// SKU of the joined product.
    pub sku: String,

    /// Ordered quantity.
    pub quantity: i64,
}

impl OrderRow {
    /// Flatten one order into a display row.
    ///
    /// Returns `None` when the joined product is missing; the caller decides
    /// how to account for the dangling reference.
    #[must_use]
    pub fn flatten(order: &Order) -> Option<Self> {
        let product = order.product.as_ref()?;

        Some(Self {
            date: format_date(order.created_at),
            customer: order.customer_name.clone(),
            product: product.name.clone(),
            sku: product.sku.clone(),
            quantity: order.quantity,
        })
    }
}

/// Flatten an order list, skipping rows whose joined product is missing.
///
/// Skipped rows are logged and counted so the history section can mention
/// them. Surviving rows keep their input order; the query already sorts by
/// `created_at` descending on the server.
#[must_use]
pub fn flatten_orders(orders: &[Order]) -> (Vec<OrderRow>, usize) {
    let mut skipped = 0;

    let rows = orders
        .iter()
        .filter_map(|order| {
            let row = OrderRow::flatten(order);

            if row.is_none() {
                skipped += 1;
                tracing::warn!(
                    customer = %order.customer_name,
                    created_at = %order.created_at,
                    "order row without joined product skipped"
                );
            }

            row
        })
        .collect();

    (rows, skipped)
}

/// Format a timestamp as the history table's `dd.mm.yy HH:MM`.
#[must_use]
pub fn format_date(at: Timestamp) -> String {
    at.strftime(DATE_FORMAT).to_string()
}
