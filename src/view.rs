//! Render pass: reshaping query results into a page description.
//!
//! A render pass is a pure function of the data source contents and the
//! cache state. It produces a [`DashboardView`] the front end renders
//! without issuing further queries, which keeps the page model testable
//! without a terminal or a network.

use crate::{
    cache::QueryCache,
    client::{DataSource, QueryError},
    orders::{self, Order, OrderRow},
    products::Product,
};

/// Outcome of one dashboard section.
#[derive(Debug)]
pub enum Section<T> {
    /// Rows to render.
    Loaded(T),

    /// The query succeeded but returned nothing.
    Empty,

    /// The query failed; the error stays scoped to this section.
    Failed(QueryError),
}

impl<T> Section<T> {
    /// The rows, when the section loaded.
    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(rows) => Some(rows),
            Self::Empty | Self::Failed(_) => None,
        }
    }
}

/// UI-independent description of one fully rendered dashboard pass.
#[derive(Debug)]
pub struct DashboardView {
    /// Inventory section, row order exactly as returned by the server.
    pub inventory: Section<Vec<Product>>,

    /// Order history section, flattened for display. `Loaded` whenever the
    /// query returned rows, even if every row was skipped.
    pub history: Section<Vec<OrderRow>>,

    /// History rows dropped because their joined product was missing.
    pub skipped_orders: usize,
}

impl DashboardView {
    /// Chart data derived from the inventory section: `(name, stock)` pairs
    /// sorted descending by stock, or `None` when there is nothing to chart
    /// and the placeholder should render instead.
    ///
    /// Negative stock clamps to zero for the bar height only; the table
    /// still shows the raw value.
    #[must_use]
    pub fn chart_bars(&self) -> Option<Vec<(String, u64)>> {
        let products = self.inventory.loaded()?;
        if products.is_empty() {
            return None;
        }

        let mut bars: Vec<(String, u64)> = products
            .iter()
            .map(|product| {
                let height = u64::try_from(product.stock).unwrap_or(0);
                (product.name.clone(), height)
            })
            .collect();

        bars.sort_by(|a, b| b.1.cmp(&a.1));

        Some(bars)
    }
}

/// Execute one render pass: resolve each query through the cache, then
/// reshape the results into a [`DashboardView`].
///
/// The two queries run sequentially, inventory first. A failed query keeps
/// its error scoped to its own section; nothing propagates past it.
pub fn render_pass(source: &dyn DataSource, cache: &mut QueryCache) -> DashboardView {
    let inventory = match cached_products(source, cache) {
        Ok(rows) if rows.is_empty() => Section::Empty,
        Ok(rows) => Section::Loaded(rows),
        Err(err) => {
            tracing::warn!(error = %err, "inventory query failed");
            Section::Failed(err)
        }
    };

    let mut skipped_orders = 0;
    let history = match cached_orders(source, cache) {
        Ok(rows) if rows.is_empty() => Section::Empty,
        Ok(rows) => {
            let (flat, skipped) = orders::flatten_orders(&rows);
            skipped_orders = skipped;
            Section::Loaded(flat)
        }
        Err(err) => {
            tracing::warn!(error = %err, "order history query failed");
            Section::Failed(err)
        }
    };

    DashboardView {
        inventory,
        history,
        skipped_orders,
    }
}

fn cached_products(
    source: &dyn DataSource,
    cache: &mut QueryCache,
) -> Result<Vec<Product>, QueryError> {
    if let Some(rows) = cache.products() {
        return Ok(rows.to_vec());
    }

    let rows = source.fetch_products()?;
    cache.store_products(rows.clone());

    Ok(rows)
}

fn cached_orders(source: &dyn DataSource, cache: &mut QueryCache) -> Result<Vec<Order>, QueryError> {
    if let Some(rows) = cache.orders() {
        return Ok(rows.to_vec());
    }

    let rows = source.fetch_orders()?;
    cache.store_orders(rows.clone());

    Ok(rows)
}
