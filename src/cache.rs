//! Query-result cache.

use crate::{orders::Order, products::Product};

/// Explicit result cache with one slot per query identity and wholesale
/// invalidation, replacing the implicit framework cache of the original
/// page model.
///
/// Only successful payloads are stored. Failures are never cached, so a
/// section that errored is retried on the next render pass without pressing
/// refresh. There is no finer-grained invalidation: [`clear`](Self::clear)
/// drops both slots at once.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    products: Option<Vec<Product>>,
    orders: Option<Vec<Order>>,
}

impl QueryCache {
    /// Empty cache; the first render pass fetches both queries live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached inventory rows, if the inventory query succeeded before.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }

    /// Cached order rows, if the history query succeeded before.
    #[must_use]
    pub fn orders(&self) -> Option<&[Order]> {
        self.orders.as_deref()
    }

    /// Store a successful inventory payload.
    pub fn store_products(&mut self, rows: Vec<Product>) {
        self.products = Some(rows);
    }

    /// Store a successful order payload.
    pub fn store_orders(&mut self, rows: Vec<Order>) {
        self.orders = Some(rows);
    }

    /// Drop every cached result. The next render pass re-issues both
    /// queries against the live database.
    pub fn clear(&mut self) {
        self.products = None;
        self.orders = None;
    }
}

#[cfg(test)]
mod tests {
    use super::QueryCache;
    use crate::products::Product;

    fn widget() -> Product {
        Product {
            sku: "A1".to_string(),
            name: "Widget".to_string(),
            stock: 5,
        }
    }

    #[test]
    fn starts_empty() {
        let cache = QueryCache::new();

        assert_eq!(cache.products(), None);
        assert_eq!(cache.orders(), None);
    }

    #[test]
    fn stores_and_clears_both_slots() {
        let mut cache = QueryCache::new();

        cache.store_products(vec![widget()]);
        cache.store_orders(vec![]);
        assert_eq!(cache.products(), Some(&[widget()][..]));
        assert_eq!(cache.orders(), Some(&[][..]));

        cache.clear();
        assert_eq!(cache.products(), None);
        assert_eq!(cache.orders(), None);
    }

    #[test]
    fn empty_payloads_still_count_as_cached() {
        let mut cache = QueryCache::new();

        cache.store_products(vec![]);

        assert_eq!(cache.products(), Some(&[][..]));
    }
}
