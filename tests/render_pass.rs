//! Integration tests for the dashboard render pass.

use testresult::TestResult;

use bestellblick::{
    cache::QueryCache,
    client::{MockDataSource, QueryError, StatusCode},
    orders::{Order, OrderProduct, OrderRow},
    products::Product,
    view::{Section, render_pass},
};

fn widget() -> Product {
    Product {
        sku: "A1".to_string(),
        name: "Widget".to_string(),
        stock: 5,
    }
}

fn gadget() -> Product {
    Product {
        sku: "B2".to_string(),
        name: "Gadget".to_string(),
        stock: 12,
    }
}

fn jane_order() -> TestResult<Order> {
    Ok(Order {
        created_at: "2024-01-02T10:30:00Z".parse()?,
        customer_name: "Jane".to_string(),
        quantity: 2,
        product: Some(OrderProduct {
            name: "Widget".to_string(),
            sku: "A1".to_string(),
        }),
    })
}

fn server_error() -> QueryError {
    QueryError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[test]
fn happy_path_reshapes_both_queries() -> TestResult {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .times(1)
        .returning(|| Ok(vec![widget()]));
    let order = jane_order()?;
    source
        .expect_fetch_orders()
        .times(1)
        .returning(move || Ok(vec![order.clone()]));

    let mut cache = QueryCache::new();
    let view = render_pass(&source, &mut cache);

    assert_eq!(view.inventory.loaded(), Some(&vec![widget()]));
    assert_eq!(
        view.history.loaded(),
        Some(&vec![OrderRow {
            date: "02.01.24 10:30".to_string(),
            customer: "Jane".to_string(),
            product: "Widget".to_string(),
            sku: "A1".to_string(),
            quantity: 2,
        }])
    );
    assert_eq!(view.skipped_orders, 0);
    assert_eq!(
        view.chart_bars(),
        Some(vec![("Widget".to_string(), 5)])
    );

    Ok(())
}

#[test]
fn chart_bars_sort_descending_by_stock() -> TestResult {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .returning(|| Ok(vec![widget(), gadget()]));
    source.expect_fetch_orders().returning(|| Ok(vec![]));

    let view = render_pass(&source, &mut QueryCache::new());

    // Table order stays as returned; only the chart reorders.
    assert_eq!(view.inventory.loaded(), Some(&vec![widget(), gadget()]));
    assert_eq!(
        view.chart_bars(),
        Some(vec![("Gadget".to_string(), 12), ("Widget".to_string(), 5)])
    );

    Ok(())
}

#[test]
fn negative_stock_clamps_to_zero_bars_only() -> TestResult {
    let oversold = Product {
        sku: "C3".to_string(),
        name: "Doodad".to_string(),
        stock: -4,
    };

    let mut source = MockDataSource::new();
    let row = oversold.clone();
    source
        .expect_fetch_products()
        .returning(move || Ok(vec![row.clone()]));
    source.expect_fetch_orders().returning(|| Ok(vec![]));

    let view = render_pass(&source, &mut QueryCache::new());

    assert_eq!(view.inventory.loaded(), Some(&vec![oversold]));
    assert_eq!(view.chart_bars(), Some(vec![("Doodad".to_string(), 0)]));

    Ok(())
}

#[test]
fn empty_inventory_yields_no_table_and_no_chart() {
    let mut source = MockDataSource::new();
    source.expect_fetch_products().returning(|| Ok(vec![]));
    source.expect_fetch_orders().returning(|| Ok(vec![]));

    let view = render_pass(&source, &mut QueryCache::new());

    assert!(matches!(view.inventory, Section::Empty));
    assert_eq!(view.chart_bars(), None);
}

#[test]
fn empty_history_yields_the_empty_section() {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .returning(|| Ok(vec![widget()]));
    source.expect_fetch_orders().returning(|| Ok(vec![]));

    let view = render_pass(&source, &mut QueryCache::new());

    assert!(matches!(view.history, Section::Empty));
}

#[test]
fn failed_inventory_stays_scoped_to_its_section() -> TestResult {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .returning(|| Err(server_error()));
    let order = jane_order()?;
    source
        .expect_fetch_orders()
        .returning(move || Ok(vec![order.clone()]));

    let view = render_pass(&source, &mut QueryCache::new());

    assert!(matches!(view.inventory, Section::Failed(_)));
    assert_eq!(view.chart_bars(), None);
    assert!(view.history.loaded().is_some(), "history should still render");

    Ok(())
}

#[test]
fn failed_history_stays_scoped_to_its_section() {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .returning(|| Ok(vec![widget()]));
    source
        .expect_fetch_orders()
        .returning(|| Err(server_error()));

    let view = render_pass(&source, &mut QueryCache::new());

    assert!(matches!(view.history, Section::Failed(_)));
    assert!(view.inventory.loaded().is_some(), "inventory should still render");
    assert_eq!(view.chart_bars(), Some(vec![("Widget".to_string(), 5)]));
}

#[test]
fn dangling_join_rows_are_skipped_and_counted() -> TestResult {
    let kept = jane_order()?;
    let dangling = Order {
        created_at: "2024-01-03T09:00:00Z".parse()?,
        customer_name: "Ghost".to_string(),
        quantity: 1,
        product: None,
    };

    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .returning(|| Ok(vec![widget()]));
    let rows = vec![dangling, kept];
    source
        .expect_fetch_orders()
        .returning(move || Ok(rows.clone()));

    let view = render_pass(&source, &mut QueryCache::new());

    assert_eq!(view.history.loaded().map(Vec::len), Some(1));
    assert_eq!(view.skipped_orders, 1);

    Ok(())
}

#[test]
fn second_pass_is_served_from_the_cache() -> TestResult {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .times(1)
        .returning(|| Ok(vec![widget()]));
    let order = jane_order()?;
    source
        .expect_fetch_orders()
        .times(1)
        .returning(move || Ok(vec![order.clone()]));

    let mut cache = QueryCache::new();
    let first = render_pass(&source, &mut cache);
    let second = render_pass(&source, &mut cache);

    assert_eq!(first.inventory.loaded(), second.inventory.loaded());
    assert_eq!(first.history.loaded(), second.history.loaded());

    Ok(())
}

#[test]
fn clearing_the_cache_reissues_both_queries() -> TestResult {
    let mut source = MockDataSource::new();
    source
        .expect_fetch_products()
        .times(2)
        .returning(|| Ok(vec![widget()]));
    let order = jane_order()?;
    source
        .expect_fetch_orders()
        .times(2)
        .returning(move || Ok(vec![order.clone()]));

    let mut cache = QueryCache::new();
    let _ = render_pass(&source, &mut cache);

    cache.clear();
    let _ = render_pass(&source, &mut cache);

    Ok(())
}

#[test]
fn query_failures_are_not_cached() {
    let mut source = MockDataSource::new();
    let mut first = true;
    source.expect_fetch_products().times(2).returning(move || {
        if first {
            first = false;
            Err(server_error())
        } else {
            Ok(vec![widget()])
        }
    });
    source.expect_fetch_orders().returning(|| Ok(vec![]));

    let mut cache = QueryCache::new();
    let failed = render_pass(&source, &mut cache);
    let recovered = render_pass(&source, &mut cache);

    assert!(matches!(failed.inventory, Section::Failed(_)));
    assert_eq!(recovered.inventory.loaded(), Some(&vec![widget()]));
}
