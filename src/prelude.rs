//! Bestellblick prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cache::QueryCache,
    client::{ConnectError, DataSource, QueryError, RestClient},
    config::{ApiKey, Config},
    orders::{Order, OrderProduct, OrderRow},
    products::Product,
    view::{DashboardView, Section, render_pass},
};
