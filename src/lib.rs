//! Bestellblick
//!
//! Read-only core of a live dashboard over a hosted order database: typed
//! records for the `products` and `orders` tables, a blocking REST read
//! client, an explicit query-result cache, and the render pass that reshapes
//! query results into a UI-independent page description.
//!
//! All writes to the database are produced by an external automation
//! service; this crate only ever reads.

pub mod cache;
pub mod client;
pub mod config;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod view;
