//! Blocking read client for the hosted database's REST surface.
//!
//! The database is consumed, never implemented: two read queries against
//! `products` and `orders`, authenticated with an API key. Queries run
//! sequentially and block until their result or error returns; retries and
//! timeouts are left to the transport defaults.

use mockall::automock;
use reqwest::{
    Url,
    blocking::{Client, RequestBuilder},
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use reqwest::StatusCode;

use crate::{config::Config, orders::Order, products::Product};

/// Column projection of the inventory query.
const PRODUCTS_SELECT: &str = "sku,name,stock";

/// Column projection of the order history query, embedding the product join.
const ORDERS_SELECT: &str = "created_at,customer_name,quantity,products(name,sku)";

/// Server-side ordering of the order history query.
const ORDERS_ORDER: &str = "created_at.desc";

/// Failure to establish the database handle. Fatal for the render pass:
/// the caller shows one error message and renders nothing else.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The configured base URL does not parse into a usable endpoint.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending configuration value.
        url: String,

        /// Why it was rejected.
        reason: String,
    },

    /// The configured API key is empty.
    #[error("missing API key")]
    MissingKey,

    /// The configured API key cannot be sent as a request header.
    #[error("API key is not a valid header value")]
    MalformedKey,

    /// Building the HTTP client or reaching the REST root failed.
    #[error("database unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The REST root rejected the connection probe.
    #[error("database rejected the connection probe ({status})")]
    Rejected {
        /// Status returned by the probe request.
        status: StatusCode,
    },
}

/// Failure of a single read query. Non-fatal; the error stays scoped to the
/// section that issued the query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Transport-level failure issuing the request.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server answered {status}")]
    Status {
        /// The non-success status.
        status: StatusCode,
    },

    /// The payload did not decode into the expected rows.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only access to the two dashboard queries.
///
/// The render pass depends on this trait so tests can substitute a mock for
/// the network client.
#[automock]
pub trait DataSource {
    /// Query A: every `products` row as `{sku, name, stock}`, in whatever
    /// order the server returns them.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] on transport, status, or decode failure.
    fn fetch_products(&self) -> Result<Vec<Product>, QueryError>;

    /// Query B: every `orders` row with the embedded product join, ordered
    /// by `created_at` descending on the server.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] on transport, status, or decode failure.
    fn fetch_orders(&self) -> Result<Vec<Order>, QueryError>;
}

/// Resolved REST endpoints for one configured base URL.
#[derive(Debug, Clone)]
struct Endpoints {
    root: Url,
    products: Url,
    orders: Url,
}

fn endpoints(url: &str) -> Result<Endpoints, ConnectError> {
    let mut base = Url::parse(url).map_err(|err| ConnectError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;

    if base.cannot_be_a_base() {
        return Err(ConnectError::InvalidUrl {
            url: url.to_string(),
            reason: "not a base URL".to_string(),
        });
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let join = |segment: &str, base: &Url| {
        base.join(segment).map_err(|err| ConnectError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })
    };

    let root = join("rest/v1/", &base)?;
    let products = join("products", &root)?;
    let orders = join("orders", &root)?;

    Ok(Endpoints { root, products, orders })
}

fn auth_headers(config: &Config) -> Result<HeaderMap, ConnectError> {
    let mut key = HeaderValue::from_str(config.key.expose())
        .map_err(|_err| ConnectError::MalformedKey)?;
    key.set_sensitive(true);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.key.expose()))
        .map_err(|_err| ConnectError::MalformedKey)?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);

    Ok(headers)
}

/// Blocking REST client holding the long-lived per-session handle.
///
/// Created once per dashboard session by [`RestClient::connect`]; the
/// refresh control reruns queries through the same handle.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    endpoints: Endpoints,
}

impl RestClient {
    /// Establish the database handle: validate the configuration, build an
    /// HTTP client carrying the authentication headers, and probe the REST
    /// root once so credential and reachability problems surface here
    /// instead of inside a section.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectError`] for a malformed URL, an empty or
    /// unsendable key, an unreachable host, or a rejected probe.
    pub fn connect(config: &Config) -> Result<Self, ConnectError> {
        if config.key.is_empty() {
            return Err(ConnectError::MissingKey);
        }

        let endpoints = endpoints(&config.url)?;
        let headers = auth_headers(config)?;

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ConnectError::Transport)?;

        let client = Self { http, endpoints };
        client.probe()?;

        tracing::debug!(root = %client.endpoints.root, "database handle established");

        Ok(client)
    }

    fn probe(&self) -> Result<(), ConnectError> {
        let response = self
            .http
            .get(self.endpoints.root.clone())
            .send()
            .map_err(ConnectError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectError::Rejected { status });
        }

        Ok(())
    }

    fn products_request(&self) -> RequestBuilder {
        self.http
            .get(self.endpoints.products.clone())
            .query(&[("select", PRODUCTS_SELECT)])
    }

    fn orders_request(&self) -> RequestBuilder {
        self.http
            .get(self.endpoints.orders.clone())
            .query(&[("select", ORDERS_SELECT), ("order", ORDERS_ORDER)])
    }

    fn send_rows<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, QueryError> {
        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status { status });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl DataSource for RestClient {
    fn fetch_products(&self) -> Result<Vec<Product>, QueryError> {
        let rows: Vec<Product> = Self::send_rows(self.products_request())?;
        tracing::debug!(rows = rows.len(), "inventory query returned");
        Ok(rows)
    }

    fn fetch_orders(&self) -> Result<Vec<Order>, QueryError> {
        let rows: Vec<Order> = Self::send_rows(self.orders_request())?;
        tracing::debug!(rows = rows.len(), "order history query returned");
        Ok(rows)
    }
}
