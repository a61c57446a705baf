//! cryptotrade-gateway - Hypermedia REST facade for exchange trading
//!
//! Clients register an account (venue key pair), place and cancel
//! orders, and read balances, positions and recent trades. Every
//! response body is a Mason document carrying its own affordances.
//!
//! # Modules
//!
//! - [`mason`] - Hypermedia documents, controls, route table, catalogue
//! - [`store`] - SQLite persistence for accounts and mirrored orders
//! - [`venue`] - Signed REST client for the trading venue
//! - [`gateway`] - axum router, handlers, guards, error taxonomy
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup with rolling file output

pub mod config;
pub mod gateway;
pub mod logging;
pub mod mason;
pub mod store;
pub mod venue;

// Convenient re-exports at crate root
pub use gateway::state::AppState;
pub use mason::{Catalogue, Control, Document, MASON, RouteTable};
pub use store::{Account, Database, Order};
pub use venue::{VenueClient, VenueError};
