//! Outbound calls to the trading venue: signed REST client, typed wire
//! shapes and the error boundary.

pub mod client;
pub mod error;
pub mod sign;
pub mod types;

pub use client::{Credentials, VenueClient};
pub use error::VenueError;
pub use types::{MarginBalance, OrderAck, Position, Trade};
