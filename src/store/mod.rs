//! Account and order persistence (SQLite).

pub mod db;
pub mod models;
pub mod repository;

pub use db::{Database, is_unique_violation};
pub use models::{Account, Order};
pub use repository::{AccountRepository, OrderRepository};
