//! Request handlers, one module per resource family.

pub mod accounts;
pub mod entry;
pub mod market;
pub mod orders;
pub mod positions;

pub use accounts::{
    create_account, delete_account, get_account, get_balance, get_transaction_history,
    list_accounts,
};
pub use entry::entrypoint;
pub use market::{get_bucketed_priceaction, get_orderbook, get_priceaction};
pub use orders::{
    create_order, delete_order, get_order, get_order_history, list_orders, update_order,
};
pub use positions::{get_position, list_positions, patch_position};
