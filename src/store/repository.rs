//! Repository layer for database operations

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::models::{Account, Order};

fn account_from_row(row: &SqliteRow) -> Account {
    Account {
        id: row.get("id"),
        username: row.get("username"),
        api_public: row.get("api_public"),
        api_secret: row.get("api_secret"),
    }
}

fn order_from_row(row: &SqliteRow) -> Order {
    Order {
        id: row.get("id"),
        order_id: row.get("order_id"),
        symbol: row.get("symbol"),
        size: row.get("size"),
        price: row.get("price"),
        side: row.get("side"),
        account_id: row.get("account_id"),
    }
}

/// Account repository for CRUD operations
pub struct AccountRepository;

impl AccountRepository {
    /// Get account by its public api key
    pub async fn get_by_public_key(
        pool: &SqlitePool,
        api_public: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT id, username, api_public, api_secret
               FROM accounts WHERE api_public = ?1"#,
        )
        .bind(api_public)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| account_from_row(&r)))
    }

    /// List every registered account
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Account>, sqlx::Error> {
        let rows = sqlx::query(
            r#"SELECT id, username, api_public, api_secret
               FROM accounts ORDER BY id"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.iter().map(account_from_row).collect())
    }

    /// Create a new account, returning its row id.
    ///
    /// Duplicate usernames or public keys surface as a database
    /// uniqueness error (see `store::db::is_unique_violation`).
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        api_public: &str,
        api_secret: &str,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"INSERT INTO accounts (username, api_public, api_secret)
               VALUES (?1, ?2, ?3) RETURNING id"#,
        )
        .bind(username)
        .bind(api_public)
        .bind(api_secret)
        .fetch_one(pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Delete an account; its orders cascade away with it.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

/// Order repository for CRUD operations
pub struct OrderRepository;

impl OrderRepository {
    /// List the orders owned by an account
    pub async fn list_for_account(
        pool: &SqlitePool,
        account_id: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let rows = sqlx::query(
            r#"SELECT id, order_id, symbol, size, price, side, account_id
               FROM orders WHERE account_id = ?1 ORDER BY id"#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }

    /// Get an order by its venue-assigned identifier
    pub async fn get_by_order_id(
        pool: &SqlitePool,
        order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT id, order_id, symbol, size, price, side, account_id
               FROM orders WHERE order_id = ?1"#,
        )
        .bind(order_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| order_from_row(&r)))
    }

    /// Record an order the venue has accepted, returning its row id.
    pub async fn create(
        pool: &SqlitePool,
        order_id: &str,
        symbol: &str,
        size: i64,
        price: f64,
        side: &str,
        account_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"INSERT INTO orders (order_id, symbol, size, price, side, account_id)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id"#,
        )
        .bind(order_id)
        .bind(symbol)
        .bind(size)
        .bind(price)
        .bind(side)
        .bind(account_id)
        .fetch_one(pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Delete an order row after the venue confirmed its cancellation.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::db::{Database, is_unique_violation};

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.expect("connect");
        db.create_schema().await.expect("schema");
        db
    }

    #[tokio::test]
    async fn test_account_create_and_get() {
        let db = test_db().await;

        let id = AccountRepository::create(db.pool(), "alice", "pk1", "sk1")
            .await
            .expect("create");
        assert!(id > 0);

        let account = AccountRepository::get_by_public_key(db.pool(), "pk1")
            .await
            .expect("query")
            .expect("account exists");
        assert_eq!(account.username, "alice");
        assert_eq!(account.api_secret, "sk1");
    }

    #[tokio::test]
    async fn test_account_get_missing_returns_none() {
        let db = test_db().await;
        let result = AccountRepository::get_by_public_key(db.pool(), "nope")
            .await
            .expect("query");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let db = test_db().await;
        AccountRepository::create(db.pool(), "alice", "pk1", "sk1")
            .await
            .expect("create");

        let err = AccountRepository::create(db.pool(), "alice", "pk2", "sk2")
            .await
            .expect_err("duplicate name must fail");
        assert!(is_unique_violation(&err));

        let err = AccountRepository::create(db.pool(), "bob", "pk1", "sk3")
            .await
            .expect_err("duplicate public key must fail");
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_orders_cascade_with_account() {
        let db = test_db().await;
        let account_id = AccountRepository::create(db.pool(), "alice", "pk1", "sk1")
            .await
            .expect("create account");
        OrderRepository::create(db.pool(), "ord-1", "XBTUSD", 100, 9500.0, "Buy", account_id)
            .await
            .expect("create order");

        AccountRepository::delete(db.pool(), account_id)
            .await
            .expect("delete account");

        let order = OrderRepository::get_by_order_id(db.pool(), "ord-1")
            .await
            .expect("query");
        assert!(order.is_none(), "orders must cascade with their account");
    }

    #[tokio::test]
    async fn test_order_listing_is_scoped_to_account() {
        let db = test_db().await;
        let alice = AccountRepository::create(db.pool(), "alice", "pk1", "sk1")
            .await
            .expect("alice");
        let bob = AccountRepository::create(db.pool(), "bob", "pk2", "sk2")
            .await
            .expect("bob");

        OrderRepository::create(db.pool(), "ord-1", "XBTUSD", 100, 9500.0, "Buy", alice)
            .await
            .expect("order 1");
        OrderRepository::create(db.pool(), "ord-2", "ETHUSD", 50, 210.0, "Sell", alice)
            .await
            .expect("order 2");
        OrderRepository::create(db.pool(), "ord-3", "XBTUSD", 10, 9400.0, "Buy", bob)
            .await
            .expect("order 3");

        let orders = OrderRepository::list_for_account(db.pool(), alice)
            .await
            .expect("list");
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.account_id == alice));
    }

    #[tokio::test]
    async fn test_duplicate_order_id_is_unique_violation() {
        let db = test_db().await;
        let account_id = AccountRepository::create(db.pool(), "alice", "pk1", "sk1")
            .await
            .expect("account");
        OrderRepository::create(db.pool(), "ord-1", "XBTUSD", 100, 9500.0, "Buy", account_id)
            .await
            .expect("order");

        let err =
            OrderRepository::create(db.pool(), "ord-1", "XBTUSD", 1, 9000.0, "Sell", account_id)
                .await
                .expect_err("duplicate order id must fail");
        assert!(is_unique_violation(&err));
    }
}
