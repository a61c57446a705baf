//! Route templates and href rendering.
//!
//! Every href handed out in a control is rendered from this table, and
//! the axum router registers the very same template strings, so each
//! path exists in exactly one place. Path parameters come from a closed
//! set: `apikey`, `orderid`, `symbol`.

/// The template for every addressable resource.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub entry: &'static str,
    pub accounts: &'static str,
    pub account: &'static str,
    pub orders: &'static str,
    pub order: &'static str,
    pub order_history: &'static str,
    pub balance: &'static str,
    pub transactions: &'static str,
    pub positions: &'static str,
    pub position: &'static str,
    pub priceaction: &'static str,
    pub priceaction_bucketed: &'static str,
    pub orderbook: &'static str,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            entry: "/",
            accounts: "/accounts/",
            account: "/accounts/{apikey}/",
            orders: "/accounts/{apikey}/orders/",
            order: "/accounts/{apikey}/orders/{orderid}/",
            order_history: "/accounts/{apikey}/orders/history/",
            balance: "/accounts/{apikey}/balance/",
            transactions: "/accounts/{apikey}/history/",
            positions: "/accounts/{apikey}/positions/",
            position: "/accounts/{apikey}/positions/{symbol}/",
            priceaction: "/priceaction/",
            priceaction_bucketed: "/priceaction/bucketed/",
            orderbook: "/orderbook/",
        }
    }
}

impl RouteTable {
    pub fn accounts_href(&self) -> String {
        self.accounts.to_string()
    }

    pub fn account_href(&self, apikey: &str) -> String {
        fill(self.account, &[("apikey", apikey)])
    }

    pub fn orders_href(&self, apikey: &str) -> String {
        fill(self.orders, &[("apikey", apikey)])
    }

    pub fn order_href(&self, apikey: &str, orderid: &str) -> String {
        fill(self.order, &[("apikey", apikey), ("orderid", orderid)])
    }

    pub fn balance_href(&self, apikey: &str) -> String {
        fill(self.balance, &[("apikey", apikey)])
    }

    pub fn transactions_href(&self, apikey: &str) -> String {
        fill(self.transactions, &[("apikey", apikey)])
    }

    pub fn positions_href(&self, apikey: &str) -> String {
        fill(self.positions, &[("apikey", apikey)])
    }

    pub fn position_href(&self, apikey: &str, symbol: &str) -> String {
        fill(self.position, &[("apikey", apikey), ("symbol", symbol)])
    }

    pub fn orderbook_href(&self) -> String {
        self.orderbook.to_string()
    }

    /// Price action href, with the symbol query filled in when known.
    pub fn priceaction_href(&self, symbol: Option<&str>) -> String {
        match symbol {
            Some(symbol) => format!("{}?symbol={symbol}", self.priceaction),
            None => self.priceaction.to_string(),
        }
    }

    /// Bucketed price action href with its unfilled query placeholder.
    pub fn buckets_href(&self) -> String {
        format!("{}?{{timebucket}}", self.priceaction_bucketed)
    }
}

fn fill(template: &str, params: &[(&str, &str)]) -> String {
    let mut href = template.to_string();
    for (name, value) in params {
        href = href.replace(&format!("{{{name}}}"), value);
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_parameter_fill() {
        let routes = RouteTable::default();
        assert_eq!(routes.account_href("abc123"), "/accounts/abc123/");
        assert_eq!(routes.balance_href("abc123"), "/accounts/abc123/balance/");
    }

    #[test]
    fn test_two_parameter_fill() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.order_href("abc", "ord-1"),
            "/accounts/abc/orders/ord-1/"
        );
        assert_eq!(
            routes.position_href("abc", "XBTUSD"),
            "/accounts/abc/positions/XBTUSD/"
        );
    }

    #[test]
    fn test_priceaction_query_variants() {
        let routes = RouteTable::default();
        assert_eq!(routes.priceaction_href(None), "/priceaction/");
        assert_eq!(
            routes.priceaction_href(Some("XBTUSD")),
            "/priceaction/?symbol=XBTUSD"
        );
        assert_eq!(routes.buckets_href(), "/priceaction/bucketed/?{timebucket}");
    }

    #[test]
    fn test_rendered_hrefs_contain_no_placeholders() {
        let routes = RouteTable::default();
        for href in [
            routes.account_href("k"),
            routes.orders_href("k"),
            routes.order_href("k", "o"),
            routes.positions_href("k"),
            routes.position_href("k", "s"),
            routes.transactions_href("k"),
            routes.balance_href("k"),
        ] {
            assert!(!href.contains('{'), "unfilled placeholder in {href}");
        }
    }
}
