//! The fixed control vocabulary of the gateway.
//!
//! One builder per relation; each knows its target route, method and,
//! for body-bearing targets, the schema governing the payload. Handlers
//! decorate their response documents through this catalogue instead of
//! spelling out hrefs themselves.

use super::control::Control;
use super::document::Document;
use super::routes::RouteTable;
use super::schema;

/// Attaches domain controls to response documents.
///
/// Holds the route table it renders hrefs from; construct one per
/// process and share it.
#[derive(Debug, Clone)]
pub struct Catalogue {
    routes: RouteTable,
}

impl Catalogue {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// `self` pointing at an already rendered href.
    pub fn add_self(&self, body: &mut Document, href: String) {
        body.add_control("self", Control::get(href));
    }

    pub fn add_accounts_all(&self, body: &mut Document) {
        body.add_control(
            "accounts-all",
            Control::get(self.routes.accounts_href())
                .title("List all the accounts registered"),
        );
    }

    pub fn add_account(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "account",
            Control::get(self.routes.account_href(apikey)).title("Login to account"),
        );
    }

    pub fn add_add_account(&self, body: &mut Document) {
        body.add_control(
            "add-account",
            Control::post(self.routes.accounts_href())
                .encoding("json")
                .title("Add account to the cryptotrading API")
                .schema(schema::account_schema()),
        );
    }

    pub fn add_delete_account(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "delete",
            Control::delete(self.routes.account_href(apikey)).title("Delete this account"),
        );
    }

    pub fn add_orders_all(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "orders-all",
            Control::get(self.routes.orders_href(apikey)).title("Get open orders"),
        );
    }

    pub fn add_add_order(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "add-order",
            Control::post(self.routes.orders_href(apikey))
                .encoding("json")
                .title("Add an order to the cryptotrading API")
                .schema(schema::order_schema()),
        );
    }

    pub fn add_delete_order(&self, body: &mut Document, apikey: &str, orderid: &str) {
        body.add_control(
            "delete",
            Control::delete(self.routes.order_href(apikey, orderid)).title("Delete this order"),
        );
    }

    pub fn add_positions_all(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "positions-all",
            Control::get(self.routes.positions_href(apikey)).title("Get open positions"),
        );
    }

    pub fn add_edit_position(&self, body: &mut Document, apikey: &str, symbol: &str) {
        body.add_control(
            "edit",
            Control::patch(self.routes.position_href(apikey, symbol))
                .encoding("json")
                .title("Change position leverage")
                .schema(schema::position_schema()),
        );
    }

    pub fn add_balance(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "balance",
            Control::get(self.routes.balance_href(apikey)).title("Get account balance"),
        );
    }

    pub fn add_transactions(&self, body: &mut Document, apikey: &str) {
        body.add_control(
            "transactions",
            Control::get(self.routes.transactions_href(apikey))
                .title("Get history of the wallet transactions"),
        );
    }

    pub fn add_orderbook(&self, body: &mut Document) {
        body.add_control(
            "orderbook",
            Control::get(self.routes.orderbook_href()).title("Get order book data"),
        );
    }

    pub fn add_priceaction(&self, body: &mut Document) {
        body.add_control(
            "priceaction",
            Control::get(self.routes.priceaction_href(None))
                .title("Show recent trades that happened in the market"),
        );
    }

    pub fn add_buckets(&self, body: &mut Document) {
        body.add_control(
            "buckets",
            Control::get(self.routes.buckets_href()).title("Trades in time buckets"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn catalogue() -> Catalogue {
        Catalogue::new(RouteTable::default())
    }

    fn controls(body: Document) -> Value {
        Value::from(body)["@controls"].clone()
    }

    #[test]
    fn test_account_controls_point_at_account_routes() {
        let cat = catalogue();
        let mut body = Document::new();
        cat.add_account(&mut body, "pk1");
        cat.add_orders_all(&mut body, "pk1");
        cat.add_delete_account(&mut body, "pk1");

        let controls = controls(body);
        assert_eq!(controls["account"]["href"], "/accounts/pk1/");
        assert_eq!(controls["account"]["method"], "GET");
        assert_eq!(controls["orders-all"]["href"], "/accounts/pk1/orders/");
        assert_eq!(controls["delete"]["href"], "/accounts/pk1/");
        assert_eq!(controls["delete"]["method"], "DELETE");
    }

    #[test]
    fn test_body_bearing_controls_carry_schema_and_encoding() {
        let cat = catalogue();
        let mut body = Document::new();
        cat.add_add_account(&mut body);
        cat.add_add_order(&mut body, "pk1");
        cat.add_edit_position(&mut body, "pk1", "XBTUSD");

        let controls = controls(body);
        for relation in ["add-account", "add-order", "edit"] {
            assert_eq!(controls[relation]["encoding"], "json");
            assert!(controls[relation]["schema"].is_object(), "{relation}");
        }
        assert_eq!(controls["edit"]["method"], "PATCH");
        assert_eq!(
            controls["edit"]["schema"]["required"],
            serde_json::json!(["leverage"])
        );
    }

    #[test]
    fn test_market_controls() {
        let cat = catalogue();
        let mut body = Document::new();
        cat.add_orderbook(&mut body);
        cat.add_priceaction(&mut body);
        cat.add_buckets(&mut body);

        let controls = controls(body);
        assert_eq!(controls["orderbook"]["href"], "/orderbook/");
        assert_eq!(controls["priceaction"]["href"], "/priceaction/");
        assert_eq!(
            controls["buckets"]["href"],
            "/priceaction/bucketed/?{timebucket}"
        );
    }
}
