//! Back office flows: staff login, the orders table and the product table.

use axum::http::StatusCode;
use your_slice_integration_tests::{TestClient, admin};

/// A client that has already signed in.
async fn signed_in() -> TestClient {
    let mut client = TestClient::new(admin());
    let response = client
        .post(
            "/auth/login",
            &[("name", "Anna"), ("email", "anna@metropolia.fi"), ("password", "Secret1")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/"));
    client
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_pages_require_staff() {
    let mut client = TestClient::new(admin());

    for uri in ["/", "/orders", "/products"] {
        let response = client.get(uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.header("location"), Some("/auth/login"));
    }

    let response = client.post("/orders/1001/action", &[("action", "process")]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("hx-redirect"), Some("/auth/login"));
}

#[tokio::test]
async fn test_login_reports_each_field() {
    let mut client = TestClient::new(admin());
    let response = client
        .post(
            "/auth/login",
            &[("name", "An"), ("email", "anna@gmail.com"), ("password", "secret")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Name must be at least 3 characters."));
    assert!(response.body.contains("Email must end with @metropolia.fi."));
    assert!(response.body.contains("Password must contain at least one uppercase letter."));
    assert!(response.body.contains("value=\"anna@gmail.com\""));
    assert!(!response.body.contains("value=\"secret\""));

    assert_eq!(client.get("/").await.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_then_logout() {
    let mut client = signed_in().await;

    let dashboard = client.get("/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Welcome, Anna"));
    assert_eq!(dashboard.header("cache-control"), Some("no-store"));

    let login_page = client.get("/auth/login").await;
    assert_eq!(login_page.status, StatusCode::SEE_OTHER);

    let response = client.post("/auth/logout", &[]).await;
    assert_eq!(response.header("location"), Some("/auth/login"));
    assert_eq!(client.get("/").await.status, StatusCode::SEE_OTHER);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_orders_filter_and_search() {
    let mut client = signed_in().await;

    let page = client.get("/orders").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Showing 5 of 5 orders"));

    let pending = client.get("/orders/table?status=pending").await;
    assert!(pending.body.contains("Showing 2 of 5 orders"));
    assert!(pending.body.contains("#1001"));
    assert!(pending.body.contains("#1004"));
    assert!(!pending.body.contains("#1002"));

    let search = client.get("/orders/table?q=laura&status=all").await;
    assert!(search.body.contains("Showing 1 of 5 orders"));
    assert!(search.body.contains("Veggie Delight"));

    let nothing = client.get("/orders/table?q=calzone").await;
    assert!(nothing.body.contains("No orders match."));

    let bad = client.get("/orders/table?status=shipped").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_action_keeps_the_filter() {
    let mut client = signed_in().await;

    let response = client
        .post(
            "/orders/1001/action",
            &[("action", "process"), ("q", ""), ("status", "pending")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Showing 1 of 5 orders"));
    assert!(!response.body.contains("#1001"));

    let processing = client.get("/orders/table?status=processing").await;
    assert!(processing.body.contains("#1001"));
    assert!(processing.body.contains("Processing order..."));
}

#[tokio::test]
async fn test_view_action_only_sets_label() {
    let mut client = signed_in().await;

    let response = client.post("/orders/1004/action", &[("action", "view")]).await;
    assert!(response.body.contains("Viewing order details..."));

    let pending = client.get("/orders/table?status=pending").await;
    assert!(pending.body.contains("#1004"));
}

#[tokio::test]
async fn test_order_delete_needs_confirmation() {
    let mut client = signed_in().await;

    let refused = client.post("/orders/1003/action", &[("action", "delete")]).await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert!(refused.body.contains("Please confirm that you want to delete this order."));

    let deleted = client
        .post("/orders/1003/action", &[("action", "delete"), ("confirmed", "true")])
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.contains("Order #1003 deleted."));
    assert!(deleted.body.contains("Showing 4 of 4 orders"));

    let again = client
        .post("/orders/1003/action", &[("action", "delete"), ("confirmed", "true")])
        .await;
    assert!(again.body.contains("Order #1003 no longer exists."));
}

#[tokio::test]
async fn test_unknown_order_action() {
    let mut client = signed_in().await;

    let response = client.post("/orders/1001/action", &[("action", "refund")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.post("/orders/abc/action", &[("action", "view")]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_add_and_delete_product() {
    let mut client = signed_in().await;

    let page = client.get("/products").await;
    assert!(page.body.contains("BBQ Chicken"));

    let added = client
        .post("/products", &[("name", "Truffle Mushroom"), ("price", "12.50")])
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert!(added.body.contains("Truffle Mushroom added."));
    assert!(added.body.contains("€12.50"));

    let refused = client.post("/products/5/delete", &[]).await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);

    let deleted = client.post("/products/5/delete", &[("confirmed", "true")]).await;
    assert!(deleted.body.contains("Product deleted."));
    assert!(!deleted.body.contains("Truffle Mushroom"));

    let gone = client.post("/products/5/delete", &[("confirmed", "true")]).await;
    assert!(gone.body.contains("That product was already removed."));
}

#[tokio::test]
async fn test_invalid_products_are_refused() {
    let mut client = signed_in().await;

    for (name, price) in [
        ("", "9.00"),
        ("Calzone", "0"),
        ("Calzone", "free"),
        ("Calzone", "79228162514264337593543950335"),
    ] {
        let response = client.post("/products", &[("name", name), ("price", price)]).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{name} {price}");
        assert!(response.body.contains("Please enter a valid product name and price."));
    }

    assert!(!client.get("/products").await.body.contains("Calzone"));
}
