//! Storefront flows driven through the full router and middleware stack.

use axum::http::StatusCode;
use your_slice_integration_tests::{TestClient, storefront, storefront_with_store};
use your_slice_storefront::db::KeyValueStore;

// =============================================================================
// Page and middleware
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new(storefront());
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_home_page_renders_every_section() {
    let mut client = TestClient::new(storefront());
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    for needle in [
        "Popular creations",
        "Pepperoni Supreme",
        "id=\"builder\"",
        "Step 1 of 4: Base",
        "id=\"lunch\"",
        "id=\"reviews\"",
        "id=\"cart-panel\"",
        "Your cart is empty.",
    ] {
        assert!(response.body.contains(needle), "home page is missing {needle}");
    }
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let mut client = TestClient::new(storefront());
    let response = client.get("/").await;

    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert!(
        response
            .header("content-security-policy")
            .is_some_and(|csp| csp.contains("https://unpkg.com"))
    );
    assert!(response.header("x-request-id").is_some_and(|id| !id.is_empty()));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_adding_twice_merges_into_one_line() {
    let mut client = TestClient::new(storefront());
    let margherita = [("name", "Margherita"), ("price", "8.00"), ("image", "/static/img/menu/margherita.jpg")];

    client.post("/cart/add", &margherita).await;
    let response = client.post("/cart/add", &margherita).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert_eq!(response.body.matches("class=\"cart-line\"").count(), 1);
    assert!(response.body.contains("€16.00"));
    assert!(response.body.contains("€2.50"));
    assert!(response.body.contains("€18.50"));
    assert!(response.body.contains("cart-panel--open"));

    let count = client.get("/cart/count").await;
    assert!(count.body.contains(">2<"));
}

#[tokio::test]
async fn test_quantity_controls() {
    let mut client = TestClient::new(storefront());
    client.post("/cart/add", &[("name", "Hawaiian"), ("price", "9.50")]).await;

    let response = client.post("/cart/increment", &[("index", "0")]).await;
    assert!(response.body.contains("€19.00"));

    client.post("/cart/decrement", &[("index", "0")]).await;
    let response = client.post("/cart/decrement", &[("index", "0")]).await;
    assert!(response.body.contains("Your cart is empty."));
    assert!(response.body.contains("€0.00"));
}

#[tokio::test]
async fn test_out_of_range_index_is_ignored() {
    let mut client = TestClient::new(storefront());
    client.post("/cart/add", &[("name", "Four Cheese"), ("price", "10.00")]).await;

    for index in ["7", "-1", "first"] {
        let response = client.post("/cart/remove", &[("index", index)]).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Four Cheese"));
    }
}

#[tokio::test]
async fn test_add_without_name_is_rejected() {
    let mut client = TestClient::new(storefront());
    let response = client.post("/cart/add", &[("name", "  "), ("price", "8.00")]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("notice--error"));
    assert!(response.header("hx-trigger").is_none());
}

#[tokio::test]
async fn test_oversized_price_counts_as_zero() {
    let mut client = TestClient::new(storefront());
    let oversized = [("name", "Margherita"), ("price", "79228162514264337593543950335")];

    let response = client.post("/cart/add", &oversized).await;
    assert_eq!(response.status, StatusCode::OK);
    client.post("/cart/add", &oversized).await;
    client.post("/cart/increment", &[("index", "0")]).await;

    for uri in ["/cart", "/cart/count", "/"] {
        let response = client.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
    }
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Margherita"));
    assert!(cart.body.contains("€0.00 each"));
    assert!(cart.body.contains("€2.50"));
}

#[tokio::test]
async fn test_checkout_keeps_the_cart() {
    let mut client = TestClient::new(storefront());

    let empty = client.post("/checkout", &[]).await;
    assert!(empty.body.contains("Your cart is empty. Add some items first!"));

    client.post("/cart/add", &[("name", "Veggie Delight"), ("price", "9.00")]).await;
    let response = client.post("/checkout", &[]).await;
    assert!(response.body.contains("Proceeding to checkout!"));

    let count = client.get("/cart/count").await;
    assert!(count.body.contains(">1<"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let app = storefront();
    let mut aino = TestClient::new(app.clone());
    let mut ville = TestClient::new(app);

    aino.post("/cart/add", &[("name", "BBQ Chicken"), ("price", "10.50")]).await;

    assert!(aino.get("/cart/count").await.body.contains(">1<"));
    assert!(ville.get("/cart/count").await.body.contains(">0<"));
}

// =============================================================================
// Slice builder
// =============================================================================

#[tokio::test]
async fn test_finishing_a_slice_adds_it_to_the_cart() {
    let mut client = TestClient::new(storefront());

    let response = client.post("/builder/select", &[("category", "base"), ("name", "Thin Crust")]).await;
    assert!(response.body.contains("€3.50"));

    for expected in ["Step 2 of 4", "Step 3 of 4", "Step 4 of 4"] {
        let response = client.post("/builder/next", &[]).await;
        assert!(response.body.contains(expected), "expected {expected}");
        assert!(response.header("hx-trigger").is_none());
    }

    let response = client.post("/builder/topping", &[("name", "Olives")]).await;
    assert!(response.body.contains("1/3 toppings selected"));
    assert!(response.body.contains("€4.50"));

    let response = client.post("/builder/next", &[]).await;
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("Your custom slice has been added to the cart!"));
    assert!(response.body.contains("Step 1 of 4"));
    assert!(response.body.contains("€3.00"));

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Custom Pizza Slice"));
    assert!(cart.body.contains("Thin Crust, Tomato Sauce, Mozzarella, Olives"));
}

#[tokio::test]
async fn test_fourth_topping_is_refused() {
    let mut client = TestClient::new(storefront());

    for name in ["Olives", "Mushrooms", "Onion"] {
        client.post("/builder/topping", &[("name", name)]).await;
    }
    let response = client.post("/builder/topping", &[("name", "Pepper")]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("You can choose up to 3 toppings."));
    assert!(response.body.contains("3/3 toppings selected"));
}

#[tokio::test]
async fn test_builder_rejects_unknown_options() {
    let mut client = TestClient::new(storefront());

    let response = client.post("/builder/select", &[("category", "base"), ("name", "Cardboard")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.post("/builder/select", &[("category", "glaze"), ("name", "Honey")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prev_and_reset() {
    let mut client = TestClient::new(storefront());

    let response = client.post("/builder/prev", &[]).await;
    assert!(response.body.contains("Step 1 of 4"));

    client.post("/builder/next", &[]).await;
    let response = client.post("/builder/prev", &[]).await;
    assert!(response.body.contains("Step 1 of 4"));

    client.post("/builder/select", &[("category", "base"), ("name", "Gluten Free")]).await;
    let response = client.post("/builder/reset", &[]).await;
    assert!(response.body.contains("€3.00"));
}

// =============================================================================
// Lunch
// =============================================================================

#[tokio::test]
async fn test_lunch_day_and_add() {
    let mut client = TestClient::new(storefront());

    let monday = client.get("/lunch?day=monday").await;
    assert_eq!(monday.status, StatusCode::OK);
    assert!(monday.body.contains("Roasted Veggie Slice"));
    assert!(monday.body.contains("Pepperoni Classic"));

    let response = client.post("/lunch/add", &[("day", "monday"), ("option", "vegan")]).await;
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("Roasted Veggie Slice"));
    assert!(response.body.contains("Monday Lunch, Vegan"));
    assert!(response.body.contains("€8.50"));
}

#[tokio::test]
async fn test_lunch_rejects_unknown_input() {
    let mut client = TestClient::new(storefront());

    assert_eq!(client.get("/lunch?day=caturday").await.status, StatusCode::BAD_REQUEST);
    let response = client.post("/lunch/add", &[("day", "friday"), ("option", "fish")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn test_review_add_and_delete() {
    let mut client = TestClient::new(storefront());
    let review = [("name", "Aino"), ("rating", "5"), ("text", "Best slice in Helsinki")];

    let response = client.post("/reviews", &review).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Thank you for your review!"));
    assert!(response.body.contains("Best slice in Helsinki"));
    assert!(response.body.contains("★★★★★"));

    let unconfirmed = client.post("/reviews/delete", &review).await;
    assert_eq!(unconfirmed.status, StatusCode::BAD_REQUEST);

    let mut confirmed = review.to_vec();
    confirmed.push(("confirmed", "true"));
    let response = client.post("/reviews/delete", &confirmed).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Best slice in Helsinki"));
    assert!(response.body.contains("No reviews yet."));
}

#[tokio::test]
async fn test_invalid_reviews_are_blocked() {
    let mut client = TestClient::new(storefront());

    let cases = [
        ([("name", " "), ("rating", "4"), ("text", "Nice")], "Please enter your name."),
        ([("name", "Ville"), ("rating", "4"), ("text", "")], "Please write a few words about your visit."),
        ([("name", "Ville"), ("rating", "6"), ("text", "Nice")], "Please choose a rating from 1 to 5 stars."),
    ];
    for (form, message) in cases {
        let response = client.post("/reviews", &form).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body.contains(message), "expected {message}");
    }

    assert!(client.get("/reviews").await.body.contains("No reviews yet."));
}

#[tokio::test]
async fn test_reviews_with_text_ratings_survive_a_new_review() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reviews.json");
    KeyValueStore::file(path.clone())
        .set(
            "reviews",
            r#"[{"name":"Aino","rating":"5","text":"Great crust"},{"name":"Ville","rating":"4","text":"Good sauce"}]"#
                .to_string(),
        )
        .await
        .expect("seed reviews");

    let mut client = TestClient::new(storefront_with_store(KeyValueStore::file(path)));
    let listed = client.get("/reviews").await;
    assert!(listed.body.contains("Great crust"));
    assert!(listed.body.contains("Good sauce"));

    let response = client
        .post("/reviews", &[("name", "Laura"), ("rating", "3"), ("text", "Quick service")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    for text in ["Great crust", "Good sauce", "Quick service"] {
        assert!(response.body.contains(text), "missing {text}");
    }
}

#[tokio::test]
async fn test_reviews_persist_across_restarts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("reviews.json");

    let mut first = TestClient::new(storefront_with_store(KeyValueStore::file(&path)));
    first
        .post("/reviews", &[("name", "Laura"), ("rating", "4"), ("text", "Crispy base")])
        .await;

    let mut second = TestClient::new(storefront_with_store(KeyValueStore::file(&path)));
    let response = second.get("/reviews").await;
    assert!(response.body.contains("Crispy base"));
    assert!(response.body.contains("★★★★☆"));
}

// =============================================================================
// Customer dialogs
// =============================================================================

#[tokio::test]
async fn test_login_and_logout() {
    let mut client = TestClient::new(storefront());

    let rejected = client.post("/auth/login", &[("email", "aino"), ("password", "pizza")]).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let response = client
        .post("/auth/login", &[("email", "aino@example.fi"), ("password", "pizza")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("auth-changed"));
    assert!(response.body.contains("Login successful! Welcome back."));
    assert!(client.get("/").await.body.contains("Hi, aino@example.fi"));

    client.post("/auth/logout", &[]).await;
    assert!(!client.get("/").await.body.contains("Hi, aino@example.fi"));
}

#[tokio::test]
async fn test_signup_notice() {
    let mut client = TestClient::new(storefront());
    let response = client
        .post("/auth/signup", &[("email", "ville@example.fi"), ("password", "slices")])
        .await;
    assert!(response.body.contains("Account created successfully! Welcome to Your Slice."));
}
