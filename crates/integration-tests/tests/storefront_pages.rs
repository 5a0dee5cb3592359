//! Integration tests for the full pages and response headers.

use axum::http::StatusCode;

use bistro_integration_tests::{ORDER_ENDPOINT, RESERVATION_ENDPOINT, TestApp};

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_menu_page_renders_items() {
    let mut app = TestApp::new();

    let resp = app.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Test Bistro"));
    assert!(resp.body.contains("Burger"));
    assert!(resp.body.contains("value=\"9.50\""));
    assert!(resp.body.contains("/buy-now/p2"));
    assert!(resp.body.contains("id=\"nav-toggle\""));
}

#[tokio::test]
async fn test_order_page_fills_hidden_fields() {
    let mut app = TestApp::new();
    for _ in 0..2 {
        app.post_form("/cart/add", &[("id", "p1"), ("name", "Burger"), ("price", "9.50")])
            .await;
    }
    app.post_form("/cart/add", &[("id", "p2"), ("name", "Fries"), ("price", "3.25")])
        .await;

    let resp = app.get("/order").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(&format!("action=\"{ORDER_ENDPOINT}\"")));
    assert!(resp.body.contains("2x Burger - $19.00\n1x Fries - $3.25"));
    assert!(resp.body.contains("name=\"order-total\" value=\"22.25\""));
}

#[tokio::test]
async fn test_order_summary_follows_cart_edits() {
    let mut app = TestApp::new();
    for _ in 0..2 {
        app.post_form("/cart/add", &[("id", "p1"), ("name", "Burger"), ("price", "9.50")])
            .await;
    }

    let page = app.get("/order").await;
    assert!(page.body.contains("hx-get=\"/order/summary\""));
    assert!(page.body.contains("name=\"order-total\" value=\"19.00\""));

    app.post_form("/cart/update", &[("id", "p1"), ("delta", "-1")])
        .await;
    let resp = app.get("/order/summary").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("1x Burger - $9.50"));
    assert!(resp.body.contains("name=\"order-total\" value=\"9.50\""));
    assert!(!resp.body.contains("disabled>Submit Order"));

    app.post_form("/cart/remove", &[("id", "p1")]).await;
    let resp = app.get("/order/summary").await;
    assert!(resp.body.contains("Your cart is empty"));
    assert!(resp.body.contains("name=\"order-total\" value=\"0.00\""));
    assert!(resp.body.contains("disabled>Submit Order"));
}

#[tokio::test]
async fn test_order_page_with_empty_cart() {
    let mut app = TestApp::new();

    let resp = app.get("/order").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty"));
    assert!(resp.body.contains("name=\"order-total\" value=\"0.00\""));
    assert!(resp.body.contains("disabled>Submit Order"));
}

#[tokio::test]
async fn test_buy_now_leaves_cart_untouched() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", &[("id", "p1"), ("name", "Burger"), ("price", "9.50")])
        .await;

    let resp = app.get("/buy-now/p2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("1x Fries - $3.25"));
    assert!(resp.body.contains("name=\"order-total\" value=\"3.25\""));

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_buy_now_unknown_item_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/buy-now/nope").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reservations_posts_to_reservation_endpoint() {
    let mut app = TestApp::new();
    let resp = app.get("/reservations").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(&format!("action=\"{RESERVATION_ENDPOINT}\"")));
    assert!(resp.body.contains("type=\"date\""));
}

#[tokio::test]
async fn test_security_headers_allow_form_endpoint() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    let csp = resp.header("content-security-policy").unwrap_or_default();
    assert!(csp.contains("form-action 'self' https://formspree.io;"));
    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert!(resp.header("x-request-id").is_some());
}
