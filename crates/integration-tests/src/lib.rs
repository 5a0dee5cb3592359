//! Integration tests for Bistro.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bistro-integration-tests
//! ```
//!
//! The storefront router runs in-process: [`TestApp`] drives it with
//! `tower::ServiceExt::oneshot` and carries the session cookie between
//! requests like a browser would. No server or network access is needed.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart fragments, session persistence, HTMX triggers
//! - `storefront_pages` - Menu, order, buy-now, and reservation pages

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;
use url::Url;

use bistro_storefront::config::{BistroConfig, FormspreeConfig};
use bistro_storefront::menu::Menu;
use bistro_storefront::state::AppState;

/// Order endpoint used by test configurations.
pub const ORDER_ENDPOINT: &str = "https://formspree.io/f/test-orders";

/// Reservation endpoint used by test configurations.
pub const RESERVATION_ENDPOINT: &str = "https://formspree.io/f/test-reservations";

/// Menu used by test configurations.
pub const TEST_MENU: &str = r"
name: Test Bistro
categories:
  - id: mains
    title: Mains
    items:
      - id: p1
        name: Burger
        description: Beef patty
        price: 9.50
        img: img/burger.jpg
      - id: p2
        name: Fries
        price: 3.25
  - id: desserts
    title: Desserts
    items:
      - id: creme
        name: Crème brûlée
        price: 6.75
";

/// A fully populated configuration pointing at the test endpoints.
///
/// # Panics
///
/// Panics if the endpoint constants are not valid URLs.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_config() -> BistroConfig {
    BistroConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        menu_path: PathBuf::from("unused.yaml"),
        formspree: FormspreeConfig {
            order_endpoint: Url::parse(ORDER_ENDPOINT).expect("valid order endpoint"),
            reservation_endpoint: Url::parse(RESERVATION_ENDPOINT)
                .expect("valid reservation endpoint"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A response reduced to what the tests inspect.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A header value as a string, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process storefront with a single browser's cookie jar.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the storefront around [`TEST_MENU`].
    ///
    /// # Panics
    ///
    /// Panics if the test menu does not parse.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let menu = Menu::from_yaml(TEST_MENU).expect("test menu parses");
        Self {
            router: bistro_storefront::app(AppState::new(test_config(), menu)),
            cookie: None,
        }
    }

    /// A second browser sharing this app's session store but no cookie.
    #[must_use]
    pub fn other_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.send(
            Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    #[allow(clippy::expect_used)]
    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        let request = builder.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.cookie = set_cookie.split(';').next().map(str::to_owned);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
