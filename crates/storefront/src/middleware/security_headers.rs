//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. The only loosening
//! over a locked-down policy is what the pages need: the HTMX script, menu
//! images, and form posts to the configured form-processing endpoints.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use crate::config::FormspreeConfig;
use crate::state::AppState;

/// Origin serving the HTMX script.
const HTMX_ORIGIN: &str = "https://unpkg.com";

/// Build the CSP for the configured form endpoints.
///
/// ```text
/// default-src 'none';
/// script-src 'self' https://unpkg.com;
/// style-src 'self';
/// img-src 'self';
/// connect-src 'self';
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self' <form endpoint origins>;
/// frame-ancestors 'none'
/// ```
#[must_use]
pub fn content_security_policy(formspree: &FormspreeConfig) -> String {
    let form_action = std::iter::once("'self'".to_string())
        .chain(formspree.origins())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "default-src 'none'; \
         script-src 'self' {HTMX_ORIGIN}; \
         style-src 'self'; \
         img-src 'self'; \
         connect-src 'self'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action {form_action}; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: no-referrer` - Zero referrer leakage
/// - `Content-Security-Policy` - See [`content_security_policy`]
/// - `Cache-Control: no-store` - Cart fragments are per-browser
/// - `Cross-Origin-Opener-Policy: same-origin` - Process isolation
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    match HeaderValue::from_str(&content_security_policy(&state.config().formspree)) {
        Ok(csp) => {
            headers.insert(CONTENT_SECURITY_POLICY, csp);
        }
        Err(e) => tracing::error!(error = %e, "Content-Security-Policy is not a valid header"),
    }

    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-store, max-age=0"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_csp_form_action_includes_endpoints() {
        let formspree = FormspreeConfig {
            order_endpoint: Url::parse("https://formspree.io/f/orders").unwrap(),
            reservation_endpoint: Url::parse("https://forms.bistro.test/reserve").unwrap(),
        };
        let csp = content_security_policy(&formspree);
        assert!(csp.contains("form-action 'self' https://formspree.io https://forms.bistro.test;"));
        assert!(HeaderValue::from_str(&csp).is_ok());
    }
}
