//! Browser hardening headers added to every response.

use actix_web::middleware::DefaultHeaders;

/// Content security policy for server-rendered pages.
pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com";

/// Middleware inserting the security headers unless a handler set them.
///
/// `X-XSS-Protection` is explicitly disabled; the CSP supersedes it.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
        .add(("Referrer-Policy", "origin-when-cross-origin"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "deny"))
        .add(("X-XSS-Protection", "0"))
}
