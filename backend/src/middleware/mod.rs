//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler,
//! such as trace identifiers, completion logging and security headers.

pub mod security_headers;
pub mod trace;

pub use security_headers::security_headers;
pub use trace::Trace;
