//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal in domain terms: the
//! authenticated user id and one-shot flash messages.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "authenticated_user_id";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user_id` as logged in, renewing the session identifier first.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the logged-in user, renewing the session identifier first.
    pub fn forget_user(&self) {
        self.0.renew();
        self.0.remove(USER_ID_KEY);
    }

    /// Fetch the logged-in user id, if present and well formed.
    ///
    /// A value that does not decode as a [`UserId`] is treated as anonymous.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<UserId>(USER_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                None
            }
        }
    }

    /// Queue a message shown on the next rendered page.
    pub fn put_flash(&self, message: &str) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Remove and return the queued flash message.
    pub fn take_flash(&self) -> Option<String> {
        match self.0.remove_as::<String>(FLASH_KEY)? {
            Ok(message) => Some(message),
            Err(raw) => {
                tracing::warn!(raw = %raw, "discarding malformed flash message");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
