//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the public
//! profile of the authenticated user.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserProfile};

pub(crate) const USER_KEY: &str = "user";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's public profile in the session cookie.
    pub fn persist_user(&self, profile: &UserProfile) -> Result<(), Error> {
        self.0
            .insert(USER_KEY, profile)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current profile from the session, if present.
    ///
    /// A tampered or stale value reads as anonymous with a warning log; the
    /// session endpoint must never error on a bad cookie.
    pub fn user(&self) -> Option<UserProfile> {
        match self.0.get::<UserProfile>(USER_KEY) {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, "unreadable profile in session cookie");
                None
            }
        }
    }

    /// Require an authenticated profile or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<UserProfile, Error> {
        self.user()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Destroy the session. Idempotent; succeeds with no session present.
    pub fn clear(&self) {
        self.0.purge();
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
