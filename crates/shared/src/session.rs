//! Explicit session context.
//!
//! Holds the token pair for the signed-in user. Callers own a `Session` and
//! pass it to whatever talks to the API; there is no process-wide token store.

use jsonwebtoken::dangerous::insecure_decode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::{RefreshRequest, SessionClaims, TokenPair};

/// Errors that can occur while reading session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No tokens are held.
    #[error("not signed in")]
    NotAuthenticated,

    /// The access token could not be decoded.
    #[error("malformed access token: {0}")]
    MalformedToken(String),
}

impl From<SessionError> for crate::AppError {
    fn from(err: SessionError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}

/// Session state for one signed-in user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tokens: Option<TokenPair>,
}

impl Session {
    /// Creates an empty (signed-out) session.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: None }
    }

    /// Stores the tokens returned by a successful login.
    pub fn login(&mut self, tokens: TokenPair) {
        debug!("session started");
        self.tokens = Some(tokens);
    }

    /// Drops all tokens.
    pub fn logout(&mut self) {
        debug!("session ended");
        self.tokens = None;
    }

    /// Returns true if an access token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    /// Returns the `Authorization` header value for API requests.
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        self.access_token().map(|token| format!("Bearer {token}"))
    }

    /// Builds the body of a refresh call. Refreshing needs both tokens, so a
    /// session missing either one cannot refresh.
    pub fn refresh_tokens(&self) -> Result<RefreshRequest, SessionError> {
        self.tokens
            .as_ref()
            .filter(|t| !t.access_token.is_empty() && !t.refresh_token.is_empty())
            .map(RefreshRequest::from)
            .ok_or(SessionError::NotAuthenticated)
    }

    /// Replaces the tokens after a successful refresh.
    pub fn apply_refresh(&mut self, tokens: TokenPair) {
        debug!("session tokens refreshed");
        self.tokens = Some(tokens);
    }

    /// Clears the session after the API rejected a refresh; the user has to
    /// sign in again.
    pub fn refresh_failed(&mut self) {
        warn!("token refresh failed, clearing session");
        self.tokens = None;
    }

    /// Reads the access token claims without checking the signature.
    ///
    /// The API is the party that verifies tokens; the front-end only needs to
    /// know who is signed in.
    pub fn claims(&self) -> Result<SessionClaims, SessionError> {
        let token = self.access_token().ok_or(SessionError::NotAuthenticated)?;
        insecure_decode::<SessionClaims>(token)
            .map(|data| data.claims)
            .map_err(|e| SessionError::MalformedToken(e.to_string()))
    }

    /// Returns the signed-in user's id (`sub`, else `name`), or `None` when
    /// signed out or the token cannot be read.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.claims()
            .ok()
            .and_then(|claims| claims.user_id().map(str::to_string))
    }
}
