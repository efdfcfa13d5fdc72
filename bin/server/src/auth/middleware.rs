//! Session extractor for Axum.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use league_portal_platform_access::{SessionContext, SessionId};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// The caller's authorization context, if they hold a live session.
///
/// Missing, unknown and expired sessions all yield `None`; the policy
/// decides whether that is acceptable for the action at hand. A failing
/// session store rejects the request, so public reads do not take this
/// extractor.
pub struct CurrentSession(pub Option<SessionContext>);

impl CurrentSession {
    /// Borrows the context for a policy check.
    pub fn context(&self) -> Option<&SessionContext> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self(None));
        };
        let session_id = SessionId::new(cookie.value().to_string());

        let session = app_state
            .sessions
            .find_by_id(&session_id)
            .await
            .map_err(|report| ApiError::store("Failed to load session", report))?;

        match session {
            None => {
                tracing::debug!("unknown session cookie");
                Ok(Self(None))
            }
            Some(session) if session.is_expired() => {
                if let Err(report) = app_state.sessions.delete(&session_id).await {
                    tracing::warn!(error = %report, "failed to delete expired session");
                }
                Ok(Self(None))
            }
            Some(session) => Ok(Self(Some(session.context()))),
        }
    }
}
