//! The session a long-lived client acts with, refreshed on demand.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{AuthResult, Session, SessionPersistence, SupabaseAuthClient};

/// Exchanges a refresh token for a new session.
#[allow(async_fn_in_trait)]
pub trait SessionRefresher {
    async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Session>;
}

impl<P: SessionPersistence> SessionRefresher for SupabaseAuthClient<P> {
    async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Session> {
        Self::refresh_session(self, refresh_token).await
    }
}

/// Shared, refreshable session. Clones share the same session.
///
/// Refreshes are serialized: concurrent callers that find the same expired
/// or rejected token trigger a single refresh.
pub struct LiveSession<R> {
    refresher: R,
    current: Arc<Mutex<Session>>,
}

impl<R: Clone> Clone for LiveSession<R> {
    fn clone(&self) -> Self {
        Self {
            refresher: self.refresher.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

impl<R: SessionRefresher> LiveSession<R> {
    pub fn new(refresher: R, session: Session) -> Self {
        Self {
            refresher,
            current: Arc::new(Mutex::new(session)),
        }
    }

    /// A token that is not about to expire.
    pub async fn access_token(&self) -> AuthResult<String> {
        let mut current = self.current.lock().await;
        if current.is_expired() {
            tracing::debug!("Access token is about to expire; refreshing session");
            let refreshed = self.refresher.refresh_session(&current.refresh_token).await?;
            *current = refreshed;
        }
        Ok(current.access_token.clone())
    }

    /// A replacement for `rejected` after the server answered 401.
    ///
    /// Refreshes only if `rejected` is still the current token.
    pub async fn refresh_rejected(&self, rejected: &str) -> AuthResult<String> {
        let mut current = self.current.lock().await;
        if current.access_token == rejected {
            tracing::debug!("Access token was rejected; refreshing session");
            let refreshed = self.refresher.refresh_session(&current.refresh_token).await?;
            *current = refreshed;
        }
        Ok(current.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::auth::{AuthError, AuthUser};

    fn session(token: &str, expires_at: i64) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: format!("refresh-for-{token}"),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: None,
            },
        }
    }

    #[derive(Clone, Default)]
    struct CountingRefresher {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingRefresher {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SessionRefresher for CountingRefresher {
        async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Session> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(AuthError::Api("refresh token revoked".to_string()));
            }
            assert!(refresh_token.starts_with("refresh-for-"));
            Ok(session(
                &format!("fresh-{call}"),
                Utc::now().timestamp() + 3_600,
            ))
        }
    }

    #[tokio::test]
    async fn valid_token_is_used_as_is() {
        let refresher = CountingRefresher::default();
        let live = LiveSession::new(
            refresher.clone(),
            session("original", Utc::now().timestamp() + 3_600),
        );

        assert_eq!(live.access_token().await.unwrap(), "original");
        assert_eq!(refresher.calls(), 0);
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_once() {
        let refresher = CountingRefresher::default();
        let live = LiveSession::new(
            refresher.clone(),
            session("original", Utc::now().timestamp() + 30),
        );

        assert_eq!(live.access_token().await.unwrap(), "fresh-1");
        assert_eq!(live.access_token().await.unwrap(), "fresh-1");
        assert_eq!(refresher.calls(), 1);
        assert_eq!(live.clone().access_token().await.unwrap(), "fresh-1");
    }

    #[tokio::test]
    async fn rejected_token_is_replaced_only_once() {
        let refresher = CountingRefresher::default();
        let live = LiveSession::new(
            refresher.clone(),
            session("original", Utc::now().timestamp() + 3_600),
        );

        assert_eq!(live.refresh_rejected("original").await.unwrap(), "fresh-1");
        // A second request that was also rejected with the old token
        assert_eq!(live.refresh_rejected("original").await.unwrap(), "fresh-1");
        assert_eq!(refresher.calls(), 1);
    }

    #[tokio::test]
    async fn refresh_failure_is_reported() {
        let refresher = CountingRefresher {
            fail: true,
            ..CountingRefresher::default()
        };
        let live = LiveSession::new(refresher, session("original", 0));

        assert!(matches!(live.access_token().await, Err(AuthError::Api(_))));
        assert!(live.access_token().await.is_err());
    }
}
