//! GoTrue REST client.

use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;

use super::{AuthError, AuthResult, AuthUser, Session, SessionPersistence, SignUpOutcome};
use crate::config::ClientConfig;

#[derive(Clone)]
pub struct SupabaseAuthClient<P: SessionPersistence> {
    auth_url: String,
    anon_key: String,
    client: Client,
    persistence: P,
}

impl<P: SessionPersistence> SupabaseAuthClient<P> {
    pub fn new(config: &ClientConfig, persistence: P) -> AuthResult<Self> {
        if config.supabase_anon_key.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }
        Ok(Self {
            auth_url: config.auth_url(),
            anon_key: config.supabase_anon_key.clone(),
            client: Client::builder().build()?,
            persistence,
        })
    }

    /// Load the persisted session, refreshing it when it is about to expire.
    ///
    /// A refresh failure clears the stored session and reports "signed out"
    /// instead of an error.
    pub async fn restore_session(&self) -> AuthResult<Option<Session>> {
        let Some(stored) = self.persistence.load()? else {
            return Ok(None);
        };
        if !stored.is_expired() {
            return Ok(Some(stored));
        }

        match self.refresh_session(&stored.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.persistence.clear()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        validate_credentials(email, password)?;

        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "password")])
                .json(&serde_json::json!({ "email": email.trim(), "password": password })),
        );
        let session = self.send(request).await?.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.persistence.save(&session)?;
        tracing::info!("Signed in as {}", session.user.display_name());
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        validate_credentials(email, password)?;

        let request = self.public_request(
            self.client
                .post(format!("{}/signup", self.auth_url))
                .json(&serde_json::json!({ "email": email.trim(), "password": password })),
        );
        match self.send(request).await?.into_session()? {
            Some(session) => {
                self.persistence.save(&session)?;
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Session> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }

        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "refresh_token")])
                .json(&serde_json::json!({ "refresh_token": refresh_token })),
        );
        let session = self.send(request).await?.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })?;

        self.persistence.save(&session)?;
        Ok(session)
    }

    /// Revoke the session server-side and forget it locally.
    ///
    /// An already-invalid token (401) still counts as signed out.
    pub async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !(status.is_success() || status == StatusCode::UNAUTHORIZED) {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.persistence.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn send(&self, request: RequestBuilder) -> AuthResult<TokenResponse> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<TokenResponse>().await?)
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

/// Token and signup responses share this shape; signup nests it in `session`
/// on some GoTrue versions and omits it entirely when confirmation is pending.
#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<UserPayload>,
    session: Option<Box<TokenResponse>>,
    /// Set when signup answers with the bare user object
    id: Option<String>,
}

impl TokenResponse {
    fn into_session(mut self) -> AuthResult<Option<Session>> {
        let mut nested = false;
        if self.access_token.is_none() {
            if let Some(inner) = self.session.take() {
                let outer_user = self.user.take();
                self = *inner;
                self.user = self.user.or(outer_user);
                nested = true;
            }
        }
        let flat = self;
        let has_user = flat.user.is_some() || flat.id.is_some();

        let expires_at = flat.expires_at.or_else(|| {
            flat.expires_in
                .map(|seconds| Utc::now().timestamp().saturating_add(seconds))
        });

        match (flat.access_token, flat.refresh_token, expires_at, flat.user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(Session {
                    access_token,
                    refresh_token,
                    expires_at,
                    user: user.into(),
                }))
            }
            (None, None, None, _) if has_user && !nested => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

impl From<UserPayload> for AuthUser {
    fn from(value: UserPayload) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = payload
            .error_description
            .or(payload.msg)
            .or(payload.message)
            .or(payload.error)
        {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", crate::util::compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoPersistence;

    fn user() -> UserPayload {
        UserPayload {
            id: "user".to_string(),
            email: Some("user@example.com".to_string()),
        }
    }

    #[test]
    fn response_without_tokens_means_confirmation_required() {
        let response = TokenResponse {
            user: Some(user()),
            ..TokenResponse::default()
        };
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn bare_user_signup_means_confirmation_required() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"id":"user","email":"user@example.com","confirmation_sent_at":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn nested_session_is_accepted() {
        let response = TokenResponse {
            user: Some(user()),
            session: Some(Box::new(TokenResponse {
                access_token: Some("a".to_string()),
                refresh_token: Some("r".to_string()),
                expires_in: Some(3_600),
                ..TokenResponse::default()
            })),
            ..TokenResponse::default()
        };
        let session = response.into_session().unwrap().unwrap();
        assert_eq!(session.user.id, "user");
        assert!(!session.is_expired());
    }

    #[test]
    fn partial_tokens_are_an_error() {
        let response = TokenResponse {
            access_token: Some("a".to_string()),
            user: Some(user()),
            ..TokenResponse::default()
        };
        assert!(response.into_session().is_err());
    }

    #[test]
    fn api_error_prefers_description() {
        let message = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(message, "Invalid login credentials (400)");
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, " "), "HTTP 502");
    }

    #[test]
    fn client_uses_project_auth_endpoint() {
        let config = ClientConfig::new("https://demo.supabase.co/", "anon").unwrap();
        let client = SupabaseAuthClient::new(&config, NoPersistence).unwrap();
        assert_eq!(client.auth_url, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn blank_credentials_are_rejected_locally() {
        assert!(validate_credentials(" ", "pw").is_err());
        assert!(validate_credentials("me@example.com", "").is_err());
        assert!(validate_credentials("me@example.com", "pw").is_ok());
    }
}
