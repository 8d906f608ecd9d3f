//! PostgREST-backed note store for a Supabase project.
//!
//! Expected table shape: `id`, `user_id`, `title`, `content`, `updated_at`.
//! Row-level security is assumed to restrict rows to the signed-in user; the
//! owner filter on reads is sent anyway.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::NoteStore;
use crate::auth::{LiveSession, SessionRefresher};
use crate::config::ClientConfig;
use crate::models::{Note, NoteDraft, NoteId};
use crate::util::compact_text;
use crate::{Error, Result};

const SELECT_COLUMNS: &str = "id,title,content,updated_at";

/// Acts on behalf of the signed-in user of `session`. Expired tokens are
/// refreshed before a request; a 401 triggers one refresh and a retry.
#[derive(Clone)]
pub struct SupabaseNoteStore<R> {
    notes_url: String,
    anon_key: String,
    session: LiveSession<R>,
    client: Client,
}

impl<R: SessionRefresher> SupabaseNoteStore<R> {
    pub fn new(config: &ClientConfig, session: LiveSession<R>) -> Result<Self> {
        Ok(Self {
            notes_url: config.notes_url(),
            anon_key: config.supabase_anon_key.clone(),
            session,
            client: Client::builder().build()?,
        })
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn returning(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        self.authorized(request, token)
            .header("Prefer", "return=representation")
            .query(&[("select", SELECT_COLUMNS)])
    }

    /// Send the request built by `build`, retrying once with a refreshed
    /// token if the first attempt is rejected as unauthorized.
    async fn send(&self, build: impl Fn(&str) -> RequestBuilder) -> Result<Response> {
        let token = self.session.access_token().await?;
        let response = build(&token).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        let token = self.session.refresh_rejected(&token).await?;
        Ok(build(&token).send().await?)
    }

    async fn read_rows(response: Response, operation: &str) -> Result<Vec<NoteRow>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote(format!(
                "{operation} failed with HTTP {}: {}",
                status.as_u16(),
                describe_error_body(&body)
            )));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl<R: SessionRefresher> NoteStore for SupabaseNoteStore<R> {
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>> {
        let owner_filter = format!("eq.{owner}");
        let response = self
            .send(|token| {
                self.authorized(self.client.get(&self.notes_url), token)
                    .query(&[
                        ("select", SELECT_COLUMNS),
                        ("user_id", owner_filter.as_str()),
                        ("order", "updated_at.desc"),
                    ])
            })
            .await?;
        let rows = Self::read_rows(response, "List notes").await?;
        tracing::debug!("Fetched {} note rows", rows.len());
        rows.into_iter().map(NoteRow::into_note).collect()
    }

    async fn insert_note(&self, owner: &str, draft: &NoteDraft) -> Result<Note> {
        let payload = NewNoteRow {
            title: &draft.title,
            content: &draft.content,
            user_id: owner,
        };
        let response = self
            .send(|token| self.returning(self.client.post(&self.notes_url).json(&payload), token))
            .await?;
        let rows = Self::read_rows(response, "Insert note").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Remote("Insert note returned no row".to_string()))?
            .into_note()
    }

    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> Result<()> {
        let payload = NoteChanges {
            title: &draft.title,
            content: &draft.content,
            updated_at: Utc::now(),
        };
        let id_filter = format!("eq.{id}");
        let response = self
            .send(|token| {
                self.returning(
                    self.client
                        .patch(&self.notes_url)
                        .query(&[("id", id_filter.as_str())])
                        .json(&payload),
                    token,
                )
            })
            .await?;
        let rows = Self::read_rows(response, "Update note").await?;
        if rows.is_empty() {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let id_filter = format!("eq.{id}");
        let response = self
            .send(|token| {
                self.returning(
                    self.client
                        .delete(&self.notes_url)
                        .query(&[("id", id_filter.as_str())]),
                    token,
                )
            })
            .await?;
        let rows = Self::read_rows(response, "Delete note").await?;
        if rows.is_empty() {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct NewNoteRow<'a> {
    title: &'a str,
    content: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct NoteChanges<'a> {
    title: &'a str,
    content: &'a str,
    updated_at: DateTime<Utc>,
}

/// Primary keys may be uuid (text) or bigint columns.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
struct NoteRow {
    id: RowId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    updated_at: String,
}

impl NoteRow {
    fn into_note(self) -> Result<Note> {
        let id = match self.id {
            RowId::Text(text) => NoteId::parse(text)?,
            RowId::Number(number) => NoteId::parse(number.to_string())?,
        };
        Ok(Note {
            id,
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            last_modified: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Accepts `timestamptz` output and zone-less `timestamp` output (read as UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|error| Error::Remote(format!("Invalid updated_at value '{raw}': {error}")))
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn describe_error_body(body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<PostgrestError>(body) {
        if let Some(message) = error.message {
            let extra = error.details.or(error.hint).unwrap_or_default();
            return if extra.is_empty() {
                compact_text(&message)
            } else {
                compact_text(&format!("{message} ({extra})"))
            };
        }
    }
    compact_text(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthResult, AuthUser, Session};

    #[derive(Clone)]
    struct NoRefresh;

    impl SessionRefresher for NoRefresh {
        async fn refresh_session(&self, _refresh_token: &str) -> AuthResult<Session> {
            Err(crate::auth::AuthError::Api("refresh disabled".to_string()))
        }
    }

    fn session() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: chrono::Utc::now().timestamp() + 3_600,
            user: AuthUser {
                id: "owner".to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn store_targets_notes_table() {
        let config = ClientConfig::new("https://demo.supabase.co", "anon")
            .unwrap()
            .with_notes_table("journal");
        let store = SupabaseNoteStore::new(&config, LiveSession::new(NoRefresh, session())).unwrap();
        assert_eq!(store.notes_url, "https://demo.supabase.co/rest/v1/journal");
    }

    #[tokio::test]
    async fn requests_carry_the_live_access_token() {
        let config = ClientConfig::new("https://demo.supabase.co", "anon").unwrap();
        let store = SupabaseNoteStore::new(&config, LiveSession::new(NoRefresh, session())).unwrap();

        let token = store.session.access_token().await.unwrap();
        let request = store
            .authorized(store.client.get(&store.notes_url), &token)
            .build()
            .unwrap();
        let headers = request.headers();
        assert_eq!(headers["authorization"], "Bearer token");
        assert_eq!(headers["apikey"], "anon");
    }

    #[tokio::test]
    async fn unrefreshable_expired_session_fails_before_sending() {
        let config = ClientConfig::new("https://demo.supabase.co", "anon").unwrap();
        let expired = Session {
            expires_at: 0,
            ..session()
        };
        let store = SupabaseNoteStore::new(&config, LiveSession::new(NoRefresh, expired)).unwrap();

        let result = store.list_notes("owner").await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[test]
    fn decodes_uuid_rows_with_null_fields() {
        let rows: Vec<NoteRow> = serde_json::from_str(
            r#"[{"id":"2f1c","title":null,"content":"body","updated_at":"2024-05-01T10:00:00.123456+00:00"}]"#,
        )
        .unwrap();
        let note = rows.into_iter().next().unwrap().into_note().unwrap();
        assert_eq!(note.id.as_str(), "2f1c");
        assert_eq!(note.title, "");
        assert_eq!(note.content, "body");
        assert_eq!(note.last_modified.timestamp(), 1_714_557_600);
    }

    #[test]
    fn decodes_numeric_ids_and_naive_timestamps() {
        let rows: Vec<NoteRow> = serde_json::from_str(
            r#"[{"id":17,"title":"t","content":"c","updated_at":"2024-05-01T10:00:00"}]"#,
        )
        .unwrap();
        let note = rows.into_iter().next().unwrap().into_note().unwrap();
        assert_eq!(note.id.as_str(), "17");
        assert_eq!(note.last_modified.timestamp(), 1_714_557_600);
    }

    #[test]
    fn blank_row_id_is_rejected() {
        let row = NoteRow {
            id: RowId::Text("  ".to_string()),
            title: None,
            content: None,
            updated_at: "2024-05-01T10:00:00Z".to_string(),
        };
        assert!(row.into_note().is_err());
    }

    #[test]
    fn error_body_uses_postgrest_message() {
        let body = r#"{"code":"42501","message":"permission denied","details":null,"hint":"check RLS"}"#;
        assert_eq!(describe_error_body(body), "permission denied (check RLS)");
        assert_eq!(describe_error_body("  plain failure "), "plain failure");
    }

    #[test]
    fn insert_payload_is_scoped_to_owner() {
        let payload = NewNoteRow {
            title: "t",
            content: "c",
            user_id: "owner",
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["user_id"], "owner");
        assert_eq!(value["title"], "t");
    }
}
