//! Request builder and response parser for the todo API.
//!
//! # Design
//! `ApiClient` holds the base URL and the `SessionStore`; it carries no other
//! state between calls. Each remote operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse` — the caller executes the round-trip in between.
//!
//! Authorized operations consult the session store *at build time*: with no
//! stored token they fail with `ApiError::NotAuthenticated` and no request
//! value ever exists, which makes the "zero network calls" guarantee
//! structural rather than behavioral. `logout` is purely local and never
//! builds a request either; server-side session invalidation is out of scope.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::{SessionStore, Storage};
use crate::types::{CreateTodo, LoginRequest, LoginResponse, Todo};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "content-type";

/// Client for the four remote operations: login, list todos, create todo,
/// logout. Generic over the storage backing the session.
#[derive(Debug)]
pub struct ApiClient<S: Storage> {
    base_url: String,
    session: SessionStore<S>,
}

impl<S: Storage> ApiClient<S> {
    pub fn new(base_url: &str, storage: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: SessionStore::new(storage),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Build the login request. Email and password are passed through
    /// unvalidated.
    pub fn build_login(&self, email: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Transport(format!("serialize login request: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/login", self.base_url),
            headers: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Parse the login response. On success the returned token (and email,
    /// for display) are persisted before this method returns, so a
    /// subsequent authorized build sees the session.
    pub fn parse_login(&mut self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        check_success(&response)?;
        let login: LoginResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Transport(format!("malformed login response: {e}")))?;
        self.session.set_token(&login.session_id);
        self.session.set_user_email(&login.email);
        Ok(login)
    }

    /// Build the list request. Fails with `NotAuthenticated`, without
    /// building anything, when no token is stored.
    pub fn build_list_todos(&self) -> Result<HttpRequest, ApiError> {
        let token = self.session.token().ok_or(ApiError::NotAuthenticated)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todos", self.base_url),
            headers: vec![(AUTHORIZATION.to_string(), token)],
            body: None,
        })
    }

    /// Parse the list response. The server's ordering is returned verbatim —
    /// no re-sorting, deduplication, or filtering.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Transport(format!("malformed todo list: {e}")))
    }

    /// Build the create request. The title is sent as given; trimming and
    /// emptiness checks are the caller's responsibility.
    pub fn build_create_todo(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let token = self.session.token().ok_or(ApiError::NotAuthenticated)?;
        let payload = CreateTodo {
            title: title.to_string(),
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Transport(format!("serialize create request: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/todos", self.base_url),
            headers: vec![
                (CONTENT_TYPE.to_string(), "application/json".to_string()),
                (AUTHORIZATION.to_string(), token),
            ],
            body: Some(body),
        })
    }

    /// Parse the created todo as returned by the server (which assigns id,
    /// completed=false and created_at).
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Transport(format!("malformed todo response: {e}")))
    }

    /// Clear the local session. No request is issued; the server-side
    /// session, if any, is left to expire on its own.
    pub fn logout(&mut self) {
        self.session.clear_token();
        self.session.clear_user_email();
    }
}

/// Map any non-2xx response to `ApiError::Http` carrying the raw body text.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        message: response.body.clone(),
    })
}
