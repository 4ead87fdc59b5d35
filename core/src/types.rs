//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the remote service's JSON schema but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. Identifiers are server-assigned integers
//! and `created_at` is the server's ISO-8601 timestamp carried as an opaque
//! string — the client never constructs or interprets either.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API. Immutable on the client; the
/// server owns the `completed` flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
}

/// A user as echoed from server responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

impl User {
    /// Zero-value stand-in used while a session is rehydrated from storage,
    /// before any server response has supplied real user data.
    pub fn placeholder(email: &str) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            created_at: String::new(),
        }
    }
}

/// Credentials payload for the login call. Passed through unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Produced exactly once per successful login; consumed to populate the
/// session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub session_id: String,
    pub user_id: i64,
    pub email: String,
}

/// Request payload for creating a new todo. The server assigns everything
/// else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_deserializes_from_wire_shape() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":5,"user_id":1,"title":"Buy milk","completed":false,"created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, 5);
        assert_eq!(todo.user_id, 1);
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn login_response_roundtrips_through_json() {
        let resp = LoginResponse {
            session_id: "abc".to_string(),
            user_id: 1,
            email: "a@b.com".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: LoginResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resp);
    }

    #[test]
    fn placeholder_user_is_zero_valued() {
        let user = User::placeholder("a@b.com");
        assert_eq!(user.id, 0);
        assert_eq!(user.email, "a@b.com");
        assert!(user.created_at.is_empty());
    }
}
