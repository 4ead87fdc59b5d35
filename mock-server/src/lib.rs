use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub user_id: i64,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

struct Account {
    id: i64,
    password: String,
}

/// In-memory replacement for the real service's database. Todos are stored
/// oldest-first and served newest-first.
#[derive(Default)]
pub struct AppState {
    users: HashMap<String, Account>,
    sessions: HashMap<String, i64>,
    todos: Vec<Todo>,
    next_user_id: i64,
    next_todo_id: i64,
}

pub type Db = Arc<RwLock<AppState>>;

/// Plain-text error response: the contract says text body = message.
type ErrorResponse = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState::default()));
    Router::new()
        .route("/login", post(login))
        .route("/todos", get(list_todos).post(create_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// First login with an unknown email registers the account on the fly, the
/// same way the real service does. A known email with the wrong password is
/// rejected.
async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorResponse> {
    let mut state = db.write().await;

    let existing = state
        .users
        .get(&input.email)
        .map(|a| (a.id, a.password.clone()));
    let user_id = match existing {
        Some((id, password)) if password == input.password => id,
        Some(_) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
            ))
        }
        None => {
            state.next_user_id += 1;
            let id = state.next_user_id;
            state.users.insert(
                input.email.clone(),
                Account {
                    id,
                    password: input.password.clone(),
                },
            );
            id
        }
    };

    let session_id = Uuid::new_v4().simple().to_string();
    state.sessions.insert(session_id.clone(), user_id);

    Ok(Json(LoginResponse {
        session_id,
        user_id,
        email: input.email,
    }))
}

/// Resolve the `Authorization` header (the raw session id) to a user id.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<i64, ErrorResponse> {
    let session_id = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing authorization header".to_string(),
        ))?;
    state.sessions.get(session_id).copied().ok_or((
        StatusCode::UNAUTHORIZED,
        "Invalid or expired session".to_string(),
    ))
}

async fn list_todos(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Todo>>, ErrorResponse> {
    let state = db.read().await;
    let user_id = authenticate(&state, &headers)?;
    let todos: Vec<Todo> = state
        .todos
        .iter()
        .rev()
        .filter(|t| t.user_id == user_id)
        .cloned()
        .collect();
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, ErrorResponse> {
    let mut state = db.write().await;
    let user_id = authenticate(&state, &headers)?;

    if input.title.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title is required".to_string()));
    }

    state.next_todo_id += 1;
    let todo = Todo {
        id: state.next_todo_id,
        user_id,
        title: input.title,
        completed: false,
        created_at: now_rfc3339(),
    };
    state.todos.push(todo.clone());
    Ok(Json(todo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_wire_shape() {
        let todo = Todo {
            id: 5,
            user_id: 1,
            title: "Test".to_string(),
            completed: false,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn login_request_rejects_missing_password() {
        let result: Result<LoginRequest, _> = serde_json::from_str(r#"{"email":"a@b.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"not_title":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn now_is_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'), "timestamp should be RFC3339: {ts}");
    }
}
