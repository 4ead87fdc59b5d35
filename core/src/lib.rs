//! Synchronous client core for the session-backed todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//! The gap between a `build_*` and its `parse_*` is the only place a flow
//! suspends; everything else runs to completion on the calling thread.
//!
//! # Design
//! - `SessionStore` owns the persisted session token behind an injectable
//!   `Storage` trait, so tests run against an in-memory fake.
//! - `ApiClient` attaches the token to authorized requests and maps
//!   non-success responses to a tagged `ApiError`; an authorized operation
//!   with no stored token fails before any request is built.
//! - `TodoListView` owns the visible list and its in-flight flags, and is
//!   the sole writer of that state. Hosts pump it through `start_*` /
//!   `finish_*` pairs.
//! - Types use owned `String` / `Vec` fields; DTOs are defined independently
//!   from the mock-server crate and integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod types;
pub mod view;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{MemoryStorage, SessionStore, Storage};
pub use types::{CreateTodo, LoginRequest, LoginResponse, Todo, User};
pub use view::{PendingCreate, PendingFetch, TodoListView};
