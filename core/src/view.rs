//! Visible-list state machine for the todo view.
//!
//! # Design
//! `TodoListView` is the sole writer of the rendered state: the visible list,
//! the in-flight flags (`loading`, `creating` — independent, they can
//! combine), the last surfaced error and the mirrored title input. It drives
//! the `ApiClient` through `start_*` / `finish_*` pairs that bracket the
//! host's HTTP round-trip, mirroring the client's build/parse split.
//!
//! Every `start_*` mints a ticket carrying the view's generation at mint
//! time; `finish_*` discards a result whose ticket is stale. The generation
//! only advances on logout/teardown, so a response that arrives after the
//! view was torn down is dropped instead of resurrecting state. It does
//! *not* order concurrent flows: if a fetch and a create are both in flight,
//! whichever finish runs last determines the final visible list, and a
//! create applied before an overlapping fetch completes is overwritten by
//! the fetch's wholesale replacement. Known limitation, kept as observed.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::Storage;
use crate::types::Todo;

/// Ticket for an in-flight list fetch. The host executes `request` and hands
/// the outcome back to [`TodoListView::finish_refresh`].
#[derive(Debug)]
pub struct PendingFetch {
    pub request: HttpRequest,
    generation: u64,
}

/// Ticket for an in-flight create. The trimmed title already rides in the
/// request body.
#[derive(Debug)]
pub struct PendingCreate {
    pub request: HttpRequest,
    generation: u64,
}

/// Owns the visible todo list and its UI flags.
///
/// The list is ordered newest-first: a refresh replaces it with the server's
/// sequence verbatim, and a successful create prepends without re-fetching.
#[derive(Debug, Default)]
pub struct TodoListView {
    todos: Vec<Todo>,
    title_input: String,
    loading: bool,
    creating: bool,
    error: Option<String>,
    generation: u64,
}

impl TodoListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible list, in render order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Last surfaced failure message, cleared at the start of each attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mirror the title input as typed. Trimming happens on submit, not here.
    pub fn set_title_input(&mut self, text: &str) {
        self.title_input = text.to_string();
    }

    /// Begin a fetch of the whole list. Used both for the initial mount and
    /// for user-triggered refreshes — the transition is identical.
    ///
    /// Returns `None` without touching the client while a fetch is already
    /// in flight, or when the session is missing (the failure is applied
    /// immediately and nothing reaches the network).
    pub fn start_refresh<S: Storage>(&mut self, api: &ApiClient<S>) -> Option<PendingFetch> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        match api.build_list_todos() {
            Ok(request) => Some(PendingFetch {
                request,
                generation: self.generation,
            }),
            Err(err) => {
                self.error = Some(err.user_message());
                self.loading = false;
                None
            }
        }
    }

    /// Apply the outcome of a fetch. A stale ticket (view torn down since
    /// the flow started) is discarded without touching any state.
    ///
    /// On success the visible list is replaced wholesale — the server's
    /// ordering is authoritative. On failure the previous list is left
    /// unchanged and only the error message updates.
    pub fn finish_refresh<S: Storage>(
        &mut self,
        api: &ApiClient<S>,
        pending: PendingFetch,
        outcome: Result<HttpResponse, ApiError>,
    ) {
        if pending.generation != self.generation {
            return;
        }
        self.loading = false;
        match outcome.and_then(|resp| api.parse_list_todos(resp)) {
            Ok(todos) => self.todos = todos,
            Err(err) => self.error = Some(err.user_message()),
        }
    }

    /// Begin creating a todo from the current title input.
    ///
    /// Guarded: an empty-after-trim title, or a create already in flight,
    /// is a no-op that never consults the client.
    pub fn start_create<S: Storage>(&mut self, api: &ApiClient<S>) -> Option<PendingCreate> {
        let title = self.title_input.trim().to_string();
        if title.is_empty() || self.creating {
            return None;
        }
        self.creating = true;
        self.error = None;
        match api.build_create_todo(&title) {
            Ok(request) => Some(PendingCreate {
                request,
                generation: self.generation,
            }),
            Err(err) => {
                self.error = Some(err.user_message());
                self.creating = false;
                None
            }
        }
    }

    /// Apply the outcome of a create. Stale tickets are discarded.
    ///
    /// On success the returned todo is prepended to the visible list (no
    /// re-fetch, no dedup) and the title input cleared. On failure the
    /// input is left as typed so the user can retry.
    pub fn finish_create<S: Storage>(
        &mut self,
        api: &ApiClient<S>,
        pending: PendingCreate,
        outcome: Result<HttpResponse, ApiError>,
    ) {
        if pending.generation != self.generation {
            return;
        }
        self.creating = false;
        match outcome.and_then(|resp| api.parse_create_todo(resp)) {
            Ok(todo) => {
                self.todos.insert(0, todo);
                self.title_input.clear();
            }
            Err(err) => self.error = Some(err.user_message()),
        }
    }

    /// Clear the session and tear down the view state entirely. Bumps the
    /// generation so any still-in-flight flow lands stale.
    pub fn logout<S: Storage>(&mut self, api: &mut ApiClient<S>) {
        api.logout();
        self.todos.clear();
        self.title_input.clear();
        self.loading = false;
        self.creating = false;
        self.error = None;
        self.generation += 1;
    }
}
