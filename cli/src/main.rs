//! Interactive host for the todo client core.
//!
//! Reads commands from stdin, executes the core's HTTP requests with ureq,
//! and renders the visible list to stdout. The session survives restarts
//! through a JSON file on disk.

mod http;
mod storage;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use todo_client::{ApiClient, Storage, TodoListView, User};
use tracing_subscriber::EnvFilter;

use crate::storage::FileStorage;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let base_url =
        std::env::var("TODO_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let mut api = ApiClient::new(&base_url, FileStorage::load(storage::state_path()?));
    let mut view = TodoListView::new();

    if api.is_authenticated() {
        // Session rehydrated from disk; only the email is known until the
        // server says otherwise, so a zero-value user stands in.
        let user = rehydrated_user(&api);
        println!("Welcome back, {}", user.email);
        refresh(&mut view, &api);
        render(&view);
    } else {
        println!("Not logged in. Commands: login <email> <password>, list, add <title>, logout, quit");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "" => {}
            "login" => {
                login(&mut api, &mut view, rest);
                render(&view);
            }
            "list" | "refresh" => {
                refresh(&mut view, &api);
                render(&view);
            }
            "add" => {
                view.set_title_input(rest);
                if let Some(pending) = view.start_create(&api) {
                    let outcome = http::execute(&pending.request);
                    view.finish_create(&api, pending, outcome);
                }
                render(&view);
            }
            "whoami" => match api.session().user_email() {
                Some(email) => println!("{email}"),
                None => println!("not logged in"),
            },
            "logout" => {
                view.logout(&mut api);
                println!("Logged out");
            }
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}

/// The login form stand-in: failures are caught and displayed, never fatal.
fn login(api: &mut ApiClient<FileStorage>, view: &mut TodoListView, args: &str) {
    let Some((email, password)) = args.split_once(' ') else {
        println!("usage: login <email> <password>");
        return;
    };

    let outcome = api
        .build_login(email, password)
        .and_then(|req| http::execute(&req))
        .and_then(|resp| api.parse_login(resp));

    match outcome {
        Ok(login) => {
            println!("Welcome, {}", login.email);
            refresh(view, api);
        }
        Err(err) => println!("login failed: {}", err.user_message()),
    }
}

/// Stand-in user for a session restored from storage: zero-valued except
/// for the persisted email, until a server response supplies real data.
fn rehydrated_user<S: Storage>(api: &ApiClient<S>) -> User {
    let email = api
        .session()
        .user_email()
        .unwrap_or_else(|| "user@example.com".to_string());
    User::placeholder(&email)
}

/// Run one fetch flow to completion. Used for the initial mount and for
/// user-triggered refreshes alike.
fn refresh(view: &mut TodoListView, api: &ApiClient<FileStorage>) {
    if let Some(pending) = view.start_refresh(api) {
        let outcome = http::execute(&pending.request);
        view.finish_refresh(api, pending, outcome);
    }
}

fn render(view: &TodoListView) {
    if let Some(error) = view.error() {
        println!("error: {error}");
    }
    if view.todos().is_empty() {
        println!("No todos yet.");
        return;
    }
    println!("Todo items ({}):", view.todos().len());
    for todo in view.todos() {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{mark}] {}  ({})", todo.title, todo.created_at);
    }
}
