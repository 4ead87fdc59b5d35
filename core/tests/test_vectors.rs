//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes the session state, inputs, expected requests,
//! simulated responses, and expected parse results or errors. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field-ordering
//! differences.

use todo_client::{
    ApiClient, ApiError, HttpMethod, HttpRequest, HttpResponse, LoginResponse, MemoryStorage,
    Storage, Todo,
};

const BASE_URL: &str = "http://localhost:8080";

/// Build a client whose session matches the vector's `token` field.
fn client_for(case: &serde_json::Value) -> ApiClient<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    if let Some(token) = case["token"].as_str() {
        storage.set("sessionId", token);
    }
    ApiClient::new(BASE_URL, storage)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check the built request against the vector's `expected_request`.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(expected_body) => {
            let req_body: serde_json::Value =
                serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, expected_body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Check a failed outcome against the vector's `expected_error`.
fn assert_error(name: &str, err: ApiError, expected: &serde_json::Value) {
    match expected["kind"].as_str().unwrap() {
        "NotAuthenticated" => {
            assert_eq!(err, ApiError::NotAuthenticated, "{name}: expected NotAuthenticated")
        }
        "Http" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            let message = expected["message"].as_str().unwrap().to_string();
            assert_eq!(err, ApiError::Http { status, message }, "{name}: expected Http")
        }
        "Transport" => {
            assert!(matches!(err, ApiError::Transport(_)), "{name}: expected Transport")
        }
        other => panic!("{name}: unknown expected_error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn login_test_vectors() {
    let raw = include_str!("../../test-vectors/login.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut c = client_for(case);
        let email = case["input"]["email"].as_str().unwrap();
        let password = case["input"]["password"].as_str().unwrap();

        let req = c.build_login(email, password).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_login(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
            assert!(!c.is_authenticated(), "{name}: failed login must not persist a token");
        } else {
            let login = result.unwrap();
            let expected: LoginResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(login, expected, "{name}: parsed result");
            assert_eq!(
                c.session().token(),
                Some(expected.session_id),
                "{name}: token persisted"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = client_for(case);

        let built = c.build_list_todos();
        if case.get("expected_request").is_none() {
            // Build-time failure: no request ever exists.
            assert_error(name, built.unwrap_err(), &case["expected_error"]);
            continue;
        }
        let req = built.unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_todos(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let todos = result.unwrap();
            let expected: Vec<Todo> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todos, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = client_for(case);
        let title = case["input"]["title"].as_str().unwrap();

        let built = c.build_create_todo(title);
        if case.get("expected_request").is_none() {
            assert_error(name, built.unwrap_err(), &case["expected_error"]);
            continue;
        }
        let req = built.unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_todo(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let todo = result.unwrap();
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todo, expected, "{name}: parsed result");
        }
    }
}
