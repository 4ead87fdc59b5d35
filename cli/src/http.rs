//! Blocking HTTP executor for the core's request values.

use todo_client::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

/// Execute an `HttpRequest` over the network and return the response as
/// plain data.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data rather than `Err` — status interpretation
/// belongs to the core. Genuine transport failures (DNS, connection refused,
/// timeout) map to `ApiError::Transport`.
pub fn execute(req: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    debug!(url = %req.url, method = ?req.method, "executing request");

    let result = match req.method {
        HttpMethod::Get => {
            let mut call = agent.get(&req.url);
            for (name, value) in &req.headers {
                call = call.header(name, value);
            }
            call.call()
        }
        HttpMethod::Post => {
            let mut call = agent.post(&req.url);
            for (name, value) in &req.headers {
                call = call.header(name, value);
            }
            match &req.body {
                Some(body) => call.send(body.as_bytes()),
                None => call.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    debug!(status, "response received");

    Ok(HttpResponse { status, body })
}
