use leptos::logging;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use crate::grades::{Course, GradeRecord, GradeSubmission};

/// Origin of the grade service. The session cookie is scoped to it, so every
/// call goes out with credentials included.
pub const API_BASE: &str = "http://localhost:8000";

/// How a call against the grade service can fail, bucketed the way the UI
/// reacts: 401 redirects, 429 becomes a transient notice, the rest surface
/// the server's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The session cookie is missing or expired.
    #[error("not authenticated")]
    Unauthorized,
    /// The service asked us to back off. Requests are not retried.
    #[error("rate limited, try again in a moment")]
    RateLimited,
    /// Any other non-success status, carrying the server's message.
    #[error("{0}")]
    Server(String),
    /// The request never completed, or the body didn't decode.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: String) -> ApiError {
        match status {
            401 => ApiError::Unauthorized,
            429 => ApiError::RateLimited,
            _ => {
                let message = if body.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body
                };
                ApiError::Server(message)
            }
        }
    }
}

fn js_error(value: JsValue) -> ApiError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    ApiError::Network(message)
}

fn credentialed(method: &str) -> RequestInit {
    let init = RequestInit::new();
    init.set_method(method);
    init.set_credentials(RequestCredentials::Include);
    init
}

/// Run a request and map non-2xx statuses into [`ApiError`], reading the
/// body text for the server's message.
async fn send(request: Request) -> Result<Response, ApiError> {
    let window =
        web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    Err(ApiError::from_status(status, body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise = response.json().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| ApiError::Network(format!("bad response body: {e}")))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let init = credentialed("GET");
    let request =
        Request::new_with_str_and_init(&format!("{API_BASE}{path}"), &init).map_err(js_error)?;
    let response = send(request).await?;
    decode(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let init = credentialed("POST");
    let payload = serde_json::to_string(body).map_err(|e| ApiError::Network(e.to_string()))?;
    init.set_body(&JsValue::from_str(&payload));
    let request =
        Request::new_with_str_and_init(&format!("{API_BASE}{path}"), &init).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;
    let response = send(request).await?;
    decode(response).await
}

/// Fetch the full course directory. Called once per app load.
pub async fn list_courses() -> Result<Vec<Course>, ApiError> {
    get_json("/api/courses").await
}

/// Submit (or overwrite) the caller's grade for a course. The server echoes
/// the stored record.
pub async fn submit_grade(submission: &GradeSubmission) -> Result<GradeRecord, ApiError> {
    post_json("/api/grades", submission).await
}

pub(crate) fn grades_path(course_id: &str) -> String {
    format!("/api/get_grades/{course_id}")
}

/// Fetch every submitted record for one course.
pub async fn course_grades(course_id: &str) -> Result<Vec<GradeRecord>, ApiError> {
    get_json(&grades_path(course_id)).await
}

#[derive(Debug, Deserialize)]
struct HasLogin {
    authenticated: bool,
}

/// One-shot session probe.
pub async fn has_login() -> Result<bool, ApiError> {
    let reply: HasLogin = get_json("/auth/has_login").await?;
    Ok(reply.authenticated)
}

/// Hand the browser to the external SSO login endpoint.
pub fn redirect_to_login() {
    redirect("/auth/login");
}

/// Hand the browser to the logout endpoint, which tears down the session.
pub fn redirect_to_logout() {
    redirect("/auth/logout");
}

fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(&format!("{API_BASE}{path}")) {
            logging::error!("redirect to {path} failed: {e:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_401_maps_to_unauthorized() {
        assert_eq!(
            ApiError::from_status(401, "could not validate credentials".to_string()),
            ApiError::Unauthorized
        );
    }

    #[test]
    fn test_status_429_maps_to_rate_limited() {
        assert_eq!(
            ApiError::from_status(429, String::new()),
            ApiError::RateLimited
        );
    }

    #[test]
    fn test_other_status_carries_server_message() {
        assert_eq!(
            ApiError::from_status(500, "boom".to_string()),
            ApiError::Server("boom".to_string())
        );
    }

    #[test]
    fn test_other_status_with_empty_body_gets_generic_message() {
        assert_eq!(
            ApiError::from_status(503, "  ".to_string()),
            ApiError::Server("request failed with status 503".to_string())
        );
    }

    #[test]
    fn test_grades_path_embeds_course_id() {
        assert_eq!(grades_path("CS101_F24"), "/api/get_grades/CS101_F24");
    }
}
