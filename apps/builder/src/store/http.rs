use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Resume;
use crate::store::{ResumeStore, StoreError};

const RESUME_PATH: &str = "/api/resume";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Resume Store backed by the remote resume API.
///
/// Every request carries the session's bearer token when one is present.
/// Failed calls are not retried; the user resubmits.
#[derive(Clone)]
pub struct HttpResumeStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpResumeStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, target: &str) -> Result<Response, StoreError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{target} -> {status}");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Resume API returned {status} for {target}: {body}");
        Err(classify_failure(status, &body, target))
    }
}

#[async_trait]
impl ResumeStore for HttpResumeStore {
    async fn create_resume(&self, resume: &Resume) -> Result<String, StoreError> {
        let builder = self.request(Method::POST, RESUME_PATH).json(resume);
        let response = self.send(builder, RESUME_PATH).await?;
        let body: Value = response.json().await?;
        extract_id(&body)
    }

    async fn update_resume(&self, id: &str, resume: &Resume) -> Result<(), StoreError> {
        let path = format!("{RESUME_PATH}/{id}");
        let builder = self.request(Method::PUT, &path).json(resume);
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn delete_resume(&self, id: &str) -> Result<(), StoreError> {
        let path = format!("{RESUME_PATH}/{id}");
        let builder = self.request(Method::DELETE, &path);
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn fetch_resumes(&self) -> Result<Vec<Resume>, StoreError> {
        let builder = self.request(Method::GET, RESUME_PATH);
        let response = self.send(builder, RESUME_PATH).await?;
        Ok(response.json().await?)
    }
}

/// Maps a non-success response onto the store's error taxonomy.
fn classify_failure(status: StatusCode, body: &str, target: &str) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(target.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized,
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .map(|e| e.message)
                .unwrap_or_else(|_| body.to_string());
            StoreError::Persistence {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// The create endpoint answers with the stored document, either bare or
/// wrapped under `resume`/`data`.
fn extract_id(body: &Value) -> Result<String, StoreError> {
    let doc = ["resume", "data"]
        .iter()
        .find_map(|k| body.get(*k).filter(|v| v.is_object()))
        .unwrap_or(body);

    doc.get("_id")
        .or_else(|| doc.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::Malformed("create response carried no _id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_id_bare_document() {
        let body = json!({"_id": "abc123", "name": "Jane"});
        assert_eq!(extract_id(&body).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_id_wrapped_document() {
        let body = json!({"message": "created", "resume": {"_id": "r-1"}});
        assert_eq!(extract_id(&body).unwrap(), "r-1");
        let body = json!({"data": {"id": "r-2"}});
        assert_eq!(extract_id(&body).unwrap(), "r-2");
    }

    #[test]
    fn test_extract_id_missing() {
        assert!(matches!(
            extract_id(&json!({"ok": true})),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_failure(StatusCode::NOT_FOUND, "", "/api/resume/abc");
        assert!(matches!(err, StoreError::NotFound(ref t) if t == "/api/resume/abc"));
    }

    #[test]
    fn test_classify_unauthorized() {
        assert!(matches!(
            classify_failure(StatusCode::UNAUTHORIZED, "", RESUME_PATH),
            StoreError::Unauthorized
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, "", RESUME_PATH),
            StoreError::Unauthorized
        ));
    }

    #[test]
    fn test_classify_server_error_uses_message() {
        let err = classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "db down"}"#,
            RESUME_PATH,
        );
        match err {
            StoreError::Persistence { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_plain_body() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "bad input", RESUME_PATH);
        assert!(matches!(err, StoreError::Persistence { status: 400, ref message } if message == "bad input"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = HttpResumeStore::new("http://localhost:5000/", None, Duration::from_secs(1));
        assert_eq!(store.base_url, "http://localhost:5000");
    }
}
