//! # StackToDate API Client
//!
//! File: cli/src/common/network/api.rs
//! Repository: https://github.com/stacktodate/stacktodate-cli
//!
//! ## Overview
//!
//! Typed client for the remote tech stack endpoints:
//!
//! | Operation | Request |
//! |---|---|
//! | `create_tech_stack` | `POST /api/tech_stacks` with `{"tech_stack": {"name", "components"}}` |
//! | `get_tech_stack` | `GET /api/tech_stacks/{id}` |
//! | `push_components` | `PUT /api/tech_stacks/{id}/components` with `{"components": [...]}` |
//!
//! Every request carries `Authorization: Bearer <token>` and a JSON content
//! type. Non-success statuses are mapped onto `StackError` variants whose
//! messages tell the user what to do next (see `map_status`).
//!
use super::http_client;
use crate::core::error::{Result, StackError};
use crate::core::manifest::Stack;
use anyhow::anyhow;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One technology as the API represents it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Converts a manifest stack into API components, sorted by name.
pub fn components_from_stack(stack: &Stack) -> Vec<Component> {
    stack
        .iter()
        .map(|(name, entry)| Component {
            name: name.clone(),
            version: entry.version.clone(),
        })
        .collect()
}

/// A remote tech stack.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TechStack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Envelope returned by every tech stack endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TechStackResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tech_stack: TechStack,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    tech_stack: CreateBody<'a>,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    components: &'a [Component],
}

#[derive(Serialize)]
struct PushRequest<'a> {
    components: &'a [Component],
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Authenticated client for one API base URL.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Ok(ApiClient {
            client: http_client(None)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Registers a new stack and returns it with its server-assigned id.
    pub async fn create_tech_stack(
        &self,
        name: &str,
        components: &[Component],
    ) -> Result<TechStackResponse> {
        let url = format!("{}/api/tech_stacks", self.base_url);
        let body = CreateRequest {
            tech_stack: CreateBody { name, components },
        };
        let response = self.send(Method::POST, &url, Some(&body)).await?;

        if !response.success {
            return Err(anyhow!(StackError::ApiResponse(response.message)));
        }
        if response.tech_stack.id.is_empty() {
            return Err(anyhow!(StackError::ApiResponse(
                "API response missing project ID".into()
            )));
        }
        info!("Created tech stack {}", response.tech_stack.id);
        Ok(response)
    }

    /// Fetches an existing stack by id.
    pub async fn get_tech_stack(&self, id: &str) -> Result<TechStackResponse> {
        let url = format!("{}/api/tech_stacks/{}", self.base_url, id);
        let response = self.send::<()>(Method::GET, &url, None).await?;

        if response.tech_stack.id.is_empty() {
            return Err(anyhow!(StackError::ApiResponse(
                "API response missing project ID".into()
            )));
        }
        Ok(response)
    }

    /// Replaces the components of stack `id`.
    pub async fn push_components(
        &self,
        id: &str,
        components: &[Component],
    ) -> Result<TechStackResponse> {
        let url = format!("{}/api/tech_stacks/{}/components", self.base_url, id);
        let body = PushRequest { components };
        let response = self.send(Method::PUT, &url, Some(&body)).await?;

        if !response.success {
            return Err(anyhow!(StackError::ApiResponse(format!(
                "API returned success=false: {}",
                response.message
            ))));
        }
        Ok(response)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<TechStackResponse> {
        debug!("{} {}", method, url);
        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(StackError::from)?;
        let status = response.status();
        let text = response.text().await.map_err(StackError::from)?;

        if let Some(err) = map_status(status, &text) {
            return Err(anyhow!(err));
        }

        serde_json::from_str(&text).map_err(|e| {
            anyhow!(StackError::ApiResponse(format!(
                "failed to parse API response: {e}"
            )))
        })
    }
}

/// Maps a non-success status onto the matching error; `None` for 200/201.
pub fn map_status(status: StatusCode, body: &str) -> Option<StackError> {
    match status {
        StatusCode::OK | StatusCode::CREATED => None,
        StatusCode::UNAUTHORIZED => Some(StackError::Unauthorized),
        StatusCode::NOT_FOUND => Some(StackError::ProjectNotFound),
        StatusCode::UNPROCESSABLE_ENTITY => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "the server rejected your request".to_string());
            Some(StackError::Validation(message))
        }
        s if s.is_server_error() => Some(StackError::ServerError { status: s.as_u16() }),
        s => Some(StackError::ApiStatus {
            status: s.as_u16(),
            body: body.to_string(),
        }),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::StackEntry;
    use mockito::{Matcher, Server};

    const STACK_JSON: &str = r#"{
        "success": true,
        "tech_stack": {
            "id": "abc-123",
            "name": "billing",
            "components": [{"name": "ruby", "version": "3.2"}]
        }
    }"#;

    fn components() -> Vec<Component> {
        let mut stack = Stack::new();
        stack.insert("ruby".into(), StackEntry::new("3.2", ".ruby-version"));
        stack.insert("go".into(), StackEntry::new("1.22", "go.mod"));
        components_from_stack(&stack)
    }

    #[test]
    fn test_components_are_sorted() {
        let names: Vec<String> = components().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["go", "ruby"]);
    }

    #[test]
    fn test_map_status() {
        assert!(map_status(StatusCode::OK, "").is_none());
        assert!(map_status(StatusCode::CREATED, "").is_none());
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, ""),
            Some(StackError::Unauthorized)
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, ""),
            Some(StackError::ProjectNotFound)
        ));
        assert_eq!(
            map_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"name taken"}"#)
                .unwrap()
                .to_string(),
            "validation error: name taken"
        );
        assert_eq!(
            map_status(StatusCode::UNPROCESSABLE_ENTITY, "oops")
                .unwrap()
                .to_string(),
            "validation error: the server rejected your request"
        );
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, ""),
            Some(StackError::ServerError { status: 502 })
        ));
        assert_eq!(
            map_status(StatusCode::FORBIDDEN, "nope").unwrap().to_string(),
            "API error (status 403): nope"
        );
    }

    #[tokio::test]
    async fn test_create_tech_stack_sends_name_and_components() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tech_stacks")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "tech_stack": {
                    "name": "billing",
                    "components": [
                        {"name": "go", "version": "1.22"},
                        {"name": "ruby", "version": "3.2"}
                    ]
                }
            })))
            .with_status(201)
            .with_body(STACK_JSON)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), "secret").unwrap();
        let response = client.create_tech_stack("billing", &components()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.tech_stack.id, "abc-123");
    }

    #[tokio::test]
    async fn test_create_tech_stack_requires_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/tech_stacks")
            .with_status(200)
            .with_body(r#"{"success": false, "message": "quota exceeded"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), "secret").unwrap();
        let err = client.create_tech_stack("billing", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: quota exceeded");
    }

    #[tokio::test]
    async fn test_get_tech_stack_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/tech_stacks/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), "secret").unwrap();
        let err = client.get_tech_stack("missing").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StackError>(),
            Some(StackError::ProjectNotFound)
        ));
    }

    #[tokio::test]
    async fn test_push_components_unauthorized() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/tech_stacks/abc-123/components")
            .with_status(401)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), "expired").unwrap();
        let err = client
            .push_components("abc-123", &components())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn test_push_components_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/tech_stacks/abc-123/components")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "components": [{"name": "go", "version": "1.22"}, {"name": "ruby", "version": "3.2"}]
            })))
            .with_status(200)
            .with_body(STACK_JSON)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url(), "secret").unwrap();
        client.push_components("abc-123", &components()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported() {
        let client = ApiClient::new("http://127.0.0.1:1", "secret").unwrap();
        let err = client.get_tech_stack("abc").await.unwrap_err();
        assert!(err.to_string().contains("failed to connect to StackToDate API"));
    }
}
