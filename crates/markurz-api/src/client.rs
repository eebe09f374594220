//! GraphQL client

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::{ApiError, Result};

const SEND_TASK_MUTATION: &str = r#"
mutation SendTask($input: SendTaskInput!) {
  sendTask(input: $input) {
    id
  }
}
"#;

/// The drawer form, ready for submission. The backend schema stays opaque;
/// this is just the payload the form collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Task title, prefilled from the highlighted text.
    pub title: String,
    pub description: Option<String>,
    /// URL of the page the text was marked on.
    pub page_url: String,
    /// Which integration receives the task (asana, trello, notion, ...).
    pub integration: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(endpoint: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(12))
            .user_agent("Markurz Extension")
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Execute one GraphQL operation. The bearer token is attached when
    /// present; an `UNAUTHENTICATED` error code in the response maps to
    /// [`ApiError::Unauthenticated`] so callers can route to sign-in.
    pub async fn execute(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body: GraphQlResponse = response.json().await?;

        if let Some(error) = body.errors.into_iter().flatten().next() {
            if error.extensions.code.as_deref() == Some("UNAUTHENTICATED") {
                return Err(ApiError::Unauthenticated);
            }
            return Err(ApiError::GraphQl(error.message));
        }

        Ok(body.data.unwrap_or(Value::Null))
    }

    /// Submit the drawer form.
    pub async fn send_task(&self, token: &str, input: &TaskInput) -> Result<Value> {
        tracing::info!(integration = %input.integration, "Submitting task");
        self.execute(
            SEND_TASK_MUTATION,
            json!({ "input": input }),
            Some(token),
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: GraphQlExtensions,
}

#[derive(Debug, Default, Deserialize)]
struct GraphQlExtensions {
    code: Option<String>,
}
