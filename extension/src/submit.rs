//! Drawer form submission

use serde_json::Value;

use markurz_core::{ApiClient, ApiError, Config, TaskInput};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend accepted the task.
    Sent(Value),
    /// No usable session; the caller should open this sign-in URL.
    SignInRequired(String),
}

/// Submit the drawer form with the context's current token. A missing token
/// and a backend `UNAUTHENTICATED` both resolve to a sign-in navigation
/// rather than an inline error.
pub async fn submit_task(
    api: &ApiClient,
    config: &Config,
    token: Option<&str>,
    input: &TaskInput,
) -> markurz_core::Result<SubmitOutcome> {
    let Some(token) = token else {
        return Ok(SubmitOutcome::SignInRequired(config.sign_in_url()));
    };

    match api.send_task(token, input).await {
        Ok(data) => Ok(SubmitOutcome::Sent(data)),
        Err(ApiError::Unauthenticated) => Ok(SubmitOutcome::SignInRequired(config.sign_in_url())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_no_token_routes_to_sign_in() {
        let config = Config::new(PathBuf::from("/tmp"));
        let api = ApiClient::new(config.api_url.parse().unwrap()).unwrap();
        let input = TaskInput {
            title: "hello".to_string(),
            description: None,
            page_url: "https://example.com".to_string(),
            integration: "todoist".to_string(),
        };

        let outcome = submit_task(&api, &config, None, &input).await.unwrap();
        match outcome {
            SubmitOutcome::SignInRequired(url) => {
                assert_eq!(url, "https://markurz.app/sign-in");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
