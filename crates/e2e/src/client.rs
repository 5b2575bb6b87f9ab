use anyhow::{anyhow, Result};
use uuid::Uuid;

use staffhub_api::{AuthRegisterRequest, AuthTokenResponse};
use staffhub_api_client::ApiClient;

/// Holds connection info for a test run.
pub struct TestContext {
    pub api: ApiClient,
}

/// A registered test user with credentials.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestContext {
    pub fn new(base_url: String) -> Self {
        Self {
            api: ApiClient::with_client(reqwest::Client::new(), &base_url),
        }
    }

    /// Build a full API URL from a path like `/health`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.api.base_url(), path)
    }

    /// Register a fresh user with a unique email and username.
    pub async fn register_user(&self) -> Result<TestUser> {
        let id = Uuid::new_v4();
        let short = &id.to_string()[..8];
        let email = format!("test-{id}@e2e.local");
        let username = format!("e2e-{short}");
        let password = "testpass99".to_string();

        let resp = self
            .api
            .post_json_raw(
                "/auth/register",
                &AuthRegisterRequest {
                    username: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                },
            )
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("register failed ({status}): {body}"));
        }
        let tokens: AuthTokenResponse = resp.json().await?;

        Ok(TestUser {
            user_id: tokens.user_id,
            username: tokens.username,
            email,
            password,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
