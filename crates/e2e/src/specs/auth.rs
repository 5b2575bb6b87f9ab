use anyhow::{ensure, Result};
use uuid::Uuid;

use staffhub_api::{AuthRegisterRequest, AuthTokenResponse, LoginRequest};

use crate::client::TestContext;

/// POST /api/auth/register → 201, returns a signed token pair.
pub async fn register(ctx: &TestContext) -> Result<()> {
    let user = ctx.register_user().await?;
    ensure!(!user.access_token.is_empty(), "expected access_token");
    ensure!(!user.refresh_token.is_empty(), "expected refresh_token");
    ensure!(
        user.access_token.split('.').count() == 3,
        "access token should be a JWT"
    );
    Ok(())
}

/// Same username → 409.
pub async fn register_duplicate_username(ctx: &TestContext) -> Result<()> {
    let user = ctx.register_user().await?;
    let resp = ctx
        .api
        .post_json_raw(
            "/auth/register",
            &AuthRegisterRequest {
                username: user.username.clone(),
                email: format!("dup-{}@e2e.local", Uuid::new_v4()),
                password: "testpass99".into(),
            },
        )
        .await?;
    ensure!(resp.status() == 409, "expected 409, got {}", resp.status());
    Ok(())
}

/// Register → login with the same credentials → fresh token pair works on /auth/me.
pub async fn login_round_trip(ctx: &TestContext) -> Result<()> {
    let user = ctx.register_user().await?;

    let resp = ctx
        .api
        .post_json_raw(
            "/auth/login",
            &LoginRequest {
                username: user.username.clone(),
                password: user.password.clone(),
            },
        )
        .await?;
    ensure!(resp.status() == 200, "expected 200, got {}", resp.status());
    let tokens: AuthTokenResponse = resp.json().await?;

    let me = ctx
        .api
        .get_with_auth("/auth/me", &tokens.access_token)
        .await?;
    ensure!(me.status() == 200, "expected 200, got {}", me.status());
    let body: serde_json::Value = me.json().await?;
    ensure!(body["username"] == user.username.as_str(), "username mismatch");
    Ok(())
}

/// A garbage bearer token is rejected.
pub async fn verify_rejects_garbage_token(ctx: &TestContext) -> Result<()> {
    let resp = ctx
        .api
        .post_with_auth("/auth/verify", "not-a-real-token")
        .await?;
    ensure!(resp.status() == 401, "expected 401, got {}", resp.status());
    Ok(())
}
