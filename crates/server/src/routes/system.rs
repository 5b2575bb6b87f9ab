use axum::{extract::State, Json};
use std::time::Duration;

use staffhub_api::{FetchResourceRequest, FetchResourceResponse};

use crate::error::ApiErr;
use crate::AppConfig;

// SECURITY-TRAINING ENDPOINT. This handler deliberately performs
// unrestricted outbound fetches (SSRF) and shell execution (RCE) so the
// portal can be used as a vulnerable practice target. It is disabled
// unless STAFFHUB_TRAINING_ENDPOINTS=1 and must never be enabled in a
// real deployment.

/// POST /api/system/fetch-resource — `{url}` fetches it, `{command}` runs it.
pub async fn fetch_resource(
    State(config): State<AppConfig>,
    Json(req): Json<FetchResourceRequest>,
) -> Result<Json<FetchResourceResponse>, ApiErr> {
    if !config.training_endpoints {
        return Err(ApiErr::not_found("not found"));
    }

    if let Some(url) = req.url.as_deref() {
        return Ok(Json(fetch_url(url).await));
    }

    if let Some(command) = req.command.as_deref() {
        return Ok(Json(run_command(command).await));
    }

    Err(ApiErr::bad_request("expected url or command"))
}

async fn fetch_url(url: &str) -> FetchResourceResponse {
    tracing::warn!("training endpoint fetching {url}");

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => return failure(format!("client build failed: {e}")),
    };

    match client.get(url).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            FetchResourceResponse {
                success: true,
                status: Some(status),
                body: Some(body),
                stdout: None,
                stderr: None,
                exit_code: None,
            }
        }
        Err(e) => failure(e.to_string()),
    }
}

async fn run_command(command: &str) -> FetchResourceResponse {
    tracing::warn!("training endpoint executing {command:?}");

    match tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .await
    {
        Ok(output) => FetchResourceResponse {
            success: output.status.success(),
            status: None,
            body: None,
            stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
            exit_code: output.status.code(),
        },
        Err(e) => failure(format!("spawn failed: {e}")),
    }
}

fn failure(message: String) -> FetchResourceResponse {
    FetchResourceResponse {
        success: false,
        status: None,
        body: Some(message),
        stdout: None,
        stderr: None,
        exit_code: None,
    }
}
