use anyhow::{ensure, Result};

use crate::client::TestContext;
use crate::fixtures;

/// GET /api/calendar-events → `{success, data, error}` envelope.
pub async fn list_returns_envelope(ctx: &TestContext) -> Result<()> {
    let resp = ctx
        .api
        .reqwest_client()
        .get(ctx.url("/calendar-events"))
        .send()
        .await?;
    ensure!(resp.status() == 200, "expected 200, got {}", resp.status());

    let body: serde_json::Value = resp.json().await?;
    ensure!(body["success"] == true, "expected success=true");
    ensure!(body["data"].is_array(), "expected data array");
    ensure!(body["error"].is_null(), "expected error=null");
    Ok(())
}

/// Reset drops everything and reseeds the sample rows.
pub async fn reset_reseeds_samples(ctx: &TestContext) -> Result<()> {
    // Add one event so there is something to wipe.
    let resp = ctx
        .api
        .post_json_raw("/calendar-events", &fixtures::sample_event())
        .await?;
    ensure!(resp.status() == 201, "expected 201, got {}", resp.status());

    let resp = ctx
        .api
        .reqwest_client()
        .post(ctx.url("/reset-calendar-events"))
        .send()
        .await?;
    ensure!(resp.status() == 200, "expected 200, got {}", resp.status());
    let body: serde_json::Value = resp.json().await?;
    ensure!(body["success"] == true, "expected success=true");

    let resp = ctx
        .api
        .reqwest_client()
        .get(ctx.url("/calendar-events"))
        .send()
        .await?;
    let body: serde_json::Value = resp.json().await?;
    let data = body["data"].as_array().unwrap();
    ensure!(
        data.iter()
            .all(|e| e["id"].as_str().unwrap_or_default().starts_with("sample-")),
        "expected only sample rows after reset"
    );
    Ok(())
}
