use anyhow::{ensure, Result};

use staffhub_api::{
    BulkEmployeeRecord, BulkUploadResponse, CreateBankAccountRequest, CreateGoalRequest,
    EmployeeResponse, GoalResponse, GoalStatus, UpdateGoalRequest,
};

use crate::client::TestContext;
use crate::fixtures;

async fn create_employee(ctx: &TestContext) -> Result<EmployeeResponse> {
    let resp = ctx
        .api
        .post_json_raw("/employees", &fixtures::sample_employee())
        .await?;
    ensure!(resp.status() == 201, "expected 201, got {}", resp.status());
    Ok(resp.json().await?)
}

/// POST + GET round trip.
pub async fn create_and_get(ctx: &TestContext) -> Result<()> {
    let employee = create_employee(ctx).await?;

    let resp = ctx
        .api
        .reqwest_client()
        .get(ctx.url(&format!("/employees/{}", employee.id)))
        .send()
        .await?;
    ensure!(resp.status() == 200, "expected 200, got {}", resp.status());
    let fetched: EmployeeResponse = resp.json().await?;
    ensure!(fetched.email == employee.email, "email mismatch");
    Ok(())
}

/// Creating two employees with the same email → 409.
pub async fn duplicate_email_conflict(ctx: &TestContext) -> Result<()> {
    let employee = create_employee(ctx).await?;

    let mut dup = fixtures::sample_employee();
    dup.email = employee.email.clone();
    let resp = ctx.api.post_json_raw("/employees", &dup).await?;
    ensure!(resp.status() == 409, "expected 409, got {}", resp.status());
    Ok(())
}

/// Bulk upload: duplicates are skipped with per-row errors, the rest land.
pub async fn bulk_upload_skips_duplicates(ctx: &TestContext) -> Result<()> {
    let existing = create_employee(ctx).await?;
    let fresh = fixtures::sample_employee();

    let records = vec![
        BulkEmployeeRecord {
            name: existing.name.clone(),
            position: existing.position.clone(),
            department: existing.department.clone(),
            email: existing.email.clone(),
            status: None,
            salary: None,
            manager: None,
            metadata: None,
        },
        BulkEmployeeRecord {
            name: fresh.name.clone(),
            position: fresh.position.clone(),
            department: fresh.department.clone(),
            email: fresh.email.clone(),
            status: None,
            salary: fresh.salary,
            manager: None,
            metadata: Some(serde_json::json!({"source": "e2e"})),
        },
    ];

    let resp = ctx
        .api
        .post_json_raw("/employees/bulk-upload", &records)
        .await?;
    ensure!(resp.status() == 200, "expected 200, got {}", resp.status());
    let outcome: BulkUploadResponse = resp.json().await?;
    ensure!(outcome.inserted == 1, "expected 1 inserted");
    ensure!(outcome.skipped == 1, "expected 1 skipped");
    ensure!(outcome.errors.len() == 1, "expected 1 row error");
    Ok(())
}

/// Progress 100 completes a goal; 50 moves it to in-progress.
pub async fn goal_progress_derives_status(ctx: &TestContext) -> Result<()> {
    let employee = create_employee(ctx).await?;

    let resp = ctx
        .api
        .post_json_raw(
            "/performance/goals",
            &CreateGoalRequest {
                employee_id: employee.id.clone(),
                title: "Ship the thing".into(),
                description: None,
                progress: None,
                status: None,
                due_date: None,
            },
        )
        .await?;
    ensure!(resp.status() == 201, "expected 201, got {}", resp.status());
    let goal: GoalResponse = resp.json().await?;
    ensure!(goal.status == GoalStatus::NotStarted, "fresh goal status");

    let update = |progress| UpdateGoalRequest {
        title: None,
        description: None,
        progress: Some(progress),
        status: None,
        due_date: None,
    };

    let resp = ctx
        .api
        .reqwest_client()
        .put(ctx.url(&format!("/performance/goals/{}", goal.id)))
        .json(&update(50))
        .send()
        .await?;
    let goal: GoalResponse = resp.json().await?;
    ensure!(goal.status == GoalStatus::InProgress, "50% → inprogress");
    ensure!(goal.progress == 50, "progress stored");

    let resp = ctx
        .api
        .reqwest_client()
        .put(ctx.url(&format!("/performance/goals/{}", goal.id)))
        .json(&update(100))
        .send()
        .await?;
    let goal: GoalResponse = resp.json().await?;
    ensure!(goal.status == GoalStatus::Completed, "100% → completed");
    Ok(())
}

/// Two sequential primary-account creations leave exactly one primary.
pub async fn primary_account_is_exclusive(ctx: &TestContext) -> Result<()> {
    let employee = create_employee(ctx).await?;

    for n in 0..2 {
        let resp = ctx
            .api
            .post_json_raw(
                "/bank-accounts",
                &CreateBankAccountRequest {
                    employee_id: employee.id.clone(),
                    account_type: "checking".into(),
                    account_number: format!("000-111-{n}"),
                    bank_name: "First E2E Bank".into(),
                    is_primary: true,
                },
            )
            .await?;
        ensure!(resp.status() == 201, "expected 201, got {}", resp.status());
    }

    let resp = ctx
        .api
        .reqwest_client()
        .get(ctx.url(&format!("/bank-accounts?employeeId={}", employee.id)))
        .send()
        .await?;
    let accounts: Vec<staffhub_api::BankAccountResponse> = resp.json().await?;
    let primaries = accounts.iter().filter(|a| a.is_primary).count();
    ensure!(accounts.len() == 2, "expected 2 accounts");
    ensure!(primaries == 1, "expected exactly 1 primary, got {primaries}");
    Ok(())
}
