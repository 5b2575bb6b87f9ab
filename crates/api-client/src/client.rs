use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;

use staffhub_api::*;

/// Typed HTTP client for the StaffHub API.
///
/// Provides high-level methods for each API endpoint (using the stored auth
/// token) and low-level `*_with_auth` methods for callers that need
/// per-request auth (e.g. E2E tests exercising multiple users).
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    pub fn set_auth(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access the underlying `reqwest::Client`.
    pub fn reqwest_client(&self) -> &reqwest::Client {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn token_or_bail(&self) -> Result<&str> {
        self.auth_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("auth token not set"))
    }

    // ── Health ────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.client.get(self.url("/health")).send().await?;
        parse_response(resp).await
    }

    // ── Auth ──────────────────────────────────────────────────────────────

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthTokenResponse> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn register(&self, req: &AuthRegisterRequest) -> Result<AuthTokenResponse> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn verify(&self) -> Result<VerifyResponse> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .post(self.url("/auth/verify"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn me(&self) -> Result<UserProfileResponse> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn refresh(&self, req: &RefreshRequest) -> Result<AuthTokenResponse> {
        let resp = self
            .client
            .post(self.url("/auth/refresh"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn logout(&self, req: &LogoutRequest) -> Result<OkResponse> {
        let resp = self
            .client
            .post(self.url("/auth/logout"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Employees ─────────────────────────────────────────────────────────

    pub async fn list_employees(&self, query: &EmployeeListQuery) -> Result<EmployeeListResponse> {
        let mut url = self.url("/employees");

        let mut params = Vec::new();
        params.push(format!("page={}", query.page));
        params.push(format!("perPage={}", query.per_page));
        if let Some(ref s) = query.search {
            params.push(format!("search={s}"));
        }
        if let Some(status) = query.status {
            params.push(format!("status={status}"));
        }
        url = format!("{}?{}", url, params.join("&"));

        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    pub async fn get_employee(&self, id: &str) -> Result<EmployeeResponse> {
        let resp = self
            .client
            .get(self.url(&format!("/employees/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn create_employee(&self, req: &CreateEmployeeRequest) -> Result<EmployeeResponse> {
        let resp = self
            .client
            .post(self.url("/employees"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        req: &UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse> {
        let resp = self
            .client
            .put(self.url(&format!("/employees/{id}")))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<OkResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/employees/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn bulk_upload_employees(
        &self,
        records: &[BulkEmployeeRecord],
    ) -> Result<BulkUploadResponse> {
        let resp = self
            .client
            .post(self.url("/employees/bulk-upload"))
            .json(records)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Documents ─────────────────────────────────────────────────────────

    pub async fn list_documents(&self, employee_id: Option<&str>) -> Result<DocumentListResponse> {
        let url = match employee_id {
            Some(id) => format!("{}?employeeId={id}", self.url("/documents")),
            None => self.url("/documents"),
        };
        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<OkResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/documents/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Calendar ──────────────────────────────────────────────────────────

    pub async fn list_calendar_events(&self) -> Result<CalendarEventsEnvelope> {
        let resp = self.client.get(self.url("/calendar-events")).send().await?;
        parse_response(resp).await
    }

    pub async fn create_calendar_event(
        &self,
        req: &CreateCalendarEventRequest,
    ) -> Result<CalendarEventResponse> {
        let resp = self
            .client
            .post(self.url("/calendar-events"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn reset_calendar_events(&self) -> Result<ResetCalendarResponse> {
        let resp = self
            .client
            .post(self.url("/reset-calendar-events"))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Bank accounts ─────────────────────────────────────────────────────

    pub async fn list_bank_accounts(&self, employee_id: &str) -> Result<Vec<BankAccountResponse>> {
        let url = format!("{}?employeeId={employee_id}", self.url("/bank-accounts"));
        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    pub async fn create_bank_account(
        &self,
        req: &CreateBankAccountRequest,
    ) -> Result<BankAccountResponse> {
        let resp = self
            .client
            .post(self.url("/bank-accounts"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Performance goals ─────────────────────────────────────────────────

    pub async fn list_goals(&self, employee_id: Option<&str>) -> Result<Vec<GoalResponse>> {
        let url = match employee_id {
            Some(id) => format!("{}?employeeId={id}", self.url("/performance/goals")),
            None => self.url("/performance/goals"),
        };
        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    pub async fn create_goal(&self, req: &CreateGoalRequest) -> Result<GoalResponse> {
        let resp = self
            .client
            .post(self.url("/performance/goals"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn update_goal(&self, id: &str, req: &UpdateGoalRequest) -> Result<GoalResponse> {
        let resp = self
            .client
            .put(self.url(&format!("/performance/goals/{id}")))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Notifications ─────────────────────────────────────────────────────

    pub async fn list_notifications(&self) -> Result<NotificationListResponse> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .get(self.url("/notifications"))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<OkResponse> {
        let token = self.token_or_bail()?;
        let resp = self
            .client
            .put(self.url(&format!("/notifications/{id}/read")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Raw helpers (for E2E / advanced usage) ────────────────────────────

    /// Authenticated GET returning the raw response.
    pub async fn get_with_auth(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Authenticated POST (no body) returning the raw response.
    pub async fn post_with_auth(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Authenticated POST with JSON body returning the raw response.
    pub async fn post_json_with_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Authenticated PUT with JSON body returning the raw response.
    pub async fn put_json_with_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Unauthenticated POST with JSON body returning the raw response.
    pub async fn post_json_raw<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an error containing the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{status}: {body}");
    }
    Ok(resp.json().await?)
}
