//! Shared API types, crypto, and SQL builders for the StaffHub HR portal.
//!
//! This crate is the **single source of truth** for all API request/response
//! types. The Axum server and the gateway import these types directly.
//! TypeScript types for the React SPA are generated via `ts-rs`.
//!
//! To regenerate TypeScript types:
//!   cargo test -p staffhub-api --features ts -- export_typescript --nocapture

use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
pub mod crypto;
#[cfg(feature = "backend")]
pub mod db;
#[cfg(feature = "backend")]
pub mod service;

// ─── Shared Enums ────────────────────────────────────────────────────────────

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "onleave",
            Self::Terminated => "terminated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "onleave" => Some(Self::OnLeave),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a portal user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of calendar event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum EventType {
    Meeting,
    Holiday,
    Training,
    Conference,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meeting => "meeting",
            Self::Holiday => "holiday",
            Self::Training => "training",
            Self::Conference => "conference",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "meeting" => Some(Self::Meeting),
            "holiday" => Some(Self::Holiday),
            "training" => Some(Self::Training),
            "conference" => Some(Self::Conference),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a performance goal.
///
/// Derived from `progress` on update: 100 completes the goal; anything
/// lower moves it to in-progress unless it is already completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "notstarted",
            Self::InProgress => "inprogress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "notstarted" => Some(Self::NotStarted),
            "inprogress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Auth ────────────────────────────────────────────────────────────────────

/// Username + email + password registration.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AuthRegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Username + password login.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned on successful login / register / refresh.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AuthTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

/// Refresh token request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request (invalidate refresh token).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Returned by `POST /api/auth/verify` — confirms token validity.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct VerifyResponse {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

/// Full user profile returned by `GET /api/auth/me`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UserProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub employee_id: Option<String>,
    pub created_at: String,
}

/// Generic success response for operations that don't return data.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct OkResponse {
    pub ok: bool,
}

// ─── Employees ───────────────────────────────────────────────────────────────

/// A single employee row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    pub status: EmployeeStatus,
    pub salary: f64,
    pub manager: Option<String>,
    pub created_at: String,
}

/// Create a new employee. `status` defaults to active.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub manager: Option<String>,
}

/// Full-replace update of an employee's mutable fields.
pub type UpdateEmployeeRequest = CreateEmployeeRequest;

/// Query parameters for the employee listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    20
}

/// Paginated employee listing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// One record of a bulk employee upload.
///
/// `metadata` is accepted for compatibility with exported spreadsheets and
/// parsed as plain JSON; it is validated but not persisted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmployeeRecord {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Per-row failure from a bulk upload.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct BulkRowError {
    pub row: usize,
    pub email: Option<String>,
    pub message: String,
}

/// Outcome of `POST /api/employees/bulk-upload`.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct BulkUploadResponse {
    pub inserted: usize,
    pub skipped: usize,
    pub errors: Vec<BulkRowError>,
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// A stored document row. The file itself lives under `/uploads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DocumentResponse {
    pub id: String,
    pub employee_id: Option<String>,
    pub document_type: String,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: String,
    pub upload_date: String,
}

/// Envelope for `GET /api/documents` — the shape the SPA (and the gateway
/// fallback) relies on.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DocumentListResponse {
    pub success: bool,
    pub documents: Vec<DocumentResponse>,
}

/// Returned on successful document upload.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DocumentUploadResponse {
    pub success: bool,
    pub document: DocumentResponse,
}

/// Query parameters for the document listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    pub employee_id: Option<String>,
}

// ─── Calendar events ─────────────────────────────────────────────────────────

/// A single calendar event row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CalendarEventResponse {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub event_type: EventType,
    pub created_by: Option<String>,
    pub created_at: String,
}

/// Envelope for `GET /api/calendar-events`.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CalendarEventsEnvelope {
    pub success: bool,
    pub data: Vec<CalendarEventResponse>,
    pub error: Option<String>,
}

/// Create a calendar event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CreateCalendarEventRequest {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub event_type: EventType,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Partial update of a calendar event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UpdateCalendarEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

/// Returned by `POST /api/reset-calendar-events`.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ResetCalendarResponse {
    pub success: bool,
    pub message: String,
}

// ─── Bank accounts ───────────────────────────────────────────────────────────

/// A bank account row. At most one primary account per employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct BankAccountResponse {
    pub id: String,
    pub employee_id: String,
    pub account_type: String,
    pub account_number: String,
    pub bank_name: String,
    pub is_primary: bool,
}

/// Create a bank account for an employee.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CreateBankAccountRequest {
    pub employee_id: String,
    pub account_type: String,
    pub account_number: String,
    pub bank_name: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Partial update of a bank account.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UpdateBankAccountRequest {
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// Query parameters for the bank account listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountListQuery {
    pub employee_id: String,
}

// ─── Performance goals ───────────────────────────────────────────────────────

/// A performance goal row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct GoalResponse {
    pub id: String,
    pub employee_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub progress: i64,
    pub due_date: Option<String>,
    pub created_at: String,
}

/// Create a performance goal. `progress` is clamped to 0–100.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CreateGoalRequest {
    pub employee_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub status: Option<GoalStatus>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Partial update of a performance goal. Fields outside this allow-list
/// are rejected by serde.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub status: Option<GoalStatus>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Query parameters for the goal listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalListQuery {
    pub employee_id: Option<String>,
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// A notification row, scoped to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Create a notification for a user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct CreateNotificationRequest {
    pub user_id: String,
    pub title: String,
    pub body: String,
}

/// Listing of the authenticated user's notifications.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
}

// ─── System (training endpoints) ─────────────────────────────────────────────

/// Request body for `POST /api/system/fetch-resource`.
///
/// Exactly one of `url` or `command` is expected. Only honored when the
/// training endpoints are enabled.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResourceRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

/// Result of a fetch-resource call. `status`/`body` are set for URL
/// fetches; `stdout`/`stderr`/`exit_code` for command execution.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResourceResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

// ─── Health ──────────────────────────────────────────────────────────────────

/// Returned by `GET /api/health`.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Service-level error used by framework-agnostic logic in this crate.
/// Mapped to HTTP responses by each backend.
#[derive(Debug)]
pub enum ServiceError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ServiceError {
    /// HTTP status code as a `u16`.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::Internal(m) => m,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ServiceError {}

/// JSON error shape `{ "error": "..." }` returned by all error responses.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ApiError {
    pub error: String,
}

impl From<&ServiceError> for ApiError {
    fn from(e: &ServiceError) -> Self {
        Self {
            error: e.message().to_string(),
        }
    }
}

#[cfg(all(test, feature = "ts"))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use ts_rs::TS;

    /// Run with: cargo test -p staffhub-api --features ts -- export_typescript --nocapture
    #[test]
    fn export_typescript() {
        let out_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../web/src/api-types.generated.ts");

        let cfg = ts_rs::Config::new().with_large_int("number");
        let mut parts: Vec<String> = Vec::new();
        parts.push("// AUTO-GENERATED by staffhub-api — DO NOT EDIT".to_string());
        parts.push(
            "// Regenerate with: cargo test -p staffhub-api --features ts -- export_typescript"
                .to_string(),
        );
        parts.push(String::new());

        // Collect all type declarations.
        // Structs: `type X = {...}` → `export interface X {...}`
        // Enums/unions: `type X = "a" | "b"` → `export type X = "a" | "b"`
        macro_rules! collect_ts {
            ($($t:ty),+ $(,)?) => {
                $(
                    let decl = <$t>::decl(&cfg);
                    let decl = if decl.contains(" = {") {
                        decl
                            .replacen("type ", "export interface ", 1)
                            .replace(" = {", " {")
                            .trim_end_matches(';')
                            .to_string()
                    } else {
                        decl
                            .replacen("type ", "export type ", 1)
                            .trim_end_matches(';')
                            .to_string()
                    };
                    parts.push(decl);
                    parts.push(String::new());
                )+
            };
        }

        collect_ts!(
            // Shared enums
            EmployeeStatus,
            UserRole,
            EventType,
            GoalStatus,
            // Auth
            AuthRegisterRequest,
            LoginRequest,
            AuthTokenResponse,
            RefreshRequest,
            LogoutRequest,
            VerifyResponse,
            UserProfileResponse,
            OkResponse,
            // Employees
            EmployeeResponse,
            CreateEmployeeRequest,
            EmployeeListResponse,
            BulkRowError,
            BulkUploadResponse,
            // Documents
            DocumentResponse,
            DocumentListResponse,
            DocumentUploadResponse,
            // Calendar
            CalendarEventResponse,
            CalendarEventsEnvelope,
            CreateCalendarEventRequest,
            UpdateCalendarEventRequest,
            ResetCalendarResponse,
            // Bank accounts
            BankAccountResponse,
            CreateBankAccountRequest,
            UpdateBankAccountRequest,
            // Performance goals
            GoalResponse,
            CreateGoalRequest,
            UpdateGoalRequest,
            // Notifications
            NotificationResponse,
            CreateNotificationRequest,
            NotificationListResponse,
            // Health
            HealthResponse,
            ApiError,
        );

        let content = parts.join("\n");

        if let Some(parent) = out_dir.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let mut file = std::fs::File::create(&out_dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", out_dir.display(), e));
        file.write_all(content.as_bytes())
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", out_dir.display(), e));

        println!("Generated TypeScript types at: {}", out_dir.display());
    }
}
