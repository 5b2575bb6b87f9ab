//! Compile-time–checked column identifiers for all tables.

use sea_query::Iden;

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    PasswordSalt,
    Role,
    EmployeeId,
    CreatedAt,
}

#[derive(Iden)]
pub enum RefreshTokens {
    Table,
    Id,
    UserId,
    TokenHash,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden)]
pub enum Employees {
    Table,
    Id,
    Name,
    Position,
    Department,
    Email,
    Status,
    Salary,
    Manager,
    CreatedAt,
}

#[derive(Iden)]
pub enum Documents {
    Table,
    Id,
    EmployeeId,
    DocumentType,
    FileName,
    FilePath,
    MimeType,
    UploadDate,
}

#[derive(Iden)]
pub enum CalendarEvents {
    Table,
    Id,
    Title,
    StartDate,
    EndDate,
    EventType,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
pub enum BankAccounts {
    Table,
    Id,
    EmployeeId,
    AccountType,
    AccountNumber,
    BankName,
    IsPrimary,
}

#[derive(Iden)]
pub enum PerformanceGoals {
    Table,
    Id,
    EmployeeId,
    Title,
    Description,
    Status,
    Progress,
    DueDate,
    CreatedAt,
}

#[derive(Iden)]
pub enum Notifications {
    Table,
    Id,
    UserId,
    Title,
    Body,
    IsRead,
    CreatedAt,
}
