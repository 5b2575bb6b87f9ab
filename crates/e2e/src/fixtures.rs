use uuid::Uuid;

use staffhub_api::{CreateCalendarEventRequest, CreateEmployeeRequest, EventType};

/// Create an employee request with a unique email.
pub fn sample_employee() -> CreateEmployeeRequest {
    let short = &Uuid::new_v4().to_string()[..8];
    CreateEmployeeRequest {
        name: format!("Test Person {short}"),
        position: "Engineer".into(),
        department: "Engineering".into(),
        email: format!("employee-{short}@e2e.local"),
        status: None,
        salary: Some(90_000.0),
        manager: None,
    }
}

/// Create a one-hour meeting request.
pub fn sample_event() -> CreateCalendarEventRequest {
    CreateCalendarEventRequest {
        title: format!("Sync {}", &Uuid::new_v4().to_string()[..8]),
        start_date: "2025-06-02 10:00:00".into(),
        end_date: "2025-06-02 11:00:00".into(),
        event_type: EventType::Meeting,
        created_by: None,
    }
}
