use serde_json::json;
use tidybook_core::{
    Category, Contact, Priority, Record, RecordKind, RecordValidationError, Task, TaskStatus,
};
use uuid::Uuid;

#[test]
fn new_task_uses_default_attributes() {
    let task = Task::new("buy milk");
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.category, Category::Personal);
    assert!(!task.completed);
    assert_eq!(task.status(), TaskStatus::Pending);
    assert!(!task.id.is_nil());
}

#[test]
fn task_serializes_with_legacy_field_names() {
    let task = Task::new("file taxes")
        .with_priority(Priority::High)
        .with_category(Category::Finance)
        .with_due_date("2026-04-15");
    let value = serde_json::to_value(&task).unwrap();

    assert_eq!(value["task"], json!("file taxes"));
    assert_eq!(value["priority"], json!("High"));
    assert_eq!(value["category"], json!("Finance"));
    assert_eq!(value["due_date"], json!("2026-04-15"));
    assert_eq!(value["completed"], json!(false));
    let created_at = value["created_at"].as_str().unwrap();
    assert_eq!(created_at.len(), "2026-01-01 00:00:00".len());
    assert!(value.get("description").is_none());
}

#[test]
fn task_decodes_file_without_ids() {
    let value = json!({
        "task": "Gym",
        "priority": "Low",
        "category": "Health",
        "due_date": "2024-05-01",
        "completed": true,
        "created_at": "2024-04-30 08:15:00"
    });
    let task: Task = serde_json::from_value(value).unwrap();

    assert!(task.id.is_nil());
    assert_eq!(task.description, "Gym");
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.category, Category::Health);
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(
        task.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2024-04-30 08:15:00"
    );
}

#[test]
fn task_decode_falls_back_on_unknown_values() {
    let value = json!({
        "task": "Read",
        "priority": "Urgent",
        "category": 7,
        "completed": "yes"
    });
    let task: Task = serde_json::from_value(value).unwrap();

    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.category, Category::Personal);
    assert!(!task.completed);
    assert_eq!(task.due_date, "");
}

#[test]
fn contact_decodes_missing_optional_fields() {
    let value = json!({ "name": "Alice", "phone": "555-0100" });
    let contact: Contact = serde_json::from_value(value).unwrap();

    assert_eq!(contact.name, "Alice");
    assert_eq!(contact.email, "");
    assert_eq!(contact.address, "");
}

#[test]
fn contact_requires_name_and_phone() {
    let missing_phone = Contact::new("Alice", "   ");
    let err = missing_phone.validate().unwrap_err();
    assert_eq!(
        err,
        RecordValidationError::MissingField {
            kind: RecordKind::Contact,
            field: "phone",
        }
    );

    assert!(Contact::new("", "1").validate().is_err());
    assert!(Contact::new("Alice", "1").validate().is_ok());
}

#[test]
fn task_requires_text_and_id() {
    assert!(Task::new(" ").validate().is_err());

    let mut task = Task::new("stretch");
    task.set_id(Uuid::nil());
    assert_eq!(task.validate().unwrap_err(), RecordValidationError::NilId);
}

#[test]
fn carry_over_keeps_identity_and_creation_time() {
    let original = Task::new("draft");
    let mut replacement = Task::new("final").with_completed(true);
    replacement.carry_over(&original);

    assert_eq!(replacement.id, original.id);
    assert_eq!(replacement.created_at, original.created_at);
    assert_eq!(replacement.description, "final");
    assert!(replacement.completed);
}

#[test]
fn contact_decode_tolerates_null_and_non_string_text() {
    let value = json!({
        "id": 42,
        "name": "Bob",
        "phone": 5550100,
        "email": null,
        "address": ["1 Main St"]
    });
    let contact: Contact = serde_json::from_value(value).unwrap();

    assert!(contact.id.is_nil());
    assert_eq!(contact.name, "Bob");
    assert_eq!(contact.phone, "");
    assert_eq!(contact.email, "");
    assert_eq!(contact.address, "");
}

#[test]
fn task_decode_tolerates_null_text_and_bad_id() {
    let value = json!({
        "id": "not-a-uuid",
        "task": null,
        "due_date": 20240501,
        "completed": true
    });
    let task: Task = serde_json::from_value(value).unwrap();

    assert!(task.id.is_nil());
    assert_eq!(task.description, "");
    assert_eq!(task.due_date, "");
    assert!(task.completed);
}

#[test]
fn stored_id_is_decoded_as_written() {
    let id = Uuid::new_v4();
    let value = json!({ "id": id.to_string(), "name": "Ada", "phone": "1" });
    let contact: Contact = serde_json::from_value(value).unwrap();
    assert_eq!(contact.id, id);
}
