use std::fs;
use tidybook_core::{
    Category, Contact, ContactDraft, ContactService, CorruptFilePolicy, JsonFileStorage, OpenError,
    Priority, RecordStore, StoreConfig, Task, TaskService,
};

#[test]
fn open_creates_empty_collection_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());

    let contacts = ContactService::open(&config).unwrap();
    let tasks = TaskService::open(&config).unwrap();

    assert!(contacts.contacts().is_empty());
    assert!(tasks.tasks().is_empty());
    assert_eq!(fs::read_to_string(dir.path().join("contacts.json")).unwrap(), "[]\n");
    assert_eq!(fs::read_to_string(dir.path().join("todos.json")).unwrap(), "[]\n");
}

#[test]
fn records_survive_reopen_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());

    let mut service = ContactService::open(&config).unwrap();
    service
        .add_contact(ContactDraft::new("Alice", "555-0100"))
        .unwrap();
    service.add_contact(ContactDraft::new("Bob", "555-0101")).unwrap();
    let written = service.contacts().to_vec();

    let reopened = ContactService::open(&config).unwrap();
    assert_eq!(reopened.contacts(), written.as_slice());
}

#[test]
fn reload_without_mutation_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let mut service = TaskService::open(&config).unwrap();
    service
        .add_task(tidybook_core::NewTask::new("write report"))
        .unwrap();
    let before = fs::read(config.tasks_path()).unwrap();

    TaskService::open(&config).unwrap();
    TaskService::open(&config).unwrap();

    assert_eq!(fs::read(config.tasks_path()).unwrap(), before);
}

#[test]
fn legacy_task_file_is_read_and_backfilled_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    fs::write(
        &path,
        r#"[
    {
        "task": "Pay rent",
        "priority": "High",
        "category": "Finance",
        "due_date": "2024-06-01",
        "completed": false,
        "created_at": "2024-05-20 09:30:00"
    },
    {
        "task": "Gym",
        "priority": "Low",
        "category": "Health",
        "due_date": "2024-05-21",
        "completed": true,
        "created_at": "2024-05-20 10:00:00"
    }
]"#,
    )
    .unwrap();

    let storage = JsonFileStorage::<Task>::new(&path);
    let store = RecordStore::open(storage, CorruptFilePolicy::Discard).unwrap();
    let tasks = store.snapshot();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].description, "Pay rent");
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[1].category, Category::Health);
    assert!(tasks[1].completed);
    assert!(tasks.iter().all(|task| !task.id.is_nil()));

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("\"id\""));
    assert!(rewritten.contains("\"created_at\": \"2024-05-20 09:30:00\""));

    let reopened =
        RecordStore::open(JsonFileStorage::<Task>::new(&path), CorruptFilePolicy::Discard)
            .unwrap();
    assert_eq!(reopened.snapshot(), tasks);
}

#[test]
fn corrupt_file_is_discarded_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    fs::write(config.contacts_path(), "{ this is not json").unwrap();

    let mut service = ContactService::open(&config).unwrap();
    assert!(service.contacts().is_empty());
    assert!(service.store().recovered_from().is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    service.add_contact(ContactDraft::new("Alice", "1")).unwrap();
    let reloaded = ContactService::open(&config).unwrap();
    assert_eq!(reloaded.contacts().len(), 1);
}

#[test]
fn corrupt_file_is_copied_aside_when_preserving() {
    let dir = tempfile::tempdir().unwrap();
    let config =
        StoreConfig::new(dir.path()).with_corrupt_policy(CorruptFilePolicy::Preserve);
    fs::write(config.tasks_path(), "[{\"task\": ").unwrap();

    let service = TaskService::open(&config).unwrap();
    assert!(service.tasks().is_empty());

    let recovered = service.store().recovered_from().unwrap();
    let recovered_name = recovered.file_name().unwrap().to_string_lossy().into_owned();
    assert!(recovered_name.starts_with("todos.json.corrupt-"));
    assert_eq!(fs::read_to_string(recovered).unwrap(), "[{\"task\": ");
}

#[test]
fn non_array_document_counts_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"{"name": "Alice", "phone": "1"}"#).unwrap();

    let store =
        RecordStore::open(JsonFileStorage::<Contact>::new(&path), CorruptFilePolicy::Discard)
            .unwrap();
    assert!(store.is_empty());
}

#[test]
fn custom_file_names_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path())
        .with_contacts_file("people.json")
        .with_tasks_file("chores.json");

    ContactService::open(&config).unwrap();
    TaskService::open(&config).unwrap();

    assert!(dir.path().join("people.json").exists());
    assert!(dir.path().join("chores.json").exists());
}

#[test]
fn invalid_file_name_is_rejected_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path()).with_contacts_file("../escape.json");

    let err = ContactService::open(&config).err().unwrap();
    assert!(matches!(err, OpenError::Config(_)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
