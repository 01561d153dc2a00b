use todo_core::{InMemoryTaskRepository, StatusFilter, TaskService, TaskValidationError};

fn service() -> TaskService<InMemoryTaskRepository> {
    TaskService::new(InMemoryTaskRepository::new())
}

#[test]
fn add_task_returns_stored_task() {
    let mut service = service();

    let task = service
        .add_task("Buy groceries", Some("Milk, bread, eggs"))
        .unwrap();
    assert_eq!(task.id(), 1);
    assert!(task.is_incomplete());
    assert_eq!(service.get_task_count(), 1);
    assert_eq!(service.get_task_by_id(1), Some(task));
}

#[test]
fn add_task_propagates_validation_errors() {
    let mut service = service();

    assert_eq!(
        service.add_task("", None).unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(service.get_task_count(), 0);
}

#[test]
fn mark_complete_is_idempotent() {
    let mut service = service();
    service.add_task("Task", None).unwrap();

    let once = service.mark_complete(1).unwrap();
    let twice = service.mark_complete(1).unwrap();
    assert!(once.is_complete());
    assert_eq!(once, twice);

    let undone = service.mark_incomplete(1).unwrap();
    assert!(undone.is_incomplete());
    assert_eq!(service.mark_incomplete(1).unwrap(), undone);
}

#[test]
fn status_sequence_ends_incomplete() {
    let mut service = service();
    let id = service.add_task("Task", None).unwrap().id();

    service.mark_complete(id).unwrap();
    service.mark_incomplete(id).unwrap();
    assert!(service.toggle_status(id).unwrap().is_complete());
    assert!(service.toggle_status(id).unwrap().is_incomplete());
    assert!(service.get_task_by_id(id).unwrap().is_incomplete());
}

#[test]
fn status_operations_report_missing_ids() {
    let mut service = service();

    assert!(service.mark_complete(5).is_none());
    assert!(service.mark_incomplete(5).is_none());
    assert!(service.toggle_status(5).is_none());
    assert!(!service.delete_task(5));
    assert_eq!(service.update_task(999, Some("X"), None).unwrap(), None);
    assert_eq!(service.get_task_count(), 0);
}

#[test]
fn update_task_changes_text_but_not_status() {
    let mut service = service();
    service.add_task("Title", Some("Body")).unwrap();
    service.mark_complete(1).unwrap();

    let updated = service
        .update_task(1, None, Some("New body"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.title(), "Title");
    assert_eq!(updated.description(), "New body");
    assert!(updated.is_complete());

    let err = service.update_task(1, Some(" "), None).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    assert_eq!(service.get_task_by_id(1).unwrap().title(), "Title");
}

#[test]
fn filtered_listings_follow_creation_order() {
    let mut service = service();
    for title in ["first", "second", "third"] {
        service.add_task(title, None).unwrap();
    }
    service.mark_complete(2).unwrap();

    let completed: Vec<_> = service
        .get_completed_tasks()
        .iter()
        .map(|task| task.title().to_string())
        .collect();
    let incomplete: Vec<_> = service
        .get_incomplete_tasks()
        .iter()
        .map(|task| task.title().to_string())
        .collect();

    assert_eq!(completed, vec!["second"]);
    assert_eq!(incomplete, vec!["first", "third"]);
    assert_eq!(
        service.get_tasks_by_status(StatusFilter::All),
        service.get_all_tasks()
    );
}
