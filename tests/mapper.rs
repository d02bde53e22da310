#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;
    use taskflow::api::mapper::{
        read_category, read_project, read_task, write_category, write_project, write_task, CategoryRecord, ProjectRecord,
        StorageRecord, TaskRecord,
    };
    use taskflow::libs::task::{CategoryPatch, Priority, ProjectPatch, TaskPatch, DEFAULT_COLOR};

    fn stored_task() -> TaskRecord {
        serde_json::from_value(json!({
            "Id": 12,
            "Name": "Prepare demo",
            "title": "Prepare demo",
            "description": "Slides and script",
            "due_date": "2024-06-03",
            "priority": "high",
            "completed": false,
            "category": "Work",
            "project_id": 4,
            "CreatedOn": "2024-05-01T08:00:00Z",
            "ModifiedOn": "2024-05-02T09:30:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_read_full_record() {
        let now = Utc::now();
        let task = read_task(stored_task(), now);

        assert_eq!(task.id, 12);
        assert_eq!(task.title, "Prepare demo");
        assert_eq!(task.description, "Slides and script");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
        assert_eq!(task.category, "Work");
        assert_eq!(task.project_id, Some(4));
        assert_eq!(task.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        assert_eq!(task.updated_at, Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_read_applies_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let record: TaskRecord = serde_json::from_value(json!({ "Id": 3 })).unwrap();

        let task = read_task(record, now);

        assert_eq!(task.title, "");
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert_eq!(task.category, "");
        assert_eq!(task.project_id, None);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn test_read_tolerates_bad_values() {
        let record: TaskRecord = serde_json::from_value(json!({
            "Id": 5,
            "Name": "Fallback title",
            "due_date": "someday",
            "priority": "urgent"
        }))
        .unwrap();

        let task = read_task(record, Utc::now());

        assert_eq!(task.title, "Fallback title");
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_write_only_serialises_present_fields() {
        let patch = TaskPatch::completed(true);

        let value = serde_json::to_value(write_task(&patch)).unwrap();

        assert_eq!(value, json!({ "completed": true }));
    }

    #[test]
    fn test_write_uses_storage_names() {
        let patch = TaskPatch {
            title: Some("Ship".to_string()),
            due_date: Some(NaiveDate::from_ymd_opt(2024, 7, 1)),
            priority: Some(Priority::Low),
            project_id: Some(Some(2)),
            ..Default::default()
        };

        let value = serde_json::to_value(write_task(&patch)).unwrap();

        assert_eq!(
            value,
            json!({
                "Name": "Ship",
                "title": "Ship",
                "due_date": "2024-07-01",
                "priority": "low",
                "project_id": 2
            })
        );
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let now = Utc::now();
        let first = read_task(stored_task(), now);

        let rewritten = TaskRecord::create(first.id, &write_task(&TaskPatch::from(&first)), first.created_at);
        let second = read_task(rewritten, now);

        assert_eq!(second.title, first.title);
        assert_eq!(second.description, first.description);
        assert_eq!(second.due_date, first.due_date);
        assert_eq!(second.priority, first.priority);
        assert_eq!(second.completed, first.completed);
        assert_eq!(second.category, first.category);
        assert_eq!(second.project_id, first.project_id);
        assert_eq!(second.created_at, first.created_at);

        let third = read_task(
            TaskRecord::create(second.id, &write_task(&TaskPatch::from(&second)), second.created_at),
            now,
        );
        assert_eq!(third, second);
    }

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let mut record = stored_task();

        record.merge(&write_task(&TaskPatch::completed(true)), Utc::now());
        let task = read_task(record, Utc::now());

        assert!(task.completed);
        assert_eq!(task.title, "Prepare demo");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 3));
    }

    #[test]
    fn test_clearing_optional_fields() {
        let clear = TaskPatch {
            due_date: Some(None),
            project_id: Some(None),
            ..Default::default()
        };
        let patch = write_task(&clear);

        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "due_date": null, "project_id": null }));

        let mut record = stored_task();
        record.merge(&patch, Utc::now());
        let task = read_task(record, Utc::now());

        assert_eq!(task.due_date, None);
        assert_eq!(task.project_id, None);
        assert_eq!(task.title, "Prepare demo");
    }

    #[test]
    fn test_project_and_category_colors_default() {
        let project = read_project(serde_json::from_value::<ProjectRecord>(json!({ "Id": 1, "Name": "Ops" })).unwrap(), Utc::now());
        let category = read_category(serde_json::from_value::<CategoryRecord>(json!({ "Id": 2, "Name": "Home", "color": "" })).unwrap());

        assert_eq!(project.name, "Ops");
        assert_eq!(project.description, "");
        assert_eq!(project.color, DEFAULT_COLOR);
        assert_eq!(category.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_project_and_category_patches() {
        let project = serde_json::to_value(write_project(&ProjectPatch::new("Launch"))).unwrap();
        let category = serde_json::to_value(write_category(&CategoryPatch {
            name: None,
            color: Some("#10b981".to_string()),
        }))
        .unwrap();

        assert_eq!(project, json!({ "Name": "Launch" }));
        assert_eq!(category, json!({ "color": "#10b981" }));
    }
}
