#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use taskflow::api::{MemoryStore, RecordStore};
    use taskflow::libs::error::{RecordKind, StoreError};
    use taskflow::libs::task::{CategoryPatch, Priority, ProjectPatch, TaskPatch, DEFAULT_COLOR};
    use test_context::{test_context, AsyncTestContext};

    struct StoreTestContext {
        store: MemoryStore,
    }

    impl AsyncTestContext for StoreTestContext {
        async fn setup() -> Self {
            StoreTestContext { store: MemoryStore::new() }
        }
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_create_assigns_identity_and_defaults(ctx: &mut StoreTestContext) {
        let task = ctx.store.create_task(&TaskPatch::new("Water plants")).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_at, task.updated_at);

        let second = ctx.store.create_task(&TaskPatch::new("Feed cat")).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(ctx.store.list_tasks().await.unwrap().len(), 2);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_create_rejects_blank_title(ctx: &mut StoreTestContext) {
        let err = ctx.store.create_task(&TaskPatch::new("   ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = ctx.store.create_task(&TaskPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert!(ctx.store.list_tasks().await.unwrap().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_partial_update_preserves_other_fields(ctx: &mut StoreTestContext) {
        let created = ctx
            .store
            .create_task(&TaskPatch {
                title: Some("Quarterly review".to_string()),
                description: Some("Collect metrics".to_string()),
                due_date: Some(NaiveDate::from_ymd_opt(2024, 9, 30)),
                priority: Some(Priority::High),
                category: Some("Work".to_string()),
                project_id: Some(Some(3)),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = ctx.store.update_task(created.id, &TaskPatch::completed(true)).await.unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.due_date, created.due_date);
        assert_eq!(updated.priority, created.priority);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.project_id, created.project_id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let fetched = ctx.store.get_task(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_update_rejects_blanked_title(ctx: &mut StoreTestContext) {
        let task = ctx.store.create_task(&TaskPatch::new("Keep me")).await.unwrap();

        let err = ctx.store.update_task(task.id, &TaskPatch::new("")).await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(ctx.store.get_task(task.id).await.unwrap().title, "Keep me");
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_unknown_ids_are_not_found(ctx: &mut StoreTestContext) {
        ctx.store.create_task(&TaskPatch::new("Only task")).await.unwrap();
        let before = ctx.store.list_tasks().await.unwrap();

        let err = ctx.store.delete_task(999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, id: 999 }));
        assert_eq!(ctx.store.list_tasks().await.unwrap(), before);

        assert!(ctx.store.get_task(999).await.unwrap_err().is_not_found());
        assert!(ctx.store.update_task(999, &TaskPatch::completed(true)).await.unwrap_err().is_not_found());
        assert!(ctx.store.get_project(999).await.unwrap_err().is_not_found());
        assert!(ctx.store.delete_category(999).await.unwrap_err().is_not_found());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_delete_removes_task(ctx: &mut StoreTestContext) {
        let keep = ctx.store.create_task(&TaskPatch::new("Keep")).await.unwrap();
        let gone = ctx.store.create_task(&TaskPatch::new("Drop")).await.unwrap();

        assert!(ctx.store.delete_task(gone.id).await.unwrap());

        let remaining = ctx.store.list_tasks().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert!(ctx.store.get_task(gone.id).await.unwrap_err().is_not_found());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_update_can_clear_due_date_and_project(ctx: &mut StoreTestContext) {
        let created = ctx
            .store
            .create_task(&TaskPatch {
                due_date: Some(NaiveDate::from_ymd_opt(2024, 9, 30)),
                project_id: Some(Some(3)),
                ..TaskPatch::new("Migrate wiki")
            })
            .await
            .unwrap();

        let cleared = ctx
            .store
            .update_task(
                created.id,
                &TaskPatch {
                    due_date: Some(None),
                    project_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.project_id, None);
        assert_eq!(cleared.title, "Migrate wiki");
        assert_eq!(ctx.store.get_task(created.id).await.unwrap(), cleared);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_project_delete_does_not_cascade(ctx: &mut StoreTestContext) {
        let project = ctx.store.create_project(&ProjectPatch::new("Launch")).await.unwrap();
        let task = ctx
            .store
            .create_task(&TaskPatch {
                project_id: Some(Some(project.id)),
                ..TaskPatch::new("Press kit")
            })
            .await
            .unwrap();

        ctx.store.delete_project(project.id).await.unwrap();

        assert!(ctx.store.list_projects().await.unwrap().is_empty());
        assert_eq!(ctx.store.get_task(task.id).await.unwrap().project_id, Some(project.id));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_project_crud(ctx: &mut StoreTestContext) {
        let project = ctx.store.create_project(&ProjectPatch::new("Garden")).await.unwrap();
        assert_eq!(project.color, DEFAULT_COLOR);
        assert_eq!(project.description, "");

        let updated = ctx
            .store
            .update_project(
                project.id,
                &ProjectPatch {
                    description: Some("Beds and borders".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Garden");
        assert_eq!(updated.description, "Beds and borders");

        let err = ctx.store.create_project(&ProjectPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_category_crud(ctx: &mut StoreTestContext) {
        let category = ctx
            .store
            .create_category(&CategoryPatch {
                name: Some("Errands".to_string()),
                color: Some("#ec4899".to_string()),
            })
            .await
            .unwrap();

        let renamed = ctx.store.update_category(category.id, &CategoryPatch::new("Chores")).await.unwrap();
        assert_eq!(renamed.name, "Chores");
        assert_eq!(renamed.color, "#ec4899");

        assert!(ctx.store.delete_category(category.id).await.unwrap());
        assert!(ctx.store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fixtures_are_anchored_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let store = MemoryStore::with_fixtures(today);

        let tasks = store.list_tasks().await.unwrap();
        let projects = store.list_projects().await.unwrap();
        let categories = store.list_categories().await.unwrap();

        assert_eq!(tasks.len(), 8);
        assert_eq!(projects.len(), 3);
        assert_eq!(categories.len(), 4);

        let overdue = store.get_task(2).await.unwrap();
        assert_eq!(overdue.title, "Fix login redirect");
        assert_eq!(overdue.due_date, Some(today - Duration::days(1)));
        assert!(!overdue.completed);

        assert!(tasks.iter().any(|task| task.due_date.is_none()));
        assert_eq!(tasks.iter().filter(|task| task.completed).count(), 2);

        // listed by name
        let names: Vec<_> = projects.iter().map(|project| project.name.as_str()).collect();
        assert_eq!(names, vec!["Mobile App", "Q3 Planning", "Website Redesign"]);
    }
}
