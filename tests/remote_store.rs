#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use taskflow::api::{RecordStore, RemoteConfig, RemoteStore};
    use taskflow::libs::error::{RecordKind, StoreError};
    use taskflow::libs::task::{Priority, TaskPatch};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// A request as seen by the fake record service.
    struct Captured {
        head: String,
        body: Value,
    }

    /// Serves exactly one HTTP response and hands back what the client sent.
    async fn serve_once(status: &'static str, body: Value) -> (RemoteStore, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            let header_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                raw.extend_from_slice(&buf[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|value| value.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            while raw.len() < header_end + length {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
            }

            let payload = body.to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                payload.len(),
                payload
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let body = if length == 0 {
                Value::Null
            } else {
                serde_json::from_slice(&raw[header_end..header_end + length]).unwrap()
            };
            Captured { head, body }
        });

        let store = RemoteStore::new(&RemoteConfig {
            api_url: format!("http://{}/api/", addr),
            project_id: "proj_42".to_string(),
            public_key: "pk_test".to_string(),
        });
        (store, handle)
    }

    #[tokio::test]
    async fn test_list_tasks_maps_records() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "data": [
                    {
                        "Id": 1,
                        "Name": "Renew domain",
                        "title": "Renew domain",
                        "due_date": "2024-06-01",
                        "priority": "high",
                        "completed": false,
                        "project_id": { "Id": 3, "Name": "Ops" },
                        "CreatedOn": "2024-05-01T10:00:00Z",
                        "ModifiedOn": "2024-05-02T10:00:00Z"
                    },
                    { "Id": 2, "Name": "Legacy row" }
                ]
            }),
        )
        .await;

        let tasks = store.list_tasks().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.head.starts_with("post /api/tables/task/records/query "));
        assert!(request.head.contains("x-project-id: proj_42"));
        assert!(request.head.contains("authorization: bearer pk_test"));
        assert_eq!(request.body["orderBy"][0]["fieldName"], "due_date");
        assert!(request.body["fields"].as_array().unwrap().contains(&json!("project_id")));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Renew domain");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].project_id, Some(3));
        assert_eq!(tasks[1].title, "Legacy row");
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert!(!tasks[1].completed);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (store, server) = serve_once("404 Not Found", json!({ "success": false, "message": "missing" })).await;

        let err = store.get_task(77).await.unwrap_err();
        let request = server.await.unwrap();

        assert!(request.head.starts_with("get /api/tables/task/records/77 "));
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, id: 77 }));
    }

    #[tokio::test]
    async fn test_update_sends_only_the_patch() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{
                    "success": true,
                    "data": { "Id": 5, "title": "Call plumber", "completed": true, "priority": "low" }
                }]
            }),
        )
        .await;

        let task = store.update_task(5, &TaskPatch::completed(true)).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.head.starts_with("patch /api/tables/task/records "));
        assert_eq!(request.body, json!({ "records": [{ "Id": 5, "completed": true }] }));
        assert!(task.completed);
        assert_eq!(task.title, "Call plumber");
        assert_eq!(task.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_create_failure_envelope_is_backend_error() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{ "success": false, "message": "quota exceeded" }]
            }),
        )
        .await;

        let err = store.create_task(&TaskPatch::new("One more")).await.unwrap_err();
        let request = server.await.unwrap();

        assert_eq!(request.body["records"][0]["title"], "One more");
        assert_eq!(request.body["records"][0]["Name"], "One more");
        match err {
            StoreError::Backend(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_sends_record_ids() {
        let (store, server) = serve_once("200 OK", json!({ "success": true })).await;

        assert!(store.delete_project(9).await.unwrap());
        let request = server.await.unwrap();

        assert!(request.head.starts_with("delete /api/tables/project/records "));
        assert_eq!(request.body, json!({ "RecordIds": [9] }));
    }

    #[tokio::test]
    async fn test_delete_of_missing_record_is_not_found() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{ "success": false, "message": "Record does not exist" }]
            }),
        )
        .await;

        let err = store.delete_task(404).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, id: 404 }));
    }

    #[tokio::test]
    async fn test_delete_rejected_per_record_is_backend_error() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{ "success": false, "message": "record is locked" }]
            }),
        )
        .await;

        let err = store.delete_category(3).await.unwrap_err();
        server.await.unwrap();

        match err {
            StoreError::Backend(message) => assert!(message.contains("record is locked")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_of_missing_record_is_not_found() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{ "success": false, "message": "Record does not exist" }]
            }),
        )
        .await;

        let err = store.update_task(404, &TaskPatch::completed(true)).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Task, id: 404 }));
    }

    #[tokio::test]
    async fn test_update_sends_null_for_cleared_fields() {
        let (store, server) = serve_once(
            "200 OK",
            json!({
                "success": true,
                "results": [{ "success": true, "data": { "Id": 5, "title": "Call plumber", "due_date": null } }]
            }),
        )
        .await;

        let patch = TaskPatch {
            due_date: Some(None),
            project_id: Some(None),
            ..Default::default()
        };
        let task = store.update_task(5, &patch).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request.body, json!({ "records": [{ "Id": 5, "due_date": null, "project_id": null }] }));
        assert_eq!(task.due_date, None);
        assert_eq!(task.project_id, None);
    }

    #[tokio::test]
    async fn test_server_error_is_backend_error() {
        let (store, server) = serve_once("500 Internal Server Error", json!({ "success": false })).await;

        let err = store.list_categories().await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_request() {
        // nothing listens here; a request would surface as a backend error
        let store = RemoteStore::new(&RemoteConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            project_id: "p".to_string(),
            public_key: "k".to_string(),
        });

        let err = store.create_task(&TaskPatch::new("")).await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }
}
