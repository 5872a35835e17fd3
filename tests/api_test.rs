#[cfg(test)]
mod api_integration_tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use coursehub::api_router::build_router;
    use coursehub::catalog::SeedDocument;
    use coursehub::config::AppConfig;
    use coursehub::progress::{completion_key, InMemoryStore, KeyValueStore};
    use coursehub::shared::state::AppState;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(config: AppConfig) -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let seed = SeedDocument::load(None).expect("embedded seed should load");
        let state = AppState::new(config, seed, store.clone()).expect("state");
        (build_router(Arc::new(state)), store)
    }

    fn app() -> (Router, Arc<InMemoryStore>) {
        app_with(AppConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    fn ids(value: &Value) -> Vec<u64> {
        value["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|item| item["id"].as_u64())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_course_search_and_filters() {
        let (app, _) = app();

        let (status, body) = send(&app, Method::GET, "/api/courses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 6);

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/courses?search=algorithm&category=all&difficulty=beginner",
            None,
        )
        .await;
        assert_eq!(ids(&body), vec![1, 3]);

        let (_, body) = send(&app, Method::GET, "/api/courses?category=dsa", None).await;
        assert_eq!(ids(&body), vec![1, 5]);

        let (status, _) = send(&app, Method::GET, "/api/courses?difficulty=expert", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories_have_course_counts() {
        let (app, _) = app();
        let (_, body) = send(&app, Method::GET, "/api/categories", None).await;
        let categories = body["data"].as_array().expect("categories");
        assert_eq!(categories.len(), 6);
        let dsa = categories
            .iter()
            .find(|c| c["id"] == "dsa")
            .expect("dsa category");
        assert_eq!(dsa["coursesCount"], 2);
    }

    #[tokio::test]
    async fn test_course_detail_and_not_found() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/courses/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["course"]["id"], 1);
        assert_eq!(body["data"]["lessons"].as_array().map(Vec::len), Some(5));
        assert_eq!(body["data"]["lessons"][0]["isCompleted"], false);
        assert_eq!(body["data"]["progress"]["percentage"], 0);

        let (status, body) = send(&app, Method::GET, "/api/courses/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Course not found");
    }

    #[tokio::test]
    async fn test_toggle_persists_and_reports_progress() {
        let (app, store) = app();

        let (status, body) =
            send(&app, Method::POST, "/api/courses/1/lessons/3/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Lesson completed!");
        send(&app, Method::POST, "/api/courses/1/lessons/1/toggle", None).await;

        assert_eq!(
            store.get(&completion_key(1)).expect("get").as_deref(),
            Some("[3,1]")
        );

        let (_, body) = send(&app, Method::GET, "/api/courses/1/progress", None).await;
        assert_eq!(body["data"]["completedCount"], 2);
        assert_eq!(body["data"]["percentage"], 40);

        let (_, body) = send(&app, Method::GET, "/api/courses/1", None).await;
        assert_eq!(body["data"]["lessons"][2]["isCompleted"], true);

        let (_, body) = send(&app, Method::POST, "/api/courses/1/lessons/3/toggle", None).await;
        assert_eq!(body["message"], "Lesson marked as incomplete");
        assert_eq!(body["data"]["progress"]["completedLessons"], json!([1]));
    }

    #[tokio::test]
    async fn test_toggle_rejects_foreign_lesson() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::POST, "/api/courses/1/lessons/17/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reset_progress() {
        let (app, store) = app();
        send(&app, Method::POST, "/api/courses/2/lessons/6/toggle", None).await;
        let (status, _) = send(&app, Method::DELETE, "/api/courses/2/progress", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.get(&completion_key(2)).expect("get"), None);
    }

    #[tokio::test]
    async fn test_corrupt_progress_policies() {
        let (app, store) = app();
        store.set(&completion_key(1), "not json").expect("set");
        let (status, body) = send(&app, Method::GET, "/api/courses/1/progress", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["completedCount"], 0);

        let mut config = AppConfig::default();
        config.storage.on_corrupt = coursehub::progress::CorruptDataPolicy::Error;
        let (app, store) = app_with(config);
        store.set(&completion_key(1), "not json").expect("set");
        let (status, _) = send(&app, Method::GET, "/api/courses/1/progress", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        send(&app, Method::DELETE, "/api/courses/1/progress", None).await;
        let (status, _) = send(&app, Method::GET, "/api/courses/1/progress", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_zero_lesson_course_progress() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/courses/6/progress", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalLessons"], 0);
        assert_eq!(body["data"]["percentage"], 0);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _) = app();
        send(&app, Method::POST, "/api/courses/1/lessons/1/toggle", None).await;
        let (status, body) = send(&app, Method::GET, "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalCourses"], 6);
        assert_eq!(body["data"]["enrolledCourses"], 1);
        assert_eq!(body["data"]["completedLessons"], 1);
        assert_eq!(body["data"]["continueLearning"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_moderation_flow() {
        let (app, _) = app();

        let (_, body) = send(&app, Method::GET, "/api/submissions/stats", None).await;
        assert_eq!(body["data"], json!({ "pending": 2, "approved": 1, "rejected": 1 }));

        let (status, body) = send(&app, Method::POST, "/api/submissions/1/approve", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "approved");

        let (_, body) = send(&app, Method::POST, "/api/submissions/1/reject", None).await;
        assert_eq!(body["data"]["status"], "rejected");

        let (_, body) = send(&app, Method::GET, "/api/submissions?status=pending", None).await;
        assert_eq!(ids(&body), vec![2]);

        let (status, _) = send(&app, Method::POST, "/api/submissions/99/approve", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/api/submissions?status=archived", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_creator_submissions_enter_the_queue() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/creator/courses",
            Some(json!({
                "title": "Advanced React Patterns",
                "description": "Compound components",
                "category": "web-development",
                "difficulty": "advanced",
                "duration": "8 weeks",
                "tags": "React, Hooks"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 5);
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["type"], "course");
        assert_eq!(body["data"]["submittedBy"], "Anonymous Creator");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/creator/lessons",
            Some(json!({
                "courseId": 1,
                "title": "Tries",
                "description": "Prefix trees",
                "duration": "20 min",
                "videoUrl": "https://youtube.com/watch?v=trie",
                "submittedBy": "Sam"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["category"], "dsa");
        assert_eq!(body["data"]["payload"]["courseId"], 1);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/creator/requests",
            Some(json!({ "title": "Rust", "description": "Please", "category": "cooking" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Method::GET, "/api/submissions/stats", None).await;
        assert_eq!(body["data"]["pending"], 4);
    }

    #[tokio::test]
    async fn test_malformed_course_ids_are_not_found() {
        let (app, _) = app();
        for uri in [
            "/api/courses/abc",
            "/api/courses/-1",
            "/api/courses/abc/progress",
            "/api/courses/abc/lessons/1/toggle",
        ] {
            let method = if uri.ends_with("toggle") {
                Method::POST
            } else {
                Method::GET
            };
            let (status, body) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["success"], false, "{uri}");
            assert_eq!(body["error"], "Course not found", "{uri}");
        }

        let (status, body) =
            send(&app, Method::POST, "/api/courses/1/lessons/intro/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_creator_body_is_a_json_error() {
        let (app, _) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/creator/requests")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).expect("json error body");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());

        let (status, body) = send(&app, Method::POST, "/api/submissions/one/approve", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_stale_stored_lessons_do_not_inflate_progress() {
        let (app, store) = app();
        store
            .set(&completion_key(1), "[1,2,3,4,5,42]")
            .expect("set");

        let (_, body) = send(&app, Method::GET, "/api/courses/1/progress", None).await;
        assert_eq!(body["data"]["completedCount"], 5);
        assert_eq!(body["data"]["totalLessons"], 5);
        assert_eq!(body["data"]["percentage"], 100);

        let (_, body) = send(&app, Method::GET, "/api/dashboard", None).await;
        assert_eq!(body["data"]["completedLessons"], 5);
    }

    #[tokio::test]
    async fn test_submission_status_all_is_case_insensitive() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/submissions?status=ALL", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);
    }
}
