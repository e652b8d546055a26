//! REST API scenarios.
//!
//! The `mock` tests run against an in-process JSONPlaceholder look-alike and always run. The
//! `live` tests hit the configured API (the public one by default) and are ignored unless
//! `--ignored` is passed.
use demo_e2e::api::{NewTodo, TodoApi};
use demo_e2e::error::ApiError;
use http::{Method, StatusCode};

mod common;

mod mock {
    use super::*;
    use crate::common::{dead_api, init_tracing, mock_api, RECORDS};

    async fn api() -> TodoApi {
        init_tracing();
        TodoApi::new(mock_api().await).expect("client")
    }

    #[tokio::test]
    async fn fetch_a_single_todo() {
        let res = api().await.get(1).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.id, 1);
        assert!(!res.body.title.is_empty());
        assert_eq!(res.body.user_id, 1);
    }

    #[tokio::test]
    async fn responses_declare_json() {
        let res = api().await.get(1).await.unwrap();
        assert!(res.is_json());
        assert_eq!(res.content_type().unwrap().essence_str(), "application/json");
    }

    #[tokio::test]
    async fn create_echoes_fields_and_assigns_an_id() {
        let todo = NewTodo {
            title: "Buy milk".to_string(),
            completed: false,
            user_id: 1,
        };
        let res = api().await.create(&todo).await.unwrap();
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body.title, "Buy milk");
        assert!(!res.body.completed);
        assert_eq!(res.body.id, RECORDS + 1);
    }

    #[tokio::test]
    async fn update_returns_the_full_record() {
        let api = api().await;
        let mut existing = api.get(1).await.unwrap().body;
        existing.completed = true;

        let res = api.update(&existing).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, existing);
    }

    #[tokio::test]
    async fn delete_returns_an_empty_object() {
        let res = api().await.delete(1).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.is_empty());
    }

    #[tokio::test]
    async fn completed_filter_restricts_the_list() {
        let api = api().await;

        let active = api.list(Some(false)).await.unwrap();
        assert_eq!(active.status, StatusCode::OK);
        assert!(!active.body.is_empty());
        assert!(active.body.iter().all(|t| !t.completed));

        let done = api.list(Some(true)).await.unwrap();
        assert!(!done.body.is_empty());
        assert!(done.body.iter().all(|t| t.completed));

        let all = api.list(None).await.unwrap();
        assert_eq!(all.body.len() as u64, RECORDS);
        assert_eq!(all.body.len(), active.body.len() + done.body.len());
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let api = api().await;
        let res = api.raw(Method::GET, "/todos/9999").await.unwrap();
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body, serde_json::json!({}));

        match api.get(9999).await {
            Err(ApiError::Decode { status, .. }) => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_servers_are_transport_errors() {
        let api = TodoApi::new(dead_api().await).unwrap();
        match api.get(1).await {
            Err(ApiError::Transport { url, .. }) => assert!(url.ends_with("/todos/1"), "{}", url),
            other => panic!("expected a transport error, got {:?}", other),
        }
    }
}

mod live {
    use super::*;
    use demo_e2e::config::Config;

    fn api() -> TodoApi {
        crate::common::init_tracing();
        let config = Config::from_env().expect("valid DEMO_E2E_* configuration");
        TodoApi::from_config(&config).expect("client")
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn fetch_a_single_todo() {
        let res = api().get(1).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.id, 1);
        assert!(!res.body.title.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn create_a_todo() {
        let todo = NewTodo {
            title: "Buy milk".to_string(),
            completed: false,
            user_id: 1,
        };
        let res = api().create(&todo).await.unwrap();
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body.title, "Buy milk");
        assert!(!res.body.completed);
        assert!(res.body.id > 0);
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn mark_a_todo_as_complete() {
        let api = api();
        let mut existing = api.get(1).await.unwrap().body;
        existing.completed = true;
        let res = api.update(&existing).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.completed);
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn delete_a_todo() {
        let res = api().delete(1).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn fetch_only_active_todos() {
        let res = api().list(Some(false)).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert!(!res.body.is_empty());
        assert!(res.body.iter().all(|t| !t.completed));
    }

    #[tokio::test]
    #[ignore = "hits the public REST API"]
    async fn responses_declare_json() {
        let res = api().get(1).await.unwrap();
        assert!(res.is_json());
    }
}
