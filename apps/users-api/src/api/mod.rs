use axum::{Router, middleware, routing::get};
use axum_helpers::{create_router, health_router};
use observability::{metrics_handler, metrics_middleware};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod testing;
pub mod users;

/// Creates the service routes, mounted at the root.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &AppState) -> Router {
    let mut router = Router::new()
        .nest("/users", users::router(state))
        .route("/metrics", get(metrics_handler))
        .merge(health_router(state.config.app));

    if state.config.enable_test_routes {
        router = router.nest("/test", testing::router(state.clone()));
    }

    router.layer(middleware::from_fn(metrics_middleware))
}

/// Full application: routes plus docs, fallback and middleware.
pub fn app(state: &AppState) -> io::Result<Router> {
    create_router::<ApiDoc>(routes(state), &state.config.environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app(enable_test_routes: bool) -> Router {
        let state = AppState::new(Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            enable_test_routes,
        });
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || app(&state)).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn andy() -> Value {
        json!({ "username": "andy", "email": "andy@example.com", "full_name": "Andy" })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(false);
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "users_api");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_user_lifecycle_over_http() {
        let app = test_app(true);

        let (status, created) = send(&app, "POST", "/users", Some(andy())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["username"], "andy");

        let (status, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, active) = send(&app, "GET", "/users", None).await;
        assert_eq!(active, json!([]));

        let (_, all) = send(&app, "GET", "/users?active_only=False", None).await;
        assert_eq!(all[0]["is_active"], false);

        let (status, _) = send(&app, "DELETE", &format!("/users/{id}/permanent"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], format!("User with id '{id}' not found"));
    }

    #[tokio::test]
    async fn test_reset_clears_users() {
        let app = test_app(true);
        send(&app, "POST", "/users", Some(andy())).await;

        let (status, body) = send(&app, "POST", "/test/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Database reset successfully");

        let (_, all) = send(&app, "GET", "/users?active_only=false", None).await;
        assert_eq!(all, json!([]));

        let (status, _) = send(&app, "POST", "/users", Some(andy())).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_events_and_counters_exposed() {
        let app = test_app(true);
        let (_, created) = send(&app, "POST", "/users", Some(andy())).await;
        send(&app, "POST", "/users", Some(andy())).await;

        let (status, events) = send(&app, "GET", "/test/events", None).await;
        assert_eq!(status, StatusCode::OK);
        let events = events.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event_type"], "user.created");
        assert_eq!(events[0]["user_id"], created["id"]);

        let (status, snapshot) = send(&app, "GET", "/test/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["counters"]["users_created"], 1);
        assert!(snapshot["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn test_test_routes_hidden_when_disabled() {
        let app = test_app(false);
        let (status, body) = send(&app, "POST", "/test/reset", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_user_routes() {
        let app = test_app(false);
        let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/users"));
        assert!(paths.contains_key("/users/{id}"));
        assert!(paths.contains_key("/users/{id}/permanent"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_responds() {
        let app = test_app(false);
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
