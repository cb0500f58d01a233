use axum::middleware::from_fn_with_state;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    let jobs = Router::new()
        .route(
            "/jobs",
            get(handlers::jobs::list)
                .post(handlers::jobs::create)
                .fallback(handlers::not_found),
        )
        .route(
            "/jobs/{id}",
            get(handlers::jobs::retrieve)
                .patch(handlers::jobs::update)
                .delete(handlers::jobs::delete)
                .fallback(handlers::not_found),
        )
        .route_layer(from_fn_with_state(state.clone(), authn::authenticate));

    Router::new()
        .nest("/api/v1", jobs)
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::{
        adaptors::jobs::memory::MemoryJobRepository,
        auth::{Caller, TokenAuthority},
    };

    struct Harness {
        app: Router,
        tokens: TokenAuthority,
    }

    impl Harness {
        fn new() -> Self {
            let tokens = TokenAuthority::new("test-secret", 1);
            let state = AppState::from_parts(Arc::new(MemoryJobRepository::new()), tokens.clone());
            Harness {
                app: build_routes(state),
                tokens,
            }
        }

        fn token(&self, user_id: &str) -> String {
            self.tokens
                .issue(&Caller {
                    user_id: user_id.into(),
                    name: user_id.into(),
                })
                .unwrap()
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            user: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response: Response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn create(&self, user: &str, company: &str) -> Value {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/v1/jobs",
                    Some(user),
                    Some(json!({ "company": company, "position": "Eng" })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["job"].clone()
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn test_requires_bearer_token() {
        let h = Harness::new();
        let (status, body) = h.send(Method::GET, "/api/v1/jobs", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication invalid");
    }

    #[tokio::test]
    async fn test_rejects_bad_token() {
        let h = Harness::new();
        let request = Request::get("/api/v1/jobs")
            .header(header::AUTHORIZATION, "Bearer nonsense")
            .body(Body::empty())
            .unwrap();
        let response = h.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let h = Harness::new();
        let (status, body) = h
            .send(
                Method::POST,
                "/api/v1/jobs",
                Some("u-1"),
                Some(json!({ "company": "Acme", "position": "Eng", "createdBy": "someone-else" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let job = &body["job"];
        assert_eq!(job["createdBy"], "u-1");
        assert_eq!(job["status"], "pending");
        assert!(job["createdAt"].is_string());

        let uri = format!("/api/v1/jobs/{}", job["id"].as_str().unwrap());
        let (status, body) = h.send(Method::GET, &uri, Some("u-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["company"], "Acme");
        assert_eq!(body["job"]["position"], "Eng");
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let h = Harness::new();
        let (status, body) = h
            .send(
                Method::POST,
                "/api/v1/jobs",
                Some("u-1"),
                Some(json!({ "position": "Eng" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["message"].as_str().unwrap().contains("company"));
    }

    #[tokio::test]
    async fn test_create_unknown_status_is_rejected() {
        let h = Harness::new();
        let (status, _) = h
            .send(
                Method::POST,
                "/api/v1/jobs",
                Some("u-1"),
                Some(json!({ "company": "Acme", "position": "Eng", "status": "hired" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_counts_only_own_jobs() {
        let h = Harness::new();
        h.create("a", "A1").await;
        h.create("b", "B1").await;
        h.create("a", "A2").await;
        let (status, body) = h.send(Method::GET, "/api/v1/jobs", Some("a"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        let companies: Vec<_> = body["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["company"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(companies, ["A1", "A2"]);
    }

    #[tokio::test]
    async fn test_foreign_job_is_not_found() {
        let h = Harness::new();
        let job = h.create("a", "Acme").await;
        let uri = format!("/api/v1/jobs/{}", job["id"].as_str().unwrap());
        let (status, body) = h.send(Method::GET, &uri, Some("b"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            format!("No job with id {}", job["id"].as_str().unwrap())
        );
        let (status, _) = h
            .send(
                Method::PATCH,
                &uri,
                Some("b"),
                Some(json!({ "company": "x", "position": "y" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = h.send(Method::DELETE, &uri, Some("b"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_flow() {
        let h = Harness::new();
        let job = h.create("u", "Acme").await;
        let uri = format!("/api/v1/jobs/{}", job["id"].as_str().unwrap());

        let (status, body) = h
            .send(
                Method::PATCH,
                &uri,
                Some("u"),
                Some(json!({ "company": "", "position": "Eng" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Company or Position fields cannot be empty");

        let (status, body) = h
            .send(
                Method::PATCH,
                &uri,
                Some("u"),
                Some(json!({ "company": "Globex", "position": "Eng", "status": "interview" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["company"], "Globex");
        assert_eq!(body["job"]["status"], "interview");
        assert_eq!(body["job"]["createdBy"], "u");
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let h = Harness::new();
        let job = h.create("u", "Acme").await;
        let id = job["id"].as_str().unwrap();
        let uri = format!("/api/v1/jobs/{id}");

        let (status, body) = h.send(Method::DELETE, &uri, Some("u"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], format!("job with id: {id} has been deleted"));

        let (status, _) = h.send(Method::GET, &uri, Some("u"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let h = Harness::new();
        let request = Request::post("/api/v1/jobs")
            .header(header::AUTHORIZATION, format!("Bearer {}", h.token("u")))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = h.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_found() {
        let h = Harness::new();
        let job = h.create("u", "Acme").await;
        let uri = format!("/api/v1/jobs/{}", job["id"].as_str().unwrap());
        let (status, body) = h
            .send(
                Method::PUT,
                &uri,
                Some("u"),
                Some(json!({ "company": "x", "position": "y" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Route does not exist");

        let (status, body) = h.send(Method::POST, &uri, Some("u"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route does not exist");

        let (status, body) = h.send(Method::DELETE, "/api/v1/jobs", Some("u"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route does not exist");
    }

    #[tokio::test]
    async fn test_unsupported_method_still_requires_auth() {
        let h = Harness::new();
        let (status, _) = h.send(Method::PUT, "/api/v1/jobs", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let h = Harness::new();
        let (status, body) = h.send(Method::GET, "/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route does not exist");
    }

    #[tokio::test]
    async fn test_probes_are_public() {
        let h = Harness::new();
        let (status, _) = h.send(Method::GET, "/livez", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = h.send(Method::GET, "/healthz", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
