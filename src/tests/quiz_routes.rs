#[cfg(test)]
mod tests {
    use axum::{
        Extension, Router,
        body::Body,
        http::{Method, Request, StatusCode, header::AUTHORIZATION},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{
        admin::handlers::admin_routes,
        app,
        auth::models::Identity,
        quiz::handlers::{question_routes, quiz_routes},
        tests::fixtures::test_state,
    };

    fn member() -> Identity {
        Identity {
            user_id: "user_member".into(),
            is_admin: false,
        }
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let state = test_state();

        for uri in ["/quiz", "/admin/quizzes"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app(state.clone()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let state = test_state();
        let request = Request::builder()
            .uri("/quiz")
            .header(AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn short_title_is_rejected() {
        let router: Router = quiz_routes(test_state()).layer(Extension(member()));
        let request = json_request(Method::POST, "/", json!({ "title": "ab" }));

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn overlong_title_is_rejected() {
        let router: Router = quiz_routes(test_state()).layer(Extension(member()));
        let request = json_request(Method::POST, "/", json!({ "title": "t".repeat(201) }));

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_inline_question_is_rejected() {
        let router: Router = quiz_routes(test_state()).layer(Extension(member()));
        let request = json_request(
            Method::POST,
            "/",
            json!({
                "title": "Capitals",
                "questions": [{
                    "text": "Capital of Norway?",
                    "options": ["Oslo"],
                    "correct_indices": [0]
                }]
            }),
        );

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn single_question_with_two_answers_is_rejected() {
        let router: Router = question_routes(test_state()).layer(Extension(member()));
        let request = json_request(
            Method::POST,
            "/",
            json!({
                "quiz_id": uuid::Uuid::new_v4(),
                "text": "Pick one",
                "type": "SINGLE",
                "options": ["A", "B", "C"],
                "correct_indices": [0, 2]
            }),
        );

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_listing_requires_admin() {
        let router: Router = admin_routes(test_state()).layer(Extension(member()));
        let request = Request::builder()
            .uri("/quizzes")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
