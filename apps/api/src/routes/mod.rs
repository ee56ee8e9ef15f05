pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/report",
            post(handlers::handle_analyze_report),
        )
        // Resume upload
        .route(
            "/api/v1/resume/extract",
            post(handlers::handle_extract_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::KeywordAnalyzer;
    use crate::config::Config;

    const JD: &str = "Software Engineering Intern, Summer Program\n\
        You will build and deploy features for our customer dashboard.\n\
        Work in a fast-paced environment with a small team of engineers.\n\
        Ship code weekly, write tests, and review pull requests with mentors.\n\
        We value curiosity and a willingness to learn new tools as you go.";

    const RESUME: &str = "Built and deployed a React app; led a team project\n\
        Implemented a Python API for course scheduling";

    const BOUNDARY: &str = "roleaudit-boundary";
    const DOCX_MIME: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn test_router() -> Router {
        build_router(AppState {
            config: Config::default(),
            analyzer: Arc::new(KeywordAnalyzer),
        })
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_post(
        field: &str,
        file_name: &str,
        content_type: &str,
        content: &str,
    ) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post("/api/v1/resume/extract")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "roleaudit-api");
    }

    #[tokio::test]
    async fn test_analyze_returns_result() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/analyze",
                json!({ "jdText": JD, "resumeText": RESUME }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["analysisId"].is_string());
        let score = body["analysis"]["score"].as_u64().unwrap();
        assert!(score <= 100);
        assert_eq!(body["analysis"]["pairings"].as_array().unwrap().len(), 7);
        assert_eq!(body["analysis"]["coverLetterImpact"]["provided"], false);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_jd() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/analyze",
                json!({ "jdText": "  ", "resumeText": RESUME }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_JD");
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_jd() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/analyze",
                json!({ "jdText": "Engineer wanted", "resumeText": RESUME }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LOW_INFORMATION_JD");
    }

    #[tokio::test]
    async fn test_report_is_plain_text() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/analyze/report",
                json!({ "jdText": JD, "resumeText": RESUME, "coverLetterText": "" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(body_text(response)
            .await
            .starts_with("RoleAudit Readiness Report"));
    }

    #[tokio::test]
    async fn test_extract_text_upload() {
        let response = test_router()
            .oneshot(multipart_post(
                "resume",
                "cv.txt",
                "text/plain",
                "Jane Doe\n\n  Built a parser",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["text"], "Jane Doe\nBuilt a parser");
        assert_eq!(body["lineCount"], 2);
    }

    #[tokio::test]
    async fn test_extract_requires_resume_field() {
        let response = test_router()
            .oneshot(multipart_post("attachment", "cv.txt", "text/plain", "Jane Doe"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_rejects_docx() {
        let response = test_router()
            .oneshot(multipart_post("resume", "cv.docx", DOCX_MIME, "PK not a real docx"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
