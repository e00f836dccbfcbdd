//! Error handling tests
//!
//! Upstream failures map to stable status codes and never leak provider
//! payloads or credentials to the caller.

#[cfg(test)]
mod tests {
    use crate::common::{Part, Upstreams, multipart_form};
    use crate::gateway_app;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn essay_form() -> (String, Vec<u8>) {
        multipart_form(&[Part::Text("essay_text", "A short essay about cities.")])
    }

    #[actix_web::test]
    async fn test_upstream_auth_failure_is_bad_gateway_without_details() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided: sk-test-openai-key" }
            })))
            .mount(&upstreams.openai)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = essay_form();
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = test::read_body(resp).await;
        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("sk-test-openai-key"));
        assert!(!text.contains("Incorrect API key"));

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
        assert_eq!(body["error"]["message"], "openai request failed");
    }

    #[actix_web::test]
    async fn test_model_refusal_is_not_echoed() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "refusal": "INTERNAL-REFUSAL-TEXT I cannot help"
                    },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&upstreams.openai)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = essay_form();
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = test::read_body(resp).await;
        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("INTERNAL-REFUSAL-TEXT"));
        assert!(!text.contains("refused"));

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "UPSTREAM_FORMAT_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Upstream format error: openai returned an unusable reply"
        );
    }

    #[actix_web::test]
    async fn test_upstream_rate_limit_is_forwarded() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "20"))
            .mount(&upstreams.openai)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = essay_form();
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn test_slow_upstream_times_out() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&upstreams.openai)
            .await;
        let mut config = upstreams.config();
        config.gateway.providers.timeout = 1;
        let app = gateway_app!(upstreams.state_with(config));

        let (content_type, body) = essay_form();
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[actix_web::test]
    async fn test_missing_api_key_fails_without_calling_upstream() {
        let upstreams = Upstreams::start().await;
        let mut config = upstreams.config();
        config.gateway.providers.openai.api_key.clear();
        let app = gateway_app!(upstreams.state_with(config));

        let (content_type, body) = essay_form();
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(upstreams.openai.received_requests().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_rejected() {
        let upstreams = Upstreams::start().await;
        let mut config = upstreams.config();
        config.gateway.server.max_upload_size = 16;
        let app = gateway_app!(upstreams.state_with(config));

        let (content_type, body) = multipart_form(&[Part::File {
            name: "file",
            filename: "essay.jpg",
            content_type: "image/jpeg",
            data: &[0u8; 64],
        }]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_non_multipart_body_is_bad_request() {
        let upstreams = Upstreams::start().await;
        let app = gateway_app!(upstreams.state());

        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("essay")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let upstreams = Upstreams::start().await;
        let app = gateway_app!(upstreams.state());

        let req = test::TestRequest::get()
            .uri("/api/py/audio/not-a-real-id.mp3")
            .insert_header(("x-request-id", "trace-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-42");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"]["timestamp"].is_i64());
    }
}
