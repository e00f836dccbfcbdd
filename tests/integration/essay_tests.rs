//! Essay evaluation through the HTTP surface

#[cfg(test)]
mod tests {
    use crate::common::{Part, Upstreams, assessment, multipart_form};
    use crate::gateway_app;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::Value;

    const ESSAY: &str = "Some people think students should choose their subjects freely. \
                         I partly agree with this view.";

    #[actix_web::test]
    async fn test_text_essay_is_scored_with_local_band() {
        let upstreams = Upstreams::start().await;
        // 6.0, 6.5, 6.5, 6.0 averages 6.25 which rounds to 6.5
        upstreams
            .chat_replies(&assessment([6.0, 6.5, 6.5, 6.0], None).to_string(), 1)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[Part::Text("essay_text", ESSAY)]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["score"]["overall_band"], 6.5);
        assert_eq!(body["word_count"], 15);
        assert_eq!(body["original_essay"], ESSAY);
        assert!(body["error"].is_null());
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 2);

        let sent = upstreams.chat_requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["model"], "gpt-4o");
        assert_eq!(sent[0]["response_format"]["type"], "json_schema");
        assert_eq!(sent[0]["response_format"]["json_schema"]["strict"], true);
        assert!(
            sent[0]["messages"][1]["content"]
                .as_str()
                .unwrap()
                .contains(ESSAY)
        );
    }

    #[actix_web::test]
    async fn test_image_essay_is_sent_as_data_url() {
        let upstreams = Upstreams::start().await;
        let extracted = "Governments should fund the arts because culture matters.";
        upstreams
            .chat_replies(
                &assessment([7.0, 7.0, 7.0, 6.0], Some(extracted)).to_string(),
                1,
            )
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[Part::File {
            name: "file",
            filename: "essay.png",
            content_type: "image/png",
            data: b"\x89PNG\r\n\x1a\nfake",
        }]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["original_essay"], extracted);
        assert_eq!(body["word_count"], 8);
        assert_eq!(body["score"]["overall_band"], 7.0);

        let sent = upstreams.chat_requests().await;
        assert_eq!(sent[0]["model"], "gpt-4o-mini");
        let url = sent[0]["messages"][1]["content"][1]["image_url"]["url"]
            .as_str()
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[actix_web::test]
    async fn test_text_takes_precedence_over_image() {
        let upstreams = Upstreams::start().await;
        upstreams
            .chat_replies(&assessment([5.0, 5.0, 5.0, 5.0], None).to_string(), 1)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[
            Part::Text("essay_text", ESSAY),
            Part::File {
                name: "file",
                filename: "essay.jpg",
                content_type: "image/jpeg",
                data: b"jpeg",
            },
        ]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["original_essay"], ESSAY);
        assert_eq!(upstreams.chat_requests().await[0]["model"], "gpt-4o");
    }

    #[actix_web::test]
    async fn test_multi_image_evaluation() {
        let upstreams = Upstreams::start().await;
        upstreams
            .chat_replies(
                &assessment([6.0, 6.0, 6.0, 6.5], Some("page one and page two")).to_string(),
                1,
            )
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[
            Part::File {
                name: "files",
                filename: "p1.jpg",
                content_type: "image/jpeg",
                data: b"page-1",
            },
            Part::File {
                name: "files",
                filename: "p2.jpg",
                content_type: "image/jpeg",
                data: b"page-2",
            },
        ]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate-multi")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        // 6.125 rounds down
        assert_eq!(body["score"]["overall_band"], 6.0);
        assert_eq!(body["word_count"], 5);

        let sent = upstreams.chat_requests().await;
        let parts = sent[0]["messages"][0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[2]["type"], "image_url");
    }

    #[actix_web::test]
    async fn test_multi_image_skips_empty_pages() {
        let upstreams = Upstreams::start().await;
        upstreams
            .chat_replies(
                &assessment([6.0, 6.0, 6.0, 6.0], Some("only page")).to_string(),
                1,
            )
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[
            Part::File {
                name: "files",
                filename: "blank.jpg",
                content_type: "image/jpeg",
                data: b"",
            },
            Part::File {
                name: "files",
                filename: "p1.jpg",
                content_type: "image/jpeg",
                data: b"page-1",
            },
        ]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate-multi")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let sent = upstreams.chat_requests().await;
        let parts = sent[0]["messages"][0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[actix_web::test]
    async fn test_multi_image_parse_failure_is_bad_gateway() {
        let upstreams = Upstreams::start().await;
        upstreams
            .chat_replies("I could not read these images, sorry.", 1)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[Part::File {
            name: "files",
            filename: "p1.jpg",
            content_type: "image/jpeg",
            data: b"page-1",
        }]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate-multi")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_FORMAT_ERROR");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Failed to process the images.")
        );
    }

    #[actix_web::test]
    async fn test_multi_image_requires_files() {
        let upstreams = Upstreams::start().await;
        upstreams.chat_replies("{}", 0).await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[Part::Text("note", "nothing attached")]);
        let req = test::TestRequest::post()
            .uri("/api/py/evaluate-multi")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
