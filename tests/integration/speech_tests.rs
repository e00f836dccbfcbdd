//! Speech translation through the HTTP surface

#[cfg(test)]
mod tests {
    use crate::common::{Part, SYNTHESIZED_AUDIO, Upstreams, multipart_form};
    use crate::gateway_app;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use bytes::Bytes;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, header as header_matcher, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn recording() -> (String, Vec<u8>) {
        multipart_form(&[Part::File {
            name: "audio",
            filename: "blob",
            content_type: "audio/webm",
            data: b"\x1aE\xdf\xa3webm-recording",
        }])
    }

    #[actix_web::test]
    async fn test_process_audio_round_trip() {
        let upstreams = Upstreams::start().await;
        upstreams.transcription_replies("Xin chào các bạn").await;
        upstreams.chat_replies("Hello everyone", 1).await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
            .and(header_matcher("xi-api-key", "el-test-key"))
            .and(body_partial_json(json!({
                "text": "Hello everyone",
                "model_id": "eleven_monolingual_v1"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(SYNTHESIZED_AUDIO),
            )
            .expect(1)
            .mount(&upstreams.elevenlabs)
            .await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = recording();
        let req = test::TestRequest::post()
            .uri("/api/py/process-audio")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["originalText"], "Xin chào các bạn");
        assert_eq!(body["translatedText"], "Hello everyone");
        let audio_id = body["audioId"].as_str().unwrap();
        assert!(audio_id.ends_with(".mp3"));
        let audio_url = body["audioUrl"].as_str().unwrap().to_string();
        assert_eq!(audio_url, format!("/api/py/audio/{}", audio_id));

        let translation = &upstreams.chat_requests().await[0];
        assert_eq!(translation["model"], "gpt-4");
        assert!(
            translation["messages"][0]["content"]
                .as_str()
                .unwrap()
                .starts_with("You are a Vietnamese to English translator.")
        );
        assert_eq!(translation["messages"][1]["content"], "Xin chào các bạn");

        // repeated reads return the same bytes
        let first = test::call_and_read_body(
            &app,
            test::TestRequest::get().uri(&audio_url).to_request(),
        )
        .await;
        let second = test::call_and_read_body(
            &app,
            test::TestRequest::get().uri(&audio_url).to_request(),
        )
        .await;
        assert_eq!(first, Bytes::from_static(SYNTHESIZED_AUDIO));
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_transcription_is_sent_with_source_language() {
        let upstreams = Upstreams::start().await;
        upstreams.transcription_replies("Cảm ơn").await;
        upstreams.chat_replies("Thank you", 1).await;
        upstreams.synthesis_replies(0).await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = recording();
        let req = test::TestRequest::post()
            .uri("/api/py/transcribe")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({ "text": "Thank you", "originalText": "Cảm ơn", "language": "vi" })
        );

        let requests = upstreams.openai.received_requests().await.unwrap();
        let transcription = requests
            .iter()
            .find(|r| r.url.path() == "/audio/transcriptions")
            .unwrap();
        let form = String::from_utf8_lossy(&transcription.body);
        assert!(form.contains("name=\"language\"\r\n\r\nvi"));
        assert!(form.contains("name=\"model\"\r\n\r\nwhisper-1"));
        assert!(form.contains("filename=\"audio.webm\""));
    }

    #[actix_web::test]
    async fn test_silence_never_reaches_translation() {
        let upstreams = Upstreams::start().await;
        upstreams.transcription_replies("").await;
        upstreams.chat_replies("unused", 0).await;
        upstreams.synthesis_replies(0).await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = recording();
        let req = test::TestRequest::post()
            .uri("/api/py/process-audio")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NO_SPEECH_DETECTED");
        assert!(upstreams.chat_requests().await.is_empty());
    }

    #[actix_web::test]
    async fn test_text_to_speech_with_custom_voice() {
        let upstreams = Upstreams::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/9BWtsMINqrJLrRacOk9x"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(SYNTHESIZED_AUDIO),
            )
            .expect(1)
            .mount(&upstreams.elevenlabs)
            .await;
        let app = gateway_app!(upstreams.state());

        let req = test::TestRequest::post()
            .uri("/api/py/text-to-speech")
            .set_json(json!({ "text": "Good morning", "voiceId": "9BWtsMINqrJLrRacOk9x" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["contentType"], "audio/mpeg");
        let url = body["audioUrl"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri(url)
            .insert_header((header::RANGE, "bytes=-4"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        let len = SYNTHESIZED_AUDIO.len();
        assert_eq!(
            resp.headers().get(header::CONTENT_RANGE).unwrap().to_str().unwrap(),
            format!("bytes {}-{}/{}", len - 4, len - 1, len)
        );
        assert_eq!(
            test::read_body(resp).await,
            Bytes::from_static(&SYNTHESIZED_AUDIO[len - 4..])
        );
    }

    #[actix_web::test]
    async fn test_missing_audio_field_is_bad_request() {
        let upstreams = Upstreams::start().await;
        let app = gateway_app!(upstreams.state());

        let (content_type, body) = multipart_form(&[Part::Text("note", "no audio here")]);
        let req = test::TestRequest::post()
            .uri("/api/py/process-audio")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
