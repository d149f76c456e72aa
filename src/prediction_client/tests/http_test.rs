#[cfg(test)]
mod http_test {
    use crate::logger::impl_fake::LoggerFake;
    use crate::prediction_client::form::FormPayload;
    use crate::prediction_client::impl_http::PredictionClientHttp;
    use crate::prediction_client::interface::{PredictionClient, SubmitError};
    use crate::prediction_client::tests::fixture::OneShotServer;
    use reqwest::Url;
    use serde_json::json;
    use std::sync::Arc;

    fn client(url: &str) -> PredictionClientHttp {
        PredictionClientHttp::new(Url::parse(url).unwrap(), Arc::new(LoggerFake::new())).unwrap()
    }

    fn snapshot_payload() -> FormPayload {
        FormPayload::new().file("file", "webcam.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xD9])
    }

    #[test]
    fn test_posts_multipart_file_field() {
        let server = OneShotServer::respond(
            200,
            "application/json",
            r#"{"prediction":"cat","confidence":0.97}"#,
        );

        let response = client(&server.url).submit(snapshot_payload()).unwrap();

        assert_eq!(response.prediction, Some(json!("cat")));
        assert_eq!(response.confidence, Some(json!(0.97)));

        let request = server.request();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/predict");
        assert!(request
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
        assert!(request.body.contains(r#"name="file"; filename="webcam.jpg""#));
        assert!(request.body.contains("Content-Type: image/jpeg"));
    }

    #[test]
    fn test_text_fields_pass_through() {
        let server = OneShotServer::respond(200, "application/json", r#"{"prediction":"x"}"#);

        let payload = FormPayload::new()
            .text("note", "kitchen bin")
            .file("file", "bottle.png", "image/png", vec![1, 2, 3]);
        client(&server.url).submit(payload).unwrap();

        let request = server.request();
        assert!(request.body.contains(r#"name="note""#));
        assert!(request.body.contains("kitchen bin"));
        assert!(request.body.contains(r#"filename="bottle.png""#));
    }

    #[test]
    fn test_error_status_with_json_body_is_still_decoded() {
        let server = OneShotServer::respond(
            400,
            "application/json",
            r#"{"error":"no face detected"}"#,
        );

        let response = client(&server.url).submit(snapshot_payload()).unwrap();

        assert_eq!(response.error, Some(json!("no face detected")));
        server.request();
    }

    #[test]
    fn test_non_json_body_is_a_decode_error() {
        let server = OneShotServer::respond(
            500,
            "text/html",
            "<html>Internal Server Error</html>",
        );

        let err = client(&server.url).submit(snapshot_payload()).unwrap_err();

        assert!(matches!(err, SubmitError::Decode(_)));
        server.request();
    }

    #[test]
    fn test_unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/predict", listener.local_addr().unwrap());
        drop(listener);

        let err = client(&url).submit(snapshot_payload()).unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
