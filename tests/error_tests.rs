// Error taxonomy tests: display messages and HTTP status mapping

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use prompt2img::error::GatewayError;

fn all_errors() -> Vec<GatewayError> {
    vec![
        GatewayError::Unauthorized("bad key".to_string()),
        GatewayError::NotFound("missing-model".to_string()),
        GatewayError::RateLimited("quota exceeded".to_string()),
        GatewayError::UpstreamServer("backend fault".to_string()),
        GatewayError::BadRequest("payload rejected".to_string()),
        GatewayError::Timeout(60),
        GatewayError::Network("connection reset".to_string()),
        GatewayError::NoProfile("mystery-model".to_string()),
        GatewayError::Unknown("HTTP 418".to_string()),
        GatewayError::Config("bad config".to_string()),
    ]
}

#[test]
fn test_status_mapping_table() {
    let expected = [
        StatusCode::UNAUTHORIZED,
        StatusCode::NOT_FOUND,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::BAD_GATEWAY,
        StatusCode::BAD_REQUEST,
        StatusCode::GATEWAY_TIMEOUT,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::INTERNAL_SERVER_ERROR,
    ];

    for (error, status) in all_errors().into_iter().zip(expected) {
        assert_eq!(error.status_code(), status, "wrong status for {error}");
    }
}

#[test]
fn test_every_error_has_a_display_message() {
    for error in all_errors() {
        assert!(!error.to_string().is_empty());
    }
}

#[test]
fn test_io_errors_surface_as_internal() {
    let error: GatewayError =
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk").into();
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_responses_carry_plain_text_diagnostics() {
    for error in all_errors() {
        let message = error.to_string();
        let response = error.into_response();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"), "{content_type}");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, message.as_bytes(), "body is the display message");
    }
}

#[test]
fn test_kind_labels_are_stable() {
    assert_eq!(GatewayError::RateLimited("q".to_string()).kind(), "rate_limited");
    assert_eq!(GatewayError::Timeout(60).kind(), "timeout");
    assert_eq!(GatewayError::NoProfile("m".to_string()).kind(), "no_profile");
}
