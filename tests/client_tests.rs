// Chutes client tests against a mock upstream

use mockito::Matcher;
use prompt2img::chutes::ChutesClient;
use prompt2img::config::ChutesConfig;
use prompt2img::error::GatewayError;
use prompt2img::models::request::GenerationRequest;
use prompt2img::providers::{ModelBinding, ProviderKind, ProviderProfile, ResolutionMode};
use serde_json::json;

const TEST_KEY: &str = "cpk_test_key_1234567890";

fn client() -> ChutesClient {
    ChutesClient::new(&ChutesConfig {
        api_key: TEST_KEY.to_string(),
        model: "test-model".to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn native_binding(url: String) -> ModelBinding {
    ModelBinding {
        model_name: "test-model".to_string(),
        profile: ProviderProfile {
            kind: ProviderKind::Native,
            url_template: url,
            supports_negative_prompt: true,
            resolution_mode: ResolutionMode::WidthHeight,
        },
        api_key: TEST_KEY.to_string(),
    }
}

fn request(prompt: &str, negative: &str, width: u32, height: u32) -> GenerationRequest {
    GenerationRequest {
        prompt: prompt.to_string(),
        negative_prompt: negative.to_string(),
        width,
        height,
    }
}

#[tokio::test]
async fn test_success_returns_body_bytes() {
    let mut server = mockito::Server::new_async().await;
    let image = b"\xff\xd8\xff jpeg bytes".to_vec();
    let mock = server
        .mock("POST", "/generate")
        .match_header("authorization", format!("Bearer {TEST_KEY}").as_str())
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(&image)
        .create_async()
        .await;

    let bytes = client()
        .generate(
            &request("a cat", "", 512, 512),
            &native_binding(format!("{}/generate", server.url())),
        )
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), image.as_slice());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unified_payload_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_body(Matcher::Json(json!({
            "model": "m",
            "prompt": "p",
            "negative_prompt": "n",
            "width": 512,
            "height": 512,
            "num_inference_steps": 20,
            "guidance_scale": 7.5,
        })))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let binding = ModelBinding {
        model_name: "m".to_string(),
        profile: ProviderProfile {
            url_template: format!("{}/generate", server.url()),
            ..ProviderProfile::unified()
        },
        api_key: TEST_KEY.to_string(),
    };

    client()
        .generate(&request("p", "n", 512, 512), &binding)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_mapping() {
    let cases: Vec<(usize, fn(&GatewayError) -> bool)> = vec![
        (400, |e| matches!(e, GatewayError::BadRequest(_))),
        (401, |e| matches!(e, GatewayError::Unauthorized(_))),
        (404, |e| matches!(e, GatewayError::NotFound(_))),
        (429, |e| matches!(e, GatewayError::RateLimited(_))),
        (500, |e| matches!(e, GatewayError::UpstreamServer(_))),
        (418, |e| matches!(e, GatewayError::Unknown(_))),
    ];

    for (status, is_expected) in cases {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/generate")
            .with_status(status)
            .with_body("diagnostic detail")
            .create_async()
            .await;

        let err = client()
            .generate(
                &request("p", "", 1024, 1024),
                &native_binding(format!("{}/generate", server.url())),
            )
            .await
            .unwrap_err();

        assert!(is_expected(&err), "HTTP {status} mapped to {err}");
        assert!(!err.to_string().is_empty());
    }
}

#[tokio::test]
async fn test_unknown_status_truncates_long_bodies() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate")
        .with_status(418)
        .with_body("x".repeat(5000))
        .create_async()
        .await;

    let err = client()
        .generate(
            &request("p", "", 1024, 1024),
            &native_binding(format!("{}/generate", server.url())),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HTTP 418"));
    assert!(err.to_string().len() < 300);
}

#[tokio::test]
async fn test_slow_upstream_yields_timeout() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate")
        .with_status(200)
        .with_chunked_body(|writer| {
            // Stall past the client's 1 second budget before the body lands.
            std::thread::sleep(std::time::Duration::from_secs(3));
            writer.write_all(b"too late")
        })
        .create_async()
        .await;

    let client = ChutesClient::new(&ChutesConfig {
        api_key: TEST_KEY.to_string(),
        model: "test-model".to_string(),
        timeout_seconds: 1,
    })
    .unwrap();

    let err = client
        .generate(
            &request("p", "", 1024, 1024),
            &native_binding(format!("{}/generate", server.url())),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Timeout(1)), "got {err}");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind an ephemeral port and release it so nothing listens there.
    // (Dropping a mockito server only resets its mocks; the pooled
    // listener stays alive and answers 501 to unmatched requests.)
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/generate")
    };

    let err = client()
        .generate(&request("p", "", 1024, 1024), &native_binding(url))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Network(_)), "got {err}");
}
