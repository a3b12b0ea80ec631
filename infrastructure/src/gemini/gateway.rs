//! Gemini REST adapter implementing [`LlmGateway`]

use super::upload::{decode_upload, encode_base64};
use super::types::{GeminiRequest, GeminiResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use solver_application::{GatewayError, LlmGateway};
use solver_domain::{ImageFormat, preview};
use std::time::Duration;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiGateway`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    /// Model for JSON solve calls
    pub model: String,
    /// Model for image transcription calls
    pub vision_model: String,
    pub timeout: Duration,
}

/// Gateway to the Gemini `generateContent` endpoint
///
/// Holds one `reqwest::Client`, built once and shared across requests.
pub struct GeminiGateway {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(
            model = %settings.model,
            vision_model = %settings.vision_model,
            "Gemini gateway initialized"
        );

        Ok(Self { client, settings })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<String, GatewayError> {
        let secs = self.settings.timeout.as_secs();

        // reqwest enforces the same limit; this guard also covers body reads
        match tokio::time::timeout(self.settings.timeout, self.send(model, request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Gemini request to {} timed out after {}s", model, secs);
                Err(GatewayError::Timeout(secs))
            }
        }
    }

    async fn send(&self, model: &str, request: &GeminiRequest) -> Result<String, GatewayError> {
        let url = self.endpoint(model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if let Some(reason) = body.block_reason() {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        let text = body.text();
        debug!("Gemini replied with {} chars", text.len());
        Ok(text)
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.settings.timeout.as_secs())
        } else if err.is_connect() {
            GatewayError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            GatewayError::RequestFailed(format!("invalid response body: {}", err))
        } else {
            GatewayError::RequestFailed(err.to_string())
        }
    }
}

fn map_status(status: StatusCode, body: &str) -> GatewayError {
    let detail = format!("HTTP {}: {}", status.as_u16(), preview(&body, 500));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Auth(detail),
        _ => GatewayError::RequestFailed(detail),
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate_json(&self, prompt: &str) -> Result<String, GatewayError> {
        self.generate(&self.settings.model, &GeminiRequest::json(prompt))
            .await
    }

    async fn generate_from_image(
        &self,
        prompt: &str,
        image: &[u8],
        format: ImageFormat,
    ) -> Result<String, GatewayError> {
        let bytes = image.to_vec();
        let detected = tokio::task::spawn_blocking(move || decode_upload(&bytes))
            .await
            .map_err(|e| GatewayError::Other(format!("image decoding task failed: {}", e)))??;

        if detected != format {
            debug!("Upload named as {} but contains {}", format, detected);
        }

        let request = GeminiRequest::with_image(prompt, detected.mime_type(), encode_base64(image));
        self.generate(&self.settings.vision_model, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Captured request: head (request line and headers) and JSON body
    struct Captured {
        head: String,
        body: Value,
    }

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let (head, body_start, content_length) = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_string();
                    let length = head
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    break (head, pos + 4, length);
                }
            };
            while buf.len() < body_start + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
            }
            let request_body =
                serde_json::from_slice(&buf[body_start..body_start + content_length])
                    .unwrap_or(Value::Null);

            let response = format!(
                "HTTP/1.1 {} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(Captured {
                head,
                body: request_body,
            });
        });

        (format!("http://{}", addr), rx)
    }

    fn gateway(base_url: String, timeout: Duration) -> GeminiGateway {
        GeminiGateway::new(GeminiSettings {
            api_key: "test-key".to_string(),
            base_url,
            model: "text-model".to_string(),
            vision_model: "vision-model".to_string(),
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_json_request_and_reply() {
        let (url, captured) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"ok\":true}"}]}}]}"#,
        )
        .await;

        let text = gateway(url, Duration::from_secs(5))
            .generate_json("solve this")
            .await
            .unwrap();
        assert_eq!(text, r#"{"ok":true}"#);

        let captured = captured.await.unwrap();
        assert!(
            captured
                .head
                .starts_with("POST /models/text-model:generateContent")
        );
        assert!(captured.head.to_lowercase().contains("x-goog-api-key: test-key"));
        assert_eq!(captured.body["contents"][0]["parts"][0]["text"], "solve this");
        assert_eq!(
            captured.body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_give_empty_text() {
        let (url, _captured) = serve_once(200, r#"{"candidates":[]}"#).await;
        let text = gateway(url, Duration::from_secs(5))
            .generate_json("solve this")
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let (url, _captured) = serve_once(403, r#"{"error":{"message":"API key not valid"}}"#).await;
        let err = gateway(url, Duration::from_secs(5))
            .generate_json("solve this")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Auth(ref m) if m.contains("API key not valid")));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (url, _captured) = serve_once(500, r#"{"error":"boom"}"#).await;
        let err = gateway(url, Duration::from_secs(5))
            .generate_json("solve this")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m.starts_with("HTTP 500")));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let err = gateway(format!("http://{}", addr), Duration::from_millis(200))
            .generate_json("solve this")
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_invalid_image_never_reaches_the_api() {
        // Nothing listens here; an attempted request would be a connection error
        let gateway = gateway("http://127.0.0.1:9".to_string(), Duration::from_secs(5));
        let err = gateway
            .generate_from_image("read", b"not an image", ImageFormat::Png)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidImage(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = gateway("https://example.test/v1beta/".to_string(), Duration::from_secs(1));
        assert_eq!(
            gateway.endpoint("gemini-2.0-flash"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
