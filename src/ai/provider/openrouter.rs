//! OpenRouter Completion Client
//!
//! Sends a single-turn chat completion request to the fixed endpoint and
//! extracts `choices[0].message.content` from the reply.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::ContentGenerator;
use crate::ai::timeout::with_timeout;
use crate::config::GenerationSettings;
use crate::constants::{messages, network};
use crate::types::{BlogError, Result};

/// Completion client with secure API key handling
pub struct OpenRouterClient {
    settings: GenerationSettings,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl OpenRouterClient {
    pub fn new(settings: GenerationSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BlogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }

    async fn send(&self, prompt: &str) -> Result<String> {
        let start_time = Instant::now();
        let request = self.build_request(prompt);

        debug!(
            "Sending completion request to {} ({} prompt chars)",
            self.settings.endpoint,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.settings.endpoint)
            .header("Authorization", self.settings.bearer())
            .header("Content-Type", "application/json")
            .header(network::REFERER_HEADER, &self.settings.site_url)
            .header(network::TITLE_HEADER, &self.settings.site_name)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {}", e);
                BlogError::request_failed(None)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read completion response body: {}", e);
            BlogError::request_failed(Some(status))
        })?;

        debug!(
            "Completion response: status {} in {}ms",
            status,
            start_time.elapsed().as_millis()
        );

        interpret_completion(status, &body)
    }
}

/// Map a completion response (status + raw body) to generated text.
///
/// - non-success status: [`BlogError::Request`] with the fixed message
/// - success but not JSON: [`BlogError::Request`]
/// - JSON without a non-empty `choices[0].message.content`: the literal
///   fallback `"No response from AI."`
pub fn interpret_completion(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        warn!("Completion endpoint returned status {}", status);
        return Err(BlogError::request_failed(Some(status)));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!("Malformed completion response: {}", e);
        BlogError::request_failed(Some(status))
    })?;

    match value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
    {
        Some(content) => Ok(content.to_string()),
        None => {
            warn!("Completion response had no message content, using fallback");
            Ok(messages::NO_RESPONSE.to_string())
        }
    }
}

#[async_trait]
impl ContentGenerator for OpenRouterClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Generating with {} (model: {})", self.name(), self.model());
        with_timeout(self.settings.timeout, self.send(prompt), "completion request").await
    }

    fn name(&self) -> &str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

// Request types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn settings(endpoint: String, timeout: Duration) -> GenerationSettings {
        GenerationSettings {
            api_key: SecretString::from("sk-test".to_string()),
            endpoint,
            model: network::DEFAULT_MODEL.to_string(),
            site_url: network::DEFAULT_SITE_URL.to_string(),
            site_name: network::DEFAULT_SITE_NAME.to_string(),
            timeout,
        }
    }

    /// Read one HTTP/1.1 request (headers + content-length body)
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.trim()
                            .eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve one canned response on a loopback port; yields the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/v1/chat/completions", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });

        (endpoint, handle)
    }

    // -------------------------------------------------------------------------
    // Response interpretation
    // -------------------------------------------------------------------------

    #[test]
    fn test_interpret_success() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello world"}}]}"#;
        assert_eq!(interpret_completion(200, body).unwrap(), "Hello world");
    }

    #[test]
    fn test_interpret_missing_content_falls_back() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":"oops"}"#,
            r#"{}"#,
        ] {
            assert_eq!(
                interpret_completion(200, body).unwrap(),
                "No response from AI.",
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_interpret_non_success_status() {
        let err = interpret_completion(500, r#"{"error":"boom"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate content");
        assert!(matches!(err, BlogError::Request { status: Some(500), .. }));

        let err = interpret_completion(401, "").unwrap_err();
        assert!(matches!(err, BlogError::Request { status: Some(401), .. }));
    }

    #[test]
    fn test_interpret_malformed_body() {
        let err = interpret_completion(200, "<html>gateway</html>").unwrap_err();
        assert!(matches!(err, BlogError::Request { status: Some(200), .. }));
    }

    #[test]
    fn test_request_body_shape() {
        let client =
            OpenRouterClient::new(settings("http://localhost".into(), Duration::from_secs(1))).unwrap();
        let body = serde_json::to_value(client.build_request("Write about tea")).unwrap();

        assert_eq!(body["model"], "openai/gpt-oss-20b:free");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Write about tea");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client =
            OpenRouterClient::new(settings("http://localhost".into(), Duration::from_secs(1))).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-test"));
    }

    // -------------------------------------------------------------------------
    // Loopback round trips
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_generate_sends_headers_and_reads_content() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"Hello world"}}]}"#,
        )
        .await;
        let client = OpenRouterClient::new(settings(endpoint, Duration::from_secs(5))).unwrap();

        let content = client.generate("the prompt").await.unwrap();
        assert_eq!(content, "Hello world");

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(lower.starts_with("post /api/v1/chat/completions"));
        assert!(lower.contains("authorization: bearer sk-test"));
        assert!(lower.contains("http-referer: http://localhost:5173"));
        assert!(lower.contains("x-title: my blogwriter ai"));

        let body_start = request.find("\r\n\r\n").unwrap() + 4;
        let body: Value = serde_json::from_str(&request[body_start..]).unwrap();
        assert_eq!(body["messages"][0]["content"], "the prompt");
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let (endpoint, server) =
            serve_once("429 Too Many Requests", r#"{"error":"slow down"}"#).await;
        let client = OpenRouterClient::new(settings(endpoint, Duration::from_secs(5))).unwrap();

        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, BlogError::Request { status: Some(429), .. }));
        assert_eq!(err.to_string(), "Failed to generate content");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let client = OpenRouterClient::new(settings(endpoint, Duration::from_secs(5))).unwrap();
        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, BlogError::Request { status: None, .. }));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(stream);
        });

        let client = OpenRouterClient::new(settings(endpoint, Duration::from_millis(100))).unwrap();
        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, BlogError::Timeout { .. }));
        assert!(err.is_recoverable());
        server.abort();
    }
}
