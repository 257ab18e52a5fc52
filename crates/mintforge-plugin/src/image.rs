//! Image generation capability
//!
//! The [`ImageGenerator`] trait is what actions sequence against; the bundled
//! implementation drives a Replicate-style prediction API over HTTP: create a
//! prediction, poll it to completion, download the first output. Model
//! inference itself stays on the vendor side.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[cfg(feature = "plugin-replicate")]
use anyhow::Context;
#[cfg(feature = "plugin-replicate")]
use mintforge_core::constants::settings;
#[cfg(feature = "plugin-replicate")]
use mintforge_core::SettingsSource;
#[cfg(feature = "plugin-replicate")]
use serde::Deserialize;
#[cfg(feature = "plugin-replicate")]
use serde_json::json;
#[cfg(feature = "plugin-replicate")]
use std::time::Duration;
#[cfg(feature = "plugin-replicate")]
use tokio::time::sleep;

/// An image produced from a prompt.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Raw image bytes as served by the generation backend.
    pub data: Bytes,
    /// Filename to store the image under, extension included.
    pub file_name: String,
}

/// Generative-image capability consumed by actions.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the prompt.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

#[cfg(feature = "plugin-replicate")]
const REPLICATE_API_BASE: &str = "https://api.replicate.com/v1";
#[cfg(feature = "plugin-replicate")]
const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/flux-schnell";
#[cfg(feature = "plugin-replicate")]
const MAX_POLL_ATTEMPTS: u32 = 300; // 5 minutes with 1-second intervals
#[cfg(feature = "plugin-replicate")]
const POLL_INTERVAL_SECS: u64 = 1;

/// Replicate-backed [`ImageGenerator`]
#[cfg(feature = "plugin-replicate")]
pub struct ReplicateImageGenerator {
    http_client: reqwest::Client,
    api_base: String,
    api_token: String,
    model: String,
}

#[cfg(feature = "plugin-replicate")]
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    id: String,
    status: String,
    output: Option<serde_json::Value>,
    error: Option<String>,
}

#[cfg(feature = "plugin-replicate")]
impl ReplicateImageGenerator {
    /// Build the generator from host settings.
    ///
    /// `REPLICATE_API_TOKEN` is required; `REPLICATE_IMAGE_MODEL` overrides
    /// the default model slug.
    pub fn from_settings(source: &dyn SettingsSource) -> Result<Self> {
        let api_token = source
            .get_required(settings::REPLICATE_API_TOKEN)
            .with_context(|| format!("{} is not configured", settings::REPLICATE_API_TOKEN))?;
        let model = source
            .get_required(settings::REPLICATE_IMAGE_MODEL)
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        Self::new(api_token, model)
    }

    pub fn new(api_token: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 minutes timeout
            .build()
            .context("Failed to create HTTP client for Replicate")?;

        Ok(Self {
            http_client,
            api_base: REPLICATE_API_BASE.to_string(),
            api_token: api_token.into(),
            model: model.into(),
        })
    }

    /// Point the client at a different API base URL (local test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create a prediction and return its id
    async fn create_prediction(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/predictions", self.api_base);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Token {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&json!({
                "version": self.model,
                "input": {
                    "prompt": prompt,
                },
            }))
            .send()
            .await
            .context("Failed to send request to Replicate API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Replicate API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let prediction: PredictionResponse = response
            .json()
            .await
            .context("Failed to parse Replicate API response")?;

        Ok(prediction.id)
    }

    /// Get prediction status
    async fn get_prediction(&self, prediction_id: &str) -> Result<PredictionResponse> {
        let url = format!("{}/predictions/{}", self.api_base, prediction_id);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Token {}", self.api_token))
            .send()
            .await
            .context("Failed to query Replicate prediction")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Replicate prediction query failed: {}",
                status
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse Replicate prediction response")
    }

    /// Poll until the prediction terminates, returning the first output URL
    async fn wait_for_output(&self, prediction_id: &str) -> Result<String> {
        for _attempt in 0..MAX_POLL_ATTEMPTS {
            let prediction = self.get_prediction(prediction_id).await?;

            match prediction.status.as_str() {
                "succeeded" => return extract_output_url(prediction.output.as_ref()),
                "failed" | "canceled" => {
                    return Err(anyhow::anyhow!(
                        "Replicate prediction {}: {}",
                        prediction.status,
                        prediction.error.unwrap_or_else(|| "no error detail".to_string())
                    ));
                }
                _ => sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await,
            }
        }

        Err(anyhow::anyhow!(
            "Replicate prediction {} did not finish within {} attempts",
            prediction_id,
            MAX_POLL_ATTEMPTS
        ))
    }

    /// Download the generated image
    async fn fetch_output(&self, output_url: &str) -> Result<Bytes> {
        let response = self
            .http_client
            .get(output_url)
            .send()
            .await
            .context("Failed to download generated image")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Image download failed: {}", status));
        }

        response
            .bytes()
            .await
            .context("Failed to read generated image body")
    }
}

#[cfg(feature = "plugin-replicate")]
#[async_trait]
impl ImageGenerator for ReplicateImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let prediction_id = self.create_prediction(prompt).await?;
        tracing::debug!(prediction_id = %prediction_id, model = %self.model, "Replicate prediction created");

        let output_url = self.wait_for_output(&prediction_id).await?;
        let data = self.fetch_output(&output_url).await?;

        tracing::info!(
            prediction_id = %prediction_id,
            output_url = %output_url,
            size_bytes = data.len(),
            "Image generated"
        );

        Ok(GeneratedImage {
            data,
            file_name: output_file_name(&output_url),
        })
    }
}

/// Pull the first URL out of a prediction output (a string or a list).
#[cfg(feature = "plugin-replicate")]
fn extract_output_url(output: Option<&serde_json::Value>) -> Result<String> {
    let url = match output {
        Some(serde_json::Value::String(url)) => Some(url.clone()),
        Some(serde_json::Value::Array(items)) => items
            .first()
            .and_then(|item| item.as_str())
            .map(str::to_owned),
        _ => None,
    };

    url.ok_or_else(|| anyhow::anyhow!("Replicate prediction succeeded without an output URL"))
}

/// Derive a storable filename from an output URL.
#[cfg(feature = "plugin-replicate")]
fn output_file_name(output_url: &str) -> String {
    let last_segment = output_url
        .split('?')
        .next()
        .unwrap_or(output_url)
        .rsplit('/')
        .next()
        .unwrap_or("");

    if last_segment.contains('.') {
        last_segment.to_string()
    } else {
        "generated.png".to_string()
    }
}

#[cfg(all(test, feature = "plugin-replicate"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_output_url_handles_string_and_array() {
        let single = json!("https://cdn.replicate.test/out.png");
        assert_eq!(
            extract_output_url(Some(&single)).unwrap(),
            "https://cdn.replicate.test/out.png"
        );

        let list = json!(["https://cdn.replicate.test/first.png", "https://x/second.png"]);
        assert_eq!(
            extract_output_url(Some(&list)).unwrap(),
            "https://cdn.replicate.test/first.png"
        );

        assert!(extract_output_url(None).is_err());
        assert!(extract_output_url(Some(&json!({}))).is_err());
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("https://cdn.replicate.test/abc/out.webp?x=1"),
            "out.webp"
        );
        assert_eq!(output_file_name("https://cdn.replicate.test/abc"), "generated.png");
    }

    #[tokio::test]
    async fn test_generate_happy_path_over_mock_server() {
        let mut server = mockito::Server::new_async().await;

        let create = server
            .mock("POST", "/predictions")
            .match_header("authorization", "Token test-token")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({"id": "pred-1", "status": "starting", "output": null, "error": null}).to_string())
            .create_async()
            .await;

        let output_url = format!("{}/files/out.png", server.url());
        let poll = server
            .mock("GET", "/predictions/pred-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"id": "pred-1", "status": "succeeded", "output": [output_url], "error": null})
                    .to_string(),
            )
            .create_async()
            .await;

        let download = server
            .mock("GET", "/files/out.png")
            .with_status(200)
            .with_body("fake image bytes")
            .create_async()
            .await;

        let generator = ReplicateImageGenerator::new("test-token", "test/model")
            .unwrap()
            .with_api_base(server.url());

        let image = generator.generate("a bright aurora").await.unwrap();
        assert_eq!(image.file_name, "out.png");
        assert_eq!(image.data.as_ref(), b"fake image bytes");

        create.assert_async().await;
        poll.assert_async().await;
        download.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_surfaces_prediction_failure() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/predictions")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({"id": "pred-2", "status": "starting", "output": null, "error": null}).to_string())
            .create_async()
            .await;

        server
            .mock("GET", "/predictions/pred-2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"id": "pred-2", "status": "failed", "output": null, "error": "NSFW content"})
                    .to_string(),
            )
            .create_async()
            .await;

        let generator = ReplicateImageGenerator::new("test-token", "test/model")
            .unwrap()
            .with_api_base(server.url());

        let err = generator.generate("something").await.unwrap_err();
        assert!(err.to_string().contains("NSFW content"), "got: {}", err);
    }
}
