//! OpenAI-compatible chat and embedding client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use itbot_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Connection settings for an OpenAI-compatible server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Read `OPENAI_BASE_URL` and `OPENAI_API_KEY`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        Self::new(base_url, api_key)
    }
}

/// Client for `/v1/embeddings` and `/v1/chat/completions`
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
    chat_model: String,
    embedding_model: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(OpenAiConfig::from_env())
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.chat_model = model_id.into();
        self
    }

    pub fn with_embedding_model(mut self, model_id: impl Into<String>) -> Self {
        self.embedding_model = model_id.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        kind: fn(String) -> Error,
    ) -> Result<reqwest::Response> {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!("{} rejected the API key: {}", path, text)));
        }
        Err(kind(format!("{} failed with status {}: {}", path, status, text)))
    }

    async fn perform_chat(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<(String, Option<u32>)> {
        let body = ChatCompletionRequest {
            model: &config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: config.max_tokens,
            stream: false,
            temperature: config.temperature,
            top_p: config.top_p,
            stop: (!config.stop_sequences.is_empty()).then_some(config.stop_sequences.as_slice()),
        };

        let response = self.send("chat/completions", &body, Error::LLMProvider).await?;
        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let tokens_used = payload.usage.and_then(|u| u.total_tokens);
        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::LLMProvider("chat completion returned no content".to_string()));
        }

        Ok((content, tokens_used))
    }
}

/// Map a transport failure to a timeout or network error
fn request_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// Put embeddings back in input order when the server reports indices
fn order_embeddings(mut data: Vec<EmbeddingData>) -> Vec<Vec<f32>> {
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    data.into_iter().map(|d| d.embedding).collect()
}

#[async_trait]
impl LLMProvider for OpenAiClient {
    /// Check that the server is reachable and accepts the key
    async fn connect(&mut self) -> Result<()> {
        let response = self
            .authorize(self.client.get(self.url("models")))
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Authentication(
                format!("{} rejected the API key", self.config.base_url),
            )),
            status => Err(Error::Network(format!(
                "{} is not usable: {}",
                self.config.base_url, status
            ))),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.chat_model.clone(),
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let (text, tokens_used) = timeout(config.timeout, self.perform_chat(prompt, config))
            .await
            .map_err(|_| Error::Timeout("Request timed out".to_string()))??;

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }

    fn model_id(&self) -> &str {
        &self.chat_model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingsRequest {
            model: &self.embedding_model,
            input: texts,
        };
        let response = self.send("embeddings", &body, Error::Embedding).await?;
        let payload: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let vectors = order_embeddings(payload.data);
        itbot_core::validate_embeddings(texts.len(), &vectors)?;

        debug!(inputs = texts.len(), model = %self.embedding_model, "openai embeddings");
        Ok(vectors)
    }

    fn model_id(&self) -> &str {
        &self.embedding_model
    }
}
