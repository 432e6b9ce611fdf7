//! watsonx.ai client implementation

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use itbot_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

use crate::config::WatsonxConfig;

const API_VERSION: &str = "2024-05-01";

/// watsonx.ai client for chat and embeddings
#[derive(Clone)]
pub struct WatsonxClient {
    config: WatsonxConfig,
    access_token: Option<String>,
    client: Client,
    current_model: String,
    embedding_model: String,
}

#[derive(Serialize)]
struct TokenRequest {
    grant_type: String,
    apikey: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    inputs: &'a [String],
    model_id: &'a str,
    project_id: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    results: Vec<EmbeddingResult>,
}

#[derive(Deserialize)]
struct EmbeddingResult {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "no_stop_sequences")]
    stop: &'a [String],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: Option<u32>,
}

impl WatsonxClient {
    /// Model constants
    pub const MISTRAL_LARGE: &'static str = "mistralai/mistral-large";
    pub const GRANITE_3_3_8B_INSTRUCT: &'static str = "ibm/granite-3-3-8b-instruct";
    pub const SLATE_125M_RETRIEVER: &'static str = "ibm/slate-125m-english-rtrvr";

    /// Create a new watsonx client from configuration
    pub fn new(config: WatsonxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            access_token: None,
            client,
            current_model: Self::MISTRAL_LARGE.to_string(),
            embedding_model: Self::SLATE_125M_RETRIEVER.to_string(),
        })
    }

    /// Create a new watsonx client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = WatsonxConfig::from_env()?;
        Self::new(config)
    }

    /// Set the chat model
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.current_model = model_id.into();
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model_id: impl Into<String>) -> Self {
        self.embedding_model = model_id.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/ml/v1/text/{}?version={}", self.config.api_url, path, API_VERSION)
    }

    fn bearer(&self) -> Result<String> {
        self.access_token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
            .ok_or_else(|| Error::Authentication("Not authenticated. Call connect() first.".to_string()))
    }

    /// Send one chat turn and return the reply text and token usage
    async fn perform_chat(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<(String, Option<u32>)> {
        let authorization = self.bearer()?;

        let request_body = ChatRequest {
            model_id: &config.model_id,
            project_id: &self.config.project_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            stop: &config.stop_sequences,
        };

        let response = self
            .client
            .post(self.endpoint("chat"))
            .header("Accept", "application/json")
            .header("Authorization", authorization)
            .json(&request_body)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, Error::LLMProvider).await?;
        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let tokens_used = chat.usage.and_then(|u| u.total_tokens);
        let answer = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if answer.is_empty() {
            return Err(Error::LLMProvider("Empty response from watsonx chat API".to_string()));
        }

        Ok((answer, tokens_used))
    }
}

fn no_stop_sequences(stop: &&[String]) -> bool {
    stop.is_empty()
}

/// Map a transport failure to a timeout or network error
fn request_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// Turn a non-success status into an error of the caller's kind
async fn check_status(response: Response, kind: fn(String) -> Error) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Authentication(format!(
            "watsonx rejected the access token ({}): {}",
            status, error_text
        )));
    }

    Err(kind(format!(
        "watsonx API request failed with status {}: {}",
        status, error_text
    )))
}

#[async_trait]
impl LLMProvider for WatsonxClient {
    async fn connect(&mut self) -> Result<()> {
        let token_request = TokenRequest {
            grant_type: "urn:ibm:params:oauth:grant-type:apikey".to_string(),
            apikey: self.config.api_key.clone(),
        };

        let url = format!("https://{}/identity/token", self.config.iam_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&token_request)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "Authentication failed: {}",
                response.status()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        self.access_token = Some(token_response.access_token);
        debug!("obtained watsonx IAM token");

        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.current_model.clone(),
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let chat_future = self.perform_chat(prompt, config);

        let (text, tokens_used) = match timeout(config.timeout, chat_future).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout("Request timed out".to_string())),
        };

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }

    fn model_id(&self) -> &str {
        &self.current_model
    }
}

#[async_trait]
impl EmbeddingProvider for WatsonxClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let authorization = self.bearer()?;
        let request_body = EmbeddingsRequest {
            inputs: texts,
            model_id: &self.embedding_model,
            project_id: &self.config.project_id,
        };

        let response = self
            .client
            .post(self.endpoint("embeddings"))
            .header("Accept", "application/json")
            .header("Authorization", authorization)
            .json(&request_body)
            .send()
            .await
            .map_err(request_error)?;

        let response = check_status(response, Error::Embedding).await?;
        let payload: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let vectors: Vec<Vec<f32>> = payload.results.into_iter().map(|r| r.embedding).collect();
        itbot_core::validate_embeddings(texts.len(), &vectors)?;

        debug!(inputs = texts.len(), model = %self.embedding_model, "watsonx embeddings");
        Ok(vectors)
    }

    fn model_id(&self) -> &str {
        &self.embedding_model
    }
}
