//! Search-grounded advice gateway for the assistant panel.
//!
//! Thin wrapper over the hosted generateContent API. The gateway is
//! constructed explicitly from config (no ambient client) and never
//! surfaces an error to its caller: any failure degrades to a fixed
//! fallback message so the frontend always has text to render.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Message, Role, Source};

const SYSTEM_INSTRUCTION: &str = "You are an expert RF Engineer with access to real-time search. \
    When asked about frequency allocations, regulations, or local towers, use search to provide \
    current, real-world data. Always cite specific bands or regulatory bodies (FCC, OFCOM, ITU).";
const FALLBACK_TEXT: &str = "Error connecting to the live RF intelligence core.";
const EMPTY_RESPONSE_TEXT: &str = "No response generated.";
const TEMPERATURE: f64 = 0.2;

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

pub struct AdviceGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl Advice {
    fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            sources: Vec::new(),
        }
    }
}

impl AdviceGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Sends the conversation and returns grounded advice. Never fails;
    /// network or parse errors are logged and replaced by the fallback.
    pub async fn advise(&self, history: &[Message]) -> Advice {
        match self.request(history).await {
            Ok(advice) => advice,
            Err(e) => {
                warn!("advice gateway failure: {e:#}");
                Advice::fallback()
            }
        }
    }

    async fn request(&self, history: &[Message]) -> Result<Advice> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let body = GenerateRequest::from_history(history);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("request failed")?
            .error_for_status()
            .context("service returned an error status")?;

        let parsed: GenerateResponse = response.json().await.context("malformed response body")?;
        extract(parsed)
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn extract(response: GenerateResponse) -> Result<Advice> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .context("no candidates in response")?;

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE_TEXT.to_string());

    let sources = candidate
        .grounding_metadata
        .map(|g| {
            g.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| Source {
                    uri: web.uri.unwrap_or_default(),
                    title: web.title.unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Advice { text, sources })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn from_history(history: &[Message]) -> Self {
        Self {
            contents: history
                .iter()
                .map(|m| Content {
                    role: Some(wire_role(m.role).to_string()),
                    parts: vec![Part {
                        text: m.content.clone(),
                    }],
                })
                .collect(),
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            tools: vec![Tool {
                google_search: serde_json::json!({}),
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}
