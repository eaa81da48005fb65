use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use cheque_core::{ExtractionError, VisionModel};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Resolved once at startup from `Config`; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn generate_async(&self, image: &[u8], mime_type: &str, prompt: &str) -> Result<Option<String>> {
        info!(model = %self.config.model, "calling Gemini");

        let body = build_request(image, mime_type, prompt);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(&self.config.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(self.endpoint())
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("gemini request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("gemini error: {status} {txt}");
        }

        let out: GenerateResponse = resp.json().await.context("parse gemini response")?;
        let text = response_text(&out);
        debug!(chars = text.as_deref().map_or(0, str::len), "gemini replied");
        Ok(text)
    }
}

impl VisionModel for GeminiClient {
    fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> std::result::Result<Option<String>, ExtractionError> {
        // main runs under #[tokio::main]; block_on inside a live runtime panics,
        // so step out with block_in_place first.
        let res = if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.generate_async(image, mime_type, prompt)))
        } else {
            tokio::runtime::Runtime::new()
                .context("create tokio runtime")
                .and_then(|rt| rt.block_on(self.generate_async(image, mime_type, prompt)))
        };
        res.map_err(|e| ExtractionError::Service(format!("{e:#}")))
    }
}

fn build_request(image: &[u8], mime_type: &str, prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![
                RequestPart::Inline {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: STANDARD.encode(image),
                    },
                },
                RequestPart::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
    }
}

/// Text parts of the first candidate, joined. `None` when there are none.
pub(crate) fn response_text(resp: &GenerateResponse) -> Option<String> {
    let content = resp.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}
