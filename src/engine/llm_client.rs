use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::prompt_builder::SummaryPromptBuilder;
use crate::model::seismic::SeismicReport;

const GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-1.5-flash-latest";

pub const UNCONFIGURED_MESSAGE: &str =
    "AI model is not configured. Set GEMINI_API_KEY or add the key to the settings file.";

#[derive(Debug, Error)]
pub enum NarrativeGenerationError {
    #[error("generative language request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative language response was not understood: {0}")]
    Malformed(String),

    #[error("generative language response contained no text")]
    Empty,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Thin client for the generateContent endpoint. Holds the credential
/// it was constructed with; nothing here reads the environment.
pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: MODEL.to_string(),
        }
    }

    pub fn generate(&self, prompt: &str) -> Result<String, NarrativeGenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_URL, self.model, self.api_key
        );

        // No explicit timeout here: generation is the one call allowed
        // to run long, matching the client default.
        let client = reqwest::blocking::Client::new();
        let body = client
            .post(&url)
            .json(&request)
            .send()?
            .error_for_status()?
            .text()?;

        parse_generate_response(&body)
    }
}

fn parse_generate_response(body: &str) -> Result<String, NarrativeGenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| NarrativeGenerationError::Malformed(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(NarrativeGenerationError::Empty);
    }

    Ok(text)
}

/// Produce the summary text for the current analysis.
///
/// This never fails: an unconfigured client yields a static notice
/// without touching the network, and a failed call yields a message
/// embedding the error. Whatever comes back is displayable as-is.
pub fn generate_summary(
    client: Option<&GeminiClient>,
    display_name: &str,
    report: &SeismicReport,
) -> String {
    let Some(client) = client else {
        return UNCONFIGURED_MESSAGE.to_string();
    };

    let prompt = SummaryPromptBuilder::build(display_name, report);

    match client.generate(&prompt) {
        Ok(text) => text,
        Err(e) => format!("An error occurred with the AI model: {}", e),
    }
}
