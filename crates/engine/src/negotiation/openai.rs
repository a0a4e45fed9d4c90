use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use gemval_common::config::NegotiationConfig;
use gemval_common::types::{DiamondSpecification, ValuationResult};

use super::{parse_checklist, ScriptWriter, TextGenError};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

const SCRIPT_SYSTEM: &str = "You are an expert diamond negotiation consultant. Provide professional, data-driven negotiation strategies.";
const CHECKLIST_SYSTEM: &str =
    "You are a diamond purchasing expert. Create practical, actionable checklist items.";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
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
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

fn script_prompt(spec: &DiamondSpecification, result: &ValuationResult) -> String {
    format!(
        "Generate a professional negotiation script for a diamond purchase with the following details:\n\
         \n\
         Diamond Specifications:\n\
         - Carat: {carat}\n\
         - Cut: {cut}\n\
         - Color: {color}\n\
         - Clarity: {clarity}\n\
         - Measurements: {measurements}\n\
         \n\
         Market Analysis:\n\
         - Fair Market Value: ${value}\n\
         - Price Range: ${min} - ${max}\n\
         - Is Overpriced: {overpriced}\n\
         - Quality Grade: {grade}\n\
         \n\
         Please provide:\n\
         1. A professional opening statement\n\
         2. 3-4 key negotiation points with specific data\n\
         3. A closing strategy\n\
         4. Alternative approaches if price negotiation fails\n\
         \n\
         Keep the tone professional but confident, and include specific dollar amounts and percentages where relevant.",
        carat = spec.carat,
        cut = spec.cut,
        color = spec.color,
        clarity = spec.clarity,
        measurements = spec.measurements.as_deref().unwrap_or("Not specified"),
        value = result.fair_market_value,
        min = result.price_range.min,
        max = result.price_range.max,
        overpriced = if result.is_overpriced { "Yes" } else { "No" },
        grade = result.quality_grade,
    )
}

fn checklist_prompt(spec: &DiamondSpecification) -> String {
    format!(
        "Create a comprehensive pre-negotiation checklist for purchasing a {}ct {} diamond. \
         Include 6-8 specific action items that a buyer should complete before negotiating. \
         Focus on verification, research, and preparation steps.",
        spec.carat, spec.cut,
    )
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Chat-completion backed writer for negotiation content.
pub struct OpenAiScriptWriter {
    http: reqwest::Client,
    config: NegotiationConfig,
    api_key: String,
}

impl OpenAiScriptWriter {
    /// Reads the API key from OPENAI_API_KEY. Returns None when the
    /// key is not set so callers fall back to template content.
    pub fn new(config: NegotiationConfig) -> Option<Self> {
        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!(
                    provider = config.provider.as_str(),
                    "OPENAI_API_KEY not set — generative negotiation content disabled"
                );
                return None;
            }
        };

        Some(Self {
            http: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    async fn complete(&self, system: &str, prompt: String) -> Result<String, TextGenError> {
        let start = std::time::Instant::now();

        let request = ChatRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TextGenError::Http(e.to_string()))?;

        let status = response.status();
        metrics::histogram!("negotiation.api.latency", "model" => self.config.model.clone())
            .record(start.elapsed().as_secs_f64());

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenError::Auth(format!("{}: {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let msg = match serde_json::from_str::<OpenAiError>(&body) {
                Ok(e) => e.error.message,
                Err(_) => body,
            };
            return Err(TextGenError::Api(format!("{}: {}", status, msg)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TextGenError::Parse(format!("Failed to parse completion: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TextGenError::Parse("Empty completion".into()))
    }
}

impl ScriptWriter for OpenAiScriptWriter {
    fn negotiation_script<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
        result: &'a ValuationResult,
    ) -> Pin<Box<dyn Future<Output = Result<String, TextGenError>> + Send + 'a>> {
        Box::pin(self.complete(SCRIPT_SYSTEM, script_prompt(spec, result)))
    }

    fn negotiation_checklist<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
        _result: &'a ValuationResult,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, TextGenError>> + Send + 'a>> {
        Box::pin(async move {
            let content = self
                .complete(CHECKLIST_SYSTEM, checklist_prompt(spec))
                .await?;
            Ok(parse_checklist(&content))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gemval_common::types::{
        Clarity, Color, Cut, EthicalSourcing, MarketComparison, PriceRange, QualityGrade,
        SourcingConfidence, ValuationBasis,
    };

    #[test]
    fn test_parse_completion_response() {
        let json = r#"{
            "choices": [{
                "message": {"content": "Here is your script."}
            }]
        }"#;

        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let content = resp.choices.into_iter().next().unwrap().message.content;
        assert_eq!(content.as_deref(), Some("Here is your script."));
    }

    #[test]
    fn test_script_prompt_carries_analysis() {
        let mut spec = DiamondSpecification::new(1.0, Cut::Round, Color::G, Clarity::VS1);
        spec.measurements = Some("6.4 mm".into());

        let result = ValuationResult {
            fair_market_value: 849,
            quality_grade: QualityGrade::Excellent,
            is_overpriced: false,
            price_range: PriceRange { min: 722, max: 976 },
            market_comparison: MarketComparison::WithinMarketRange,
            negotiation_points: Vec::new(),
            ethical_sourcing: EthicalSourcing {
                verified: false,
                origin: "Unknown".into(),
                certificate: None,
                confidence: SourcingConfidence::Low,
                recommendation: None,
            },
            confidence: 90,
            basis: ValuationBasis::Market,
            note: None,
            last_updated: Utc::now(),
        };

        let prompt = script_prompt(&spec, &result);
        assert!(prompt.contains("Carat: 1"));
        assert!(prompt.contains("Fair Market Value: $849"));
        assert!(prompt.contains("Price Range: $722 - $976"));
        assert!(prompt.contains("Is Overpriced: No"));
        assert!(prompt.contains("Measurements: 6.4 mm"));
    }

    #[test]
    fn test_checklist_prompt_names_the_stone() {
        let spec = DiamondSpecification::new(1.5, Cut::Princess, Color::H, Clarity::SI1);
        let prompt = checklist_prompt(&spec);
        assert!(prompt.contains("1.5ct Princess diamond"));
        assert!(prompt.contains("6-8"));
    }
}
