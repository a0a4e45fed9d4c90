mod fallback;
mod openai;

pub use fallback::{fallback_checklist, fallback_script};
pub use openai::OpenAiScriptWriter;

use std::future::Future;
use std::pin::Pin;

use gemval_common::types::{DiamondSpecification, ValuationResult};

/// Upper bound on checklist items surfaced to the buyer.
pub const MAX_CHECKLIST_ITEMS: usize = 8;

/// Errors from the generative text collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TextGenError {
    #[error("Text generation HTTP error: {0}")]
    Http(String),

    #[error("Text generation auth error: {0}")]
    Auth(String),

    #[error("Text generation API error: {0}")]
    Api(String),

    #[error("Text generation parse error: {0}")]
    Parse(String),
}

impl From<TextGenError> for gemval_common::GemvalError {
    fn from(e: TextGenError) -> Self {
        gemval_common::GemvalError::TextGen(e.to_string())
    }
}

/// Object-safe seam over the generative text collaborator (dyn
/// dispatch). Any failure triggers the deterministic template content.
pub trait ScriptWriter: Send + Sync {
    fn negotiation_script<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
        result: &'a ValuationResult,
    ) -> Pin<Box<dyn Future<Output = Result<String, TextGenError>> + Send + 'a>>;

    fn negotiation_checklist<'a>(
        &'a self,
        spec: &'a DiamondSpecification,
        result: &'a ValuationResult,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, TextGenError>> + Send + 'a>>;
}

/// Split generated checklist text into bare items, stripping ordinal
/// and bullet markers.
pub(crate) fn parse_checklist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(MAX_CHECKLIST_ITEMS)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let mut line = line.trim();

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            line = rest.trim_start();
        }
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        line = rest.trim_start();
    }

    line
}
