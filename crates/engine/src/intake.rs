use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use gemval_common::api::intake::{ExtractedSpecification, StoredFile};

/// Errors from the image-intake collaborators.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("File store error: {0}")]
    FileStore(String),

    #[error("Image analysis error: {0}")]
    Analysis(String),
}

impl From<IntakeError> for gemval_common::GemvalError {
    fn from(e: IntakeError) -> Self {
        gemval_common::GemvalError::Intake(e.to_string())
    }
}

/// Object-safe seam over vision-based specification extraction.
pub trait SpecExtractor: Send + Sync {
    fn extract<'a>(
        &'a self,
        image: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<ExtractedSpecification, IntakeError>> + Send + 'a>>;
}

/// Object-safe seam over content-addressed file storage.
pub trait FileStore: Send + Sync {
    fn pin<'a>(
        &'a self,
        content: &'a [u8],
        filename: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<StoredFile, IntakeError>> + Send + 'a>>;
}

/// What intake recovered from one upload. Either half may be absent.
#[derive(Clone, Debug)]
pub struct IntakeOutcome {
    pub stored: Option<StoredFile>,
    pub extracted: Option<ExtractedSpecification>,
    pub uploaded_at: DateTime<Utc>,
}

/// Ingests an uploaded stone image: pins it to the file store and runs
/// specification extraction. Both collaborators are optional and both
/// failures are non-fatal; the caller always gets an outcome.
pub struct ImageIntake {
    files: Option<Arc<dyn FileStore>>,
    extractor: Option<Arc<dyn SpecExtractor>>,
}

impl ImageIntake {
    pub fn new(
        files: Option<Arc<dyn FileStore>>,
        extractor: Option<Arc<dyn SpecExtractor>>,
    ) -> Self {
        Self { files, extractor }
    }

    pub async fn ingest(&self, image: &[u8], filename: &str) -> IntakeOutcome {
        let stored = match &self.files {
            Some(files) => match files.pin(image, filename).await {
                Ok(stored) => Some(stored),
                Err(error) => {
                    tracing::warn!(error = %error, filename, "File pinning failed");
                    metrics::counter!("intake.store.failed").increment(1);
                    None
                }
            },
            None => None,
        };

        let extracted = match &self.extractor {
            Some(extractor) => match extractor.extract(image).await {
                // An all-empty extraction is treated as no extraction.
                Ok(extracted) if !extracted.is_empty() => Some(extracted),
                Ok(_) => {
                    tracing::warn!(filename, "Image analysis recovered no fields");
                    None
                }
                Err(error) => {
                    tracing::warn!(error = %error, filename, "Image analysis failed");
                    metrics::counter!("intake.analysis.failed").increment(1);
                    None
                }
            },
            None => None,
        };

        IntakeOutcome {
            stored,
            extracted,
            uploaded_at: Utc::now(),
        }
    }
}
