use serde::{Deserialize, Serialize};

use crate::types::{Clarity, Color, Cut, DiamondSpecification};

/// Best-effort specification fields recovered from an image or
/// certificate scan. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut: Option<Cut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarity: Option<Clarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

impl ExtractedSpecification {
    /// Whether the scan recovered nothing usable.
    pub fn is_empty(&self) -> bool {
        self.carat.is_none()
            && self.cut.is_none()
            && self.color.is_none()
            && self.clarity.is_none()
            && self.measurements.is_none()
            && self.certificate.is_none()
    }

    /// A full specification when all four grading fields were
    /// recovered; otherwise None and the caller falls back to manual
    /// entry.
    pub fn complete(self) -> Option<DiamondSpecification> {
        let (Some(carat), Some(cut), Some(color), Some(clarity)) =
            (self.carat, self.cut, self.color, self.clarity)
        else {
            return None;
        };

        let mut spec = DiamondSpecification::new(carat, cut, color, clarity);
        spec.measurements = self.measurements;
        spec.certificate = self.certificate;
        Some(spec)
    }
}

/// Receipt from the content-addressed file store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredFile {
    /// Content identifier assigned by the store.
    pub content_id: String,
    /// Public retrieval URL.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_requires_all_grading_fields() {
        let partial = ExtractedSpecification {
            carat: Some(1.2),
            cut: Some(Cut::Round),
            ..Default::default()
        };
        assert!(!partial.is_empty());
        assert!(partial.complete().is_none());

        let full = ExtractedSpecification {
            carat: Some(1.2),
            cut: Some(Cut::Round),
            color: Some(Color::G),
            clarity: Some(Clarity::VS1),
            measurements: Some("6.8 x 6.8 x 4.2 mm".into()),
            certificate: None,
        };
        let spec = full.complete().unwrap();
        assert_eq!(spec.carat, 1.2);
        assert_eq!(spec.measurements.as_deref(), Some("6.8 x 6.8 x 4.2 mm"));
    }

    #[test]
    fn test_empty_extraction() {
        assert!(ExtractedSpecification::default().is_empty());
    }
}
